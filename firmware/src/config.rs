use blaster::BlasterConfig;
use log::LevelFilter;

/// Core clock, set up in `Device::new`
pub const SYSCLK_HZ: u32 = 72_000_000;

/// Main cycle period
pub const TICK_MS: u64 = 1;

/// Encoder events buffered between the interrupt and the main cycle
pub const ENCODER_QUEUE: usize = 16;

/// Console lines waiting for the USB host
pub const CONSOLE_LINES: usize = 16;
pub const LINE_LENGTH: usize = 64;

pub const LOG_LEVEL: LevelFilter = LevelFilter::Info;

// https://github.com/obdev/v-usb/blob/master/usbdrv/USB-IDs-for-free.txt
pub const USB_VID_PID: (u16, u16) = (0x16c0, 0x27dd);
pub const USB_MANUFACTURER: &str = "Niche http://niche.london/";
pub const USB_PRODUCT: &str = "Pneumatic blaster";
pub const USB_SERIAL: &str = "niche.london:Blaster-v0.1";

pub fn blaster_config() -> BlasterConfig {
    // Both analog inputs go through 5 V to 3.3 V dividers, so full scale on
    // the 12 bit ADC still stands for the 5 V supply
    BlasterConfig::default()
        .with_adc_max(4095)
        .with_logging(true)
}
