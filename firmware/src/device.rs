use hal::prelude::*;
use stm32f1xx_hal as hal;

use hal::adc::Adc;
use hal::gpio::gpioa::{PA0, PA1};
use hal::gpio::gpiob::{PB12, PB13, PB3, PB4, PB5, PB6, PB8, PB9};
use hal::gpio::{Analog, Edge, ExtiPin, Floating, GpioExt, Input, Output, PullUp, PushPull};
use hal::pac::{Peripherals, ADC1};
use hal::usb::{Peripheral, UsbBus};

use usb_device::class_prelude::UsbBusAllocator;

use embedded_hal::adc::OneShot;

use blaster::{Actuators, AnalogInput, DigitalInput, InputSurface, Valve};

use crate::config::SYSCLK_HZ;
use crate::delay::CycleDelay;

pub struct Device {
    pub inputs: Inputs,
    pub encoder: EncoderPins,
    pub valves: Valves,
    pub usb: UsbBusAllocator<UsbBus<Peripheral>>,
}

impl Device {
    pub fn new(device: Peripherals) -> Self {
        let flash = device.FLASH;
        let afio = device.AFIO;
        let mut exti = device.EXTI;

        // Configure clocks
        let rcc = device.RCC.constrain();
        let mut acr = flash.constrain().acr;
        let clocks = rcc
            .cfgr
            .use_hse(8.MHz()) // External crystal is on 8 Mhz
            .sysclk(72.MHz()) // Clock system on 72 Mhz, used also by USB, divided by 1.5 to 48 MHz
            .freeze(&mut acr);

        let mut gpioa = device.GPIOA.split();
        let mut gpiob = device.GPIOB.split();

        // Disable JTAG to allow access to PB3 and PB4
        let mut afio = afio.constrain();
        let (_, pb3, pb4) = afio.mapr.disable_jtag(gpioa.pa15, gpiob.pb3, gpiob.pb4);

        // Enable USB

        // Hold D+ low for a moment so the host sees a fresh attach after reset
        let mut usb_dp = gpioa.pa12.into_push_pull_output(&mut gpioa.crh);
        usb_dp.set_low();
        cortex_m::asm::delay(SYSCLK_HZ / 100);

        let usb = UsbBus::new(Peripheral {
            usb: device.USB,
            pin_dm: gpioa.pa11,
            pin_dp: usb_dp.into_floating_input(&mut gpioa.crh),
        });

        // Encoder, both phases share the EXTI9_5 line
        let mut clk = gpiob.pb8.into_floating_input(&mut gpiob.crh);
        let mut dt = gpiob.pb9.into_floating_input(&mut gpiob.crh);

        clk.make_interrupt_source(&mut afio);
        clk.trigger_on_edge(&mut exti, Edge::RisingFalling);
        clk.enable_interrupt(&mut exti);

        dt.make_interrupt_source(&mut afio);
        dt.trigger_on_edge(&mut exti, Edge::RisingFalling);
        dt.enable_interrupt(&mut exti);

        // Trigger, limiter and magazine are normally closed switches to ground
        // and read high when active, cancel is a plain push button
        let inputs = Inputs {
            trigger: pb3.into_pull_up_input(&mut gpiob.crl),
            cancel: pb4.into_pull_up_input(&mut gpiob.crl),
            limiter: gpiob.pb5.into_pull_up_input(&mut gpiob.crl),
            magazine: gpiob.pb6.into_pull_up_input(&mut gpiob.crl),
            transducer: gpioa.pa0.into_analog(&mut gpioa.crl),
            target_pot: gpioa.pa1.into_analog(&mut gpioa.crl),
            adc: Adc::adc1(device.ADC1, clocks),
        };

        let mut valves = Valves {
            fire: gpiob.pb12.into_push_pull_output(&mut gpiob.crh),
            vent: gpiob.pb13.into_push_pull_output(&mut gpiob.crh),
            delay: CycleDelay::new(SYSCLK_HZ),
        };
        valves.fire.set_low();
        valves.vent.set_low();

        Device {
            inputs,
            encoder: EncoderPins { clk, dt },
            valves,
            usb,
        }
    }
}

pub struct Inputs {
    trigger: PB3<Input<PullUp>>,
    cancel: PB4<Input<PullUp>>,
    limiter: PB5<Input<PullUp>>,
    magazine: PB6<Input<PullUp>>,
    transducer: PA0<Analog>,
    target_pot: PA1<Analog>,
    adc: Adc<ADC1>,
}

impl InputSurface for Inputs {
    fn read_digital(&mut self, input: DigitalInput) -> bool {
        match input {
            DigitalInput::Trigger => self.trigger.is_high(),
            DigitalInput::Cancel => self.cancel.is_high(),
            DigitalInput::Limiter => self.limiter.is_high(),
            DigitalInput::Magazine => self.magazine.is_high(),
        }
    }

    fn read_analog(&mut self, input: AnalogInput) -> u16 {
        let sample: nb::Result<u16, ()> = match input {
            AnalogInput::Transducer => self.adc.read(&mut self.transducer),
            AnalogInput::TargetPot => self.adc.read(&mut self.target_pot),
        };

        // Conversions block until done, a failed one reads as zero
        sample.unwrap_or(0)
    }
}

pub struct EncoderPins {
    pub clk: PB8<Input<Floating>>,
    pub dt: PB9<Input<Floating>>,
}

impl EncoderPins {
    /// Current (CLK, DT) levels.
    pub fn levels(&self) -> (bool, bool) {
        (self.clk.is_high(), self.dt.is_high())
    }

    pub fn clear_interrupt(&mut self) {
        self.clk.clear_interrupt_pending_bit();
        self.dt.clear_interrupt_pending_bit();
    }
}

// Solenoid drivers, high opens the valve
pub struct Valves {
    fire: PB12<Output<PushPull>>,
    vent: PB13<Output<PushPull>>,
    delay: CycleDelay,
}

impl Actuators for Valves {
    fn pulse(&mut self, valve: Valve, duration_ms: u32) {
        use embedded_hal::blocking::delay::DelayMs;

        match valve {
            Valve::Fire => {
                self.fire.set_high();
                self.delay.delay_ms(duration_ms);
                self.fire.set_low();
            }
            Valve::Vent => {
                self.vent.set_high();
                self.delay.delay_ms(duration_ms);
                self.vent.set_low();
            }
        }
    }
}
