use usb_device::class_prelude::{UsbBus, UsbBusAllocator};
use usb_device::device::{UsbDevice, UsbDeviceBuilder, UsbVidPid};
use usb_device::UsbError;

use usbd_serial::SerialPort;

use crate::config::{USB_MANUFACTURER, USB_PRODUCT, USB_SERIAL, USB_VID_PID};
use crate::console;

// USB serial console
pub struct Usb<'a, B>
where
    B: UsbBus,
{
    device: UsbDevice<'a, B>,
    serial: SerialPort<'a, B>,
    pending: Option<(console::Line, usize)>, // Line being sent, bytes already taken
}

impl<'a, B> Usb<'a, B>
where
    B: UsbBus,
{
    pub fn new(allocator: &'a UsbBusAllocator<B>) -> Usb<'a, B> {
        let serial = SerialPort::new(allocator);

        let (vid, pid) = USB_VID_PID;
        let device = UsbDeviceBuilder::new(allocator, UsbVidPid(vid, pid))
            .manufacturer(USB_MANUFACTURER)
            .product(USB_PRODUCT)
            .serial_number(USB_SERIAL)
            .device_class(usbd_serial::USB_CLASS_CDC)
            .build();

        Usb {
            device,
            serial,
            pending: None,
        }
    }

    pub fn poll(&mut self) {
        if !self.device.poll(&mut [&mut self.serial]) {
            return;
        }

        // Input is ignored, but has to be read or the port stalls
        let mut buf = [0u8; 16];
        while let Ok(count) = self.serial.read(&mut buf) {
            if count == 0 {
                break;
            }
        }
    }

    /// Send queued console lines until the endpoint is busy. A line the
    /// host only took part of is resumed from where it stopped.
    pub fn flush_console(&mut self) -> Result<(), UsbError> {
        loop {
            let next = self
                .pending
                .take()
                .or_else(|| console::pop().map(|line| (line, 0)));

            let (line, sent) = match next {
                Some(next) => next,
                None => return Ok(()),
            };

            let rest = &line.as_bytes()[sent..];
            let len = rest.len();

            match self.serial.write(rest) {
                Ok(count) if count < len => {
                    self.pending = Some((line, sent + count));
                    return Ok(());
                }
                Ok(_) => (),
                Err(UsbError::WouldBlock) => {
                    self.pending = Some((line, sent));
                    return Ok(());
                }
                Err(error) => return Err(error),
            }
        }
    }
}
