#![no_main]
#![no_std]

use panic_halt as _;
use rtic::app;

mod config;
mod console;
mod delay;
mod device;
mod display;
mod usb;

#[app(device = stm32f1xx_hal::pac, peripherals = true, dispatchers = [SPI1])]
mod app {
    use core::iter;

    use stm32f1xx_hal as hal;

    use hal::usb::{Peripheral, UsbBus};

    use heapless::spsc::{Consumer, Producer, Queue};
    use systick_monotonic::{fugit::Duration, Systick};
    use usb_device::class_prelude::UsbBusAllocator;

    use blaster::{Blaster, EncoderEvent, EncoderQueue, Rotary};

    use crate::config::{self, ENCODER_QUEUE, LOG_LEVEL, SYSCLK_HZ, TICK_MS};
    use crate::console;
    use crate::delay::CycleDelay;
    use crate::device::{Device, EncoderPins, Inputs, Valves};
    use crate::display::ConsoleDisplay;
    use crate::usb::Usb;

    #[monotonic(binds = SysTick, default = true)]
    type RtcMonotonic = Systick<1000>;

    #[shared]
    struct Shared {
        usb: Usb<'static, UsbBus<Peripheral>>,
    }

    #[local]
    struct Local {
        blaster: Blaster,
        inputs: Inputs,
        valves: Valves,
        delay: CycleDelay,
        display: ConsoleDisplay,
        events: Consumer<'static, EncoderEvent, ENCODER_QUEUE>,
        encoder: EncoderPins,
        rotary: Rotary,
        producer: Producer<'static, EncoderEvent, ENCODER_QUEUE>,
    }

    #[init(local = [
        usb_bus: Option<UsbBusAllocator<UsbBus<Peripheral>>> = None,
        queue: EncoderQueue<ENCODER_QUEUE> = Queue::new()
    ])]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        console::init_logger(LOG_LEVEL);

        let device = Device::new(ctx.device);
        let rtc = Systick::new(ctx.core.SYST, SYSCLK_HZ);

        let usb_bus = ctx.local.usb_bus.insert(device.usb);
        let usb = Usb::new(usb_bus);

        let (producer, events) = ctx.local.queue.split();

        let (clk, _) = device.encoder.levels();
        let rotary = Rotary::new(clk);

        let mut blaster = Blaster::new(config::blaster_config());
        let mut display = ConsoleDisplay::default();
        blaster.boot(&mut display);

        log::info!("Blaster ready");

        let local = Local {
            blaster,
            inputs: device.inputs,
            valves: device.valves,
            delay: CycleDelay::new(SYSCLK_HZ),
            display,
            events,
            encoder: device.encoder,
            rotary,
            producer,
        };

        tick::spawn().ok();

        (Shared { usb }, local, init::Monotonics(rtc))
    }

    // Main cycle
    #[task(shared = [usb], local = [blaster, inputs, valves, delay, display, events])]
    fn tick(mut ctx: tick::Context) {
        let events = ctx.local.events;

        ctx.local.blaster.run_cycle(
            iter::from_fn(|| events.dequeue()),
            ctx.local.inputs,
            ctx.local.valves,
            ctx.local.delay,
            ctx.local.display,
        );

        ctx.shared.usb.lock(|usb| {
            if let Err(error) = usb.flush_console() {
                log::debug!("Console write failed: {:?}", error);
            }
        });

        // Scheduled after the cycle, so a cycle that pulses a valve simply
        // runs long
        tick::spawn_after(Duration::<u64, 1, 1000>::millis(TICK_MS)).ok();
    }

    // Both encoder phases, on any edge
    #[task(binds = EXTI9_5, priority = 3, local = [encoder, rotary, producer])]
    fn encoder(ctx: encoder::Context) {
        let pins = ctx.local.encoder;
        let (clk, dt) = pins.levels();
        pins.clear_interrupt();

        if let Some(event) = ctx.local.rotary.update(clk, dt) {
            // A full queue drops the step
            ctx.local.producer.enqueue(event).ok();
        }
    }

    #[task(binds = USB_HP_CAN_TX, priority = 2, shared = [usb])]
    fn usb_tx(mut ctx: usb_tx::Context) {
        ctx.shared.usb.lock(|usb| usb.poll());
    }

    #[task(binds = USB_LP_CAN_RX0, priority = 2, shared = [usb])]
    fn usb_rx0(mut ctx: usb_rx0::Context) {
        ctx.shared.usb.lock(|usb| usb.poll());
    }
}
