use embedded_hal::blocking::delay::DelayMs;

/// Busy-wait delay counted in core clock cycles.
///
/// Valve pulses and switch settling stall the main cycle, which is what the
/// control loop expects. Interrupts keep running meanwhile.
#[derive(Copy, Clone)]
pub struct CycleDelay {
    cycles_per_ms: u32,
}

impl CycleDelay {
    pub fn new(sysclk_hz: u32) -> Self {
        Self {
            cycles_per_ms: sysclk_hz / 1000,
        }
    }
}

impl DelayMs<u32> for CycleDelay {
    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            cortex_m::asm::delay(self.cycles_per_ms);
        }
    }
}
