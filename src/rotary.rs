use heapless::spsc::Queue;

/// Magazine size adjustment decoded from the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderEvent {
    Increase,
    Decrease,
}

/// Hands events from the encoder interrupt to the main cycle.
///
/// Single producer (the interrupt), single consumer (the main cycle), no locks.
/// Holds `N - 1` events.
pub type EncoderQueue<const N: usize> = Queue<EncoderEvent, N>;

/// CLK/DT tracker, called from the pin change interrupt of either line.
pub struct Rotary {
    last_clk: bool,
}

impl Rotary {
    // `clk` is the CLK level read at boot, before interrupts are enabled
    pub fn new(clk: bool) -> Self {
        Self { last_clk: clk }
    }

    // Levels are whatever was sampled when the interrupt ran, so simultaneous
    // transitions of both lines are decided by read order
    pub fn update(&mut self, clk: bool, dt: bool) -> Option<EncoderEvent> {
        if clk == self.last_clk {
            // DT moved on its own
            return None;
        }

        self.last_clk = clk;

        if dt != clk {
            Some(EncoderEvent::Increase)
        } else {
            Some(EncoderEvent::Decrease)
        }
    }
}
