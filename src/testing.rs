//! Host stand-ins for the board.

use embedded_hal::blocking::delay::DelayMs;

use crate::display::Display;
use crate::io::{Actuators, AnalogInput, DigitalInput, InputSurface, Valve};

#[derive(Default)]
pub struct RecordingActuators {
    pub pulses: Vec<(Valve, u32)>,
}

impl Actuators for RecordingActuators {
    fn pulse(&mut self, valve: Valve, duration_ms: u32) {
        self.pulses.push((valve, duration_ms));
    }
}

#[derive(Default)]
pub struct RecordingDelay {
    pub waits: Vec<u32>,
}

impl DelayMs<u32> for RecordingDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.waits.push(ms);
    }
}

/// Raw pin levels and samples, set directly by the test.
#[derive(Default)]
pub struct Pins {
    pub trigger: bool,
    pub cancel: bool,
    pub magazine: bool,
    pub limiter: bool,
    pub transducer: u16,
    pub target_pot: u16,
    pub reads: usize,
}

impl Pins {
    /// Everything released with the default polarity: cancel is active low.
    pub fn released() -> Self {
        Self {
            cancel: true,
            ..Self::default()
        }
    }
}

impl InputSurface for Pins {
    fn read_digital(&mut self, input: DigitalInput) -> bool {
        self.reads += 1;

        match input {
            DigitalInput::Trigger => self.trigger,
            DigitalInput::Cancel => self.cancel,
            DigitalInput::Magazine => self.magazine,
            DigitalInput::Limiter => self.limiter,
        }
    }

    fn read_analog(&mut self, input: AnalogInput) -> u16 {
        self.reads += 1;

        match input {
            AnalogInput::Transducer => self.transducer,
            AnalogInput::TargetPot => self.target_pot,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shown {
    Ammo(u8, u8),
    Pressure(u8, u8),
}

#[derive(Default)]
pub struct RecordingDisplay {
    pub shown: Vec<Shown>,
}

impl RecordingDisplay {
    pub fn ammo(&self) -> Vec<(u8, u8)> {
        self.shown
            .iter()
            .filter_map(|s| match *s {
                Shown::Ammo(remaining, max) => Some((remaining, max)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.shown.clear();
    }
}

impl Display for RecordingDisplay {
    fn show_ammo(&mut self, remaining: u8, max: u8) {
        self.shown.push(Shown::Ammo(remaining, max));
    }

    fn show_pressure(&mut self, target_psi: u8, current_psi: u8) {
        self.shown.push(Shown::Pressure(target_psi, current_psi));
    }
}
