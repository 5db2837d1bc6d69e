//! Narrow interfaces to the board.
//!
//! The control loop only ever asks for a raw level, a raw ADC sample or a
//! timed valve pulse; pin numbering, ADC channels and drive polarity of the
//! valves stay with the implementor.

/// Polled digital inputs.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DigitalInput {
    Trigger,
    Cancel,
    Magazine,
    Limiter,
}

/// Polled analog inputs.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AnalogInput {
    /// Tank pressure transducer
    Transducer,
    /// Target pressure potentiometer
    TargetPot,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Valve {
    /// Pilot solenoid releasing the shot
    Fire,
    /// Dumps the tank to atmosphere
    Vent,
}

/// Digital and analog input surface, read once per cycle.
pub trait InputSurface {
    /// Raw pin level, before any active-level mapping.
    fn read_digital(&mut self, input: DigitalInput) -> bool;

    /// Raw ADC sample, `0..=adc_max`.
    fn read_analog(&mut self, input: AnalogInput) -> u16;
}

/// Valve drivers.
pub trait Actuators {
    /// Open `valve` for `duration_ms`, blocking until it is closed again.
    fn pulse(&mut self, valve: Valve, duration_ms: u32);
}

/// One cycle's worth of raw input.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Sample {
    pub trigger: bool,
    pub cancel: bool,
    pub magazine: bool,
    pub limiter: bool,
    pub transducer: u16,
    pub target_pot: u16,
}

impl Sample {
    /// Read every input exactly once.
    pub fn read<I: InputSurface>(inputs: &mut I) -> Self {
        Self {
            trigger: inputs.read_digital(DigitalInput::Trigger),
            cancel: inputs.read_digital(DigitalInput::Cancel),
            magazine: inputs.read_digital(DigitalInput::Magazine),
            limiter: inputs.read_digital(DigitalInput::Limiter),
            transducer: inputs.read_analog(AnalogInput::Transducer),
            target_pot: inputs.read_analog(AnalogInput::TargetPot),
        }
    }
}
