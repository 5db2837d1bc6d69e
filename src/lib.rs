//! Control core for a pneumatic blaster.
//!
//! Everything in here is hardware-independent: pins, ADC channels, valves and
//! the display are reached through the traits in [`io`] and [`display`], so the
//! whole control loop runs (and is tested) on the host.
//!
//! | Module | Purpose |
//! | ------ | ------- |
//! | [`debounce`] | Level latch reporting edges once per transition |
//! | [`rotary`] | CLK/DT magazine size encoder and its interrupt queue |
//! | [`pressure`] | Transducer and potentiometer conversions, limiter |
//! | [`ammo`] | Remaining / magazine size counter |
//! | [`firing`] | Trigger and cancel state machine |
//! | [`blaster`] | One main-cycle iteration over all of the above |
//! | [`io`], [`display`] | What the board has to provide |
//! | [`config`] | Calibration, timings, input polarity |

#![cfg_attr(not(test), no_std)]

// `log` records gated on `BlasterConfig::logging`
macro_rules! info_if {
    ($config:expr, $($arg:tt)+) => {
        if $config.logging {
            log::info!($($arg)+);
        }
    };
}

macro_rules! debug_if {
    ($config:expr, $($arg:tt)+) => {
        if $config.logging {
            log::debug!($($arg)+);
        }
    };
}

pub mod ammo;
pub mod blaster;
pub mod config;
pub mod debounce;
pub mod display;
pub mod firing;
pub mod io;
pub mod pressure;
pub mod rotary;

#[cfg(test)]
mod testing;

pub use crate::ammo::AmmoCounter;
pub use crate::blaster::{Blaster, BlasterContext, CycleReport};
pub use crate::config::{ActiveLevel, BlasterConfig};
pub use crate::debounce::{Edge, Latch};
pub use crate::display::Display;
pub use crate::firing::{Action, FiringState, FiringStateMachine};
pub use crate::io::{Actuators, AnalogInput, DigitalInput, InputSurface, Valve};
pub use crate::pressure::{LimiterMode, PressureState};
pub use crate::rotary::{EncoderEvent, EncoderQueue, Rotary};
