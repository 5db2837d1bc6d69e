//! Trigger and cancel handling.
//!
//! The trigger charges the blaster while held and fires on release. The
//! cancel button, pressed while charging, vents the tank instead; the
//! blaster then waits for the trigger to be let go before it can charge
//! again.

use embedded_hal::blocking::delay::DelayMs;

use crate::ammo::AmmoCounter;
use crate::config::BlasterConfig;
use crate::io::{Actuators, Valve};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FiringState {
    /// Waiting for the trigger
    Idle,
    /// Trigger held, tank filling
    Charging,
    /// Trigger held, tank at target pressure. Nothing moves the machine here
    /// yet, it behaves exactly like `Charging`.
    Charged,
    /// Shot vented, trigger still held
    Canceled,
}

/// What a step did, last effect wins.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    None,
    StartedCharging,
    Fired,
    Canceled,
    Rearmed,
}

pub struct FiringStateMachine {
    state: FiringState,
}

impl FiringStateMachine {
    pub fn new() -> Self {
        Self::in_state(FiringState::Idle)
    }

    pub fn in_state(state: FiringState) -> Self {
        Self { state }
    }

    #[inline]
    pub fn state(&self) -> FiringState {
        self.state
    }

    /// Run one evaluation with this cycle's logical levels, trigger first then
    /// cancel. Valve pulses and the settle delay block until done.
    pub fn step<A, D>(
        &mut self,
        trigger_held: bool,
        cancel_pressed: bool,
        ammo: &mut AmmoCounter,
        actuators: &mut A,
        delay: &mut D,
        config: &BlasterConfig,
    ) -> Action
    where
        A: Actuators,
        D: DelayMs<u32>,
    {
        let mut action = Action::None;

        match (self.state, trigger_held) {
            (FiringState::Idle, true) => {
                info_if!(config, target: "blaster::firing", "Trigger pressed, charging");
                self.state = FiringState::Charging;
                action = Action::StartedCharging;
            }
            (FiringState::Charging, false) | (FiringState::Charged, false) => {
                info_if!(config, target: "blaster::firing", "Trigger released");
                fire(ammo, actuators, config);
                self.state = FiringState::Idle;
                action = Action::Fired;
            }
            (FiringState::Canceled, false) => {
                info_if!(config, target: "blaster::firing", "Trigger released after cancel");
                // Let the switch finish moving
                delay.delay_ms(config.settle_ms);
                self.state = FiringState::Idle;
                action = Action::Rearmed;
            }
            _ => (),
        }

        let cancelable = matches!(self.state, FiringState::Charging | FiringState::Charged);

        if cancel_pressed && cancelable {
            info_if!(config, target: "blaster::firing", "Cancel pressed");
            cancel(actuators, delay, config);
            self.state = FiringState::Canceled;
            action = Action::Canceled;
        }

        action
    }
}

impl Default for FiringStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

fn fire<A: Actuators>(ammo: &mut AmmoCounter, actuators: &mut A, config: &BlasterConfig) {
    info_if!(config, target: "blaster::firing", "Firing");

    actuators.pulse(Valve::Fire, config.fire_pulse_ms);
    ammo.fire_one();
}

// Two vent pulses, told apart from a shot by pattern rather than length
fn cancel<A, D>(actuators: &mut A, delay: &mut D, config: &BlasterConfig)
where
    A: Actuators,
    D: DelayMs<u32>,
{
    info_if!(config, target: "blaster::firing", "Canceling");

    actuators.pulse(Valve::Vent, config.vent_pulse_ms);
    delay.delay_ms(config.vent_gap_ms);
    actuators.pulse(Valve::Vent, config.vent_pulse_ms);
}
