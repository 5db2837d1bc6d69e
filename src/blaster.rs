//! The main cycle.
//!
//! Each call to [`Blaster::run_cycle`] reads every input once, then works
//! through the blaster in a fixed order so later steps see what earlier ones
//! wrote in the same cycle:
//!
//! 1. encoder events queued by the interrupt since the last cycle
//! 2. limiter switch
//! 3. pressure conversions
//! 4. trigger and cancel
//! 5. magazine switch
//! 6. display

use embedded_hal::blocking::delay::DelayMs;

use crate::ammo::AmmoCounter;
use crate::config::BlasterConfig;
use crate::debounce::{Edge, Latch};
use crate::display::Display;
use crate::firing::{Action, FiringState, FiringStateMachine};
use crate::io::{Actuators, InputSurface, Sample};
use crate::pressure::{LimiterMode, PressureState};
use crate::rotary::EncoderEvent;

/// All mutable blaster state, owned in one place.
pub struct BlasterContext {
    pub firing: FiringStateMachine,
    pub ammo: AmmoCounter,
    pub pressure: PressureState,
    pub limiter: LimiterMode,
    pub magazine_latch: Latch,
    pub limiter_latch: Latch,
}

impl BlasterContext {
    pub fn new(config: &BlasterConfig) -> Self {
        Self {
            firing: FiringStateMachine::new(),
            ammo: AmmoCounter::new(config.default_magazine),
            pressure: PressureState::default(),
            limiter: LimiterMode::default(),
            // Both switches read as released until the first sample
            magazine_latch: Latch::new(false),
            limiter_latch: Latch::new(false),
        }
    }
}

/// What happened during one cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CycleReport {
    pub action: Action,
    pub magazine: Option<Edge>,
    pub limiter: Option<Edge>,
    pub encoder_events: usize,
}

pub struct Blaster {
    config: BlasterConfig,
    context: BlasterContext,
}

impl Blaster {
    pub fn new(config: BlasterConfig) -> Self {
        let context = BlasterContext::new(&config);

        Self { config, context }
    }

    pub fn config(&self) -> &BlasterConfig {
        &self.config
    }

    pub fn context(&self) -> &BlasterContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut BlasterContext {
        &mut self.context
    }

    pub fn state(&self) -> FiringState {
        self.context.firing.state()
    }

    /// Put the starting readouts on the display, once, before the first cycle.
    pub fn boot<S: Display>(&mut self, display: &mut S) {
        let ctx = &mut self.context;

        info_if!(
            self.config,
            target: "blaster::cycle",
            "Ready, magazine {}/{}",
            ctx.ammo.remaining(),
            ctx.ammo.max()
        );

        ctx.ammo.take_refresh();
        display.show_ammo(ctx.ammo.remaining(), ctx.ammo.max());
        display.show_pressure(ctx.pressure.target_psi, ctx.pressure.current_psi);
    }

    /// Apply one magazine size adjustment.
    pub fn apply_encoder(&mut self, event: EncoderEvent) {
        let ammo = &mut self.context.ammo;
        ammo.apply(event);

        debug_if!(
            self.config,
            target: "blaster::ammo",
            "{:?}: {}/{}",
            event,
            ammo.remaining(),
            ammo.max()
        );
    }

    /// Run one main-cycle iteration.
    ///
    /// `events` are the encoder events queued since the previous cycle. Valve
    /// pulses and settle delays block inside this call.
    pub fn run_cycle<E, I, A, D, S>(
        &mut self,
        events: E,
        inputs: &mut I,
        actuators: &mut A,
        delay: &mut D,
        display: &mut S,
    ) -> CycleReport
    where
        E: IntoIterator<Item = EncoderEvent>,
        I: InputSurface,
        A: Actuators,
        D: DelayMs<u32>,
        S: Display,
    {
        let sample = Sample::read(inputs);
        let polarity = self.config.polarity;

        let mut encoder_events = 0;
        for event in events {
            self.apply_encoder(event);
            encoder_events += 1;
        }

        let config = &self.config;
        let ctx = &mut self.context;

        // Limiter

        let limiter = ctx
            .limiter_latch
            .sample(polarity.limiter.is_active(sample.limiter));

        if let Some(edge) = limiter {
            if ctx.limiter.apply(edge) {
                info_if!(config, target: "blaster::pressure", "Limiter enabled");
            } else {
                info_if!(config, target: "blaster::pressure", "Limiter disabled");
            }
            // The switch flickers a few times without this
            delay.delay_ms(config.settle_ms);
        }

        // Pressure

        ctx.pressure
            .update(sample.transducer, sample.target_pot, ctx.limiter, config);

        debug_if!(
            config,
            target: "blaster::pressure",
            "Pressure {} PSI, target {} PSI",
            ctx.pressure.current_psi,
            ctx.pressure.target_psi
        );

        // Trigger and cancel

        let action = ctx.firing.step(
            polarity.trigger.is_active(sample.trigger),
            polarity.cancel.is_active(sample.cancel),
            &mut ctx.ammo,
            actuators,
            delay,
            config,
        );

        // Magazine

        let magazine = ctx
            .magazine_latch
            .sample(polarity.magazine.is_active(sample.magazine));

        match magazine {
            Some(Edge::RisingToActive) => {
                info_if!(config, target: "blaster::ammo", "Magazine inserted");
                ctx.ammo.reload();
            }
            Some(Edge::FallingToInactive) => {
                info_if!(config, target: "blaster::ammo", "Magazine removed");
                ctx.ammo.empty();
                delay.delay_ms(config.settle_ms);
            }
            None => (),
        }

        // Display

        if ctx.ammo.take_refresh() {
            info_if!(
                config,
                target: "blaster::ammo",
                "Remaining ammo: {}/{}",
                ctx.ammo.remaining(),
                ctx.ammo.max()
            );
            display.show_ammo(ctx.ammo.remaining(), ctx.ammo.max());
        }

        display.show_pressure(ctx.pressure.target_psi, ctx.pressure.current_psi);

        CycleReport {
            action,
            magazine,
            limiter,
            encoder_events,
        }
    }
}
