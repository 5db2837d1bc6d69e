//! Analog sample to PSI conversions.
//!
//! Both mappings are linear in voltage and truncate to whole PSI, so a reading
//! of 49.9 PSI displays (and compares) as 49.

use crate::config::BlasterConfig;
use crate::debounce::Edge;

/// Tank pressure as of the latest cycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PressureState {
    pub current_psi: u8,
    pub target_psi: u8,
}

/// Lower target ceiling, set from the limiter switch position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LimiterMode {
    enabled: bool,
}

impl LimiterMode {
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Follow a limiter switch edge. Returns the new state.
    pub fn apply(&mut self, edge: Edge) -> bool {
        self.enabled = edge == Edge::RisingToActive;
        self.enabled
    }
}

fn sample_volts(sample: u16, config: &BlasterConfig) -> f32 {
    let sample = sample.min(config.adc_max);
    sample as f32 * config.supply_volts / config.adc_max as f32
}

/// Convert a transducer sample to tank pressure.
///
/// Results below the calibrated zero point are floored at 0, results above
/// the transducer span capped at the span.
pub fn transducer_to_psi(sample: u16, config: &BlasterConfig) -> u8 {
    let volts = sample_volts(sample, config);
    let psi = (volts - config.transducer_offset_volts)
        * (config.transducer_span_psi / config.transducer_span_volts);

    psi.max(0.0).min(config.transducer_span_psi) as u8
}

/// Convert a potentiometer sample to the target pressure.
pub fn pot_to_target_psi(sample: u16, limiter: LimiterMode, config: &BlasterConfig) -> u8 {
    let volts = sample_volts(sample, config);
    let mut target = volts * (config.pot_span_psi / config.supply_volts);

    if limiter.is_enabled() {
        target = target.min(config.limited_max_psi as f32);
    }

    // Hard ceiling regardless of the limiter
    target = target.min(config.unlimited_max_psi as f32);

    target.max(0.0) as u8
}

impl PressureState {
    /// Recompute both readings from this cycle's samples.
    pub fn update(
        &mut self,
        transducer: u16,
        pot: u16,
        limiter: LimiterMode,
        config: &BlasterConfig,
    ) {
        self.current_psi = transducer_to_psi(transducer, config);
        self.target_psi = pot_to_target_psi(pot, limiter, config);
    }
}
