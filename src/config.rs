//! Calibration constants, clamps and timings for the control loop.
//!
//! Defaults describe the reference build: a 0.5–4.5 V / 150 PSI transducer, a
//! 5 V potentiometer for the target pressure and a 10-bit ADC. Boards with a
//! different converter only need [`BlasterConfig::with_adc_max`].

/// Whether an input reads active when the pin is high or low.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ActiveLevel {
    High,
    Low,
}

impl ActiveLevel {
    /// Map a raw pin level to the logical "active" level.
    #[inline]
    pub fn is_active(self, level: bool) -> bool {
        match self {
            ActiveLevel::High => level,
            ActiveLevel::Low => !level,
        }
    }
}

/// Polarity of every digital input.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct InputPolarity {
    pub trigger: ActiveLevel,
    pub cancel: ActiveLevel,
    pub magazine: ActiveLevel,
    pub limiter: ActiveLevel,
}

impl Default for InputPolarity {
    fn default() -> Self {
        Self {
            trigger: ActiveLevel::High,
            cancel: ActiveLevel::Low,
            magazine: ActiveLevel::High,
            limiter: ActiveLevel::High,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BlasterConfig {
    /// Full-scale ADC sample (1023 for 10 bits, 4095 for 12 bits)
    pub adc_max: u16,
    /// ADC reference voltage
    pub supply_volts: f32,

    /// Measured transducer output at 0 PSI
    pub transducer_offset_volts: f32,
    /// Transducer full-scale pressure
    pub transducer_span_psi: f32,
    /// Voltage swing between 0 PSI and full scale
    pub transducer_span_volts: f32,
    /// Potentiometer target pressure at full travel
    pub pot_span_psi: f32,

    /// Target ceiling while the limiter is on
    pub limited_max_psi: u8,
    /// Target ceiling, always applied
    pub unlimited_max_psi: u8,

    /// Magazine size at boot
    pub default_magazine: u8,

    pub fire_pulse_ms: u32,
    pub vent_pulse_ms: u32,
    pub vent_gap_ms: u32,
    /// Pause after acting on a switch edge
    pub settle_ms: u32,

    pub polarity: InputPolarity,

    /// Emit `log` records from the control loop
    pub logging: bool,
}

impl Default for BlasterConfig {
    fn default() -> Self {
        Self {
            adc_max: 1023,
            supply_volts: 5.0,

            transducer_offset_volts: 0.47,
            transducer_span_psi: 150.0,
            transducer_span_volts: 4.0,
            pot_span_psi: 100.0,

            limited_max_psi: 50,
            unlimited_max_psi: 100,

            default_magazine: 10,

            fire_pulse_ms: 100,
            vent_pulse_ms: 100,
            vent_gap_ms: 100,
            settle_ms: 5,

            polarity: InputPolarity::default(),

            logging: false,
        }
    }
}

impl BlasterConfig {
    /// Set the full-scale ADC sample.
    pub fn with_adc_max(mut self, adc_max: u16) -> Self {
        self.adc_max = adc_max;
        self
    }

    /// Set the measured zero-pressure transducer voltage.
    pub fn with_transducer_offset(mut self, volts: f32) -> Self {
        self.transducer_offset_volts = volts;
        self
    }

    /// Set the magazine size used at boot, capped at two digits.
    pub fn with_default_magazine(mut self, size: u8) -> Self {
        self.default_magazine = size.min(crate::ammo::MAX_MAGAZINE);
        self
    }

    pub fn with_polarity(mut self, polarity: InputPolarity) -> Self {
        self.polarity = polarity;
        self
    }

    pub fn with_logging(mut self, logging: bool) -> Self {
        self.logging = logging;
        self
    }
}
