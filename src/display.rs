//! Display surface and the text/bar layouts shown on it.

use core::fmt::Write;

use heapless::String;

/// Number of segments in the pressure bar.
pub const BAR_SEGMENTS: u8 = 8;

/// Where the readouts go. Has no refresh timer; it shows what it was last
/// given.
pub trait Display {
    fn show_ammo(&mut self, remaining: u8, max: u8);

    fn show_pressure(&mut self, target_psi: u8, current_psi: u8);
}

/// `remaining/max` as two zero-padded two-digit fields, e.g. `05/10`.
pub fn ammo_text(remaining: u8, max: u8) -> String<5> {
    let mut text = String::new();
    // Both fields are capped at 99, five bytes always fit
    write!(text, "{:02}/{:02}", remaining.min(99), max.min(99)).ok();
    text
}

/// Numeric pressure readout, e.g. `045/060 PSI` (current/target).
pub fn pressure_text(target_psi: u8, current_psi: u8) -> String<11> {
    let mut text = String::new();
    write!(text, "{:03}/{:03} PSI", current_psi, target_psi).ok();
    text
}

/// Vertical tank gauge: segment `k` (1-based, bottom up) is lit once the tank
/// holds `k/8` of the target. The top segment lights at `7.5/8` so a tank
/// that is nearly there reads full.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BarGraph(u8);

impl BarGraph {
    pub fn new(target_psi: u8, current_psi: u8) -> Self {
        let target = target_psi as f32;
        let current = current_psi as f32;
        let mut lit = 0u8;

        for k in 1..=BAR_SEGMENTS {
            let fraction = if k == BAR_SEGMENTS {
                7.5
            } else {
                k as f32
            };

            if current >= target * fraction / BAR_SEGMENTS as f32 {
                lit |= 1 << (k - 1);
            }
        }

        BarGraph(lit)
    }

    /// Segment `k`, 1 = bottom.
    pub fn is_lit(&self, k: u8) -> bool {
        k >= 1 && k <= BAR_SEGMENTS && self.0 & (1 << (k - 1)) != 0
    }

    pub fn lit_count(&self) -> u32 {
        self.0.count_ones()
    }

    /// Bit `k - 1` set for each lit segment.
    pub fn bits(&self) -> u8 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::{ammo_text, pressure_text, BarGraph};

    #[test]
    fn ammo_fields_are_zero_padded() {
        assert_eq!(ammo_text(5, 10).as_str(), "05/10");
        assert_eq!(ammo_text(0, 0).as_str(), "00/00");
        assert_eq!(ammo_text(99, 99).as_str(), "99/99");
    }

    #[test]
    fn pressure_readout() {
        assert_eq!(pressure_text(60, 45).as_str(), "045/060 PSI");
        assert_eq!(pressure_text(100, 150).as_str(), "150/100 PSI");
    }

    #[test]
    fn empty_tank_lights_nothing() {
        let bar = BarGraph::new(80, 0);

        assert_eq!(bar.lit_count(), 0);
    }

    #[test]
    fn segment_thresholds() {
        // Target 80: thresholds 10, 20, .. 70, then 75 for the top segment
        let bar = BarGraph::new(80, 30);
        assert_eq!(bar.bits(), 0b0000_0111);

        let bar = BarGraph::new(80, 70);
        assert_eq!(bar.lit_count(), 7);
        assert!(!bar.is_lit(8));

        let bar = BarGraph::new(80, 75);
        assert_eq!(bar.lit_count(), 8);
        assert!(bar.is_lit(8));
    }

    #[test]
    fn just_below_threshold_stays_dark() {
        let bar = BarGraph::new(80, 9);

        assert!(!bar.is_lit(1));
    }

    #[test]
    fn zero_target_reads_full() {
        assert_eq!(BarGraph::new(0, 0).lit_count(), 8);
    }

    #[test]
    fn out_of_range_segment() {
        let bar = BarGraph::new(10, 10);

        assert!(!bar.is_lit(0));
        assert!(!bar.is_lit(9));
    }
}
