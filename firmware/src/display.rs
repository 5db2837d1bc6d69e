use blaster::display::{ammo_text, pressure_text, BarGraph};
use blaster::Display;

use crate::console;

/// Readouts printed on the serial console.
///
/// The pressure is refreshed every cycle, so a line only goes out when the
/// numbers actually change.
#[derive(Default)]
pub struct ConsoleDisplay {
    last_pressure: Option<(u8, u8)>,
}

impl Display for ConsoleDisplay {
    fn show_ammo(&mut self, remaining: u8, max: u8) {
        console::push(format_args!("AMMO {}", ammo_text(remaining, max)));
    }

    fn show_pressure(&mut self, target_psi: u8, current_psi: u8) {
        if self.last_pressure == Some((target_psi, current_psi)) {
            return;
        }
        self.last_pressure = Some((target_psi, current_psi));

        let bar = BarGraph::new(target_psi, current_psi);
        console::push(format_args!(
            "TANK {} [{:08b}]",
            pressure_text(target_psi, current_psi),
            bar.bits()
        ));
    }
}
