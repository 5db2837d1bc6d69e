/// Direction of a level change, relative to the input's active level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    RisingToActive,
    FallingToInactive,
}

/// Level latch for a polled input.
///
/// Has no notion of time, only of the level seen on the previous call. Bounce
/// suppression beyond that is the caller's settle delay.
pub struct Latch {
    last_level: bool,
    current_level: bool,
}

impl Latch {
    pub fn new(init: bool) -> Self {
        Self {
            last_level: init,
            current_level: init,
        }
    }

    // Get the level seen by the latest sample
    pub fn get(&self) -> bool {
        self.current_level
    }

    // Update the latch with the latest (logical) input level
    // Returns Some(edge) if the level differs from the previous sample,
    // at most once per transition
    pub fn sample(&mut self, level: bool) -> Option<Edge> {
        self.current_level = level;

        let edge = match (self.last_level, self.current_level) {
            (false, true) => Some(Edge::RisingToActive),
            (true, false) => Some(Edge::FallingToInactive),
            _ => None,
        };

        self.last_level = self.current_level;

        edge
    }
}
