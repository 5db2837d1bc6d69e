use crate::rotary::EncoderEvent;

/// Largest selectable magazine, keeps the counter to two digits.
pub const MAX_MAGAZINE: u8 = 99;

/// Remaining darts and selected magazine size.
///
/// Every mutation marks the counter for a display refresh; the display has no
/// timer of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmmoCounter {
    remaining: u8,
    max: u8,
    refresh: bool,
}

impl AmmoCounter {
    /// Start with a full magazine of `max` darts.
    pub fn new(max: u8) -> Self {
        let max = max.min(MAX_MAGAZINE);

        Self {
            remaining: max,
            max,
            refresh: true,
        }
    }

    #[inline]
    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    #[inline]
    pub fn max(&self) -> u8 {
        self.max
    }

    pub fn is_full(&self) -> bool {
        self.remaining == self.max
    }

    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    // One dart fired, does nothing below zero
    pub fn fire_one(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
        self.refresh = true;
    }

    // Magazine inserted
    pub fn reload(&mut self) {
        self.remaining = self.max;
        self.refresh = true;
    }

    // Magazine removed
    pub fn empty(&mut self) {
        self.remaining = 0;
        self.refresh = true;
    }

    pub fn increase_max(&mut self) {
        if self.max < MAX_MAGAZINE {
            self.max += 1;
        }

        // A full magazine stays full as it grows. Checked against the new
        // size, so at the cap 98/99 still tops up.
        if self.remaining + 1 == self.max {
            self.remaining += 1;
        }

        self.refresh = true;
    }

    pub fn decrease_max(&mut self) {
        self.max = self.max.saturating_sub(1);

        if self.remaining > self.max {
            self.remaining -= 1;
        }

        self.refresh = true;
    }

    pub fn apply(&mut self, event: EncoderEvent) {
        match event {
            EncoderEvent::Increase => self.increase_max(),
            EncoderEvent::Decrease => self.decrease_max(),
        }
    }

    /// Returns true once after any change since the previous call.
    pub fn take_refresh(&mut self) -> bool {
        core::mem::replace(&mut self.refresh, false)
    }
}

impl Default for AmmoCounter {
    fn default() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use super::{AmmoCounter, MAX_MAGAZINE};

    #[derive(Clone, Copy, Debug)]
    enum Op {
        Fire,
        Reload,
        Empty,
        Increase,
        Decrease,
    }

    fn run(counter: &mut AmmoCounter, op: Op) {
        match op {
            Op::Fire => counter.fire_one(),
            Op::Reload => counter.reload(),
            Op::Empty => counter.empty(),
            Op::Increase => counter.increase_max(),
            Op::Decrease => counter.decrease_max(),
        }
    }

    #[test]
    fn fire_floors_at_zero() {
        let mut counter = AmmoCounter::new(2);

        counter.fire_one();
        counter.fire_one();
        counter.fire_one();

        assert_eq!(counter.remaining(), 0);
        assert!(counter.is_empty());
    }

    #[test]
    fn reload_and_empty() {
        let mut counter = AmmoCounter::new(10);

        counter.fire_one();
        counter.empty();
        assert_eq!(counter.remaining(), 0);

        counter.reload();
        assert_eq!(counter.remaining(), 10);
        assert!(counter.is_full());
    }

    #[test]
    fn growing_keeps_full_magazine_full() {
        let mut counter = AmmoCounter::new(10);

        counter.increase_max();

        assert_eq!((counter.remaining(), counter.max()), (11, 11));
    }

    #[test]
    fn growing_partial_magazine_keeps_count() {
        let mut counter = AmmoCounter::new(10);
        counter.fire_one();
        counter.fire_one();

        counter.increase_max();

        assert_eq!((counter.remaining(), counter.max()), (8, 11));
    }

    #[test]
    fn growing_one_below_full_keeps_the_gap() {
        let mut counter = AmmoCounter::new(10);
        counter.fire_one();

        counter.increase_max();

        assert_eq!((counter.remaining(), counter.max()), (9, 11));
    }

    #[test]
    fn full_magazine_stays_full_while_growing() {
        let mut counter = AmmoCounter::new(10);
        let mut seen = vec![];

        for _ in 0..3 {
            counter.increase_max();
            seen.push((counter.remaining(), counter.max()));
        }

        assert_eq!(seen, vec![(11, 11), (12, 12), (13, 13)]);
    }

    #[test]
    fn partial_magazine_keeps_its_gap_while_growing() {
        let mut counter = AmmoCounter::new(10);
        counter.fire_one();
        let mut seen = vec![];

        for _ in 0..3 {
            counter.increase_max();
            seen.push((counter.remaining(), counter.max()));
        }

        assert_eq!(seen, vec![(9, 11), (9, 12), (9, 13)]);
    }

    #[test]
    fn growing_at_cap_tops_up_one_below_full() {
        let mut counter = AmmoCounter::new(MAX_MAGAZINE);
        counter.fire_one();
        assert_eq!(counter.remaining(), 98);

        counter.increase_max();

        assert_eq!((counter.remaining(), counter.max()), (99, 99));

        // Full at the cap, nothing moves
        counter.increase_max();
        assert_eq!((counter.remaining(), counter.max()), (99, 99));
    }

    #[test]
    fn shrinking_full_magazine() {
        let mut counter = AmmoCounter::new(10);

        counter.decrease_max();

        assert_eq!((counter.remaining(), counter.max()), (9, 9));
    }

    #[test]
    fn shrinking_to_zero() {
        let mut counter = AmmoCounter::new(1);

        counter.decrease_max();
        counter.decrease_max();

        assert_eq!((counter.remaining(), counter.max()), (0, 0));

        // 0/0 counts as full
        counter.increase_max();
        assert_eq!((counter.remaining(), counter.max()), (1, 1));
    }

    #[test]
    fn refresh_is_reported_once() {
        let mut counter = AmmoCounter::new(10);
        assert!(counter.take_refresh());
        assert!(!counter.take_refresh());

        counter.fire_one();
        assert!(counter.take_refresh());
        assert!(!counter.take_refresh());
    }

    #[test]
    fn invariant_holds_for_every_sequence() {
        let ops = [Op::Fire, Op::Reload, Op::Empty, Op::Increase, Op::Decrease];

        // Every sequence of 5 operations, from a few starting sizes
        for &start in [0u8, 1, 10, 98, 99].iter() {
            for n in 0..ops.len().pow(5) {
                let mut counter = AmmoCounter::new(start);
                let mut code = n;

                for _ in 0..5 {
                    let op = ops[code % ops.len()];
                    code /= ops.len();

                    run(&mut counter, op);

                    assert!(
                        counter.remaining() <= counter.max(),
                        "{:?} broke {:?}",
                        op,
                        counter
                    );
                    assert!(counter.max() <= MAX_MAGAZINE);
                }
            }
        }
    }
}
