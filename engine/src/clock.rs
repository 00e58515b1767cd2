//! Fixed-timestep accumulator decoupling simulation from display refresh.

use std::time::Duration;

/// Converts wall-clock frame deltas into a whole number of fixed ticks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedTimestep {
    step: Duration,
    max_steps: u32,
    accumulated: Duration,
}

impl FixedTimestep {
    /// Creates an accumulator running at `tick_rate` ticks per second that
    /// never reports more than `max_steps` ticks for one frame.
    #[must_use]
    pub fn new(tick_rate: u32, max_steps: u32) -> Self {
        Self {
            step: Duration::from_secs(1) / tick_rate.max(1),
            max_steps: max_steps.max(1),
            accumulated: Duration::ZERO,
        }
    }

    /// Duration of one tick.
    #[must_use]
    pub const fn step(&self) -> Duration {
        self.step
    }

    /// Adds a frame delta and returns how many ticks to run.
    ///
    /// Time beyond the catch-up cap is dropped so a long stall never turns
    /// into a burst of simulation.
    pub fn advance(&mut self, frame: Duration) -> u32 {
        self.accumulated = self.accumulated.saturating_add(frame);
        let mut steps = 0;
        while self.accumulated >= self.step && steps < self.max_steps {
            self.accumulated -= self.step;
            steps += 1;
        }
        if steps == self.max_steps && self.accumulated >= self.step {
            self.accumulated = Duration::ZERO;
        }
        steps
    }

    /// Forgets any partially accumulated tick.
    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_frames_accumulate() {
        let mut clock = FixedTimestep::new(60, 5);
        let half = clock.step() / 2;
        assert_eq!(clock.advance(half), 0);
        assert_eq!(clock.advance(half), 1);
        assert_eq!(clock.advance(clock.step() * 2), 2);
    }

    #[test]
    fn catch_up_is_capped() {
        let mut clock = FixedTimestep::new(60, 5);
        assert_eq!(clock.advance(Duration::from_secs(2)), 5);
        assert_eq!(clock.advance(Duration::ZERO), 0);
    }

    #[test]
    fn reset_discards_remainder() {
        let mut clock = FixedTimestep::new(60, 5);
        let almost = clock.step() - Duration::from_micros(1);
        assert_eq!(clock.advance(almost), 0);
        clock.reset();
        assert_eq!(clock.advance(Duration::from_micros(1)), 0);
    }
}
