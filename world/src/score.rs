//! Running score components and the one-time final breakdown.

use migration_core::{ScoreBreakdown, ScoreTuning};

/// Components accumulated during play.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreTally {
    treasure: u32,
    treasures_collected: u32,
    side_rooms: u32,
    bosses: u32,
    finalized: Option<ScoreBreakdown>,
}

impl ScoreTally {
    /// Adds one collected treasure. Returns the number collected so far.
    pub fn add_treasure(&mut self, value: u32) -> u32 {
        self.treasure = self.treasure.saturating_add(value);
        self.treasures_collected += 1;
        self.treasures_collected
    }

    /// Adds the bonus for a side room visited for the first time.
    pub fn add_side_room(&mut self, tuning: &ScoreTuning) {
        self.side_rooms = self.side_rooms.saturating_add(tuning.per_side_room);
    }

    /// Adds the bonus for a defeated boss.
    pub fn add_boss(&mut self, tuning: &ScoreTuning) {
        self.bosses = self.bosses.saturating_add(tuning.per_boss);
    }

    /// Score shown during play: everything except the end-of-run bonuses.
    #[must_use]
    pub const fn running(&self) -> u32 {
        self.treasure
            .saturating_add(self.side_rooms)
            .saturating_add(self.bosses)
    }

    /// Final breakdown, once computed.
    #[must_use]
    pub const fn breakdown(&self) -> Option<&ScoreBreakdown> {
        self.finalized.as_ref()
    }

    /// Computes the final breakdown. Only the first call produces a value;
    /// later calls return `None` and leave the breakdown untouched.
    pub fn finalize(
        &mut self,
        elapsed_seconds: u32,
        time_limit_seconds: u32,
        fragments: u32,
        health: u32,
        tuning: &ScoreTuning,
    ) -> Option<ScoreBreakdown> {
        if self.finalized.is_some() {
            return None;
        }

        let remaining = time_limit_seconds.saturating_sub(elapsed_seconds);
        let breakdown = ScoreBreakdown::from_components(
            remaining.saturating_mul(tuning.per_second_remaining),
            self.treasure,
            self.side_rooms,
            self.bosses,
            fragments.saturating_mul(tuning.per_fragment),
            health.saturating_mul(tuning.per_health),
        );
        self.finalized = Some(breakdown);
        Some(breakdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_score_excludes_end_bonuses() {
        let tuning = ScoreTuning::default();
        let mut tally = ScoreTally::default();
        assert_eq!(tally.add_treasure(100), 1);
        assert_eq!(tally.add_treasure(50), 2);
        tally.add_side_room(&tuning);
        tally.add_boss(&tuning);
        assert_eq!(tally.running(), 150 + tuning.per_side_room + tuning.per_boss);
    }

    #[test]
    fn finalize_happens_once() {
        let tuning = ScoreTuning::default();
        let mut tally = ScoreTally::default();
        let _ = tally.add_treasure(300);
        let breakdown = tally.finalize(100, 900, 3, 4, &tuning).expect("first finalize");
        assert_eq!(breakdown.time_bonus, 800 * tuning.per_second_remaining);
        assert_eq!(breakdown.treasure, 300);
        assert_eq!(breakdown.fragments, 3 * tuning.per_fragment);
        assert_eq!(breakdown.health, 4 * tuning.per_health);

        let _ = tally.add_treasure(1_000);
        assert_eq!(tally.finalize(0, 900, 3, 10, &tuning), None);
        assert_eq!(tally.breakdown(), Some(&breakdown));
    }

    #[test]
    fn overtime_earns_no_time_bonus() {
        let mut tally = ScoreTally::default();
        let breakdown = tally
            .finalize(1_200, 900, 0, 0, &ScoreTuning::default())
            .expect("first finalize");
        assert_eq!(breakdown.time_bonus, 0);
        assert_eq!(breakdown.total, 0);
    }
}
