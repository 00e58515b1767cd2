//! Ranked list of finished runs.

use std::{fs, io::ErrorKind, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Number of entries the local board keeps.
pub(crate) const CAPACITY: usize = 10;

/// One ranked run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Entry {
    pub(crate) name: String,
    pub(crate) score: u32,
}

/// Outcome of a submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Verdict {
    /// The score entered the board at this one-based rank.
    Ranked(usize),
    /// The score fell below every kept entry.
    NotQualified,
}

/// Service that ranks final scores.
pub(crate) trait Leaderboard {
    /// Submits a final score under `name`.
    fn submit(&mut self, name: &str, score: u32) -> Verdict;

    /// Entries from best to worst.
    fn entries(&self) -> &[Entry];
}

/// Leaderboard stored as a JSON file next to the player profile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct LocalLeaderboard {
    entries: Vec<Entry>,
}

impl LocalLeaderboard {
    /// Reads the board, starting empty when no file exists yet.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("failed to read leaderboard at {}", path.display()))
            }
        };
        let mut board: Self = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse leaderboard at {}", path.display()))?;
        board.entries.sort_by(|left, right| right.score.cmp(&left.score));
        board.entries.truncate(CAPACITY);
        Ok(board)
    }

    /// Writes the board.
    pub(crate) fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to encode leaderboard")?;
        fs::write(path, json)
            .with_context(|| format!("failed to write leaderboard at {}", path.display()))
    }
}

impl Leaderboard for LocalLeaderboard {
    fn submit(&mut self, name: &str, score: u32) -> Verdict {
        // Ties rank below the entries already on the board.
        let position = self
            .entries
            .iter()
            .position(|entry| score > entry.score)
            .unwrap_or(self.entries.len());
        if position >= CAPACITY {
            return Verdict::NotQualified;
        }
        self.entries.insert(
            position,
            Entry {
                name: name.to_owned(),
                score,
            },
        );
        self.entries.truncate(CAPACITY);
        Verdict::Ranked(position + 1)
    }

    fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_board() -> LocalLeaderboard {
        let mut board = LocalLeaderboard::default();
        for index in 0..CAPACITY {
            let score = 1_000 * (index as u32 + 1);
            let _ = board.submit(&format!("pod-{index}"), score);
        }
        board
    }

    #[test]
    fn empty_board_ranks_first() {
        let mut board = LocalLeaderboard::default();
        assert_eq!(board.submit("Ika", 10), Verdict::Ranked(1));
        assert_eq!(board.entries().len(), 1);
    }

    #[test]
    fn entries_stay_sorted_and_capped() {
        let mut board = full_board();
        assert_eq!(board.entries().len(), CAPACITY);
        assert_eq!(board.entries()[0].score, 10_000);

        assert_eq!(board.submit("Ika", 5_500), Verdict::Ranked(6));
        assert_eq!(board.entries().len(), CAPACITY);
        assert_eq!(board.entries().last().map(|entry| entry.score), Some(2_000));
        assert!(board
            .entries()
            .windows(2)
            .all(|pair| pair[0].score >= pair[1].score));
    }

    #[test]
    fn low_scores_do_not_qualify() {
        let mut board = full_board();
        assert_eq!(board.submit("Ika", 999), Verdict::NotQualified);
        assert_eq!(board.submit("Ika", 1_000), Verdict::NotQualified);
        assert!(board.entries().iter().all(|entry| entry.name != "Ika"));
    }

    #[test]
    fn boards_persist_between_runs() {
        let directory = tempfile::tempdir().expect("temp dir");
        let path = directory.path().join("leaderboard.json");
        let mut board = LocalLeaderboard::load(&path).expect("empty");
        let _ = board.submit("Ika", 300);
        let _ = board.submit("Nalu", 900);
        board.save(&path).expect("save");

        let restored = LocalLeaderboard::load(&path).expect("load");
        assert_eq!(restored, board);
        assert_eq!(restored.entries()[0].name, "Nalu");
    }
}
