//! Fade-out, room swap, fade-in.
//!
//! While a transition runs the world only advances the transition timer.
//! The room swap happens on the tick the fade-out completes.

use migration_core::{RoomId, TileCoord};

/// Room the world swaps to at the transition midpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingRoom {
    /// Room to load.
    pub room: RoomId,
    /// Cell the player arrives on.
    pub arrival: TileCoord,
}

/// Outcome of advancing the transition by one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionStep {
    /// No transition is running.
    Idle,
    /// The fade continues.
    Fading,
    /// Fade-out finished; the room must be swapped now.
    Midpoint(PendingRoom),
    /// Fade-in finished; play may resume.
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Fade {
    Out { elapsed: u32, pending: PendingRoom },
    In { elapsed: u32 },
}

/// Drives the fade that bridges two rooms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionManager {
    fade_ticks: u32,
    fade: Option<Fade>,
}

impl TransitionManager {
    /// Creates an idle manager whose fades last `fade_ticks` each.
    #[must_use]
    pub fn new(fade_ticks: u32) -> Self {
        Self {
            fade_ticks: fade_ticks.max(1),
            fade: None,
        }
    }

    /// Reports whether a fade is in progress.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.fade.is_some()
    }

    /// Starts fading toward `pending`. Ignored while another fade runs.
    pub fn begin(&mut self, pending: PendingRoom) -> bool {
        if self.fade.is_some() {
            return false;
        }
        self.fade = Some(Fade::Out {
            elapsed: 0,
            pending,
        });
        true
    }

    /// Advances the fade by one tick.
    pub fn advance(&mut self) -> TransitionStep {
        match self.fade {
            None => TransitionStep::Idle,
            Some(Fade::Out { elapsed, pending }) => {
                let elapsed = elapsed + 1;
                if elapsed >= self.fade_ticks {
                    self.fade = Some(Fade::In { elapsed: 0 });
                    TransitionStep::Midpoint(pending)
                } else {
                    self.fade = Some(Fade::Out { elapsed, pending });
                    TransitionStep::Fading
                }
            }
            Some(Fade::In { elapsed }) => {
                let elapsed = elapsed + 1;
                if elapsed >= self.fade_ticks {
                    self.fade = None;
                    TransitionStep::Finished
                } else {
                    self.fade = Some(Fade::In { elapsed });
                    TransitionStep::Fading
                }
            }
        }
    }

    /// Darkness of the fade overlay, from 0 (clear) to 1 (black).
    #[must_use]
    pub fn opacity(&self) -> f32 {
        let ticks = self.fade_ticks as f32;
        match self.fade {
            None => 0.0,
            Some(Fade::Out { elapsed, .. }) => elapsed as f32 / ticks,
            Some(Fade::In { elapsed }) => 1.0 - elapsed as f32 / ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending() -> PendingRoom {
        PendingRoom {
            room: RoomId::new(3),
            arrival: TileCoord::new(1, 7),
        }
    }

    #[test]
    fn swap_happens_once_between_fades() {
        let mut manager = TransitionManager::new(4);
        assert_eq!(manager.advance(), TransitionStep::Idle);
        assert!(manager.begin(pending()));
        assert!(!manager.begin(pending()));

        let steps: Vec<_> = (0..8).map(|_| manager.advance()).collect();
        assert_eq!(
            steps,
            vec![
                TransitionStep::Fading,
                TransitionStep::Fading,
                TransitionStep::Fading,
                TransitionStep::Midpoint(pending()),
                TransitionStep::Fading,
                TransitionStep::Fading,
                TransitionStep::Fading,
                TransitionStep::Finished,
            ]
        );
        assert!(!manager.is_active());
    }

    #[test]
    fn opacity_peaks_at_the_midpoint() {
        let mut manager = TransitionManager::new(2);
        assert_eq!(manager.opacity(), 0.0);
        let _ = manager.begin(pending());
        let _ = manager.advance();
        assert!((manager.opacity() - 0.5).abs() < f32::EPSILON);
        let _ = manager.advance();
        assert!((manager.opacity() - 1.0).abs() < f32::EPSILON);
        let _ = manager.advance();
        let _ = manager.advance();
        assert_eq!(manager.opacity(), 0.0);
    }
}
