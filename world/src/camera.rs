//! Smoothed viewport that follows the player inside the room bounds.

use glam::Vec2;
use migration_core::{SessionTuning, ROOM_COLUMNS, ROOM_ROWS, TILE_SIZE};

/// Top-left corner of the visible window in world units.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    position: Vec2,
    viewport: Vec2,
    bounds: Vec2,
    smoothing: f32,
}

impl Camera {
    /// Creates a camera sized from the session tuning.
    #[must_use]
    pub fn new(tuning: &SessionTuning) -> Self {
        Self {
            position: Vec2::ZERO,
            viewport: Vec2::new(tuning.viewport_columns as f32, tuning.viewport_rows as f32)
                * TILE_SIZE,
            bounds: Vec2::new(ROOM_COLUMNS as f32, ROOM_ROWS as f32) * TILE_SIZE,
            smoothing: tuning.camera_smoothing.clamp(0.0, 1.0),
        }
    }

    /// Top-left corner of the viewport.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Size of the viewport in world units.
    #[must_use]
    pub const fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Eases toward centring `target`, never showing past the room edge.
    pub fn follow(&mut self, target: Vec2) {
        let desired = self.clamped(target);
        self.position += (desired - self.position) * self.smoothing;
    }

    /// Jumps straight to centring `target`. Used after a room swap.
    pub fn snap(&mut self, target: Vec2) {
        self.position = self.clamped(target);
    }

    fn clamped(&self, target: Vec2) -> Vec2 {
        let max = (self.bounds - self.viewport).max(Vec2::ZERO);
        (target - self.viewport * 0.5).clamp(Vec2::ZERO, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snap_clamps_to_room_edges() {
        let mut camera = Camera::new(&SessionTuning::default());
        camera.snap(Vec2::ZERO);
        assert_eq!(camera.position(), Vec2::ZERO);

        camera.snap(Vec2::new(10_000.0, 10_000.0));
        let bounds = Vec2::new(ROOM_COLUMNS as f32, ROOM_ROWS as f32) * TILE_SIZE;
        assert_eq!(camera.position(), bounds - camera.viewport());
    }

    #[test]
    fn follow_converges_without_overshoot() {
        let mut camera = Camera::new(&SessionTuning::default());
        camera.snap(Vec2::ZERO);
        let target = Vec2::new(320.0, 240.0);
        let goal = target - camera.viewport() * 0.5;
        let mut previous = camera.position().distance(goal);
        for _ in 0..120 {
            camera.follow(target);
            let distance = camera.position().distance(goal);
            assert!(distance <= previous);
            previous = distance;
        }
        assert!(previous < 0.5);
    }
}
