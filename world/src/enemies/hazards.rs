//! Attacks that outlive the tick they were launched on.
//!
//! Hazards keep moving while their owner is stunned.

use glam::Vec2;
use migration_core::TileCoord;

use crate::tile_map::TileMap;

/// Travel speed of every projectile in world units per tick.
pub const PROJECTILE_SPEED: f32 = 2.5;
/// Collision radius of a projectile.
pub const PROJECTILE_RADIUS: f32 = 6.0;
/// Ticks a projectile lives before dissipating.
pub const PROJECTILE_TTL: u32 = 180;

/// Growth of a noise ring in world units per tick.
pub const RING_SPEED: f32 = 2.0;
/// Radius at which a noise ring dissipates.
pub const RING_MAX_RADIUS: f32 = 160.0;
/// Half-width of the damaging band around a ring's edge.
pub const RING_BAND: f32 = 8.0;

/// Ticks a sweep arc takes to reach its full radius.
pub const SWEEP_LIFETIME: u32 = 45;
/// Radius a sweep arc reaches at the end of its lifetime.
pub const SWEEP_MAX_RADIUS: f32 = 150.0;
/// Half-width of the damaging band around a sweep's edge.
pub const SWEEP_BAND: f32 = 10.0;
/// Largest angular offset, in radians, still inside a sweep arc.
pub const SWEEP_TOLERANCE: f32 = 0.35;

/// Straight-flying shot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projectile {
    /// Current position.
    pub position: Vec2,
    /// Displacement per tick.
    pub velocity: Vec2,
    ttl: u32,
}

impl Projectile {
    /// Launches a projectile from `origin` along `heading`.
    ///
    /// A zero heading is replaced by east so no projectile stalls in place.
    #[must_use]
    pub fn launch(origin: Vec2, heading: Vec2) -> Self {
        let heading = heading.try_normalize().unwrap_or(Vec2::X);
        Self {
            position: origin,
            velocity: heading * PROJECTILE_SPEED,
            ttl: PROJECTILE_TTL,
        }
    }

    /// Ticks left before the projectile dissipates.
    #[must_use]
    pub const fn ttl(&self) -> u32 {
        self.ttl
    }

    /// Moves one tick. Returns `false` once expired or inside solid terrain.
    pub fn advance(&mut self, map: &TileMap) -> bool {
        self.position += self.velocity;
        self.ttl = self.ttl.saturating_sub(1);
        self.ttl > 0 && !map.is_solid(TileCoord::containing(self.position))
    }

    /// Reports whether the projectile overlaps a circle at `point`.
    #[must_use]
    pub fn hits(&self, point: Vec2, radius: f32) -> bool {
        self.position.distance(point) <= PROJECTILE_RADIUS + radius
    }
}

/// Expanding circle of noise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ring {
    /// Centre of the ring.
    pub origin: Vec2,
    age: u32,
    spent: bool,
}

impl Ring {
    /// Emits a fresh ring at `origin`.
    #[must_use]
    pub const fn emit(origin: Vec2) -> Self {
        Self {
            origin,
            age: 0,
            spent: false,
        }
    }

    /// Current radius of the ring.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.age as f32 * RING_SPEED
    }

    /// Grows one tick. Returns `false` once fully dissipated.
    pub fn advance(&mut self) -> bool {
        self.age += 1;
        self.radius() < RING_MAX_RADIUS
    }

    /// Reports whether the ring's edge crosses `point`. Each ring lands once.
    #[must_use]
    pub fn hits(&self, point: Vec2) -> bool {
        !self.spent && (self.origin.distance(point) - self.radius()).abs() <= RING_BAND
    }

    /// Marks the ring as having landed.
    pub fn spend(&mut self) {
        self.spent = true;
    }
}

/// Fan segment of a tentacle sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepArc {
    /// Point the arc expands from.
    pub origin: Vec2,
    /// Centre angle of the arc in radians.
    pub angle: f32,
    age: u32,
    spent: bool,
}

impl SweepArc {
    /// Launches an arc centred on `angle`.
    #[must_use]
    pub const fn launch(origin: Vec2, angle: f32) -> Self {
        Self {
            origin,
            angle,
            age: 0,
            spent: false,
        }
    }

    /// Current radius of the arc.
    #[must_use]
    pub fn radius(&self) -> f32 {
        SWEEP_MAX_RADIUS * self.age as f32 / SWEEP_LIFETIME as f32
    }

    /// Expands one tick. Returns `false` once the lifetime ends.
    pub fn advance(&mut self) -> bool {
        self.age += 1;
        self.age < SWEEP_LIFETIME
    }

    /// Angular-band test: the point must sit on the arc's edge band and
    /// within the angular tolerance of its centre line.
    #[must_use]
    pub fn hits(&self, point: Vec2) -> bool {
        if self.spent {
            return false;
        }
        let offset = point - self.origin;
        let distance = offset.length();
        if distance <= f32::EPSILON || (distance - self.radius()).abs() > SWEEP_BAND {
            return false;
        }
        angle_between(offset.y.atan2(offset.x), self.angle).abs() <= SWEEP_TOLERANCE
    }

    /// Marks the arc as having landed.
    pub fn spend(&mut self) {
        self.spent = true;
    }
}

/// Signed difference `a - b` wrapped into `[-PI, PI]`.
#[must_use]
pub fn angle_between(a: f32, b: f32) -> f32 {
    use std::f32::consts::{PI, TAU};

    let mut difference = (a - b) % TAU;
    if difference > PI {
        difference -= TAU;
    } else if difference < -PI {
        difference += TAU;
    }
    difference
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration_core::Tile;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn angle_difference_wraps() {
        assert!((angle_between(PI - 0.1, -PI + 0.1) + 0.2).abs() < 1e-4);
        assert!((angle_between(0.1, -0.1) - 0.2).abs() < 1e-4);
    }

    #[test]
    fn projectiles_stop_at_solid_terrain() {
        let map = TileMap::new(
            3,
            1,
            vec![Tile::OPEN_WATER, Tile::OPEN_WATER, Tile::ROCK],
        );
        let mut shot = Projectile::launch(TileCoord::new(0, 0).center(), Vec2::X);
        let mut ticks = 0;
        while shot.advance(&map) {
            ticks += 1;
        }
        assert!(TileCoord::containing(shot.position).column() >= 2);
        assert!(ticks < 40);
    }

    #[test]
    fn ring_hits_only_on_its_edge() {
        let mut ring = Ring::emit(Vec2::ZERO);
        for _ in 0..20 {
            assert!(ring.advance());
        }
        assert!(ring.hits(Vec2::new(40.0, 0.0)));
        assert!(!ring.hits(Vec2::new(10.0, 0.0)));
        assert!(!ring.hits(Vec2::new(80.0, 0.0)));
        ring.spend();
        assert!(!ring.hits(Vec2::new(40.0, 0.0)));
    }

    #[test]
    fn sweep_requires_band_and_angle() {
        let mut arc = SweepArc::launch(Vec2::ZERO, FRAC_PI_2);
        for _ in 0..15 {
            assert!(arc.advance());
        }
        let radius = arc.radius();
        assert!((radius - 50.0).abs() < 1e-3);
        assert!(arc.hits(Vec2::new(0.0, radius)));
        assert!(!arc.hits(Vec2::new(radius, 0.0)));
        assert!(!arc.hits(Vec2::new(0.0, radius + SWEEP_BAND * 2.0)));
        assert!(!arc.hits(Vec2::ZERO));
    }

    #[test]
    fn sweep_expires_after_lifetime() {
        let mut arc = SweepArc::launch(Vec2::ZERO, 0.0);
        let mut alive = 0;
        while arc.advance() {
            alive += 1;
        }
        assert_eq!(alive, SWEEP_LIFETIME - 1);
    }
}
