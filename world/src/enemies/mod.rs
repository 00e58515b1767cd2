//! Enemy instances as a closed set of behaviours.
//!
//! Every enemy shares a common core (position, facing, health, stun)
//! and carries one behaviour payload selected by its [`EnemyKind`]. The
//! world dispatches through [`Enemy::update`] with a single match on the
//! payload. Motion and attack timers run here; the shape of each attack is
//! chosen outside the world and arrives through [`Enemy::launch`].

pub mod hazards;

use std::collections::VecDeque;
use std::f32::consts::PI;

use glam::Vec2;
use migration_core::{Attack, Direction, EnemyId, EnemyKind, EnemySnapshot, TileCoord, TILE_SIZE};
use rand::Rng;

use crate::tile_map::TileMap;
use hazards::{Projectile, Ring, SweepArc};

const SKIFF_SPEED: f32 = 1.0;
const SKIFF_SPAN: f32 = TILE_SIZE * 3.0;

const NET_DRIFT_SPEED: f32 = 0.4;
const NET_CHASE_SPEED: f32 = 0.9;
const NET_PURSUIT_RADIUS: f32 = TILE_SIZE * 4.0;
const NET_TURN_INTERVAL: u32 = 45;
const NET_MAX_TURN: f32 = 0.8;

/// Ticks between two noise pulses.
pub const EMITTER_PULSE_INTERVAL: u32 = 150;

/// Ticks between two aimed volleys while the area boss is calm.
pub const AREA_BOSS_FIRE_INTERVAL: u32 = 90;
const AREA_BOSS_WANDER: Vec2 = Vec2::new(TILE_SIZE * 5.0, TILE_SIZE * 3.0);

/// Ticks between two four-way volleys of the tentacle shooter.
pub const SHOOTER_FIRE_INTERVAL: u32 = 120;

const TENTACLE_SPEED: f32 = 0.6;
const TENTACLE_HOLD_DISTANCE: f32 = TILE_SIZE * 3.0;
/// Ticks between two sweep volleys of the tentacle boss.
pub const SWEEP_INTERVAL: u32 = 180;

const CHASER_PATROL_SPEED: f32 = 0.8;
const CHASER_CHASE_SPEED: f32 = 1.6;
const CHASER_CHASE_RADIUS: f32 = TILE_SIZE * 5.0;
const CHASER_PATH_SPAN: f32 = TILE_SIZE * 5.0;
const TRAIL_INTERVAL: u32 = 4;
const TRAIL_LENGTH: usize = 8;

/// What an enemy needs to know about the room each tick.
#[derive(Clone, Copy, Debug)]
pub struct EnemyContext<'a> {
    /// Continuous position of the player.
    pub player: Vec2,
    /// Terrain of the active room.
    pub map: &'a TileMap,
}

/// Attack that reached the player this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HazardHit {
    /// A projectile struck and was consumed.
    Projectile,
    /// A noise ring's edge crossed the player.
    Ring,
    /// A sweep arc's band crossed the player.
    Sweep,
}

#[derive(Clone, Debug, PartialEq)]
struct Body {
    position: Vec2,
    facing: Direction,
    health: i32,
    clock: u32,
}

#[derive(Clone, Debug, PartialEq)]
enum Behavior {
    PatrolSkiff {
        min_x: f32,
        max_x: f32,
        heading: f32,
    },
    GhostNet {
        heading: f32,
        drift_timer: u32,
    },
    NoiseEmitter {
        pulse_timer: u32,
        rings: Vec<Ring>,
    },
    AreaBoss {
        home: Vec2,
        fire_timer: u32,
        projectiles: Vec<Projectile>,
    },
    TentacleShooter {
        fire_timer: u32,
        projectiles: Vec<Projectile>,
    },
    TentacleBoss {
        sweep_timer: u32,
        sweeps: Vec<SweepArc>,
    },
    PhasingChaser {
        waypoints: [Vec2; 2],
        target: usize,
        chasing: bool,
        trail: VecDeque<Vec2>,
    },
}

/// One live enemy in the active room.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    id: EnemyId,
    slot: usize,
    kind: EnemyKind,
    active: bool,
    stun: u32,
    body: Body,
    behavior: Behavior,
}

impl Enemy {
    /// Creates an enemy of `kind` centred on `cell`.
    ///
    /// `slot` is the enemy's index among the spawns of its room and is what
    /// the world records when the enemy is defeated.
    #[must_use]
    pub fn spawn(id: EnemyId, slot: usize, kind: EnemyKind, cell: TileCoord) -> Self {
        let position = cell.center();
        let behavior = match kind {
            EnemyKind::PatrolSkiff => Behavior::PatrolSkiff {
                min_x: position.x - SKIFF_SPAN,
                max_x: position.x + SKIFF_SPAN,
                heading: 1.0,
            },
            EnemyKind::GhostNet => Behavior::GhostNet {
                heading: 0.0,
                drift_timer: NET_TURN_INTERVAL,
            },
            EnemyKind::NoiseEmitter => Behavior::NoiseEmitter {
                pulse_timer: EMITTER_PULSE_INTERVAL,
                rings: Vec::new(),
            },
            EnemyKind::AreaBoss => Behavior::AreaBoss {
                home: position,
                fire_timer: AREA_BOSS_FIRE_INTERVAL,
                projectiles: Vec::new(),
            },
            EnemyKind::TentacleShooter => Behavior::TentacleShooter {
                fire_timer: SHOOTER_FIRE_INTERVAL,
                projectiles: Vec::new(),
            },
            EnemyKind::TentacleBoss => Behavior::TentacleBoss {
                sweep_timer: SWEEP_INTERVAL,
                sweeps: Vec::new(),
            },
            EnemyKind::PhasingChaser => Behavior::PhasingChaser {
                waypoints: [position, position + Vec2::new(CHASER_PATH_SPAN, 0.0)],
                target: 1,
                chasing: false,
                trail: VecDeque::with_capacity(TRAIL_LENGTH),
            },
        };

        Self {
            id,
            slot,
            kind,
            active: true,
            stun: 0,
            body: Body {
                position,
                facing: Direction::South,
                health: kind.max_health(),
                clock: 0,
            },
            behavior,
        }
    }

    /// Identifier allocated when the room loaded.
    #[must_use]
    pub const fn id(&self) -> EnemyId {
        self.id
    }

    /// Index among the spawns registered for the room.
    #[must_use]
    pub const fn slot(&self) -> usize {
        self.slot
    }

    /// Behaviour of the enemy.
    #[must_use]
    pub const fn kind(&self) -> EnemyKind {
        self.kind
    }

    /// Continuous position in world units.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.body.position
    }

    /// Current health. Reaches zero or below exactly once.
    #[must_use]
    pub const fn health(&self) -> i32 {
        self.body.health
    }

    /// Reports whether the enemy still takes part in the simulation.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Reports whether the stun timer is running.
    #[must_use]
    pub const fn is_stunned(&self) -> bool {
        self.stun > 0
    }

    /// Reports whether the enemy has entered its second phase.
    #[must_use]
    pub fn is_enraged(&self) -> bool {
        self.kind
            .phase_two_health()
            .map_or(false, |threshold| self.body.health <= threshold)
    }

    /// Ticks until the attack timer runs down, for kinds that attack.
    #[must_use]
    pub fn ready_in(&self) -> Option<u32> {
        match &self.behavior {
            Behavior::NoiseEmitter { pulse_timer, .. } => Some(*pulse_timer),
            Behavior::AreaBoss { fire_timer, .. } | Behavior::TentacleShooter { fire_timer, .. } => {
                Some(*fire_timer)
            }
            Behavior::TentacleBoss { sweep_timer, .. } => Some(*sweep_timer),
            Behavior::PatrolSkiff { .. } | Behavior::GhostNet { .. } | Behavior::PhasingChaser { .. } => {
                None
            }
        }
    }

    /// Launches `attack` and rearms the attack timer.
    ///
    /// Rejected unless the enemy is active, not stunned, its timer has run
    /// down and the attack matches its kind.
    pub fn launch(&mut self, attack: &Attack) -> bool {
        if !self.active || self.is_stunned() || self.ready_in() != Some(0) {
            return false;
        }
        let origin = self.body.position;
        let enraged = self.is_enraged();
        match (&mut self.behavior, attack) {
            (Behavior::NoiseEmitter { pulse_timer, rings }, Attack::Pulse) => {
                rings.push(Ring::emit(origin));
                *pulse_timer = EMITTER_PULSE_INTERVAL;
            }
            (
                Behavior::AreaBoss {
                    fire_timer,
                    projectiles,
                    ..
                },
                Attack::Volley { headings },
            ) => {
                projectiles.extend(headings.iter().map(|heading| Projectile::launch(origin, *heading)));
                *fire_timer = area_boss_interval(enraged);
            }
            (
                Behavior::TentacleShooter {
                    fire_timer,
                    projectiles,
                },
                Attack::Volley { headings },
            ) => {
                projectiles.extend(headings.iter().map(|heading| Projectile::launch(origin, *heading)));
                *fire_timer = SHOOTER_FIRE_INTERVAL;
            }
            (Behavior::TentacleBoss { sweep_timer, sweeps }, Attack::Sweep { angles }) => {
                sweeps.extend(angles.iter().map(|angle| SweepArc::launch(origin, *angle)));
                *sweep_timer = SWEEP_INTERVAL;
            }
            _ => return false,
        }
        true
    }

    /// Distance from the enemy's centre to `point`.
    #[must_use]
    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.body.position.distance(point)
    }

    /// Freezes motion and attack timers for `ticks` updates.
    ///
    /// A longer running stun is never shortened.
    pub fn stun(&mut self, ticks: u32) {
        if self.active {
            self.stun = self.stun.max(ticks);
        }
    }

    /// Applies `amount` damage. Returns `true` only on the call that defeats
    /// the enemy; inactive enemies and non-positive amounts are ignored.
    pub fn damage(&mut self, amount: i32) -> bool {
        if !self.active || amount <= 0 {
            return false;
        }
        self.body.health -= amount;
        if self.body.health <= 0 {
            self.active = false;
            return true;
        }
        false
    }

    /// Reports whether the enemy body overlaps a circle at `point`.
    /// Stunned bodies are harmless.
    #[must_use]
    pub fn touches(&self, point: Vec2, radius: f32) -> bool {
        self.active && !self.is_stunned() && self.distance_to(point) < self.kind.radius() + radius
    }

    /// Reports whether the enemy body reaches into `cell`.
    #[must_use]
    pub fn overlaps_cell(&self, cell: TileCoord) -> bool {
        let offset = (self.body.position - cell.center()).abs();
        let reach = TILE_SIZE * 0.5 + self.kind.radius();
        offset.x < reach && offset.y < reach
    }

    /// Advances one tick.
    ///
    /// Projectiles, rings and sweeps always move. Motion and attack timers
    /// only run while the enemy is not stunned.
    pub fn update<R: Rng + ?Sized>(&mut self, context: &EnemyContext<'_>, rng: &mut R) {
        if !self.active {
            return;
        }

        self.advance_hazards(context.map);

        if self.stun > 0 {
            self.stun -= 1;
            return;
        }

        self.body.clock = self.body.clock.wrapping_add(1);
        let kind = self.kind;
        let body = &mut self.body;
        match &mut self.behavior {
            Behavior::PatrolSkiff {
                min_x,
                max_x,
                heading,
            } => patrol(body, kind, context.map, *min_x, *max_x, heading),
            Behavior::GhostNet {
                heading,
                drift_timer,
            } => drift(body, kind, context, rng, heading, drift_timer),
            Behavior::NoiseEmitter { pulse_timer, .. } => run_down(pulse_timer),
            Behavior::AreaBoss {
                home, fire_timer, ..
            } => {
                wander(body, context.map, *home);
                let threshold = kind.phase_two_health().unwrap_or(i32::MIN);
                *fire_timer = (*fire_timer).min(area_boss_interval(body.health <= threshold));
                run_down(fire_timer);
            }
            Behavior::TentacleShooter { fire_timer, .. } => run_down(fire_timer),
            Behavior::TentacleBoss { sweep_timer, .. } => {
                let offset = context.player - body.position;
                if offset.length() > TENTACLE_HOLD_DISTANCE {
                    pursue(body, kind, context.map, offset, TENTACLE_SPEED);
                }
                run_down(sweep_timer);
            }
            Behavior::PhasingChaser {
                waypoints,
                target,
                chasing,
                trail,
            } => {
                let offset = context.player - body.position;
                *chasing = offset.length() < CHASER_CHASE_RADIUS;
                if *chasing {
                    let _ = glide(body, kind, context.map, clamp_length(offset, CHASER_CHASE_SPEED));
                } else {
                    let goal = waypoints[*target] - body.position;
                    if goal.length() <= CHASER_PATROL_SPEED {
                        *target = 1 - *target;
                    }
                    let _ = glide(body, kind, context.map, clamp_length(goal, CHASER_PATROL_SPEED));
                }
                if body.clock % TRAIL_INTERVAL == 0 {
                    if trail.len() == TRAIL_LENGTH {
                        let _ = trail.pop_front();
                    }
                    trail.push_back(body.position);
                }
            }
        }
    }

    /// Reports the first hazard of this enemy touching a circle at `point`
    /// and consumes it so it lands only once.
    pub fn strike(&mut self, point: Vec2, radius: f32) -> Option<HazardHit> {
        match &mut self.behavior {
            Behavior::AreaBoss { projectiles, .. } | Behavior::TentacleShooter { projectiles, .. } => {
                let index = projectiles.iter().position(|shot| shot.hits(point, radius))?;
                let _ = projectiles.swap_remove(index);
                Some(HazardHit::Projectile)
            }
            Behavior::NoiseEmitter { rings, .. } => {
                let ring = rings.iter_mut().find(|ring| ring.hits(point))?;
                ring.spend();
                Some(HazardHit::Ring)
            }
            Behavior::TentacleBoss { sweeps, .. } => {
                let arc = sweeps.iter_mut().find(|arc| arc.hits(point))?;
                arc.spend();
                Some(HazardHit::Sweep)
            }
            Behavior::PatrolSkiff { .. } | Behavior::GhostNet { .. } | Behavior::PhasingChaser { .. } => {
                None
            }
        }
    }

    /// Copies the enemy into a presentation snapshot.
    #[must_use]
    pub fn snapshot(&self) -> EnemySnapshot {
        let mut snapshot = EnemySnapshot {
            id: self.id,
            kind: self.kind,
            position: self.body.position,
            facing: self.body.facing,
            health: self.body.health,
            max_health: self.kind.max_health(),
            stunned: self.is_stunned(),
            ready_in: self.ready_in(),
            projectiles: Vec::new(),
            waves: Vec::new(),
            trail: Vec::new(),
        };
        match &self.behavior {
            Behavior::AreaBoss { projectiles, .. } | Behavior::TentacleShooter { projectiles, .. } => {
                snapshot.projectiles = projectiles.iter().map(|shot| shot.position).collect();
            }
            Behavior::NoiseEmitter { rings, .. } => {
                snapshot.waves = rings.iter().map(Ring::radius).collect();
            }
            Behavior::TentacleBoss { sweeps, .. } => {
                snapshot.waves = sweeps.iter().map(SweepArc::radius).collect();
            }
            Behavior::PhasingChaser { trail, .. } => {
                snapshot.trail = trail.iter().copied().collect();
            }
            Behavior::PatrolSkiff { .. } | Behavior::GhostNet { .. } => {}
        }
        snapshot
    }

    fn advance_hazards(&mut self, map: &TileMap) {
        match &mut self.behavior {
            Behavior::AreaBoss { projectiles, .. } | Behavior::TentacleShooter { projectiles, .. } => {
                projectiles.retain_mut(|shot| shot.advance(map));
            }
            Behavior::NoiseEmitter { rings, .. } => rings.retain_mut(Ring::advance),
            Behavior::TentacleBoss { sweeps, .. } => sweeps.retain_mut(SweepArc::advance),
            Behavior::PatrolSkiff { .. } | Behavior::GhostNet { .. } | Behavior::PhasingChaser { .. } => {}
        }
    }
}

/// Counts an attack timer down; it rests at zero until the attack launches.
fn run_down(timer: &mut u32) {
    *timer = timer.saturating_sub(1);
}

fn area_boss_interval(enraged: bool) -> u32 {
    if enraged {
        AREA_BOSS_FIRE_INTERVAL / 2
    } else {
        AREA_BOSS_FIRE_INTERVAL
    }
}

/// Decrements `timer`; on reaching zero rearms it with `interval` and
/// reports that the timer elapsed this tick.
fn countdown(timer: &mut u32, interval: u32) -> bool {
    *timer = timer.saturating_sub(1);
    if *timer == 0 {
        *timer = interval.max(1);
        return true;
    }
    false
}

fn patrol(body: &mut Body, kind: EnemyKind, map: &TileMap, min_x: f32, max_x: f32, heading: &mut f32) {
    let step = Vec2::new(*heading * SKIFF_SPEED, 0.0);
    let probe = body.position + Vec2::new(*heading * (kind.radius() + SKIFF_SPEED), 0.0);
    let next_x = body.position.x + step.x;
    if map.is_solid(TileCoord::containing(probe)) || next_x < min_x || next_x > max_x {
        *heading = -*heading;
        body.facing = facing_of(Vec2::new(*heading, 0.0));
        return;
    }
    let _ = glide(body, kind, map, step);
}

fn drift<R: Rng + ?Sized>(
    body: &mut Body,
    kind: EnemyKind,
    context: &EnemyContext<'_>,
    rng: &mut R,
    heading: &mut f32,
    drift_timer: &mut u32,
) {
    let offset = context.player - body.position;
    if offset.length() < NET_PURSUIT_RADIUS {
        pursue(body, kind, context.map, offset, NET_CHASE_SPEED);
        return;
    }

    if countdown(drift_timer, NET_TURN_INTERVAL) {
        *heading += rng.gen_range(-NET_MAX_TURN..=NET_MAX_TURN);
    }
    let (sin, cos) = heading.sin_cos();
    if !glide(body, kind, context.map, Vec2::new(cos, sin) * NET_DRIFT_SPEED) {
        *heading += PI;
    }
}

fn wander(body: &mut Body, map: &TileMap, home: Vec2) {
    let clock = body.clock as f32;
    let offset = Vec2::new((clock * 0.013).sin(), (clock * 0.021).sin()) * AREA_BOSS_WANDER;
    let target = clamp_to_room(home + offset, map);
    let delta = target - body.position;
    if delta != Vec2::ZERO {
        body.facing = facing_of(delta);
    }
    body.position = target;
}

/// Moves toward `offset`, sliding along one axis when the direct step is blocked.
fn pursue(body: &mut Body, kind: EnemyKind, map: &TileMap, offset: Vec2, speed: f32) {
    let step = clamp_length(offset, speed);
    if glide(body, kind, map, step) {
        return;
    }
    if !glide(body, kind, map, Vec2::new(step.x, 0.0)) {
        let _ = glide(body, kind, map, Vec2::new(0.0, step.y));
    }
}

/// Applies `delta` unless it would carry a terrain-bound enemy into solid
/// terrain. Returns whether the body moved.
fn glide(body: &mut Body, kind: EnemyKind, map: &TileMap, delta: Vec2) -> bool {
    if delta == Vec2::ZERO {
        return false;
    }
    let next = body.position + delta;
    if !kind.phases_through_terrain() && map.is_solid(TileCoord::containing(next)) {
        return false;
    }
    body.position = clamp_to_room(next, map);
    body.facing = facing_of(delta);
    true
}

fn clamp_to_room(position: Vec2, map: &TileMap) -> Vec2 {
    let half = TILE_SIZE * 0.5;
    let max = Vec2::new(map.columns() as f32, map.rows() as f32) * TILE_SIZE - half;
    position.clamp(Vec2::splat(half), max.max(Vec2::splat(half)))
}

fn clamp_length(vector: Vec2, length: f32) -> Vec2 {
    if vector.length() > length {
        vector.normalize_or_zero() * length
    } else {
        vector
    }
}

fn facing_of(delta: Vec2) -> Direction {
    if delta.x.abs() >= delta.y.abs() {
        if delta.x >= 0.0 {
            Direction::East
        } else {
            Direction::West
        }
    } else if delta.y >= 0.0 {
        Direction::South
    } else {
        Direction::North
    }
}
