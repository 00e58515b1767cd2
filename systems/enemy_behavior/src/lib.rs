#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that shapes enemy attacks from world snapshots.
//!
//! The world runs every attack timer down; this system decides what each
//! ready enemy launches and queues `Command::EnemyAttack` for it.

use glam::Vec2;
use migration_core::{Attack, Command, Direction, EnemyKind, EnemySnapshot, Phase};

/// Angle between the aimed shot and each flanking shot of an enraged area boss.
pub const AREA_BOSS_SPREAD: f32 = 0.3;

/// Sweep arcs in one tentacle boss volley.
pub const SWEEP_COUNT: usize = 3;

/// Angle between neighbouring sweep arcs.
pub const SWEEP_FAN: f32 = 0.5;

/// Enemy behaviour system that queues attacks for ready enemies.
#[derive(Debug, Default)]
pub struct EnemyBehavior {
    scratch: Vec<Command>,
}

impl EnemyBehavior {
    /// Creates a new enemy behaviour system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `Command::EnemyAttack` entries for enemies whose timers ran down.
    pub fn handle(
        &mut self,
        phase: Phase,
        player: Vec2,
        enemies: &[EnemySnapshot],
        out: &mut Vec<Command>,
    ) {
        if phase != Phase::Playing || enemies.is_empty() {
            return;
        }

        self.scratch.clear();

        for enemy in enemies {
            if enemy.stunned || enemy.ready_in != Some(0) {
                continue;
            }
            if let Some(attack) = shape_attack(enemy, player) {
                self.scratch.push(Command::EnemyAttack {
                    enemy: enemy.id,
                    attack,
                });
            }
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}

fn shape_attack(enemy: &EnemySnapshot, player: Vec2) -> Option<Attack> {
    let aim = player - enemy.position;
    let attack = match enemy.kind {
        EnemyKind::NoiseEmitter => Attack::Pulse,
        EnemyKind::TentacleShooter => Attack::Volley {
            headings: Direction::ALL.into_iter().map(Direction::unit).collect(),
        },
        EnemyKind::AreaBoss => {
            let mut headings = vec![aim];
            if is_enraged(enemy) {
                headings.extend(
                    [-AREA_BOSS_SPREAD, AREA_BOSS_SPREAD]
                        .into_iter()
                        .map(|spread| Vec2::from_angle(spread).rotate(aim)),
                );
            }
            Attack::Volley { headings }
        }
        EnemyKind::TentacleBoss => {
            let base = aim.y.atan2(aim.x);
            let middle = (SWEEP_COUNT - 1) as f32 / 2.0;
            Attack::Sweep {
                angles: (0..SWEEP_COUNT)
                    .map(|index| base + (index as f32 - middle) * SWEEP_FAN)
                    .collect(),
            }
        }
        EnemyKind::PatrolSkiff | EnemyKind::GhostNet | EnemyKind::PhasingChaser => return None,
    };
    Some(attack)
}

fn is_enraged(enemy: &EnemySnapshot) -> bool {
    enemy
        .kind
        .phase_two_health()
        .map_or(false, |threshold| enemy.health <= threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration_core::{EnemyId, TileCoord};

    #[test]
    fn only_playing_phase_attacks() {
        let mut system = EnemyBehavior::new();
        let enemies = vec![snapshot(1, EnemyKind::NoiseEmitter, Some(0))];
        let mut out = Vec::new();

        for phase in [Phase::Title, Phase::Paused, Phase::Transitioning, Phase::Victory] {
            system.handle(phase, Vec2::ZERO, &enemies, &mut out);
        }

        assert!(out.is_empty());
    }

    #[test]
    fn waiting_stunned_or_unarmed_enemies_are_skipped() {
        let mut system = EnemyBehavior::new();
        let mut stunned = snapshot(2, EnemyKind::TentacleShooter, Some(0));
        stunned.stunned = true;
        let enemies = vec![
            snapshot(1, EnemyKind::NoiseEmitter, Some(12)),
            stunned,
            snapshot(3, EnemyKind::PatrolSkiff, None),
            snapshot(4, EnemyKind::NoiseEmitter, Some(0)),
        ];
        let mut out = Vec::new();

        system.handle(Phase::Playing, Vec2::ZERO, &enemies, &mut out);

        assert_eq!(
            out,
            vec![Command::EnemyAttack {
                enemy: EnemyId::new(4),
                attack: Attack::Pulse,
            }],
        );
    }

    #[test]
    fn shooters_cover_all_four_axes() {
        let mut system = EnemyBehavior::new();
        let enemies = vec![snapshot(7, EnemyKind::TentacleShooter, Some(0))];
        let mut out = Vec::new();

        system.handle(Phase::Playing, Vec2::ZERO, &enemies, &mut out);

        let [Command::EnemyAttack {
            attack: Attack::Volley { headings },
            ..
        }] = out.as_slice()
        else {
            panic!("expected one volley, got {out:?}");
        };
        assert_eq!(
            headings,
            &vec![Vec2::NEG_Y, Vec2::X, Vec2::Y, Vec2::NEG_X]
        );
    }

    #[test]
    fn area_boss_aims_and_spreads_once_enraged() {
        let mut system = EnemyBehavior::new();
        let mut boss = snapshot(5, EnemyKind::AreaBoss, Some(0));
        let player = boss.position + Vec2::new(64.0, 0.0);
        let mut out = Vec::new();

        system.handle(Phase::Playing, player, &[boss.clone()], &mut out);
        assert_eq!(volley(&out), vec![Vec2::new(64.0, 0.0)]);

        boss.health = 6;
        out.clear();
        system.handle(Phase::Playing, player, &[boss], &mut out);
        let headings = volley(&out);
        assert_eq!(headings.len(), 3);
        for heading in &headings[1..] {
            let angle = heading.angle_between(Vec2::X).abs();
            assert!((angle - AREA_BOSS_SPREAD).abs() < 1e-4, "{heading:?}");
        }
    }

    #[test]
    fn tentacle_boss_fans_sweeps_around_the_player() {
        let mut system = EnemyBehavior::new();
        let boss = snapshot(6, EnemyKind::TentacleBoss, Some(0));
        let player = boss.position + Vec2::new(0.0, 40.0);
        let mut out = Vec::new();

        system.handle(Phase::Playing, player, &[boss], &mut out);

        let [Command::EnemyAttack {
            attack: Attack::Sweep { angles },
            ..
        }] = out.as_slice()
        else {
            panic!("expected one sweep, got {out:?}");
        };
        assert_eq!(angles.len(), SWEEP_COUNT);
        let centre = std::f32::consts::FRAC_PI_2;
        assert!((angles[1] - centre).abs() < 1e-5);
        assert!((angles[0] - (centre - SWEEP_FAN)).abs() < 1e-5);
        assert!((angles[2] - (centre + SWEEP_FAN)).abs() < 1e-5);
    }

    fn volley(out: &[Command]) -> Vec<Vec2> {
        match out {
            [Command::EnemyAttack {
                attack: Attack::Volley { headings },
                ..
            }] => headings.clone(),
            other => panic!("expected one volley, got {other:?}"),
        }
    }

    fn snapshot(id: u32, kind: EnemyKind, ready_in: Option<u32>) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            kind,
            position: TileCoord::new(8, 7).center(),
            facing: Direction::South,
            health: kind.max_health(),
            max_health: kind.max_health(),
            stunned: false,
            ready_in,
            projectiles: Vec::new(),
            waves: Vec::new(),
            trail: Vec::new(),
        }
    }
}
