//! Tuning knobs for the simulation, grouped by concern.
//!
//! Every section deserialises with defaults so a configuration file only
//! needs to name the values it overrides. Durations are counted in fixed
//! ticks.

use serde::Deserialize;

/// Aggregated tuning knobs controlling every adjustable aspect of a session.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Session-wide pacing: tick rate, camera, transitions, dialogue.
    pub session: SessionTuning,
    /// Player movement, abilities, health and status timers.
    pub player: PlayerTuning,
    /// Weights of the six score components.
    pub score: ScoreTuning,
}

/// Session-wide pacing parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionTuning {
    /// Fixed simulation ticks per second.
    pub tick_rate: u32,
    /// Upper bound on fixed steps run for a single display frame.
    pub max_steps_per_frame: u32,
    /// Camera viewport width in tiles.
    pub viewport_columns: u32,
    /// Camera viewport height in tiles.
    pub viewport_rows: u32,
    /// Fraction of the remaining distance the camera closes each tick.
    pub camera_smoothing: f32,
    /// Length of each half of a room transition.
    pub fade_ticks: u32,
    /// Minimum gap before a sign can be re-read.
    pub interaction_cooldown_ticks: u32,
    /// How long dialogue stays on screen.
    pub dialogue_ticks: u32,
    /// Delay between entering the grotto and the victory screen.
    pub victory_delay_ticks: u32,
    /// Song fragments needed to enter the final grotto.
    pub required_fragments: u32,
    /// Length of the run used by the time bonus.
    pub time_limit_seconds: u32,
}

impl Default for SessionTuning {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            max_steps_per_frame: 5,
            viewport_columns: 15,
            viewport_rows: 11,
            camera_smoothing: 0.15,
            fade_ticks: 20,
            interaction_cooldown_ticks: 30,
            dialogue_ticks: 180,
            victory_delay_ticks: 120,
            required_fragments: 3,
            time_limit_seconds: 900,
        }
    }
}

/// Player movement, ability and health parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// World units travelled per tick while easing between tiles.
    pub move_speed: f32,
    /// Collision radius in world units.
    pub radius: f32,
    /// Health and maximum health at the start of a session.
    pub starting_health: u32,
    /// Hard ceiling that maximum health can never exceed.
    pub max_health_ceiling: u32,
    /// Maximum health added by each heart container.
    pub heart_container_bonus: u32,
    /// Length of the damage immunity window.
    pub invincibility_ticks: u32,
    /// Length of the entangled status.
    pub entangle_ticks: u32,
    /// Cooldown between echolocation casts.
    pub echolocation_cooldown_ticks: u32,
    /// Lifetime of the cosmetic echolocation ring.
    pub echolocation_ring_ticks: u32,
    /// Radius the cosmetic ring reaches at the end of its lifetime.
    pub echolocation_ring_radius: f32,
    /// Enemies within this distance are stunned at cast time.
    pub echolocation_stun_radius: f32,
    /// Length of the stun applied by echolocation.
    pub stun_ticks: u32,
    /// Cooldown between tail-slaps.
    pub tail_slap_cooldown_ticks: u32,
    /// Length of the tail-slap effect.
    pub tail_slap_active_ticks: u32,
    /// Active tick, counted from one, on which the slap connects.
    pub tail_slap_hit_frame: u32,
    /// Damage dealt by a connecting tail-slap.
    pub tail_slap_damage: i32,
    /// Ticks spent on healing water before healing starts.
    pub heal_dwell_ticks: u32,
    /// Ticks between healing increments once healing started.
    pub heal_interval_ticks: u32,
    /// Damage taken per qualifying tick on toxic water.
    pub hazard_damage: u32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            move_speed: 2.0,
            radius: 12.0,
            starting_health: 5,
            max_health_ceiling: 10,
            heart_container_bonus: 1,
            invincibility_ticks: 60,
            entangle_ticks: 180,
            echolocation_cooldown_ticks: 90,
            echolocation_ring_ticks: 40,
            echolocation_ring_radius: 160.0,
            echolocation_stun_radius: 160.0,
            stun_ticks: 120,
            tail_slap_cooldown_ticks: 30,
            tail_slap_active_ticks: 12,
            tail_slap_hit_frame: 4,
            tail_slap_damage: 1,
            heal_dwell_ticks: 60,
            heal_interval_ticks: 30,
            hazard_damage: 1,
        }
    }
}

/// Weights applied to the score components.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScoreTuning {
    /// Points per second left on the clock.
    pub per_second_remaining: u32,
    /// Points per side room visited.
    pub per_side_room: u32,
    /// Points per boss defeated.
    pub per_boss: u32,
    /// Points per fragment held.
    pub per_fragment: u32,
    /// Points per health remaining.
    pub per_health: u32,
}

impl Default for ScoreTuning {
    fn default() -> Self {
        Self {
            per_second_remaining: 10,
            per_side_room: 250,
            per_boss: 1_000,
            per_fragment: 500,
            per_health: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Tuning;

    #[test]
    fn slap_hit_frame_lies_inside_active_window() {
        let tuning = Tuning::default();
        assert!(tuning.player.tail_slap_hit_frame >= 1);
        assert!(tuning.player.tail_slap_hit_frame <= tuning.player.tail_slap_active_ticks);
    }

    #[test]
    fn starting_health_respects_ceiling() {
        let tuning = Tuning::default();
        assert!(tuning.player.starting_health <= tuning.player.max_health_ceiling);
    }
}
