//! Player movement, abilities, health and inventory.

use glam::Vec2;
use migration_core::{Direction, ItemKind, PlayerTuning, TileCoord};

/// Cosmetic ring spawned by an echolocation cast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EchoRing {
    /// Centre of the ring.
    pub origin: Vec2,
    /// Ticks since the cast.
    pub age: u32,
}

/// Authoritative player state.
///
/// Movement is tile-stepping: [`Player::try_move`] commits the destination
/// tile immediately while the continuous position eases toward its centre
/// over the following calls to [`Player::advance`].
#[derive(Clone, Debug)]
pub struct Player {
    position: Vec2,
    tile: TileCoord,
    moving: bool,
    facing: Direction,
    health: u32,
    max_health: u32,
    echolocation_cooldown: u32,
    tail_slap_cooldown: u32,
    tail_slap_timer: u32,
    invincibility: u32,
    entangled: u32,
    heal_dwell: u32,
    inventory: Vec<ItemKind>,
    echo_rings: Vec<EchoRing>,
}

impl Player {
    /// Creates a player standing on `tile` with full starting health.
    #[must_use]
    pub fn new(tile: TileCoord, tuning: &PlayerTuning) -> Self {
        let max_health = tuning.starting_health.min(tuning.max_health_ceiling);
        Self {
            position: tile.center(),
            tile,
            moving: false,
            facing: Direction::East,
            health: max_health,
            max_health,
            echolocation_cooldown: 0,
            tail_slap_cooldown: 0,
            tail_slap_timer: 0,
            invincibility: 0,
            entangled: 0,
            heal_dwell: 0,
            inventory: Vec::new(),
            echo_rings: Vec::new(),
        }
    }

    /// Teleports the player to the centre of `tile`, cancelling any move in flight.
    pub fn place(&mut self, tile: TileCoord) {
        self.tile = tile;
        self.position = tile.center();
        self.moving = false;
        self.heal_dwell = 0;
    }

    /// Attempts a one-tile move. Facing always turns toward `direction`.
    ///
    /// Returns `false` while a move is in flight or when `is_walkable`
    /// rejects the destination.
    pub fn try_move<F>(&mut self, direction: Direction, is_walkable: F) -> bool
    where
        F: Fn(TileCoord) -> bool,
    {
        if self.moving {
            return false;
        }

        self.facing = direction;
        let destination = self.tile.step(direction);
        if !is_walkable(destination) {
            return false;
        }

        self.tile = destination;
        self.moving = true;
        true
    }

    /// Advances interpolation and every status timer by one tick.
    pub fn advance(&mut self, tuning: &PlayerTuning) {
        if self.moving {
            let speed = if self.is_entangled() {
                tuning.move_speed * 0.5
            } else {
                tuning.move_speed
            };
            let target = self.tile.center();
            let offset = target - self.position;
            let distance = offset.length();
            if distance <= speed {
                self.position = target;
                self.moving = false;
            } else {
                self.position += offset / distance * speed;
            }
        }

        self.echolocation_cooldown = self.echolocation_cooldown.saturating_sub(1);
        self.tail_slap_cooldown = self.tail_slap_cooldown.saturating_sub(1);
        self.tail_slap_timer = self.tail_slap_timer.saturating_sub(1);
        self.invincibility = self.invincibility.saturating_sub(1);
        self.entangled = self.entangled.saturating_sub(1);

        for ring in &mut self.echo_rings {
            ring.age += 1;
        }
        self.echo_rings
            .retain(|ring| ring.age < tuning.echolocation_ring_ticks);
    }

    /// Casts echolocation if it is off cooldown.
    ///
    /// Only the cosmetic ring and the cooldown live here; the caller stuns
    /// every enemy within the stun radius at cast time.
    pub fn echolocate(&mut self, tuning: &PlayerTuning) -> bool {
        if self.echolocation_cooldown > 0 {
            return false;
        }
        self.echolocation_cooldown = tuning.echolocation_cooldown_ticks;
        self.echo_rings.push(EchoRing {
            origin: self.position,
            age: 0,
        });
        true
    }

    /// Starts a tail-slap if it is off cooldown.
    pub fn tail_slap(&mut self, tuning: &PlayerTuning) -> bool {
        if self.tail_slap_cooldown > 0 {
            return false;
        }
        self.tail_slap_cooldown = tuning.tail_slap_cooldown_ticks;
        self.tail_slap_timer = tuning.tail_slap_active_ticks;
        true
    }

    /// Reports whether this tick is the single tick on which the slap connects.
    #[must_use]
    pub fn slap_connects(&self, tuning: &PlayerTuning) -> bool {
        self.tail_slap_timer > 0
            && tuning.tail_slap_active_ticks.saturating_sub(self.tail_slap_timer)
                == tuning.tail_slap_hit_frame
    }

    /// Tile struck by a tail-slap: the neighbour in the facing direction.
    #[must_use]
    pub fn slap_target(&self) -> TileCoord {
        self.tile.step(self.facing)
    }

    /// Applies damage unless invincible.
    ///
    /// Health floors at zero and a fresh invincibility window starts. Returns
    /// `true` only when this call reduced health to zero.
    pub fn damage(&mut self, amount: u32, tuning: &PlayerTuning) -> bool {
        if self.invincibility > 0 || self.health == 0 || amount == 0 {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        self.invincibility = tuning.invincibility_ticks;
        self.health == 0
    }

    /// Restores health up to the current maximum. Returns whether health changed.
    pub fn heal(&mut self, amount: u32) -> bool {
        let before = self.health;
        self.health = self.health.saturating_add(amount).min(self.max_health);
        self.health != before
    }

    /// Accrues passive healing while standing on healing water.
    ///
    /// Leaving the water resets the dwell counter. Returns whether health changed.
    pub fn dwell(&mut self, on_healing_tile: bool, tuning: &PlayerTuning) -> bool {
        if !on_healing_tile || self.moving {
            self.heal_dwell = 0;
            return false;
        }

        self.heal_dwell = self.heal_dwell.saturating_add(1);
        if self.heal_dwell < tuning.heal_dwell_ticks {
            return false;
        }

        let interval = tuning.heal_interval_ticks.max(1);
        if (self.heal_dwell - tuning.heal_dwell_ticks) % interval == 0 {
            self.heal(1)
        } else {
            false
        }
    }

    /// Entangles the player, halving movement speed for the configured window.
    pub fn entangle(&mut self, tuning: &PlayerTuning) {
        self.entangled = tuning.entangle_ticks;
    }

    /// Adds an item to the inventory and applies its immediate effect.
    pub fn acquire(&mut self, item: ItemKind, tuning: &PlayerTuning) {
        if item == ItemKind::HeartContainer {
            self.max_health = self
                .max_health
                .saturating_add(tuning.heart_container_bonus)
                .min(tuning.max_health_ceiling);
            self.health = self.max_health;
        }
        self.inventory.push(item);
    }

    /// Reports whether the inventory holds `item`.
    #[must_use]
    pub fn has(&self, item: ItemKind) -> bool {
        self.inventory.contains(&item)
    }

    /// Number of song fragments held.
    #[must_use]
    pub fn fragments(&self) -> u32 {
        let count = self
            .inventory
            .iter()
            .filter(|item| **item == ItemKind::SongFragment)
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Continuous position in world units.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Discrete tile used for collisions and triggers.
    #[must_use]
    pub const fn tile(&self) -> TileCoord {
        self.tile
    }

    /// Facing direction.
    #[must_use]
    pub const fn facing(&self) -> Direction {
        self.facing
    }

    /// Reports whether the player is easing toward its tile.
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        self.moving
    }

    /// Current health.
    #[must_use]
    pub const fn health(&self) -> u32 {
        self.health
    }

    /// Current maximum health.
    #[must_use]
    pub const fn max_health(&self) -> u32 {
        self.max_health
    }

    /// Reports whether damage is currently ignored.
    #[must_use]
    pub const fn is_invincible(&self) -> bool {
        self.invincibility > 0
    }

    /// Reports whether movement is slowed by entanglement.
    #[must_use]
    pub const fn is_entangled(&self) -> bool {
        self.entangled > 0
    }

    /// Reports whether a tail-slap effect is active.
    #[must_use]
    pub const fn is_slapping(&self) -> bool {
        self.tail_slap_timer > 0
    }

    /// Acquired items in acquisition order.
    #[must_use]
    pub fn inventory(&self) -> &[ItemKind] {
        &self.inventory
    }

    /// Live cosmetic echolocation rings.
    #[must_use]
    pub fn echo_rings(&self) -> &[EchoRing] {
        &self.echo_rings
    }

    #[cfg(any(test, feature = "test_scaffolding"))]
    pub(crate) fn set_health(&mut self, health: u32) {
        self.health = health.min(self.max_health);
    }

    #[cfg(any(test, feature = "test_scaffolding"))]
    pub(crate) fn clear_invincibility(&mut self) {
        self.invincibility = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning() -> PlayerTuning {
        PlayerTuning::default()
    }

    fn open(_: TileCoord) -> bool {
        true
    }

    fn settle(player: &mut Player, tuning: &PlayerTuning) -> u32 {
        let mut ticks = 0;
        while player.is_moving() {
            player.advance(tuning);
            ticks += 1;
            assert!(ticks < 1_000, "move never settled");
        }
        ticks
    }

    #[test]
    fn move_commits_tile_immediately_and_eases_position() {
        let tuning = tuning();
        let mut player = Player::new(TileCoord::new(2, 2), &tuning);

        assert!(player.try_move(Direction::East, open));
        assert_eq!(player.tile(), TileCoord::new(3, 2));
        assert_eq!(player.position(), TileCoord::new(2, 2).center());

        let ticks = settle(&mut player, &tuning);
        assert_eq!(ticks, 16);
        assert_eq!(player.position(), TileCoord::new(3, 2).center());
    }

    #[test]
    fn move_in_flight_rejects_new_moves() {
        let tuning = tuning();
        let mut player = Player::new(TileCoord::new(2, 2), &tuning);
        assert!(player.try_move(Direction::East, open));
        assert!(!player.try_move(Direction::South, open));
        assert_eq!(player.tile(), TileCoord::new(3, 2));
        assert_eq!(player.facing(), Direction::East);
    }

    #[test]
    fn blocked_move_turns_without_moving() {
        let tuning = tuning();
        let mut player = Player::new(TileCoord::new(2, 2), &tuning);
        assert!(!player.try_move(Direction::North, |_| false));
        assert_eq!(player.tile(), TileCoord::new(2, 2));
        assert_eq!(player.facing(), Direction::North);
        assert_eq!(player.slap_target(), TileCoord::new(2, 1));
    }

    #[test]
    fn entanglement_halves_speed() {
        let tuning = tuning();
        let mut player = Player::new(TileCoord::new(2, 2), &tuning);
        player.entangle(&tuning);
        assert!(player.try_move(Direction::East, open));
        assert_eq!(settle(&mut player, &tuning), 32);
    }

    #[test]
    fn damage_respects_invincibility_window() {
        let tuning = tuning();
        let mut player = Player::new(TileCoord::new(2, 2), &tuning);
        assert!(!player.damage(1, &tuning));
        assert_eq!(player.health(), 4);
        assert!(player.is_invincible());

        assert!(!player.damage(1, &tuning));
        assert_eq!(player.health(), 4);

        for _ in 0..tuning.invincibility_ticks {
            player.advance(&tuning);
        }
        assert!(!player.is_invincible());
        assert!(!player.damage(1, &tuning));
        assert_eq!(player.health(), 3);
    }

    #[test]
    fn lethal_damage_reports_once_and_floors_at_zero() {
        let tuning = tuning();
        let mut player = Player::new(TileCoord::new(2, 2), &tuning);
        assert!(player.damage(99, &tuning));
        assert_eq!(player.health(), 0);
        player.clear_invincibility();
        assert!(!player.damage(1, &tuning));
        assert_eq!(player.health(), 0);
    }

    #[test]
    fn heart_container_raises_max_up_to_ceiling() {
        let tuning = tuning();
        let mut player = Player::new(TileCoord::new(2, 2), &tuning);
        assert!(!player.damage(3, &tuning));
        player.acquire(ItemKind::HeartContainer, &tuning);
        assert_eq!(player.max_health(), 6);
        assert_eq!(player.health(), 6);

        for _ in 0..10 {
            player.acquire(ItemKind::HeartContainer, &tuning);
        }
        assert_eq!(player.max_health(), tuning.max_health_ceiling);
        assert_eq!(player.health(), tuning.max_health_ceiling);
    }

    #[test]
    fn fragments_count_from_inventory() {
        let tuning = tuning();
        let mut player = Player::new(TileCoord::new(2, 2), &tuning);
        player.acquire(ItemKind::SongFragment, &tuning);
        player.acquire(ItemKind::NetCutter, &tuning);
        player.acquire(ItemKind::SongFragment, &tuning);
        assert_eq!(player.fragments(), 2);
        assert_eq!(
            player.inventory(),
            &[
                ItemKind::SongFragment,
                ItemKind::NetCutter,
                ItemKind::SongFragment
            ]
        );
        assert!(player.has(ItemKind::NetCutter));
        assert!(!player.has(ItemKind::Shield));
    }

    #[test]
    fn healing_waits_for_dwell_then_accrues() {
        let tuning = tuning();
        let mut player = Player::new(TileCoord::new(2, 2), &tuning);
        assert!(!player.damage(2, &tuning));

        let mut healed_on = Vec::new();
        for tick in 1..=(tuning.heal_dwell_ticks + tuning.heal_interval_ticks) {
            if player.dwell(true, &tuning) {
                healed_on.push(tick);
            }
        }
        assert_eq!(
            healed_on,
            vec![
                tuning.heal_dwell_ticks,
                tuning.heal_dwell_ticks + tuning.heal_interval_ticks
            ]
        );
        assert_eq!(player.health(), 5);
    }

    #[test]
    fn leaving_healing_water_resets_dwell() {
        let tuning = tuning();
        let mut player = Player::new(TileCoord::new(2, 2), &tuning);
        assert!(!player.damage(1, &tuning));
        for _ in 0..tuning.heal_dwell_ticks - 1 {
            assert!(!player.dwell(true, &tuning));
        }
        assert!(!player.dwell(false, &tuning));
        assert!(!player.dwell(true, &tuning));
        assert_eq!(player.health(), 4);
    }

    #[test]
    fn abilities_respect_cooldowns() {
        let tuning = tuning();
        let mut player = Player::new(TileCoord::new(2, 2), &tuning);
        assert!(player.echolocate(&tuning));
        assert!(!player.echolocate(&tuning));
        assert_eq!(player.echo_rings().len(), 1);

        assert!(player.tail_slap(&tuning));
        assert!(!player.tail_slap(&tuning));
        let wait = tuning
            .tail_slap_cooldown_ticks
            .max(tuning.echolocation_ring_ticks);
        for _ in 0..wait {
            player.advance(&tuning);
        }
        assert!(player.tail_slap(&tuning));
        assert!(player.echo_rings().is_empty());
    }

    #[test]
    fn slap_connects_on_exactly_one_tick() {
        let tuning = tuning();
        let mut player = Player::new(TileCoord::new(2, 2), &tuning);
        assert!(player.tail_slap(&tuning));

        let mut connecting = 0;
        for _ in 0..tuning.tail_slap_active_ticks + 2 {
            player.advance(&tuning);
            if player.slap_connects(&tuning) {
                connecting += 1;
            }
        }
        assert_eq!(connecting, 1);
        assert!(!player.is_slapping());
    }
}
