//! Direct state manipulation for scenario tests.
//!
//! Compiled only for tests and for crates enabling `test_scaffolding`.

use migration_core::{EnemyId, EnemyKind, Event, ItemKind, Phase, RoomId, Tile, TileCoord};

use crate::{enemies::Enemy, World};

/// Leaves the title screen straight into `room`, with the player on `arrival`.
pub fn enter_room(world: &mut World, room: RoomId, arrival: TileCoord, out_events: &mut Vec<Event>) {
    world.set_phase(Phase::Playing, out_events);
    world.load_room(room, arrival, out_events);
}

/// Teleports the player, cancelling any move in flight.
pub fn place_player(world: &mut World, cell: TileCoord) {
    world.player.place(cell);
}

/// Overrides the player's health, clamped to the current maximum.
pub fn set_player_health(world: &mut World, health: u32) {
    world.player.set_health(health);
}

/// Ends the player's invincibility window immediately.
pub fn clear_invincibility(world: &mut World) {
    world.player.clear_invincibility();
}

/// Adds an item to the inventory without emitting events.
pub fn grant_item(world: &mut World, item: ItemKind) {
    world.player.acquire(item, &world.tuning.player);
}

/// Overwrites one tile of the active room.
pub fn set_tile(world: &mut World, cell: TileCoord, tile: Tile) {
    world.tile_map.set_tile(cell, tile);
}

/// Removes every enemy from the active room without recording defeats.
pub fn clear_enemies(world: &mut World) {
    world.enemies.clear();
}

/// Adds an enemy to the active room. Its slot follows the registered ones.
pub fn spawn_enemy(world: &mut World, kind: EnemyKind, cell: TileCoord) -> EnemyId {
    let id = EnemyId::new(world.next_enemy_id);
    world.next_enemy_id = world.next_enemy_id.wrapping_add(1);
    let slot = crate::registry::spawns_in(world.room).count() + world.enemies.len();
    world.enemies.push(Enemy::spawn(id, slot, kind, cell));
    id
}

/// Mutable access to a live enemy.
pub fn enemy_mut(world: &mut World, id: EnemyId) -> Option<&mut Enemy> {
    world.enemies.iter_mut().find(|enemy| enemy.id() == id)
}

/// Damages an enemy through the regular defeat pathway.
///
/// Returns whether this call defeated it.
pub fn strike_enemy(world: &mut World, id: EnemyId, amount: i32, out_events: &mut Vec<Event>) -> bool {
    let Some(index) = world.enemies.iter().position(|enemy| enemy.id() == id) else {
        return false;
    };
    let defeated = world.enemies[index].damage(amount);
    if defeated {
        world.record_defeat(index, out_events);
    }
    defeated
}
