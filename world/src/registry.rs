//! Static per-room registries of enemies, chests, signs and treasures.
//!
//! Records are keyed by room and cell. Nothing here is validated at runtime
//! except through [`crate::room_graph::verify_layout`].

use migration_core::{EnemyKind, ItemKind, RoomId, TileCoord};

/// Enemy placed in a room when it loads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemySpawn {
    /// Room the enemy belongs to.
    pub room: RoomId,
    /// Behaviour of the enemy.
    pub kind: EnemyKind,
    /// Cell the enemy starts on.
    pub cell: TileCoord,
}

/// Chest and the item inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChestRecord {
    /// Room holding the chest.
    pub room: RoomId,
    /// Cell of the chest tile.
    pub cell: TileCoord,
    /// Item granted when opened.
    pub item: ItemKind,
}

/// Sign and its text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignRecord {
    /// Room holding the sign.
    pub room: RoomId,
    /// Cell of the sign tile.
    pub cell: TileCoord,
    /// Text shown when read.
    pub text: &'static str,
}

/// Treasure and its score value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreasureRecord {
    /// Room holding the treasure.
    pub room: RoomId,
    /// Cell of the treasure tile.
    pub cell: TileCoord,
    /// Points awarded when collected.
    pub value: u32,
}

const fn spawn(room: u8, kind: EnemyKind, column: i32, row: i32) -> EnemySpawn {
    EnemySpawn {
        room: RoomId::new(room),
        kind,
        cell: TileCoord::new(column, row),
    }
}

const fn chest(room: u8, column: i32, row: i32, item: ItemKind) -> ChestRecord {
    ChestRecord {
        room: RoomId::new(room),
        cell: TileCoord::new(column, row),
        item,
    }
}

const fn sign(room: u8, column: i32, row: i32, text: &'static str) -> SignRecord {
    SignRecord {
        room: RoomId::new(room),
        cell: TileCoord::new(column, row),
        text,
    }
}

const fn treasure(room: u8, column: i32, row: i32, value: u32) -> TreasureRecord {
    TreasureRecord {
        room: RoomId::new(room),
        cell: TileCoord::new(column, row),
        value,
    }
}

/// Every enemy spawn in the world.
pub static ENEMY_SPAWNS: [EnemySpawn; 14] = [
    spawn(0, EnemyKind::PatrolSkiff, 10, 9),
    spawn(1, EnemyKind::PatrolSkiff, 5, 10),
    spawn(1, EnemyKind::PatrolSkiff, 12, 4),
    spawn(2, EnemyKind::PatrolSkiff, 9, 7),
    spawn(3, EnemyKind::GhostNet, 6, 3),
    spawn(3, EnemyKind::GhostNet, 14, 11),
    spawn(3, EnemyKind::PhasingChaser, 8, 10),
    spawn(4, EnemyKind::NoiseEmitter, 10, 9),
    spawn(4, EnemyKind::TentacleShooter, 4, 4),
    spawn(4, EnemyKind::PatrolSkiff, 12, 12),
    spawn(5, EnemyKind::AreaBoss, 10, 7),
    spawn(6, EnemyKind::TentacleBoss, 10, 10),
    spawn(7, EnemyKind::PhasingChaser, 6, 5),
    spawn(7, EnemyKind::GhostNet, 12, 10),
];

/// Every chest in the world.
pub static CHESTS: [ChestRecord; 4] = [
    chest(1, 8, 4, ItemKind::Shield),
    chest(2, 9, 3, ItemKind::NetCutter),
    chest(7, 3, 2, ItemKind::SongFragment),
    chest(7, 16, 2, ItemKind::HeartContainer),
];

/// Every sign in the world.
pub static SIGNS: [SignRecord; 3] = [
    sign(
        0,
        7,
        4,
        "The warm current runs east. The grotto only sings for a whole song.",
    ),
    sign(
        3,
        11,
        9,
        "Ghost nets drift here. Something sharp could cut them loose.",
    ),
    sign(
        4,
        9,
        4,
        "South lies the Song Grotto. Three fragments will wake it.",
    ),
];

/// Every treasure in the world.
pub static TREASURES: [TreasureRecord; 11] = [
    treasure(0, 13, 2, 100),
    treasure(1, 9, 12, 150),
    treasure(2, 3, 2, 300),
    treasure(3, 9, 3, 150),
    treasure(4, 15, 12, 200),
    treasure(5, 2, 2, 500),
    treasure(5, 17, 2, 500),
    treasure(6, 2, 2, 500),
    treasure(6, 17, 2, 500),
    treasure(7, 3, 6, 250),
    treasure(7, 15, 6, 250),
];

/// Spawns registered for `room`, paired with their slot index within the room.
pub fn spawns_in(room: RoomId) -> impl Iterator<Item = (usize, &'static EnemySpawn)> {
    ENEMY_SPAWNS
        .iter()
        .filter(move |record| record.room == room)
        .enumerate()
}

/// Chest registered at `cell` in `room`.
#[must_use]
pub fn chest_at(room: RoomId, cell: TileCoord) -> Option<&'static ChestRecord> {
    CHESTS
        .iter()
        .find(|record| record.room == room && record.cell == cell)
}

/// Sign registered at `cell` in `room`.
#[must_use]
pub fn sign_at(room: RoomId, cell: TileCoord) -> Option<&'static SignRecord> {
    SIGNS
        .iter()
        .find(|record| record.room == room && record.cell == cell)
}

/// Treasure registered at `cell` in `room`.
#[must_use]
pub fn treasure_at(room: RoomId, cell: TileCoord) -> Option<&'static TreasureRecord> {
    TREASURES
        .iter()
        .find(|record| record.room == room && record.cell == cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_slots_are_numbered_per_room() {
        let slots: Vec<_> = spawns_in(RoomId::new(3)).map(|(slot, _)| slot).collect();
        assert_eq!(slots, vec![0, 1, 2]);
        assert_eq!(spawns_in(RoomId::new(8)).count(), 0);
    }

    #[test]
    fn three_fragments_exist_in_the_world() {
        let chest_fragments = CHESTS
            .iter()
            .filter(|record| record.item == ItemKind::SongFragment)
            .count();
        let boss_fragments = ENEMY_SPAWNS
            .iter()
            .filter(|record| record.kind.reward() == Some(ItemKind::SongFragment))
            .count();
        assert_eq!(chest_fragments + boss_fragments, 3);
    }

    #[test]
    fn lookups_match_on_room_and_cell() {
        assert_eq!(
            chest_at(RoomId::new(2), TileCoord::new(9, 3)).map(|record| record.item),
            Some(ItemKind::NetCutter)
        );
        assert!(chest_at(RoomId::new(1), TileCoord::new(9, 3)).is_none());
        assert!(sign_at(RoomId::new(0), TileCoord::new(7, 4)).is_some());
        assert_eq!(
            treasure_at(RoomId::new(0), TileCoord::new(13, 2)).map(|record| record.value),
            Some(100)
        );
    }
}
