//! Static room tables: layouts, names, kinds and neighbours.
//!
//! Layouts are authored as glyph art and expanded to tile codes when a room
//! loads. Every exit sits in the middle of its border so that
//! [`crate::room_graph::spawn_position`] lands on open water in the
//! neighbouring room.

use migration_core::{Direction, RoomId, Tile, TileCoord, ROOM_ROWS};

/// Room the session starts in.
pub const START_ROOM: RoomId = RoomId::new(0);

/// Tile the player occupies when the session starts.
pub const START_TILE: TileCoord = TileCoord::new(4, 7);

/// The gated final room.
pub const TERMINAL_ROOM: RoomId = RoomId::new(8);

type Layout = [&'static str; ROOM_ROWS as usize];

/// Role a room plays in the progression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoomKind {
    /// Part of the main route.
    Main,
    /// Optional room that awards a visitation bonus.
    Side,
    /// Arena holding a boss.
    Boss,
    /// Final room gated by song fragments.
    Terminal,
}

/// Neighbouring rooms reached through each border.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Neighbors {
    /// Room behind the north exit.
    pub north: Option<RoomId>,
    /// Room behind the east exit.
    pub east: Option<RoomId>,
    /// Room behind the south exit.
    pub south: Option<RoomId>,
    /// Room behind the west exit.
    pub west: Option<RoomId>,
}

impl Neighbors {
    /// Room behind the border facing `direction`.
    #[must_use]
    pub const fn toward(&self, direction: Direction) -> Option<RoomId> {
        match direction {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
        }
    }
}

/// Static description of one room.
#[derive(Clone, Copy, Debug)]
pub struct RoomDefinition {
    /// Identifier of the room.
    pub id: RoomId,
    /// Display name.
    pub name: &'static str,
    /// Role in the progression.
    pub kind: RoomKind,
    /// Adjacent rooms.
    pub neighbors: Neighbors,
    layout: &'static Layout,
}

impl RoomDefinition {
    /// Expands the glyph layout into row-major tile codes.
    #[must_use]
    pub fn tiles(&self) -> Vec<Tile> {
        self.layout
            .iter()
            .flat_map(|row| row.chars().map(tile_for_glyph))
            .collect()
    }
}

/// Every room in the world, indexed by identifier.
pub static ROOMS: [RoomDefinition; 9] = [
    RoomDefinition {
        id: RoomId::new(0),
        name: "Kelp Nursery",
        kind: RoomKind::Main,
        neighbors: Neighbors {
            north: None,
            east: Some(RoomId::new(1)),
            south: None,
            west: None,
        },
        layout: &NURSERY_LAYOUT,
    },
    RoomDefinition {
        id: RoomId::new(1),
        name: "Coral Shallows",
        kind: RoomKind::Main,
        neighbors: Neighbors {
            north: Some(RoomId::new(2)),
            east: Some(RoomId::new(3)),
            south: None,
            west: Some(RoomId::new(0)),
        },
        layout: &SHALLOWS_LAYOUT,
    },
    RoomDefinition {
        id: RoomId::new(2),
        name: "Sunken Wreck",
        kind: RoomKind::Side,
        neighbors: Neighbors {
            north: None,
            east: None,
            south: Some(RoomId::new(1)),
            west: None,
        },
        layout: &WRECK_LAYOUT,
    },
    RoomDefinition {
        id: RoomId::new(3),
        name: "Ghost Net Drift",
        kind: RoomKind::Main,
        neighbors: Neighbors {
            north: None,
            east: Some(RoomId::new(6)),
            south: Some(RoomId::new(4)),
            west: Some(RoomId::new(1)),
        },
        layout: &NET_DRIFT_LAYOUT,
    },
    RoomDefinition {
        id: RoomId::new(4),
        name: "Trench Mouth",
        kind: RoomKind::Main,
        neighbors: Neighbors {
            north: Some(RoomId::new(3)),
            east: Some(RoomId::new(7)),
            south: Some(TERMINAL_ROOM),
            west: Some(RoomId::new(5)),
        },
        layout: &TRENCH_LAYOUT,
    },
    RoomDefinition {
        id: RoomId::new(5),
        name: "Leviathan Arena",
        kind: RoomKind::Boss,
        neighbors: Neighbors {
            north: None,
            east: Some(RoomId::new(4)),
            south: None,
            west: None,
        },
        layout: &ARENA_LAYOUT,
    },
    RoomDefinition {
        id: RoomId::new(6),
        name: "Tentacle Lair",
        kind: RoomKind::Boss,
        neighbors: Neighbors {
            north: None,
            east: None,
            south: None,
            west: Some(RoomId::new(3)),
        },
        layout: &LAIR_LAYOUT,
    },
    RoomDefinition {
        id: RoomId::new(7),
        name: "Echo Cavern",
        kind: RoomKind::Side,
        neighbors: Neighbors {
            north: None,
            east: None,
            south: None,
            west: Some(RoomId::new(4)),
        },
        layout: &CAVERN_LAYOUT,
    },
    RoomDefinition {
        id: TERMINAL_ROOM,
        name: "Song Grotto",
        kind: RoomKind::Terminal,
        neighbors: Neighbors {
            north: Some(RoomId::new(4)),
            east: None,
            south: None,
            west: None,
        },
        layout: &GROTTO_LAYOUT,
    },
];

/// Looks up the static definition of `room`.
#[must_use]
pub fn definition(room: RoomId) -> Option<&'static RoomDefinition> {
    ROOMS.get(usize::from(room.get()))
}

fn tile_for_glyph(glyph: char) -> Tile {
    match glyph {
        '.' => Tile::OPEN_WATER,
        '~' => Tile::SHALLOW,
        'R' => Tile::ROCK,
        'I' => Tile::ICE,
        'W' => Tile::WRECK,
        'x' => Tile::TOXIC,
        '^' => Tile::CURRENT_NORTH,
        'v' => Tile::CURRENT_SOUTH,
        '>' => Tile::CURRENT_EAST,
        '<' => Tile::CURRENT_WEST,
        'n' => Tile::EXIT_NORTH,
        's' => Tile::EXIT_SOUTH,
        'e' => Tile::EXIT_EAST,
        'w' => Tile::EXIT_WEST,
        'G' => Tile::BOSS_GATE,
        '?' => Tile::SIGN,
        'C' => Tile::CHEST,
        '$' => Tile::TREASURE,
        _ => Tile::WALL,
    }
}

const NURSERY_LAYOUT: Layout = [
    "####################",
    "#~~~....RR.........#",
    "#~~~.....R...$.....#",
    "#~~...........RR...#",
    "#......?......RR...#",
    "#..RR..............#",
    "#..RR.....xx.......#",
    "#.........xx.......e",
    "#..................#",
    "#....RR.......RR...#",
    "#....RR.......RR...#",
    "#..........>>>.....#",
    "#~~................#",
    "#~~~.....RRR.......#",
    "####################",
];

const SHALLOWS_LAYOUT: Layout = [
    "##########n#########",
    "#........~.........#",
    "#..RR.....~....RR..#",
    "#..RR..........RR..#",
    "#.......C..........#",
    "#...~~~......~~~...#",
    "#...~~~......~~~...#",
    "w..................e",
    "#......RRR.........#",
    "#......RRR....xx...#",
    "#.............xx...#",
    "#..RR..........RR..#",
    "#..RR....$.....RR..#",
    "#..................#",
    "####################",
];

const WRECK_LAYOUT: Layout = [
    "####################",
    "#.....WWWWWWWW.....#",
    "#..$..W......W.....#",
    "#.....W..C...W.....#",
    "#.....W......W.....#",
    "#.....WWW..WWW.....#",
    "#..................#",
    "#..................#",
    "#..II..........II..#",
    "#..II....xx....II..#",
    "#........xx........#",
    "#..................#",
    "#.....<<<<.........#",
    "#..................#",
    "##########s#########",
];

const NET_DRIFT_LAYOUT: Layout = [
    "####################",
    "#..................#",
    "#..RR.........RR...#",
    "#..RR....$....RR...#",
    "#..................#",
    "#.....vvv..........#",
    "#.....vvv.....II...#",
    "w.............II...e",
    "#..................#",
    "#...RR.....?.......#",
    "#...RR.........xx..#",
    "#..............xx..#",
    "#..~~..............#",
    "#..~~..............#",
    "##########s#########",
];

const TRENCH_LAYOUT: Layout = [
    "##########n#########",
    "#..................#",
    "#..RRR.......RRR...#",
    "#..RRR.......RRR...#",
    "#........?.........#",
    "#..xx..........xx..#",
    "#..xx..........xx..#",
    "w..................e",
    "#..................#",
    "#....RR......RR....#",
    "#....RR......RR....#",
    "#..................#",
    "#..~~..........$...#",
    "#..................#",
    "##########s#########",
];

const ARENA_LAYOUT: Layout = [
    "####################",
    "#RRRR..........RRRR#",
    "#R$.G..........G.$R#",
    "#RRRR..........RRRR#",
    "#..................#",
    "#..................#",
    "#..................#",
    "#..................e",
    "#..................#",
    "#..................#",
    "#..................#",
    "#RR..............RR#",
    "#R~~............~~R#",
    "#RR..............RR#",
    "####################",
];

const LAIR_LAYOUT: Layout = [
    "####################",
    "#RRRRRRR....RRRRRRR#",
    "#R$....G....G....$R#",
    "#RRRRRRR....RRRRRRR#",
    "#..................#",
    "#..................#",
    "#.....xx....xx.....#",
    "w..................#",
    "#..................#",
    "#.....xx....xx.....#",
    "#..................#",
    "#..................#",
    "#..~~..........~~..#",
    "#..................#",
    "####################",
];

const CAVERN_LAYOUT: Layout = [
    "####################",
    "#IIII..........IIII#",
    "#I.C............C.I#",
    "#I................I#",
    "#.......IIII.......#",
    "#..................#",
    "#..$...........$...#",
    "w..................#",
    "#..................#",
    "#......xxxxxx......#",
    "#..................#",
    "#...II........II...#",
    "#...II..~~~~..II...#",
    "#..................#",
    "####################",
];

const GROTTO_LAYOUT: Layout = [
    "##########n#########",
    "#~~~~~~~~...~~~~~~~#",
    "#~~..............~~#",
    "#~................~#",
    "#~.....RRRRRR.....~#",
    "#~.....R....R.....~#",
    "#~.....R....R.....~#",
    "#~................~#",
    "#~................~#",
    "#~................~#",
    "#~~..............~~#",
    "#~~~~~~~~~~~~~~~~~~#",
    "#~~~~~~~~~~~~~~~~~~#",
    "#~~~~~~~~~~~~~~~~~~#",
    "####################",
];
#[cfg(test)]
mod tests {
    use migration_core::ROOM_COLUMNS;

    use super::*;

    #[test]
    fn every_layout_fills_the_room() {
        for room in &ROOMS {
            let tiles = room.tiles();
            assert_eq!(tiles.len(), (ROOM_COLUMNS * ROOM_ROWS) as usize, "{}", room.name);
            for row in room.layout.iter() {
                assert_eq!(row.chars().count(), ROOM_COLUMNS as usize, "{}", room.name);
            }
        }
    }

    #[test]
    fn table_is_indexed_by_identifier() {
        for (index, room) in ROOMS.iter().enumerate() {
            assert_eq!(usize::from(room.id.get()), index);
            assert_eq!(definition(room.id).map(|found| found.id), Some(room.id));
        }
        assert!(definition(RoomId::new(200)).is_none());
    }

    #[test]
    fn start_tile_is_open_water() {
        let start = definition(START_ROOM).expect("start room");
        let index = (START_TILE.row() * ROOM_COLUMNS + START_TILE.column()) as usize;
        assert_eq!(start.tiles()[index], Tile::OPEN_WATER);
    }

    #[test]
    fn unknown_glyphs_become_walls() {
        assert_eq!(tile_for_glyph('@'), Tile::WALL);
        assert_eq!(tile_for_glyph('$'), Tile::TREASURE);
    }
}
