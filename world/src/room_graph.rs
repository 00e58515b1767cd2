//! Static adjacency between rooms and the cells players arrive on.

use std::collections::BTreeMap;

use migration_core::{Direction, RoomId, Tile, TileCoord, ROOM_COLUMNS, ROOM_ROWS};
use thiserror::Error;

use crate::{
    registry,
    rooms::{self, Neighbors, RoomDefinition},
    tile_map::TileMap,
};

/// Static mapping from each room to the rooms behind its four borders.
#[derive(Clone, Debug, Default)]
pub struct RoomGraph {
    edges: BTreeMap<RoomId, Neighbors>,
}

impl RoomGraph {
    /// Builds the graph from the provided room definitions.
    #[must_use]
    pub fn from_definitions(definitions: &[RoomDefinition]) -> Self {
        Self {
            edges: definitions
                .iter()
                .map(|definition| (definition.id, definition.neighbors))
                .collect(),
        }
    }

    /// Builds the graph of the built-in world.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_definitions(&rooms::ROOMS)
    }

    /// Room reached by taking the `exit` border of `current`, if the edge exists.
    #[must_use]
    pub fn target_room(&self, current: RoomId, exit: Direction) -> Option<RoomId> {
        self.edges
            .get(&current)
            .and_then(|neighbors| neighbors.toward(exit))
    }

    /// Iterates over every `(room, exit, target)` edge.
    pub fn edges(&self) -> impl Iterator<Item = (RoomId, Direction, RoomId)> + '_ {
        self.edges.iter().flat_map(|(room, neighbors)| {
            Direction::ALL
                .into_iter()
                .filter_map(move |exit| neighbors.toward(exit).map(|target| (*room, exit, target)))
        })
    }
}

/// Cell a player lands on after leaving a room through the `exit` border.
///
/// Leaving south arrives just inside the north border of the next room, and
/// so on for the other directions.
#[must_use]
pub const fn spawn_position(exit: Direction) -> TileCoord {
    let middle_column = ROOM_COLUMNS / 2;
    let middle_row = ROOM_ROWS / 2;
    match exit {
        Direction::North => TileCoord::new(middle_column, ROOM_ROWS - 2),
        Direction::South => TileCoord::new(middle_column, 1),
        Direction::East => TileCoord::new(1, middle_row),
        Direction::West => TileCoord::new(ROOM_COLUMNS - 2, middle_row),
    }
}

/// Cell holding the exit marker on the `exit` border.
#[must_use]
pub const fn exit_cell(exit: Direction) -> TileCoord {
    let middle_column = ROOM_COLUMNS / 2;
    let middle_row = ROOM_ROWS / 2;
    match exit {
        Direction::North => TileCoord::new(middle_column, 0),
        Direction::South => TileCoord::new(middle_column, ROOM_ROWS - 1),
        Direction::East => TileCoord::new(ROOM_COLUMNS - 1, middle_row),
        Direction::West => TileCoord::new(0, middle_row),
    }
}

/// Authoring problems detected by [`verify_layout`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// An edge has no counterpart leading back.
    #[error("room {from:?} leads {exit:?} to {to:?}, which does not lead back")]
    MissingReciprocalEdge {
        /// Room the edge starts in.
        from: RoomId,
        /// Border the edge leaves through.
        exit: Direction,
        /// Room the edge ends in.
        to: RoomId,
    },
    /// An edge names a room with no definition.
    #[error("room {from:?} leads {exit:?} to undefined room {to:?}")]
    UnknownRoom {
        /// Room the edge starts in.
        from: RoomId,
        /// Border the edge leaves through.
        exit: Direction,
        /// Missing room.
        to: RoomId,
    },
    /// An edge has no exit marker on its border.
    #[error("room {room:?} has an edge {exit:?} but no exit tile at {cell:?}")]
    MissingExitTile {
        /// Room missing the marker.
        room: RoomId,
        /// Border of the edge.
        exit: Direction,
        /// Expected marker cell.
        cell: TileCoord,
    },
    /// The arrival cell is blocked or hazardous.
    #[error("room {room:?} spawn cell {cell:?} is not safe open water")]
    UnsafeSpawn {
        /// Room with the unsafe cell.
        room: RoomId,
        /// Offending cell.
        cell: TileCoord,
    },
    /// A registry record does not sit on its matching tile.
    #[error("room {room:?} registers a {what} at {cell:?} but the tile differs")]
    RegistryMismatch {
        /// Room of the record.
        room: RoomId,
        /// Cell of the record.
        cell: TileCoord,
        /// Registry that holds the record.
        what: &'static str,
    },
}

/// Verifies that graph edges and hand-authored layouts agree.
///
/// Every edge must lead back, both rooms must carry the matching exit
/// marker, and the arrival cell must be walkable and hazard-free. Registry
/// records must sit on their tiles.
pub fn verify_layout(graph: &RoomGraph, definitions: &[RoomDefinition]) -> Result<(), LayoutError> {
    let maps: BTreeMap<RoomId, TileMap> = definitions
        .iter()
        .map(|definition| {
            (
                definition.id,
                TileMap::new(ROOM_COLUMNS, ROOM_ROWS, definition.tiles()),
            )
        })
        .collect();

    for (from, exit, to) in graph.edges() {
        let Some(target_map) = maps.get(&to) else {
            return Err(LayoutError::UnknownRoom { from, exit, to });
        };

        if graph.target_room(to, exit.opposite()) != Some(from) {
            return Err(LayoutError::MissingReciprocalEdge { from, exit, to });
        }

        if let Some(source_map) = maps.get(&from) {
            let cell = exit_cell(exit);
            if source_map.tile(cell) != Tile::exit_toward(exit) {
                return Err(LayoutError::MissingExitTile {
                    room: from,
                    exit,
                    cell,
                });
            }
        }

        let arrival = spawn_position(exit);
        let tile = target_map.tile(arrival);
        if !tile.is_walkable() || tile.is_damaging() || tile.exit().is_some() {
            return Err(LayoutError::UnsafeSpawn {
                room: to,
                cell: arrival,
            });
        }
    }

    verify_registries(&maps)
}

fn verify_registries(maps: &BTreeMap<RoomId, TileMap>) -> Result<(), LayoutError> {
    let require = |room: RoomId, cell: TileCoord, tile: Tile, what: &'static str| {
        let matches = maps.get(&room).map_or(false, |map| map.tile(cell) == tile);
        if matches {
            Ok(())
        } else {
            Err(LayoutError::RegistryMismatch { room, cell, what })
        }
    };

    for record in &registry::CHESTS {
        require(record.room, record.cell, Tile::CHEST, "chest")?;
    }
    for record in &registry::SIGNS {
        require(record.room, record.cell, Tile::SIGN, "sign")?;
    }
    for record in &registry::TREASURES {
        require(record.room, record.cell, Tile::TREASURE, "treasure")?;
    }
    for record in &registry::ENEMY_SPAWNS {
        let walkable = maps
            .get(&record.room)
            .map_or(false, |map| map.is_walkable(record.cell));
        if !walkable {
            return Err(LayoutError::RegistryMismatch {
                room: record.room,
                cell: record.cell,
                what: "enemy spawn",
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rooms::{RoomKind, ROOMS};

    #[test]
    fn builtin_layout_is_consistent() {
        assert_eq!(verify_layout(&RoomGraph::builtin(), &ROOMS), Ok(()));
    }

    #[test]
    fn absent_edges_return_none() {
        let graph = RoomGraph::builtin();
        assert_eq!(graph.target_room(RoomId::new(0), Direction::West), None);
        assert_eq!(graph.target_room(RoomId::new(99), Direction::East), None);
        assert_eq!(
            graph.target_room(RoomId::new(0), Direction::East),
            Some(RoomId::new(1))
        );
    }

    #[test]
    fn spawn_lands_inside_the_opposite_border() {
        assert_eq!(spawn_position(Direction::South), TileCoord::new(10, 1));
        assert_eq!(spawn_position(Direction::North), TileCoord::new(10, 13));
        assert_eq!(spawn_position(Direction::East), TileCoord::new(1, 7));
        assert_eq!(spawn_position(Direction::West), TileCoord::new(18, 7));
        for exit in Direction::ALL {
            let arrival = spawn_position(exit);
            let opposite_marker = exit_cell(exit.opposite());
            assert_eq!(arrival.manhattan_distance(opposite_marker), 1);
        }
    }

    #[test]
    fn one_way_edges_are_reported() {
        let mut definitions = ROOMS.to_vec();
        definitions[0].neighbors.east = Some(RoomId::new(2));
        let graph = RoomGraph::from_definitions(&definitions);
        assert_eq!(
            verify_layout(&graph, &definitions),
            Err(LayoutError::MissingReciprocalEdge {
                from: RoomId::new(0),
                exit: Direction::East,
                to: RoomId::new(2),
            })
        );
    }

    #[test]
    fn edges_without_markers_are_reported() {
        let mut definitions = ROOMS.to_vec();
        definitions[0].neighbors.west = Some(RoomId::new(7));
        definitions[7].neighbors.east = Some(RoomId::new(0));
        let graph = RoomGraph::from_definitions(&definitions);
        let error = verify_layout(&graph, &definitions).expect_err("marker missing");
        assert!(matches!(error, LayoutError::MissingExitTile { .. }));
    }

    #[test]
    fn terminal_room_is_reachable_only_from_the_trench() {
        let graph = RoomGraph::builtin();
        let into_terminal: Vec<_> = graph
            .edges()
            .filter(|(_, _, to)| rooms::definition(*to).map(|room| room.kind) == Some(RoomKind::Terminal))
            .collect();
        assert_eq!(
            into_terminal,
            vec![(RoomId::new(4), Direction::South, rooms::TERMINAL_ROOM)]
        );
    }
}
