//! Dense grid of tile codes for the active room.

use migration_core::{Direction, Tile, TileCoord};

/// Tile grid of the room currently loaded into the world.
///
/// Every query is fail-safe: coordinates outside the grid read as
/// [`Tile::WALL`] and writes outside the grid are ignored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TileMap {
    columns: i32,
    rows: i32,
    tiles: Vec<Tile>,
}

impl TileMap {
    /// Creates a map from row-major tiles. Missing cells read as walls.
    #[must_use]
    pub fn new(columns: i32, rows: i32, tiles: Vec<Tile>) -> Self {
        let mut map = Self::default();
        map.load(columns, rows, tiles);
        map
    }

    /// Replaces the active grid.
    pub fn load(&mut self, columns: i32, rows: i32, mut tiles: Vec<Tile>) {
        let columns = columns.max(0);
        let rows = rows.max(0);
        let cell_count = usize::try_from(columns)
            .ok()
            .zip(usize::try_from(rows).ok())
            .and_then(|(columns, rows)| columns.checked_mul(rows))
            .unwrap_or(0);
        tiles.resize(cell_count, Tile::WALL);
        self.columns = columns;
        self.rows = rows;
        self.tiles = tiles;
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> i32 {
        self.columns
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> i32 {
        self.rows
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub fn contains(&self, coord: TileCoord) -> bool {
        self.index(coord).is_some()
    }

    /// Reads the tile at `coord`, returning a wall for out-of-range queries.
    #[must_use]
    pub fn tile(&self, coord: TileCoord) -> Tile {
        self.index(coord)
            .and_then(|index| self.tiles.get(index).copied())
            .unwrap_or(Tile::WALL)
    }

    /// Overwrites the tile at `coord`. Out-of-range writes are ignored.
    pub fn set_tile(&mut self, coord: TileCoord, tile: Tile) {
        if let Some(slot) = self.index(coord).and_then(|index| self.tiles.get_mut(index)) {
            *slot = tile;
        }
    }

    /// Reports whether the tile at `coord` blocks movement.
    #[must_use]
    pub fn is_solid(&self, coord: TileCoord) -> bool {
        self.tile(coord).is_solid()
    }

    /// Reports whether the player may step onto `coord`.
    #[must_use]
    pub fn is_walkable(&self, coord: TileCoord) -> bool {
        self.tile(coord).is_walkable()
    }

    /// Reports whether standing on `coord` hurts.
    #[must_use]
    pub fn is_damaging(&self, coord: TileCoord) -> bool {
        self.tile(coord).is_damaging()
    }

    /// Reports whether standing on `coord` heals.
    #[must_use]
    pub fn is_healing(&self, coord: TileCoord) -> bool {
        self.tile(coord).is_healing()
    }

    /// Border `coord` leads through, if it holds an exit marker.
    #[must_use]
    pub fn exit_at(&self, coord: TileCoord) -> Option<Direction> {
        self.tile(coord).exit()
    }

    /// Reports whether `coord` holds a sign.
    #[must_use]
    pub fn is_sign(&self, coord: TileCoord) -> bool {
        self.tile(coord).is_sign()
    }

    /// Reports whether `coord` holds an unopened chest.
    #[must_use]
    pub fn is_chest(&self, coord: TileCoord) -> bool {
        self.tile(coord).is_chest()
    }

    /// Reports whether `coord` holds uncollected treasure.
    #[must_use]
    pub fn is_treasure(&self, coord: TileCoord) -> bool {
        self.tile(coord).is_treasure()
    }

    fn index(&self, coord: TileCoord) -> Option<usize> {
        if coord.column() < 0
            || coord.row() < 0
            || coord.column() >= self.columns
            || coord.row() >= self.rows
        {
            return None;
        }

        let row = usize::try_from(coord.row()).ok()?;
        let column = usize::try_from(coord.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        Some(row * width + column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TileMap {
        TileMap::new(
            3,
            2,
            vec![
                Tile::OPEN_WATER,
                Tile::ROCK,
                Tile::EXIT_EAST,
                Tile::SHALLOW,
                Tile::TOXIC,
                Tile::CHEST,
            ],
        )
    }

    #[test]
    fn out_of_range_reads_are_walls() {
        let map = sample();
        assert_eq!(map.tile(TileCoord::new(-1, 0)), Tile::WALL);
        assert_eq!(map.tile(TileCoord::new(3, 0)), Tile::WALL);
        assert_eq!(map.tile(TileCoord::new(0, 2)), Tile::WALL);
        assert!(map.is_solid(TileCoord::new(99, 99)));
        assert!(!map.is_walkable(TileCoord::new(0, -5)));
    }

    #[test]
    fn out_of_range_writes_are_ignored() {
        let mut map = sample();
        let before = map.clone();
        map.set_tile(TileCoord::new(5, 5), Tile::TREASURE);
        map.set_tile(TileCoord::new(-1, 1), Tile::TREASURE);
        assert_eq!(map, before);
    }

    #[test]
    fn set_tile_mutates_in_place() {
        let mut map = sample();
        map.set_tile(TileCoord::new(2, 1), Tile::OPEN_WATER);
        assert!(!map.is_chest(TileCoord::new(2, 1)));
        assert_eq!(map.tile(TileCoord::new(2, 1)), Tile::OPEN_WATER);
    }

    #[test]
    fn classification_queries_follow_codes() {
        let map = sample();
        assert!(map.is_walkable(TileCoord::new(0, 0)));
        assert!(map.is_solid(TileCoord::new(1, 0)));
        assert_eq!(map.exit_at(TileCoord::new(2, 0)), Some(Direction::East));
        assert_eq!(map.exit_at(TileCoord::new(0, 0)), None);
        assert!(map.is_healing(TileCoord::new(0, 1)));
        assert!(map.is_damaging(TileCoord::new(1, 1)));
        assert!(map.is_chest(TileCoord::new(2, 1)));
    }

    #[test]
    fn short_grids_are_padded_with_walls() {
        let map = TileMap::new(2, 2, vec![Tile::OPEN_WATER]);
        assert!(map.is_walkable(TileCoord::new(0, 0)));
        assert!(map.is_solid(TileCoord::new(1, 1)));
    }
}
