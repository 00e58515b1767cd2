#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the migration engine.
//!
//! This crate defines the message surface that connects the input sampler,
//! the authoritative world, and the outbound observers. The engine submits
//! [`Command`] values describing what should happen on the next tick, the
//! world executes those commands via its `apply` entry point, and then
//! broadcasts [`Event`] values that presentation collaborators (renderer,
//! sound, interface overlays, leaderboard client) consume without ever
//! reading world state directly.

use glam::Vec2;
use serde::{Deserialize, Serialize};

mod tuning;

pub use tuning::{PlayerTuning, ScoreTuning, SessionTuning, Tuning};

/// Number of tile columns in every room.
pub const ROOM_COLUMNS: i32 = 20;

/// Number of tile rows in every room.
pub const ROOM_ROWS: i32 = 15;

/// Side length of one square tile measured in world units.
pub const TILE_SIZE: f32 = 32.0;

/// Discrete screen phases the engine moves through during a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the start signal.
    Title,
    /// Simulation advances every tick.
    Playing,
    /// Ticking is halted; state is preserved for resume.
    Paused,
    /// A fade-driven room swap is in progress.
    Transitioning,
    /// Health reached zero. Terminal.
    GameOver,
    /// The song was completed. Terminal.
    Victory,
}

impl Phase {
    /// Reports whether the phase ends the session.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::GameOver | Self::Victory)
    }
}

/// Cardinal directions used for movement, facing and room exits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// All four directions in clockwise order starting at north.
    pub const ALL: [Direction; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Returns the direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Column and row delta of a single step in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// Unit vector in world space for this direction.
    #[must_use]
    pub fn unit(self) -> Vec2 {
        let (column, row) = self.delta();
        Vec2::new(column as f32, row as f32)
    }
}

/// Location of a single tile expressed as signed column and row indices.
///
/// Coordinates may lie outside the room; tile queries treat those as walls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    column: i32,
    row: i32,
}

impl TileCoord {
    /// Creates a new tile coordinate.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Zero-based row index.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Returns the neighbouring coordinate one step in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (column, row) = direction.delta();
        Self::new(self.column + column, self.row + row)
    }

    /// Centre of the tile in world units.
    #[must_use]
    pub fn center(self) -> Vec2 {
        Vec2::new(
            (self.column as f32 + 0.5) * TILE_SIZE,
            (self.row as f32 + 0.5) * TILE_SIZE,
        )
    }

    /// Tile containing the provided world-space position.
    #[must_use]
    pub fn containing(position: Vec2) -> Self {
        Self::new(
            (position.x / TILE_SIZE).floor() as i32,
            (position.y / TILE_SIZE).floor() as i32,
        )
    }

    /// Computes the Manhattan distance between two coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: TileCoord) -> u32 {
        self.column.abs_diff(other.column) + self.row.abs_diff(other.row)
    }
}

/// Integer terrain or feature code stored in one cell of a room grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile(u8);

impl Tile {
    /// Deep open water.
    pub const OPEN_WATER: Tile = Tile(0);
    /// Shallow water that slowly heals the player.
    pub const SHALLOW: Tile = Tile(1);
    /// Solid rock.
    pub const ROCK: Tile = Tile(2);
    /// Solid ice.
    pub const ICE: Tile = Tile(3);
    /// Solid shipwreck debris.
    pub const WRECK: Tile = Tile(4);
    /// Room wall. Returned for every out-of-range query.
    pub const WALL: Tile = Tile(5);
    /// Toxic water that damages the player.
    pub const TOXIC: Tile = Tile(6);
    /// Current flowing north.
    pub const CURRENT_NORTH: Tile = Tile(7);
    /// Current flowing south.
    pub const CURRENT_SOUTH: Tile = Tile(8);
    /// Current flowing east.
    pub const CURRENT_EAST: Tile = Tile(9);
    /// Current flowing west.
    pub const CURRENT_WEST: Tile = Tile(10);
    /// Exit through the north border.
    pub const EXIT_NORTH: Tile = Tile(11);
    /// Exit through the south border.
    pub const EXIT_SOUTH: Tile = Tile(12);
    /// Exit through the east border.
    pub const EXIT_EAST: Tile = Tile(13);
    /// Exit through the west border.
    pub const EXIT_WEST: Tile = Tile(14);
    /// Gate sealed while a boss of the room is alive.
    pub const BOSS_GATE: Tile = Tile(15);
    /// Readable sign.
    pub const SIGN: Tile = Tile(16);
    /// Closed chest.
    pub const CHEST: Tile = Tile(17);
    /// Collectible treasure.
    pub const TREASURE: Tile = Tile(18);

    /// Reports whether the tile blocks movement.
    ///
    /// Unknown codes are treated as solid.
    #[must_use]
    pub const fn is_solid(self) -> bool {
        !matches!(self.0, 0 | 1 | 6..=14 | 16..=18)
    }

    /// Reports whether the player may step onto the tile.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        !self.is_solid()
    }

    /// Reports whether standing on the tile hurts.
    #[must_use]
    pub const fn is_damaging(self) -> bool {
        self.0 == Self::TOXIC.0
    }

    /// Reports whether standing on the tile heals.
    #[must_use]
    pub const fn is_healing(self) -> bool {
        self.0 == Self::SHALLOW.0
    }

    /// Border the tile leads through, if it is an exit marker.
    #[must_use]
    pub const fn exit(self) -> Option<Direction> {
        match self.0 {
            11 => Some(Direction::North),
            12 => Some(Direction::South),
            13 => Some(Direction::East),
            14 => Some(Direction::West),
            _ => None,
        }
    }

    /// Exit marker tile for the provided border.
    #[must_use]
    pub const fn exit_toward(direction: Direction) -> Self {
        match direction {
            Direction::North => Self::EXIT_NORTH,
            Direction::South => Self::EXIT_SOUTH,
            Direction::East => Self::EXIT_EAST,
            Direction::West => Self::EXIT_WEST,
        }
    }

    /// Direction of the flow, if the tile is a current.
    #[must_use]
    pub const fn current(self) -> Option<Direction> {
        match self.0 {
            7 => Some(Direction::North),
            8 => Some(Direction::South),
            9 => Some(Direction::East),
            10 => Some(Direction::West),
            _ => None,
        }
    }

    /// Reports whether the tile is the boss gate.
    #[must_use]
    pub const fn is_boss_gate(self) -> bool {
        self.0 == Self::BOSS_GATE.0
    }

    /// Reports whether the tile is a sign.
    #[must_use]
    pub const fn is_sign(self) -> bool {
        self.0 == Self::SIGN.0
    }

    /// Reports whether the tile is an unopened chest.
    #[must_use]
    pub const fn is_chest(self) -> bool {
        self.0 == Self::CHEST.0
    }

    /// Reports whether the tile is uncollected treasure.
    #[must_use]
    pub const fn is_treasure(self) -> bool {
        self.0 == Self::TREASURE.0
    }
}

/// Items the player can acquire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemKind {
    /// Raises maximum health and fully heals.
    HeartContainer,
    /// Part of the song that unlocks the final grotto.
    SongFragment,
    /// Lets tail-slaps destroy ghost nets.
    NetCutter,
    /// Absorbs the noise emitter's pulses.
    Shield,
}

impl ItemKind {
    /// Display name shown in dialogue and the inventory bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::HeartContainer => "Heart Container",
            Self::SongFragment => "Song Fragment",
            Self::NetCutter => "Net Cutter",
            Self::Shield => "Bubble Shield",
        }
    }
}

/// The seven enemy behaviours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Bounces between fixed horizontal bounds.
    PatrolSkiff,
    /// Drifts randomly, pursues nearby prey and entangles on contact.
    GhostNet,
    /// Stationary source of expanding damage rings.
    NoiseEmitter,
    /// Two-phase wandering boss that fires aimed projectiles.
    AreaBoss,
    /// Stationary shooter firing four axis-aligned projectiles.
    TentacleShooter,
    /// Pursuing boss that launches fanned sweep arcs.
    TentacleBoss,
    /// Patrols a two-point path, chases through terrain.
    PhasingChaser,
}

impl EnemyKind {
    /// Starting and maximum health.
    #[must_use]
    pub const fn max_health(self) -> i32 {
        match self {
            Self::PatrolSkiff => 1,
            Self::GhostNet => 2,
            Self::NoiseEmitter => 999,
            Self::AreaBoss => 12,
            Self::TentacleShooter => 3,
            Self::TentacleBoss => 10,
            Self::PhasingChaser => 3,
        }
    }

    /// Collision radius in world units.
    #[must_use]
    pub const fn radius(self) -> f32 {
        match self {
            Self::PatrolSkiff | Self::PhasingChaser => 12.0,
            Self::AreaBoss | Self::TentacleBoss => 28.0,
            Self::GhostNet | Self::NoiseEmitter | Self::TentacleShooter => 14.0,
        }
    }

    /// Damage dealt when the body touches the player.
    #[must_use]
    pub const fn contact_damage(self) -> u32 {
        if self.is_boss() {
            2
        } else {
            1
        }
    }

    /// Bosses are tracked per room and never respawn once defeated.
    #[must_use]
    pub const fn is_boss(self) -> bool {
        matches!(self, Self::AreaBoss | Self::TentacleBoss)
    }

    /// Item granted when the enemy is defeated.
    #[must_use]
    pub const fn reward(self) -> Option<ItemKind> {
        match self {
            Self::AreaBoss | Self::TentacleBoss => Some(ItemKind::SongFragment),
            _ => None,
        }
    }

    /// Item the player must hold for tail-slaps to hurt the enemy.
    #[must_use]
    pub const fn required_item(self) -> Option<ItemKind> {
        match self {
            Self::GhostNet => Some(ItemKind::NetCutter),
            _ => None,
        }
    }

    /// Health at or below which the enemy switches to its second phase.
    #[must_use]
    pub const fn phase_two_health(self) -> Option<i32> {
        match self {
            Self::AreaBoss => Some(6),
            _ => None,
        }
    }

    /// Reports whether tail-slaps only land while the enemy is stunned.
    #[must_use]
    pub const fn vulnerable_only_when_stunned(self) -> bool {
        matches!(self, Self::PhasingChaser)
    }

    /// Reports whether body contact entangles the player.
    #[must_use]
    pub const fn entangles(self) -> bool {
        matches!(self, Self::GhostNet)
    }

    /// Reports whether the enemy may occupy solid terrain.
    #[must_use]
    pub const fn phases_through_terrain(self) -> bool {
        matches!(self, Self::PhasingChaser)
    }
}

/// Identifier of one static room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(u8);

impl RoomId {
    /// Creates a room identifier from its numeric value.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }
}

/// Identifier allocated to an enemy instance when its room loads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// One-way cues consumed by the sound collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Echolocation pulse cast.
    Echolocation,
    /// Tail-slap swing.
    TailSlap,
    /// Player took damage.
    Hurt,
    /// An enemy was stunned.
    Stun,
    /// An enemy was defeated.
    EnemyDefeated,
    /// A chest opened.
    ChestOpened,
    /// Treasure picked up.
    Treasure,
    /// An item joined the inventory.
    ItemAcquired,
    /// A blocked exit or gated room refused the player.
    Denied,
    /// A room transition started.
    RoomTransition,
    /// The session ended in defeat.
    GameOver,
    /// The song was completed.
    Victory,
}

/// Intent sampled from the input collaborator for a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intent {
    /// Held movement direction, if any.
    pub direction: Option<Direction>,
    /// Edge-triggered echolocation request.
    pub echolocate: bool,
    /// Edge-triggered tail-slap request.
    pub tail_slap: bool,
    /// Edge-triggered pause or start request.
    pub pause: bool,
}

/// Attack an enemy launches once its attack timer has run down.
#[derive(Clone, Debug, PartialEq)]
pub enum Attack {
    /// Projectiles leaving the enemy's centre along each heading.
    Volley {
        /// Flight directions; need not be normalised.
        headings: Vec<Vec2>,
    },
    /// One expanding noise ring.
    Pulse,
    /// Sweep arcs centred on each angle.
    Sweep {
        /// Arc centres in radians, measured from the positive x axis.
        angles: Vec<f32>,
    },
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Leaves the title phase and loads the starting room.
    Start,
    /// Toggles between playing and paused.
    TogglePause,
    /// Advances the simulation by exactly one fixed tick.
    Tick {
        /// Input sampled for this tick.
        intent: Intent,
    },
    /// Requests that a ready enemy launch an attack.
    EnemyAttack {
        /// Enemy launching the attack.
        enemy: EnemyId,
        /// Shape of the attack.
        attack: Attack,
    },
}

/// Notifications broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The screen phase changed.
    PhaseChanged {
        /// Phase that became active.
        phase: Phase,
    },
    /// Player health or maximum health changed.
    HealthChanged {
        /// Current health.
        health: u32,
        /// Current maximum health.
        max_health: u32,
    },
    /// An item joined the inventory.
    ItemAcquired {
        /// Kind of the acquired item.
        item: ItemKind,
    },
    /// A new room became active.
    RoomChanged {
        /// Identifier of the room.
        room: RoomId,
        /// Display name of the room.
        name: String,
    },
    /// A line of dialogue should be displayed.
    DialogueShown {
        /// Text to display.
        text: String,
    },
    /// The current dialogue should be hidden.
    DialogueHidden,
    /// The number of held song fragments changed.
    FragmentsChanged {
        /// Fragments held.
        count: u32,
    },
    /// The running score changed.
    ScoreChanged {
        /// Sum of the components accumulated so far.
        score: u32,
    },
    /// One more simulated second elapsed.
    TimeElapsed {
        /// Whole seconds elapsed while playing.
        seconds: u32,
    },
    /// A treasure was collected.
    TreasureCollected {
        /// Treasures collected this session.
        count: u32,
        /// Value of the collected treasure.
        value: u32,
    },
    /// A side room was entered for the first time.
    SideRoomDiscovered {
        /// Identifier of the side room.
        room: RoomId,
    },
    /// An enemy was defeated and removed from the room.
    EnemyDefeated {
        /// Identifier of the defeated enemy.
        enemy: EnemyId,
        /// Kind of the defeated enemy.
        kind: EnemyKind,
    },
    /// The final score was computed.
    ScoreFinalized {
        /// Component breakdown and total.
        breakdown: ScoreBreakdown,
    },
    /// The player ran out of health.
    GameOver,
    /// The song was completed.
    Victory {
        /// Final total score.
        score: u32,
    },
    /// Cue for the sound collaborator.
    Sound {
        /// Cue to play.
        cue: SoundCue,
    },
}

/// Six independently accumulated score components and their sum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Bonus for time left on the clock.
    pub time_bonus: u32,
    /// Summed value of collected treasures.
    pub treasure: u32,
    /// Bonus for side rooms visited.
    pub side_rooms: u32,
    /// Bonus for bosses defeated.
    pub bosses: u32,
    /// Bonus for song fragments held.
    pub fragments: u32,
    /// Bonus for health remaining.
    pub health: u32,
    /// Sum of all components.
    pub total: u32,
}

impl ScoreBreakdown {
    /// Builds a breakdown from its components, computing the total.
    #[must_use]
    pub fn from_components(
        time_bonus: u32,
        treasure: u32,
        side_rooms: u32,
        bosses: u32,
        fragments: u32,
        health: u32,
    ) -> Self {
        let total = [time_bonus, treasure, side_rooms, bosses, fragments, health]
            .iter()
            .fold(0_u32, |sum, value| sum.saturating_add(*value));
        Self {
            time_bonus,
            treasure,
            side_rooms,
            bosses,
            fragments,
            health,
            total,
        }
    }
}

/// Immutable copy of the player's state used by presentation collaborators.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Continuous position in world units.
    pub position: Vec2,
    /// Discrete tile used for collisions and triggers.
    pub tile: TileCoord,
    /// Facing direction.
    pub facing: Direction,
    /// Current health.
    pub health: u32,
    /// Current maximum health.
    pub max_health: u32,
    /// Whether the player is flashing from recent damage.
    pub invincible: bool,
    /// Whether the player is entangled.
    pub entangled: bool,
    /// Whether a tail-slap is being drawn.
    pub slapping: bool,
    /// Radii of live echolocation rings.
    pub echo_rings: Vec<f32>,
    /// Acquired items in acquisition order.
    pub inventory: Vec<ItemKind>,
}

/// Immutable copy of one enemy's state used by presentation collaborators.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Identifier of the enemy.
    pub id: EnemyId,
    /// Behaviour of the enemy.
    pub kind: EnemyKind,
    /// Continuous position in world units.
    pub position: Vec2,
    /// Facing direction.
    pub facing: Direction,
    /// Current health.
    pub health: i32,
    /// Maximum health.
    pub max_health: i32,
    /// Whether the enemy is stunned.
    pub stunned: bool,
    /// Ticks until the attack timer runs down; `None` for enemies without one.
    pub ready_in: Option<u32>,
    /// Live projectile positions.
    pub projectiles: Vec<Vec2>,
    /// Live ring or sweep radii.
    pub waves: Vec<f32>,
    /// Recent positions for trail drawing, oldest first.
    pub trail: Vec<Vec2>,
}

#[cfg(test)]
mod tests {
    use super::{Direction, EnemyKind, ScoreBreakdown, Tile, TileCoord, TILE_SIZE};

    #[test]
    fn opposite_directions_pair_up() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_ne!(direction.opposite(), direction);
        }
    }

    #[test]
    fn stepping_follows_direction_delta() {
        let origin = TileCoord::new(3, 3);
        assert_eq!(origin.step(Direction::North), TileCoord::new(3, 2));
        assert_eq!(origin.step(Direction::East), TileCoord::new(4, 3));
        assert_eq!(origin.step(Direction::South), TileCoord::new(3, 4));
        assert_eq!(origin.step(Direction::West), TileCoord::new(2, 3));
    }

    #[test]
    fn containing_tile_inverts_center() {
        let tile = TileCoord::new(7, 11);
        assert_eq!(TileCoord::containing(tile.center()), tile);
        assert!((tile.center().x - 7.5 * TILE_SIZE).abs() < f32::EPSILON);
    }

    #[test]
    fn tile_classification_matches_codes() {
        assert!(Tile::WALL.is_solid());
        assert!(Tile::ROCK.is_solid());
        assert!(Tile::BOSS_GATE.is_solid());
        assert!(Tile::OPEN_WATER.is_walkable());
        assert!(Tile::TOXIC.is_walkable());
        assert!(Tile::TOXIC.is_damaging());
        assert!(Tile::SHALLOW.is_healing());
        assert!(Tile::CHEST.is_walkable() && Tile::CHEST.is_chest());
        assert_eq!(Tile::EXIT_WEST.exit(), Some(Direction::West));
        assert_eq!(Tile::CURRENT_EAST.current(), Some(Direction::East));
        assert_eq!(Tile::OPEN_WATER.exit(), None);
    }

    #[test]
    fn exit_markers_round_trip_through_direction() {
        for direction in Direction::ALL {
            assert_eq!(Tile::exit_toward(direction).exit(), Some(direction));
        }
    }

    #[test]
    fn bosses_reward_fragments() {
        assert!(EnemyKind::AreaBoss.is_boss());
        assert!(EnemyKind::TentacleBoss.is_boss());
        assert!(EnemyKind::AreaBoss.reward().is_some());
        assert_eq!(EnemyKind::PatrolSkiff.reward(), None);
        assert_eq!(EnemyKind::PatrolSkiff.max_health(), 1);
        assert_eq!(EnemyKind::AreaBoss.phase_two_health(), Some(6));
        assert_eq!(EnemyKind::TentacleBoss.phase_two_health(), None);
    }

    #[test]
    fn breakdown_total_sums_components() {
        let breakdown = ScoreBreakdown::from_components(10, 20, 30, 40, 50, 60);
        assert_eq!(breakdown.total, 210);
    }

    #[test]
    fn unknown_codes_decode_as_solid() {
        let tile: Tile = bincode::deserialize(&[200_u8]).expect("deserialize");
        assert!(tile.is_solid());
        assert_eq!(tile.exit(), None);
    }

    #[test]
    fn breakdown_round_trips_through_bincode() {
        let breakdown = ScoreBreakdown::from_components(4_500, 600, 500, 2_000, 1_500, 300);
        let bytes = bincode::serialize(&breakdown).expect("serialize");
        let restored: ScoreBreakdown = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, breakdown);
    }
}
