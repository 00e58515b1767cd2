#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for the migration story.
//!
//! The world is a single mutable struct threaded through [`apply`]. Every
//! observable change is reported as an [`Event`] appended to the caller's
//! buffer; nothing outside this crate holds references into the state.

pub mod camera;
pub mod enemies;
pub mod player;
pub mod registry;
pub mod room_graph;
pub mod rooms;
pub mod score;
pub mod tile_map;
pub mod transition;

#[cfg(any(test, feature = "test_scaffolding"))]
pub mod scaffolding;

use std::collections::BTreeSet;

use migration_core::{
    Attack, Command, Direction, EnemyId, Event, Intent, ItemKind, Phase, RoomId, SoundCue, Tile, TileCoord,
    Tuning, ROOM_COLUMNS, ROOM_ROWS,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{
    camera::Camera,
    enemies::{Enemy, EnemyContext, HazardHit},
    player::Player,
    room_graph::{spawn_position, RoomGraph},
    rooms::RoomKind,
    score::ScoreTally,
    tile_map::TileMap,
    transition::{PendingRoom, TransitionManager, TransitionStep},
};

const BLOCKED_EXIT_TEXT: &str = "The water beyond is too rough to cross.";

/// Session-durable record of what the player already resolved.
#[derive(Clone, Debug, Default)]
struct Progress {
    opened_chests: BTreeSet<(RoomId, TileCoord)>,
    collected_treasures: BTreeSet<(RoomId, TileCoord)>,
    defeated_spawns: BTreeSet<(RoomId, usize)>,
    defeated_bosses: BTreeSet<RoomId>,
    visited: BTreeSet<RoomId>,
}

#[derive(Clone, Debug)]
struct Dialogue {
    text: String,
    remaining: u32,
}

/// Re-trigger guard for signs, chests and treasure.
#[derive(Clone, Copy, Debug, Default)]
struct Interaction {
    resolved_cell: Option<TileCoord>,
    cooldown: u32,
}

/// Represents the authoritative migration world state.
#[derive(Clone, Debug)]
pub struct World {
    tuning: Tuning,
    phase: Phase,
    rng: ChaCha8Rng,
    graph: RoomGraph,
    room: RoomId,
    tile_map: TileMap,
    player: Player,
    enemies: Vec<Enemy>,
    next_enemy_id: u32,
    camera: Camera,
    transition: TransitionManager,
    progress: Progress,
    score: ScoreTally,
    interaction: Interaction,
    dialogue: Option<Dialogue>,
    victory_countdown: Option<u32>,
    ticks_played: u64,
}

impl World {
    /// Creates a world waiting on the title screen.
    ///
    /// `seed` feeds the generator behind every random enemy decision, so two
    /// worlds with the same seed and command stream evolve identically.
    #[must_use]
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let player = Player::new(rooms::START_TILE, &tuning.player);
        let camera = Camera::new(&tuning.session);
        let transition = TransitionManager::new(tuning.session.fade_ticks);
        Self {
            phase: Phase::Title,
            rng: ChaCha8Rng::seed_from_u64(seed),
            graph: RoomGraph::builtin(),
            room: rooms::START_ROOM,
            tile_map: TileMap::default(),
            player,
            enemies: Vec::new(),
            next_enemy_id: 0,
            camera,
            transition,
            progress: Progress::default(),
            score: ScoreTally::default(),
            interaction: Interaction::default(),
            dialogue: None,
            victory_countdown: None,
            ticks_played: 0,
            tuning,
        }
    }

    fn set_phase(&mut self, phase: Phase, out_events: &mut Vec<Event>) {
        if self.phase == phase {
            return;
        }
        tracing::info!(from = ?self.phase, to = ?phase, "phase changed");
        self.phase = phase;
        out_events.push(Event::PhaseChanged { phase });
    }

    fn start(&mut self, out_events: &mut Vec<Event>) {
        if self.phase != Phase::Title {
            return;
        }
        tracing::info!("session started");
        self.set_phase(Phase::Playing, out_events);
        self.load_room(rooms::START_ROOM, rooms::START_TILE, out_events);
        out_events.push(self.health_event());
        out_events.push(Event::FragmentsChanged {
            count: self.player.fragments(),
        });
        out_events.push(Event::ScoreChanged {
            score: self.score.running(),
        });
    }

    fn toggle_pause(&mut self, out_events: &mut Vec<Event>) {
        match self.phase {
            Phase::Playing => self.set_phase(Phase::Paused, out_events),
            Phase::Paused => self.set_phase(Phase::Playing, out_events),
            Phase::Title | Phase::Transitioning | Phase::GameOver | Phase::Victory => {}
        }
    }

    fn tick(&mut self, intent: Intent, out_events: &mut Vec<Event>) {
        match self.phase {
            Phase::Title => {
                if intent.pause {
                    self.start(out_events);
                }
            }
            Phase::Paused => {
                if intent.pause {
                    self.toggle_pause(out_events);
                }
            }
            Phase::Transitioning => self.advance_transition(out_events),
            Phase::Playing => {
                if intent.pause {
                    self.toggle_pause(out_events);
                } else {
                    self.play(intent, out_events);
                }
            }
            Phase::GameOver | Phase::Victory => {}
        }
    }

    fn advance_transition(&mut self, out_events: &mut Vec<Event>) {
        match self.transition.advance() {
            TransitionStep::Idle => self.set_phase(Phase::Playing, out_events),
            TransitionStep::Fading => {}
            TransitionStep::Midpoint(pending) => {
                self.load_room(pending.room, pending.arrival, out_events);
            }
            TransitionStep::Finished => self.set_phase(Phase::Playing, out_events),
        }
    }

    fn play(&mut self, intent: Intent, out_events: &mut Vec<Event>) {
        self.advance_clock(out_events);

        self.move_player(intent);
        self.use_abilities(intent, out_events);
        self.player.advance(&self.tuning.player);
        self.camera.follow(self.player.position());

        if self.resolve_tile_effects(out_events) {
            return;
        }
        if self.phase != Phase::Playing {
            return;
        }

        self.resolve_tail_slap(out_events);
        self.update_enemies();
        self.resolve_enemy_contact(out_events);
        if self.phase != Phase::Playing {
            return;
        }

        self.enemies.retain(Enemy::is_active);
        self.advance_effects(out_events);
    }

    fn advance_clock(&mut self, out_events: &mut Vec<Event>) {
        self.ticks_played = self.ticks_played.saturating_add(1);
        let rate = u64::from(self.tuning.session.tick_rate.max(1));
        if self.ticks_played % rate == 0 {
            out_events.push(Event::TimeElapsed {
                seconds: self.elapsed_seconds(),
            });
        }
    }

    fn elapsed_seconds(&self) -> u32 {
        let rate = u64::from(self.tuning.session.tick_rate.max(1));
        u32::try_from(self.ticks_played / rate).unwrap_or(u32::MAX)
    }

    fn boss_active(&self) -> bool {
        self.enemies
            .iter()
            .any(|enemy| enemy.is_active() && enemy.kind().is_boss())
    }

    fn move_player(&mut self, intent: Intent) {
        let direction = match intent.direction {
            Some(direction) => Some(direction),
            None if !self.player.is_moving() => self.tile_map.tile(self.player.tile()).current(),
            None => None,
        };
        let Some(direction) = direction else {
            return;
        };

        let gate_open = !self.boss_active();
        let map = &self.tile_map;
        let _ = self.player.try_move(direction, |cell| {
            map.is_walkable(cell) || (gate_open && map.tile(cell).is_boss_gate())
        });
    }

    fn use_abilities(&mut self, intent: Intent, out_events: &mut Vec<Event>) {
        let tuning = &self.tuning.player;
        if intent.echolocate && self.player.echolocate(tuning) {
            out_events.push(Event::Sound {
                cue: SoundCue::Echolocation,
            });
            let origin = self.player.position();
            let mut stunned = 0_usize;
            for enemy in self
                .enemies
                .iter_mut()
                .filter(|enemy| enemy.is_active())
                .filter(|enemy| enemy.distance_to(origin) <= tuning.echolocation_stun_radius)
            {
                enemy.stun(tuning.stun_ticks);
                stunned += 1;
            }
            if stunned > 0 {
                out_events.push(Event::Sound {
                    cue: SoundCue::Stun,
                });
            }
        }

        if intent.tail_slap && self.player.tail_slap(tuning) {
            out_events.push(Event::Sound {
                cue: SoundCue::TailSlap,
            });
        }
    }

    /// Returns `true` when the player left the room this tick.
    fn resolve_tile_effects(&mut self, out_events: &mut Vec<Event>) -> bool {
        let cell = self.player.tile();

        if let Some(exit) = self.tile_map.exit_at(cell) {
            return self.leave_through(exit, out_events);
        }

        if self
            .player
            .dwell(self.tile_map.is_healing(cell), &self.tuning.player)
        {
            out_events.push(self.health_event());
        }

        if self.tile_map.is_damaging(cell) {
            self.hurt(self.tuning.player.hazard_damage, out_events);
            if self.phase != Phase::Playing {
                return false;
            }
        }

        self.interaction.cooldown = self.interaction.cooldown.saturating_sub(1);
        if self.interaction.resolved_cell != Some(cell) {
            self.interaction.resolved_cell = None;
        }
        if self.interaction.resolved_cell.is_some() || self.interaction.cooldown > 0 {
            return false;
        }

        let resolved = if self.tile_map.is_sign(cell) {
            self.read_sign(cell, out_events)
        } else if self.tile_map.is_chest(cell) {
            self.open_chest(cell, out_events)
        } else if self.tile_map.is_treasure(cell) {
            self.collect_treasure(cell, out_events)
        } else {
            false
        };
        if resolved {
            self.interaction = Interaction {
                resolved_cell: Some(cell),
                cooldown: self.tuning.session.interaction_cooldown_ticks,
            };
        }
        false
    }

    fn leave_through(&mut self, exit: Direction, out_events: &mut Vec<Event>) -> bool {
        let target = self.graph.target_room(self.room, exit);
        let refusal = match target.and_then(rooms::definition) {
            None => Some(BLOCKED_EXIT_TEXT.to_owned()),
            Some(definition)
                if definition.kind == RoomKind::Terminal
                    && self.player.fragments() < self.tuning.session.required_fragments =>
            {
                Some(format!(
                    "The grotto stays silent. Bring {} song fragments to wake it.",
                    self.tuning.session.required_fragments
                ))
            }
            Some(_) => None,
        };

        match (target, refusal) {
            (Some(room), None) => {
                let pending = PendingRoom {
                    room,
                    arrival: spawn_position(exit),
                };
                if self.transition.begin(pending) {
                    tracing::debug!(from = self.room.get(), to = room.get(), ?exit, "room transition");
                    self.set_phase(Phase::Transitioning, out_events);
                    out_events.push(Event::Sound {
                        cue: SoundCue::RoomTransition,
                    });
                }
                true
            }
            (_, refusal) => {
                tracing::warn!(room = self.room.get(), ?exit, "exit refused");
                self.player.place(spawn_position(exit.opposite()));
                self.show_dialogue(refusal.unwrap_or_else(|| BLOCKED_EXIT_TEXT.to_owned()), out_events);
                out_events.push(Event::Sound {
                    cue: SoundCue::Denied,
                });
                false
            }
        }
    }

    fn read_sign(&mut self, cell: TileCoord, out_events: &mut Vec<Event>) -> bool {
        let Some(record) = registry::sign_at(self.room, cell) else {
            return false;
        };
        self.show_dialogue(record.text.to_owned(), out_events);
        true
    }

    fn open_chest(&mut self, cell: TileCoord, out_events: &mut Vec<Event>) -> bool {
        let Some(record) = registry::chest_at(self.room, cell) else {
            return false;
        };
        if !self.progress.opened_chests.insert((self.room, cell)) {
            return false;
        }
        self.tile_map.set_tile(cell, Tile::OPEN_WATER);
        out_events.push(Event::Sound {
            cue: SoundCue::ChestOpened,
        });
        self.grant(record.item, out_events);
        self.show_dialogue(format!("You found the {}!", record.item.label()), out_events);
        true
    }

    fn collect_treasure(&mut self, cell: TileCoord, out_events: &mut Vec<Event>) -> bool {
        let Some(record) = registry::treasure_at(self.room, cell) else {
            return false;
        };
        if !self.progress.collected_treasures.insert((self.room, cell)) {
            return false;
        }
        self.tile_map.set_tile(cell, Tile::OPEN_WATER);
        let count = self.score.add_treasure(record.value);
        out_events.push(Event::TreasureCollected {
            count,
            value: record.value,
        });
        out_events.push(Event::ScoreChanged {
            score: self.score.running(),
        });
        out_events.push(Event::Sound {
            cue: SoundCue::Treasure,
        });
        true
    }

    fn grant(&mut self, item: ItemKind, out_events: &mut Vec<Event>) {
        self.player.acquire(item, &self.tuning.player);
        tracing::debug!(item = item.label(), "item acquired");
        out_events.push(Event::ItemAcquired { item });
        out_events.push(Event::Sound {
            cue: SoundCue::ItemAcquired,
        });
        match item {
            ItemKind::HeartContainer => out_events.push(self.health_event()),
            ItemKind::SongFragment => out_events.push(Event::FragmentsChanged {
                count: self.player.fragments(),
            }),
            ItemKind::NetCutter | ItemKind::Shield => {}
        }
    }

    fn resolve_tail_slap(&mut self, out_events: &mut Vec<Event>) {
        if !self.player.slap_connects(&self.tuning.player) {
            return;
        }

        let target = self.player.slap_target();
        let damage = self.tuning.player.tail_slap_damage;
        let stun_ticks = self.tuning.player.stun_ticks;
        let mut defeated = Vec::new();
        for (index, enemy) in self.enemies.iter_mut().enumerate() {
            if !enemy.is_active() || !enemy.overlaps_cell(target) {
                continue;
            }

            let kind = enemy.kind();
            let required = kind.required_item();
            let lacks_item = required.map_or(false, |item| !self.player.has(item));
            // Holding the required item makes the slap lethal.
            let amount = if required.is_some() {
                enemy.health().max(damage)
            } else {
                damage
            };
            if lacks_item {
                enemy.stun(stun_ticks);
                out_events.push(Event::Sound {
                    cue: SoundCue::Stun,
                });
            } else if kind.vulnerable_only_when_stunned() && !enemy.is_stunned() {
                out_events.push(Event::Sound {
                    cue: SoundCue::Denied,
                });
            } else if enemy.damage(amount) {
                defeated.push(index);
            }
        }

        for index in defeated {
            self.record_defeat(index, out_events);
        }
    }

    fn record_defeat(&mut self, index: usize, out_events: &mut Vec<Event>) {
        let Some(enemy) = self.enemies.get(index) else {
            return;
        };
        let (id, kind, slot) = (enemy.id(), enemy.kind(), enemy.slot());
        tracing::debug!(room = self.room.get(), ?kind, "enemy defeated");

        let _ = self.progress.defeated_spawns.insert((self.room, slot));
        out_events.push(Event::EnemyDefeated { enemy: id, kind });
        out_events.push(Event::Sound {
            cue: SoundCue::EnemyDefeated,
        });

        if kind.is_boss() {
            let _ = self.progress.defeated_bosses.insert(self.room);
            self.score.add_boss(&self.tuning.score);
            out_events.push(Event::ScoreChanged {
                score: self.score.running(),
            });
        }
        if let Some(item) = kind.reward() {
            self.grant(item, out_events);
        }
    }

    fn launch_attack(&mut self, enemy: EnemyId, attack: &Attack) {
        if self.phase != Phase::Playing {
            return;
        }
        let launched = self
            .enemies
            .iter_mut()
            .find(|candidate| candidate.id() == enemy)
            .map_or(false, |candidate| candidate.launch(attack));
        if !launched {
            tracing::debug!(enemy = enemy.get(), "attack rejected");
        }
    }

    fn update_enemies(&mut self) {
        let context = EnemyContext {
            player: self.player.position(),
            map: &self.tile_map,
        };
        for enemy in &mut self.enemies {
            enemy.update(&context, &mut self.rng);
        }
    }

    fn resolve_enemy_contact(&mut self, out_events: &mut Vec<Event>) {
        let position = self.player.position();
        let radius = self.tuning.player.radius;
        let shielded = self.player.has(ItemKind::Shield);

        let mut hits = Vec::new();
        let mut entangled = false;
        for enemy in self.enemies.iter_mut().filter(|enemy| enemy.is_active()) {
            if enemy.touches(position, radius) {
                hits.push(enemy.kind().contact_damage());
                entangled |= enemy.kind().entangles();
            }
            match enemy.strike(position, radius) {
                Some(HazardHit::Ring) if shielded => {}
                Some(_) => hits.push(self.tuning.player.hazard_damage),
                None => {}
            }
        }

        if entangled {
            self.player.entangle(&self.tuning.player);
        }
        for amount in hits {
            self.hurt(amount, out_events);
            if self.phase != Phase::Playing {
                return;
            }
        }
    }

    fn hurt(&mut self, amount: u32, out_events: &mut Vec<Event>) {
        let before = self.player.health();
        let lethal = self.player.damage(amount, &self.tuning.player);
        if self.player.health() != before {
            out_events.push(self.health_event());
            out_events.push(Event::Sound {
                cue: SoundCue::Hurt,
            });
        }
        if lethal {
            self.game_over(out_events);
        }
    }

    fn game_over(&mut self, out_events: &mut Vec<Event>) {
        tracing::info!(room = self.room.get(), seconds = self.elapsed_seconds(), "game over");
        self.victory_countdown = None;
        self.set_phase(Phase::GameOver, out_events);
        out_events.push(Event::GameOver);
        out_events.push(Event::Sound {
            cue: SoundCue::GameOver,
        });
    }

    fn advance_effects(&mut self, out_events: &mut Vec<Event>) {
        if let Some(dialogue) = &mut self.dialogue {
            dialogue.remaining = dialogue.remaining.saturating_sub(1);
            if dialogue.remaining == 0 {
                self.hide_dialogue(out_events);
            }
        }

        if let Some(remaining) = self.victory_countdown {
            let remaining = remaining.saturating_sub(1);
            self.victory_countdown = Some(remaining);
            if remaining == 0 {
                self.complete_song(out_events);
            }
        }
    }

    fn complete_song(&mut self, out_events: &mut Vec<Event>) {
        self.victory_countdown = None;
        let finalized = self.score.finalize(
            self.elapsed_seconds(),
            self.tuning.session.time_limit_seconds,
            self.player.fragments(),
            self.player.health(),
            &self.tuning.score,
        );
        let Some(breakdown) = finalized else {
            return;
        };
        tracing::info!(total = breakdown.total, "song completed");
        out_events.push(Event::ScoreFinalized { breakdown });
        self.set_phase(Phase::Victory, out_events);
        out_events.push(Event::Victory {
            score: breakdown.total,
        });
        out_events.push(Event::Sound {
            cue: SoundCue::Victory,
        });
    }

    fn show_dialogue(&mut self, text: String, out_events: &mut Vec<Event>) {
        out_events.push(Event::DialogueShown { text: text.clone() });
        self.dialogue = Some(Dialogue {
            text,
            remaining: self.tuning.session.dialogue_ticks.max(1),
        });
    }

    fn hide_dialogue(&mut self, out_events: &mut Vec<Event>) {
        if self.dialogue.take().is_some() {
            out_events.push(Event::DialogueHidden);
        }
    }

    fn health_event(&self) -> Event {
        Event::HealthChanged {
            health: self.player.health(),
            max_health: self.player.max_health(),
        }
    }

    /// Swaps the active room, instantiating only unresolved content.
    fn load_room(&mut self, room: RoomId, arrival: TileCoord, out_events: &mut Vec<Event>) {
        let Some(definition) = rooms::definition(room) else {
            tracing::warn!(room = room.get(), "room has no definition; staying put");
            return;
        };

        self.room = room;
        self.tile_map
            .load(ROOM_COLUMNS, ROOM_ROWS, definition.tiles());
        for (_, cell) in self
            .progress
            .opened_chests
            .iter()
            .chain(self.progress.collected_treasures.iter())
            .filter(|(resolved_room, _)| *resolved_room == room)
        {
            self.tile_map.set_tile(*cell, Tile::OPEN_WATER);
        }

        self.enemies.clear();
        for (slot, spawn) in registry::spawns_in(room) {
            let defeated = self.progress.defeated_spawns.contains(&(room, slot))
                || (spawn.kind.is_boss() && self.progress.defeated_bosses.contains(&room));
            if defeated {
                continue;
            }
            let id = EnemyId::new(self.next_enemy_id);
            self.next_enemy_id = self.next_enemy_id.wrapping_add(1);
            self.enemies
                .push(Enemy::spawn(id, slot, spawn.kind, spawn.cell));
        }

        self.player.place(arrival);
        self.camera.snap(self.player.position());
        self.interaction = Interaction::default();
        self.hide_dialogue(out_events);

        tracing::debug!(
            room = room.get(),
            name = definition.name,
            enemies = self.enemies.len(),
            "room loaded"
        );
        out_events.push(Event::RoomChanged {
            room,
            name: definition.name.to_owned(),
        });

        if self.progress.visited.insert(room) && definition.kind == RoomKind::Side {
            self.score.add_side_room(&self.tuning.score);
            out_events.push(Event::SideRoomDiscovered { room });
            out_events.push(Event::ScoreChanged {
                score: self.score.running(),
            });
        }

        self.victory_countdown = (definition.kind == RoomKind::Terminal)
            .then(|| self.tuning.session.victory_delay_ticks.max(1));
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Start => world.start(out_events),
        Command::TogglePause => world.toggle_pause(out_events),
        Command::Tick { intent } => world.tick(intent, out_events),
        Command::EnemyAttack { enemy, attack } => world.launch_attack(enemy, &attack),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use glam::Vec2;
    use migration_core::{EnemySnapshot, Phase, PlayerSnapshot, RoomId, ScoreBreakdown, Tuning};

    use super::World;
    use crate::{rooms, tile_map::TileMap};

    /// Current screen phase.
    #[must_use]
    pub fn phase(world: &World) -> Phase {
        world.phase
    }

    /// Active room.
    #[must_use]
    pub fn room(world: &World) -> RoomId {
        world.room
    }

    /// Display name of the active room.
    #[must_use]
    pub fn room_name(world: &World) -> &'static str {
        rooms::definition(world.room).map_or("", |definition| definition.name)
    }

    /// Terrain of the active room, including cleared chests and treasure.
    #[must_use]
    pub fn tile_map(world: &World) -> &TileMap {
        &world.tile_map
    }

    /// Tuning the world was created with.
    #[must_use]
    pub fn tuning(world: &World) -> &Tuning {
        &world.tuning
    }

    /// Captures the player's state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        let player = &world.player;
        PlayerSnapshot {
            position: player.position(),
            tile: player.tile(),
            facing: player.facing(),
            health: player.health(),
            max_health: player.max_health(),
            invincible: player.is_invincible(),
            entangled: player.is_entangled(),
            slapping: player.is_slapping(),
            echo_rings: player
                .echo_rings()
                .iter()
                .map(|ring| {
                    let ticks = world.tuning.player.echolocation_ring_ticks.max(1) as f32;
                    world.tuning.player.echolocation_ring_radius * ring.age as f32 / ticks
                })
                .collect(),
            inventory: player.inventory().to_vec(),
        }
    }

    /// Continuous position of the player.
    #[must_use]
    pub fn player_position(world: &World) -> Vec2 {
        world.player.position()
    }

    /// Captures every live enemy in spawn order.
    #[must_use]
    pub fn enemies(world: &World) -> Vec<EnemySnapshot> {
        world
            .enemies
            .iter()
            .filter(|enemy| enemy.is_active())
            .map(|enemy| enemy.snapshot())
            .collect()
    }

    /// Song fragments held.
    #[must_use]
    pub fn fragments(world: &World) -> u32 {
        world.player.fragments()
    }

    /// Top-left corner of the camera viewport.
    #[must_use]
    pub fn camera(world: &World) -> Vec2 {
        world.camera.position()
    }

    /// Darkness of the room transition overlay, 0 when idle.
    #[must_use]
    pub fn transition_opacity(world: &World) -> f32 {
        world.transition.opacity()
    }

    /// Dialogue currently on screen.
    #[must_use]
    pub fn dialogue(world: &World) -> Option<&str> {
        world.dialogue.as_ref().map(|dialogue| dialogue.text.as_str())
    }

    /// Sum of the score components accumulated during play.
    #[must_use]
    pub fn running_score(world: &World) -> u32 {
        world.score.running()
    }

    /// Final breakdown once the song is complete.
    #[must_use]
    pub fn score_breakdown(world: &World) -> Option<&ScoreBreakdown> {
        world.score.breakdown()
    }

    /// Whole seconds spent in the playing phase.
    #[must_use]
    pub fn elapsed_seconds(world: &World) -> u32 {
        world.elapsed_seconds()
    }

    /// Reports whether boss gates in the active room can be crossed.
    #[must_use]
    pub fn boss_gates_open(world: &World) -> bool {
        !world.boss_active()
    }
}
