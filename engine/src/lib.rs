#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-tick orchestrator that owns the world, samples input and flushes
//! world events to observers once per tick.

mod clock;

use std::{fmt, time::Duration};

use migration_core::{Command, Event, Tuning};
use migration_system_enemy_behavior::EnemyBehavior;
use migration_system_input::InputManager;
use migration_world::{self as world, World};

pub use clock::FixedTimestep;

type Observer = Box<dyn FnMut(&Event)>;

/// Owns one play session from title screen to a terminal phase.
pub struct GameEngine {
    world: World,
    input: InputManager,
    enemy_behavior: EnemyBehavior,
    timestep: FixedTimestep,
    observers: Vec<Observer>,
    commands: Vec<Command>,
    pending: Vec<Event>,
    running: bool,
}

impl fmt::Debug for GameEngine {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("GameEngine")
            .field("phase", &world::query::phase(&self.world))
            .field("observers", &self.observers.len())
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}

impl GameEngine {
    /// Creates an engine on the title screen.
    #[must_use]
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let timestep = FixedTimestep::new(
            tuning.session.tick_rate,
            tuning.session.max_steps_per_frame,
        );
        Self {
            world: World::new(tuning, seed),
            input: InputManager::default(),
            enemy_behavior: EnemyBehavior::new(),
            timestep,
            observers: Vec::new(),
            commands: Vec::new(),
            pending: Vec::new(),
            running: true,
        }
    }

    /// Registers an observer that receives every event after each tick.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&Event) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Input sampler fed by the keyboard and touch collaborators.
    pub fn input_mut(&mut self) -> &mut InputManager {
        &mut self.input
    }

    /// Read-only world access for renderers and the `query` module.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for tooling that drives commands directly.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Reports whether the engine still ticks.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Leaves the title screen.
    pub fn start(&mut self) {
        self.submit(Command::Start);
    }

    /// Feeds one display frame and runs zero or more fixed ticks.
    ///
    /// Returns the number of ticks executed.
    pub fn frame(&mut self, elapsed: Duration) -> u32 {
        if !self.running {
            return 0;
        }
        let steps = self.timestep.advance(elapsed);
        for _ in 0..steps {
            self.step();
        }
        tracing::trace!(steps, "frame advanced");
        steps
    }

    /// Runs exactly one tick with freshly sampled input.
    ///
    /// The world advances first, then the enemy behaviour system reads the
    /// resulting snapshots and its attack commands are applied before the
    /// tick's events are flushed.
    pub fn step(&mut self) {
        if !self.running {
            return;
        }
        let intent = self.input.sample();
        world::apply(&mut self.world, Command::Tick { intent }, &mut self.pending);
        self.run_enemy_behavior();
        self.flush();
    }

    /// Halts ticking, detaches every observer and drops any held input.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        tracing::info!(
            phase = ?world::query::phase(&self.world),
            "engine stopped"
        );
        self.running = false;
        self.observers.clear();
        self.input.clear();
        self.timestep.reset();
        self.commands.clear();
        self.pending.clear();
    }

    fn run_enemy_behavior(&mut self) {
        let enemies = world::query::enemies(&self.world);
        self.enemy_behavior.handle(
            world::query::phase(&self.world),
            world::query::player_position(&self.world),
            &enemies,
            &mut self.commands,
        );
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.pending);
        }
    }

    fn submit(&mut self, command: Command) {
        world::apply(&mut self.world, command, &mut self.pending);
        self.flush();
    }

    fn flush(&mut self) {
        for event in self.pending.drain(..) {
            for observer in &mut self.observers {
                observer(&event);
            }
        }
    }
}
