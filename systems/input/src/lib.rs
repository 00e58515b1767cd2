#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Unified keyboard and touch sampler that produces one [`Intent`] per tick.
//!
//! Direction input is level-triggered: whatever is held when the tick is
//! sampled. Actions are edge-triggered: a press latches until the next
//! [`InputManager::sample`] consumes it, and holding a key never latches it
//! again.

use glam::Vec2;
use migration_core::{Direction, Intent};

/// Default drag distance, in screen units, before a touch counts as a direction.
pub const DEFAULT_DEADZONE: f32 = 24.0;

/// Logical keys the game reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Swim north.
    Up,
    /// Swim south.
    Down,
    /// Swim west.
    Left,
    /// Swim east.
    Right,
    /// Cast echolocation.
    Echolocate,
    /// Swing the tail.
    TailSlap,
    /// Pause, resume or start.
    Pause,
}

impl Key {
    const fn direction(self) -> Option<Direction> {
        match self {
            Self::Up => Some(Direction::North),
            Self::Down => Some(Direction::South),
            Self::Left => Some(Direction::West),
            Self::Right => Some(Direction::East),
            Self::Echolocate | Self::TailSlap | Self::Pause => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Latch {
    held: bool,
    pending: bool,
}

impl Latch {
    fn press(&mut self) {
        if !self.held {
            self.pending = true;
        }
        self.held = true;
    }

    fn release(&mut self) {
        self.held = false;
    }

    fn take(&mut self) -> bool {
        let pending = self.pending;
        self.pending = false;
        pending
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Drag {
    origin: Vec2,
    current: Vec2,
}

impl Drag {
    fn offset(&self) -> Vec2 {
        self.current - self.origin
    }
}

/// Merges keyboard and touch sources into per-tick intents.
#[derive(Clone, Debug)]
pub struct InputManager {
    held_directions: Vec<Direction>,
    echolocate: Latch,
    tail_slap: Latch,
    pause: Latch,
    drag: Option<Drag>,
    deadzone: f32,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(DEFAULT_DEADZONE)
    }
}

impl InputManager {
    /// Creates a sampler whose touch drags need `deadzone` units to register.
    #[must_use]
    pub fn new(deadzone: f32) -> Self {
        Self {
            held_directions: Vec::with_capacity(4),
            echolocate: Latch::default(),
            tail_slap: Latch::default(),
            pause: Latch::default(),
            drag: None,
            deadzone: deadzone.max(0.0),
        }
    }

    /// Records a key going down. Repeated presses while held are ignored.
    pub fn press(&mut self, key: Key) {
        if let Some(direction) = key.direction() {
            self.held_directions.retain(|held| *held != direction);
            self.held_directions.push(direction);
            return;
        }
        match key {
            Key::Echolocate => self.echolocate.press(),
            Key::TailSlap => self.tail_slap.press(),
            Key::Pause => self.pause.press(),
            Key::Up | Key::Down | Key::Left | Key::Right => {}
        }
    }

    /// Records a key going up.
    pub fn release(&mut self, key: Key) {
        if let Some(direction) = key.direction() {
            self.held_directions.retain(|held| *held != direction);
            return;
        }
        match key {
            Key::Echolocate => self.echolocate.release(),
            Key::TailSlap => self.tail_slap.release(),
            Key::Pause => self.pause.release(),
            Key::Up | Key::Down | Key::Left | Key::Right => {}
        }
    }

    /// Starts a touch at `position`.
    pub fn touch_start(&mut self, position: Vec2) {
        self.drag = Some(Drag {
            origin: position,
            current: position,
        });
    }

    /// Moves the active touch to `position`.
    pub fn touch_move(&mut self, position: Vec2) {
        if let Some(drag) = &mut self.drag {
            drag.current = position;
        }
    }

    /// Ends the active touch. A touch that never left the deadzone is a tap
    /// and latches a tail-slap.
    pub fn touch_end(&mut self) {
        if let Some(drag) = self.drag.take() {
            if drag.offset().length() < self.deadzone {
                self.tail_slap.pending = true;
            }
        }
    }

    /// Latches an echolocation request from an on-screen button.
    pub fn register_echolocate(&mut self) {
        self.echolocate.pending = true;
    }

    /// Latches a pause request from an on-screen button.
    pub fn register_pause(&mut self) {
        self.pause.pending = true;
    }

    /// Produces the intent for one tick and consumes every latched action.
    ///
    /// The most recently pressed held key wins; a drag only steers while no
    /// key is held.
    pub fn sample(&mut self) -> Intent {
        let direction = self
            .held_directions
            .last()
            .copied()
            .or_else(|| self.drag_direction());
        Intent {
            direction,
            echolocate: self.echolocate.take(),
            tail_slap: self.tail_slap.take(),
            pause: self.pause.take(),
        }
    }

    /// Drops every held key, touch and latched action.
    pub fn clear(&mut self) {
        *self = Self::new(self.deadzone);
    }

    fn drag_direction(&self) -> Option<Direction> {
        let offset = self.drag?.offset();
        if offset.length() < self.deadzone {
            return None;
        }
        let direction = if offset.x.abs() >= offset.y.abs() {
            if offset.x > 0.0 {
                Direction::East
            } else {
                Direction::West
            }
        } else if offset.y > 0.0 {
            Direction::South
        } else {
            Direction::North
        };
        Some(direction)
    }
}
