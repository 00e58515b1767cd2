#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays the migration story headlessly.
//!
//! Input comes from a plain-text script, events are logged through
//! `tracing`, and a finished song is submitted to the local leaderboard.

mod config;
mod leaderboard;
mod profile;
mod script;

use std::{cell::RefCell, path::PathBuf, rc::Rc, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use migration_core::{Event, Phase};
use migration_engine::GameEngine;
use migration_world::{
    query,
    room_graph::{verify_layout, RoomGraph},
    rooms,
};
use tracing_subscriber::EnvFilter;

use crate::{
    leaderboard::{Leaderboard, LocalLeaderboard, Verdict},
    profile::Profile,
    script::{Action, Step},
};

const DEFAULT_LOG_FILTER: &str = "migration=info";
const DEFAULT_NAME: &str = "Wanderer";

/// Headless runner for the migration story.
#[derive(Debug, Parser)]
#[command(name = "migration", version, about)]
struct Args {
    /// TOML file overriding tuning values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for every random enemy decision.
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Input script, one `<ticks> <action>` step per line.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Display frames to run before giving up.
    #[arg(long, default_value_t = 36_000)]
    frames: u32,

    /// Name to record on the leaderboard. Saved to the profile.
    #[arg(long)]
    name: Option<String>,

    /// Where the player profile is kept.
    #[arg(long, default_value = "migration-profile.json")]
    profile: PathBuf,

    /// Where the local leaderboard is kept.
    #[arg(long, default_value = "migration-leaderboard.json")]
    leaderboard: PathBuf,
}

/// How a headless run ended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Outcome {
    phase: Option<Phase>,
    score: Option<u32>,
}

/// Entry point for the migration command-line interface.
fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    verify_layout(&RoomGraph::builtin(), &rooms::ROOMS)
        .context("built-in room layout is inconsistent")?;

    let tuning = config::load_tuning(args.config.as_deref())?;
    let steps = match &args.script {
        Some(path) => script::load(path)?,
        None => script::parse(script::DEFAULT_SCRIPT)?,
    };
    let name = resolve_name(&args)?;

    let frame = Duration::from_secs(1) / tuning.session.tick_rate.max(1);
    let mut engine = GameEngine::new(tuning, args.seed);
    let outcome = Rc::new(RefCell::new(Outcome::default()));
    let sink = Rc::clone(&outcome);
    engine.subscribe(move |event| record(&mut sink.borrow_mut(), event));

    tracing::info!(seed = args.seed, steps = steps.len(), "run started");
    let frames = play(&mut engine, &steps, frame, args.frames);
    let world_seconds = query::elapsed_seconds(engine.world());
    let room = query::room_name(engine.world());
    engine.stop();

    let outcome = *outcome.borrow();
    println!(
        "{frames} frames, {world_seconds} s in play, last room {room}, phase {:?}",
        outcome.phase.unwrap_or(Phase::Title)
    );

    if let (Some(Phase::Victory), Some(score)) = (outcome.phase, outcome.score) {
        submit(&args, &name, score)?;
    }
    Ok(())
}

fn resolve_name(args: &Args) -> Result<String> {
    if let Some(name) = &args.name {
        let profile = Profile { name: name.clone() };
        profile.save(&args.profile)?;
        return Ok(profile.name);
    }
    let saved = Profile::load(&args.profile)?;
    Ok(saved.map_or_else(|| DEFAULT_NAME.to_owned(), |profile| profile.name))
}

/// Feeds the script one frame at a time. Returns the frames consumed.
fn play(engine: &mut GameEngine, steps: &[Step], frame: Duration, budget: u32) -> u32 {
    let mut frames = 0;
    for step in steps {
        if let Action::Hold(key) = step.action {
            engine.input_mut().press(key);
        }
        for _ in 0..step.ticks {
            if frames >= budget || query::phase(engine.world()).is_terminal() {
                return frames;
            }
            let _ = engine.frame(frame);
            frames += 1;
        }
        if let Action::Hold(key) = step.action {
            engine.input_mut().release(key);
        }
    }
    frames
}

fn record(outcome: &mut Outcome, event: &Event) {
    match event {
        Event::PhaseChanged { phase } => {
            tracing::info!(?phase, "phase");
            outcome.phase = Some(*phase);
        }
        Event::RoomChanged { room, name } => {
            tracing::info!(room = room.get(), name = name.as_str(), "entered room");
        }
        Event::DialogueShown { text } => tracing::info!(text = text.as_str(), "dialogue"),
        Event::ItemAcquired { item } => tracing::info!(item = item.label(), "item"),
        Event::HealthChanged { health, max_health } => {
            tracing::debug!(health, max_health, "health");
        }
        Event::EnemyDefeated { kind, .. } => tracing::info!(?kind, "enemy defeated"),
        Event::ScoreFinalized { breakdown } => {
            tracing::info!(
                time = breakdown.time_bonus,
                treasure = breakdown.treasure,
                side_rooms = breakdown.side_rooms,
                bosses = breakdown.bosses,
                fragments = breakdown.fragments,
                health = breakdown.health,
                total = breakdown.total,
                "score finalized"
            );
        }
        Event::Victory { score } => outcome.score = Some(*score),
        Event::GameOver => tracing::info!("the calf was lost"),
        Event::Sound { cue } => tracing::trace!(?cue, "sound"),
        Event::DialogueHidden
        | Event::FragmentsChanged { .. }
        | Event::ScoreChanged { .. }
        | Event::TimeElapsed { .. }
        | Event::TreasureCollected { .. }
        | Event::SideRoomDiscovered { .. } => tracing::trace!(?event, "event"),
    }
}

fn submit(args: &Args, name: &str, score: u32) -> Result<()> {
    let mut board = LocalLeaderboard::load(&args.leaderboard)?;
    match board.submit(name, score) {
        Verdict::Ranked(rank) => println!("{name} placed #{rank} with {score} points"),
        Verdict::NotQualified => println!(
            "{score} points did not reach the top {}",
            leaderboard::CAPACITY
        ),
    }
    for (index, entry) in board.entries().iter().enumerate() {
        println!("{:>2}. {:<16} {}", index + 1, entry.name, entry.score);
    }
    board.save(&args.leaderboard)
}
