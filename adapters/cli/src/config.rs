use std::{fs, path::Path};

use anyhow::{Context, Result};
use migration_core::Tuning;

/// Loads tuning from a TOML file, or defaults when no file is named.
pub(crate) fn load_tuning(path: Option<&Path>) -> Result<Tuning> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read tuning file at {}", path.display()))?;
    parse_tuning(&contents)
        .with_context(|| format!("failed to parse tuning file at {}", path.display()))
}

fn parse_tuning(contents: &str) -> Result<Tuning> {
    let tuning: Tuning = toml::from_str(contents).context("invalid tuning toml")?;
    anyhow::ensure!(tuning.session.tick_rate > 0, "session.tick_rate must be positive");
    anyhow::ensure!(
        tuning.player.starting_health <= tuning.player.max_health_ceiling,
        "player.starting_health exceeds player.max_health_ceiling"
    );
    Ok(tuning)
}
