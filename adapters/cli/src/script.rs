//! Plain-text input scripts for headless runs.
//!
//! One step per line: a tick count followed by an action, for example
//! `40 right` or `1 echo`. Blank lines and `#` comments are skipped.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use migration_system_input::Key;

/// Tour used when no script file is given: leave the nursery east, sound out
/// the shallows and open the chest.
pub(crate) const DEFAULT_SCRIPT: &str = "\
# title screen
1 pause
30 wait
# nursery to the shallows
96 right
48 up
300 right
60 wait
1 echo
# shallows chest
64 up
48 left
120 wait
1 slap
";

/// What the script does for a stretch of ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    /// Holds a key.
    Hold(Key),
    /// Leaves every key up.
    Wait,
}

/// One line of a script.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Step {
    pub(crate) ticks: u32,
    pub(crate) action: Action,
}

/// Reads and parses a script file.
pub(crate) fn load(path: &Path) -> Result<Vec<Step>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read input script at {}", path.display()))?;
    parse(&contents).with_context(|| format!("invalid input script {}", path.display()))
}

/// Parses script text.
pub(crate) fn parse(contents: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let number = index + 1;
        let mut fields = line.split_whitespace();
        let (Some(ticks), Some(action), None) = (fields.next(), fields.next(), fields.next())
        else {
            bail!("line {number}: expected `<ticks> <action>`, found `{line}`");
        };
        let ticks: u32 = ticks
            .parse()
            .with_context(|| format!("line {number}: `{ticks}` is not a tick count"))?;
        let action = parse_action(action)
            .with_context(|| format!("line {number}: unknown action `{action}`"))?;
        steps.push(Step { ticks, action });
    }
    Ok(steps)
}

fn parse_action(name: &str) -> Option<Action> {
    let key = match name.to_ascii_lowercase().as_str() {
        "wait" => return Some(Action::Wait),
        "up" => Key::Up,
        "down" => Key::Down,
        "left" => Key::Left,
        "right" => Key::Right,
        "echo" => Key::Echolocate,
        "slap" => Key::TailSlap,
        "pause" => Key::Pause,
        _ => return None,
    };
    Some(Action::Hold(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_script_parses() {
        let steps = parse(DEFAULT_SCRIPT).expect("built-in script");
        assert_eq!(
            steps.first(),
            Some(&Step {
                ticks: 1,
                action: Action::Hold(Key::Pause),
            })
        );
        assert!(steps.iter().all(|step| step.ticks > 0));
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let steps = parse("# intro\n\n  12 Wait \n3 slap\n").expect("valid");
        assert_eq!(
            steps,
            vec![
                Step {
                    ticks: 12,
                    action: Action::Wait,
                },
                Step {
                    ticks: 3,
                    action: Action::Hold(Key::TailSlap),
                },
            ]
        );
    }

    #[test]
    fn errors_name_the_line() {
        let error = parse("1 up\nfive down\n").expect_err("bad count");
        assert!(error.to_string().contains("line 2"));

        let error = parse("1 jump\n").expect_err("bad action");
        assert!(error.to_string().contains("jump"));

        assert!(parse("1 up left\n").is_err());
    }

    #[test]
    fn scripts_load_from_disk() {
        let directory = tempfile::tempdir().expect("temp dir");
        let path = directory.path().join("tour.txt");
        fs::write(&path, "2 down\n").expect("write");
        assert_eq!(
            load(&path).expect("load"),
            vec![Step {
                ticks: 2,
                action: Action::Hold(Key::Down),
            }]
        );
    }
}
