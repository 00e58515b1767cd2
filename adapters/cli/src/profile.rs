use std::{fs, io::ErrorKind, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Player details kept between runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Profile {
    pub(crate) name: String,
}

impl Profile {
    /// Reads the profile, returning `None` when none was saved yet.
    pub(crate) fn load(path: &Path) -> Result<Option<Self>> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("failed to read profile at {}", path.display()))
            }
        };
        let profile = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse profile at {}", path.display()))?;
        Ok(Some(profile))
    }

    /// Writes the profile, replacing any previous one.
    pub(crate) fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to encode profile")?;
        fs::write(path, json)
            .with_context(|| format!("failed to write profile at {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_profile_is_none() {
        let directory = tempfile::tempdir().expect("temp dir");
        let path = directory.path().join("profile.json");
        assert_eq!(Profile::load(&path).expect("load"), None);
    }

    #[test]
    fn saved_name_is_restored() {
        let directory = tempfile::tempdir().expect("temp dir");
        let path = directory.path().join("profile.json");
        let profile = Profile {
            name: "Moana".to_owned(),
        };
        profile.save(&path).expect("save");
        assert_eq!(Profile::load(&path).expect("load"), Some(profile));

        let raw = fs::read_to_string(&path).expect("read");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(value["name"], "Moana");
    }

    #[test]
    fn corrupt_profile_is_an_error() {
        let directory = tempfile::tempdir().expect("temp dir");
        let path = directory.path().join("profile.json");
        fs::write(&path, "{ name: ").expect("write");
        let error = Profile::load(&path).expect_err("corrupt");
        assert!(format!("{error:#}").contains("failed to parse profile"));
    }
}
