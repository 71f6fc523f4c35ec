use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{self, Error as SerdeError};

use crate::models::countdown::CountdownSnapshot;

/// Read the saved snapshot. `Ok(None)` means nothing has been saved yet.
pub fn load_snapshot(path: &Path) -> Result<Option<CountdownSnapshot>> {
    if !path.exists() {
        return Ok(None);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read countdown from {}", path.display()))?;
    let snapshot = serde_json::from_str(&data).map_err(|err| map_deser_error(err, path))?;
    Ok(Some(snapshot))
}

pub fn save_snapshot(path: &Path, snapshot: &CountdownSnapshot) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create dir {}", parent.display()))?;
    }

    let data = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, data)
        .with_context(|| format!("failed to write countdown to {}", path.display()))?;
    Ok(())
}

fn map_deser_error(err: SerdeError, path: &Path) -> anyhow::Error {
    anyhow::Error::new(err).context(format!(
        "failed to deserialize countdown from {}",
        path.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempdir().unwrap();
        let loaded = load_snapshot(&dir.path().join("countdown.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn save_creates_parent_dirs_and_reloads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("countdown.json");
        let snapshot = CountdownSnapshot {
            event_name: "Wedding".to_string(),
            ..CountdownSnapshot::default()
        };

        save_snapshot(&path, &snapshot).unwrap();
        assert_eq!(load_snapshot(&path).unwrap(), Some(snapshot));
    }

    #[test]
    fn corrupt_file_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("countdown.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_snapshot(&path).unwrap_err();
        assert!(format!("{err:#}").contains("failed to deserialize countdown"));
    }
}
