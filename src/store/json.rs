//! JSON file persistence for settings stores.
//!
//! Every store keeps its full state in memory and writes it back through
//! a `JsonFile` on each mutation.

use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::error;

/// A typed handle to one JSON settings file.
pub struct JsonFile<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T> JsonFile<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored value.
    ///
    /// A missing file yields the default. A corrupt or unreadable file is
    /// logged and also yields the default, so a bad config never stops the
    /// bot from starting.
    pub fn load_or_default(&self) -> T {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return T::default(),
            Err(e) => {
                error!("Failed to read {}: {}", self.path.display(), e);
                return T::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                error!("Failed to parse {}: {}", self.path.display(), e);
                T::default()
            }
        }
    }

    /// Persist the value.
    ///
    /// Writes to a sibling temp file first and renames it into place, so a
    /// crash mid-write never leaves a truncated settings file behind.
    pub fn save(&self, value: &T) -> Result<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }

        let raw = serde_json::to_string_pretty(value)?;
        let tmp = self.path.with_extension("tmp");

        fs::write(&tmp, raw).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_missing_file_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let file: JsonFile<HashMap<String, i64>> = JsonFile::new(dir.path().join("absent.json"));
        assert!(file.load_or_default().is_empty());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let file: JsonFile<HashMap<String, i64>> = JsonFile::new(dir.path().join("state.json"));

        let mut value = HashMap::new();
        value.insert("lily".to_string(), 1_700_000_000);
        file.save(&value).unwrap();

        assert_eq!(file.load_or_default(), value);
    }

    #[test]
    fn test_corrupt_file_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{not json").unwrap();

        let file: JsonFile<HashMap<String, i64>> = JsonFile::new(&path);
        assert!(file.load_or_default().is_empty());
    }

    #[test]
    fn test_save_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");
        let file: JsonFile<HashMap<String, i64>> = JsonFile::new(&path);

        file.save(&HashMap::from([("k".to_string(), 1)])).unwrap();
        assert!(path.exists());
    }
}
