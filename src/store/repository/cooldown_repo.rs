//! Per-keyword trigger log with cooldown gating.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use dashmap::DashMap;
use tracing::info;

use crate::store::json::JsonFile;

/// Result of a cooldown check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Clear,
    /// Seconds left until the keyword may fire again.
    Wait(i64),
}

/// Keyword -> last-trigger unix time, kept lock-free in memory and written
/// through to disk so cooldowns survive restarts.
pub struct CooldownRepo {
    file: JsonFile<HashMap<String, i64>>,
    map: DashMap<String, i64>,
}

impl CooldownRepo {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let file: JsonFile<HashMap<String, i64>> = JsonFile::new(path);
        let map: DashMap<String, i64> = file.load_or_default().into_iter().collect();
        info!("Trigger log loaded: {} entr(ies)", map.len());
        Self { file, map }
    }

    /// Check whether a keyword may fire. The plugin owner always may.
    pub fn check(&self, keyword: &str, cooldown_secs: i64, is_owner: bool, now: i64) -> Gate {
        if is_owner {
            return Gate::Clear;
        }

        match self.map.get(keyword) {
            Some(last) => {
                let elapsed = now - *last;
                if elapsed < cooldown_secs {
                    Gate::Wait(cooldown_secs - elapsed)
                } else {
                    Gate::Clear
                }
            }
            None => Gate::Clear,
        }
    }

    pub fn record(&self, keyword: &str, now: i64) -> Result<()> {
        self.map.insert(keyword.to_string(), now);
        self.persist()
    }

    /// Forget a keyword, e.g. when its rule is deleted.
    pub fn clear(&self, keyword: &str) -> Result<()> {
        if self.map.remove(keyword).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        let snapshot: HashMap<String, i64> = self
            .map
            .iter()
            .map(|e| (e.key().clone(), *e.value()))
            .collect();
        self.file.save(&snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> (tempfile::TempDir, CooldownRepo) {
        let dir = tempfile::tempdir().unwrap();
        let repo = CooldownRepo::open(dir.path().join("log.json"));
        (dir, repo)
    }

    #[test]
    fn test_unseen_keyword_is_clear() {
        let (_dir, repo) = repo();
        assert_eq!(repo.check("lily", 3600, false, 1_000), Gate::Clear);
    }

    #[test]
    fn test_cooldown_window_and_wait_time() {
        let (_dir, repo) = repo();
        repo.record("lily", 1_000).unwrap();

        assert_eq!(repo.check("lily", 3600, false, 1_001), Gate::Wait(3599));
        assert_eq!(repo.check("lily", 3600, false, 1_000 + 3599), Gate::Wait(1));
        assert_eq!(repo.check("lily", 3600, false, 1_000 + 3600), Gate::Clear);
    }

    #[test]
    fn test_owner_bypasses_cooldown() {
        let (_dir, repo) = repo();
        repo.record("lily", 1_000).unwrap();
        assert_eq!(repo.check("lily", 3600, true, 1_001), Gate::Clear);
    }

    #[test]
    fn test_keywords_are_independent() {
        let (_dir, repo) = repo();
        repo.record("lily", 1_000).unwrap();
        assert_eq!(repo.check("rose", 3600, false, 1_001), Gate::Clear);
    }

    #[test]
    fn test_log_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.json");

        {
            let repo = CooldownRepo::open(&path);
            repo.record("lily", 1_000).unwrap();
        }

        let repo = CooldownRepo::open(&path);
        assert_eq!(repo.check("lily", 3600, false, 1_001), Gate::Wait(3599));

        repo.clear("lily").unwrap();
        let repo = CooldownRepo::open(&path);
        assert_eq!(repo.check("lily", 3600, false, 1_001), Gate::Clear);
    }
}
