//! Implements CollectionStatePort using a JSON file.
//!
//! Tracks last collection timestamp per feed source for incremental runs.

use crate::domain::DomainError;
use crate::ports::CollectionStatePort;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// State: feed source -> last collection unix timestamp
#[derive(Debug, Default, Serialize, Deserialize)]
struct StateData {
    last_collected: HashMap<String, i64>,
}

/// JSON file-based state storage.
pub struct StateJson {
    path: std::path::PathBuf,
    cache: tokio::sync::RwLock<StateData>,
}

impl StateJson {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cache: tokio::sync::RwLock::new(StateData::default()),
        }
    }

    /// Load state from disk. Call after construction or when path changes.
    pub async fn load(&self) -> Result<(), DomainError> {
        let data = match fs::read_to_string(&self.path).await {
            Ok(s) => serde_json::from_str(&s).unwrap_or_default(),
            Err(_) => StateData::default(),
        };
        *self.cache.write().await = data;
        Ok(())
    }

    /// Atomic save using write-replace:
    /// 1. Write to temp file
    /// 2. sync_all() to ensure flush to disk
    /// 3. Atomic rename to target path
    async fn save(&self) -> Result<(), DomainError> {
        let data = self.cache.read().await;
        let json =
            serde_json::to_string_pretty(&*data).map_err(|e| DomainError::State(e.to_string()))?;

        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::State(format!("create temp file: {}", e)))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| DomainError::State(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::State(format!("sync temp file: {}", e)))?;
        drop(f);

        // Atomic on POSIX; replaces the target in one operation
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::State(format!("atomic rename failed: {}", e)))?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl CollectionStatePort for StateJson {
    async fn last_collected(&self, source: &str) -> Result<i64, DomainError> {
        let cache = self.cache.read().await;
        Ok(cache.last_collected.get(source).copied().unwrap_or(0))
    }

    async fn set_last_collected(&self, source: &str, timestamp: i64) -> Result<(), DomainError> {
        {
            let mut cache = self.cache.write().await;
            cache.last_collected.insert(source.to_string(), timestamp);
        }
        self.save().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_source_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        let state = StateJson::new(dir.path().join("state.json"));
        state.load().await.unwrap();
        assert_eq!(state.last_collected("newswire").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn state_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let state = StateJson::new(&path);
        state.load().await.unwrap();
        state.set_last_collected("trigger", 1_700_000_000).await.unwrap();

        let reloaded = StateJson::new(&path);
        reloaded.load().await.unwrap();
        assert_eq!(
            reloaded.last_collected("trigger").await.unwrap(),
            1_700_000_000
        );
    }
}
