//! Implements PatternStorePort. Persists index documents as one JSON file.
//!
//! Uses the same write-replace pattern as StateJson so a crash mid-save
//! never leaves a truncated store.

use crate::domain::{DomainError, ScamPattern};
use crate::ports::PatternStorePort;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;

#[derive(Debug, Serialize, Deserialize)]
struct StoreData {
    /// Unix timestamp of the last save.
    updated_at: i64,
    patterns: Vec<ScamPattern>,
}

/// JSON file-based pattern store.
pub struct PatternStore {
    path: std::path::PathBuf,
}

impl PatternStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait::async_trait]
impl PatternStorePort for PatternStore {
    async fn load(&self) -> Result<Vec<ScamPattern>, DomainError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(DomainError::Repo(e.to_string())),
        };
        let data: StoreData =
            serde_json::from_str(&raw).map_err(|e| DomainError::Repo(e.to_string()))?;
        info!(
            path = %self.path.display(),
            count = data.patterns.len(),
            "loaded pattern store"
        );
        Ok(data.patterns)
    }

    async fn save(&self, patterns: &[ScamPattern]) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Repo(e.to_string()))?;
        }
        let data = StoreData {
            updated_at: chrono::Utc::now().timestamp(),
            patterns: patterns.to_vec(),
        };
        let json =
            serde_json::to_string_pretty(&data).map_err(|e| DomainError::Repo(e.to_string()))?;

        let temp_path = self.path.with_extension("json.tmp");
        let mut f = fs::File::create(&temp_path)
            .await
            .map_err(|e| DomainError::Repo(format!("create temp file: {}", e)))?;
        f.write_all(json.as_bytes())
            .await
            .map_err(|e| DomainError::Repo(format!("write temp file: {}", e)))?;
        f.sync_all()
            .await
            .map_err(|e| DomainError::Repo(format!("sync temp file: {}", e)))?;
        drop(f);

        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DomainError::Repo(format!("atomic rename failed: {}", e)))?;

        info!(
            path = %self.path.display(),
            count = patterns.len(),
            "saved pattern store"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PatternSource, ScamType, UrgencyLevel};

    #[tokio::test]
    async fn missing_store_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = PatternStore::new(dir.path().join("patterns.json"));
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = PatternStore::new(dir.path().join("patterns.json"));

        let patterns = vec![ScamPattern {
            text: "gift card".to_string(),
            weight: 0.7,
            scam_type: ScamType::GeneralFraud,
            urgency: UrgencyLevel::High,
            source: PatternSource::SeedPhrase,
            elderly_specific: true,
            article_id: None,
            region: None,
        }];
        store.save(&patterns).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].text, "gift card");
        assert_eq!(loaded[0].urgency, UrgencyLevel::High);
    }
}
