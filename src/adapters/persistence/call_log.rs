//! Implements CallLogPort. Appends screened calls as JSON Lines (JSONL).
//! One file per day: calls/{YYYYMMDD}.jsonl. Append-only writes.

use crate::domain::{CallRecord, DomainError};
use crate::ports::CallLogPort;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;

/// File-system call log. One JSONL file per day (one JSON object per line).
pub struct CallLog {
    base_dir: std::path::PathBuf,
}

impl CallLog {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    fn day_path(&self) -> std::path::PathBuf {
        let day = chrono::Utc::now().format("%Y%m%d");
        self.base_dir.join(format!("{}.jsonl", day))
    }
}

#[async_trait::async_trait]
impl CallLogPort for CallLog {
    /// Appends the record as one JSON object per line. Does not read the
    /// existing file.
    async fn append(&self, record: &CallRecord) -> Result<(), DomainError> {
        fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        let path = self.day_path();
        let mut f = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        let line = serde_json::to_string(record).map_err(|e| DomainError::Repo(e.to_string()))?;
        f.write_all(line.as_bytes())
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        f.write_all(b"\n")
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        f.flush()
            .await
            .map_err(|e| DomainError::Repo(e.to_string()))?;
        info!(
            path = %path.display(),
            call_id = %record.call_id,
            "appended call record (JSONL)"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CallStatus;

    fn record(call_id: &str) -> CallRecord {
        CallRecord {
            call_id: call_id.to_string(),
            caller_number: "+15550001111".to_string(),
            started_at: 1_700_000_000,
            status: CallStatus::Blocked,
            transcripts: Vec::new(),
            reason: Some("test".to_string()),
        }
    }

    #[tokio::test]
    async fn append_writes_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let log = CallLog::new(dir.path());

        log.append(&record("call_1")).await.unwrap();
        log.append(&record("call_2")).await.unwrap();

        let path = log.day_path();
        let content = tokio::fs::read_to_string(&path).await.unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: CallRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.call_id, "call_1");
        assert_eq!(first.status, CallStatus::Blocked);
    }
}
