use crate::common::{EventEnvelope, EventStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;

/// File-backed walk journal.
///
/// Each walker gets its own JSON Lines file (`<walker_id>.jsonl`) under
/// `base_path`, one envelope per line. Stream lengths are read from disk the
/// first time a walker is appended to and tracked in memory afterwards, so
/// other writers must not append to the same files.
pub struct FileEventStore {
    base_path: PathBuf,
    versions: Mutex<HashMap<String, u64>>,
}

impl FileEventStore {
    pub fn new<P: Into<PathBuf>>(base_path: P) -> Self {
        Self {
            base_path: base_path.into(),
            versions: Mutex::new(HashMap::new()),
        }
    }

    fn get_file_path(&self, aggregate_id: &str) -> PathBuf {
        self.base_path.join(format!("{}.jsonl", aggregate_id))
    }

    async fn ensure_base_dir(&self) -> Result<(), String> {
        tokio::fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| format!("Failed to create event store directory: {}", e))
    }

    async fn read_lines(&self, aggregate_id: &str) -> Result<Vec<String>, String> {
        let file_path = self.get_file_path(aggregate_id);

        if !file_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&file_path)
            .await
            .map_err(|e| format!("Failed to open event file {}: {}", file_path.display(), e))?;

        let mut lines = BufReader::new(file).lines();
        let mut out = Vec::new();
        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| format!("Failed to read line: {}", e))?
        {
            if !line.trim().is_empty() {
                out.push(line);
            }
        }
        Ok(out)
    }

    async fn write_events(
        &self,
        aggregate_id: &str,
        events: Vec<EventEnvelope>,
    ) -> Result<(), String> {
        let file_path = self.get_file_path(aggregate_id);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)
            .await
            .map_err(|e| format!("Failed to open event file {}: {}", file_path.display(), e))?;

        for event in events {
            let mut json_line = serde_json::to_string(&event)
                .map_err(|e| format!("Failed to serialize event: {}", e))?;
            json_line.push('\n');

            file.write_all(json_line.as_bytes())
                .await
                .map_err(|e| format!("Failed to write event: {}", e))?;
        }

        file.flush()
            .await
            .map_err(|e| format!("Failed to flush file: {}", e))
    }
}

#[async_trait]
impl EventStore for FileEventStore {
    async fn append_events(
        &self,
        aggregate_id: &str,
        expected_version: u64,
        events: Vec<EventEnvelope>,
    ) -> Result<(), String> {
        let mut versions = self.versions.lock().await;

        let current_version = match versions.get(aggregate_id) {
            Some(version) => *version,
            None => {
                self.ensure_base_dir().await?;
                let seeded = self.read_lines(aggregate_id).await?.len() as u64;
                versions.insert(aggregate_id.to_string(), seeded);
                seeded
            }
        };
        if current_version != expected_version {
            return Err(format!(
                "Version mismatch: expected {}, got {}",
                expected_version, current_version
            ));
        }

        let appended = events.len() as u64;
        match self.write_events(aggregate_id, events).await {
            Ok(()) => {
                versions.insert(aggregate_id.to_string(), current_version + appended);
                Ok(())
            }
            Err(e) => {
                // a partial write leaves the length unknown; reread it next time
                versions.remove(aggregate_id);
                Err(e)
            }
        }
    }

    async fn load_events(
        &self,
        aggregate_id: &str,
        from_version: u64,
    ) -> Result<Vec<EventEnvelope>, String> {
        self.read_lines(aggregate_id)
            .await?
            .iter()
            .enumerate()
            .skip(from_version as usize)
            .map(|(line_number, line)| {
                serde_json::from_str(line).map_err(|e| {
                    format!(
                        "Failed to deserialize event at line {}: {}",
                        line_number + 1,
                        e
                    )
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::EventMetadata;
    use chrono::Utc;
    use tempfile::TempDir;
    use uuid::Uuid;

    fn envelope(aggregate_id: &str) -> EventEnvelope {
        EventEnvelope {
            event_id: Uuid::new_v4(),
            aggregate_id: aggregate_id.to_string(),
            aggregate_type: "Walker".to_string(),
            event_type: "Stepped".to_string(),
            event_version: 1,
            event_data: serde_json::json!({"test": "data"}),
            metadata: EventMetadata::from_source("test"),
            occurred_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_file_event_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileEventStore::new(temp_dir.path().join("events"));

        let first = envelope("walker-1");
        let second = envelope("walker-1");

        store
            .append_events("walker-1", 0, vec![first.clone()])
            .await
            .unwrap();
        store
            .append_events("walker-1", 1, vec![second.clone()])
            .await
            .unwrap();

        let loaded = store.load_events("walker-1", 0).await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].event_id, first.event_id);
        assert_eq!(loaded[1].event_id, second.event_id);

        let tail = store.load_events("walker-1", 1).await.unwrap();
        assert_eq!(tail.len(), 1);
        assert_eq!(tail[0].event_id, second.event_id);

        assert!(store.load_events("unknown", 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_file_event_store_rejects_stale_version() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileEventStore::new(temp_dir.path());

        store
            .append_events("walker-1", 0, vec![envelope("walker-1")])
            .await
            .unwrap();

        let err = store
            .append_events("walker-1", 0, vec![envelope("walker-1")])
            .await
            .unwrap_err();
        assert!(err.contains("Version mismatch"));
    }

    #[tokio::test]
    async fn test_file_event_store_tracks_length_after_first_append() {
        let temp_dir = TempDir::new().unwrap();

        let first = FileEventStore::new(temp_dir.path());
        first
            .append_events(
                "walker-1",
                0,
                vec![envelope("walker-1"), envelope("walker-1")],
            )
            .await
            .unwrap();

        // a fresh store seeds its length from the existing file
        let second = FileEventStore::new(temp_dir.path());
        assert!(second
            .append_events("walker-1", 0, vec![envelope("walker-1")])
            .await
            .is_err());
        second
            .append_events("walker-1", 2, vec![envelope("walker-1")])
            .await
            .unwrap();

        // later appends use the tracked length instead of rereading the file
        std::fs::write(temp_dir.path().join("walker-1.jsonl"), "").unwrap();
        for version in 3..50 {
            second
                .append_events("walker-1", version, vec![envelope("walker-1")])
                .await
                .unwrap();
        }
        assert_eq!(second.load_events("walker-1", 0).await.unwrap().len(), 47);
    }
}
