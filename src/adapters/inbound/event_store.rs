use crate::common::{EventEnvelope, EventStore};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory walk journal for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    events: RwLock<HashMap<String, Vec<EventEnvelope>>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self {
            events: RwLock::new(HashMap::new()),
        }
    }

    /// Ids of every walker with at least one journaled event.
    pub async fn walker_ids(&self) -> Vec<String> {
        let store = self.events.read().await;
        let mut ids: Vec<String> = store.keys().cloned().collect();
        ids.sort();
        ids
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn append_events(
        &self,
        aggregate_id: &str,
        expected_version: u64,
        events: Vec<EventEnvelope>,
    ) -> Result<(), String> {
        let mut store = self.events.write().await;

        let aggregate_events = store.entry(aggregate_id.to_string()).or_default();

        let current_version = aggregate_events.len() as u64;
        if current_version != expected_version {
            return Err(format!(
                "Version mismatch: expected {}, got {}",
                expected_version, current_version
            ));
        }

        aggregate_events.extend(events);
        Ok(())
    }

    async fn load_events(
        &self,
        aggregate_id: &str,
        from_version: u64,
    ) -> Result<Vec<EventEnvelope>, String> {
        let store = self.events.read().await;

        Ok(store
            .get(aggregate_id)
            .map(|events| events.iter().skip(from_version as usize).cloned().collect())
            .unwrap_or_default())
    }
}
