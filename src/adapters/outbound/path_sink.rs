use crate::common::{DomainError, DomainResult};
use crate::domains::walker::{PathSink, Position};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// A path as handed to a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedPath {
    pub walker_id: String,
    pub points: Vec<Position>,
}

/// Keeps the most recent path in memory, replacing it on every publish.
#[derive(Debug, Default)]
pub struct InMemoryPathSink {
    latest: RwLock<Option<PublishedPath>>,
    publish_count: AtomicU64,
}

impl InMemoryPathSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn latest(&self) -> Option<PublishedPath> {
        self.latest.read().await.clone()
    }

    pub fn publish_count(&self) -> u64 {
        self.publish_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl PathSink for InMemoryPathSink {
    async fn publish(&self, walker_id: &str, path: &[Position]) -> DomainResult<()> {
        let mut latest = self.latest.write().await;
        match latest.as_mut() {
            Some(current) if current.walker_id == walker_id => {
                current.points.clear();
                current.points.extend_from_slice(path);
            }
            _ => {
                *latest = Some(PublishedPath {
                    walker_id: walker_id.to_string(),
                    points: path.to_vec(),
                });
            }
        }
        self.publish_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

/// Overwrites a JSON file with the latest path on every publish.
pub struct JsonFilePathSink {
    path: PathBuf,
}

impl JsonFilePathSink {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub async fn read(&self) -> DomainResult<PublishedPath> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            DomainError::InfrastructureError(format!(
                "Failed to read path file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[async_trait]
impl PathSink for JsonFilePathSink {
    async fn publish(&self, walker_id: &str, path: &[Position]) -> DomainResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::InfrastructureError(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let payload = PublishedPath {
            walker_id: walker_id.to_string(),
            points: path.to_vec(),
        };
        let json = serde_json::to_vec_pretty(&payload)?;

        tokio::fs::write(&self.path, json).await.map_err(|e| {
            DomainError::InfrastructureError(format!(
                "Failed to write path file {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}
