use super::aggregate::Position;
use super::events::WalkerEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bounding box of the visited points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extent {
    pub min_x: i64,
    pub max_x: i64,
    pub min_y: i64,
    pub max_y: i64,
}

impl Extent {
    fn around(position: Position) -> Self {
        Self {
            min_x: position.x,
            max_x: position.x,
            min_y: position.y,
            max_y: position.y,
        }
    }

    fn include(&mut self, position: Position) {
        self.min_x = self.min_x.min(position.x);
        self.max_x = self.max_x.max(position.x);
        self.min_y = self.min_y.min(position.y);
        self.max_y = self.max_y.max(position.y);
    }
}

/// Read model of a walk for renderers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathProjection {
    pub walker_id: Option<String>,
    pub path: Vec<Position>,
    pub extent: Option<Extent>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl PathProjection {
    pub fn new() -> Self {
        Self {
            walker_id: None,
            path: Vec::new(),
            extent: None,
            last_updated: None,
        }
    }

    pub fn apply(&mut self, event: &WalkerEvent) {
        match event {
            WalkerEvent::WalkerReset {
                walker_id,
                timestamp,
                ..
            } => {
                self.walker_id = Some(walker_id.clone());
                self.path.clear();
                self.extent = None;
                self.last_updated = Some(*timestamp);
            }
            WalkerEvent::Stepped {
                position,
                timestamp,
                ..
            } => {
                self.path.push(*position);
                match self.extent.as_mut() {
                    Some(extent) => extent.include(*position),
                    None => self.extent = Some(Extent::around(*position)),
                }
                self.last_updated = Some(*timestamp);
            }
        }
    }

    /// Manhattan distance of the latest point from the origin.
    pub fn displacement(&self) -> u64 {
        self.path
            .last()
            .map(|p| p.manhattan_distance(Position::ORIGIN))
            .unwrap_or(0)
    }
}

impl Default for PathProjection {
    fn default() -> Self {
        Self::new()
    }
}
