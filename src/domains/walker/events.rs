use super::aggregate::Position;
use super::direction::Direction;
use crate::common::DomainEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WalkerEvent {
    WalkerReset {
        walker_id: String,
        origin: Position,
        timestamp: DateTime<Utc>,
    },
    Stepped {
        walker_id: String,
        direction: Direction,
        position: Position,
        /// 1-based index of this step within the walk.
        step: u64,
        timestamp: DateTime<Utc>,
    },
}

impl DomainEvent for WalkerEvent {
    fn event_type(&self) -> &'static str {
        match self {
            WalkerEvent::WalkerReset { .. } => "WalkerReset",
            WalkerEvent::Stepped { .. } => "Stepped",
        }
    }

    fn aggregate_id(&self) -> &str {
        match self {
            WalkerEvent::WalkerReset { walker_id, .. } => walker_id,
            WalkerEvent::Stepped { walker_id, .. } => walker_id,
        }
    }

    fn event_version(&self) -> u64 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            WalkerEvent::WalkerReset { timestamp, .. } => *timestamp,
            WalkerEvent::Stepped { timestamp, .. } => *timestamp,
        }
    }
}
