use super::direction::{Direction, DirectionSource};
use super::events::WalkerEvent;
use crate::common::{AggregateRoot, DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A point on the unbounded integer lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn moved(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn manhattan_distance(self, other: Position) -> u64 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl From<(i64, i64)> for Position {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Walker {
    pub id: String,
    pub position: Position,
    /// Positions reached by each step, in order. The origin is not recorded.
    pub history: Vec<Position>,
    pub version: u64,
    #[serde(skip)]
    uncommitted_events: Vec<WalkerEvent>,
}

impl Walker {
    /// Starts a new walk at the origin under a fresh id.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4().to_string())
    }

    pub fn with_id(id: String) -> Self {
        let mut walker = Self::blank(id.clone());
        walker.version += 1;

        let event = WalkerEvent::WalkerReset {
            walker_id: id,
            origin: Position::ORIGIN,
            timestamp: chrono::Utc::now(),
        };

        walker.add_event(event);
        walker
    }

    /// An empty aggregate with no events applied, used as the base for replay.
    pub fn blank(id: String) -> Self {
        Self {
            id,
            position: Position::ORIGIN,
            history: Vec::new(),
            version: 0,
            uncommitted_events: Vec::new(),
        }
    }

    /// Moves one unit in a direction drawn from `directions` and returns the
    /// full path so far.
    pub fn step(&mut self, directions: &mut dyn DirectionSource) -> &[Position] {
        let direction = directions.next_direction();
        let position = self.position.moved(direction);
        self.advance(position);

        let event = WalkerEvent::Stepped {
            walker_id: self.id.clone(),
            direction,
            position,
            step: self.history.len() as u64,
            timestamp: chrono::Utc::now(),
        };

        self.add_event(event);
        &self.history
    }

    pub fn path(&self) -> &[Position] {
        &self.history
    }

    pub fn steps_taken(&self) -> usize {
        self.history.len()
    }

    fn advance(&mut self, position: Position) {
        self.position = position;
        self.history.push(position);
        self.version += 1;
    }
}

impl Default for Walker {
    fn default() -> Self {
        Self::new()
    }
}

impl AggregateRoot for Walker {
    type Event = WalkerEvent;

    fn aggregate_id(&self) -> &str {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) -> DomainResult<()> {
        match event {
            WalkerEvent::WalkerReset {
                walker_id, origin, ..
            } => {
                if *origin != Position::ORIGIN {
                    return Err(DomainError::InvalidEvent {
                        reason: format!("walker must reset to the origin, got {:?}", origin),
                    });
                }
                self.id = walker_id.clone();
                self.position = Position::ORIGIN;
                self.history.clear();
                self.version += 1;
            }
            WalkerEvent::Stepped {
                walker_id,
                direction,
                position,
                step,
                ..
            } => {
                if *walker_id != self.id {
                    return Err(DomainError::InvalidEvent {
                        reason: format!(
                            "step {} belongs to walker {}, not {}",
                            step, walker_id, self.id
                        ),
                    });
                }
                let expected_step = self.history.len() as u64 + 1;
                if *step != expected_step {
                    return Err(DomainError::InvalidEvent {
                        reason: format!("expected step {}, got {}", expected_step, step),
                    });
                }
                if self.position.moved(*direction) != *position {
                    return Err(DomainError::InvalidEvent {
                        reason: format!(
                            "step {} moves {:?} from {:?} but records {:?}",
                            step, direction, self.position, position
                        ),
                    });
                }
                self.advance(*position);
            }
        }
        Ok(())
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn mark_events_as_committed(&mut self) {
        self.uncommitted_events.clear();
    }

    fn add_event(&mut self, event: Self::Event) {
        self.uncommitted_events.push(event);
    }
}
