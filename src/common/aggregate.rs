use crate::common::{DomainEvent, DomainResult};
use serde::{Deserialize, Serialize};

pub trait AggregateRoot: Send + Sync + Clone {
    type Event: DomainEvent + Serialize + for<'de> Deserialize<'de>;

    fn aggregate_id(&self) -> &str;
    fn version(&self) -> u64;

    /// Apply an event to update the aggregate state
    fn apply(&mut self, event: &Self::Event) -> DomainResult<()>;

    /// Get uncommitted events
    fn uncommitted_events(&self) -> &[Self::Event];

    /// Mark events as committed
    fn mark_events_as_committed(&mut self);

    /// Add a new event to the uncommitted events list
    fn add_event(&mut self, event: Self::Event);
}

/// Rebuilds an aggregate by applying its stored events in order, stopping at
/// the first event the aggregate rejects.
pub fn replay_aggregate<T: AggregateRoot>(mut aggregate: T, events: Vec<T::Event>) -> DomainResult<T> {
    for event in &events {
        aggregate.apply(event)?;
    }
    Ok(aggregate)
}
