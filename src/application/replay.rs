use crate::common::{replay_aggregate, ApplicationError, ApplicationResult, DomainError, EventStore};
use crate::domains::walker::{Walker, WalkerEvent};

/// Rebuilds a walker from its journaled events.
pub async fn load_walker(store: &dyn EventStore, walker_id: &str) -> ApplicationResult<Walker> {
    let envelopes = store
        .load_events(walker_id, 0)
        .await
        .map_err(ApplicationError::EventStore)?;

    if envelopes.is_empty() {
        return Err(ApplicationError::EventStore(format!(
            "No events found for walker {}",
            walker_id
        )));
    }

    let events = envelopes
        .iter()
        .map(|envelope| envelope.decode::<WalkerEvent>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(DomainError::from)?;

    Ok(replay_aggregate(Walker::blank(walker_id.to_string()), events)?)
}
