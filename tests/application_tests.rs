use lattice_walk::adapters::inbound::{InMemoryEventStore, ScriptedTickSource};
use async_trait::async_trait;
use lattice_walk::adapters::outbound::{init_noop_logger, InMemoryPathSink, PublishedPath};
use lattice_walk::application::{load_walker, SimulationRunner, WalkSession};
use lattice_walk::common::{ApplicationError, DomainError, DomainResult, EventStore};
use lattice_walk::domains::walker::*;
use std::sync::{Arc, Mutex};

/// Keeps a copy of every published path so tests can inspect each step.
#[derive(Default)]
struct RecordingSink {
    published: Mutex<Vec<PublishedPath>>,
}

impl RecordingSink {
    fn published(&self) -> Vec<PublishedPath> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl PathSink for RecordingSink {
    async fn publish(&self, walker_id: &str, path: &[Position]) -> DomainResult<()> {
        self.published.lock().unwrap().push(PublishedPath {
            walker_id: walker_id.to_string(),
            points: path.to_vec(),
        });
        Ok(())
    }
}

fn scripted_session(directions: Vec<Direction>) -> WalkSession {
    WalkSession::with_directions(Box::new(ScriptedDirections::new(directions)))
}

#[test]
fn test_step_before_reset_is_rejected() {
    let mut session = WalkSession::new();

    assert!(!session.is_active());
    assert!(matches!(
        session.step(),
        Err(DomainError::WalkerNotInitialized)
    ));
    assert!(matches!(
        session.invoke(false),
        Err(DomainError::WalkerNotInitialized)
    ));
    assert!(session.walker().is_none());
}

#[test]
fn test_invoke_follows_host_contract() {
    let mut session = scripted_session(vec![
        Direction::PositiveX,
        Direction::PositiveX,
        Direction::NegativeY,
    ]);

    assert_eq!(session.invoke(true).unwrap(), None);
    assert!(session.is_active());

    session.invoke(false).unwrap();
    session.invoke(false).unwrap();
    let path = session.invoke(false).unwrap().map(|p| p.to_vec());

    assert_eq!(
        path,
        Some(vec![
            Position::new(1, 0),
            Position::new(2, 0),
            Position::new(2, -1)
        ])
    );
    assert_eq!(
        session.walker().map(|w| w.position),
        Some(Position::new(2, -1))
    );
}

#[test]
fn test_reset_discards_previous_walk() {
    let mut session = WalkSession::new();

    let first_id = session.reset().id.clone();
    for _ in 0..10 {
        session.step().unwrap();
    }

    let second = session.reset();
    assert_ne!(second.id, first_id);
    assert_eq!(second.position, Position::ORIGIN);
    assert!(second.history.is_empty());

    let third_id = session.reset().id.clone();
    assert_ne!(third_id, first_id);
    let walker = session.walker().unwrap();
    assert!(walker.history.is_empty());
    assert_eq!(walker.position, Position::ORIGIN);
}

#[test]
fn test_take_events_drains_once() {
    let mut session = WalkSession::new();
    assert!(session.take_events().is_empty());

    session.reset();
    session.step().unwrap();

    let events = session.take_events();
    assert_eq!(events.len(), 2);
    assert!(session.take_events().is_empty());
}

#[tokio::test]
async fn test_runner_publishes_path_after_each_step() {
    let sink = Arc::new(RecordingSink::default());
    let session = scripted_session(vec![
        Direction::PositiveX,
        Direction::PositiveX,
        Direction::NegativeY,
    ]);
    let mut runner = SimulationRunner::new(session, sink.clone(), init_noop_logger());
    let mut ticks = ScriptedTickSource::from_resets([true, false, false, false]);

    let summary = runner.run(&mut ticks).await.unwrap();

    assert_eq!(summary.resets, 1);
    assert_eq!(summary.steps, 3);
    assert_eq!(summary.path_len, 3);
    assert_eq!(summary.displacement, 3);

    let published = sink.published();
    assert_eq!(published.len(), 3);
    assert_eq!(published[0].points, vec![Position::new(1, 0)]);
    assert_eq!(
        published[2].points,
        vec![Position::new(1, 0), Position::new(2, 0), Position::new(2, -1)]
    );
    assert_eq!(Some(published[2].walker_id.clone()), summary.walker_id);
    assert_eq!(runner.projection().path, published[2].points);
}

#[tokio::test]
async fn test_runner_aborts_on_tick_before_reset() {
    let sink = Arc::new(InMemoryPathSink::new());
    let mut runner = SimulationRunner::new(WalkSession::new(), sink.clone(), init_noop_logger());
    let mut ticks = ScriptedTickSource::new(vec![Signal::Tick, Signal::Reset]);

    let result = runner.run(&mut ticks).await;

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::WalkerNotInitialized))
    ));
    assert_eq!(sink.publish_count(), 0);
    assert!(sink.latest().await.is_none());
    assert_eq!(ticks.remaining(), 1);
}

#[tokio::test]
async fn test_runner_reset_midway_starts_new_path() {
    let sink = Arc::new(RecordingSink::default());
    let session = scripted_session(vec![Direction::PositiveY]);
    let mut runner = SimulationRunner::new(session, sink.clone(), init_noop_logger());
    let mut ticks = ScriptedTickSource::new(vec![
        Signal::Reset,
        Signal::Tick,
        Signal::Tick,
        Signal::Reset,
        Signal::Tick,
    ]);

    let summary = runner.run(&mut ticks).await.unwrap();

    assert_eq!(summary.resets, 2);
    assert_eq!(summary.steps, 3);
    assert_eq!(summary.path_len, 1);

    let published = sink.published();
    assert_eq!(published.len(), 3);
    assert_ne!(published[1].walker_id, published[2].walker_id);
    assert_eq!(published[2].points, vec![Position::new(0, 1)]);
}

#[tokio::test]
async fn test_in_memory_sink_keeps_only_latest_path() {
    let sink = Arc::new(InMemoryPathSink::new());
    let session = WalkSession::with_directions(Box::new(RandomDirections::seeded(8)));
    let mut runner = SimulationRunner::new(session, sink.clone(), init_noop_logger());
    let mut ticks = ScriptedTickSource::from_resets(
        std::iter::once(true).chain(std::iter::repeat(false).take(2_000)),
    );

    let summary = runner.run(&mut ticks).await.unwrap();

    let latest = sink.latest().await.unwrap();
    assert_eq!(sink.publish_count(), 2_000);
    assert_eq!(latest.points.len(), 2_000);
    assert_eq!(Some(latest.walker_id), summary.walker_id);
    assert_eq!(latest.points, runner.session().walker().unwrap().history);

    sink.publish("other", &[Position::new(0, 1)]).await.unwrap();
    let replaced = sink.latest().await.unwrap();
    assert_eq!(replaced.walker_id, "other");
    assert_eq!(replaced.points, vec![Position::new(0, 1)]);
}

#[tokio::test]
async fn test_journaled_walk_replays_identically() {
    let journal = Arc::new(InMemoryEventStore::new());
    let sink = Arc::new(InMemoryPathSink::new());
    let session = WalkSession::with_directions(Box::new(RandomDirections::seeded(11)));
    let mut runner = SimulationRunner::new(session, sink, init_noop_logger())
        .with_journal(journal.clone() as Arc<dyn EventStore>);

    let mut signals = vec![Signal::Reset];
    signals.extend(std::iter::repeat(Signal::Tick).take(40));
    let summary = runner.run(&mut ScriptedTickSource::new(signals)).await.unwrap();

    let walker_id = summary.walker_id.unwrap();
    assert_eq!(journal.walker_ids().await, vec![walker_id.clone()]);
    assert_eq!(journal.load_events(&walker_id, 0).await.unwrap().len(), 41);

    let replayed = load_walker(journal.as_ref(), &walker_id).await.unwrap();
    let live = runner.session().walker().unwrap();
    assert_eq!(replayed.history, live.history);
    assert_eq!(replayed.position, live.position);

    let mut resumed = WalkSession::with_directions(Box::new(ScriptedDirections::new(vec![
        Direction::NegativeX,
    ])));
    resumed.resume(replayed);
    let path = resumed.step().unwrap();
    assert_eq!(path.len(), 41);
    assert_eq!(path[40], live.position.moved(Direction::NegativeX));
}

#[tokio::test]
async fn test_load_walker_without_events_fails() {
    let journal = InMemoryEventStore::new();
    let result = load_walker(&journal, "missing").await;
    assert!(matches!(result, Err(ApplicationError::EventStore(_))));
}
