use crate::application::WalkSession;
use crate::common::{
    AggregateRoot, ApplicationError, ApplicationResult, DomainError, EventEnvelope, EventMetadata,
    EventStore,
};
use crate::domains::walker::{PathProjection, PathSink, Signal, TickSource};
use crate::domains::DynLogger;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info};

const AGGREGATE_TYPE: &str = "Walker";
const EVENT_SOURCE: &str = "lattice-walk";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub resets: u64,
    pub steps: u64,
    pub walker_id: Option<String>,
    pub path_len: usize,
    pub displacement: u64,
}

/// Drives a `WalkSession` from a tick source, publishing the path after every
/// step and journaling the walker's events.
pub struct SimulationRunner {
    session: WalkSession,
    sink: Arc<dyn PathSink>,
    journal: Option<Arc<dyn EventStore>>,
    projection: PathProjection,
    logger: DynLogger,
}

impl SimulationRunner {
    pub fn new(session: WalkSession, sink: Arc<dyn PathSink>, logger: DynLogger) -> Self {
        Self {
            session,
            sink,
            journal: None,
            projection: PathProjection::new(),
            logger,
        }
    }

    pub fn with_journal(mut self, journal: Arc<dyn EventStore>) -> Self {
        self.journal = Some(journal);
        self
    }

    pub fn session(&self) -> &WalkSession {
        &self.session
    }

    pub fn projection(&self) -> &PathProjection {
        &self.projection
    }

    /// Consumes signals until the source is exhausted. A tick arriving before
    /// any reset aborts the run.
    pub async fn run(&mut self, ticks: &mut dyn TickSource) -> ApplicationResult<RunSummary> {
        let mut summary = RunSummary::default();

        while let Some(signal) = ticks.next_signal().await {
            match signal {
                Signal::Reset => {
                    let walker_id = self.session.reset().id.clone();
                    summary.resets += 1;
                    info!(walker_id = %walker_id, "walker reset");
                    self.logger
                        .info(&format!("Walker {} reset at origin", walker_id));
                }
                Signal::Tick => {
                    if let Err(e) = self.session.step() {
                        error!(error = %e, "step rejected");
                        self.logger.error(&format!("Step rejected: {}", e));
                        return Err(e.into());
                    }
                    summary.steps += 1;
                    self.publish().await?;
                }
            }
            self.commit().await?;
        }

        if let Some(walker) = self.session.walker() {
            summary.walker_id = Some(walker.id.clone());
            summary.path_len = walker.path().len();
        }
        summary.displacement = self.projection.displacement();

        info!(
            resets = summary.resets,
            steps = summary.steps,
            displacement = summary.displacement,
            "run finished"
        );
        self.logger.info(&format!(
            "Run finished: {} resets, {} steps, displacement {}",
            summary.resets, summary.steps, summary.displacement
        ));

        Ok(summary)
    }

    async fn publish(&self) -> ApplicationResult<()> {
        let walker = self
            .session
            .walker()
            .ok_or(DomainError::WalkerNotInitialized)?;
        debug!(walker_id = %walker.id, position = ?walker.position, "stepped");

        self.sink
            .publish(&walker.id, walker.path())
            .await
            .map_err(|e| ApplicationError::PathSink(e.to_string()))
    }

    async fn commit(&mut self) -> ApplicationResult<()> {
        let events = self.session.take_events();
        if events.is_empty() {
            return Ok(());
        }

        for event in &events {
            self.projection.apply(event);
        }

        let (Some(journal), Some(walker)) = (&self.journal, self.session.walker()) else {
            return Ok(());
        };

        let expected_version = walker.version() - events.len() as u64;
        let envelopes = events
            .iter()
            .map(|event| {
                EventEnvelope::new(
                    event,
                    AGGREGATE_TYPE,
                    EventMetadata::from_source(EVENT_SOURCE),
                )
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(DomainError::from)?;

        journal
            .append_events(walker.aggregate_id(), expected_version, envelopes)
            .await
            .map_err(|e| {
                self.logger
                    .error(&format!("Failed to journal walker events: {}", e));
                ApplicationError::EventStore(e)
            })
    }
}
