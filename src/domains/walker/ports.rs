use super::aggregate::Position;
use crate::common::DomainResult;
use async_trait::async_trait;

/// One invocation from the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Discard the current walker and start over at the origin.
    Reset,
    /// Advance the walk by one step.
    Tick,
}

impl Signal {
    pub fn from_reset(reset: bool) -> Self {
        if reset {
            Signal::Reset
        } else {
            Signal::Tick
        }
    }
}

/// Port producing driver invocations. `None` ends the run.
#[async_trait]
pub trait TickSource: Send {
    async fn next_signal(&mut self) -> Option<Signal>;
}

/// Port receiving the accumulated path after every step.
#[async_trait]
pub trait PathSink: Send + Sync {
    async fn publish(&self, walker_id: &str, path: &[Position]) -> DomainResult<()>;
}
