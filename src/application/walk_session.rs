use crate::common::{AggregateRoot, DomainError, DomainResult};
use crate::domains::walker::{DirectionSource, Position, RandomDirections, Walker, WalkerEvent};

/// Owns the walker on behalf of the driver and enforces the reset-before-step
/// contract. `walker` is `None` until the first reset.
pub struct WalkSession {
    walker: Option<Walker>,
    directions: Box<dyn DirectionSource>,
}

impl WalkSession {
    pub fn new() -> Self {
        Self::with_directions(Box::new(RandomDirections::from_entropy()))
    }

    pub fn with_directions(directions: Box<dyn DirectionSource>) -> Self {
        Self {
            walker: None,
            directions,
        }
    }

    /// Replaces any current walker with a fresh one at the origin. Events the
    /// previous walker had not yet handed out are dropped with it.
    pub fn reset(&mut self) -> &Walker {
        self.walker.insert(Walker::new())
    }

    /// Continues with a walker rebuilt elsewhere, e.g. replayed from a journal.
    pub fn resume(&mut self, walker: Walker) {
        self.walker = Some(walker);
    }

    pub fn step(&mut self) -> DomainResult<&[Position]> {
        let walker = self
            .walker
            .as_mut()
            .ok_or(DomainError::WalkerNotInitialized)?;
        Ok(walker.step(self.directions.as_mut()))
    }

    /// One host invocation: `reset == true` starts over and produces no path,
    /// otherwise the walker steps and the full path is returned.
    pub fn invoke(&mut self, reset: bool) -> DomainResult<Option<&[Position]>> {
        if reset {
            self.reset();
            Ok(None)
        } else {
            self.step().map(Some)
        }
    }

    pub fn walker(&self) -> Option<&Walker> {
        self.walker.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.walker.is_some()
    }

    /// Drains the events recorded by the active walker since the last call.
    pub fn take_events(&mut self) -> Vec<WalkerEvent> {
        match self.walker.as_mut() {
            Some(walker) => {
                let events = walker.uncommitted_events().to_vec();
                walker.mark_events_as_committed();
                events
            }
            None => Vec::new(),
        }
    }
}

impl Default for WalkSession {
    fn default() -> Self {
        Self::new()
    }
}
