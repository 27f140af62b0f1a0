use crate::domains::walker::{Signal, TickSource};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::{interval, Interval, MissedTickBehavior};

/// Replays a fixed list of driver invocations.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTickSource {
    signals: VecDeque<Signal>,
}

impl ScriptedTickSource {
    pub fn new(signals: Vec<Signal>) -> Self {
        Self {
            signals: signals.into(),
        }
    }

    /// Builds the script from raw host `reset` flags.
    pub fn from_resets<I: IntoIterator<Item = bool>>(resets: I) -> Self {
        Self {
            signals: resets.into_iter().map(Signal::from_reset).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.signals.len()
    }
}

#[async_trait]
impl TickSource for ScriptedTickSource {
    async fn next_signal(&mut self) -> Option<Signal> {
        self.signals.pop_front()
    }
}

/// Emits one reset followed by `ticks` steps, paced by a timer.
pub struct IntervalTickSource {
    interval: Interval,
    reset_pending: bool,
    ticks_left: u64,
}

impl IntervalTickSource {
    pub fn new(period: Duration, ticks: u64) -> Self {
        // tokio panics on a zero period
        let mut interval = interval(period.max(Duration::from_millis(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            interval,
            reset_pending: true,
            ticks_left: ticks,
        }
    }
}

#[async_trait]
impl TickSource for IntervalTickSource {
    async fn next_signal(&mut self) -> Option<Signal> {
        if self.reset_pending {
            self.reset_pending = false;
            return Some(Signal::Reset);
        }
        if self.ticks_left == 0 {
            return None;
        }
        self.interval.tick().await;
        self.ticks_left -= 1;
        Some(Signal::Tick)
    }
}
