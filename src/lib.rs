pub mod adapters;
pub mod application;
pub mod common;
pub mod config;
pub mod domains;

pub use config::Config;

pub use common::{
    replay_aggregate, AggregateRoot, ApplicationError, ApplicationResult, DomainError,
    DomainEvent, DomainResult, EventEnvelope, EventMetadata, EventStore,
};

pub use domains::logger::{DomainLogger, DynLogger};
pub use domains::walker::{
    Direction, DirectionSource, PathProjection, PathSink, Position, RandomDirections, Signal,
    TickSource, Walker, WalkerEvent,
};
