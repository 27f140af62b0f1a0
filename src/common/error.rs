use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// A step was requested before any reset established a walker.
    #[error("Walker not initialized: reset must precede the first step")]
    WalkerNotInitialized,

    #[error("Invalid event: {reason}")]
    InvalidEvent { reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Infrastructure error: {0}")]
    InfrastructureError(String),
}

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Event store error: {0}")]
    EventStore(String),

    #[error("Path sink error: {0}")]
    PathSink(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
pub type ApplicationResult<T> = Result<T, ApplicationError>;
