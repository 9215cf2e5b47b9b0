use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, OgmaError>;

/// Errors surfaced while queueing or flushing pending operations.
#[derive(Debug, Error)]
pub enum OgmaError {
    /// A label fell outside the registered identifier vocabulary.
    #[error("invalid label: {0:?}")]
    InvalidLabel(String),
    /// A relationship type fell outside the registered identifier vocabulary.
    #[error("invalid relationship type: {0:?}")]
    InvalidRelType(String),
    /// An entity was resolved without a stored identifier.
    #[error("entity has no identifier")]
    MissingIdentifier,
    /// Failure raised by the query engine, passed through unchanged.
    ///
    /// The inner error is rendered in the message, so it is deliberately not
    /// exposed as a `source`; chain-walking reporters would print it twice.
    #[error("engine: {0}")]
    Engine(Box<dyn std::error::Error + Send + Sync>),
}
