use thiserror::Error;

/// Failure taxonomy for the whole pipeline.
///
/// `InvalidConfiguration`, `IndexNotReady` and `SessionBusy` are caller
/// errors, recoverable by correcting the input and retrying within the same
/// session. The two service variants carry an external dependency failure
/// verbatim; the operation that hit them aborts with prior state preserved.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("embedding service error: {0}")]
    EmbeddingService(String),

    #[error("generation service error: {0}")]
    GenerationService(String),

    #[error("index not ready: build an index before querying")]
    IndexNotReady,

    #[error("session busy: a {0} is already in flight")]
    SessionBusy(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
