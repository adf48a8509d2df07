use av_core::HandlerRef;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("no handler registered for {0}")]
    NotFound(HandlerRef),
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Returned by a handler that could not do its job this tick.
///
/// The chains log it and carry on as if the handler had declined: the
/// responder chain treats the entry as not consuming, the walker chain keeps
/// the pose from before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    #[error("handler failed: {0}")]
    Failed(String),

    /// The handler panicked; the payload message, if it had one.
    #[error("handler panicked: {0}")]
    Panicked(String),
}

pub type HandlerResult<T> = Result<T, HandlerError>;
