use av_core::AvError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponderError {
    #[error("responder registration rejected: {0}")]
    Identity(#[from] AvError),
}

pub type ResponderResult<T> = Result<T, ResponderError>;
