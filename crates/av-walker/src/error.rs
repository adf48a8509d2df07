use av_core::{AvError, WalkerSpec};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalkError {
    #[error("walker registration rejected: {0}")]
    Identity(#[from] AvError),

    #[error("walker {0} is already in the chain")]
    Duplicate(WalkerSpec),
}

pub type ChainResult<T> = Result<T, WalkError>;
