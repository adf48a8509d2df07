use av_core::AvError;
use av_walker::WalkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("frame configuration error: {0}")]
    Config(#[from] AvError),

    #[error("walker chain setup failed: {0}")]
    Walkers(#[from] WalkError),

    #[error("input queue full ({capacity} events pending)")]
    InputQueueFull { capacity: usize },
}

pub type FrameResult<T> = Result<T, FrameError>;
