//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `AvError` as one variant
//! via `#[from]`, so a malformed identity surfaces the same way whether it was
//! handed to the responder chain or the walker chain.

use thiserror::Error;

/// The error type for `av-core` and a common base for sub-crates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AvError {
    /// A handler identity was not exactly three non-empty components.
    #[error("malformed handler identity {0:?}: expected module.behavior.method")]
    MalformedIdentity(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `av-*` crates.
pub type AvResult<T> = Result<T, AvError>;
