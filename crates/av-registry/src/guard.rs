//! Containment at the handler call boundary.

use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::{HandlerError, HandlerResult};

/// Run one handler invocation, turning a panic into
/// [`HandlerError::Panicked`].
///
/// The chains call every handler through this; a faulty behavior costs one
/// entry or stage, never the tick.  Callers read nothing but the returned
/// value after a panic.
pub fn invoke<T>(call: impl FnOnce() -> HandlerResult<T>) -> HandlerResult<T> {
    catch_unwind(AssertUnwindSafe(call)).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_owned());
        Err(HandlerError::Panicked(message))
    })
}
