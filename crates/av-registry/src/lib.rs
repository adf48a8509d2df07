//! `av-registry` — maps identity triples to invocable handlers.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`registry`] | `HandlerRegistry<H>`, the `Resolve<H>` lookup trait          |
//! | [`error`]    | `RegistryError` (lookup), `HandlerError` (invocation)       |
//! | [`guard`]    | `invoke`, which contains a panicking handler call            |
//!
//! # Design notes
//!
//! The registry is pure lookup.  It knows nothing about ordering; the
//! responder and walker chains own that and hold only [`HandlerRef`]s.
//! Each chain resolves its entries through `&impl Resolve<H>` at dispatch
//! time, so a behavior module reloaded between ticks (re-`register`ed under
//! the same identity, or `unregister_module`d entirely) is picked up on the
//! next dispatch without touching the chains.
//!
//! Resolution never panics: a missing identity is a [`RegistryError::NotFound`]
//! value the chains turn into a skip.
//!
//! [`HandlerRef`]: av_core::HandlerRef

pub mod error;
pub mod guard;
pub mod registry;


pub use error::{HandlerError, HandlerResult, RegistryError, RegistryResult};
pub use guard::invoke;
pub use registry::{HandlerRegistry, Resolve};
