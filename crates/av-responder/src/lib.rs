//! `av-responder` — routes raw input events to registered handlers.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`responder`] | `Responder` trait, `Outcome`, `responder_fn`               |
//! | [`predicate`] | `Predicate` — modifier-state filter on an entry            |
//! | [`chain`]     | `Tier`, `ResponderEntry`, `ResponderChain`                 |
//! | [`error`]     | `ResponderError`, `ResponderResult<T>`                     |
//!
//! # Dispatch order
//!
//! ```text
//! for tier in [First, Normal, Last]:
//!   for entry in tier (registration order) where entry.kind == event.kind:
//!     skip unless entry.predicate matches event.modifiers
//!     skip if the handler identity does not resolve
//!     Consumed  → stop, return true
//!     Continue  → next entry
//!     Err(_)    → log, next entry
//! return false
//! ```
//!
//! The total order for one event kind is tier order, then registration
//! order.  At most one handler consumes any given event.

pub mod chain;
pub mod error;
pub mod predicate;
pub mod responder;


pub use chain::{ResponderChain, ResponderEntry, Tier};
pub use error::{ResponderError, ResponderResult};
pub use predicate::Predicate;
pub use responder::{Outcome, Responder, ResponderRegistry, responder_fn};
