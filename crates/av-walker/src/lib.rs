//! `av-walker` — resolves an avatar's pose for the tick through an ordered
//! chain of walkers.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`walker`]    | `Walker` trait, `walker_fn`, `WalkerRegistry`                   |
//! | [`manager`]   | `WalkManager` — the ordered spec list, `walk`, `WalkTrace`      |
//! | [`stock`]     | Default chain composition, `StockConfig`, shared `LastValid`    |
//! | [`portal`]    | `PortalWalker` — trigger volume → exit pose                     |
//! | [`fall`]      | `FallRecovery` — below kill height → spawn                      |
//! | [`collision`] | `Aabb`, `CollisionResolver` — broad/narrow phase snap-back      |
//! | [`error`]     | `WalkError`, `ChainResult<T>`                                   |
//!
//! # Walk model
//!
//! ```text
//! pose = candidate
//! for spec in chain:
//!   unresolved      → pose unchanged, next
//!   Err(_)          → log, pose unchanged, next
//!   Ok(r)           → pose = r.pose
//!                     r.is_final → return pose
//! return pose
//! ```
//!
//! Priority is list position.  A stage that vetoes a move (collision
//! snap-back) marks its result final so later stages (terrain conformance)
//! cannot override it.

pub mod collision;
pub mod error;
pub mod fall;
pub mod manager;
pub mod portal;
pub mod stock;
pub mod walker;

#[cfg(test)]
mod tests;

pub use collision::{Aabb, CollisionResolver};
pub use error::{ChainResult, WalkError};
pub use fall::FallRecovery;
pub use manager::{WalkManager, WalkTrace};
pub use portal::{Portal, PortalWalker};
pub use stock::{LastValid, StockConfig, default_specs, register_defaults};
pub use walker::{Walker, WalkerRegistry, walker_fn};
