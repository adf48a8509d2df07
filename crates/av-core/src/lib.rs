//! `av-core` — foundational types for the `rust_av` avatar input and pose
//! resolution core.
//!
//! This crate is a dependency of every other `av-*` crate.  It has no `av-*`
//! dependencies and only two external ones (`glam` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`ids`]        | `AvatarId`, `TargetId`                                    |
//! | [`identity`]   | `HandlerRef` / `WalkerSpec` identity triple, `IntoIdentity` |
//! | [`pose`]       | `Pose`, `WalkResult`, `MoveIntent`                        |
//! | [`input`]      | `InputEvent`, `EventKind`, `Modifiers`, `KeyCode`         |
//! | [`time`]       | `Tick`, `FrameClock`, `FrameConfig`                       |
//! | [`error`]      | `AvError`, `AvResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types and     |
//! |         | turns on `glam/serde` for `Pose`.                          |

pub mod error;
pub mod identity;
pub mod ids;
pub mod input;
pub mod pose;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{AvError, AvResult};
pub use identity::{HandlerRef, IntoIdentity, WalkerSpec};
pub use ids::{AvatarId, TargetId};
pub use input::{EventKind, InputEvent, InputPayload, KeyCode, Modifiers};
pub use pose::{MoveIntent, Pose, WalkResult};
pub use time::{FrameClock, FrameConfig, Tick};
