//! `av-frame` — the per-tick driver for the rust_av avatar core.
//!
//! # Tick loop
//!
//! ```text
//! each tick:
//!   ① Drain     — take every queued InputEvent, in arrival order.
//!   ② Dispatch  — ResponderChain::dispatch per event; responders push
//!                 MoveIntents as a side effect.
//!   ③ Fold      — each intent is folded into the candidate pose
//!                 (yaw, then translation * move_speed * delta).
//!   ④ Walk      — WalkManager::walk resolves the candidate; the result is
//!                 the next intent's starting pose.
//!   ⑤ Publish   — the final pose is authoritative for the tick and handed
//!                 to FrameObserver::on_pose (the replication hand-off).
//! ```
//!
//! Everything runs on one thread; no stage suspends.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use av_core::{AvatarId, FrameConfig, Pose};
//! use av_frame::{FrameBuilder, NoopObserver};
//! use av_walker::StockConfig;
//!
//! let mut frame = FrameBuilder::new(FrameConfig::default())
//!     .avatar(AvatarId(0), Pose::IDENTITY)
//!     .stock(StockConfig::default())
//!     .build()?;
//! frame.push_input(event)?;
//! let pose = frame.step(&mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod frame;
pub mod observer;
pub mod queue;


pub use builder::FrameBuilder;
pub use error::{FrameError, FrameResult};
pub use frame::Frame;
pub use observer::{FrameObserver, NoopObserver};
pub use queue::InputQueue;
