//! The `Walker` trait — one pose-transformation stage.

use av_core::{AvatarId, Pose, WalkResult};
use av_registry::{HandlerRegistry, HandlerResult};

/// A stage in the walker chain.
///
/// Receives the pose produced by the previous stage (or the candidate pose
/// for the first stage) and returns the pose to hand on, flagged final when
/// no later stage may modify it this tick.
///
/// `time` is elapsed seconds at this tick and `delta` the tick duration;
/// both are threaded through unchanged.
///
/// Called synchronously on the tick thread, so implementations may keep
/// per-avatar state behind a `RefCell`.
pub trait Walker {
    fn walk(
        &self,
        avatar: AvatarId,
        pose:   Pose,
        time:   f64,
        delta:  f64,
    ) -> HandlerResult<WalkResult>;
}

impl<F> Walker for F
where
    F: Fn(AvatarId, Pose, f64, f64) -> HandlerResult<WalkResult>,
{
    #[inline]
    fn walk(&self, avatar: AvatarId, pose: Pose, time: f64, delta: f64) -> HandlerResult<WalkResult> {
        self(avatar, pose, time, delta)
    }
}

/// Box a closure as a `dyn Walker`.
pub fn walker_fn<F>(f: F) -> Box<dyn Walker>
where
    F: Fn(AvatarId, Pose, f64, f64) -> HandlerResult<WalkResult> + 'static,
{
    Box::new(f)
}

/// Registry of walker stages, keyed by identity triple.
pub type WalkerRegistry = HandlerRegistry<dyn Walker>;
