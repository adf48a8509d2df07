//! Frame observer trait: the hand-off point to replication and tooling.

use av_core::{AvatarId, InputEvent, Pose, Tick};

/// Callbacks invoked by [`Frame::step`][crate::Frame::step].
///
/// All methods have no-op defaults.  The replication layer implements
/// [`on_pose`][Self::on_pose] to publish the authoritative pose; tests and
/// debugging overlays record the rest.
///
/// # Example: pose publisher
///
/// ```rust,ignore
/// struct Publish<'a>(&'a mut Session);
///
/// impl FrameObserver for Publish<'_> {
///     fn on_pose(&mut self, _tick: Tick, avatar: AvatarId, pose: &Pose) {
///         self.0.send_pose(avatar, *pose);
///     }
/// }
/// ```
pub trait FrameObserver {
    /// Called at the start of each tick, before input is drained.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after each event is dispatched.
    fn on_input(&mut self, _tick: Tick, _event: &InputEvent, _consumed: bool) {}

    /// Called once per tick with the authoritative pose.
    fn on_pose(&mut self, _tick: Tick, _avatar: AvatarId, _pose: &Pose) {}

    /// Called at the end of each tick.  `events` is how many input events
    /// were dispatched.
    fn on_tick_end(&mut self, _tick: Tick, _events: usize) {}

    /// Called once after [`Frame::run`][crate::Frame::run] reaches its last tick.
    fn on_run_end(&mut self, _final_tick: Tick) {}
}

/// A [`FrameObserver`] that does nothing.
pub struct NoopObserver;

impl FrameObserver for NoopObserver {}
