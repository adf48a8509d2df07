//! The `Frame` struct and its tick loop.

use av_core::{AvatarId, FrameClock, FrameConfig, InputEvent, Pose};
use av_responder::{ResponderChain, ResponderRegistry};
use av_walker::{LastValid, WalkManager, WalkerRegistry};
use tracing::{debug, debug_span};

use crate::{FrameObserver, FrameResult, InputQueue};

/// The per-view tick driver.
///
/// `Frame` owns both chains and both registries for one avatar.  It is built
/// once per view by [`FrameBuilder`][crate::FrameBuilder], passed to the tick
/// loop, and never shared with another view or participant.
///
/// Behavior setup and teardown reach the registration API through the
/// public chain and registry fields; the tick loop calls
/// [`push_input`][Self::push_input] and [`step`][Self::step].
pub struct Frame {
    pub config: FrameConfig,

    /// Tick counter and elapsed time handed to walkers.
    pub clock: FrameClock,

    pub avatar: AvatarId,

    /// The authoritative pose as of the last completed tick.
    pub pose: Pose,

    pub responders: ResponderChain,
    pub responder_registry: ResponderRegistry,

    pub walkers: WalkManager,
    pub walker_registry: WalkerRegistry,

    /// Shared last-valid-pose ledger, when the stock walkers are installed.
    pub last_valid: Option<LastValid>,

    pub(crate) input: InputQueue,
}

impl Frame {
    // ── Public API ────────────────────────────────────────────────────────

    /// Queue an input event for the next tick.
    ///
    /// # Errors
    ///
    /// [`FrameError::InputQueueFull`][crate::FrameError::InputQueueFull] once
    /// `config.max_pending_inputs` events are waiting.  The event is dropped.
    pub fn push_input(&mut self, event: InputEvent) -> FrameResult<()> {
        self.input.push(event)
    }

    pub fn pending_inputs(&self) -> usize {
        self.input.len()
    }

    /// Run from the current tick to `config.end_tick()`.  Returns the final
    /// authoritative pose.
    pub fn run<O: FrameObserver>(&mut self, observer: &mut O) -> Pose {
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer);
        }
        observer.on_run_end(self.clock.current_tick);
        self.pose
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: FrameObserver>(&mut self, n: u64, observer: &mut O) -> Pose {
        for _ in 0..n {
            self.step(observer);
        }
        self.pose
    }

    /// Resolve one tick and return its authoritative pose.
    pub fn step<O: FrameObserver>(&mut self, observer: &mut O) -> Pose {
        let now = self.clock.current_tick;
        let _span = debug_span!("tick", %now).entered();
        observer.on_tick_start(now);

        let time  = self.clock.elapsed_secs();
        let delta = self.clock.delta_secs();
        let scale = self.config.move_speed * delta as f32;

        // ── Phase 1: drain input in arrival order ─────────────────────────
        let events: Vec<InputEvent> = self.input.drain().collect();

        // ── Phase 2–4: dispatch, fold intents, walk ───────────────────────
        //
        // Each walk starts from the previous walk's result, so several
        // intents in one tick compose.
        let mut pose = self.pose;
        let mut walked = false;
        let mut intents = Vec::new();
        for event in &events {
            let consumed = self.responders.dispatch(event, &self.responder_registry, &mut intents);
            observer.on_input(now, event, consumed);

            for intent in intents.drain(..) {
                let candidate = intent.fold_into(pose, scale);
                pose = self.walkers.walk(&self.walker_registry, self.avatar, candidate, time, delta);
                walked = true;
            }
        }

        if !walked && self.config.walk_when_idle {
            pose = self.walkers.walk(&self.walker_registry, self.avatar, pose, time, delta);
        }

        // ── Phase 5: publish ──────────────────────────────────────────────
        self.pose = pose;
        observer.on_pose(now, self.avatar, &pose);
        observer.on_tick_end(now, events.len());

        self.clock.advance();
        pose
    }

    /// Tear down a behavior module: drop its responders, its walker specs,
    /// and its handlers from both registries.  Returns the number of chain
    /// entries and handlers removed.
    pub fn unload_module(&mut self, module: &str) -> usize {
        let removed = self.responders.remove_module(module)
            + self.walkers.remove_module(module)
            + self.responder_registry.unregister_module(module)
            + self.walker_registry.unregister_module(module);
        debug!(module, removed, "module unloaded");
        removed
    }
}
