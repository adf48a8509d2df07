//! Frame time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  Each tick is one
//! frame of the client's tick loop and represents a fixed
//! `tick_duration_secs`, held in `FrameClock`:
//!
//!   elapsed = tick * tick_duration_secs
//!
//! The replicated session guarantees every participant observes the same
//! ticks, so walker stages receive `(elapsed, delta)` derived from the tick
//! rather than from a wall clock.

use std::fmt;

use crate::{AvError, AvResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute frame counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── FrameClock ────────────────────────────────────────────────────────────────

/// Maps tick counts to elapsed seconds.
#[derive(Clone, Debug)]
pub struct FrameClock {
    /// Seconds one tick represents.
    pub tick_duration_secs: f64,
    /// The current tick, advanced once per frame.
    pub current_tick: Tick,
}

impl FrameClock {
    pub fn new(tick_duration_secs: f64) -> Self {
        Self { tick_duration_secs, current_tick: Tick::ZERO }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_tick.0 as f64 * self.tick_duration_secs
    }

    /// Seconds covered by one tick; the `delta` walker stages receive.
    #[inline]
    pub fn delta_secs(&self) -> f64 {
        self.tick_duration_secs
    }
}

impl fmt::Display for FrameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.3}s)", self.current_tick, self.elapsed_secs())
    }
}

// ── FrameConfig ───────────────────────────────────────────────────────────────

/// Tick loop configuration.
///
/// Typically loaded from a TOML file by the application crate and passed to
/// the frame builder.  Missing fields take their [`Default`] values.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FrameConfig {
    /// Seconds per tick.  Default: 1/60.
    pub tick_duration_secs: f64,

    /// Ticks to run for `Frame::run`.  `0` means `run` returns immediately;
    /// use `run_ticks`/`step` for open-ended loops.
    pub total_ticks: u64,

    /// Avatar speed in world units per second.  A unit movement intent moves
    /// the candidate pose `move_speed * tick_duration_secs` per application.
    pub move_speed: f32,

    /// Input events accepted per tick before `push_input` refuses more.
    pub max_pending_inputs: usize,

    /// Run the walker chain once on ticks that produced no movement intent,
    /// so stages like fall recovery still observe an idle avatar.
    pub walk_when_idle: bool,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            tick_duration_secs: 1.0 / 60.0,
            total_ticks:        0,
            move_speed:         4.0,
            max_pending_inputs: 256,
            walk_when_idle:     false,
        }
    }
}

impl FrameConfig {
    /// The tick at which `Frame::run` stops (exclusive).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    pub fn make_clock(&self) -> FrameClock {
        FrameClock::new(self.tick_duration_secs)
    }

    /// Reject values the tick loop cannot run with.
    pub fn validate(&self) -> AvResult<()> {
        if !(self.tick_duration_secs.is_finite() && self.tick_duration_secs > 0.0) {
            return Err(AvError::Config(format!(
                "tick_duration_secs must be positive, got {}",
                self.tick_duration_secs
            )));
        }
        if !(self.move_speed.is_finite() && self.move_speed >= 0.0) {
            return Err(AvError::Config(format!(
                "move_speed must be finite and non-negative, got {}",
                self.move_speed
            )));
        }
        if self.max_pending_inputs == 0 {
            return Err(AvError::Config("max_pending_inputs must be at least 1".into()));
        }
        Ok(())
    }
}
