//! walkthrough — scripted single-avatar demo for the rust_av avatar core.
//!
//! Drives one avatar with keyboard input for a few seconds of frame time:
//! it walks forward, sprints, bumps into a wall, turns, steps through a
//! portal into a pit, and is respawned by fall recovery.  Halfway through,
//! the forward handler is hot-swapped for a slower one without touching the
//! chain.
//!
//! ```text
//! cargo run -p walkthrough                  # embedded world
//! cargo run -p walkthrough -- world.toml    # custom world
//! RUST_LOG=debug cargo run -p walkthrough   # chain-level tracing
//! ```

use std::f32::consts::FRAC_PI_2;
use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec3;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use av_core::{
    AvatarId, EventKind, FrameConfig, InputEvent, KeyCode, Modifiers, MoveIntent, Pose, TargetId,
    Tick,
};
use av_frame::{FrameBuilder, FrameObserver};
use av_responder::{Outcome, Predicate, Responder, ResponderChain, ResponderRegistry, Tier, responder_fn};
use av_walker::StockConfig;

// ── Constants ─────────────────────────────────────────────────────────────────

const AVATAR: AvatarId = AvatarId(1);
const PLAYER: TargetId = TargetId(1);

const FORWARD: KeyCode = KeyCode::Char('w');
const TURN_RIGHT: KeyCode = KeyCode::Char('d');

/// A 4 m wide wall straight ahead, and a portal to the left of it that drops
/// into a pit below the kill height.
const DEFAULT_WORLD: &str = r#"
[frame]
tick_duration_secs = 0.1
total_ticks        = 40
move_speed         = 2.0
walk_when_idle     = true

[stock]
kill_height   = -20.0
avatar_radius = 0.4
spawn         = { position = [0.0, 0.0, 0.0], orientation = [0.0, 0.0, 0.0, 1.0] }

[[stock.obstacles]]
min = [-5.0, -1.0, 3.0]
max = [ 5.0,  3.0, 4.0]

[[stock.portals]]
trigger = { min = [-3.0, -1.0, 2.0], max = [-2.0, 2.0, 3.5] }
exit    = { position = [0.0, -30.0, 0.0], orientation = [0.0, 0.0, 0.0, 1.0] }
"#;

// ── Configuration ─────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DemoConfig {
    frame: FrameConfig,
    stock: StockConfig,
}

fn load_config(path: Option<&Path>) -> Result<DemoConfig> {
    let text = match path {
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?,
        None => DEFAULT_WORLD.to_owned(),
    };
    toml::from_str(&text).context("parsing world config")
}

// ── Input script ──────────────────────────────────────────────────────────────

/// Events pressed on `tick`.
fn script(tick: u64) -> Vec<InputEvent> {
    match tick {
        2 => vec![InputEvent::wheel(-1.0, Modifiers::NONE)],
        0..=4 | 8..=15 => vec![InputEvent::key_down(FORWARD, Modifiers::NONE)],
        5..=7 => vec![InputEvent::key_down(FORWARD, Modifiers::SHIFT)],
        16 => vec![InputEvent::key_down(TURN_RIGHT, Modifiers::NONE)],
        17..=30 => vec![InputEvent::key_down(FORWARD, Modifiers::NONE)],
        _ => Vec::new(),
    }
}

// ── Responders ────────────────────────────────────────────────────────────────

/// A responder that pushes `intent` when `key` is pressed and passes
/// everything else down the chain.
fn on_key(key: KeyCode, intent: MoveIntent) -> Box<dyn Responder> {
    responder_fn(move |event, _, intents| {
        if event.key() != Some(key) {
            return Ok(Outcome::Continue);
        }
        intents.push(intent);
        Ok(Outcome::Consumed)
    })
}

fn build_responders() -> Result<(ResponderChain, ResponderRegistry)> {
    let mut chain = ResponderChain::new();
    let shift = Some(Predicate::requires(Modifiers::SHIFT));

    chain.add_responder(EventKind::KeyDown, Tier::First, shift, PLAYER, "input.sprint.forward")?;
    chain.add_responder(EventKind::KeyDown, Tier::Normal, None, PLAYER, "input.walk.forward")?;
    chain.add_responder(EventKind::KeyDown, Tier::Normal, None, PLAYER, "input.turn.right")?;
    for kind in [EventKind::KeyDown, EventKind::Wheel] {
        chain.add_responder(kind, Tier::Last, None, PLAYER, "debug.log.unhandled")?;
    }

    let mut registry = ResponderRegistry::new();
    registry.register(
        "input.sprint.forward".parse()?,
        on_key(FORWARD, MoveIntent::translate(Vec3::Z * 2.0)),
    );
    registry.register("input.walk.forward".parse()?, on_key(FORWARD, MoveIntent::translate(Vec3::Z)));
    registry.register("input.turn.right".parse()?, on_key(TURN_RIGHT, MoveIntent::turn(-FRAC_PI_2)));
    registry.register(
        "debug.log.unhandled".parse()?,
        responder_fn(|event, target, _| {
            info!(kind = %event.kind, %target, "unhandled input");
            Ok(Outcome::Continue)
        }),
    );
    Ok((chain, registry))
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct PoseLog {
    last:       Option<Pose>,
    consumed:   usize,
    unconsumed: usize,
    moves:      usize,
}

impl FrameObserver for PoseLog {
    fn on_input(&mut self, _tick: Tick, _event: &InputEvent, consumed: bool) {
        if consumed {
            self.consumed += 1;
        } else {
            self.unconsumed += 1;
        }
    }

    fn on_pose(&mut self, tick: Tick, avatar: AvatarId, pose: &Pose) {
        if self.last == Some(*pose) {
            return;
        }
        self.moves += 1;
        let p = pose.position;
        let f = pose.forward();
        println!(
            "{tick:>4}  {avatar}  pos=({:>6.2}, {:>6.2}, {:>6.2})  facing=({:>5.2}, {:>5.2})",
            p.x, p.y, p.z, f.x, f.z
        );
        self.last = Some(*pose);
    }

    fn on_run_end(&mut self, final_tick: Tick) {
        println!(
            "done at {final_tick}: {} pose changes, {} events consumed, {} unconsumed",
            self.moves, self.consumed, self.unconsumed
        );
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let path = std::env::args().nth(1);
    let config = load_config(path.as_deref().map(Path::new))?;
    info!(
        ticks = config.frame.total_ticks,
        obstacles = config.stock.obstacles.len(),
        portals = config.stock.portals.len(),
        "world loaded"
    );

    let (chain, handlers) = build_responders()?;
    let spawn = config.stock.spawn;
    let mut frame = FrameBuilder::new(config.frame)
        .avatar(AVATAR, spawn)
        .responders(chain)
        .responder_registry(handlers)
        .stock(config.stock)
        .build()?;

    let mut log = PoseLog::default();
    while frame.clock.current_tick < frame.config.end_tick() {
        let tick = frame.clock.current_tick;

        // Mud: same identity, new handler; the chain is untouched.
        if tick == Tick(20) {
            frame.responder_registry.register(
                "input.walk.forward".parse()?,
                on_key(FORWARD, MoveIntent::translate(Vec3::Z * 0.5)),
            );
            info!(%tick, "input.walk.forward reloaded");
        }
        if tick == Tick(32) {
            let removed = frame.unload_module("debug");
            info!(%tick, removed, "debug module unloaded");
        }

        for event in script(tick.0) {
            frame.push_input(event)?;
        }
        frame.step(&mut log);
    }
    log.on_run_end(frame.clock.current_tick);

    Ok(())
}
