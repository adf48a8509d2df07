//! Stock chain composition.
//!
//! Worlds that do not customize their chain get three walkers, registered in
//! this order at setup:
//!
//! | Identity                   | Walker              |
//! |----------------------------|---------------------|
//! | `stock.portal.check`       | [`PortalWalker`]    |
//! | `stock.fall.recover`       | [`FallRecovery`]    |
//! | `stock.collision.resolve`  | [`CollisionResolver`] |
//!
//! All three share one [`LastValid`] ledger so a teleport or respawn becomes
//! the pose collision snaps back to afterwards.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use av_core::{AvResult, AvatarId, HandlerRef, Pose, WalkerSpec};

use crate::{Aabb, CollisionResolver, FallRecovery, Portal, PortalWalker, WalkerRegistry};

pub const MODULE: &str = "stock";

/// Identities of the stock walkers, in chain order.
pub fn default_specs() -> AvResult<[WalkerSpec; 3]> {
    Ok([
        HandlerRef::new(MODULE, "portal", "check")?,
        HandlerRef::new(MODULE, "fall", "recover")?,
        HandlerRef::new(MODULE, "collision", "resolve")?,
    ])
}

/// Install the stock walkers into `registry` under their default identities.
///
/// Returns the ledger they share so the caller can seed or inspect it.
pub fn register_defaults(registry: &mut WalkerRegistry, config: &StockConfig) -> AvResult<LastValid> {
    let ledger = LastValid::default();
    let [portal, fall, collision] = default_specs()?;

    registry.register(portal, Box::new(PortalWalker::new(config.portals.clone(), ledger.clone())));
    registry.register(fall, Box::new(FallRecovery::new(config.kill_height, config.spawn, ledger.clone())));
    registry.register(
        collision,
        Box::new(CollisionResolver::new(config.avatar_radius, config.obstacles.clone(), ledger.clone())),
    );
    Ok(ledger)
}

// ── StockConfig ───────────────────────────────────────────────────────────────

/// World geometry the stock walkers consult.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StockConfig {
    /// Below this Y the avatar is respawned.
    pub kill_height: f32,
    pub spawn: Pose,
    /// Radius of the avatar's bounding sphere.
    pub avatar_radius: f32,
    pub portals: Vec<Portal>,
    pub obstacles: Vec<Aabb>,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            kill_height:   -50.0,
            spawn:         Pose::IDENTITY,
            avatar_radius: 0.4,
            portals:       Vec::new(),
            obstacles:     Vec::new(),
        }
    }
}

// ── LastValid ─────────────────────────────────────────────────────────────────

/// Last pose per avatar known not to collide.
///
/// Cheap to clone; clones share storage.  Single-threaded by construction
/// (`Rc<RefCell<..>>`), matching the tick loop.
#[derive(Clone, Debug, Default)]
pub struct LastValid(Rc<RefCell<HashMap<AvatarId, Pose>>>);

impl LastValid {
    pub fn get(&self, avatar: AvatarId) -> Option<Pose> {
        self.0.borrow().get(&avatar).copied()
    }

    pub fn record(&self, avatar: AvatarId, pose: Pose) {
        self.0.borrow_mut().insert(avatar, pose);
    }

    /// Drop an avatar that left the world.
    pub fn forget(&self, avatar: AvatarId) {
        self.0.borrow_mut().remove(&avatar);
    }
}
