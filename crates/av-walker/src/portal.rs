//! Portal intersection check.

use av_core::{AvatarId, Pose, WalkResult};
use av_registry::HandlerResult;
use tracing::debug;

use crate::{Aabb, LastValid, Walker};

/// A trigger volume and where it sends the avatar.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Portal {
    pub trigger: Aabb,
    pub exit:    Pose,
}

/// Sends an avatar whose candidate position enters a portal's trigger to
/// that portal's exit pose.  Final, so nothing later in the chain can pull
/// the avatar back through.  First matching portal wins.
pub struct PortalWalker {
    portals: Vec<Portal>,
    last:    LastValid,
}

impl PortalWalker {
    pub fn new(portals: Vec<Portal>, last: LastValid) -> Self {
        Self { portals, last }
    }
}

impl Walker for PortalWalker {
    fn walk(&self, avatar: AvatarId, pose: Pose, _time: f64, _delta: f64) -> HandlerResult<WalkResult> {
        let Some(portal) = self.portals.iter().find(|p| p.trigger.contains(pose.position)) else {
            return Ok(WalkResult::pass(pose));
        };
        debug!(%avatar, exit = ?portal.exit.position, "portal crossed");
        self.last.record(avatar, portal.exit);
        Ok(WalkResult::finish(portal.exit))
    }
}
