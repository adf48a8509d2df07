//! Falling recovery.

use av_core::{AvatarId, Pose, WalkResult};
use av_registry::HandlerResult;
use tracing::debug;

use crate::{LastValid, Walker};

/// Respawns an avatar whose candidate position is below `kill_height`.
pub struct FallRecovery {
    kill_height: f32,
    spawn:       Pose,
    last:        LastValid,
}

impl FallRecovery {
    pub fn new(kill_height: f32, spawn: Pose, last: LastValid) -> Self {
        Self { kill_height, spawn, last }
    }
}

impl Walker for FallRecovery {
    fn walk(&self, avatar: AvatarId, pose: Pose, _time: f64, _delta: f64) -> HandlerResult<WalkResult> {
        if pose.position.y >= self.kill_height {
            return Ok(WalkResult::pass(pose));
        }
        debug!(%avatar, y = pose.position.y, "fell below kill height; respawning");
        self.last.record(avatar, self.spawn);
        Ok(WalkResult::finish(self.spawn))
    }
}
