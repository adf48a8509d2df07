//! Avatar pose, walker stage output, and movement intents.

use glam::{Quat, Vec3};

/// Position and orientation of an avatar.
///
/// The core does not interpret either field beyond carrying it from one
/// walker stage to the next; meaning belongs to the walkers.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    pub position:    Vec3,
    pub orientation: Quat,
}

impl Pose {
    /// Origin, facing down +Z with no rotation.
    pub const IDENTITY: Pose = Pose {
        position:    Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    #[inline]
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self { position, orientation }
    }

    /// A pose at `position` with identity orientation.
    #[inline]
    pub fn at(position: Vec3) -> Self {
        Self { position, orientation: Quat::IDENTITY }
    }

    /// Same orientation, position offset by `offset` in world space.
    #[inline]
    pub fn translated(self, offset: Vec3) -> Self {
        Self { position: self.position + offset, ..self }
    }

    /// Local forward axis (+Z rotated by `orientation`).
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::Z
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ── WalkResult ────────────────────────────────────────────────────────────────

/// What a single walker stage returns: the transformed pose and whether it
/// must not be modified further this tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WalkResult {
    pub pose:     Pose,
    pub is_final: bool,
}

impl WalkResult {
    /// Hand `pose` to the next stage.
    #[inline]
    pub fn pass(pose: Pose) -> Self {
        Self { pose, is_final: false }
    }

    /// Stop the chain; `pose` is the tick's result.
    #[inline]
    pub fn finish(pose: Pose) -> Self {
        Self { pose, is_final: true }
    }
}

// ── MoveIntent ────────────────────────────────────────────────────────────────

/// A movement request produced by a responder while handling input.
///
/// `translation` is expressed in the avatar's local frame (after `yaw` is
/// applied) and is scaled by the frame's move speed and delta when folded
/// into a candidate pose.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MoveIntent {
    pub translation: Vec3,
    /// Rotation about world +Y, radians, counter-clockwise.
    pub yaw: f32,
}

impl MoveIntent {
    #[inline]
    pub fn translate(translation: Vec3) -> Self {
        Self { translation, yaw: 0.0 }
    }

    #[inline]
    pub fn turn(yaw: f32) -> Self {
        Self { translation: Vec3::ZERO, yaw }
    }

    /// Fold this intent into `pose`: yaw first, then `translation * scale`
    /// rotated into the new orientation.
    pub fn fold_into(self, pose: Pose, scale: f32) -> Pose {
        let orientation = (pose.orientation * Quat::from_rotation_y(self.yaw)).normalize();
        let position = pose.position + orientation * (self.translation * scale);
        Pose { position, orientation }
    }
}
