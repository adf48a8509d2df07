//! Bounded movement against static obstacles.
//!
//! Broad phase: the AABB around the avatar's bounding sphere against each
//! obstacle box.  Narrow phase: sphere vs box via the closest point on the
//! box.  Obstacle counts per world are small, so the broad phase is a linear
//! scan.

use av_core::{AvatarId, Pose, WalkResult};
use av_registry::HandlerResult;
use glam::Vec3;
use tracing::trace;

use crate::{LastValid, Walker};

/// Axis-aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Box spanning two corners in any order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self { min: a.min(b), max: a.max(b) }
    }

    /// Box of half-extent `half` centred on `center`.
    pub fn around(center: Vec3, half: Vec3) -> Self {
        Self { min: center - half, max: center + half }
    }

    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }

    /// Point of the box nearest `p` (`p` itself when inside).
    #[inline]
    pub fn closest_point(&self, p: Vec3) -> Vec3 {
        // max/min rather than clamp: clamp asserts min <= max, and boxes
        // deserialized from config skip `new`.
        p.max(self.min).min(self.max)
    }

    /// Sphere vs box.  Touching counts as no contact.
    #[inline]
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.closest_point(center).distance_squared(center) < radius * radius
    }
}

/// Rejects candidate poses whose bounding sphere penetrates an obstacle.
///
/// A colliding candidate is replaced by the avatar's last valid pose and the
/// result is final.  A clear candidate passes through and becomes the new
/// last valid pose.  If the avatar has no last valid pose yet, a colliding
/// candidate passes through unchanged; there is nothing to snap back to.
pub struct CollisionResolver {
    radius:    f32,
    obstacles: Vec<Aabb>,
    last:      LastValid,
}

impl CollisionResolver {
    pub fn new(radius: f32, obstacles: Vec<Aabb>, last: LastValid) -> Self {
        Self { radius, obstacles, last }
    }

    /// `true` if a sphere of the avatar's radius at `position` penetrates any
    /// obstacle.
    pub fn collides(&self, position: Vec3) -> bool {
        let bounds = Aabb::around(position, Vec3::splat(self.radius));
        self.obstacles
            .iter()
            .filter(|o| o.overlaps(&bounds))
            .any(|o| o.intersects_sphere(position, self.radius))
    }
}

impl Walker for CollisionResolver {
    fn walk(&self, avatar: AvatarId, pose: Pose, _time: f64, _delta: f64) -> HandlerResult<WalkResult> {
        if !self.collides(pose.position) {
            self.last.record(avatar, pose);
            return Ok(WalkResult::pass(pose));
        }
        match self.last.get(avatar) {
            Some(valid) => {
                trace!(%avatar, "blocked; snapping back");
                Ok(WalkResult::finish(valid))
            }
            None => Ok(WalkResult::pass(pose)),
        }
    }
}
