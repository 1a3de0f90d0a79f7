//=========================================================================
// Pose & Bounds Math
//=========================================================================
//
// Small value types shared by the scene collaborator and the handle core.
//
//   Pose  : world position + world rotation + local scale
//   Aabb  : axis-aligned box (center + half extents)
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Mat3, Quat, Vec3};

//=== Constants ===========================================================

/// Angles below this (radians) are treated as no rotation at all.
pub const ANGLE_EPSILON: f32 = 1.0e-6;

//=== Pose ================================================================

/// Position, rotation and scale of a scene node.
///
/// Position and rotation are world space. Scale is the node's local scale,
/// which is what the handles increment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Pose {
    /// Origin, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Pose at `position` with identity rotation and unit scale.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Transforms a point from this pose's local space into world space.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * (self.scale * local)
    }

    /// Orbits the pose around `pivot` by `rotation`, turning its
    /// orientation by the same amount.
    pub fn rotate_around(&mut self, pivot: Vec3, rotation: Quat) {
        self.position = rotation * (self.position - pivot) + pivot;
        self.rotation = (rotation * self.rotation).normalize();
    }

    /// Orbit expressed as a world axis and an angle in radians.
    pub fn rotate_around_axis(&mut self, pivot: Vec3, axis: Vec3, angle: f32) {
        if angle.abs() < ANGLE_EPSILON || axis.length_squared() < ANGLE_EPSILON {
            return;
        }
        self.rotate_around(pivot, Quat::from_axis_angle(axis.normalize(), angle));
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

//=== Aabb ================================================================

/// Axis-aligned bounding box stored as center and half extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec3,
    pub extents: Vec3,
}

impl Aabb {
    pub fn new(center: Vec3, extents: Vec3) -> Self {
        Self {
            center,
            extents: extents.abs(),
        }
    }

    /// Zero-sized box at `point`.
    pub fn from_point(point: Vec3) -> Self {
        Self {
            center: point,
            extents: Vec3::ZERO,
        }
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.extents
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.extents
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: &Aabb) -> Aabb {
        let min = self.min().min(other.min());
        let max = self.max().max(other.max());
        Aabb::new((min + max) * 0.5, (max - min) * 0.5)
    }

    /// World-space box enclosing this local-space box placed at `pose`.
    pub fn transformed(&self, pose: &Pose) -> Aabb {
        let center = pose.transform_point(self.center);
        let basis = Mat3::from_quat(pose.rotation);
        let scaled = self.extents * pose.scale.abs();
        let extents = Vec3::new(
            basis.row(0).abs().dot(scaled),
            basis.row(1).abs().dot(scaled),
            basis.row(2).abs().dot(scaled),
        );
        Aabb::new(center, extents)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1.0e-4
    }

    #[test]
    fn rotate_around_orbits_and_turns() {
        let mut pose = Pose::from_position(Vec3::new(2.0, 0.0, 0.0));
        pose.rotate_around(Vec3::new(1.0, 0.0, 0.0), Quat::from_rotation_y(FRAC_PI_2));

        assert!(approx(pose.position, Vec3::new(1.0, 0.0, -1.0)));
        assert!(approx(pose.rotation * Vec3::X, Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn rotate_around_axis_ignores_zero_angle() {
        let mut pose = Pose::from_position(Vec3::ONE);
        pose.rotate_around_axis(Vec3::ZERO, Vec3::Y, 0.0);
        assert_eq!(pose, Pose::from_position(Vec3::ONE));
    }

    #[test]
    fn union_encloses_both_boxes() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::new(4.0, 0.0, 0.0), Vec3::ONE);
        let u = a.union(&b);

        assert!(approx(u.center, Vec3::new(2.0, 0.0, 0.0)));
        assert!(approx(u.extents, Vec3::new(3.0, 1.0, 1.0)));
    }

    #[test]
    fn transformed_box_follows_pose() {
        let local = Aabb::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 2.0));
        let pose = Pose::from_position(Vec3::new(5.0, 0.0, 0.0))
            .with_rotation(Quat::from_rotation_y(FRAC_PI_2))
            .with_scale(Vec3::splat(2.0));
        let world = local.transformed(&pose);

        assert!(approx(world.center, Vec3::new(5.0, 2.0, 0.0)));
        assert!(approx(world.extents, Vec3::new(4.0, 2.0, 2.0)));
    }
}
