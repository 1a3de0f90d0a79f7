//=========================================================================
// Ghost
//=========================================================================
//
// Proxy pose standing in for a session's members.
//
// Widgets move the ghost, never the members. Each interaction frame the
// ghost diffs itself against the pose it had at the previous frame and
// hands that delta to the transform group, then rebases.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Quat, Vec3};

//=== Internal Dependencies ===============================================

use super::types::HandleType;
use crate::core::math::{Pose, ANGLE_EPSILON};

//=== GhostDelta ==========================================================

/// Per-frame change of the ghost, one optional channel per transform kind.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GhostDelta {
    pub position: Option<Vec3>,
    pub rotation: Option<Quat>,
    pub scale: Option<Vec3>,
}

impl GhostDelta {
    pub fn is_empty(&self) -> bool {
        self.position.is_none() && self.rotation.is_none() && self.scale.is_none()
    }
}

//=== Ghost ===============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ghost {
    pose: Pose,
    initial: Pose,
}

impl Ghost {
    pub fn new() -> Self {
        Self {
            pose: Pose::IDENTITY,
            initial: Pose::IDENTITY,
        }
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Mutable pose for widgets during a drag.
    pub fn pose_mut(&mut self) -> &mut Pose {
        &mut self.pose
    }

    /// Snaps the ghost to a freshly computed group aggregate.
    pub fn update(&mut self, average: Pose) {
        self.pose = average;
    }

    /// Back to origin, identity rotation, unit scale.
    pub fn reset(&mut self) {
        self.pose = Pose::IDENTITY;
        self.initial = Pose::IDENTITY;
    }

    //--- Interaction ------------------------------------------------------

    /// Records the pose deltas are measured from.
    pub fn on_interaction_start(&mut self) {
        self.initial = self.pose;
    }

    /// Delta since the last call (or since the interaction started) for
    /// the channels `handle_type` manipulates. Rebases afterwards.
    ///
    /// Channels without a measurable change are left `None`.
    pub fn on_interaction(&mut self, handle_type: HandleType) -> GhostDelta {
        let mut delta = GhostDelta::default();

        if handle_type.has_position() {
            let change = self.pose.position - self.initial.position;
            if change != Vec3::ZERO {
                delta.position = Some(change);
            }
        }

        if handle_type.has_rotation() {
            let change = (self.pose.rotation * self.initial.rotation.inverse()).normalize();
            if change.angle_between(Quat::IDENTITY) > ANGLE_EPSILON {
                delta.rotation = Some(change);
            }
        }

        if handle_type.has_scale() {
            let change = self.pose.scale - self.initial.scale;
            if change != Vec3::ZERO {
                delta.scale = Some(change);
            }
        }

        self.initial = self.pose;
        delta
    }
}

impl Default for Ghost {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_are_incremental() {
        let mut ghost = Ghost::new();
        ghost.update(Pose::from_position(Vec3::X));
        ghost.on_interaction_start();

        ghost.pose_mut().position = Vec3::new(2.0, 0.0, 0.0);
        assert_eq!(ghost.on_interaction(HandleType::Position).position, Some(Vec3::X));

        ghost.pose_mut().position = Vec3::new(2.5, 0.0, 0.0);
        assert_eq!(
            ghost.on_interaction(HandleType::Position).position,
            Some(Vec3::new(0.5, 0.0, 0.0))
        );
    }

    #[test]
    fn only_active_channels_report() {
        let mut ghost = Ghost::new();
        ghost.on_interaction_start();
        ghost.pose_mut().position = Vec3::Y;
        ghost.pose_mut().scale = Vec3::splat(2.0);

        let delta = ghost.on_interaction(HandleType::Scale);
        assert_eq!(delta.position, None);
        assert_eq!(delta.scale, Some(Vec3::ONE));
    }

    #[test]
    fn rotation_delta_is_relative_to_initial() {
        let mut ghost = Ghost::new();
        ghost.update(Pose::IDENTITY.with_rotation(Quat::from_rotation_y(0.4)));
        ghost.on_interaction_start();

        let turn = Quat::from_rotation_x(0.25);
        ghost.pose_mut().rotation = turn * ghost.pose().rotation;

        let delta = ghost.on_interaction(HandleType::Rotation).rotation.unwrap();
        assert!(delta.angle_between(turn) < 1.0e-4);
    }

    #[test]
    fn outline_never_reports() {
        let mut ghost = Ghost::new();
        ghost.on_interaction_start();
        ghost.pose_mut().position = Vec3::ONE;
        assert!(ghost.on_interaction(HandleType::Outline).is_empty());
    }

    #[test]
    fn reset_returns_to_identity() {
        let mut ghost = Ghost::new();
        ghost.update(Pose::from_position(Vec3::ONE));
        ghost.reset();
        assert_eq!(*ghost.pose(), Pose::IDENTITY);
    }
}
