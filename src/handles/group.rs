//=========================================================================
// Transform Group
//=========================================================================
//
// Member set of one session plus the math that turns N independently
// posed entities into one pivot and pushes pivot deltas back out.
//
// Architecture:
//   add / remove ─▶ members (insertion order) + bounds cache
//   average()    ─▶ Pose fed to the Ghost
//   apply(delta) ─▶ update_positions / update_rotations / update_scales
//
// The member set is kept flat under the ancestor relation: an entity is
// never grouped together with one of its ancestors, so no delta is
// applied twice through a parent/child chain.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use glam::{Quat, Vec3};
use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::ghost::GhostDelta;
use super::types::{PivotMode, Space};
use crate::core::math::{Aabb, Pose};
use crate::core::scene::{EntityId, SceneGraph};
use crate::error::{HandleError, Result};

//=== TransformGroup ======================================================

/// Entities manipulated together under one session.
#[derive(Debug, Clone, Default)]
pub struct TransformGroup {
    members: Vec<EntityId>,
    bounds: HashMap<EntityId, Aabb>,
    pivot: PivotMode,
}

impl TransformGroup {
    pub fn new(pivot: PivotMode) -> Self {
        Self {
            members: Vec::new(),
            bounds: HashMap::new(),
            pivot,
        }
    }

    //--- Membership -------------------------------------------------------

    /// Adds an entity and caches its bounds.
    ///
    /// Rejects the entity if one of its ancestors is already a member.
    /// Members that descend from the entity are displaced and returned so
    /// the caller can release their ownership.
    pub fn add<S: SceneGraph + ?Sized>(&mut self, scene: &S, entity: EntityId) -> Result<Vec<EntityId>> {
        if !scene.contains(entity) {
            return Err(HandleError::EntityNotFound(entity));
        }
        if self.contains(entity) {
            return Ok(Vec::new());
        }
        if self.members.iter().any(|&m| scene.is_ancestor_of(m, entity)) {
            return Err(HandleError::RelativeOfSelection(entity));
        }

        let displaced: Vec<EntityId> = self
            .members
            .iter()
            .copied()
            .filter(|&m| scene.is_ancestor_of(entity, m))
            .collect();
        for &member in &displaced {
            debug!("{} displaced by its ancestor {}", member, entity);
            self.remove(member);
        }

        self.members.push(entity);
        self.bounds.insert(entity, scene.bounds(entity));
        Ok(displaced)
    }

    /// Removes an entity. Returns whether the group is now empty.
    pub fn remove(&mut self, entity: EntityId) -> bool {
        self.members.retain(|&m| m != entity);
        self.bounds.remove(&entity);
        self.members.is_empty()
    }

    /// Removes every member, returning them in insertion order.
    pub fn clear(&mut self) -> Vec<EntityId> {
        self.bounds.clear();
        std::mem::take(&mut self.members)
    }

    pub fn members(&self) -> &[EntityId] {
        &self.members
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.members.contains(&entity)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    //--- Pivot & Bounds ---------------------------------------------------

    pub fn pivot(&self) -> PivotMode {
        self.pivot
    }

    pub fn set_pivot(&mut self, pivot: PivotMode) {
        self.pivot = pivot;
    }

    pub fn cached_bounds(&self, entity: EntityId) -> Option<Aabb> {
        self.bounds.get(&entity).copied()
    }

    /// Refreshes the bounds cache from the scene.
    pub fn update_bounds<S: SceneGraph + ?Sized>(&mut self, scene: &S) {
        for &member in &self.members {
            self.bounds.insert(member, scene.bounds(member));
        }
    }

    fn pivot_point(&self, entity: EntityId, pose: &Pose) -> Vec3 {
        match self.pivot {
            PivotMode::OriginPerEntity => pose.position,
            PivotMode::GroupBoundsCenter => self
                .bounds
                .get(&entity)
                .map(|b| b.center)
                .unwrap_or(pose.position),
        }
    }

    //--- Aggregate --------------------------------------------------------

    /// Aggregate pose of the group.
    ///
    /// Position is the mean of the members' pivot points. Rotation is the
    /// product of member rotations in insertion order (Local space only,
    /// identity in World space); this is order dependent and not a true
    /// average. Scale is always one, the ghost only carries scale deltas.
    pub fn average<S: SceneGraph + ?Sized>(&self, scene: &S, space: Space) -> Pose {
        let mut sum = Vec3::ZERO;
        let mut rotation = Quat::IDENTITY;
        let mut count = 0usize;

        for &member in &self.members {
            let Some(pose) = scene.pose(member) else {
                warn!("{} vanished from the scene, skipped in average", member);
                continue;
            };
            sum += self.pivot_point(member, &pose);
            if space == Space::Local {
                rotation *= pose.rotation;
            }
            count += 1;
        }

        if count == 0 {
            return Pose::IDENTITY;
        }

        Pose {
            position: sum / count as f32,
            rotation: rotation.normalize(),
            scale: Vec3::ONE,
        }
    }

    //--- Delta Propagation ------------------------------------------------

    /// Applies the ghost's per-frame delta to every member.
    pub fn apply<S: SceneGraph + ?Sized>(&self, scene: &mut S, delta: &GhostDelta, pivot: Vec3, space: Space) {
        if let Some(translation) = delta.position {
            self.update_positions(scene, translation);
        }
        if let Some(rotation) = delta.rotation {
            self.update_rotations(scene, rotation, pivot, space);
        }
        if let Some(scale) = delta.scale {
            self.update_scales(scene, scale);
        }
    }

    /// Pure translation, independent of pivot mode.
    pub fn update_positions<S: SceneGraph + ?Sized>(&self, scene: &mut S, delta: Vec3) {
        for &member in &self.members {
            if let Some(mut pose) = scene.pose(member) {
                pose.position += delta;
                scene.set_pose(member, pose);
            }
        }
    }

    /// Rotates every member around `pivot`.
    ///
    /// Local space applies the quaternion directly. World space decomposes
    /// it into a world axis and angle and orbits each member around that
    /// fixed axis.
    pub fn update_rotations<S: SceneGraph + ?Sized>(&self, scene: &mut S, delta: Quat, pivot: Vec3, space: Space) {
        let (axis, angle) = delta.normalize().to_axis_angle();

        for &member in &self.members {
            let Some(mut pose) = scene.pose(member) else {
                continue;
            };
            match space {
                Space::Local => pose.rotate_around(pivot, delta),
                Space::World => pose.rotate_around_axis(pivot, axis, angle),
            }
            scene.set_pose(member, pose);
        }
    }

    /// Adds `delta` to every member's local scale.
    ///
    /// With [`PivotMode::GroupBoundsCenter`] each member is shifted back by
    /// the movement of its bounds center, so it scales about that center
    /// instead of its origin. Members whose bounds collapse to their origin
    /// get no correction.
    pub fn update_scales<S: SceneGraph + ?Sized>(&self, scene: &mut S, delta: Vec3) {
        for &member in &self.members {
            let Some(mut pose) = scene.pose(member) else {
                continue;
            };

            let before = match self.pivot {
                PivotMode::GroupBoundsCenter => Some(scene.bounds(member).center),
                PivotMode::OriginPerEntity => None,
            };

            pose.scale += delta;
            scene.set_pose(member, pose);

            if let Some(before) = before {
                let shift = scene.bounds(member).center - before;
                if shift != Vec3::ZERO {
                    if let Some(mut corrected) = scene.pose(member) {
                        corrected.position -= shift;
                        scene.set_pose(member, corrected);
                    }
                }
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
