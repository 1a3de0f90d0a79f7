//=========================================================================
// Scene Access
//=========================================================================
//
// Contract between the handle core and the host's scene graph.
//
// The scene owns its nodes; the core only reads and writes poses, asks
// for bounds and walks parent links to keep selections flat.
//
// Architecture:
//   SceneGraph (trait)
//     ├─ pose / set_pose       : world position + rotation, local scale
//     ├─ parent                : hierarchy walk for ancestor checks
//     └─ renderer/derived bounds
//   MemoryScene                : hierarchical in-memory implementation
//
//=========================================================================

//=== Module Declarations =================================================

mod memory_scene;

//=== Public API ==========================================================

pub use memory_scene::MemoryScene;

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use crate::core::math::{Aabb, Pose};

//=== EntityId ============================================================

/// Opaque reference to a scene node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

//=== SceneGraph ==========================================================

/// Scene collaborator used by transform groups.
///
/// # Minimal Implementation
///
/// `contains`, `pose`, `set_pose`, `parent` and `renderer_bounds` are
/// required. Bounds fall back to a point at the entity's position and
/// ancestry is derived from `parent`.
pub trait SceneGraph {
    /// Whether the entity is alive in the scene.
    fn contains(&self, entity: EntityId) -> bool;

    /// World position, world rotation and local scale.
    fn pose(&self, entity: EntityId) -> Option<Pose>;

    /// Writes a pose back. Unknown entities are ignored.
    fn set_pose(&mut self, entity: EntityId, pose: Pose);

    fn parent(&self, entity: EntityId) -> Option<EntityId>;

    /// World bounds of the entity's own renderer, if it has one.
    fn renderer_bounds(&self, entity: EntityId) -> Option<Aabb>;

    /// Bounds for entities without a renderer.
    ///
    /// Default implementation is a zero-sized box at the entity's position.
    fn derived_bounds(&self, entity: EntityId) -> Aabb {
        let position = self
            .pose(entity)
            .map(|pose| pose.position)
            .unwrap_or_default();
        Aabb::from_point(position)
    }

    /// Renderer bounds when available, derived bounds otherwise.
    fn bounds(&self, entity: EntityId) -> Aabb {
        self.renderer_bounds(entity)
            .unwrap_or_else(|| self.derived_bounds(entity))
    }

    /// Whether `ancestor` appears anywhere above `entity` in the hierarchy.
    fn is_ancestor_of(&self, ancestor: EntityId, entity: EntityId) -> bool {
        let mut current = self.parent(entity);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }
}
