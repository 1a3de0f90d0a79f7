//=========================================================================
// Memory Scene
//=========================================================================
//
// Hierarchical in-memory scene graph implementing `SceneGraph`.
//
// Nodes store their pose relative to their parent. World poses are
// composed on demand, so moving a parent carries its children along,
// exactly like a real engine scene.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use glam::{Quat, Vec3};
use log::warn;

//=== Internal Dependencies ===============================================

use super::{EntityId, SceneGraph};
use crate::core::math::{Aabb, Pose};

//=== Node ================================================================

#[derive(Debug, Clone)]
struct Node {
    parent: Option<EntityId>,
    children: Vec<EntityId>,
    local: Pose,
    /// Mesh bounds in the node's local space.
    mesh: Option<Aabb>,
}

/// World placement used while composing the hierarchy.
#[derive(Debug, Clone, Copy)]
struct WorldFrame {
    position: Vec3,
    rotation: Quat,
    lossy_scale: Vec3,
}

impl WorldFrame {
    const ROOT: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        lossy_scale: Vec3::ONE,
    };
}

//=== MemoryScene =========================================================

/// In-memory scene with parent/child links and optional mesh bounds.
#[derive(Debug, Default, Clone)]
pub struct MemoryScene {
    nodes: HashMap<EntityId, Node>,
    next_id: u64,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Construction -----------------------------------------------------

    /// Spawns a root node at a world pose.
    pub fn spawn(&mut self, pose: Pose) -> EntityId {
        self.insert(None, pose)
    }

    /// Spawns a child whose `local` pose is relative to `parent`.
    ///
    /// Returns `None` if the parent does not exist.
    pub fn spawn_child(&mut self, parent: EntityId, local: Pose) -> Option<EntityId> {
        if !self.nodes.contains_key(&parent) {
            warn!("Cannot spawn child of unknown {}", parent);
            return None;
        }
        let id = self.insert(Some(parent), local);
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(id);
        }
        Some(id)
    }

    /// Attaches local-space mesh bounds, giving the node a renderer.
    pub fn set_mesh_bounds(&mut self, entity: EntityId, bounds: Aabb) {
        match self.nodes.get_mut(&entity) {
            Some(node) => node.mesh = Some(bounds),
            None => warn!("Cannot attach mesh to unknown {}", entity),
        }
    }

    /// Removes a node and its whole subtree.
    pub fn despawn(&mut self, entity: EntityId) {
        let Some(node) = self.nodes.remove(&entity) else {
            return;
        };
        if let Some(parent) = node.parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|&c| c != entity);
        }
        for child in node.children {
            self.despawn(child);
        }
    }

    pub fn children(&self, entity: EntityId) -> &[EntityId] {
        self.nodes
            .get(&entity)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    //--- Internal Helpers -------------------------------------------------

    fn insert(&mut self, parent: Option<EntityId>, local: Pose) -> EntityId {
        self.next_id += 1;
        let id = EntityId(self.next_id);
        self.nodes.insert(
            id,
            Node {
                parent,
                children: Vec::new(),
                local,
                mesh: None,
            },
        );
        id
    }

    fn world_frame(&self, entity: EntityId) -> Option<WorldFrame> {
        let node = self.nodes.get(&entity)?;
        let parent = match node.parent {
            Some(parent) => self.world_frame(parent)?,
            None => WorldFrame::ROOT,
        };

        Some(WorldFrame {
            position: parent.position + parent.rotation * (parent.lossy_scale * node.local.position),
            rotation: parent.rotation * node.local.rotation,
            lossy_scale: parent.lossy_scale * node.local.scale,
        })
    }

    fn descendants_renderer_bounds(&self, entity: EntityId) -> Option<Aabb> {
        let mut acc: Option<Aabb> = None;
        for &child in self.children(entity) {
            let own = self.renderer_bounds(child);
            let nested = self.descendants_renderer_bounds(child);
            for bounds in [own, nested].into_iter().flatten() {
                acc = Some(match acc {
                    Some(current) => current.union(&bounds),
                    None => bounds,
                });
            }
        }
        acc
    }
}

//=== SceneGraph ==========================================================

impl SceneGraph for MemoryScene {
    fn contains(&self, entity: EntityId) -> bool {
        self.nodes.contains_key(&entity)
    }

    fn pose(&self, entity: EntityId) -> Option<Pose> {
        let frame = self.world_frame(entity)?;
        let local_scale = self.nodes.get(&entity)?.local.scale;
        Some(Pose {
            position: frame.position,
            rotation: frame.rotation,
            scale: local_scale,
        })
    }

    fn set_pose(&mut self, entity: EntityId, pose: Pose) {
        let Some(node) = self.nodes.get(&entity) else {
            warn!("Ignoring pose write to unknown {}", entity);
            return;
        };
        let parent = match node.parent {
            Some(parent) => self.world_frame(parent).unwrap_or(WorldFrame::ROOT),
            None => WorldFrame::ROOT,
        };

        let inverse = parent.rotation.inverse();
        let divisor = Vec3::select(parent.lossy_scale.cmpeq(Vec3::ZERO), Vec3::ONE, parent.lossy_scale);
        let local = Pose {
            position: inverse * (pose.position - parent.position) / divisor,
            rotation: (inverse * pose.rotation).normalize(),
            scale: pose.scale,
        };

        if let Some(node) = self.nodes.get_mut(&entity) {
            node.local = local;
        }
    }

    fn parent(&self, entity: EntityId) -> Option<EntityId> {
        self.nodes.get(&entity)?.parent
    }

    fn renderer_bounds(&self, entity: EntityId) -> Option<Aabb> {
        let mesh = self.nodes.get(&entity)?.mesh?;
        let frame = self.world_frame(entity)?;
        let world = Pose {
            position: frame.position,
            rotation: frame.rotation,
            scale: frame.lossy_scale,
        };
        Some(mesh.transformed(&world))
    }

    fn derived_bounds(&self, entity: EntityId) -> Aabb {
        self.descendants_renderer_bounds(entity).unwrap_or_else(|| {
            let position = self.pose(entity).map(|p| p.position).unwrap_or_default();
            Aabb::from_point(position)
        })
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
    fn child_world_pose_composes_parent() {
        let mut scene = MemoryScene::new();
        let parent = scene.spawn(
            Pose::from_position(Vec3::new(1.0, 0.0, 0.0)).with_rotation(Quat::from_rotation_y(FRAC_PI_2)),
        );
        let child = scene
            .spawn_child(parent, Pose::from_position(Vec3::new(1.0, 0.0, 0.0)))
            .unwrap();

        let pose = scene.pose(child).unwrap();
        assert!(approx(pose.position, Vec3::new(1.0, 0.0, -1.0)));
    }

    #[test]
    fn moving_parent_carries_child() {
        let mut scene = MemoryScene::new();
        let parent = scene.spawn(Pose::IDENTITY);
        let child = scene
            .spawn_child(parent, Pose::from_position(Vec3::X))
            .unwrap();

        scene.set_pose(parent, Pose::from_position(Vec3::new(0.0, 5.0, 0.0)));
        assert!(approx(scene.pose(child).unwrap().position, Vec3::new(1.0, 5.0, 0.0)));
    }

    #[test]
    fn set_pose_round_trips_under_parent() {
        let mut scene = MemoryScene::new();
        let parent = scene.spawn(
            Pose::from_position(Vec3::new(3.0, 0.0, 0.0))
                .with_rotation(Quat::from_rotation_z(0.7))
                .with_scale(Vec3::splat(2.0)),
        );
        let child = scene.spawn_child(parent, Pose::IDENTITY).unwrap();

        let target = Pose::from_position(Vec3::new(-1.0, 2.0, 4.0)).with_rotation(Quat::from_rotation_x(0.3));
        scene.set_pose(child, target);

        let pose = scene.pose(child).unwrap();
        assert!(approx(pose.position, target.position));
        assert!(pose.rotation.angle_between(target.rotation) < 1.0e-4);
    }

    #[test]
    fn ancestry_walks_whole_chain() {
        let mut scene = MemoryScene::new();
        let root = scene.spawn(Pose::IDENTITY);
        let mid = scene.spawn_child(root, Pose::IDENTITY).unwrap();
        let leaf = scene.spawn_child(mid, Pose::IDENTITY).unwrap();

        assert!(scene.is_ancestor_of(root, leaf));
        assert!(scene.is_ancestor_of(mid, leaf));
        assert!(!scene.is_ancestor_of(leaf, root));
        assert!(!scene.is_ancestor_of(leaf, leaf));
    }

    #[test]
    fn bounds_prefer_renderer_then_children_then_point() {
        let mut scene = MemoryScene::new();
        let root = scene.spawn(Pose::from_position(Vec3::new(0.0, 1.0, 0.0)));
        assert_eq!(scene.bounds(root), Aabb::from_point(Vec3::new(0.0, 1.0, 0.0)));

        let child = scene.spawn_child(root, Pose::from_position(Vec3::X)).unwrap();
        scene.set_mesh_bounds(child, Aabb::new(Vec3::ZERO, Vec3::splat(0.5)));
        assert!(scene.renderer_bounds(root).is_none());
        assert!(approx(scene.bounds(root).center, Vec3::new(1.0, 1.0, 0.0)));

        scene.set_mesh_bounds(root, Aabb::new(Vec3::ZERO, Vec3::ONE));
        assert!(approx(scene.bounds(root).center, Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn despawn_removes_subtree() {
        let mut scene = MemoryScene::new();
        let root = scene.spawn(Pose::IDENTITY);
        let child = scene.spawn_child(root, Pose::IDENTITY).unwrap();
        scene.despawn(root);

        assert!(!scene.contains(root));
        assert!(!scene.contains(child));
        assert!(scene.is_empty());
    }
}
