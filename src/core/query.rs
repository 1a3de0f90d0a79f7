//=========================================================================
// Spatial Query
//=========================================================================
//
// Contract for the ray-intersection collaborator.
//
// The physics backend is external. It reports what a pointer ray crossed,
// nearest first; the manager decides which of those hits is a widget.
//
//   Camera ──ray──> SpatialQuery::query() ──> [RayHit] (ascending distance)
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;

//=== Internal Dependencies ===============================================

use crate::core::scene::EntityId;
use crate::handles::WidgetId;

//=== Ray =================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Creates a ray, normalizing `direction`.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at parameter `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

//=== LayerMask ===========================================================

/// Bitmask of collision layers a query should consider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const ALL: Self = Self(u32::MAX);
    pub const NONE: Self = Self(0);

    pub const fn layer(index: u32) -> Self {
        Self(1 << index)
    }

    pub fn contains(self, layer: u32) -> bool {
        layer < 32 && self.0 & (1 << layer) != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

//=== Hits ================================================================

/// What a collider belongs to.
///
/// Widget colliders are mirrored into the physics world by the host from
/// [`crate::handles::HandleManager::widget_placements`]; entity colliders
/// are ordinary scene geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitTarget {
    Widget(WidgetId),
    Entity(EntityId),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub distance: f32,
    pub point: Vec3,
    pub target: HitTarget,
}

impl RayHit {
    pub fn widget(distance: f32, point: Vec3, widget: WidgetId) -> Self {
        Self {
            distance,
            point,
            target: HitTarget::Widget(widget),
        }
    }

    pub fn entity(distance: f32, point: Vec3, entity: EntityId) -> Self {
        Self {
            distance,
            point,
            target: HitTarget::Entity(entity),
        }
    }
}

//=== SpatialQuery ========================================================

/// Ray-intersection collaborator.
///
/// Implementations return at most `max_hits` intersections within
/// `max_distance` on the layers in `mask`. Ordering is not trusted; the
/// caller sorts by distance.
pub trait SpatialQuery {
    fn query(&self, ray: &Ray, max_distance: f32, mask: LayerMask, max_hits: usize) -> Vec<RayHit>;
}

/// Queries and returns hits sorted nearest first.
pub fn sorted_hits(
    query: &dyn SpatialQuery,
    ray: &Ray,
    max_distance: f32,
    mask: LayerMask,
    max_hits: usize,
) -> Vec<RayHit> {
    let mut hits = query.query(ray, max_distance, mask, max_hits);
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits.truncate(max_hits);
    hits
}

//=========================================================================
// Unit Tests
//=========================================================================
