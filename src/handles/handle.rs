//=========================================================================
// Handle
//=========================================================================
//
// One manipulation session: type, space, axis mask, widget set, ghost
// and transform group.
//
// Architecture:
//   change_type() ─▶ clear widgets ─▶ full set for the new type
//   change_axes() ─▶ enable/disable within the current set
//   sync_pose()   ─▶ handle transform follows the ghost (+ auto-scale)
//
// Outline attachment itself goes through the manager, which owns the
// visual feedback collaborator; the handle only tracks whether its
// members are currently outlined.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Quat, Vec3};

//=== Internal Dependencies ===============================================

use super::config::HandleDefaults;
use super::ghost::{Ghost, GhostDelta};
use super::group::TransformGroup;
use super::types::{AxisMask, HandleId, HandleType, PivotMode, Snapping, Space};
use super::widget::{InteractionContext, Widget, WidgetId, WidgetKind};
use crate::core::camera::Camera;
use crate::core::feedback::Color;
use crate::core::math::Pose;
use crate::core::scene::SceneGraph;

//=== WidgetPlacement =====================================================

/// World placement of one enabled widget, for hosts that mirror widget
/// colliders and meshes into their own scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetPlacement {
    pub id: WidgetId,
    pub origin: Vec3,
    /// Frame the widget's axis or plane is expressed in.
    pub orientation: Quat,
    /// Uniform size factor (auto-scale), one otherwise.
    pub size: f32,
    pub color: Color,
}

//=== Handle ==============================================================

#[derive(Debug, Clone)]
pub struct Handle {
    id: HandleId,
    handle_type: HandleType,
    space: Space,
    axes: AxisMask,
    snapping: Snapping,
    widgets: Vec<Widget>,
    ghost: Ghost,
    group: TransformGroup,
    /// Where the widgets are drawn.
    transform: Pose,
    auto_scale: Option<f32>,
    outline_attached: bool,
}

impl Handle {
    pub fn new(id: HandleId, defaults: &HandleDefaults) -> Self {
        let mut handle = Self {
            id,
            handle_type: defaults.handle_type,
            space: defaults.space,
            axes: defaults.axes,
            snapping: defaults.snapping,
            widgets: Vec::new(),
            ghost: Ghost::new(),
            group: TransformGroup::new(defaults.pivot),
            transform: Pose::IDENTITY,
            auto_scale: defaults.auto_scale_pixels,
            outline_attached: false,
        };
        handle.change_type(defaults.handle_type);
        handle.change_space(defaults.space);
        handle
    }

    //--- Accessors --------------------------------------------------------

    pub fn id(&self) -> HandleId {
        self.id
    }

    pub fn handle_type(&self) -> HandleType {
        self.handle_type
    }

    pub fn space(&self) -> Space {
        self.space
    }

    pub fn axes(&self) -> AxisMask {
        self.axes
    }

    pub fn pivot(&self) -> PivotMode {
        self.group.pivot()
    }

    pub fn snapping(&self) -> Snapping {
        self.snapping
    }

    pub fn set_snapping(&mut self, snapping: Snapping) {
        self.snapping = snapping;
    }

    pub fn ghost(&self) -> &Ghost {
        &self.ghost
    }

    pub fn ghost_mut(&mut self) -> &mut Ghost {
        &mut self.ghost
    }

    pub fn group(&self) -> &TransformGroup {
        &self.group
    }

    pub fn group_mut(&mut self) -> &mut TransformGroup {
        &mut self.group
    }

    /// Pose the widgets are drawn at.
    pub fn transform(&self) -> &Pose {
        &self.transform
    }

    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn widget(&self, kind: WidgetKind) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.kind() == kind)
    }

    pub fn widget_mut(&mut self, kind: WidgetKind) -> Option<&mut Widget> {
        self.widgets.iter_mut().find(|w| w.kind() == kind)
    }

    /// Kinds of the enabled widgets, in set order.
    pub fn active_widgets(&self) -> Vec<WidgetKind> {
        self.widgets
            .iter()
            .filter(|w| w.is_enabled())
            .map(|w| w.kind())
            .collect()
    }

    pub fn is_outline_attached(&self) -> bool {
        self.outline_attached
    }

    pub(crate) fn set_outline_attached(&mut self, attached: bool) {
        self.outline_attached = attached;
    }

    //--- Configuration ----------------------------------------------------

    /// Replaces the widget set with the full set of `handle_type`.
    ///
    /// Types with a scale component pin the space to Local.
    pub fn change_type(&mut self, handle_type: HandleType) {
        self.handle_type = handle_type;
        self.widgets.clear();
        self.widgets.extend(
            WidgetKind::set_for(handle_type)
                .into_iter()
                .map(|kind| Widget::new(kind, kind.enabled_by(self.axes))),
        );
        if handle_type.has_scale() {
            self.space = Space::Local;
        }
    }

    /// Requests a space. Types with a scale component stay Local.
    ///
    /// Returns the space actually applied.
    pub fn change_space(&mut self, space: Space) -> Space {
        self.space = if self.handle_type.has_scale() {
            Space::Local
        } else {
            space
        };
        self.space
    }

    /// Enables only the widgets the mask covers.
    pub fn change_axes(&mut self, axes: AxisMask) {
        self.axes = axes;
        for widget in &mut self.widgets {
            widget.set_enabled(widget.kind().enabled_by(axes));
        }
    }

    pub fn change_pivot(&mut self, pivot: PivotMode) {
        self.group.set_pivot(pivot);
    }

    pub fn set_auto_scale(&mut self, pixels: Option<f32>) {
        self.auto_scale = pixels;
        if pixels.is_none() {
            self.transform.scale = Vec3::ONE;
        }
    }

    //--- Interaction ------------------------------------------------------

    /// Starts a drag on an enabled widget. Returns `false` when the widget
    /// is not part of the current set.
    pub fn start_interaction(&mut self, kind: WidgetKind, hit_point: Vec3) -> bool {
        let Some(widget) = self
            .widgets
            .iter_mut()
            .find(|w| w.kind() == kind && w.is_enabled())
        else {
            return false;
        };
        widget.start_interaction(hit_point, &self.ghost);
        self.ghost.on_interaction_start();
        true
    }

    /// Runs one drag frame and returns the ghost delta to propagate.
    pub fn interact(&mut self, kind: WidgetKind, ctx: &InteractionContext<'_>) -> Option<GhostDelta> {
        let widget = self.widgets.iter_mut().find(|w| w.kind() == kind)?;
        widget.interact(ctx, &mut self.ghost);
        Some(self.ghost.on_interaction(self.handle_type))
    }

    pub fn end_interaction(&mut self, kind: WidgetKind) {
        if let Some(widget) = self.widget_mut(kind) {
            widget.end_interaction();
        }
    }

    //--- Per-Frame --------------------------------------------------------

    /// Recomputes the group aggregate and moves the ghost onto it.
    ///
    /// An empty group resets the ghost.
    pub fn refresh_ghost<S: SceneGraph + ?Sized>(&mut self, scene: &S) {
        if self.group.is_empty() {
            self.ghost.reset();
        } else {
            let average = self.group.average(scene, self.space);
            self.ghost.update(average);
        }
    }

    /// Moves the handle transform onto the ghost.
    ///
    /// Rotation follows the ghost in Local space or for pure scale
    /// handles, otherwise it stays world aligned.
    pub fn sync_pose(&mut self, camera: Option<&Camera>) {
        let ghost = self.ghost.pose();
        self.transform.position = ghost.position;
        self.transform.rotation = if self.space == Space::Local || self.handle_type == HandleType::Scale {
            ghost.rotation
        } else {
            Quat::IDENTITY
        };

        if let (Some(pixels), Some(camera)) = (self.auto_scale, camera) {
            let size = camera.world_size_for_pixels(self.transform.position, pixels);
            self.transform.scale = Vec3::splat(size);
        }
    }

    /// World placements of the enabled widgets.
    pub fn placements(&self) -> Vec<WidgetPlacement> {
        self.widgets
            .iter()
            .filter(|w| w.is_enabled())
            .map(|w| WidgetPlacement {
                id: WidgetId::new(self.id, w.kind()),
                origin: self.transform.position,
                orientation: self.transform.rotation,
                size: self.transform.scale.x,
                color: w.color(),
            })
            .collect()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
