//=========================================================================
// Axis Widgets
//=========================================================================
//
// Interactable sub-elements of a handle, one per axis, plane or uniform
// scale cube.
//
// Every widget kind shares the same capability set (start, interact,
// end, color) and dispatches on its `WidgetKind` tag:
//
//   PositionAxis  : pointer delta projected on the axis' screen direction
//   PositionPlane : same, on both axes of the plane
//   RotationAxis  : (dx + dy) turned into an angle about the axis
//   ScaleAxis     : (dx + dy) accumulated into a scale factor on one axis
//   ScaleUniform  : same, on all three axes
//
// All deltas are scaled by frame time and sensitivity and written to the
// ghost; the manager forwards the ghost's delta to the transform group.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Quat, Vec2, Vec3};

//=== Internal Dependencies ===============================================

use super::ghost::Ghost;
use super::types::{Axis, AxisMask, HandleId, HandleType, Plane, Space};
use crate::core::camera::Camera;
use crate::core::feedback::Color;

//=== WidgetKind ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    PositionAxis(Axis),
    PositionPlane(Plane),
    RotationAxis(Axis),
    ScaleAxis(Axis),
    ScaleUniform,
}

impl WidgetKind {
    /// Full widget set for a handle type, in a fixed order: position,
    /// rotation, scale.
    pub fn set_for(handle_type: HandleType) -> Vec<WidgetKind> {
        let mut kinds = Vec::new();
        if handle_type.has_position() {
            kinds.extend(Axis::ALL.map(WidgetKind::PositionAxis));
            kinds.extend(Plane::ALL.map(WidgetKind::PositionPlane));
        }
        if handle_type.has_rotation() {
            kinds.extend(Axis::ALL.map(WidgetKind::RotationAxis));
        }
        if handle_type.has_scale() {
            kinds.extend(Axis::ALL.map(WidgetKind::ScaleAxis));
            kinds.push(WidgetKind::ScaleUniform);
        }
        kinds
    }

    /// Whether the axis mask leaves this widget enabled.
    ///
    /// Planes need both of their axes; uniform scale needs all three.
    pub fn enabled_by(self, mask: AxisMask) -> bool {
        match self {
            WidgetKind::PositionAxis(axis) | WidgetKind::RotationAxis(axis) | WidgetKind::ScaleAxis(axis) => {
                mask.contains(axis)
            }
            WidgetKind::PositionPlane(plane) => mask.contains_plane(plane),
            WidgetKind::ScaleUniform => mask == AxisMask::XYZ,
        }
    }

    /// Axis color convention: X red, Y green, Z blue.
    pub fn default_color(self) -> Color {
        let axis = match self {
            WidgetKind::PositionAxis(axis) | WidgetKind::RotationAxis(axis) | WidgetKind::ScaleAxis(axis) => axis,
            WidgetKind::PositionPlane(plane) => plane.normal(),
            WidgetKind::ScaleUniform => return Color::GREY,
        };
        match axis {
            Axis::X => Color::RED,
            Axis::Y => Color::GREEN,
            Axis::Z => Color::BLUE,
        }
    }
}

//=== WidgetId ============================================================

/// Collider identity of a widget: owning handle plus kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId {
    pub handle: HandleId,
    pub kind: WidgetKind,
}

impl WidgetId {
    pub fn new(handle: HandleId, kind: WidgetKind) -> Self {
        Self { handle, kind }
    }
}

//=== InteractionContext ==================================================

/// Everything a widget needs to turn one frame of pointer motion into a
/// ghost delta.
#[derive(Debug, Clone, Copy)]
pub struct InteractionContext<'a> {
    pub camera: &'a Camera,
    pub pointer: Vec2,
    pub previous_pointer: Vec2,
    pub delta_time: f32,
    pub sensitivity: f32,
    pub space: Space,
}

impl InteractionContext<'_> {
    fn pointer_delta(&self) -> Vec2 {
        self.pointer - self.previous_pointer
    }

    fn gain(&self) -> f32 {
        self.delta_time * self.sensitivity
    }

    /// World direction of a handle axis under the current space.
    fn world_axis(&self, ghost: &Ghost, axis: Axis) -> Vec3 {
        match self.space {
            Space::Local => ghost.pose().rotation * axis.unit(),
            Space::World => axis.unit(),
        }
    }
}

//=== Widget ==============================================================

/// One live widget of a handle.
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    kind: WidgetKind,
    enabled: bool,
    color: Color,
    /// Accumulated scale factor of the current drag.
    accumulator: f32,
    start_scale: Vec3,
    start_point: Vec3,
}

impl Widget {
    pub fn new(kind: WidgetKind, enabled: bool) -> Self {
        Self {
            kind,
            enabled,
            color: kind.default_color(),
            accumulator: 0.0,
            start_scale: Vec3::ONE,
            start_point: Vec3::ZERO,
        }
    }

    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// World point where the drag grabbed the widget.
    pub fn start_point(&self) -> Vec3 {
        self.start_point
    }

    //--- Color ------------------------------------------------------------

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_default_color(&mut self) {
        self.color = self.kind.default_color();
    }

    //--- Interaction ------------------------------------------------------

    pub fn start_interaction(&mut self, hit_point: Vec3, ghost: &Ghost) {
        self.start_point = hit_point;
        self.start_scale = ghost.pose().scale;
        self.accumulator = 0.0;
    }

    /// Converts the pointer motion since the previous frame into a change
    /// of the ghost pose.
    pub fn interact(&mut self, ctx: &InteractionContext<'_>, ghost: &mut Ghost) {
        let delta = ctx.pointer_delta();
        if delta == Vec2::ZERO {
            return;
        }

        match self.kind {
            WidgetKind::PositionAxis(axis) => {
                let direction = ctx.world_axis(ghost, axis);
                let amount = Self::projected(ctx, ghost, direction, delta);
                ghost.pose_mut().position += direction * amount;
            }

            WidgetKind::PositionPlane(plane) => {
                let (a, b) = plane.axes();
                let dir_a = ctx.world_axis(ghost, a);
                let dir_b = ctx.world_axis(ghost, b);
                let amount_a = Self::projected(ctx, ghost, dir_a, delta);
                let amount_b = Self::projected(ctx, ghost, dir_b, delta);
                ghost.pose_mut().position += dir_a * amount_a + dir_b * amount_b;
            }

            WidgetKind::RotationAxis(axis) => {
                let direction = ctx.world_axis(ghost, axis);
                let angle = (delta.x + delta.y) * ctx.gain();
                let pose = ghost.pose_mut();
                pose.rotation = (Quat::from_axis_angle(direction, angle) * pose.rotation).normalize();
            }

            WidgetKind::ScaleAxis(axis) => {
                self.accumulate_scale(ctx, ghost, axis.unit(), delta);
            }

            WidgetKind::ScaleUniform => {
                self.accumulate_scale(ctx, ghost, Vec3::ONE, delta);
            }
        }
    }

    pub fn end_interaction(&mut self) {
        self.accumulator = 0.0;
        self.start_scale = Vec3::ONE;
        self.set_default_color();
    }

    //--- Internal Helpers -------------------------------------------------

    fn projected(ctx: &InteractionContext<'_>, ghost: &Ghost, direction: Vec3, delta: Vec2) -> f32 {
        let screen = ctx.camera.screen_direction(ghost.pose().position, direction);
        delta.dot(screen) * ctx.gain()
    }

    fn accumulate_scale(&mut self, ctx: &InteractionContext<'_>, ghost: &mut Ghost, axis: Vec3, delta: Vec2) {
        self.accumulator += (delta.x + delta.y) * ctx.gain() * 2.0;
        ghost.pose_mut().scale = self.start_scale + self.start_scale * axis * self.accumulator;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
