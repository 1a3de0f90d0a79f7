//=========================================================================
// Handle Types
//=========================================================================
//
// Identifiers and configuration enums shared by handles, widgets and the
// manager.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use glam::Vec3;

//=== Internal Dependencies ===============================================

use crate::error::HandleError;

//=== HandleId ============================================================

/// Identifier of one manipulation session.
///
/// Ids are never reused by a manager, so a stale id always resolves to
/// [`HandleError::HandleNotFound`] instead of aliasing a newer session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(pub u64);

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({})", self.0)
    }
}

//=== Axis & Plane ========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Unit vector in the handle's own frame.
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

/// Pair of axes a planar position widget moves along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Plane {
    XY,
    XZ,
    YZ,
}

impl Plane {
    pub const ALL: [Plane; 3] = [Plane::XY, Plane::XZ, Plane::YZ];

    pub fn axes(self) -> (Axis, Axis) {
        match self {
            Plane::XY => (Axis::X, Axis::Y),
            Plane::XZ => (Axis::X, Axis::Z),
            Plane::YZ => (Axis::Y, Axis::Z),
        }
    }

    /// Axis perpendicular to the plane.
    pub fn normal(self) -> Axis {
        match self {
            Plane::XY => Axis::Z,
            Plane::XZ => Axis::Y,
            Plane::YZ => Axis::X,
        }
    }
}

//=== AxisMask ============================================================

/// Which axes a handle exposes widgets for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AxisMask {
    X,
    Y,
    Z,
    XY,
    XZ,
    YZ,
    #[default]
    XYZ,
}

impl AxisMask {
    pub fn contains(self, axis: Axis) -> bool {
        let (x, y, z) = self.flags();
        match axis {
            Axis::X => x,
            Axis::Y => y,
            Axis::Z => z,
        }
    }

    pub fn contains_plane(self, plane: Plane) -> bool {
        let (a, b) = plane.axes();
        self.contains(a) && self.contains(b)
    }

    fn flags(self) -> (bool, bool, bool) {
        match self {
            AxisMask::X => (true, false, false),
            AxisMask::Y => (false, true, false),
            AxisMask::Z => (false, false, true),
            AxisMask::XY => (true, true, false),
            AxisMask::XZ => (true, false, true),
            AxisMask::YZ => (false, true, true),
            AxisMask::XYZ => (true, true, true),
        }
    }
}

//=== HandleType ==========================================================

/// Manipulation mode of a session.
///
/// `Outline` is exclusive; the other variants are the seven non-empty
/// combinations of position, rotation and scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum HandleType {
    #[default]
    Outline = 0,
    Position = 1,
    Rotation = 2,
    Scale = 3,
    PositionRotation = 4,
    PositionScale = 5,
    RotationScale = 6,
    All = 7,
}

impl HandleType {
    pub fn has_position(self) -> bool {
        matches!(
            self,
            HandleType::Position | HandleType::PositionRotation | HandleType::PositionScale | HandleType::All
        )
    }

    pub fn has_rotation(self) -> bool {
        matches!(
            self,
            HandleType::Rotation | HandleType::PositionRotation | HandleType::RotationScale | HandleType::All
        )
    }

    pub fn has_scale(self) -> bool {
        matches!(
            self,
            HandleType::Scale | HandleType::PositionScale | HandleType::RotationScale | HandleType::All
        )
    }

    pub fn is_outline(self) -> bool {
        self == HandleType::Outline
    }
}

impl TryFrom<u8> for HandleType {
    type Error = HandleError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(HandleType::Outline),
            1 => Ok(HandleType::Position),
            2 => Ok(HandleType::Rotation),
            3 => Ok(HandleType::Scale),
            4 => Ok(HandleType::PositionRotation),
            5 => Ok(HandleType::PositionScale),
            6 => Ok(HandleType::RotationScale),
            7 => Ok(HandleType::All),
            other => Err(HandleError::UnknownHandleType(other)),
        }
    }
}

//=== Space ===============================================================

/// Frame the widgets are aligned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Space {
    /// Aligned to the ghost's rotation.
    #[default]
    Local,
    World,
}

impl Space {
    pub fn toggled(self) -> Self {
        match self {
            Space::Local => Space::World,
            Space::World => Space::Local,
        }
    }
}

//=== PivotMode ===========================================================

/// Reference point each member contributes to the aggregate position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PivotMode {
    #[default]
    OriginPerEntity,
    GroupBoundsCenter,
}

impl PivotMode {
    pub fn toggled(self) -> Self {
        match self {
            PivotMode::OriginPerEntity => PivotMode::GroupBoundsCenter,
            PivotMode::GroupBoundsCenter => PivotMode::OriginPerEntity,
        }
    }
}

//=== Snapping ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SnappingType {
    /// Increments are measured from the drag start.
    #[default]
    Relative,
    /// Increments are measured on the world grid.
    Absolute,
}

/// Snap increments carried by a handle for hosts that quantize poses.
///
/// Zero disables snapping on that channel. The core stores these values
/// but never applies them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Snapping {
    pub kind: SnappingType,
    pub position: Vec3,
    pub rotation: f32,
    pub scale: Vec3,
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_type_from_u8_rejects_out_of_range() {
        assert_eq!(HandleType::try_from(7), Ok(HandleType::All));
        assert_eq!(HandleType::try_from(8), Err(HandleError::UnknownHandleType(8)));
    }

    #[test]
    fn handle_type_components() {
        assert!(HandleType::All.has_position());
        assert!(HandleType::All.has_rotation());
        assert!(HandleType::All.has_scale());
        assert!(!HandleType::Outline.has_position());
        assert!(HandleType::RotationScale.has_scale());
        assert!(!HandleType::RotationScale.has_position());
    }

    #[test]
    fn every_u8_value_round_trips() {
        for raw in 0u8..8 {
            let handle_type = HandleType::try_from(raw).unwrap();
            assert_eq!(handle_type as u8, raw);
        }
    }

    #[test]
    fn axis_mask_planes() {
        assert!(AxisMask::XYZ.contains_plane(Plane::XZ));
        assert!(AxisMask::XY.contains_plane(Plane::XY));
        assert!(!AxisMask::XY.contains_plane(Plane::YZ));
        assert!(!AxisMask::X.contains(Axis::Y));
    }

    #[test]
    fn toggles_flip() {
        assert_eq!(Space::Local.toggled(), Space::World);
        assert_eq!(PivotMode::GroupBoundsCenter.toggled(), PivotMode::OriginPerEntity);
    }
}
