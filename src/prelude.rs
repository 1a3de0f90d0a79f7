//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_handles::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Manager and configuration
pub use crate::handles::{Frame, HandleDefaults, HandleManager, HandleManagerBuilder, ManagerConfig};

// Session vocabulary
pub use crate::handles::{
    Axis, AxisMask, HandleEvent, HandleId, HandleType, PivotMode, Plane, Snapping, SnappingType, Space,
    SubscriptionId, WidgetId, WidgetKind, WidgetPlacement,
};

// Collaborators
pub use crate::core::camera::{Camera, CameraSource};
pub use crate::core::feedback::{Color, NoFeedback, RecordingFeedback, VisualFeedback};
pub use crate::core::query::{HitTarget, LayerMask, Ray, RayHit, SpatialQuery};
pub use crate::core::scene::{EntityId, MemoryScene, SceneGraph};

// Math
pub use crate::core::math::{Aabb, Pose};

// Input
pub use crate::core::input::{
    input_channel, InputAdapter, InputCollector, InputEvent, InputSystem, KeyCode, Modifier, Modifiers,
    MouseButton, Shortcut, ShortcutMapper,
};

// Host helpers
pub use crate::platform::WinitBridge;
pub use crate::selection::{SelectionChange, SelectionController};

// Errors
pub use crate::error::HandleError;
