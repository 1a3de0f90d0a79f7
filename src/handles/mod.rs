//=========================================================================
// Handles
//
// Runtime transform handles: sessions, widgets, ghosts and groups.
//
// Architecture:
// ```text
//   HandleManager ─┬─ Handle (one per session)
//                  │    ├─ Widget*        axis / plane / uniform widgets
//                  │    ├─ Ghost          proxy pose driven by widgets
//                  │    └─ TransformGroup member entities + bounds cache
//                  ├─ DeferredQueue       next-tick outline attachment
//                  └─ EventHub            lifecycle notifications
// ```
//
//=========================================================================

pub mod config;
pub mod deferred;
pub mod events;
pub mod ghost;
pub mod group;
pub mod handle;
pub mod manager;
pub mod types;
pub mod widget;

//=== Public Exports ======================================================

pub use config::{HandleDefaults, HandleManagerBuilder, ManagerConfig};
pub use deferred::{DeferredQueue, DeferredTask};
pub use events::{EventHub, HandleEvent, SubscriptionId};
pub use ghost::{Ghost, GhostDelta};
pub use group::TransformGroup;
pub use handle::{Handle, WidgetPlacement};
pub use manager::{Frame, HandleManager};
pub use types::{Axis, AxisMask, HandleId, HandleType, PivotMode, Plane, Snapping, SnappingType, Space};
pub use widget::{InteractionContext, Widget, WidgetId, WidgetKind};
