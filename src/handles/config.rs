//=========================================================================
// Handle Manager Configuration
//
// Builder for the handle manager plus the defaults stamped onto every new
// session.
//
// Architecture:
// ```text
//     HandleManagerBuilder ──build(scene, feedback)──> HandleManager
//         │
//         ├─ picking     : max_hits, max_distance, layer_mask
//         ├─ interaction : sensitivity, highlight_color, keyboard_input
//         └─ defaults    : type, space, axes, pivot, snapping, auto-scale
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use super::manager::HandleManager;
use super::types::{AxisMask, HandleType, PivotMode, Snapping, Space};
use crate::core::feedback::{Color, VisualFeedback};
use crate::core::query::LayerMask;
use crate::core::scene::SceneGraph;

/// On-screen handle size used by [`HandleManagerBuilder::with_default_auto_scale`].
pub const DEFAULT_AUTO_SCALE_PIXELS: f32 = 192.0;

//=== HandleDefaults ======================================================

/// Settings every new session starts with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleDefaults {
    pub handle_type: HandleType,
    pub space: Space,
    pub axes: AxisMask,
    pub pivot: PivotMode,
    pub snapping: Snapping,
    /// On-screen size in pixels to hold the handle at, if auto-scaling.
    pub auto_scale_pixels: Option<f32>,
}

impl Default for HandleDefaults {
    fn default() -> Self {
        Self {
            handle_type: HandleType::Outline,
            space: Space::Local,
            axes: AxisMask::XYZ,
            pivot: PivotMode::OriginPerEntity,
            snapping: Snapping::default(),
            auto_scale_pixels: None,
        }
    }
}

//=== ManagerConfig =======================================================

/// Resolved configuration of a [`HandleManager`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManagerConfig {
    pub max_hits: usize,
    pub max_distance: f32,
    pub layer_mask: LayerMask,
    pub highlight_color: Color,
    pub sensitivity: f32,
    pub keyboard_input: bool,
    pub defaults: HandleDefaults,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            max_hits: 16,
            max_distance: 1000.0,
            layer_mask: LayerMask::ALL,
            highlight_color: Color::WHITE,
            sensitivity: 1.0,
            keyboard_input: true,
            defaults: HandleDefaults::default(),
        }
    }
}

//=== HandleManagerBuilder ================================================

/// Builder for configuring and constructing a [`HandleManager`].
///
/// # Default Values
///
/// - **max hits**: 16 ray hits per pick
/// - **max distance**: 1000 world units
/// - **layer mask**: all layers
/// - **highlight color**: white
/// - **sensitivity**: 1.0
/// - **keyboard shortcuts**: enabled
/// - **new sessions**: Outline, Local space, XYZ axes, origin pivot, no auto-scale
///
/// # Examples
///
/// ```
/// use aetheric_handles::prelude::*;
///
/// let mut manager = HandleManagerBuilder::new()
///     .with_default_type(HandleType::Position)
///     .with_sensitivity(2.0)
///     .build(MemoryScene::new(), NoFeedback);
///
/// let entity = manager.scene_mut().spawn(Pose::IDENTITY);
/// let handle = manager.create_handle(entity).unwrap();
/// assert_eq!(manager.handle_for_target(entity), Some(handle));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HandleManagerBuilder {
    config: ManagerConfig,
}

impl HandleManagerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    //--- Picking ----------------------------------------------------------

    /// Maximum ray hits considered per pick.
    ///
    /// # Panics
    ///
    /// Panics if `max_hits == 0`.
    pub fn with_max_hits(mut self, max_hits: usize) -> Self {
        assert!(max_hits > 0, "Max hits must be positive");
        self.config.max_hits = max_hits;
        self
    }

    /// Maximum pick distance in world units.
    ///
    /// # Panics
    ///
    /// Panics if `distance <= 0.0`.
    pub fn with_max_distance(mut self, distance: f32) -> Self {
        assert!(distance > 0.0, "Max distance must be positive, got {}", distance);
        self.config.max_distance = distance;
        self
    }

    pub fn with_layer_mask(mut self, mask: LayerMask) -> Self {
        self.config.layer_mask = mask;
        self
    }

    //--- Interaction ------------------------------------------------------

    /// Color applied to the hovered and dragged widget.
    pub fn with_highlight_color(mut self, color: Color) -> Self {
        self.config.highlight_color = color;
        self
    }

    /// Multiplier on pointer-to-pose conversion.
    ///
    /// # Panics
    ///
    /// Panics if `sensitivity <= 0.0`.
    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        assert!(sensitivity > 0.0, "Sensitivity must be positive, got {}", sensitivity);
        self.config.sensitivity = sensitivity;
        self
    }

    pub fn with_keyboard_input(mut self, enabled: bool) -> Self {
        self.config.keyboard_input = enabled;
        self
    }

    //--- Session Defaults -------------------------------------------------

    pub fn with_default_type(mut self, handle_type: HandleType) -> Self {
        self.config.defaults.handle_type = handle_type;
        self
    }

    pub fn with_default_space(mut self, space: Space) -> Self {
        self.config.defaults.space = space;
        self
    }

    pub fn with_default_axes(mut self, axes: AxisMask) -> Self {
        self.config.defaults.axes = axes;
        self
    }

    pub fn with_default_pivot(mut self, pivot: PivotMode) -> Self {
        self.config.defaults.pivot = pivot;
        self
    }

    pub fn with_snapping(mut self, snapping: Snapping) -> Self {
        self.config.defaults.snapping = snapping;
        self
    }

    /// Keeps new handles at a constant on-screen size.
    ///
    /// # Panics
    ///
    /// Panics if `pixels <= 0.0`.
    pub fn with_auto_scale(mut self, pixels: f32) -> Self {
        assert!(pixels > 0.0, "Auto-scale size must be positive, got {}", pixels);
        self.config.defaults.auto_scale_pixels = Some(pixels);
        self
    }

    /// Auto-scale at [`DEFAULT_AUTO_SCALE_PIXELS`].
    pub fn with_default_auto_scale(self) -> Self {
        self.with_auto_scale(DEFAULT_AUTO_SCALE_PIXELS)
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Builds the manager around the host's scene and feedback sink.
    pub fn build<S: SceneGraph, V: VisualFeedback>(self, scene: S, feedback: V) -> HandleManager<S, V> {
        info!(
            "Building handle manager (hits: {}, distance: {}, default type: {:?})",
            self.config.max_hits, self.config.max_distance, self.config.defaults.handle_type
        );
        HandleManager::from_config(self.config, scene, feedback)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
