//=========================================================================
// Input System
//
// Per-frame pointer and keyboard state consumed by the handle manager and
// the selection controller.
//
// Responsibilities:
// - Digest batches of `InputEvent`s into held state and one-frame edges
// - Resolve keyboard shortcuts through a rebindable mapper
// - Expose everything through the `InputAdapter` query trait, so hosts
//   with their own input stack can plug in directly
//
// Architecture:
// ```text
// InputCollector ─▶ InputSystem::update(events)
//                     ├─ StateTracker     (edges + held state)
//                     └─ ShortcutMapper   (key → Shortcut)
//                              ↓
//                     InputAdapter queries
// ```
//
//=========================================================================

//=== Submodules ==========================================================

pub mod collector;
pub mod event;
pub mod shortcut;
pub mod shortcut_mapper;
mod state_tracker;

//=== Public API ==========================================================

pub use collector::{input_channel, FeedStatus, InputCollector, InputSender};
pub use event::{InputEvent, KeyCode, Modifier, Modifiers, MouseButton};
pub use shortcut::Shortcut;
pub use shortcut_mapper::ShortcutMapper;
pub use state_tracker::StateTracker;

//=== External Dependencies ===============================================

use std::collections::HashSet;

use glam::Vec2;
use log::trace;

//=== InputAdapter ========================================================

/// Read-only view of one frame of input.
///
/// "Pressed" and "released" are edges that hold for exactly the frame the
/// transition happened; "held" is level state.
pub trait InputAdapter {
    /// Pointer position in screen pixels, top-left origin.
    fn pointer_position(&self) -> Vec2;

    fn primary_held(&self) -> bool;
    fn primary_pressed(&self) -> bool;
    fn primary_released(&self) -> bool;

    fn secondary_pressed(&self) -> bool;

    fn middle_held(&self) -> bool;
    fn middle_pressed(&self) -> bool;

    fn modifier_held(&self, modifier: Modifier) -> bool;

    /// Whether the shortcut's key went down this frame.
    fn shortcut_pressed(&self, shortcut: Shortcut) -> bool;
}

//=== InputSystem =========================================================

/// Default [`InputAdapter`] fed from [`InputEvent`] batches.
#[derive(Default)]
pub struct InputSystem {
    tracker: StateTracker,
    shortcuts: ShortcutMapper,
    triggered: HashSet<Shortcut>,
}

impl InputSystem {
    /// Creates an input system with the default shortcut keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an input system with custom shortcut bindings.
    pub fn with_shortcuts(shortcuts: ShortcutMapper) -> Self {
        Self {
            tracker: StateTracker::new(),
            shortcuts,
            triggered: HashSet::new(),
        }
    }

    //--- update() ---------------------------------------------------------

    /// Starts a new frame and digests its events.
    ///
    /// Call exactly once per tick, even with an empty slice, so edges
    /// from the previous frame expire.
    pub fn update(&mut self, events: &[InputEvent]) {
        self.tracker.clear();
        self.tracker.process_events(events);
        self.tracker.finalize_frame();

        self.triggered.clear();
        for event in events {
            if let InputEvent::KeyDown { key, .. } = event {
                if !self.tracker.is_key_pressed(*key) {
                    continue;
                }
                if let Some(shortcut) = self.shortcuts.map_event(event) {
                    self.triggered.insert(shortcut);
                }
            }
        }

        if !self.triggered.is_empty() {
            trace!("Shortcuts this frame: {:?}", self.triggered);
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn tracker(&self) -> &StateTracker {
        &self.tracker
    }

    pub fn shortcuts(&self) -> &ShortcutMapper {
        &self.shortcuts
    }

    pub fn shortcuts_mut(&mut self) -> &mut ShortcutMapper {
        &mut self.shortcuts
    }
}

impl InputAdapter for InputSystem {
    fn pointer_position(&self) -> Vec2 {
        self.tracker.pointer_position()
    }

    fn primary_held(&self) -> bool {
        self.tracker.is_button_down(MouseButton::Left)
    }

    fn primary_pressed(&self) -> bool {
        self.tracker.is_button_pressed(MouseButton::Left)
    }

    fn primary_released(&self) -> bool {
        self.tracker.is_button_released(MouseButton::Left)
    }

    fn secondary_pressed(&self) -> bool {
        self.tracker.is_button_pressed(MouseButton::Right)
    }

    fn middle_held(&self) -> bool {
        self.tracker.is_button_down(MouseButton::Middle)
    }

    fn middle_pressed(&self) -> bool {
        self.tracker.is_button_pressed(MouseButton::Middle)
    }

    fn modifier_held(&self, modifier: Modifier) -> bool {
        self.tracker.modifiers().holds(modifier)
    }

    fn shortcut_pressed(&self, shortcut: Shortcut) -> bool {
        self.triggered.contains(&shortcut)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_edges_follow_left_button() {
        let mut input = InputSystem::new();

        input.update(&[InputEvent::button_down(MouseButton::Left)]);
        assert!(input.primary_pressed());
        assert!(input.primary_held());

        input.update(&[]);
        assert!(!input.primary_pressed());
        assert!(input.primary_held());

        input.update(&[InputEvent::button_up(MouseButton::Left)]);
        assert!(input.primary_released());
        assert!(!input.primary_held());
    }

    #[test]
    fn shortcut_fires_once_per_press() {
        let mut input = InputSystem::new();

        input.update(&[InputEvent::key_down(KeyCode::KeyW)]);
        assert!(input.shortcut_pressed(Shortcut::Position));

        // OS key repeat
        input.update(&[InputEvent::key_down(KeyCode::KeyW)]);
        assert!(!input.shortcut_pressed(Shortcut::Position));
    }

    #[test]
    fn modified_key_does_not_fire_plain_shortcut() {
        let mut input = InputSystem::new();
        input.update(&[InputEvent::key_down(KeyCode::KeyE).with_modifiers(Modifiers::CTRL)]);

        assert!(!input.shortcut_pressed(Shortcut::Rotation));
        assert!(input.modifier_held(Modifier::Ctrl));
    }

    #[test]
    fn custom_bindings_are_honoured() {
        let mut mapper = ShortcutMapper::empty();
        mapper.bind(KeyCode::Digit1, Shortcut::Scale);
        let mut input = InputSystem::with_shortcuts(mapper);

        input.update(&[InputEvent::key_down(KeyCode::KeyR)]);
        assert!(!input.shortcut_pressed(Shortcut::Scale));

        input.update(&[InputEvent::key_up(KeyCode::KeyR), InputEvent::key_down(KeyCode::Digit1)]);
        assert!(input.shortcut_pressed(Shortcut::Scale));
    }

    #[test]
    fn pointer_position_follows_motion() {
        let mut input = InputSystem::new();
        input.update(&[InputEvent::moved(40.0, 60.0)]);
        assert_eq!(input.pointer_position(), Vec2::new(40.0, 60.0));
    }
}
