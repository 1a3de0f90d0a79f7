//=========================================================================
// Input Event Types
//
// Portable representation of the low-level pointer and keyboard input the
// handle manager consumes.
//
// Responsibilities:
// - Represent keyboard and mouse inputs independently of the windowing
//   backend (winit, SDL, touch)
// - Carry modifier state with every discrete event
// - Stay `Copy`-cheap so per-frame batches never allocate per event
//
// Event Flow:
// ```text
// Platform Layer (winit, touch, test script)
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker (edges + held state)
//         ↓
//    InputAdapter queries (HandleManager, SelectionController)
// ```
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical pointer button.
///
/// `Left` is the primary button (or the first touch), `Right` the
/// secondary, `Middle` the wheel click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    /// Side, thumb or macro buttons.
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key (location, not produced character).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Key the platform layer could not map.
    Unidentified,
}

//=== Modifiers ===========================================================

/// Modifier key state (Shift, Ctrl, Alt).
///
/// Left and right variants are not distinguished. Shortcut bindings match
/// modifiers exactly: `Ctrl+S` does not fire on `Ctrl+Shift+S`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub shift: bool,
    /// Ctrl, or Command on macOS.
    pub ctrl: bool,
    /// Alt, or Option on macOS.
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
    };

    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
    };

    pub const ALT: Self = Self {
        shift: false,
        ctrl: false,
        alt: true,
    };

    /// Whether a single named modifier is part of this state.
    pub fn holds(self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Shift => self.shift,
            Modifier::Ctrl => self.ctrl,
            Modifier::Alt => self.alt,
        }
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A single modifier key, used for "is X held" queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Shift,
    Ctrl,
    Alt,
}

//=== InputEvent ==========================================================

/// Low-level input event delivered by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown {
        key: KeyCode,
        modifiers: Modifiers,
    },

    KeyUp {
        key: KeyCode,
        modifiers: Modifiers,
    },

    MouseButtonDown {
        button: MouseButton,
        modifiers: Modifiers,
    },

    MouseButtonUp {
        button: MouseButton,
        modifiers: Modifiers,
    },

    /// Pointer moved. Screen pixels, top-left origin.
    MouseMoved { x: f32, y: f32 },

    /// Modifier state changed without a key or button edge.
    ModifiersChanged(Modifiers),

    /// Unrecognized event; ignored by the tracker.
    Unidentified,
}

impl InputEvent {
    //--- Shorthand Constructors -------------------------------------------

    pub fn key_down(key: KeyCode) -> Self {
        Self::KeyDown {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn key_up(key: KeyCode) -> Self {
        Self::KeyUp {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn button_down(button: MouseButton) -> Self {
        Self::MouseButtonDown {
            button,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn button_up(button: MouseButton) -> Self {
        Self::MouseButtonUp {
            button,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::MouseMoved { x, y }
    }

    /// Returns the event with its modifiers replaced. No effect on
    /// `MouseMoved`, `ModifiersChanged` and `Unidentified`.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        match &mut self {
            Self::KeyDown { modifiers: m, .. }
            | Self::KeyUp { modifiers: m, .. }
            | Self::MouseButtonDown { modifiers: m, .. }
            | Self::MouseButtonUp { modifiers: m, .. } => {
                *m = modifiers;
            }
            _ => {}
        }
        self
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_modifiers_replaces_discrete_state() {
        let event = InputEvent::key_down(KeyCode::KeyS).with_modifiers(Modifiers::CTRL);
        assert_eq!(
            event,
            InputEvent::KeyDown {
                key: KeyCode::KeyS,
                modifiers: Modifiers::CTRL,
            }
        );
    }

    #[test]
    fn with_modifiers_ignores_pointer_motion() {
        let event = InputEvent::moved(1.0, 2.0).with_modifiers(Modifiers::SHIFT);
        assert_eq!(event, InputEvent::MouseMoved { x: 1.0, y: 2.0 });
    }

    #[test]
    fn holds_checks_single_modifier() {
        assert!(Modifiers::CTRL.holds(Modifier::Ctrl));
        assert!(!Modifiers::CTRL.holds(Modifier::Shift));
        assert!(!Modifiers::default().holds(Modifier::Alt));
    }
}
