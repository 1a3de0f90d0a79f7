//=========================================================================
// Handle Shortcuts
//=========================================================================
//
// Keyboard commands understood by the handle manager.
//
// Type shortcuts switch every live handle to a single handle type; the
// toggle shortcuts flip the space or pivot mode of every live handle.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::event::KeyCode;

//=== Shortcut ============================================================

/// Keyboard command recognised by the handle manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shortcut {
    /// Switch every handle to outline mode.
    Outline,
    Position,
    Rotation,
    Scale,
    /// Position, rotation and scale widgets together.
    All,
    /// Local ⇄ world.
    ToggleSpace,
    /// Origin-per-entity ⇄ group-bounds-center.
    TogglePivot,
}

impl Shortcut {
    /// Every shortcut, in the order the manager polls them.
    pub const ALL: [Shortcut; 7] = [
        Shortcut::Outline,
        Shortcut::Position,
        Shortcut::Rotation,
        Shortcut::Scale,
        Shortcut::All,
        Shortcut::ToggleSpace,
        Shortcut::TogglePivot,
    ];

    /// Default key for this shortcut.
    pub fn default_key(self) -> KeyCode {
        match self {
            Shortcut::Outline => KeyCode::KeyS,
            Shortcut::Position => KeyCode::KeyW,
            Shortcut::Rotation => KeyCode::KeyE,
            Shortcut::Scale => KeyCode::KeyR,
            Shortcut::All => KeyCode::KeyA,
            Shortcut::ToggleSpace => KeyCode::KeyX,
            Shortcut::TogglePivot => KeyCode::KeyZ,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
