//=========================================================================
// Shortcut Mapper
//=========================================================================
//
// Maps key presses to handle shortcuts.
//
// Architecture:
//   (key, modifiers) → HashMap → Shortcut
//
// Modifiers must match exactly, so `Ctrl+W` never fires the plain `W`
// binding.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::{
    event::{InputEvent, KeyCode, Modifiers},
    shortcut::Shortcut,
};

//=== ShortcutMapper ======================================================

/// Resolves `(key, modifiers)` pairs to shortcuts.
#[derive(Debug, Clone)]
pub struct ShortcutMapper {
    bindings: HashMap<(KeyCode, Modifiers), Shortcut>,
}

impl ShortcutMapper {
    /// Creates a mapper with no bindings.
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Creates a mapper with every shortcut on its default key.
    pub fn with_defaults() -> Self {
        let mut mapper = Self::empty();
        for shortcut in Shortcut::ALL {
            mapper.bind(shortcut.default_key(), shortcut);
        }
        mapper
    }

    //--- Binding API ------------------------------------------------------

    /// Binds a key (no modifiers) to a shortcut.
    pub fn bind(&mut self, key: KeyCode, shortcut: Shortcut) {
        self.bind_with_mods(key, Modifiers::NONE, shortcut);
    }

    /// Binds a key with modifiers (exact match required).
    pub fn bind_with_mods(&mut self, key: KeyCode, modifiers: Modifiers, shortcut: Shortcut) {
        self.bindings.insert((key, modifiers), shortcut);
    }

    /// Removes every binding that resolves to `shortcut`.
    pub fn unbind(&mut self, shortcut: Shortcut) {
        self.bindings.retain(|_, bound| *bound != shortcut);
    }

    /// Moves a shortcut to a new key, dropping its old bindings.
    pub fn rebind(&mut self, key: KeyCode, shortcut: Shortcut) {
        self.unbind(shortcut);
        self.bind(key, shortcut);
    }

    //--- Event Mapping ----------------------------------------------------

    /// Maps a key-down event to a shortcut.
    pub fn map_event(&self, event: &InputEvent) -> Option<Shortcut> {
        match event {
            InputEvent::KeyDown { key, modifiers } => self.map_key(*key, *modifiers),
            _ => None,
        }
    }

    pub fn map_key(&self, key: KeyCode, modifiers: Modifiers) -> Option<Shortcut> {
        self.bindings.get(&(key, modifiers)).copied()
    }
}

impl Default for ShortcutMapper {
    fn default() -> Self {
        Self::with_defaults()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
