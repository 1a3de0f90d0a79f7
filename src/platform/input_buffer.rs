//=========================================================================
// Input Buffer
//
// Per-frame store for translated input between two flushes.
//
// Responsibilities:
// - Keep key, button and modifier events in arrival order
// - Drop an event identical to the one right before it
// - Coalesce pointer motion down to the latest position
//
// Pointer motion is appended after the ordered events on drain, so the
// tracker sees button edges before the final pointer position of the
// frame.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::event::InputEvent;

//=== InputBuffer =========================================================

#[derive(Debug)]
pub struct InputBuffer {
    discrete: Vec<InputEvent>,
    pointer: Option<InputEvent>,
}

impl InputBuffer {
    pub fn new() -> Self {
        const DISCRETE_BASE: usize = 64;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            pointer: None,
        }
    }

    /// Routes an event to the ordered list or the pointer slot.
    pub fn push(&mut self, event: InputEvent) {
        match event {
            InputEvent::MouseMoved { .. } => self.pointer = Some(event),
            InputEvent::Unidentified => {}
            _ => {
                if self.discrete.last() != Some(&event) {
                    self.discrete.push(event);
                }
            }
        }
    }

    /// Takes the frame's events; `None` when nothing arrived.
    pub fn drain(&mut self) -> Option<Vec<InputEvent>> {
        if self.is_empty() {
            return None;
        }
        let mut events: Vec<InputEvent> = self.discrete.drain(..).collect();
        events.extend(self.pointer.take());
        Some(events)
    }

    pub fn len(&self) -> usize {
        self.discrete.len() + usize::from(self.pointer.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.pointer.is_none()
    }
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
