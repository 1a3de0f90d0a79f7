//=========================================================================
// Visual Feedback
//=========================================================================
//
// Contract for the rendering-side collaborator that outlines and
// highlights scene entities.
//
// The handle core only ever hands it a member list plus a select or
// deselect intent. Materials, outline widths and colors live on the
// other side of this trait.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::scene::EntityId;

//=== Color ===============================================================

/// Linear RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const RED: Self = Self::rgb(0.9, 0.2, 0.2);
    pub const GREEN: Self = Self::rgb(0.3, 0.85, 0.3);
    pub const BLUE: Self = Self::rgb(0.25, 0.45, 0.95);
    pub const YELLOW: Self = Self::rgb(0.95, 0.85, 0.2);
    pub const GREY: Self = Self::rgb(0.7, 0.7, 0.7);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

//=== VisualFeedback ======================================================

/// Outline and highlight collaborator.
///
/// Stateless from the core's point of view: every call carries all the
/// information it needs.
pub trait VisualFeedback {
    /// Attach the outline effect to every entity in `entities`.
    fn select(&mut self, entities: &[EntityId]);

    /// Detach the outline effect from every entity in `entities`.
    fn deselect(&mut self, entities: &[EntityId]);

    fn set_highlight(&mut self, entity: EntityId, color: Color);

    fn clear_highlight(&mut self, entity: EntityId);
}

//=== NoFeedback ==========================================================

/// Feedback sink for headless hosts.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFeedback;

impl VisualFeedback for NoFeedback {
    fn select(&mut self, _entities: &[EntityId]) {}
    fn deselect(&mut self, _entities: &[EntityId]) {}
    fn set_highlight(&mut self, _entity: EntityId, _color: Color) {}
    fn clear_highlight(&mut self, _entity: EntityId) {}
}

//=== RecordingFeedback ===================================================

/// One call received by [`RecordingFeedback`].
#[derive(Debug, Clone, PartialEq)]
pub enum FeedbackCall {
    Select(Vec<EntityId>),
    Deselect(Vec<EntityId>),
    Highlight(EntityId, Color),
    ClearHighlight(EntityId),
}

/// Feedback sink that records calls and tracks the outlined set.
///
/// Useful for tests and for hosts that poll outline state instead of
/// reacting to calls.
#[derive(Debug, Default, Clone)]
pub struct RecordingFeedback {
    calls: Vec<FeedbackCall>,
    outlined: Vec<EntityId>,
}

impl RecordingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[FeedbackCall] {
        &self.calls
    }

    /// Takes recorded calls, leaving the log empty.
    pub fn take_calls(&mut self) -> Vec<FeedbackCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn is_outlined(&self, entity: EntityId) -> bool {
        self.outlined.contains(&entity)
    }

    pub fn outlined(&self) -> &[EntityId] {
        &self.outlined
    }
}

impl VisualFeedback for RecordingFeedback {
    fn select(&mut self, entities: &[EntityId]) {
        for &entity in entities {
            if !self.outlined.contains(&entity) {
                self.outlined.push(entity);
            }
        }
        self.calls.push(FeedbackCall::Select(entities.to_vec()));
    }

    fn deselect(&mut self, entities: &[EntityId]) {
        self.outlined.retain(|e| !entities.contains(e));
        self.calls.push(FeedbackCall::Deselect(entities.to_vec()));
    }

    fn set_highlight(&mut self, entity: EntityId, color: Color) {
        self.calls.push(FeedbackCall::Highlight(entity, color));
    }

    fn clear_highlight(&mut self, entity: EntityId) {
        self.calls.push(FeedbackCall::ClearHighlight(entity));
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_tracks_outlined_set() {
        let mut feedback = RecordingFeedback::new();
        feedback.select(&[EntityId(1), EntityId(2)]);
        feedback.select(&[EntityId(2)]);
        assert_eq!(feedback.outlined(), &[EntityId(1), EntityId(2)]);

        feedback.deselect(&[EntityId(1)]);
        assert!(!feedback.is_outlined(EntityId(1)));
        assert!(feedback.is_outlined(EntityId(2)));
        assert_eq!(feedback.calls().len(), 3);
    }

    #[test]
    fn take_calls_drains_log() {
        let mut feedback = RecordingFeedback::new();
        feedback.set_highlight(EntityId(4), Color::RED);
        feedback.clear_highlight(EntityId(4));

        let calls = feedback.take_calls();
        assert_eq!(
            calls,
            vec![
                FeedbackCall::Highlight(EntityId(4), Color::RED),
                FeedbackCall::ClearHighlight(EntityId(4)),
            ]
        );
        assert!(feedback.calls().is_empty());
    }
}
