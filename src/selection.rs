//=========================================================================
// Selection Controller
//
// Click-to-select behaviour on top of the handle manager.
//
// Bindings:
// ```text
//   Ctrl + primary : new session around the clicked entity
//   primary        : add to the last session (or start one)
//   secondary      : remove the clicked entity from its session
//   middle         : new session around the clicked entity
// ```
//
// Clicks are ignored while the pointer is over a widget or a drag is in
// progress, so run the controller after `HandleManager::tick` in the
// same frame. Selected entities get a highlight color through the
// manager's visual feedback collaborator.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::camera::Camera;
use crate::core::feedback::{Color, VisualFeedback};
use crate::core::input::{InputAdapter, Modifier};
use crate::core::query::{sorted_hits, HitTarget, SpatialQuery};
use crate::core::scene::{EntityId, SceneGraph};
use crate::handles::{HandleId, HandleManager};

//=== SelectionChange =====================================================

/// What a click did, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Created { handle: HandleId, entity: EntityId },
    Added { handle: HandleId, entity: EntityId },
    Removed { handle: HandleId, entity: EntityId },
}

//=== SelectionController =================================================

#[derive(Debug, Clone)]
pub struct SelectionController {
    last_handle: Option<HandleId>,
    selected_color: Color,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new(Color::YELLOW)
    }
}

impl SelectionController {
    pub fn new(selected_color: Color) -> Self {
        Self {
            last_handle: None,
            selected_color,
        }
    }

    /// Session that primary clicks add to.
    pub fn last_handle(&self) -> Option<HandleId> {
        self.last_handle
    }

    /// Handles this frame's clicks. At most one change is applied; the
    /// first matching binding in the table above wins.
    pub fn update<S: SceneGraph, V: VisualFeedback>(
        &mut self,
        manager: &mut HandleManager<S, V>,
        input: &dyn InputAdapter,
        query: &dyn SpatialQuery,
        camera: &Camera,
    ) -> Option<SelectionChange> {
        if manager.hovered_widget().is_some() || manager.is_dragging() {
            return None;
        }

        let primary = input.primary_pressed();
        let secondary = input.secondary_pressed();
        let middle = input.middle_pressed();
        if !(primary || secondary || middle) {
            return None;
        }

        let entity = Self::pick_entity(manager, input, query, camera)?;

        if primary && input.modifier_held(Modifier::Ctrl) {
            self.create(manager, entity)
        } else if primary {
            self.add(manager, entity)
        } else if secondary {
            self.remove(manager, entity)
        } else {
            self.create(manager, entity)
        }
    }

    //--- Actions ----------------------------------------------------------

    fn create<S: SceneGraph, V: VisualFeedback>(
        &mut self,
        manager: &mut HandleManager<S, V>,
        entity: EntityId,
    ) -> Option<SelectionChange> {
        if manager.handle_for_target(entity).is_some() {
            return None;
        }
        match manager.create_handle(entity) {
            Ok(handle) => {
                self.last_handle = Some(handle);
                manager.feedback_mut().set_highlight(entity, self.selected_color);
                debug!("Selected {} into new {}", entity, handle);
                Some(SelectionChange::Created { handle, entity })
            }
            Err(err) => {
                warn!("Selecting {} failed: {}", entity, err);
                None
            }
        }
    }

    fn add<S: SceneGraph, V: VisualFeedback>(
        &mut self,
        manager: &mut HandleManager<S, V>,
        entity: EntityId,
    ) -> Option<SelectionChange> {
        if manager.handle_for_target(entity).is_some() {
            return None;
        }
        let Some(handle) = self.last_handle.filter(|&h| manager.handle(h).is_some()) else {
            return self.create(manager, entity);
        };

        let before = manager.targets_for_handle(handle);
        match manager.add_target(entity, handle) {
            Ok(()) => {
                Self::clear_displaced(manager, &before);
                manager.feedback_mut().set_highlight(entity, self.selected_color);
                debug!("Selected {} into {}", entity, handle);
                Some(SelectionChange::Added { handle, entity })
            }
            Err(err) => {
                warn!("Adding {} to {} failed: {}", entity, handle, err);
                None
            }
        }
    }

    fn remove<S: SceneGraph, V: VisualFeedback>(
        &mut self,
        manager: &mut HandleManager<S, V>,
        entity: EntityId,
    ) -> Option<SelectionChange> {
        let handle = manager.handle_for_target(entity)?;
        if self.last_handle == Some(handle) {
            self.last_handle = None;
        }

        match manager.remove_target(entity, handle) {
            Ok(()) => {
                manager.feedback_mut().clear_highlight(entity);
                debug!("Deselected {} from {}", entity, handle);
                Some(SelectionChange::Removed { handle, entity })
            }
            Err(err) => {
                warn!("Removing {} from {} failed: {}", entity, handle, err);
                None
            }
        }
    }

    //--- Internal Helpers -------------------------------------------------

    /// Drops the highlight of former members that an ancestor displaced.
    fn clear_displaced<S: SceneGraph, V: VisualFeedback>(manager: &mut HandleManager<S, V>, before: &[EntityId]) {
        for &member in before {
            if manager.handle_for_target(member).is_none() {
                debug!("{} displaced by its ancestor", member);
                manager.feedback_mut().clear_highlight(member);
            }
        }
    }

    fn pick_entity<S: SceneGraph, V: VisualFeedback>(
        manager: &HandleManager<S, V>,
        input: &dyn InputAdapter,
        query: &dyn SpatialQuery,
        camera: &Camera,
    ) -> Option<EntityId> {
        let config = manager.config();
        let ray = camera.screen_point_to_ray(input.pointer_position());
        sorted_hits(query, &ray, config.max_distance, config.layer_mask, config.max_hits)
            .into_iter()
            .find_map(|hit| match hit.target {
                HitTarget::Entity(entity) if manager.scene().contains(entity) => Some(entity),
                _ => None,
            })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::feedback::{FeedbackCall, RecordingFeedback};
    use crate::core::input::{Modifier, Shortcut};
    use crate::core::math::Pose;
    use crate::core::query::{LayerMask, Ray, RayHit};
    use crate::core::scene::MemoryScene;
    use crate::handles::HandleManagerBuilder;
    use glam::{Vec2, Vec3};

    #[derive(Default)]
    struct Clicks {
        primary: bool,
        secondary: bool,
        middle: bool,
        ctrl: bool,
    }

    impl InputAdapter for Clicks {
        fn pointer_position(&self) -> Vec2 {
            Vec2::new(400.0, 300.0)
        }
        fn primary_held(&self) -> bool {
            self.primary
        }
        fn primary_pressed(&self) -> bool {
            self.primary
        }
        fn primary_released(&self) -> bool {
            false
        }
        fn secondary_pressed(&self) -> bool {
            self.secondary
        }
        fn middle_held(&self) -> bool {
            self.middle
        }
        fn middle_pressed(&self) -> bool {
            self.middle
        }
        fn modifier_held(&self, modifier: Modifier) -> bool {
            modifier == Modifier::Ctrl && self.ctrl
        }
        fn shortcut_pressed(&self, _shortcut: Shortcut) -> bool {
            false
        }
    }

    struct HitEntity(EntityId);

    impl SpatialQuery for HitEntity {
        fn query(&self, _ray: &Ray, _max: f32, _mask: LayerMask, _hits: usize) -> Vec<RayHit> {
            vec![RayHit::entity(3.0, Vec3::ZERO, self.0)]
        }
    }

    fn setup() -> (HandleManager<MemoryScene, RecordingFeedback>, EntityId, EntityId, Camera) {
        let mut manager = HandleManagerBuilder::new().build(MemoryScene::new(), RecordingFeedback::new());
        let a = manager.scene_mut().spawn(Pose::IDENTITY);
        let b = manager.scene_mut().spawn(Pose::from_position(Vec3::X));
        let camera = Camera::looking_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 1.0, Vec2::new(800.0, 600.0));
        (manager, a, b, camera)
    }

    #[test]
    fn primary_adds_to_last_session() {
        let (mut manager, a, b, camera) = setup();
        let mut selection = SelectionController::default();
        let click = Clicks {
            primary: true,
            ..Default::default()
        };

        let first = selection.update(&mut manager, &click, &HitEntity(a), &camera);
        let Some(SelectionChange::Created { handle, .. }) = first else {
            panic!("expected a new session, got {:?}", first);
        };
        let second = selection.update(&mut manager, &click, &HitEntity(b), &camera);

        assert_eq!(second, Some(SelectionChange::Added { handle, entity: b }));
        assert_eq!(manager.targets_for_handle(handle), vec![a, b]);
    }

    #[test]
    fn ctrl_primary_starts_new_session() {
        let (mut manager, a, b, camera) = setup();
        let mut selection = SelectionController::default();
        let click = Clicks {
            primary: true,
            ..Default::default()
        };
        let ctrl_click = Clicks {
            primary: true,
            ctrl: true,
            ..Default::default()
        };

        selection.update(&mut manager, &click, &HitEntity(a), &camera);
        selection.update(&mut manager, &ctrl_click, &HitEntity(b), &camera);

        assert_eq!(manager.handle_count(), 2);
        assert_ne!(manager.handle_for_target(a), manager.handle_for_target(b));
    }

    #[test]
    fn secondary_removes_and_forgets_last_session() {
        let (mut manager, a, _, camera) = setup();
        let mut selection = SelectionController::default();
        let click = Clicks {
            primary: true,
            ..Default::default()
        };
        let right = Clicks {
            secondary: true,
            ..Default::default()
        };

        selection.update(&mut manager, &click, &HitEntity(a), &camera);
        let change = selection.update(&mut manager, &right, &HitEntity(a), &camera);

        assert!(matches!(change, Some(SelectionChange::Removed { entity, .. }) if entity == a));
        assert_eq!(manager.handle_count(), 0);
        assert_eq!(selection.last_handle(), None);
    }

    #[test]
    fn selected_entities_are_highlighted() {
        let (mut manager, a, _, camera) = setup();
        let mut selection = SelectionController::new(Color::GREEN);
        let middle = Clicks {
            middle: true,
            ..Default::default()
        };

        selection.update(&mut manager, &middle, &HitEntity(a), &camera);
        assert!(manager
            .feedback()
            .calls()
            .contains(&crate::core::feedback::FeedbackCall::Highlight(a, Color::GREEN)));
    }

    #[test]
    fn adding_parent_clears_child_highlight() {
        let (mut manager, _, _, camera) = setup();
        let parent = manager.scene_mut().spawn(Pose::from_position(Vec3::Y));
        let child = manager
            .scene_mut()
            .spawn_child(parent, Pose::from_position(Vec3::X))
            .unwrap();
        let mut selection = SelectionController::default();
        let click = Clicks {
            primary: true,
            ..Default::default()
        };

        selection.update(&mut manager, &click, &HitEntity(child), &camera);
        let change = selection.update(&mut manager, &click, &HitEntity(parent), &camera);

        assert!(matches!(change, Some(SelectionChange::Added { entity, .. }) if entity == parent));
        assert_eq!(manager.handle_for_target(child), None);
        assert_eq!(
            manager.feedback().calls(),
            &[
                FeedbackCall::Highlight(child, Color::YELLOW),
                FeedbackCall::ClearHighlight(child),
                FeedbackCall::Highlight(parent, Color::YELLOW),
            ]
        );
    }

    #[test]
    fn owned_entity_click_is_ignored() {
        let (mut manager, a, _, camera) = setup();
        let mut selection = SelectionController::default();
        let middle = Clicks {
            middle: true,
            ..Default::default()
        };

        selection.update(&mut manager, &middle, &HitEntity(a), &camera);
        assert_eq!(selection.update(&mut manager, &middle, &HitEntity(a), &camera), None);
        assert_eq!(manager.handle_count(), 1);
    }
}
