//=========================================================================
// Handle Manager
//
// Owns every manipulation session and drives them once per frame.
//
// Responsibilities:
// - Keep the entity → session ownership map exclusive
// - Create, re-target and tear down sessions
// - Per tick: pick the hovered widget, apply hover colors, run the drag
//   state machine, broadcast shortcuts and sync handle poses
// - Route outline sessions to the visual feedback collaborator
//
// Tick order:
// ```text
//   deferred tasks ─▶ camera ─▶ pick ─▶ hover ─▶ drag ─▶ shortcuts ─▶ pose sync
// ```
//
// Drag state machine:
// ```text
//   Idle ──press & hovered──▶ Dragging ──held──▶ Dragging (interact)
//     ▲                           │
//     └─────────release───────────┘ (end, refresh bounds + ghost)
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{BTreeMap, HashMap};

use crossbeam_channel::Receiver;
use glam::{Vec2, Vec3};
use log::{debug, error, info, trace, warn};

//=== Internal Dependencies ===============================================

use super::config::ManagerConfig;
use super::deferred::{DeferredQueue, DeferredTask};
use super::events::{EventHub, HandleEvent, SubscriptionId};
use super::handle::{Handle, WidgetPlacement};
use super::types::{AxisMask, HandleId, HandleType, PivotMode, Snapping, Space};
use super::widget::{InteractionContext, Widget, WidgetId};
use crate::core::camera::{Camera, CameraSource};
use crate::core::feedback::VisualFeedback;
use crate::core::input::{InputAdapter, Shortcut};
use crate::core::query::{sorted_hits, HitTarget, SpatialQuery};
use crate::core::scene::{EntityId, SceneGraph};
use crate::error::{HandleError, Result};

//=== Frame ===============================================================

/// Collaborators borrowed for one tick.
pub struct Frame<'a> {
    pub input: &'a dyn InputAdapter,
    pub query: &'a dyn SpatialQuery,
    pub camera: &'a mut dyn CameraSource,
    /// Seconds since the previous tick.
    pub delta_time: f32,
}

//=== DragState ===========================================================

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragState {
    widget: WidgetId,
    hit_point: Vec3,
}

//=== HandleManager =======================================================

/// Session registry and per-frame dispatcher.
///
/// Constructed once by the host through
/// [`HandleManagerBuilder`](super::HandleManagerBuilder) and passed to
/// whoever needs it. Owns the scene and feedback collaborators so that
/// every pose write and outline call goes through one place.
pub struct HandleManager<S: SceneGraph, V: VisualFeedback> {
    config: ManagerConfig,
    scene: S,
    feedback: V,

    //--- Sessions ---------------------------------------------------------
    handles: BTreeMap<HandleId, Handle>,
    owners: HashMap<EntityId, HandleId>,
    next_handle: u64,

    //--- Interaction ------------------------------------------------------
    hovered: Option<WidgetId>,
    dragging: Option<DragState>,
    previous_pointer: Vec2,
    keyboard_input: bool,

    //--- Plumbing ---------------------------------------------------------
    deferred: DeferredQueue,
    events: EventHub,
}

impl<S: SceneGraph, V: VisualFeedback> HandleManager<S, V> {
    pub(crate) fn from_config(config: ManagerConfig, scene: S, feedback: V) -> Self {
        Self {
            keyboard_input: config.keyboard_input,
            config,
            scene,
            feedback,
            handles: BTreeMap::new(),
            owners: HashMap::new(),
            next_handle: 0,
            hovered: None,
            dragging: None,
            previous_pointer: Vec2::ZERO,
            deferred: DeferredQueue::new(),
            events: EventHub::new(),
        }
    }

    //=====================================================================
    // Collaborators
    //=====================================================================

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Direct scene access for spawning and editing entities.
    ///
    /// Poses written here are picked up by the ghosts on the next
    /// membership change or drag end.
    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn feedback(&self) -> &V {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut V {
        &mut self.feedback
    }

    //=====================================================================
    // Session Management
    //=====================================================================

    /// Creates a session around a single entity.
    pub fn create_handle(&mut self, target: EntityId) -> Result<HandleId> {
        self.create_handle_from_list(&[target])
    }

    /// Creates a session around several entities.
    ///
    /// Ownership and existence are checked for every target before the
    /// session is built. Targets that descend from an earlier target are
    /// skipped; the session is torn down if any other add fails.
    pub fn create_handle_from_list(&mut self, targets: &[EntityId]) -> Result<HandleId> {
        if targets.is_empty() {
            warn!("Refusing to create a handle from an empty list");
            return Err(HandleError::EmptyTargets);
        }
        for &target in targets {
            self.check_available(target)?;
        }

        self.next_handle += 1;
        let id = HandleId(self.next_handle);
        self.handles.insert(id, Handle::new(id, &self.config.defaults));

        for &target in targets {
            if self.owners.get(&target) == Some(&id) {
                continue;
            }
            match self.add_target(target, id) {
                Ok(()) => {}
                Err(HandleError::RelativeOfSelection(entity)) => {
                    debug!("Skipping {} while creating {}", entity, id);
                }
                Err(err) => {
                    self.teardown(id);
                    return Err(err);
                }
            }
        }

        if self.handles.get(&id).is_some_and(|h| h.group().is_empty()) {
            self.teardown(id);
            return Err(HandleError::EmptyTargets);
        }

        if self.handles.get(&id).is_some_and(|h| h.handle_type().is_outline()) {
            self.deferred.push(DeferredTask::AttachOutline(id));
        }

        info!("Created {} with {} target(s)", id, targets.len());
        Ok(id)
    }

    /// Adds an entity to an existing session and recomputes its ghost.
    pub fn add_target(&mut self, target: EntityId, handle: HandleId) -> Result<()> {
        if let Some(&owner) = self.owners.get(&target) {
            warn!("{} already has a handle ({})", target, owner);
            return Err(HandleError::AlreadyOwned { entity: target, owner });
        }
        let Some(session) = self.handles.get_mut(&handle) else {
            error!("Cannot add {} to missing {}", target, handle);
            return Err(HandleError::HandleNotFound(handle));
        };

        let displaced = match session.group_mut().add(&self.scene, target) {
            Ok(displaced) => displaced,
            Err(err) => {
                warn!("Rejected {} for {}: {}", target, handle, err);
                return Err(err);
            }
        };

        for entity in &displaced {
            self.owners.remove(entity);
        }
        self.owners.insert(target, handle);
        session.refresh_ghost(&self.scene);

        if session.is_outline_attached() {
            if !displaced.is_empty() {
                self.feedback.deselect(&displaced);
            }
            self.feedback.select(&[target]);
        }

        debug!("Added {} to {}", target, handle);
        Ok(())
    }

    /// Removes an entity from its session, destroying the session when it
    /// was the last member.
    pub fn remove_target(&mut self, target: EntityId, handle: HandleId) -> Result<()> {
        if !self.handles.contains_key(&handle) {
            error!("Cannot remove {} from missing {}", target, handle);
            return Err(HandleError::HandleNotFound(handle));
        }
        if self.owners.get(&target) != Some(&handle) {
            warn!("{} is not a member of {}", target, handle);
            return Err(HandleError::NotOwnedBy { entity: target, handle });
        }

        if self.release_target(target, handle) {
            self.teardown(handle);
        } else if let Some(session) = self.handles.get_mut(&handle) {
            session.refresh_ghost(&self.scene);
        }
        Ok(())
    }

    /// Re-points a session at a single entity.
    pub fn set_handle_target(&mut self, handle: HandleId, target: EntityId) -> Result<()> {
        self.set_handle_targets(handle, &[target])
    }

    /// Re-points a session at a new target list without destroying it.
    ///
    /// Targets owned by a different session are refused up front. The
    /// swap then behaves as remove-all followed by add-all: individual
    /// add failures are reported (first error wins) but do not undo the
    /// adds that succeeded. If nothing could be added the session is
    /// destroyed.
    pub fn set_handle_targets(&mut self, handle: HandleId, targets: &[EntityId]) -> Result<()> {
        if !self.handles.contains_key(&handle) {
            error!("Cannot re-target missing {}", handle);
            return Err(HandleError::HandleNotFound(handle));
        }
        if targets.is_empty() {
            warn!("Refusing to re-target {} at an empty list", handle);
            return Err(HandleError::EmptyTargets);
        }
        for &target in targets {
            if !self.scene.contains(target) {
                error!("Cannot re-target {} at unknown {}", handle, target);
                return Err(HandleError::EntityNotFound(target));
            }
            if let Some(&owner) = self.owners.get(&target) {
                if owner != handle {
                    warn!("{} is already used by {}", target, owner);
                    return Err(HandleError::AlreadyOwned { entity: target, owner });
                }
            }
        }

        self.cancel_drag_on(handle);

        let current = self.targets_for_handle(handle);
        for target in current {
            self.release_target(target, handle);
        }

        let mut first_error = None;
        for &target in targets {
            if self.owners.get(&target) == Some(&handle) {
                continue;
            }
            if let Err(err) = self.add_target(target, handle) {
                first_error.get_or_insert(err);
            }
        }

        let empty = match self.handles.get_mut(&handle) {
            Some(session) => {
                session.refresh_ghost(&self.scene);
                session.group().is_empty()
            }
            None => true,
        };
        if empty {
            self.teardown(handle);
            return Err(first_error.unwrap_or(HandleError::EmptyTargets));
        }

        debug!("Re-targeted {} at {} entities", handle, targets.len());
        first_error.map_or(Ok(()), Err)
    }

    /// Destroys a session and releases its members.
    pub fn remove_handle(&mut self, handle: HandleId) -> Result<()> {
        if !self.handles.contains_key(&handle) {
            error!("{} is already removed", handle);
            return Err(HandleError::HandleNotFound(handle));
        }
        self.teardown(handle);
        Ok(())
    }

    /// Destroys every session.
    pub fn remove_all_handles(&mut self) {
        let ids: Vec<HandleId> = self.handles.keys().copied().collect();
        for id in ids {
            self.teardown(id);
        }
    }

    //=====================================================================
    // Lookups
    //=====================================================================

    pub fn handle_for_target(&self, target: EntityId) -> Option<HandleId> {
        self.owners.get(&target).copied()
    }

    /// Members of a session in insertion order; empty for unknown ids.
    pub fn targets_for_handle(&self, handle: HandleId) -> Vec<EntityId> {
        self.handles
            .get(&handle)
            .map(|h| h.group().members().to_vec())
            .unwrap_or_default()
    }

    /// Every member of every session.
    pub fn targets(&self) -> Vec<EntityId> {
        self.handles
            .values()
            .flat_map(|h| h.group().members().iter().copied())
            .collect()
    }

    pub fn handle(&self, handle: HandleId) -> Option<&Handle> {
        self.handles.get(&handle)
    }

    pub fn handle_ids(&self) -> Vec<HandleId> {
        self.handles.keys().copied().collect()
    }

    pub fn handle_count(&self) -> usize {
        self.handles.len()
    }

    pub fn hovered_widget(&self) -> Option<WidgetId> {
        self.hovered
    }

    pub fn dragging_widget(&self) -> Option<WidgetId> {
        self.dragging.map(|d| d.widget)
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    /// Placements of every enabled widget, for hosts mirroring colliders.
    pub fn widget_placements(&self) -> Vec<WidgetPlacement> {
        self.handles.values().flat_map(|h| h.placements()).collect()
    }

    //=====================================================================
    // Session Configuration
    //=====================================================================

    /// Switches a session to a new type, rebuilding its widget set.
    ///
    /// Leaving outline mode deselects the members; entering it selects
    /// them right away.
    pub fn change_handle_type(&mut self, handle: HandleId, handle_type: HandleType) -> Result<()> {
        if !self.handles.contains_key(&handle) {
            error!("Cannot change type of missing {}", handle);
            return Err(HandleError::HandleNotFound(handle));
        }
        self.cancel_drag_on(handle);
        if self.hovered.is_some_and(|w| w.handle == handle) {
            self.hovered = None;
        }

        let Some(session) = self.handles.get_mut(&handle) else {
            return Err(HandleError::HandleNotFound(handle));
        };
        if session.is_outline_attached() {
            self.feedback.deselect(session.group().members());
            session.set_outline_attached(false);
        }
        self.deferred.cancel(handle);

        session.change_type(handle_type);
        session.refresh_ghost(&self.scene);

        if handle_type.is_outline() && !session.group().is_empty() {
            self.feedback.select(session.group().members());
            session.set_outline_attached(true);
        }

        debug!("{} switched to {:?}", handle, handle_type);
        Ok(())
    }

    /// Same as [`change_handle_type`](Self::change_handle_type) for a raw
    /// type value coming from outside the type system.
    pub fn change_handle_type_raw(&mut self, handle: HandleId, raw: u8) -> Result<()> {
        let handle_type = HandleType::try_from(raw).map_err(|err| {
            error!("Dispatch for {} aborted: {}", handle, err);
            err
        })?;
        self.change_handle_type(handle, handle_type)
    }

    /// Requests a space; returns the space actually applied.
    pub fn change_handle_space(&mut self, handle: HandleId, space: Space) -> Result<Space> {
        let Some(session) = self.handles.get_mut(&handle) else {
            error!("Cannot change space of missing {}", handle);
            return Err(HandleError::HandleNotFound(handle));
        };
        let applied = session.change_space(space);
        session.refresh_ghost(&self.scene);
        debug!("{} space {:?}", handle, applied);
        Ok(applied)
    }

    pub fn change_handle_axes(&mut self, handle: HandleId, axes: AxisMask) -> Result<()> {
        let Some(session) = self.handles.get_mut(&handle) else {
            error!("Cannot change axes of missing {}", handle);
            return Err(HandleError::HandleNotFound(handle));
        };
        session.change_axes(axes);

        let drag_disabled = self.dragging.is_some_and(|d| {
            d.widget.handle == handle && !d.widget.kind.enabled_by(axes)
        });
        if drag_disabled {
            self.end_drag();
        }
        debug!("{} axes {:?}", handle, axes);
        Ok(())
    }

    pub fn change_handle_pivot(&mut self, handle: HandleId, pivot: PivotMode) -> Result<()> {
        let Some(session) = self.handles.get_mut(&handle) else {
            error!("Cannot change pivot of missing {}", handle);
            return Err(HandleError::HandleNotFound(handle));
        };
        session.change_pivot(pivot);
        session.group_mut().update_bounds(&self.scene);
        session.refresh_ghost(&self.scene);
        debug!("{} pivot {:?}", handle, pivot);
        Ok(())
    }

    pub fn set_handle_snapping(&mut self, handle: HandleId, snapping: Snapping) -> Result<()> {
        let Some(session) = self.handles.get_mut(&handle) else {
            return Err(HandleError::HandleNotFound(handle));
        };
        session.set_snapping(snapping);
        Ok(())
    }

    /// Enables (`Some(pixels)`) or disables auto-scale for one session.
    pub fn set_handle_auto_scale(&mut self, handle: HandleId, pixels: Option<f32>) -> Result<()> {
        let Some(session) = self.handles.get_mut(&handle) else {
            return Err(HandleError::HandleNotFound(handle));
        };
        session.set_auto_scale(pixels);
        Ok(())
    }

    //--- Keyboard ---------------------------------------------------------

    pub fn set_keyboard_input_enabled(&mut self, enabled: bool) {
        self.keyboard_input = enabled;
    }

    pub fn is_keyboard_input_enabled(&self) -> bool {
        self.keyboard_input
    }

    pub fn enable_keyboard_input(&mut self) {
        self.set_keyboard_input_enabled(true);
    }

    pub fn disable_keyboard_input(&mut self) {
        self.set_keyboard_input_enabled(false);
    }

    //=====================================================================
    // Lifecycle Events
    //=====================================================================

    pub fn subscribe(&mut self) -> (SubscriptionId, Receiver<HandleEvent>) {
        self.events.subscribe()
    }

    /// Events of one session. The subscription ends with its `Destroyed`.
    pub fn subscribe_handle(&mut self, handle: HandleId) -> Result<(SubscriptionId, Receiver<HandleEvent>)> {
        if !self.handles.contains_key(&handle) {
            return Err(HandleError::HandleNotFound(handle));
        }
        Ok(self.events.subscribe_handle(handle))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    //=====================================================================
    // Per-Frame Tick
    //=====================================================================

    /// Runs one frame of picking, hover, drag, shortcuts and pose sync.
    ///
    /// When the camera cannot be resolved after one retry, the session
    /// owning the in-progress drag is torn down, picking is skipped and
    /// [`HandleError::CameraUnavailable`] is returned.
    pub fn tick(&mut self, frame: Frame<'_>) -> Result<()> {
        let Frame {
            input,
            query,
            camera,
            delta_time,
        } = frame;

        self.run_deferred();

        if self.handles.is_empty() {
            self.previous_pointer = input.pointer_position();
            return Ok(());
        }

        let camera = match camera.resolve().or_else(|| camera.resolve()) {
            Some(camera) => camera,
            None => {
                self.on_camera_lost();
                self.previous_pointer = input.pointer_position();
                return Err(HandleError::CameraUnavailable);
            }
        };

        let pointer = input.pointer_position();
        let picked = self.pick(query, &camera, pointer);
        self.apply_hover(picked.map(|(id, _)| id));
        self.drive_drag(input, &camera, picked, delta_time);

        if self.keyboard_input {
            self.apply_shortcuts(input);
        }

        for session in self.handles.values_mut() {
            session.sync_pose(Some(&camera));
        }
        Ok(())
    }

    //--- Tick Stages ------------------------------------------------------

    fn run_deferred(&mut self) {
        for task in self.deferred.take() {
            match task {
                DeferredTask::AttachOutline(id) => {
                    let Some(session) = self.handles.get_mut(&id) else {
                        continue;
                    };
                    if !session.handle_type().is_outline() || session.is_outline_attached() {
                        continue;
                    }
                    if !session.group().is_empty() {
                        self.feedback.select(session.group().members());
                        session.set_outline_attached(true);
                        debug!("Outline attached to {}", id);
                    }
                }
            }
        }
    }

    fn pick(&self, query: &dyn SpatialQuery, camera: &Camera, pointer: Vec2) -> Option<(WidgetId, Vec3)> {
        let ray = camera.screen_point_to_ray(pointer);
        let hits = sorted_hits(
            query,
            &ray,
            self.config.max_distance,
            self.config.layer_mask,
            self.config.max_hits,
        );

        hits.into_iter().find_map(|hit| match hit.target {
            HitTarget::Widget(id) if self.is_live_widget(id) => Some((id, hit.point)),
            _ => None,
        })
    }

    fn is_live_widget(&self, id: WidgetId) -> bool {
        self.handles
            .get(&id.handle)
            .and_then(|h| h.widget(id.kind))
            .is_some_and(|w| w.is_enabled())
    }

    fn apply_hover(&mut self, hovered: Option<WidgetId>) {
        if self.hovered != hovered {
            trace!("Hover {:?} -> {:?}", self.hovered, hovered);
        }

        if self.dragging.is_none() {
            if let Some(previous) = self.hovered.filter(|&p| Some(p) != hovered) {
                if let Some(widget) = self.widget_mut(previous) {
                    widget.set_default_color();
                }
            }
            if let Some(current) = hovered {
                let color = self.config.highlight_color;
                if let Some(widget) = self.widget_mut(current) {
                    widget.set_color(color);
                }
            }
        }

        self.hovered = hovered;
    }

    fn drive_drag(&mut self, input: &dyn InputAdapter, camera: &Camera, picked: Option<(WidgetId, Vec3)>, delta_time: f32) {
        let pointer = input.pointer_position();

        if input.primary_held() {
            if let Some(drag) = self.dragging {
                self.interact(drag, camera, pointer, delta_time);
            }
        }

        if input.primary_pressed() && self.dragging.is_none() {
            if let Some((widget, hit_point)) = picked {
                self.start_drag(widget, hit_point);
            }
        }

        if input.primary_released() && self.dragging.is_some() {
            self.end_drag();
        }

        self.previous_pointer = pointer;
    }

    fn apply_shortcuts(&mut self, input: &dyn InputAdapter) {
        let ids = self.handle_ids();

        for shortcut in Shortcut::ALL {
            if !input.shortcut_pressed(shortcut) {
                continue;
            }
            debug!("Shortcut {:?} for {} handle(s)", shortcut, ids.len());

            for &id in &ids {
                let result = match shortcut {
                    Shortcut::Outline => self.change_handle_type(id, HandleType::Outline),
                    Shortcut::Position => self.change_handle_type(id, HandleType::Position),
                    Shortcut::Rotation => self.change_handle_type(id, HandleType::Rotation),
                    Shortcut::Scale => self.change_handle_type(id, HandleType::Scale),
                    Shortcut::All => self.change_handle_type(id, HandleType::All),
                    Shortcut::ToggleSpace => match self.handles.get(&id).map(|h| h.space().toggled()) {
                        Some(next) => self.change_handle_space(id, next).map(|_| ()),
                        None => Err(HandleError::HandleNotFound(id)),
                    },
                    Shortcut::TogglePivot => match self.handles.get(&id).map(|h| h.pivot().toggled()) {
                        Some(next) => self.change_handle_pivot(id, next),
                        None => Err(HandleError::HandleNotFound(id)),
                    },
                };
                if let Err(err) = result {
                    error!("Shortcut {:?} failed for {}: {}", shortcut, id, err);
                }
            }
        }
    }

    //--- Drag Helpers -----------------------------------------------------

    fn start_drag(&mut self, widget: WidgetId, hit_point: Vec3) {
        let Some(session) = self.handles.get_mut(&widget.handle) else {
            error!("Hovered widget of missing {}", widget.handle);
            return;
        };
        if !session.start_interaction(widget.kind, hit_point) {
            error!("{:?} is not active on {}", widget.kind, widget.handle);
            return;
        }

        self.dragging = Some(DragState { widget, hit_point });
        self.events.emit(HandleEvent::InteractionStarted(widget.handle));
        debug!("Drag started on {:?} of {} at {:?}", widget.kind, widget.handle, hit_point);
    }

    fn interact(&mut self, drag: DragState, camera: &Camera, pointer: Vec2, delta_time: f32) {
        let id = drag.widget.handle;
        let Some(session) = self.handles.get_mut(&id) else {
            error!("Dragged {} vanished", id);
            self.dragging = None;
            return;
        };

        let ctx = InteractionContext {
            camera,
            pointer,
            previous_pointer: self.previous_pointer,
            delta_time,
            sensitivity: self.config.sensitivity,
            space: session.space(),
        };

        if let Some(delta) = session.interact(drag.widget.kind, &ctx) {
            if !delta.is_empty() {
                let pivot = session.ghost().pose().position;
                session.group().apply(&mut self.scene, &delta, pivot, session.space());
            }
        }
        self.events.emit(HandleEvent::Interacting(id));
    }

    fn end_drag(&mut self) {
        let Some(drag) = self.dragging.take() else {
            return;
        };
        let id = drag.widget.handle;

        if let Some(session) = self.handles.get_mut(&id) {
            session.end_interaction(drag.widget.kind);
            session.group_mut().update_bounds(&self.scene);
            session.refresh_ghost(&self.scene);
        }
        self.events.emit(HandleEvent::InteractionEnded(id));
        debug!("Drag ended on {:?} of {} (grabbed at {:?})", drag.widget.kind, id, drag.hit_point);
    }

    /// Ends a drag in progress on `handle`, if any.
    fn cancel_drag_on(&mut self, handle: HandleId) {
        if self.dragging.is_some_and(|d| d.widget.handle == handle) {
            self.end_drag();
        }
    }

    fn on_camera_lost(&mut self) {
        match self.dragging.map(|d| d.widget.handle) {
            Some(owner) => {
                warn!("Camera lost during drag, tearing down {}", owner);
                self.teardown(owner);
            }
            None => warn!("Camera unavailable, skipping pick"),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn widget_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.handles.get_mut(&id.handle)?.widget_mut(id.kind)
    }

    fn check_available(&self, target: EntityId) -> Result<()> {
        if let Some(&owner) = self.owners.get(&target) {
            warn!("{} already has a handle ({})", target, owner);
            return Err(HandleError::AlreadyOwned { entity: target, owner });
        }
        if !self.scene.contains(target) {
            error!("{} is not part of the scene", target);
            return Err(HandleError::EntityNotFound(target));
        }
        Ok(())
    }

    /// Drops one member and its ownership. Returns whether the group is
    /// now empty. The ghost is not refreshed.
    fn release_target(&mut self, target: EntityId, handle: HandleId) -> bool {
        self.owners.remove(&target);
        let Some(session) = self.handles.get_mut(&handle) else {
            return true;
        };
        let empty = session.group_mut().remove(target);
        if session.is_outline_attached() {
            self.feedback.deselect(&[target]);
        }
        debug!("Released {} from {}", target, handle);
        empty
    }

    /// Removes a session with everything hanging off it.
    fn teardown(&mut self, handle: HandleId) {
        if self.dragging.is_some_and(|d| d.widget.handle == handle) {
            self.dragging = None;
            self.events.emit(HandleEvent::InteractionEnded(handle));
        }
        if self.hovered.is_some_and(|w| w.handle == handle) {
            self.hovered = None;
        }
        self.deferred.cancel(handle);

        let Some(mut session) = self.handles.remove(&handle) else {
            return;
        };
        let members = session.group_mut().clear();
        for member in &members {
            self.owners.remove(member);
        }
        if session.is_outline_attached() && !members.is_empty() {
            self.feedback.deselect(&members);
        }

        self.events.handle_destroyed(handle);
        info!("Destroyed {} ({} member(s) released)", handle, members.len());
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
