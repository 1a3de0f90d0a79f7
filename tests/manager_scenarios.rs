//=========================================================================
// Handle Manager Scenarios
//
// End-to-end behaviour through the public API: a `MemoryScene`, a
// scripted spatial query, the stock `InputSystem` fed with raw events and
// a `RecordingFeedback` sink.
//
//=========================================================================

use std::cell::RefCell;

use aetheric_handles::prelude::*;
use glam::{Quat, Vec2, Vec3};

//=== Fixtures ============================================================

const EPSILON: f32 = 1.0e-4;

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < EPSILON
}

/// Returns whatever hits the test loaded, regardless of the ray.
#[derive(Default)]
struct ScriptedQuery {
    hits: RefCell<Vec<RayHit>>,
}

impl ScriptedQuery {
    fn hit_widget(&self, id: WidgetId) {
        *self.hits.borrow_mut() = vec![RayHit::widget(2.0, Vec3::ZERO, id)];
    }

    fn clear(&self) {
        self.hits.borrow_mut().clear();
    }
}

impl SpatialQuery for ScriptedQuery {
    fn query(&self, _ray: &Ray, _max_distance: f32, _mask: LayerMask, _max_hits: usize) -> Vec<RayHit> {
        self.hits.borrow().clone()
    }
}

struct Rig {
    manager: HandleManager<MemoryScene, RecordingFeedback>,
    input: InputSystem,
    query: ScriptedQuery,
    camera: Camera,
}

impl Rig {
    fn new(default_type: HandleType) -> Self {
        Self::with_builder(HandleManagerBuilder::new().with_default_type(default_type))
    }

    fn with_builder(builder: HandleManagerBuilder) -> Self {
        Self {
            manager: builder.build(MemoryScene::new(), RecordingFeedback::new()),
            input: InputSystem::new(),
            query: ScriptedQuery::default(),
            camera: Camera::looking_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 1.0, Vec2::new(800.0, 600.0)),
        }
    }

    fn spawn(&mut self, position: Vec3) -> EntityId {
        self.manager.scene_mut().spawn(Pose::from_position(position))
    }

    fn frame(&mut self, events: &[InputEvent]) -> Result<(), HandleError> {
        self.input.update(events);
        self.manager.tick(Frame {
            input: &self.input,
            query: &self.query,
            camera: &mut self.camera,
            delta_time: 0.1,
        })
    }

    /// Press on `widget` at `from`, drag to `to`, release.
    fn drag(&mut self, widget: WidgetId, from: Vec2, to: Vec2) {
        self.query.hit_widget(widget);
        self.frame(&[InputEvent::moved(from.x, from.y), InputEvent::button_down(MouseButton::Left)])
            .unwrap();
        self.frame(&[InputEvent::moved(to.x, to.y)]).unwrap();
        self.frame(&[InputEvent::button_up(MouseButton::Left)]).unwrap();
        self.query.clear();
    }

    fn ghost(&self, handle: HandleId) -> Vec3 {
        self.manager.handle(handle).unwrap().ghost().pose().position
    }

    fn position(&self, entity: EntityId) -> Vec3 {
        self.manager.scene().pose(entity).unwrap().position
    }
}

//=========================================================================
// Membership
//=========================================================================

#[test]
fn an_entity_belongs_to_one_session_at_most() {
    let mut rig = Rig::new(HandleType::Position);
    let a = rig.spawn(Vec3::ZERO);
    let b = rig.spawn(Vec3::X);

    let h1 = rig.manager.create_handle(a).unwrap();
    let h2 = rig.manager.create_handle(b).unwrap();

    assert_eq!(
        rig.manager.add_target(a, h2),
        Err(HandleError::AlreadyOwned { entity: a, owner: h1 })
    );
    assert_eq!(rig.manager.handle_for_target(a), Some(h1));
    assert_eq!(rig.manager.targets_for_handle(h2), vec![b]);
}

#[test]
fn adding_an_ancestor_flattens_the_group() {
    let mut rig = Rig::new(HandleType::Position);
    let parent = rig.spawn(Vec3::ZERO);
    let child = rig
        .manager
        .scene_mut()
        .spawn_child(parent, Pose::from_position(Vec3::Y))
        .unwrap();

    let handle = rig.manager.create_handle(child).unwrap();
    rig.manager.add_target(parent, handle).unwrap();

    assert_eq!(rig.manager.targets_for_handle(handle), vec![parent]);
    assert_eq!(rig.manager.handle_for_target(child), None);
    assert_eq!(rig.manager.handle_for_target(parent), Some(handle));
}

#[test]
fn descendant_of_a_member_is_refused() {
    let mut rig = Rig::new(HandleType::Position);
    let parent = rig.spawn(Vec3::ZERO);
    let child = rig
        .manager
        .scene_mut()
        .spawn_child(parent, Pose::from_position(Vec3::Y))
        .unwrap();

    let handle = rig.manager.create_handle(parent).unwrap();
    assert_eq!(
        rig.manager.add_target(child, handle),
        Err(HandleError::RelativeOfSelection(child))
    );
    assert_eq!(rig.manager.targets_for_handle(handle), vec![parent]);
}

//=========================================================================
// Aggregate and Teardown
//=========================================================================

#[test]
fn ghost_tracks_membership_and_pivot_mode() {
    let mut rig = Rig::new(HandleType::Position);
    let a = rig.spawn(Vec3::ZERO);
    let b = rig.spawn(Vec3::new(2.0, 0.0, 0.0));
    rig.manager
        .scene_mut()
        .set_mesh_bounds(a, Aabb::new(Vec3::Y, Vec3::splat(0.5)));
    rig.manager
        .scene_mut()
        .set_mesh_bounds(b, Aabb::new(Vec3::Y, Vec3::splat(0.5)));

    let handle = rig.manager.create_handle(a).unwrap();
    rig.manager.add_target(b, handle).unwrap();
    assert!(approx(rig.ghost(handle), Vec3::new(1.0, 0.0, 0.0)));

    rig.manager
        .change_handle_pivot(handle, PivotMode::GroupBoundsCenter)
        .unwrap();
    assert!(approx(rig.ghost(handle), Vec3::new(1.0, 1.0, 0.0)));

    rig.manager.change_handle_pivot(handle, PivotMode::OriginPerEntity).unwrap();
    rig.manager.remove_target(b, handle).unwrap();
    assert!(approx(rig.ghost(handle), Vec3::ZERO));
    assert_eq!(rig.manager.targets_for_handle(handle), vec![a]);

    rig.manager.remove_target(a, handle).unwrap();
    assert!(rig.manager.handle(handle).is_none());
    assert!(rig.manager.targets_for_handle(handle).is_empty());
    assert_eq!(rig.manager.handle_for_target(a), None);
    assert_eq!(rig.manager.handle_for_target(b), None);
}

#[test]
fn destroyed_event_reaches_scoped_subscriber_once() {
    let mut rig = Rig::new(HandleType::Position);
    let a = rig.spawn(Vec3::ZERO);
    let handle = rig.manager.create_handle(a).unwrap();
    let (_, events) = rig.manager.subscribe_handle(handle).unwrap();

    rig.manager.remove_target(a, handle).unwrap();

    assert_eq!(events.try_iter().collect::<Vec<_>>(), vec![HandleEvent::Destroyed(handle)]);
    assert!(events.recv().is_err(), "subscription should be closed");
}

#[test]
fn remove_all_handles_releases_everything() {
    let mut rig = Rig::new(HandleType::Outline);
    let a = rig.spawn(Vec3::ZERO);
    let b = rig.spawn(Vec3::X);
    rig.manager.create_handle(a).unwrap();
    rig.manager.create_handle(b).unwrap();
    rig.frame(&[]).unwrap();
    assert_eq!(rig.manager.targets().len(), 2);

    rig.manager.remove_all_handles();

    assert_eq!(rig.manager.handle_count(), 0);
    assert!(rig.manager.targets().is_empty());
    assert!(rig.manager.feedback().outlined().is_empty());
}

//=========================================================================
// Widget Sets
//=========================================================================

#[test]
fn switching_to_all_activates_every_widget_family() {
    let mut rig = Rig::new(HandleType::Position);
    let a = rig.spawn(Vec3::ZERO);
    let handle = rig.manager.create_handle(a).unwrap();

    rig.manager.change_handle_type(handle, HandleType::Rotation).unwrap();
    rig.manager.change_handle_type(handle, HandleType::Position).unwrap();
    rig.manager.change_handle_type(handle, HandleType::All).unwrap();

    let active = rig.manager.handle(handle).unwrap().active_widgets();
    assert_eq!(active.len(), 13);
    assert!(active.contains(&WidgetKind::PositionAxis(Axis::X)));
    assert!(active.contains(&WidgetKind::RotationAxis(Axis::Y)));
    assert!(active.contains(&WidgetKind::ScaleUniform));
}

#[test]
fn axis_mask_limits_pickable_widgets() {
    let mut rig = Rig::new(HandleType::Position);
    let a = rig.spawn(Vec3::ZERO);
    let handle = rig.manager.create_handle(a).unwrap();
    rig.manager.change_handle_axes(handle, AxisMask::X).unwrap();

    rig.query
        .hit_widget(WidgetId::new(handle, WidgetKind::PositionAxis(Axis::Y)));
    rig.frame(&[]).unwrap();
    assert_eq!(rig.manager.hovered_widget(), None);

    let placements = rig.manager.widget_placements();
    assert_eq!(placements.len(), 1);
    assert_eq!(placements[0].id.kind, WidgetKind::PositionAxis(Axis::X));
}

//=========================================================================
// Dragging
//=========================================================================

#[test]
fn position_drag_moves_every_member() {
    let mut rig = Rig::new(HandleType::Position);
    let a = rig.spawn(Vec3::ZERO);
    let b = rig.spawn(Vec3::new(0.0, 3.0, 0.0));
    let handle = rig.manager.create_handle_from_list(&[a, b]).unwrap();

    rig.drag(
        WidgetId::new(handle, WidgetKind::PositionAxis(Axis::X)),
        Vec2::new(400.0, 300.0),
        Vec2::new(430.0, 300.0),
    );

    assert!(approx(rig.position(a), Vec3::new(3.0, 0.0, 0.0)));
    assert!(approx(rig.position(b), Vec3::new(3.0, 3.0, 0.0)));
    assert!(approx(rig.ghost(handle), Vec3::new(3.0, 1.5, 0.0)));
    assert!(!rig.manager.is_dragging());
}

#[test]
fn rotation_drag_orbits_members_around_ghost() {
    let mut rig = Rig::new(HandleType::Rotation);
    let a = rig.spawn(Vec3::new(-1.0, 0.0, 0.0));
    let b = rig.spawn(Vec3::new(1.0, 0.0, 0.0));
    let handle = rig.manager.create_handle_from_list(&[a, b]).unwrap();
    rig.manager.change_handle_space(handle, Space::World).unwrap();

    // (dx + dy) * dt = 15.707... * 0.1 = PI / 2
    let quarter = std::f32::consts::FRAC_PI_2 / 0.1;
    rig.drag(
        WidgetId::new(handle, WidgetKind::RotationAxis(Axis::Z)),
        Vec2::new(400.0, 300.0),
        Vec2::new(400.0 + quarter, 300.0),
    );

    assert!(approx(rig.position(a), Vec3::new(0.0, -1.0, 0.0)));
    assert!(approx(rig.position(b), Vec3::new(0.0, 1.0, 0.0)));
    let turned = rig.manager.scene().pose(b).unwrap().rotation;
    assert!(turned.angle_between(Quat::from_rotation_z(std::f32::consts::FRAC_PI_2)) < 1.0e-3);
}

#[test]
fn scaling_about_bounds_center_keeps_center_fixed() {
    let mut rig = Rig::with_builder(
        HandleManagerBuilder::new()
            .with_default_type(HandleType::Scale)
            .with_default_pivot(PivotMode::GroupBoundsCenter),
    );
    let a = rig.spawn(Vec3::ZERO);
    rig.manager
        .scene_mut()
        .set_mesh_bounds(a, Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::splat(0.5)));
    let handle = rig.manager.create_handle(a).unwrap();
    let before = rig.manager.scene().bounds(a).center;

    rig.drag(
        WidgetId::new(handle, WidgetKind::ScaleUniform),
        Vec2::new(400.0, 300.0),
        Vec2::new(410.0, 300.0),
    );

    let pose = rig.manager.scene().pose(a).unwrap();
    assert!(approx(pose.scale, Vec3::splat(3.0)));
    assert!(approx(rig.manager.scene().bounds(a).center, before));
    assert!(approx(rig.ghost(handle), before));
}

#[test]
fn drag_lifecycle_is_observable() {
    let mut rig = Rig::new(HandleType::Position);
    let a = rig.spawn(Vec3::ZERO);
    let handle = rig.manager.create_handle(a).unwrap();
    let (id, events) = rig.manager.subscribe();

    rig.drag(
        WidgetId::new(handle, WidgetKind::PositionPlane(Plane::XY)),
        Vec2::new(400.0, 300.0),
        Vec2::new(410.0, 290.0),
    );

    assert_eq!(
        events.try_iter().collect::<Vec<_>>(),
        vec![
            HandleEvent::InteractionStarted(handle),
            HandleEvent::Interacting(handle),
            HandleEvent::InteractionEnded(handle),
        ]
    );
    assert!(rig.manager.unsubscribe(id));
}

#[test]
fn losing_the_camera_mid_drag_tears_down_that_session() {
    let mut rig = Rig::new(HandleType::Position);
    let a = rig.spawn(Vec3::ZERO);
    let handle = rig.manager.create_handle(a).unwrap();
    let (_, events) = rig.manager.subscribe();

    rig.query
        .hit_widget(WidgetId::new(handle, WidgetKind::PositionAxis(Axis::X)));
    rig.frame(&[InputEvent::moved(400.0, 300.0), InputEvent::button_down(MouseButton::Left)])
        .unwrap();

    let mut gone: Option<Camera> = None;
    rig.input.update(&[InputEvent::moved(420.0, 300.0)]);
    let result = rig.manager.tick(Frame {
        input: &rig.input,
        query: &rig.query,
        camera: &mut gone,
        delta_time: 0.1,
    });

    assert_eq!(result, Err(HandleError::CameraUnavailable));
    assert!(rig.manager.handle(handle).is_none());
    assert_eq!(rig.manager.handle_for_target(a), None);
    assert!(events.try_iter().any(|e| e == HandleEvent::Destroyed(handle)));
}

//=========================================================================
// Keyboard and Outline
//=========================================================================

#[test]
fn default_shortcuts_switch_every_session() {
    let mut rig = Rig::new(HandleType::Outline);
    let a = rig.spawn(Vec3::ZERO);
    let b = rig.spawn(Vec3::X);
    let h1 = rig.manager.create_handle(a).unwrap();
    let h2 = rig.manager.create_handle(b).unwrap();
    rig.frame(&[]).unwrap();
    assert!(rig.manager.feedback().is_outlined(a));

    rig.frame(&[InputEvent::key_down(KeyCode::KeyW)]).unwrap();
    assert_eq!(rig.manager.handle(h1).unwrap().handle_type(), HandleType::Position);
    assert_eq!(rig.manager.handle(h2).unwrap().handle_type(), HandleType::Position);
    assert!(!rig.manager.feedback().is_outlined(a));

    // Held key does not fire again.
    rig.frame(&[]).unwrap();
    rig.frame(&[InputEvent::key_up(KeyCode::KeyW), InputEvent::key_down(KeyCode::KeyR)])
        .unwrap();
    assert_eq!(rig.manager.handle(h1).unwrap().handle_type(), HandleType::Scale);

    rig.frame(&[InputEvent::key_down(KeyCode::KeyX)]).unwrap();
    assert_eq!(rig.manager.handle(h1).unwrap().space(), Space::Local, "scale pins local space");

    rig.frame(&[InputEvent::key_down(KeyCode::KeyS)]).unwrap();
    assert!(rig.manager.feedback().is_outlined(a));
    assert!(rig.manager.feedback().is_outlined(b));
}

#[test]
fn outline_waits_for_the_next_tick() {
    let mut rig = Rig::new(HandleType::Outline);
    let a = rig.spawn(Vec3::ZERO);
    let b = rig.spawn(Vec3::X);

    let handle = rig.manager.create_handle(a).unwrap();
    rig.manager.add_target(b, handle).unwrap();
    assert!(rig.manager.feedback().outlined().is_empty());

    rig.frame(&[]).unwrap();
    assert_eq!(rig.manager.feedback().outlined(), &[a, b]);

    rig.manager.remove_target(b, handle).unwrap();
    assert_eq!(rig.manager.feedback().outlined(), &[a]);
}

#[test]
fn retargeting_keeps_the_session() {
    let mut rig = Rig::new(HandleType::Outline);
    let a = rig.spawn(Vec3::ZERO);
    let b = rig.spawn(Vec3::new(0.0, 0.0, 4.0));
    let handle = rig.manager.create_handle(a).unwrap();
    rig.frame(&[]).unwrap();

    rig.manager.set_handle_target(handle, b).unwrap();

    assert_eq!(rig.manager.targets_for_handle(handle), vec![b]);
    assert!(approx(rig.ghost(handle), Vec3::new(0.0, 0.0, 4.0)));
    assert_eq!(rig.manager.feedback().outlined(), &[b]);
}
