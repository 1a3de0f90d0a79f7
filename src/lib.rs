//=========================================================================
// Aetheric Handles - Library Root
//
// Runtime transform handles for the Aetheric Engine: translate, rotate
// and scale one or many scene entities through on-screen widgets.
//
// Responsibilities:
// - Expose the session manager (`HandleManager`) and its builder
// - Define the collaborator traits the host implements (scene graph,
//   spatial query, visual feedback, camera, input)
// - Offer a winit input bridge and a click-to-select controller for
//   hosts that want the stock behaviour
//
// Typical usage:
// ```
// use aetheric_handles::prelude::*;
//
// let mut manager = HandleManagerBuilder::new()
//     .with_default_type(HandleType::Position)
//     .build(MemoryScene::new(), NoFeedback);
//
// let crate_box = manager.scene_mut().spawn(Pose::IDENTITY);
// let handle = manager.create_handle(crate_box).unwrap();
//
// let input = InputSystem::new();
// let mut camera = Camera::looking_at(
//     glam::Vec3::new(0.0, 2.0, 10.0),
//     glam::Vec3::ZERO,
//     1.0,
//     glam::Vec2::new(1280.0, 720.0),
// );
// struct NoHits;
// impl SpatialQuery for NoHits {
//     fn query(&self, _: &Ray, _: f32, _: LayerMask, _: usize) -> Vec<RayHit> {
//         Vec::new()
//     }
// }
//
// manager
//     .tick(Frame { input: &input, query: &NoHits, camera: &mut camera, delta_time: 1.0 / 60.0 })
//     .unwrap();
// assert_eq!(manager.targets_for_handle(handle), vec![crate_box]);
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds math, collaborator traits and input state.
// `handles` holds sessions, widgets and the manager.
//
pub mod core;
pub mod error;
pub mod handles;
pub mod platform;
pub mod prelude;
pub mod selection;

//--- Public Exports ------------------------------------------------------

pub use error::{HandleError, Result};
pub use handles::{HandleManager, HandleManagerBuilder};
