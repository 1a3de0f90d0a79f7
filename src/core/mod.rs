//=========================================================================
// Core
//
// Math types and the collaborator seams the handle layer talks through.
//
// Responsibilities:
// - Pose and bounds math (`math`)
// - Camera projection and picking rays (`camera`)
// - Scene access, spatial queries and visual feedback as traits, so any
//   host engine can plug in (`scene`, `query`, `feedback`)
// - Per-frame input state and shortcut mapping (`input`)
//
// Notes:
// Nothing in here knows about sessions or widgets. The `handles` module
// builds on these types; hosts implement the traits.
//
//=========================================================================

pub mod camera;
pub mod feedback;
pub mod input;
pub mod math;
pub mod query;
pub mod scene;
