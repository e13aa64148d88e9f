//! Quarry application: a headless play session over a generated voxel world.
//!
//! Wires the camera, prefilter, raycaster and editor together behind a
//! fixed-timestep loop.

pub mod bootstrap;
pub mod camera;
pub mod game_loop;
pub mod script;
pub mod session;
