//! Configuration for the quarry sandbox.
//!
//! Settings persist to disk as a RON file and can be overridden from the
//! command line. Unknown fields are ignored and missing ones fall back to
//! their defaults, so old and new config files both load.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, Config, DebugConfig, InputConfig, PlacementMode, RaycastConfig, SessionConfig,
    WorldConfig,
};
pub use error::ConfigError;
