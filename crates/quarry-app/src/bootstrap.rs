//! Turns a loaded [`Config`] into the pieces of a play session.

use glam::Vec3;
use quarry_config::{CameraConfig, Config, PlacementMode, WorldConfig};
use quarry_raycast::RayError;
use quarry_terrain::{FractalParams, stream_rng, world_noise};
use quarry_voxel::{
    BlockType, ChunkDims, CoordError, FixedPlacement, PlacementPolicy, RandomPlacement,
    UnknownBlockType, World, check_finite,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::camera::Camera;
use crate::session::SessionSettings;

/// Config values that cannot produce a working session.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("chunk dimensions must be positive, got {width}x{height}")]
    EmptyChunk { width: usize, height: usize },
    #[error("noise scale must be positive and finite, got {0}")]
    NoiseScale(f64),
    #[error("invalid camera start: {0}")]
    Camera(#[from] CoordError),
    #[error("invalid raycast settings: {0}")]
    Raycast(#[from] RayError),
    #[error("invalid placement: {0}")]
    Placement(#[from] UnknownBlockType),
}

/// Generates and fully surfaces the world described by `config`.
pub fn build_world(config: &WorldConfig, seed: u32) -> Result<World, SetupError> {
    if config.chunk_width == 0 || config.chunk_height == 0 {
        return Err(SetupError::EmptyChunk {
            width: config.chunk_width,
            height: config.chunk_height,
        });
    }
    if !(config.noise_scale.is_finite() && config.noise_scale > 0.0) {
        return Err(SetupError::NoiseScale(config.noise_scale));
    }

    let noise = world_noise(FractalParams {
        seed,
        octaves: config.octaves,
        ..Default::default()
    });
    let dims = ChunkDims::new(config.chunk_width, config.chunk_height);
    let mut world = World::new(dims, config.noise_scale, noise);
    let report = world.setup(config.radius);
    info!(
        "World seed {} ready: {} chunks, {} visible blocks in {:.1}ms",
        seed,
        report.chunk_count,
        report.visible_blocks,
        report.total().as_secs_f64() * 1000.0
    );
    Ok(world)
}

/// Policy for added blocks. Random placement draws from a stream derived
/// from the world seed so a seeded run is reproducible.
pub fn placement_policy(
    mode: &PlacementMode,
    seed: u32,
) -> Result<Box<dyn PlacementPolicy>, SetupError> {
    match mode {
        PlacementMode::Random => Ok(Box::new(RandomPlacement::from_rng(stream_rng(
            seed,
            "placement",
        )))),
        PlacementMode::Fixed(name) => {
            let block_type: BlockType = name.parse()?;
            if block_type.is_air() {
                warn!("Fixed placement of air: every add will be declined");
            }
            Ok(Box::new(FixedPlacement(block_type)))
        }
    }
}

pub fn camera_from_config(config: &CameraConfig) -> Result<Camera, SetupError> {
    let position = check_finite(Vec3::from_array(config.start_position))?;
    Ok(Camera::new(
        position,
        config.yaw_degrees,
        config.pitch_degrees,
    ))
}

/// Session settings, camera and placement policy in one go.
pub fn session_parts(
    config: &Config,
    seed: u32,
) -> Result<(SessionSettings, Camera, Box<dyn PlacementPolicy>), SetupError> {
    Ok((
        SessionSettings::from_config(config)?,
        camera_from_config(&config.camera)?,
        placement_policy(&config.session.placement, seed)?,
    ))
}
