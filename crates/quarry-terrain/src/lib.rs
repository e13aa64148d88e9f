//! Terrain noise and seeding: the simplex field every chunk of a world
//! samples, and reproducible seeds derived from the world seed.

mod fractal;

pub mod seed;

pub use fractal::{FractalField, FractalParams};
pub use seed::{SEED_RANGE, derive_seed, resolve_seed, stream_rng};

use quarry_voxel::NoiseField;

/// Builds the shared noise field for a world.
pub fn world_noise(params: FractalParams) -> Box<dyn NoiseField> {
    tracing::debug!(
        "Terrain noise: seed {}, {} octave(s)",
        params.seed,
        params.octaves
    );
    Box::new(FractalField::new(params))
}
