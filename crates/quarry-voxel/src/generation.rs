//! Column rule turning a 2D noise sample into a stack of blocks.
//!
//! A world holds a single [`NoiseField`] and hands it to every chunk so that
//! neighbouring columns in different chunks sample the same continuous field.

use crate::block::BlockType;

/// A deterministic, continuous 2D scalar field with values in `[-1, 1]`.
pub trait NoiseField: Send + Sync {
    /// Samples the field at `(x, z)`. Inputs are already divided by the
    /// terrain scale.
    fn sample(&self, x: f64, z: f64) -> f64;
}

/// A field returning the same value everywhere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantField(pub f64);

impl NoiseField for ConstantField {
    fn sample(&self, _x: f64, _z: f64) -> f64 {
        self.0
    }
}

/// A field backed by a closure, for hand-shaped terrain.
pub struct FnField<F>(pub F);

impl<F> NoiseField for FnField<F>
where
    F: Fn(f64, f64) -> f64 + Send + Sync,
{
    fn sample(&self, x: f64, z: f64) -> f64 {
        (self.0)(x, z)
    }
}

/// Surface layer for a column of `height` blocks given noise sample `n`.
///
/// `floor((n + 1) * height / 2)`, with `n` clamped to `[-1, 1]` and the
/// result clamped to the top layer so `n == 1` still lands inside the chunk.
pub fn surface_height(n: f64, height: usize) -> usize {
    if height == 0 {
        return 0;
    }
    let n = if n.is_finite() { n.clamp(-1.0, 1.0) } else { 0.0 };
    let y = ((n + 1.0) * height as f64 / 2.0).floor() as usize;
    y.min(height - 1)
}

/// Material at layer `y` of a column whose surface is at `surface_y`.
pub fn column_block(y: usize, surface_y: usize) -> BlockType {
    if y == surface_y {
        BlockType::Grass
    } else if y > 0 && y < surface_y {
        BlockType::Dirt
    } else if y == 0 {
        BlockType::Stone
    } else {
        BlockType::Air
    }
}

/// Samples `noise` for the world column `(world_x, world_z)` and returns its
/// surface layer.
pub fn sample_surface(
    noise: &dyn NoiseField,
    world_x: f64,
    world_z: f64,
    scale: f64,
    height: usize,
) -> usize {
    let n = noise.sample(world_x / scale, world_z / scale);
    surface_height(n, height)
}
