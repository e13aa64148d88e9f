//! Coordinate types shared by chunks, blocks, and the raycaster.
//!
//! World space is continuous (`glam::Vec3`); chunk identity is the integer
//! world-space origin of the chunk's minimum corner, and block positions inside
//! a chunk are `usize` triples indexed `[y][x][z]`.

use std::fmt;

use glam::{IVec3, Vec3};
use thiserror::Error;

/// Errors raised when constructing coordinates from raw components.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum CoordError {
    /// A component was NaN or infinite.
    #[error("coordinate component {axis} is not a finite number ({value})")]
    NonFinite {
        /// Axis name (`x`, `y` or `z`).
        axis: char,
        /// The rejected value.
        value: f32,
    },
}

/// Builds a world-space point, rejecting NaN and infinite components.
///
/// Everything downstream (containment, rounding to grid cells, distances)
/// assumes real numbers, so bad input is refused here instead of producing
/// garbage cells later.
pub fn world_point(x: f32, y: f32, z: f32) -> Result<Vec3, CoordError> {
    check_finite(Vec3::new(x, y, z))
}

/// Validates an existing vector component by component.
pub fn check_finite(v: Vec3) -> Result<Vec3, CoordError> {
    for (axis, value) in [('x', v.x), ('y', v.y), ('z', v.z)] {
        if !value.is_finite() {
            return Err(CoordError::NonFinite { axis, value });
        }
    }
    Ok(v)
}

/// World-space origin of a chunk: its minimum corner, always at `y = 0`.
///
/// Chunks tile the XZ plane, so the origin is a multiple of the chunk width on
/// both horizontal axes. The origin doubles as the chunk's identity key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkOrigin {
    /// World-space X of the minimum corner.
    pub x: i32,
    /// World-space Z of the minimum corner.
    pub z: i32,
}

impl ChunkOrigin {
    /// Creates an origin from world-space coordinates.
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Origin of the chunk at grid cell `(gx, gz)` for the given width.
    ///
    /// Returns `None` when the origin does not fit in `i32`.
    pub fn from_grid(gx: i32, gz: i32, width: usize) -> Option<Self> {
        let w = i32::try_from(width).ok()?;
        Some(Self {
            x: gx.checked_mul(w)?,
            z: gz.checked_mul(w)?,
        })
    }

    /// Origin of the neighbouring chunk `(dx, dz)` grid steps away, or `None`
    /// past the edge of the `i32` grid.
    pub fn offset(self, dx: i32, dz: i32, width: usize) -> Option<Self> {
        let w = i32::try_from(width).ok()?;
        Some(Self {
            x: self.x.checked_add(dx.checked_mul(w)?)?,
            z: self.z.checked_add(dz.checked_mul(w)?)?,
        })
    }

    /// Integer vector form (`y` is always zero).
    pub fn as_ivec3(self) -> IVec3 {
        IVec3::new(self.x, 0, self.z)
    }

    /// Float vector form (`y` is always zero).
    pub fn as_vec3(self) -> Vec3 {
        Vec3::new(self.x as f32, 0.0, self.z as f32)
    }
}

impl fmt::Display for ChunkOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, 0, {})", self.x, self.z)
    }
}

/// Position of a block inside its chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalPos {
    /// Column X in `[0, width)`.
    pub x: usize,
    /// Layer Y in `[0, height)`.
    pub y: usize,
    /// Column Z in `[0, width)`.
    pub z: usize,
}

impl LocalPos {
    /// Creates a local position.
    pub fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Signed form, for neighbour arithmetic that may leave the chunk.
    pub fn as_ivec3(self) -> IVec3 {
        IVec3::new(self.x as i32, self.y as i32, self.z as i32)
    }
}

impl fmt::Display for LocalPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

/// Chunk dimensions: square footprint of `width × width`, `height` layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkDims {
    /// Blocks along X and Z.
    pub width: usize,
    /// Blocks along Y.
    pub height: usize,
}

impl ChunkDims {
    /// Creates chunk dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// A cube of `size` blocks on every axis.
    pub fn cube(size: usize) -> Self {
        Self {
            width: size,
            height: size,
        }
    }

    /// Total number of blocks in one chunk.
    pub fn volume(self) -> usize {
        self.width * self.width * self.height
    }

    /// Returns `true` if the signed local coordinate lies inside the chunk.
    pub fn contains(self, p: IVec3) -> bool {
        let w = self.width as i32;
        let h = self.height as i32;
        (0..w).contains(&p.x) && (0..h).contains(&p.y) && (0..w).contains(&p.z)
    }

    /// Dense index of a local position, laid out `[y][x][z]`.
    pub fn index(self, pos: LocalPos) -> usize {
        pos.y * self.width * self.width + pos.x * self.width + pos.z
    }

    /// Inverse of [`index`](Self::index).
    pub fn position(self, index: usize) -> LocalPos {
        let plane = self.width * self.width;
        LocalPos {
            y: index / plane,
            x: (index % plane) / self.width,
            z: index % self.width,
        }
    }
}

impl Default for ChunkDims {
    fn default() -> Self {
        Self::cube(16)
    }
}
