//! Fixed-size block grid with a render-set index, neighbour links, and
//! mesh-dirty tracking.
//!
//! A [`Chunk`] never resolves its neighbours itself: links are stored as
//! [`ChunkOrigin`] keys and looked up through the owning [`crate::World`].

use std::collections::BTreeSet;

use glam::{IVec3, Vec3};

use crate::block::{Block, BlockType};
use crate::coords::{ChunkDims, ChunkOrigin, LocalPos};
use crate::face::{CornerDirection, EdgeDirection};
use crate::generation::{NoiseField, column_block, sample_surface};
use crate::visible_faces::VisibleFaces;

/// Neighbour links of one chunk. `None` marks the world edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChunkLinks {
    /// Indexed by [`EdgeDirection::index`].
    pub edges: [Option<ChunkOrigin>; 4],
    /// Indexed by [`CornerDirection::index`].
    pub corners: [Option<ChunkOrigin>; 4],
}

/// A `width × height × width` column of blocks.
#[derive(Clone, Debug)]
pub struct Chunk {
    origin: ChunkOrigin,
    dims: ChunkDims,
    /// Dense storage laid out `[y][x][z]`.
    blocks: Vec<Block>,
    /// Dense indices of blocks with at least one visible face.
    render_set: BTreeSet<usize>,
    links: ChunkLinks,
    mesh_dirty: bool,
    /// Monotonically increasing, bumped every time the mesh goes dirty.
    version: u64,
}

impl Chunk {
    /// Creates a chunk filled with air. No faces are visible and no links
    /// are set.
    pub fn new(origin: ChunkOrigin, dims: ChunkDims) -> Self {
        let base = origin.as_vec3();
        let blocks = (0..dims.volume())
            .map(|i| {
                let local = dims.position(i);
                Block::new(local, base + local.as_ivec3().as_vec3(), BlockType::Air)
            })
            .collect();
        Self {
            origin,
            dims,
            blocks,
            render_set: BTreeSet::new(),
            links: ChunkLinks::default(),
            mesh_dirty: false,
            version: 0,
        }
    }

    /// Fills every column from one noise sample using the terrain column rule.
    ///
    /// Faces are left untouched; run a visibility pass afterwards.
    pub fn generate_blocks(&mut self, noise: &dyn NoiseField, scale: f64) {
        let w = self.dims.width;
        for x in 0..w {
            for z in 0..w {
                let wx = f64::from(self.origin.x) + x as f64;
                let wz = f64::from(self.origin.z) + z as f64;
                let surface = sample_surface(noise, wx, wz, scale, self.dims.height);
                for y in 0..self.dims.height {
                    let idx = self.dims.index(LocalPos::new(x, y, z));
                    self.blocks[idx].set_block_type(column_block(y, surface));
                }
            }
        }
        self.mark_mesh_dirty();
    }

    pub fn origin(&self) -> ChunkOrigin {
        self.origin
    }

    pub fn dims(&self) -> ChunkDims {
        self.dims
    }

    // ── Bounds ───────────────────────────────────────────────────────

    /// World-space minimum corner.
    pub fn min_corner(&self) -> Vec3 {
        self.origin.as_vec3()
    }

    /// World-space maximum corner.
    pub fn max_corner(&self) -> Vec3 {
        let w = self.dims.width as f32;
        self.origin.as_vec3() + Vec3::new(w, self.dims.height as f32, w)
    }

    /// Centre of the chunk's footprint at `y = 0`.
    pub fn bottom_centre(&self) -> Vec3 {
        let half = self.dims.width as f32 / 2.0;
        self.origin.as_vec3() + Vec3::new(half, 0.0, half)
    }

    /// Containment test: half-open on X and Z, closed on both ends of Y.
    ///
    /// Chunks tile horizontally, so X/Z must partition space; vertically
    /// there is only one chunk and both boundaries belong to it.
    pub fn contains_point(&self, p: Vec3) -> bool {
        let min = self.min_corner();
        let max = self.max_corner();
        min.x <= p.x && p.x < max.x && min.y <= p.y && p.y <= max.y && min.z <= p.z && p.z < max.z
    }

    /// Local position for a world grid cell, wrapping X/Z into `[0, width)`.
    ///
    /// Returns `None` when the cell's Y is outside `[0, height)`.
    pub fn local_for_cell(&self, cell: IVec3) -> Option<LocalPos> {
        let w = self.dims.width as i32;
        if cell.y < 0 || cell.y >= self.dims.height as i32 {
            return None;
        }
        Some(LocalPos::new(
            (cell.x - self.origin.x).rem_euclid(w) as usize,
            cell.y as usize,
            (cell.z - self.origin.z).rem_euclid(w) as usize,
        ))
    }

    // ── Blocks ───────────────────────────────────────────────────────

    /// Block at a local position, or `None` if out of bounds.
    pub fn block(&self, local: LocalPos) -> Option<&Block> {
        if !self.dims.contains(local.as_ivec3()) {
            return None;
        }
        self.blocks.get(self.dims.index(local))
    }

    /// Block at a signed local coordinate, or `None` if out of bounds.
    pub fn block_at(&self, p: IVec3) -> Option<&Block> {
        if !self.dims.contains(p) {
            return None;
        }
        self.blocks
            .get(self.dims.index(LocalPos::new(p.x as usize, p.y as usize, p.z as usize)))
    }

    /// All blocks in storage order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    /// Number of non-air blocks.
    pub fn solid_count(&self) -> usize {
        self.blocks.iter().filter(|b| !b.is_air()).count()
    }

    pub(crate) fn set_block_type(&mut self, local: LocalPos, block_type: BlockType) -> bool {
        if !self.dims.contains(local.as_ivec3()) {
            tracing::warn!("Chunk::set_block_type out of bounds: {} in {}", local, self.origin);
            return false;
        }
        let idx = self.dims.index(local);
        self.blocks[idx].set_block_type(block_type);
        true
    }

    /// Stores freshly computed face flags and keeps the render set in step.
    ///
    /// Insertion and removal are idempotent. Returns `true` if the flags
    /// differ from what was stored.
    pub(crate) fn apply_faces(&mut self, local: LocalPos, faces: VisibleFaces) -> bool {
        if !self.dims.contains(local.as_ivec3()) {
            return false;
        }
        let idx = self.dims.index(local);
        let block = &mut self.blocks[idx];
        let changed = block.faces() != faces;
        block.set_faces(faces);
        if faces.any() {
            self.render_set.insert(idx);
        } else {
            self.render_set.remove(&idx);
        }
        changed
    }

    // ── Render set ───────────────────────────────────────────────────

    /// Blocks with at least one visible face, in `[y][x][z]` order.
    pub fn render_set(&self) -> impl Iterator<Item = &Block> {
        self.render_set.iter().map(|&i| &self.blocks[i])
    }

    pub fn render_set_len(&self) -> usize {
        self.render_set.len()
    }

    /// Returns `true` if the block at `local` is in the render set.
    pub fn in_render_set(&self, local: LocalPos) -> bool {
        self.dims.contains(local.as_ivec3()) && self.render_set.contains(&self.dims.index(local))
    }

    // ── Neighbours ───────────────────────────────────────────────────

    /// Replaces all neighbour links.
    pub fn link(&mut self, links: ChunkLinks) {
        self.links = links;
    }

    pub fn links(&self) -> &ChunkLinks {
        &self.links
    }

    /// Edge-adjacent neighbour in `dir`, or `None` at the world edge.
    pub fn edge(&self, dir: EdgeDirection) -> Option<ChunkOrigin> {
        self.links.edges[dir.index()]
    }

    /// Corner-adjacent neighbour in `dir`, or `None` at the world edge.
    pub fn corner(&self, dir: CornerDirection) -> Option<ChunkOrigin> {
        self.links.corners[dir.index()]
    }

    /// Linked edge neighbours in [`EdgeDirection::ALL`] order.
    pub fn edge_neighbors(&self) -> impl Iterator<Item = ChunkOrigin> + '_ {
        self.links.edges.iter().flatten().copied()
    }

    /// Linked edge neighbours followed by linked corner neighbours.
    pub fn all_neighbors(&self) -> impl Iterator<Item = ChunkOrigin> + '_ {
        self.links
            .edges
            .iter()
            .chain(self.links.corners.iter())
            .flatten()
            .copied()
    }

    // ── Mesh invalidation ────────────────────────────────────────────

    /// Returns `true` if the mesh needs rebuilding.
    pub fn is_mesh_dirty(&self) -> bool {
        self.mesh_dirty
    }

    /// Flags the mesh for rebuilding and bumps the version.
    pub fn mark_mesh_dirty(&mut self) {
        self.mesh_dirty = true;
        self.version += 1;
    }

    /// Clears the mesh-dirty flag. The version is left untouched.
    pub fn clear_mesh_dirty(&mut self) {
        self.mesh_dirty = false;
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}
