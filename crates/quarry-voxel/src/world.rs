//! Central owner for every chunk, keyed by [`ChunkOrigin`].
//!
//! The [`World`] holds the one shared [`NoiseField`], creates the chunk grid,
//! links chunks to their neighbours, and tracks which chunk currently holds
//! the camera. All block mutation goes through it (see `editing`).

use std::time::{Duration, Instant};

use glam::{IVec3, Vec3};
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::block::Block;
use crate::chunk::{Chunk, ChunkLinks};
use crate::coords::{ChunkDims, ChunkOrigin};
use crate::face::{CornerDirection, EdgeDirection};
use crate::generation::NoiseField;

/// How long each phase of [`World::setup`] took, plus what it produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SetupReport {
    pub chunk_count: usize,
    /// Blocks that ended up in a render set.
    pub visible_blocks: usize,
    pub generate_chunks: Duration,
    pub generate_blocks: Duration,
    pub link_chunks: Duration,
    pub update_surfaces: Duration,
}

impl SetupReport {
    /// Sum of all phase durations.
    pub fn total(&self) -> Duration {
        self.generate_chunks + self.generate_blocks + self.link_chunks + self.update_surfaces
    }
}

/// Owns all chunks and provides lookup by origin.
pub struct World {
    dims: ChunkDims,
    noise_scale: f64,
    noise: Box<dyn NoiseField>,
    chunks: FxHashMap<ChunkOrigin, Chunk>,
    current: Option<ChunkOrigin>,
    /// Linked edge neighbours then corner neighbours of `current`.
    current_neighbors: Vec<ChunkOrigin>,
}

impl World {
    /// Creates an empty world. `noise` is shared by every chunk.
    pub fn new(dims: ChunkDims, noise_scale: f64, noise: Box<dyn NoiseField>) -> Self {
        Self {
            dims,
            noise_scale,
            noise,
            chunks: FxHashMap::default(),
            current: None,
            current_neighbors: Vec::new(),
        }
    }

    pub fn dims(&self) -> ChunkDims {
        self.dims
    }

    pub fn noise_scale(&self) -> f64 {
        self.noise_scale
    }

    // ── Setup ────────────────────────────────────────────────────────

    /// Runs the full pipeline: create the `(2r+1)²` grid, fill blocks, link
    /// neighbours, then compute every face.
    pub fn setup(&mut self, radius: u32) -> SetupReport {
        let mut report = SetupReport::default();

        let start = Instant::now();
        self.generate_chunks(radius);
        report.generate_chunks = start.elapsed();
        info!("Generated {} chunks in {:?}", self.chunks.len(), report.generate_chunks);

        let start = Instant::now();
        self.generate_blocks();
        report.generate_blocks = start.elapsed();
        info!("Generated blocks in {:?}", report.generate_blocks);

        let start = Instant::now();
        self.link_chunks();
        report.link_chunks = start.elapsed();
        info!("Linked chunks in {:?}", report.link_chunks);

        let start = Instant::now();
        self.update_all_surfaces();
        report.update_surfaces = start.elapsed();
        info!("Updated surfaces in {:?}", report.update_surfaces);

        report.chunk_count = self.chunks.len();
        report.visible_blocks = self.chunks.values().map(Chunk::render_set_len).sum();
        info!(
            "World ready: {} chunks, {} visible blocks, {:?} total",
            report.chunk_count,
            report.visible_blocks,
            report.total()
        );
        report
    }

    /// Creates air-filled chunks for every grid cell within `radius` of the
    /// origin on both horizontal axes. Existing chunks are kept.
    pub fn generate_chunks(&mut self, radius: u32) {
        let r = radius as i32;
        let dims = self.dims;
        for gx in -r..=r {
            for gz in -r..=r {
                let Some(origin) = ChunkOrigin::from_grid(gx, gz, dims.width) else {
                    continue;
                };
                self.chunks
                    .entry(origin)
                    .or_insert_with(|| Chunk::new(origin, dims));
            }
        }
    }

    /// Fills every chunk from the shared noise field.
    pub fn generate_blocks(&mut self) {
        let noise = self.noise.as_ref();
        for chunk in self.chunks.values_mut() {
            chunk.generate_blocks(noise, self.noise_scale);
        }
    }

    /// Adds a chunk built elsewhere, replacing any chunk at the same origin.
    ///
    /// Call [`link_chunks`](Self::link_chunks) afterwards.
    pub fn insert_chunk(&mut self, chunk: Chunk) {
        self.chunks.insert(chunk.origin(), chunk);
    }

    /// Links every chunk to whichever of its 4 edge and 4 corner neighbours
    /// exist. Links are symmetric because both sides are derived from the
    /// same origin table.
    pub fn link_chunks(&mut self) {
        let width = self.dims.width;
        let origins: Vec<ChunkOrigin> = self.chunks.keys().copied().collect();
        for origin in origins {
            let mut links = ChunkLinks::default();
            for dir in EdgeDirection::ALL {
                let (dx, dz) = dir.grid_offset();
                links.edges[dir.index()] = origin
                    .offset(dx, dz, width)
                    .filter(|n| self.chunks.contains_key(n));
            }
            for dir in CornerDirection::ALL {
                let (dx, dz) = dir.grid_offset();
                links.corners[dir.index()] = origin
                    .offset(dx, dz, width)
                    .filter(|n| self.chunks.contains_key(n));
            }
            if let Some(chunk) = self.chunks.get_mut(&origin) {
                chunk.link(links);
            }
        }
    }

    // ── Lookup ───────────────────────────────────────────────────────

    pub fn chunk(&self, origin: ChunkOrigin) -> Option<&Chunk> {
        self.chunks.get(&origin)
    }

    /// Mutable access for link and dirty-flag bookkeeping. Block contents
    /// can only change through the edit operations.
    pub fn chunk_mut(&mut self, origin: ChunkOrigin) -> Option<&mut Chunk> {
        self.chunks.get_mut(&origin)
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Iterates all chunks in arbitrary order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// All chunk origins, sorted.
    pub fn origins(&self) -> Vec<ChunkOrigin> {
        let mut origins: Vec<_> = self.chunks.keys().copied().collect();
        origins.sort_unstable();
        origins
    }

    /// Origin of the chunk containing `p`, if one is loaded.
    pub fn chunk_containing(&self, p: Vec3) -> Option<ChunkOrigin> {
        let w = self.dims.width as f32;
        let origin = ChunkOrigin::from_grid(
            (p.x / w).floor() as i32,
            (p.z / w).floor() as i32,
            self.dims.width,
        )?;
        self.chunks
            .get(&origin)
            .filter(|c| c.contains_point(p))
            .map(Chunk::origin)
    }

    /// Block occupying the world grid cell `cell`, with its chunk's origin.
    pub fn block_at_cell(&self, cell: IVec3) -> Option<(ChunkOrigin, &Block)> {
        let origin = self.chunk_containing(cell.as_vec3())?;
        let chunk = self.chunks.get(&origin)?;
        let local = chunk.local_for_cell(cell)?;
        chunk.block(local).map(|b| (origin, b))
    }

    // ── Camera tracking ──────────────────────────────────────────────

    /// Finds the chunk holding `position` and caches its linked neighbours.
    ///
    /// Returns `true` if the current chunk changed. A position outside every
    /// chunk clears the current chunk.
    pub fn update_current_chunk(&mut self, position: Vec3) -> bool {
        let found = self.chunk_containing(position);
        if found == self.current {
            return false;
        }
        self.current = found;
        self.current_neighbors = found
            .and_then(|o| self.chunks.get(&o))
            .map(|c| c.all_neighbors().collect())
            .unwrap_or_default();
        debug!(
            "Current chunk is now {:?} with {} neighbours",
            self.current,
            self.current_neighbors.len()
        );
        true
    }

    pub fn current_origin(&self) -> Option<ChunkOrigin> {
        self.current
    }

    pub fn current_chunk(&self) -> Option<&Chunk> {
        self.current.and_then(|o| self.chunks.get(&o))
    }

    /// Linked edge neighbours followed by linked corner neighbours of the
    /// current chunk.
    pub fn current_neighbors(&self) -> &[ChunkOrigin] {
        &self.current_neighbors
    }

    // ── Mesh invalidation ────────────────────────────────────────────

    /// Origins of chunks whose mesh is dirty, sorted.
    pub fn dirty_chunks(&self) -> Vec<ChunkOrigin> {
        let mut dirty: Vec<_> = self
            .chunks
            .values()
            .filter(|c| c.is_mesh_dirty())
            .map(Chunk::origin)
            .collect();
        dirty.sort_unstable();
        dirty
    }

    /// Returns the dirty chunks and clears their flags.
    pub fn take_dirty_chunks(&mut self) -> Vec<ChunkOrigin> {
        let dirty = self.dirty_chunks();
        for origin in &dirty {
            if let Some(chunk) = self.chunks.get_mut(origin) {
                chunk.clear_mesh_dirty();
            }
        }
        dirty
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("dims", &self.dims)
            .field("noise_scale", &self.noise_scale)
            .field("chunks", &self.chunks.len())
            .field("current", &self.current)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::ConstantField;

    fn flat_world(radius: u32) -> World {
        let mut world = World::new(ChunkDims::cube(16), 200.0, Box::new(ConstantField(0.0)));
        world.setup(radius);
        world
    }

    #[test]
    fn test_generate_chunks_builds_square_grid() {
        let mut world = World::new(ChunkDims::cube(16), 200.0, Box::new(ConstantField(0.0)));
        world.generate_chunks(1);
        assert_eq!(world.chunk_count(), 9);
        assert!(world.chunk(ChunkOrigin::new(-16, -16)).is_some());
        assert!(world.chunk(ChunkOrigin::new(16, 16)).is_some());
        assert!(world.chunk(ChunkOrigin::new(32, 0)).is_none());

        world.generate_chunks(1);
        assert_eq!(world.chunk_count(), 9);
    }

    #[test]
    fn test_links_are_symmetric() {
        let world = flat_world(1);
        for chunk in world.chunks() {
            for dir in EdgeDirection::ALL {
                if let Some(n) = chunk.edge(dir) {
                    let back = world.chunk(n).and_then(|c| c.edge(dir.opposite()));
                    assert_eq!(back, Some(chunk.origin()));
                }
            }
            for dir in CornerDirection::ALL {
                if let Some(n) = chunk.corner(dir) {
                    let back = world.chunk(n).and_then(|c| c.corner(dir.opposite()));
                    assert_eq!(back, Some(chunk.origin()));
                }
            }
        }
    }

    #[test]
    fn test_centre_chunk_has_all_neighbours_edge_chunk_does_not() {
        let world = flat_world(1);
        let centre = world.chunk(ChunkOrigin::new(0, 0)).expect("centre chunk");
        assert_eq!(centre.all_neighbors().count(), 8);

        let corner = world.chunk(ChunkOrigin::new(16, 16)).expect("corner chunk");
        assert_eq!(corner.edge_neighbors().count(), 2);
        assert_eq!(corner.all_neighbors().count(), 3);
        assert_eq!(corner.edge(EdgeDirection::PosX), None);
    }

    #[test]
    fn test_setup_report_counts() {
        let mut world = World::new(ChunkDims::cube(16), 200.0, Box::new(ConstantField(0.0)));
        let report = world.setup(0);
        assert_eq!(report.chunk_count, 1);
        // A lone flat slab of 9 layers: everything but the interior shows a
        // face, since unlinked sides and the bottom count as world edge.
        assert_eq!(report.visible_blocks, 16 * 16 * 9 - 14 * 14 * 7);
    }

    #[test]
    fn test_chunk_containing_uses_half_open_edges() {
        let world = flat_world(1);
        assert_eq!(
            world.chunk_containing(Vec3::new(0.0, 5.0, 0.0)),
            Some(ChunkOrigin::new(0, 0))
        );
        assert_eq!(
            world.chunk_containing(Vec3::new(-0.01, 5.0, 0.0)),
            Some(ChunkOrigin::new(-16, 0))
        );
        assert_eq!(
            world.chunk_containing(Vec3::new(15.99, 16.0, 31.99)),
            Some(ChunkOrigin::new(0, 16))
        );
        assert_eq!(world.chunk_containing(Vec3::new(0.0, 16.5, 0.0)), None);
        assert_eq!(world.chunk_containing(Vec3::new(40.0, 5.0, 0.0)), None);
    }

    #[test]
    fn test_far_away_camera_has_no_current_chunk() {
        let mut world = flat_world(1);
        assert!(world.update_current_chunk(Vec3::new(1.0, 12.0, 1.0)));
        let far = crate::world_point(1.0e12, 12.0, 0.0).expect("finite");
        assert!(world.update_current_chunk(far));
        assert_eq!(world.current_origin(), None);
        assert_eq!(world.chunk_containing(Vec3::new(-1.0e12, 5.0, -3.0e10)), None);
        assert_eq!(world.block_at_cell(IVec3::new(i32::MAX, 8, i32::MIN)), None);
    }

    #[test]
    fn test_block_at_cell_resolves_across_chunks() {
        let world = flat_world(1);
        let (origin, block) = world
            .block_at_cell(IVec3::new(-1, 8, 17))
            .expect("loaded cell");
        assert_eq!(origin, ChunkOrigin::new(-16, 16));
        assert_eq!(block.local(), crate::LocalPos::new(15, 8, 1));
        assert_eq!(block.centre(), Vec3::new(-1.0, 8.0, 17.0));
    }

    #[test]
    fn test_update_current_chunk_reports_changes() {
        let mut world = flat_world(1);
        assert!(world.update_current_chunk(Vec3::new(1.0, 12.0, 1.0)));
        assert_eq!(world.current_origin(), Some(ChunkOrigin::new(0, 0)));
        assert_eq!(world.current_neighbors().len(), 8);

        assert!(!world.update_current_chunk(Vec3::new(2.0, 12.0, 3.0)));

        assert!(world.update_current_chunk(Vec3::new(20.0, 12.0, 20.0)));
        assert_eq!(world.current_origin(), Some(ChunkOrigin::new(16, 16)));
        assert_eq!(world.current_neighbors().len(), 3);

        assert!(world.update_current_chunk(Vec3::new(100.0, 12.0, 0.0)));
        assert!(world.current_chunk().is_none());
        assert!(world.current_neighbors().is_empty());
    }

    #[test]
    fn test_take_dirty_chunks_clears_flags() {
        let mut world = flat_world(1);
        assert_eq!(world.dirty_chunks().len(), 9);
        let taken = world.take_dirty_chunks();
        assert_eq!(taken.len(), 9);
        assert!(world.dirty_chunks().is_empty());
        assert!(taken.windows(2).all(|w| w[0] < w[1]));
    }
}
