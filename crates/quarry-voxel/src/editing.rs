//! Block removal and placement.
//!
//! Both operations validate everything before touching state, so a declined
//! edit leaves the world exactly as it was. A committed edit recomputes the
//! edited block, then its six direct neighbours, then marks the owning chunk
//! and its linked edge neighbours for a mesh rebuild.

use glam::IVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::debug;

use crate::block::{Block, BlockType};
use crate::chunk::Chunk;
use crate::coords::{ChunkOrigin, LocalPos};
use crate::face::Face;
use crate::world::World;

/// Reasons an edit is declined.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("no chunk at {0}")]
    UnknownChunk(ChunkOrigin),
    #[error("block {local} is outside chunk {origin}")]
    OutOfBounds { origin: ChunkOrigin, local: LocalPos },
    #[error("block {0} is air")]
    NotSolid(LocalPos),
    #[error("face {face:?} of block {local} is not visible")]
    FaceHidden { local: LocalPos, face: Face },
    /// Placement only works inside the clicked block's chunk.
    #[error("target {0} lies outside the clicked block's chunk")]
    OutOfChunk(IVec3),
    #[error("target {local} is already {occupant}")]
    Occupied { local: LocalPos, occupant: BlockType },
    #[error("placement policy chose air")]
    AirPlacement,
}

/// What a committed edit changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockEdit {
    pub chunk: ChunkOrigin,
    pub local: LocalPos,
    pub previous: BlockType,
    pub current: BlockType,
    /// Neighbours whose faces were recomputed, edited block excluded.
    pub refreshed: Vec<(ChunkOrigin, LocalPos)>,
    /// Chunks flagged for a mesh rebuild, edited chunk first.
    pub invalidated: Vec<ChunkOrigin>,
}

/// Chooses the material for a newly placed block.
pub trait PlacementPolicy {
    /// Material for a block about to appear at `local` in `chunk`.
    fn choose(&mut self, chunk: ChunkOrigin, local: LocalPos) -> BlockType;
}

/// Always places the same material.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedPlacement(pub BlockType);

impl PlacementPolicy for FixedPlacement {
    fn choose(&mut self, _chunk: ChunkOrigin, _local: LocalPos) -> BlockType {
        self.0
    }
}

/// Uniform pick over the terrain materials from a seeded stream.
#[derive(Clone, Debug)]
pub struct RandomPlacement {
    rng: ChaCha8Rng,
}

impl RandomPlacement {
    /// Materials the policy draws from.
    pub const CHOICES: [BlockType; 3] = [BlockType::Grass, BlockType::Dirt, BlockType::Stone];

    pub fn new(seed: u64) -> Self {
        Self::from_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Draws from an already seeded stream.
    pub fn from_rng(rng: ChaCha8Rng) -> Self {
        Self { rng }
    }
}

impl PlacementPolicy for RandomPlacement {
    fn choose(&mut self, _chunk: ChunkOrigin, _local: LocalPos) -> BlockType {
        Self::CHOICES[self.rng.random_range(0..Self::CHOICES.len())]
    }
}

impl World {
    /// Turns a solid block into air.
    pub fn remove_block(
        &mut self,
        origin: ChunkOrigin,
        local: LocalPos,
    ) -> Result<BlockEdit, EditError> {
        let result = self
            .solid_block(origin, local)
            .map(|(_, block)| block.block_type())
            .map(|previous| self.commit_edit(origin, local, previous, BlockType::Air));
        if let Err(e) = &result {
            debug!("Remove declined at {} {}: {}", origin, local, e);
        }
        result
    }

    /// Places a block against `face` of the solid block at `local`.
    ///
    /// The face must currently be visible, the target must lie in the same
    /// chunk, and it must be air.
    pub fn add_block(
        &mut self,
        origin: ChunkOrigin,
        local: LocalPos,
        face: Face,
        policy: &mut dyn PlacementPolicy,
    ) -> Result<BlockEdit, EditError> {
        let result = self.placement_target(origin, local, face).and_then(|target| {
            let material = policy.choose(origin, target);
            if material.is_air() {
                return Err(EditError::AirPlacement);
            }
            Ok(self.commit_edit(origin, target, BlockType::Air, material))
        });
        if let Err(e) = &result {
            debug!("Add declined at {} {} {:?}: {}", origin, local, face, e);
        }
        result
    }

    /// The loaded, non-air block at `local`, with the chunk holding it.
    fn solid_block(
        &self,
        origin: ChunkOrigin,
        local: LocalPos,
    ) -> Result<(&Chunk, &Block), EditError> {
        let chunk = self.chunk(origin).ok_or(EditError::UnknownChunk(origin))?;
        let block = chunk
            .block(local)
            .ok_or(EditError::OutOfBounds { origin, local })?;
        if block.is_air() {
            return Err(EditError::NotSolid(local));
        }
        Ok((chunk, block))
    }

    fn placement_target(
        &self,
        origin: ChunkOrigin,
        local: LocalPos,
        face: Face,
    ) -> Result<LocalPos, EditError> {
        let (chunk, clicked) = self.solid_block(origin, local)?;
        if !clicked.is_face_visible(face) {
            return Err(EditError::FaceHidden { local, face });
        }

        let p = local.as_ivec3() + face.offset();
        let target = chunk.block_at(p).ok_or(EditError::OutOfChunk(p))?;
        if !target.is_air() {
            return Err(EditError::Occupied {
                local: target.local(),
                occupant: target.block_type(),
            });
        }
        Ok(target.local())
    }

    fn commit_edit(
        &mut self,
        origin: ChunkOrigin,
        local: LocalPos,
        previous: BlockType,
        current: BlockType,
    ) -> BlockEdit {
        if let Some(chunk) = self.chunk_mut(origin) {
            chunk.set_block_type(local, current);
        }
        self.update_block_surfaces(origin, local);
        let refreshed = self.update_surfaces_around(origin, local);

        let mut invalidated = vec![origin];
        if let Some(chunk) = self.chunk(origin) {
            invalidated.extend(chunk.edge_neighbors());
        }
        for o in &invalidated {
            if let Some(chunk) = self.chunk_mut(*o) {
                chunk.mark_mesh_dirty();
            }
        }

        debug!("{} -> {} at {} {}", previous, current, origin, local);
        BlockEdit {
            chunk: origin,
            local,
            previous,
            current,
            refreshed,
            invalidated,
        }
    }
}
