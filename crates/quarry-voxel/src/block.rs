//! Block materials and the per-block face state.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use thiserror::Error;

use crate::coords::LocalPos;
use crate::face::Face;
use crate::visible_faces::VisibleFaces;

/// Faces farther than this from the query point are never selected.
pub const NEAREST_FACE_CUTOFF: f32 = 20.0;

/// Material of a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum BlockType {
    /// Empty space. Never rendered, never blocks a neighbour's face.
    #[default]
    Air,
    Grass,
    Dirt,
    Stone,
    /// Backdrop material; treated as solid by the visibility rules.
    Sky,
}

impl BlockType {
    /// Every material, `Air` first.
    pub const ALL: [BlockType; 5] = [
        Self::Air,
        Self::Grass,
        Self::Dirt,
        Self::Stone,
        Self::Sky,
    ];

    /// Returns `true` for [`BlockType::Air`].
    pub fn is_air(self) -> bool {
        self == Self::Air
    }

    /// Returns `true` for anything other than air.
    pub fn is_solid(self) -> bool {
        !self.is_air()
    }

    /// Lower-case name, as used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Air => "air",
            Self::Grass => "grass",
            Self::Dirt => "dirt",
            Self::Stone => "stone",
            Self::Sky => "sky",
        }
    }

    /// Display colour in 8-bit sRGB.
    pub fn colour(self) -> [u8; 3] {
        match self {
            Self::Air | Self::Sky => [135, 206, 235],
            Self::Grass => [82, 105, 53],
            Self::Dirt => [146, 108, 77],
            Self::Stone => [169, 163, 163],
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A material name that matches no [`BlockType`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown block type '{0}'")]
pub struct UnknownBlockType(pub String);

impl FromStr for BlockType {
    type Err = UnknownBlockType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.name() == lower)
            .ok_or_else(|| UnknownBlockType(s.to_string()))
    }
}

/// One voxel: its place in the chunk, its material, and which faces show.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    local: LocalPos,
    centre: Vec3,
    block_type: BlockType,
    faces: VisibleFaces,
}

impl Block {
    /// Creates a block with every face hidden.
    pub fn new(local: LocalPos, centre: Vec3, block_type: BlockType) -> Self {
        Self {
            local,
            centre,
            block_type,
            faces: VisibleFaces::NONE,
        }
    }

    /// Position inside the owning chunk.
    pub fn local(&self) -> LocalPos {
        self.local
    }

    /// World-space centre of the block's unit cube.
    pub fn centre(&self) -> Vec3 {
        self.centre
    }

    pub fn block_type(&self) -> BlockType {
        self.block_type
    }

    pub fn is_air(&self) -> bool {
        self.block_type.is_air()
    }

    /// Current face-visibility flags.
    pub fn faces(&self) -> VisibleFaces {
        self.faces
    }

    /// Returns `true` if the given face is currently visible.
    pub fn is_face_visible(&self, face: Face) -> bool {
        self.faces.is_visible(face)
    }

    /// Returns `true` if at least one face is visible, i.e. the block belongs
    /// in its chunk's render set.
    pub fn has_visible_face(&self) -> bool {
        self.faces.any()
    }

    /// World-space centre of one face.
    pub fn face_centre(&self, face: Face) -> Vec3 {
        self.centre + face.normal() * 0.5
    }

    /// Face whose centre is closest to `point`, or `None` when even the
    /// closest lies beyond [`NEAREST_FACE_CUTOFF`].
    ///
    /// Ties resolve to the lowest face index.
    pub fn nearest_face(&self, point: Vec3) -> Option<Face> {
        let mut best: Option<(Face, f32)> = None;
        for face in Face::ALL {
            let d = self.face_centre(face).distance(point);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((face, d));
            }
        }
        best.filter(|(_, d)| *d <= NEAREST_FACE_CUTOFF)
            .map(|(face, _)| face)
    }

    /// Strict interior test against the block's unit cube.
    pub fn contains_point(&self, point: Vec3) -> bool {
        let d = (point - self.centre).abs();
        d.x < 0.5 && d.y < 0.5 && d.z < 0.5
    }

    pub(crate) fn set_block_type(&mut self, block_type: BlockType) {
        self.block_type = block_type;
    }

    /// Replaces the face flags, returning whether render-set membership
    /// changed as a result.
    pub(crate) fn set_faces(&mut self, faces: VisibleFaces) -> bool {
        let was_visible = self.faces.any();
        self.faces = faces;
        was_visible != faces.any()
    }
}
