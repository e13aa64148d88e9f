//! Chunked block world: terrain columns, face visibility with a synchronized
//! render set, block edits, and per-face render export.

pub mod block;
pub mod chunk;
pub mod coords;
pub mod editing;
pub mod face;
pub mod generation;
pub mod mesh;
pub mod visibility;
pub mod visible_faces;
pub mod world;

pub use block::{Block, BlockType, NEAREST_FACE_CUTOFF, UnknownBlockType};
pub use chunk::{Chunk, ChunkLinks};
pub use coords::{ChunkDims, ChunkOrigin, CoordError, LocalPos, check_finite, world_point};
pub use editing::{BlockEdit, EditError, FixedPlacement, PlacementPolicy, RandomPlacement};
pub use face::{CornerDirection, EdgeDirection, Face};
pub use generation::{ConstantField, FnField, NoiseField, column_block, surface_height};
pub use mesh::FaceQuad;
pub use visibility::Adjacent;
pub use visible_faces::VisibleFaces;
pub use world::{SetupReport, World};
