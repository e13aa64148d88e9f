//! Per-face quads for the renderer, pulled from a chunk's render set.

use glam::Vec3;

use crate::block::BlockType;
use crate::chunk::Chunk;
use crate::face::Face;

/// One visible block face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceQuad {
    /// World-space centre of the face.
    pub position: Vec3,
    /// World-space corners, counter-clockwise seen from outside.
    pub corners: [Vec3; 4],
    pub material: BlockType,
    pub face: Face,
    /// Outward unit normal.
    pub normal: Vec3,
}

impl FaceQuad {
    /// Triangle indices into [`corners`](Self::corners).
    pub const INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];
}

impl Chunk {
    /// Every visible face of every render-set block, in render-set order and
    /// face-index order within a block.
    pub fn face_quads(&self) -> Vec<FaceQuad> {
        let mut quads = Vec::new();
        for block in self.render_set() {
            let centre = block.centre();
            for face in block.faces().iter() {
                quads.push(FaceQuad {
                    position: block.face_centre(face),
                    corners: face.corner_offsets().map(|c| centre + c),
                    material: block.block_type(),
                    face,
                    normal: face.normal(),
                });
            }
        }
        quads
    }

    /// Total number of visible faces, without building the quads.
    pub fn visible_face_count(&self) -> usize {
        self.render_set().map(|b| b.faces().count() as usize).sum()
    }
}

#[cfg(test)]
mod tests {
    use crate::coords::{ChunkDims, ChunkOrigin, LocalPos};
    use crate::face::Face;
    use crate::generation::ConstantField;
    use crate::world::World;

    use super::*;

    fn single_flat_chunk() -> World {
        let mut world = World::new(ChunkDims::cube(4), 200.0, Box::new(ConstantField(0.0)));
        world.setup(0);
        world
    }

    #[test]
    fn test_quad_count_matches_visible_faces() {
        let world = single_flat_chunk();
        let chunk = world.chunk(ChunkOrigin::new(0, 0)).expect("chunk");
        let quads = chunk.face_quads();
        assert_eq!(quads.len(), chunk.visible_face_count());
        // A 4×4×3 slab standing alone shows all six sides.
        assert_eq!(quads.len(), 2 * 16 + 4 * 4 * 3);
    }

    #[test]
    fn test_quads_follow_render_set_order() {
        let world = single_flat_chunk();
        let chunk = world.chunk(ChunkOrigin::new(0, 0)).expect("chunk");
        let quads = chunk.face_quads();
        let first = chunk.render_set().next().expect("non-empty");
        assert_eq!(first.local(), LocalPos::new(0, 0, 0));
        assert_eq!(quads[0].face, Face::Bottom);
        assert_eq!(quads[0].position, first.face_centre(Face::Bottom));
        assert_eq!(quads[0].material, BlockType::Stone);
    }

    #[test]
    fn test_quad_corners_surround_position() {
        let world = single_flat_chunk();
        let chunk = world.chunk(ChunkOrigin::new(0, 0)).expect("chunk");
        for q in chunk.face_quads() {
            let mean = q.corners.iter().copied().sum::<Vec3>() / 4.0;
            assert!(mean.distance(q.position) < 1e-5);
            for c in q.corners {
                assert!(((c - q.position).dot(q.normal)).abs() < 1e-5);
            }
        }
    }
}
