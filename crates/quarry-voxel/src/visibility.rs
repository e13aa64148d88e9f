//! Face-visibility computation and its radius-1 propagation.
//!
//! A face is visible when the block across it is air, or when nothing is
//! across it (vertical overflow or an unlinked horizontal neighbour). Air
//! blocks show no faces. Every write goes through `Chunk::apply_faces`, which
//! keeps the render set in step.

use crate::block::Block;
use crate::coords::{ChunkOrigin, LocalPos};
use crate::face::{EdgeDirection, Face};
use crate::visible_faces::VisibleFaces;
use crate::world::World;

/// What lies across one face of a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Adjacent {
    /// A block, possibly in a linked neighbour chunk.
    Block(ChunkOrigin, LocalPos),
    /// Nothing: above/below the chunk, or past an unlinked edge.
    WorldEdge,
}

impl World {
    /// Resolves the block across `face` of the block at `local` in `origin`.
    ///
    /// Horizontal overflow wraps into the linked neighbour chunk; vertical
    /// overflow is never resolved.
    pub fn adjacent(&self, origin: ChunkOrigin, local: LocalPos, face: Face) -> Adjacent {
        let dims = self.dims();
        let p = local.as_ivec3() + face.offset();
        if dims.contains(p) {
            return Adjacent::Block(origin, LocalPos::new(p.x as usize, p.y as usize, p.z as usize));
        }
        if p.y < 0 || p.y >= dims.height as i32 {
            return Adjacent::WorldEdge;
        }
        let Some(dir) = EdgeDirection::from_overflow(p, dims.width) else {
            return Adjacent::WorldEdge;
        };
        let Some(neighbor) = self
            .chunk(origin)
            .and_then(|c| c.edge(dir))
            .filter(|n| self.chunk(*n).is_some())
        else {
            return Adjacent::WorldEdge;
        };
        let w = dims.width as i32;
        Adjacent::Block(
            neighbor,
            LocalPos::new(p.x.rem_euclid(w) as usize, p.y as usize, p.z.rem_euclid(w) as usize),
        )
    }

    /// Computes the face flags the block at `local` should have right now.
    ///
    /// Returns `None` if the chunk or position does not exist.
    pub fn compute_faces(&self, origin: ChunkOrigin, local: LocalPos) -> Option<VisibleFaces> {
        let block = self.chunk(origin)?.block(local)?;
        if block.is_air() {
            return Some(VisibleFaces::NONE);
        }
        let mut faces = VisibleFaces::NONE;
        for face in Face::ALL {
            let visible = match self.adjacent(origin, local, face) {
                Adjacent::WorldEdge => true,
                Adjacent::Block(o, l) => self
                    .chunk(o)
                    .and_then(|c| c.block(l))
                    .is_none_or(|b| b.is_air()),
            };
            faces.set(face, visible);
        }
        Some(faces)
    }

    /// Recomputes one block's faces and render-set membership.
    ///
    /// Returns `true` if its flags changed.
    pub fn update_block_surfaces(&mut self, origin: ChunkOrigin, local: LocalPos) -> bool {
        let Some(faces) = self.compute_faces(origin, local) else {
            return false;
        };
        self.chunk_mut(origin)
            .is_some_and(|c| c.apply_faces(local, faces))
    }

    /// Recomputes the blocks directly across each of the six faces of
    /// `local`. Does not recurse.
    ///
    /// Returns the positions that were recomputed.
    pub fn update_surfaces_around(
        &mut self,
        origin: ChunkOrigin,
        local: LocalPos,
    ) -> Vec<(ChunkOrigin, LocalPos)> {
        let mut touched = Vec::with_capacity(6);
        for face in Face::ALL {
            if let Adjacent::Block(o, l) = self.adjacent(origin, local, face) {
                self.update_block_surfaces(o, l);
                touched.push((o, l));
            }
        }
        touched
    }

    /// Full visibility pass over every block of every chunk.
    ///
    /// Only needed after generation or relinking; edits use the radius-1
    /// update instead.
    pub fn update_all_surfaces(&mut self) {
        for origin in self.origins() {
            let Some(chunk) = self.chunk(origin) else {
                continue;
            };
            let computed: Vec<(LocalPos, VisibleFaces)> = chunk
                .blocks()
                .map(Block::local)
                .filter_map(|l| self.compute_faces(origin, l).map(|f| (l, f)))
                .collect();
            if let Some(chunk) = self.chunk_mut(origin) {
                for (local, faces) in computed {
                    chunk.apply_faces(local, faces);
                }
            }
        }
    }

    /// Returns `true` if every block's stored flags and render-set
    /// membership match a fresh computation.
    pub fn surfaces_consistent(&self) -> bool {
        self.chunks().all(|chunk| {
            chunk.blocks().all(|b| {
                let fresh = self.compute_faces(chunk.origin(), b.local());
                fresh == Some(b.faces()) && chunk.in_render_set(b.local()) == b.has_visible_face()
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockType;
    use crate::chunk::Chunk;
    use crate::coords::ChunkDims;
    use crate::generation::{ConstantField, FnField};

    fn flat_world(radius: u32) -> World {
        let mut world = World::new(ChunkDims::cube(16), 200.0, Box::new(ConstantField(0.0)));
        world.setup(radius);
        world
    }

    /// Two chunks side by side along X; every column is 9 blocks tall.
    fn pair_world() -> World {
        let dims = ChunkDims::cube(16);
        let mut world = World::new(dims, 200.0, Box::new(ConstantField(0.0)));
        world.insert_chunk(Chunk::new(ChunkOrigin::new(0, 0), dims));
        world.insert_chunk(Chunk::new(ChunkOrigin::new(16, 0), dims));
        world.generate_blocks();
        world.link_chunks();
        world.update_all_surfaces();
        world
    }

    fn set(world: &mut World, origin: ChunkOrigin, local: LocalPos, t: BlockType) {
        world
            .chunk_mut(origin)
            .map(|c| c.set_block_type(local, t))
            .expect("chunk exists");
        world.update_block_surfaces(origin, local);
        world.update_surfaces_around(origin, local);
    }

    fn faces(world: &World, origin: ChunkOrigin, local: LocalPos) -> VisibleFaces {
        world
            .chunk(origin)
            .and_then(|c| c.block(local))
            .map(|b| b.faces())
            .expect("block exists")
    }

    #[test]
    fn test_visibility_invariant_after_setup() {
        let world = flat_world(1);
        assert!(world.surfaces_consistent());
    }

    #[test]
    fn test_visibility_invariant_on_rough_terrain() {
        let noise = FnField(|x: f64, z: f64| ((x * 37.0).sin() * (z * 23.0).cos()).clamp(-1.0, 1.0));
        let mut world = World::new(ChunkDims::new(8, 12), 1.0, Box::new(noise));
        world.setup(1);
        assert!(world.surfaces_consistent());
        for chunk in world.chunks() {
            for b in chunk.blocks() {
                if b.is_air() {
                    assert_eq!(b.faces(), VisibleFaces::NONE);
                }
            }
        }
    }

    #[test]
    fn test_flat_interior_block_is_hidden() {
        let world = flat_world(1);
        let centre = ChunkOrigin::new(0, 0);
        let f = faces(&world, centre, LocalPos::new(5, 4, 5));
        assert_eq!(f, VisibleFaces::NONE);
        assert!(!world.chunk(centre).is_some_and(|c| c.in_render_set(LocalPos::new(5, 4, 5))));

        let top = faces(&world, centre, LocalPos::new(5, 8, 5));
        assert_eq!(top.iter().collect::<Vec<_>>(), vec![Face::Top]);
    }

    #[test]
    fn test_linked_chunk_edges_hide_faces() {
        let world = flat_world(1);
        // x = 15 in the centre chunk borders the +X chunk, which is solid.
        let f = faces(&world, ChunkOrigin::new(0, 0), LocalPos::new(15, 4, 7));
        assert!(!f.is_visible(Face::Right));
        // x = 15 in the +X chunk is the world edge.
        let f = faces(&world, ChunkOrigin::new(16, 0), LocalPos::new(15, 4, 7));
        assert!(f.is_visible(Face::Right));
    }

    #[test]
    fn test_vertical_overflow_is_world_edge() {
        let world = flat_world(0);
        let origin = ChunkOrigin::new(0, 0);
        assert_eq!(world.adjacent(origin, LocalPos::new(3, 0, 3), Face::Bottom), Adjacent::WorldEdge);
        assert_eq!(world.adjacent(origin, LocalPos::new(3, 15, 3), Face::Top), Adjacent::WorldEdge);
        assert!(faces(&world, origin, LocalPos::new(3, 0, 3)).is_visible(Face::Bottom));
    }

    #[test]
    fn test_adjacent_wraps_into_neighbor() {
        let world = pair_world();
        assert_eq!(
            world.adjacent(ChunkOrigin::new(0, 0), LocalPos::new(15, 5, 0), Face::Right),
            Adjacent::Block(ChunkOrigin::new(16, 0), LocalPos::new(0, 5, 0))
        );
        assert_eq!(
            world.adjacent(ChunkOrigin::new(16, 0), LocalPos::new(0, 5, 0), Face::Left),
            Adjacent::Block(ChunkOrigin::new(0, 0), LocalPos::new(15, 5, 0))
        );
        assert_eq!(
            world.adjacent(ChunkOrigin::new(0, 0), LocalPos::new(4, 5, 0), Face::Front),
            Adjacent::WorldEdge
        );
    }

    #[test]
    fn test_cross_chunk_face_exposure() {
        let mut world = pair_world();
        let a = ChunkOrigin::new(0, 0);
        let b = ChunkOrigin::new(16, 0);
        let a_block = LocalPos::new(15, 5, 0);
        let b_block = LocalPos::new(0, 5, 0);

        assert!(!faces(&world, a, a_block).is_visible(Face::Right));

        set(&mut world, b, b_block, BlockType::Air);
        assert!(faces(&world, a, a_block).is_visible(Face::Right));
        assert!(world.chunk(a).is_some_and(|c| c.in_render_set(a_block)));
        assert!(world.surfaces_consistent());
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut world = flat_world(1);
        let before: Vec<_> = world
            .origins()
            .into_iter()
            .map(|o| world.chunk(o).map(|c| c.render_set().map(|b| b.local()).collect::<Vec<_>>()))
            .collect();

        world.update_all_surfaces();
        for o in world.origins() {
            for local in [LocalPos::new(0, 8, 0), LocalPos::new(7, 3, 7)] {
                assert!(!world.update_block_surfaces(o, local));
            }
        }

        let after: Vec<_> = world
            .origins()
            .into_iter()
            .map(|o| world.chunk(o).map(|c| c.render_set().map(|b| b.local()).collect::<Vec<_>>()))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_update_around_touches_only_direct_neighbours() {
        let mut world = flat_world(0);
        let origin = ChunkOrigin::new(0, 0);
        let touched = world.update_surfaces_around(origin, LocalPos::new(5, 0, 5));
        // Bottom is vertical overflow, so only five neighbours exist.
        assert_eq!(touched.len(), 5);
        assert!(!touched.contains(&(origin, LocalPos::new(5, 2, 5))));
    }

    #[test]
    fn test_unknown_block_has_no_faces_to_compute() {
        let world = flat_world(0);
        assert_eq!(world.compute_faces(ChunkOrigin::new(64, 0), LocalPos::new(0, 0, 0)), None);
        assert_eq!(world.compute_faces(ChunkOrigin::new(0, 0), LocalPos::new(0, 16, 0)), None);
    }
}
