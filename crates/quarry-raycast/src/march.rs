//! Fixed-step ray marching against a candidate set of chunks.

use glam::{IVec3, Vec3};
use quarry_voxel::{BlockType, Chunk, ChunkOrigin, Face, LocalPos, World};
use tracing::trace;

use crate::ray::Ray;

/// First block with a visible face found along a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub chunk: ChunkOrigin,
    pub block: LocalPos,
    /// Face nearest to the sample point that landed in the block.
    pub face: Face,
    pub block_type: BlockType,
    /// World grid cell of the block.
    pub cell: IVec3,
    /// The unrounded sample position.
    pub point: Vec3,
    /// Distance credited when the hit was found.
    pub distance: f32,
}

/// Marches `ray` through `candidates` and returns the first block with a
/// visible face whose cell contains a sample point.
///
/// Samples are rounded to the nearest grid cell per axis; a sample landing
/// in the same cell as the previous one is skipped. A contained cell above
/// or below the chunk's layers ends the cast with no hit.
pub fn raycast(ray: &Ray, candidates: &[&Chunk]) -> Option<RayHit> {
    if candidates.is_empty() {
        return None;
    }
    let step_length = ray.step_length();
    let mut last_cell: Option<IVec3> = None;

    for i in 0..ray.sample_count() {
        let point = ray.sample(i);
        let cell = point.round().as_ivec3();
        if last_cell == Some(cell) {
            continue;
        }
        last_cell = Some(cell);

        let Some(chunk) = candidates.iter().find(|c| c.contains_point(cell.as_vec3())) else {
            continue;
        };
        let Some(local) = chunk.local_for_cell(cell) else {
            trace!("Ray left the world vertically at {}", cell);
            return None;
        };
        let Some(block) = chunk.block(local) else {
            continue;
        };
        if !block.has_visible_face() {
            continue;
        }
        if let Some(face) = block.nearest_face(point) {
            return Some(RayHit {
                chunk: chunk.origin(),
                block: local,
                face,
                block_type: block.block_type(),
                cell,
                point,
                distance: step_length * i as f32,
            });
        }
    }
    None
}

/// [`raycast`] over chunks named by origin. Unknown origins are skipped.
pub fn raycast_world(ray: &Ray, world: &World, candidates: &[ChunkOrigin]) -> Option<RayHit> {
    let chunks: Vec<&Chunk> = candidates.iter().filter_map(|o| world.chunk(*o)).collect();
    raycast(ray, &chunks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_voxel::{ChunkDims, ConstantField};

    fn flat_world(radius: u32) -> World {
        let mut world = World::new(ChunkDims::cube(16), 200.0, Box::new(ConstantField(0.0)));
        world.setup(radius);
        world
    }

    fn all_chunks(world: &World) -> Vec<&Chunk> {
        world.origins().into_iter().filter_map(|o| world.chunk(o)).collect()
    }

    fn ray(origin: Vec3, look: Vec3) -> Ray {
        Ray::new(origin, look, 0.1, 8.0).expect("valid ray")
    }

    #[test]
    fn test_looking_down_hits_grass_top() {
        let world = flat_world(1);
        let chunks = all_chunks(&world);
        let hit = raycast(&ray(Vec3::new(8.2, 12.0, 8.3), Vec3::NEG_Y), &chunks).expect("hit");
        assert_eq!(hit.chunk, ChunkOrigin::new(0, 0));
        assert_eq!(hit.block, LocalPos::new(8, 8, 8));
        assert_eq!(hit.face, Face::Top);
        assert_eq!(hit.block_type, BlockType::Grass);
        assert!(hit.distance > 3.0 && hit.distance < 4.0);
    }

    #[test]
    fn test_hit_in_negative_chunk_wraps_local_index() {
        let world = flat_world(1);
        let chunks = all_chunks(&world);
        let hit = raycast(&ray(Vec3::new(-3.2, 10.0, -14.9), Vec3::NEG_Y), &chunks).expect("hit");
        assert_eq!(hit.chunk, ChunkOrigin::new(-16, -16));
        assert_eq!(hit.cell, IVec3::new(-3, 8, -15));
        assert_eq!(hit.block, LocalPos::new(13, 8, 1));
    }

    #[test]
    fn test_side_hit_reports_entry_face() {
        let world = flat_world(0);
        let chunks = all_chunks(&world);
        let hit = raycast(&ray(Vec3::new(-3.0, 5.0, 8.0), Vec3::X), &chunks).expect("hit");
        assert_eq!(hit.block, LocalPos::new(0, 5, 8));
        assert_eq!(hit.face, Face::Left);
        assert_eq!(hit.block_type, BlockType::Dirt);
    }

    #[test]
    fn test_empty_candidates_miss() {
        assert_eq!(raycast(&ray(Vec3::new(8.0, 12.0, 8.0), Vec3::NEG_Y), &[]), None);
    }

    #[test]
    fn test_vertical_exit_is_a_miss() {
        let world = flat_world(0);
        let chunks = all_chunks(&world);
        assert_eq!(raycast(&ray(Vec3::new(8.0, 12.0, 8.0), Vec3::Y), &chunks), None);
    }

    #[test]
    fn test_max_distance_limits_search() {
        let world = flat_world(1);
        let chunks = all_chunks(&world);
        let short = Ray::new(Vec3::new(8.0, 12.0, 8.0), Vec3::NEG_Y, 0.1, 2.0).expect("valid");
        assert_eq!(raycast(&short, &chunks), None);
    }

    #[test]
    fn test_hidden_blocks_are_passed_through() {
        // Starting inside the slab, every cell until the world edge is hidden.
        let world = flat_world(0);
        let chunks = all_chunks(&world);
        let hit = raycast(&ray(Vec3::new(8.0, 4.0, 8.0), Vec3::X), &chunks).expect("hit");
        assert_eq!(hit.block, LocalPos::new(15, 4, 8));
        // The sample enters the cell through its -X side.
        assert_eq!(hit.face, Face::Left);
    }

    #[test]
    fn test_raycast_is_deterministic() {
        let world = flat_world(1);
        let r = ray(Vec3::new(1.3, 11.0, -2.7), Vec3::new(0.4, -0.8, 0.3).normalize());
        let a = raycast_world(&r, &world, &world.origins());
        let b = raycast_world(&r, &world, &world.origins());
        assert!(a.is_some());
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_origins_are_skipped() {
        let world = flat_world(0);
        let r = ray(Vec3::new(8.0, 12.0, 8.0), Vec3::NEG_Y);
        assert_eq!(raycast_world(&r, &world, &[ChunkOrigin::new(64, 64)]), None);
        assert!(raycast_world(&r, &world, &[ChunkOrigin::new(64, 64), ChunkOrigin::new(0, 0)]).is_some());
    }
}
