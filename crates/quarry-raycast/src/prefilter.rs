//! Candidate-chunk prefilter run before each frame's raycast.
//!
//! The ray only ever needs the chunk the camera stands in plus, at most, the
//! one neighbour it is looking toward. The neighbour is picked by a vote over
//! a few short horizontal steps rather than an exact intersection.

use glam::Vec3;
use quarry_voxel::{ChunkOrigin, World};

/// Distances at or beyond this never win a vote.
pub const VOTE_DISTANCE_CAP: f32 = 500.0;

/// Parameters for [`close_chunks`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrefilterParams {
    /// Number of sample points in the vote.
    pub steps: u32,
    /// Scale applied to the horizontal look vector for each step.
    pub step_length: f32,
}

impl Default for PrefilterParams {
    fn default() -> Self {
        Self {
            steps: 10,
            step_length: 0.1,
        }
    }
}

/// Current chunk followed by the neighbour the camera is looking toward.
///
/// Uses the world's cached current chunk, so call
/// [`World::update_current_chunk`] first. Returns an empty list when the
/// camera is outside every chunk.
pub fn close_chunks(
    world: &World,
    position: Vec3,
    look: Vec3,
    params: PrefilterParams,
) -> Vec<ChunkOrigin> {
    let Some(current) = world.current_origin() else {
        return Vec::new();
    };
    let advance = Vec3::new(look.x, 0.0, look.z) * params.step_length;
    let stepped = position + advance;

    // Chunk footprint centres, lifted to the camera's height so distances
    // are horizontal.
    let approaching: Vec<(ChunkOrigin, Vec3)> = world
        .current_neighbors()
        .iter()
        .filter_map(|&o| world.chunk(o))
        .map(|c| {
            let centre = c.bottom_centre();
            (c.origin(), Vec3::new(centre.x, position.y, centre.z))
        })
        .filter(|(_, centre)| stepped.distance(*centre) < position.distance(*centre))
        .collect();

    let mut result = vec![current];
    if approaching.is_empty() {
        return result;
    }

    let mut tally = vec![0u32; approaching.len()];
    let mut point = position;
    for _ in 0..params.steps {
        point += advance;
        let mut best: Option<usize> = None;
        let mut best_distance = VOTE_DISTANCE_CAP;
        for (i, (_, centre)) in approaching.iter().enumerate() {
            let d = point.distance(*centre);
            if d < best_distance {
                best_distance = d;
                best = Some(i);
            }
        }
        if let Some(i) = best {
            tally[i] += 1;
        }
    }

    let mut winner: Option<usize> = None;
    for (i, &votes) in tally.iter().enumerate() {
        if votes > 0 && winner.is_none_or(|w| votes > tally[w]) {
            winner = Some(i);
        }
    }
    if let Some(i) = winner {
        result.push(approaching[i].0);
    }
    result
}
