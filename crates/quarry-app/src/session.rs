//! The per-frame pipeline: clicks, camera chunk, prefilter, raycast,
//! highlight, mesh re-pull.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use glam::Vec3;
use quarry_config::Config;
use quarry_input::{ClickGate, EditRequests, FrameInput};
use quarry_raycast::{PrefilterParams, Ray, RayError, RayHit, close_chunks, raycast_world};
use quarry_voxel::{ChunkOrigin, EditError, FaceQuad, PlacementPolicy, World};
use tracing::{debug, info, warn};

use crate::camera::Camera;

/// Ray, prefilter and click settings for a session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionSettings {
    pub step_length: f32,
    pub max_distance: f32,
    pub prefilter: PrefilterParams,
    pub click_interval: Duration,
}

impl SessionSettings {
    /// Reads the raycast and input sections, rejecting ray parameters that
    /// could never build a [`Ray`] from a unit look vector.
    pub fn from_config(config: &Config) -> Result<Self, RayError> {
        let settings = Self {
            step_length: config.raycast.step_length,
            max_distance: config.raycast.max_distance,
            prefilter: PrefilterParams {
                steps: config.raycast.prefilter_steps,
                step_length: config.raycast.prefilter_step_length,
            },
            click_interval: Duration::from_millis(config.input.click_debounce_ms),
        };
        Ray::new(Vec3::ZERO, Vec3::X, settings.step_length, settings.max_distance)?;
        Ok(settings)
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            step_length: 0.1,
            max_distance: 8.0,
            prefilter: PrefilterParams::default(),
            click_interval: quarry_input::DEFAULT_CLICK_INTERVAL,
        }
    }
}

/// Render-side copy of one chunk's faces.
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkMesh {
    /// Chunk version the quads were pulled at.
    pub version: u64,
    pub quads: Vec<FaceQuad>,
}

/// Running totals for the session log.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub frames: u64,
    /// Frames that ended with a highlighted block.
    pub hits: u64,
    pub removed: u64,
    pub added: u64,
    pub declined: u64,
    pub mesh_pulls: u64,
}

/// Owns the world and everything that acts on it each frame.
pub struct PlaySession {
    world: World,
    camera: Camera,
    gate: ClickGate,
    placement: Box<dyn PlacementPolicy>,
    settings: SessionSettings,
    highlight: Option<RayHit>,
    meshes: BTreeMap<ChunkOrigin, ChunkMesh>,
    stats: SessionStats,
    epoch: Instant,
}

impl PlaySession {
    pub fn new(
        world: World,
        camera: Camera,
        placement: Box<dyn PlacementPolicy>,
        settings: SessionSettings,
    ) -> Self {
        Self {
            world,
            camera,
            gate: ClickGate::new(settings.click_interval),
            placement,
            settings,
            highlight: None,
            meshes: BTreeMap::new(),
            stats: SessionStats::default(),
            epoch: Instant::now(),
        }
    }

    /// Runs one simulation step at `sim_time` seconds into the session.
    ///
    /// Clicks act on the block highlighted by the previous step; the new
    /// highlight is computed after any edit, so it already reflects it.
    pub fn step(&mut self, input: &FrameInput, sim_time: f64) {
        self.camera.turn(input.look_delta);

        let now = self.epoch + Duration::try_from_secs_f64(sim_time).unwrap_or_default();
        let requests = self.gate.filter(input, now);
        if requests.any() {
            self.apply_clicks(requests);
        }

        self.retarget();
        self.pull_meshes();
        self.stats.frames += 1;
    }

    fn apply_clicks(&mut self, requests: EditRequests) {
        let Some(target) = self.highlight else {
            debug!("Click with nothing highlighted");
            return;
        };
        if requests.remove {
            match self.world.remove_block(target.chunk, target.block) {
                Ok(edit) => {
                    self.stats.removed += 1;
                    debug!(
                        "Removed {} at {} {}, {} chunk(s) invalidated",
                        edit.previous,
                        edit.chunk,
                        edit.local,
                        edit.invalidated.len()
                    );
                }
                Err(e) => self.declined(e),
            }
        }
        // A remove in the same frame may have taken the target away; the add
        // is then declined rather than placed against a stale face.
        if requests.add {
            match self.world.add_block(
                target.chunk,
                target.block,
                target.face,
                self.placement.as_mut(),
            ) {
                Ok(edit) => {
                    self.stats.added += 1;
                    debug!("Placed {} at {} {}", edit.current, edit.chunk, edit.local);
                }
                Err(e) => self.declined(e),
            }
        }
    }

    fn declined(&mut self, error: EditError) {
        self.stats.declined += 1;
        debug!("Edit declined: {}", error);
    }

    fn retarget(&mut self) {
        let position = self.camera.position;
        let look = self.camera.look();
        self.world.update_current_chunk(position);
        let candidates = close_chunks(&self.world, position, look, self.settings.prefilter);

        self.highlight = match Ray::new(
            position,
            look,
            self.settings.step_length,
            self.settings.max_distance,
        ) {
            Ok(ray) => raycast_world(&ray, &self.world, &candidates),
            Err(e) => {
                warn!("Skipping raycast: {}", e);
                None
            }
        };
        if self.highlight.is_some() {
            self.stats.hits += 1;
        }
    }

    /// Re-pulls the faces of every chunk edited since the last frame.
    fn pull_meshes(&mut self) {
        for origin in self.world.take_dirty_chunks() {
            let Some(chunk) = self.world.chunk(origin) else {
                continue;
            };
            self.meshes.insert(
                origin,
                ChunkMesh {
                    version: chunk.version(),
                    quads: chunk.face_quads(),
                },
            );
            self.stats.mesh_pulls += 1;
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Block the camera is pointing at, as of the last step.
    pub fn highlight(&self) -> Option<&RayHit> {
        self.highlight.as_ref()
    }

    pub fn mesh(&self, origin: ChunkOrigin) -> Option<&ChunkMesh> {
        self.meshes.get(&origin)
    }

    pub fn meshes(&self) -> &BTreeMap<ChunkOrigin, ChunkMesh> {
        &self.meshes
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn log_summary(&self) {
        let s = self.stats;
        let quads: usize = self.meshes.values().map(|m| m.quads.len()).sum();
        info!(
            "Session done: {} frames, {} with a target, {} removed, {} added, {} declined, {} mesh pulls, {} quads",
            s.frames, s.hits, s.removed, s.added, s.declined, s.mesh_pulls, quads
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_voxel::{BlockType, ChunkDims, ConstantField, Face, FixedPlacement, LocalPos};

    use crate::game_loop::FIXED_DT;

    const ORIGIN: ChunkOrigin = ChunkOrigin { x: 0, z: 0 };

    /// Flat 3x3 world with the grass layer at y = 8 and the camera above
    /// block (8, 8, 8) looking almost straight down.
    fn session() -> PlaySession {
        let mut world = World::new(ChunkDims::cube(16), 200.0, Box::new(ConstantField(0.0)));
        world.setup(1);
        let camera = Camera::new(Vec3::new(8.2, 12.0, 8.3), 0.0, -90.0);
        PlaySession::new(
            world,
            camera,
            Box::new(FixedPlacement(BlockType::Stone)),
            SessionSettings::default(),
        )
    }

    fn idle() -> FrameInput {
        FrameInput::default()
    }

    fn block_type(session: &PlaySession, local: LocalPos) -> Option<BlockType> {
        session
            .world()
            .chunk(ORIGIN)
            .and_then(|c| c.block(local))
            .map(|b| b.block_type())
    }

    #[test]
    fn test_first_step_highlights_and_pulls_every_mesh() {
        let mut s = session();
        s.step(&idle(), 0.0);

        let hit = s.highlight().expect("looking at the ground");
        assert_eq!(hit.chunk, ORIGIN);
        assert_eq!(hit.block, LocalPos::new(8, 8, 8));
        assert_eq!(hit.face, Face::Top);
        assert_eq!(s.meshes().len(), 9);
        assert_eq!(s.stats().mesh_pulls, 9);
        assert_eq!(s.world().current_origin(), Some(ORIGIN));
    }

    #[test]
    fn test_remove_click_digs_and_retargets() {
        let mut s = session();
        s.step(&idle(), 0.0);
        let before = s.mesh(ORIGIN).map(|m| m.version);

        s.step(&FrameInput::clicks(true, false), FIXED_DT);

        assert_eq!(block_type(&s, LocalPos::new(8, 8, 8)), Some(BlockType::Air));
        let hit = s.highlight().expect("dirt below is exposed");
        assert_eq!(hit.block, LocalPos::new(8, 7, 8));
        assert_eq!(hit.face, Face::Top);
        assert!(s.mesh(ORIGIN).map(|m| m.version) > before);
        // Edited chunk plus its four edge neighbours.
        assert_eq!(s.stats().mesh_pulls, 9 + 5);
    }

    #[test]
    fn test_add_click_places_on_highlighted_face() {
        let mut s = session();
        s.step(&idle(), 0.0);
        s.step(&FrameInput::clicks(false, true), FIXED_DT);

        assert_eq!(block_type(&s, LocalPos::new(8, 9, 8)), Some(BlockType::Stone));
        assert_eq!(s.highlight().map(|h| h.block), Some(LocalPos::new(8, 9, 8)));
        assert_eq!(s.stats().added, 1);
    }

    #[test]
    fn test_held_click_is_debounced() {
        let mut s = session();
        s.step(&idle(), 0.0);
        let held = FrameInput::clicks(true, false);
        s.step(&held, FIXED_DT);
        s.step(&held, 2.0 * FIXED_DT);
        assert_eq!(block_type(&s, LocalPos::new(8, 7, 8)), Some(BlockType::Dirt));

        s.step(&held, 8.0 * FIXED_DT);
        assert_eq!(block_type(&s, LocalPos::new(8, 7, 8)), Some(BlockType::Air));
        assert_eq!(s.stats().removed, 2);
    }

    #[test]
    fn test_click_without_highlight_does_nothing() {
        let mut s = session();
        s.step(&FrameInput::clicks(true, true), 0.0);
        assert_eq!(s.stats().removed + s.stats().added + s.stats().declined, 0);
        assert_eq!(block_type(&s, LocalPos::new(8, 8, 8)), Some(BlockType::Grass));
    }

    #[test]
    fn test_camera_outside_world_has_no_target() {
        let mut world = World::new(ChunkDims::cube(16), 200.0, Box::new(ConstantField(0.0)));
        world.setup(1);
        let camera = Camera::new(Vec3::new(400.0, 12.0, 8.0), 0.0, -45.0);
        let mut s = PlaySession::new(
            world,
            camera,
            Box::new(FixedPlacement(BlockType::Dirt)),
            SessionSettings::default(),
        );
        s.step(&idle(), 0.0);
        assert!(s.highlight().is_none());
        assert_eq!(s.world().current_origin(), None);
        assert_eq!(s.stats().hits, 0);
    }

    #[test]
    fn test_settings_from_default_config() {
        let settings = SessionSettings::from_config(&Config::default()).unwrap();
        assert_eq!(settings, SessionSettings::default());
    }

    #[test]
    fn test_edits_keep_surfaces_consistent() {
        let mut s = session();
        s.step(&idle(), 0.0);
        let mut t = 0.0;
        for i in 0..6 {
            t += 0.2;
            let input = FrameInput::clicks(i % 3 != 2, i % 3 == 2);
            s.step(&input, t);
        }
        assert!(s.world().surfaces_consistent());
        assert!(s.stats().removed > 0);
    }
}
