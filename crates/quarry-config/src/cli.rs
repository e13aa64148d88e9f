//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Quarry command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "quarry", about = "Voxel sandbox core running a headless session")]
pub struct CliArgs {
    /// Terrain seed.
    #[arg(long)]
    pub seed: Option<u32>,

    /// Chunks generated on each side of the origin chunk.
    #[arg(long)]
    pub radius: Option<u32>,

    /// Chunk footprint in blocks.
    #[arg(long)]
    pub chunk_width: Option<usize>,

    /// Vertical layers per chunk.
    #[arg(long)]
    pub chunk_height: Option<usize>,

    /// Number of simulation frames to run.
    #[arg(long)]
    pub frames: Option<u32>,

    /// Reach of the targeting ray.
    #[arg(long)]
    pub max_distance: Option<f32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.world.seed = Some(seed);
        }
        if let Some(r) = args.radius {
            self.world.radius = r;
        }
        if let Some(w) = args.chunk_width {
            self.world.chunk_width = w;
        }
        if let Some(h) = args.chunk_height {
            self.world.chunk_height = h;
        }
        if let Some(frames) = args.frames {
            self.session.frames = frames;
        }
        if let Some(d) = args.max_distance {
            self.raycast.max_distance = d;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            seed: Some(12345),
            chunk_height: Some(24),
            log_level: Some("debug".to_string()),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.world.seed, Some(12345));
        assert_eq!(config.world.chunk_height, 24);
        assert_eq!(config.debug.log_level, "debug");
        // Non-overridden fields retain defaults
        assert_eq!(config.world.chunk_width, 16);
        assert_eq!(config.session.frames, 240);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from([
            "quarry",
            "--radius",
            "2",
            "--frames",
            "10",
            "--max-distance",
            "4.5",
            "--config",
            "/tmp/quarry",
        ]);
        assert_eq!(args.radius, Some(2));
        assert_eq!(args.frames, Some(10));
        assert_eq!(args.max_distance, Some(4.5));
        assert_eq!(args.config, Some(PathBuf::from("/tmp/quarry")));
        assert_eq!(args.seed, None);
    }
}
