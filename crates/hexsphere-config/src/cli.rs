//! Command-line argument parsing for hexsphere.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// hexsphere command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "hexsphere", about = "Hexagonal tile sphere builder and pathfinder")]
pub struct CliArgs {
    /// Subdivision depth of the icosahedron (0-5).
    #[arg(long)]
    pub detail_level: Option<u8>,

    /// Uniform planet scale.
    #[arg(long)]
    pub scale: Option<f32>,

    /// Point tile normals toward the sphere center.
    #[arg(long)]
    pub invert: Option<bool>,

    /// Multiply each search step by the destination tile's weight.
    #[arg(long)]
    pub weighted_paths: Option<bool>,

    /// Number of background search threads.
    #[arg(long)]
    pub workers: Option<usize>,

    /// Seed for the demo's wall placement and queries.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Fraction of tiles the demo marks as walls.
    #[arg(long)]
    pub wall_fraction: Option<f32>,

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
        if let Some(level) = args.detail_level {
            self.sphere.detail_level = level;
        }
        if let Some(scale) = args.scale {
            self.sphere.planet_scale = scale;
        }
        if let Some(invert) = args.invert {
            self.sphere.invert = invert;
        }
        if let Some(weighted) = args.weighted_paths {
            self.nav.edge_cost = if weighted {
                crate::EdgeCostModel::DestinationWeighted
            } else {
                crate::EdgeCostModel::Angular
            };
        }
        if let Some(workers) = args.workers {
            self.nav.worker_threads = workers;
        }
        if let Some(seed) = args.seed {
            self.demo.seed = seed;
        }
        if let Some(fraction) = args.wall_fraction {
            self.demo.wall_fraction = fraction;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
