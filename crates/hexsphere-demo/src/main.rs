//! Demo binary: builds a hexsphere, walls off random tiles, and routes across it.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p hexsphere-demo` for the defaults, or e.g.
//! `cargo run -p hexsphere-demo -- --detail-level 4 --wall-fraction 0.3`.

mod sphere_demos;

use std::path::PathBuf;

use clap::Parser;
use hexsphere_config::{CliArgs, Config, default_config_dir};
use tracing::{error, info};

fn main() {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args.config.clone().unwrap_or_else(|| {
        default_config_dir().unwrap_or_else(|e| {
            eprintln!("{e}, using the working directory");
            PathBuf::from(".")
        })
    });

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    hexsphere_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));
    info!(config_dir = %config_dir.display(), "hexsphere demo starting");

    sphere_demos::demonstrate_tessellation(config.sphere.detail_level);

    let mut registry = match sphere_demos::build_registry(&config) {
        Ok(registry) => registry,
        Err(e) => {
            error!("Failed to build spheres: {e}");
            std::process::exit(1);
        }
    };

    if let Some(sphere) = registry.get_by_name_mut(sphere_demos::MAIN_SPHERE) {
        sphere_demos::demonstrate_pathfinding(sphere, &config);
    }

    info!(spheres = registry.len(), "hexsphere demo finished");
}
