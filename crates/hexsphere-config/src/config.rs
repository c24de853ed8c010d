//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level hexsphere configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Sphere construction settings.
    pub sphere: SphereConfig,
    /// Pathfinding settings.
    pub nav: NavConfig,
    /// Settings for the demo binary.
    pub demo: DemoConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Collision representation generated for each tile.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum TileColliderType {
    /// A copy of the tile mesh, refreshed when the tile is extruded.
    #[default]
    Mesh,
    /// A bounding sphere around the tile polygon.
    Sphere,
    /// An axis-aligned box around the tile polygon.
    Box,
}

/// How a single step between two adjacent tiles is priced by the pathfinder.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum EdgeCostModel {
    /// Great-circle angle between the two tile centers. Tile weights are ignored.
    #[default]
    Angular,
    /// Great-circle angle multiplied by the destination tile's path-cost weight.
    DestinationWeighted,
}

/// Sphere construction configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SphereConfig {
    /// Icosahedron subdivision depth (0..=5).
    pub detail_level: u8,
    /// Uniform scale applied to the unit sphere.
    pub planet_scale: f32,
    /// Point tile normals toward the sphere center instead of away from it.
    pub invert: bool,
    /// Generate a collider for each tile.
    pub generate_colliders: bool,
    /// Collider shape used when `generate_colliders` is set.
    pub collider_type: TileColliderType,
    /// Also produce one combined mesh for the whole planet.
    pub single_mesh: bool,
}

/// Pathfinding configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NavConfig {
    /// Step cost used by the search.
    pub edge_cost: EdgeCostModel,
    /// Number of background search threads in the pathfinding pipeline.
    pub worker_threads: usize,
    /// Maximum number of searches in flight at once.
    pub queue_budget: usize,
}

/// Demo binary configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
    /// Seed for wall placement and query endpoints.
    pub seed: u64,
    /// Fraction of tiles marked non-navigable (0.0 - 1.0).
    pub wall_fraction: f32,
    /// Number of random start/goal pairs to search.
    pub queries: u32,
    /// Height applied to tiles along each found path.
    pub extrude_height: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            detail_level: 2,
            planet_scale: 1.0,
            invert: false,
            generate_colliders: true,
            collider_type: TileColliderType::Mesh,
            single_mesh: false,
        }
    }
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            edge_cost: EdgeCostModel::Angular,
            worker_threads: 2,
            queue_budget: 64,
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            wall_fraction: 0.2,
            queries: 8,
            extrude_height: 0.05,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Per-user directory holding `config.ron` and the `logs/` folder.
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("hexsphere"))
        .ok_or(ConfigError::NoConfigDir)
}

/// File name of the settings inside the config directory.
pub const CONFIG_FILE: &str = "config.ron";

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_error(path: &Path) -> impl FnOnce(std::io::Error) -> ConfigError + use<> {
    let path = path.to_path_buf();
    move |source| ConfigError::Write { path, source }
}

// --- Load / Save / Reload ---

impl Config {
    /// Reads `config.ron` from `config_dir`, writing the defaults there first if it is missing.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        if config_path.exists() {
            let config = read_config(&config_path)?;
            log::info!("Loaded sphere settings from {}", config_path.display());
            return Ok(config);
        }

        let config = Config::default();
        config.save(config_dir)?;
        log::info!("Wrote default sphere settings to {}", config_path.display());
        Ok(config)
    }

    /// Writes the settings to `config_dir/config.ron`, creating the directory.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(write_error(config_dir))?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(self, pretty)?;
        std::fs::write(&config_path, serialized).map_err(write_error(&config_path))
    }

    /// Re-reads the file and returns the new settings only if they differ from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let fresh = read_config(&config_dir.join(CONFIG_FILE))?;
        if fresh == *self {
            return Ok(None);
        }
        log::info!("Sphere settings changed on disk");
        Ok(Some(fresh))
    }
}
