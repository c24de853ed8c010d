//! Configuration system for hexsphere.
//!
//! Settings persist to disk as RON files. CLI flags parsed with clap override
//! whatever was loaded, and unknown or missing fields fall back to defaults so
//! old config files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    Config, DebugConfig, DemoConfig, EdgeCostModel, NavConfig, SphereConfig,
    TileColliderType, CONFIG_FILE, default_config_dir,
};
pub use error::ConfigError;
