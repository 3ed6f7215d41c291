//! Unified path management for choreboard files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/choreboard/          # Config directory
//! └── config.toml                # Sync configuration
//!
//! ~/.local/share/choreboard/     # Data directory
//! └── board_cache.json           # Durable board cache blob
//! ```

use std::path::PathBuf;

use choreboard_core::{ChoreboardError, Result};

/// Unified path management for choreboard.
pub struct ChoreboardPaths;

impl ChoreboardPaths {
    /// Returns the choreboard configuration directory.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("choreboard"))
            .ok_or_else(|| ChoreboardError::config("cannot determine config directory"))
    }

    /// Returns the choreboard data directory, used for the cache blob.
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join("choreboard"))
            .ok_or_else(|| ChoreboardError::config("cannot determine data directory"))
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the durable board cache.
    pub fn cache_file() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("board_cache.json"))
    }
}
