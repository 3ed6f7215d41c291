//! Sync configuration loading.

use std::env;
use std::path::Path;

use choreboard_core::config::SyncConfig;
use choreboard_core::{ChoreboardError, Result};

use crate::paths::ChoreboardPaths;

/// Loads the sync configuration from the default config file path, then
/// applies environment overrides.
///
/// Priority:
/// 1. `~/.config/choreboard/config.toml`
/// 2. Environment variables (`CHOREBOARD_ENDPOINT`, `CHOREBOARD_POLL_SECS`)
///
/// A missing file or config directory yields the defaults; a file that
/// exists but cannot be read or parsed is an error.
pub fn load_config() -> Result<SyncConfig> {
    let mut config = match ChoreboardPaths::config_file() {
        Ok(path) => load_config_from(&path)?,
        Err(_) => SyncConfig::default(),
    };

    if let Ok(endpoint) = env::var("CHOREBOARD_ENDPOINT")
        && !endpoint.is_empty()
    {
        config.endpoint = Some(endpoint);
    }
    if let Ok(poll) = env::var("CHOREBOARD_POLL_SECS")
        && let Ok(secs) = poll.parse()
    {
        config.poll_interval_secs = secs;
    }

    Ok(config)
}

/// Loads the configuration from an explicit path, without env overrides.
pub fn load_config_from(path: &Path) -> Result<SyncConfig> {
    if !path.exists() {
        return Ok(SyncConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|err| {
        ChoreboardError::config(format!("failed to read config file at {:?}: {}", path, err))
    })?;

    if content.trim().is_empty() {
        return Ok(SyncConfig::default());
    }

    toml::from_str(&content)
        .map_err(|err| ChoreboardError::config(format!("failed to parse {:?}: {}", path, err)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = load_config_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config, SyncConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_default_intervals() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"endpoint = "https://example.test/sync""#).unwrap();
        file.flush().unwrap();

        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.endpoint.as_deref(), Some("https://example.test/sync"));
        assert_eq!(config.poll_interval_secs, 15);
        assert_eq!(config.silence_window_secs, 30);
    }

    #[test]
    fn test_full_file_overrides_everything() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
endpoint = "https://example.test/sync"
poll_interval_secs = 5
silence_window_secs = 12
request_timeout_secs = 3
"#
        )
        .unwrap();
        file.flush().unwrap();

        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.poll_interval_secs, 5);
        assert_eq!(config.silence_window_secs, 12);
        assert_eq!(config.request_timeout_secs, 3);
    }

    #[test]
    fn test_garbage_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "this is not toml = = =").unwrap();
        file.flush().unwrap();

        assert!(load_config_from(file.path()).is_err());
    }
}
