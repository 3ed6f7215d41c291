//! JSON file implementation of the board cache.
//!
//! The entire board is one serialized blob at a fixed path. It is read once
//! at startup for an instant cold start and rewritten after every local
//! mutation and every successful merge; there is no partial update.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use choreboard_core::cache::CacheRepository;
use choreboard_core::household::HouseholdStore;
use choreboard_core::{ChoreboardError, Result};

use crate::paths::ChoreboardPaths;

/// File-backed [`CacheRepository`].
pub struct JsonCacheRepository {
    path: PathBuf,
}

impl JsonCacheRepository {
    /// Uses the platform cache location.
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: ChoreboardPaths::cache_file()?,
        })
    }

    /// Uses an explicit path. Mainly for tests.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CacheRepository for JsonCacheRepository {
    async fn load(&self) -> Result<Option<HouseholdStore>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(ChoreboardError::cache(format!(
                    "failed to read cache at {:?}: {}",
                    self.path, err
                )));
            }
        };

        let board = serde_json::from_str(&raw).map_err(|err| {
            ChoreboardError::cache(format!("failed to parse cache at {:?}: {}", self.path, err))
        })?;
        Ok(Some(board))
    }

    async fn save(&self, board: &HouseholdStore) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|err| {
                ChoreboardError::cache(format!(
                    "failed to create cache directory {:?}: {}",
                    parent, err
                ))
            })?;
        }

        let raw = serde_json::to_string(board)
            .map_err(|err| ChoreboardError::cache(format!("failed to serialize board: {}", err)))?;
        tokio::fs::write(&self.path, raw).await.map_err(|err| {
            ChoreboardError::cache(format!("failed to write cache at {:?}: {}", self.path, err))
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use choreboard_core::household::Category;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_returns_none_when_no_cache_exists() {
        let temp_dir = TempDir::new().unwrap();
        let repo = JsonCacheRepository::with_path(temp_dir.path().join("board_cache.json"));

        let board = repo.load().await.expect("Missing cache is not an error");
        assert!(board.is_none());
    }

    #[tokio::test]
    async fn test_save_and_load_round_trips_the_board() {
        let temp_dir = TempDir::new().unwrap();
        let repo = JsonCacheRepository::with_path(temp_dir.path().join("nested").join("cache.json"));

        let mut board = HouseholdStore::new();
        board.add_person("Alice").unwrap();
        board.add_task("Alice", &Category::Routine, "Feed cat").unwrap();

        repo.save(&board).await.expect("Should save board");
        let loaded = repo
            .load()
            .await
            .expect("Should load board")
            .expect("Cache was just written");
        assert_eq!(loaded, board);
    }

    #[tokio::test]
    async fn test_load_reports_corrupt_cache() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("board_cache.json");
        std::fs::write(&path, "not json").unwrap();

        let repo = JsonCacheRepository::with_path(path);
        assert!(repo.load().await.is_err());
    }
}
