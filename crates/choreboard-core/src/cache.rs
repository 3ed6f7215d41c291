//! Durable board cache trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::household::HouseholdStore;

/// Repository for the single serialized board blob that gives the app an
/// instant cold start.
///
/// The blob is read once at startup and written after every successful local
/// mutation and every successful remote merge. Loading is best-effort: a
/// board that never ran before simply has no cache.
#[async_trait]
pub trait CacheRepository: Send + Sync {
    /// Reads the cached board.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(board))`: a cache was found and parsed
    /// - `Ok(None)`: no cache has been written yet
    /// - `Err(_)`: the cache exists but could not be read or parsed
    async fn load(&self) -> Result<Option<HouseholdStore>>;

    /// Writes the board snapshot, replacing any previous blob.
    async fn save(&self, board: &HouseholdStore) -> Result<()>;
}
