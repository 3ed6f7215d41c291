//! The periodic pull loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use choreboard_core::Result;
use choreboard_core::cache::CacheRepository;
use choreboard_core::editing::EditingGuard;
use choreboard_core::gateway::RemoteGateway;
use choreboard_core::household::HouseholdStore;
use tokio::sync::Mutex;
use tokio::time::interval;

use crate::board_usecase::RenderRegistry;
use crate::sync::suppression::SuppressionWindow;

/// What a reconciliation attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Remote state was fetched and merged into the store.
    Merged,
    /// Another pull was already running.
    SkippedInFlight,
    /// The silence window after a local mutation was still open.
    SkippedSuppressed,
    /// The user was mid-edit; merging would destroy their keystrokes.
    SkippedEditing,
}

/// Periodically merges remote state into the local store.
///
/// The remote is authoritative for people and their tasks (wholesale
/// replacement) and incrementally authoritative for the schedule (key-wise
/// patch). Every guard is checked before any network call: a skipped tick
/// costs nothing.
pub struct Reconciler {
    store: Arc<Mutex<HouseholdStore>>,
    gateway: Arc<dyn RemoteGateway>,
    cache: Arc<dyn CacheRepository>,
    suppression: Arc<SuppressionWindow>,
    editing: Arc<dyn EditingGuard>,
    render: RenderRegistry,
    poll_interval: Duration,
    in_flight: AtomicBool,
    scheduler_running: AtomicBool,
}

impl Reconciler {
    pub(crate) fn new(
        store: Arc<Mutex<HouseholdStore>>,
        gateway: Arc<dyn RemoteGateway>,
        cache: Arc<dyn CacheRepository>,
        suppression: Arc<SuppressionWindow>,
        editing: Arc<dyn EditingGuard>,
        render: RenderRegistry,
        poll_interval: Duration,
    ) -> Self {
        Self {
            store,
            gateway,
            cache,
            suppression,
            editing,
            render,
            poll_interval,
            in_flight: AtomicBool::new(false),
            scheduler_running: AtomicBool::new(false),
        }
    }

    /// Starts the background poll loop.
    ///
    /// The first tick fires immediately (the initial background sync); later
    /// ticks follow the poll interval. Starting twice is a no-op.
    pub fn start_scheduler(self: &Arc<Self>) {
        if self.scheduler_running.swap(true, Ordering::SeqCst) {
            tracing::warn!(target: "board_sync", "scheduler already running, skipping");
            return;
        }

        let reconciler = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = interval(reconciler.poll_interval);
            tracing::info!(
                target: "board_sync",
                "scheduler started ({:?} interval)",
                reconciler.poll_interval
            );

            loop {
                ticker.tick().await;
                match reconciler.sync_once().await {
                    Ok(outcome) => {
                        tracing::debug!(target: "board_sync", "tick: {:?}", outcome);
                    }
                    Err(err) => {
                        tracing::warn!(target: "board_sync", "background sync failed: {}", err);
                    }
                }
            }
        });
    }

    /// One guarded reconciliation attempt.
    ///
    /// Skips without a network call while a pull is in flight, the silence
    /// window is open, or the user is editing. On failure the store is left
    /// untouched and nothing is retried before the next tick.
    pub async fn sync_once(&self) -> Result<SyncOutcome> {
        if self.in_flight.load(Ordering::SeqCst) {
            return Ok(SyncOutcome::SkippedInFlight);
        }
        if self.suppression.is_active() {
            return Ok(SyncOutcome::SkippedSuppressed);
        }
        if self.editing.is_editing() {
            return Ok(SyncOutcome::SkippedEditing);
        }
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Ok(SyncOutcome::SkippedInFlight);
        }

        let result = self.pull_and_merge().await;
        self.in_flight.store(false, Ordering::SeqCst);
        result.map(|_| SyncOutcome::Merged)
    }

    async fn pull_and_merge(&self) -> Result<()> {
        let snapshot = self.gateway.fetch_all().await?;
        let people = snapshot.people();
        let schedule_updates = snapshot.schedule_updates();

        let board = {
            let mut store = self.store.lock().await;
            store.merge_remote(people, &schedule_updates);
            store.clone()
        };

        if let Err(err) = self.cache.save(&board).await {
            tracing::warn!(target: "board_sync", "cache write failed: {}", err);
        }
        self.render.notify(&board).await;
        Ok(())
    }
}
