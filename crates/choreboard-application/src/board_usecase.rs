//! Board use case: the optimistic mutation pipeline.
//!
//! Every user action follows the same template: apply the store mutation
//! synchronously, persist a snapshot, notify the render callback, arm the
//! silence window, and queue the remote write. The board reflects the change
//! with zero latency regardless of network state.

use std::sync::Arc;

use anyhow::Result;
use chrono::{Datelike, Local};
use choreboard_core::cache::CacheRepository;
use choreboard_core::config::SyncConfig;
use choreboard_core::editing::EditingGuard;
use choreboard_core::gateway::{NoOpGateway, RemoteGateway, RemoteMutation};
use choreboard_core::household::{Category, HouseholdStore, TaskToggle, WeeklySchedule};
use choreboard_infrastructure::{HttpGateway, JsonCacheRepository};
use tokio::sync::{Mutex, RwLock};

use crate::sync::outbox::MutationOutbox;
use crate::sync::reconciler::Reconciler;
use crate::sync::suppression::SuppressionWindow;

/// Callback invoked with a snapshot after every state change, local or
/// merged. The presentation layer re-renders from it.
pub type RenderCallback = Arc<dyn Fn(&HouseholdStore) + Send + Sync>;

/// Shared registry for the render callback, so the pipeline and the
/// reconciler notify the same front end.
#[derive(Clone, Default)]
pub(crate) struct RenderRegistry(Arc<RwLock<Option<RenderCallback>>>);

impl RenderRegistry {
    pub(crate) async fn set(&self, callback: RenderCallback) {
        *self.0.write().await = Some(callback);
    }

    pub(crate) async fn notify(&self, board: &HouseholdStore) {
        if let Some(callback) = self.0.read().await.as_ref() {
            callback(board);
        }
    }
}

/// Use case for every board interaction.
///
/// Owns the store behind a single-writer mutex together with the cache,
/// silence window, write outbox, and reconciler. All collaborators are
/// shared via `Arc`, mirroring how the store itself must never be reachable
/// as ambient global state.
pub struct BoardUseCase {
    store: Arc<Mutex<HouseholdStore>>,
    cache: Arc<dyn CacheRepository>,
    suppression: Arc<SuppressionWindow>,
    outbox: MutationOutbox,
    render: RenderRegistry,
    reconciler: Arc<Reconciler>,
}

impl BoardUseCase {
    /// Builds the full sync pipeline and rehydrates the board from the
    /// durable cache.
    ///
    /// Rehydration is best-effort: a missing or unreadable cache starts an
    /// empty board and the first merge fills it in.
    pub async fn bootstrap(
        config: &SyncConfig,
        gateway: Arc<dyn RemoteGateway>,
        cache: Arc<dyn CacheRepository>,
        editing: Arc<dyn EditingGuard>,
    ) -> Self {
        let initial = match cache.load().await {
            Ok(Some(board)) => board,
            Ok(None) => HouseholdStore::new(),
            Err(err) => {
                tracing::warn!("[BoardUseCase] ignoring unreadable cache: {}", err);
                HouseholdStore::new()
            }
        };

        let store = Arc::new(Mutex::new(initial));
        let suppression = Arc::new(SuppressionWindow::new(config.silence_window()));
        let render = RenderRegistry::default();
        let outbox = MutationOutbox::spawn(Arc::clone(&gateway));
        let reconciler = Arc::new(Reconciler::new(
            Arc::clone(&store),
            gateway,
            Arc::clone(&cache),
            Arc::clone(&suppression),
            editing,
            render.clone(),
            config.poll_interval(),
        ));

        Self {
            store,
            cache,
            suppression,
            outbox,
            render,
            reconciler,
        }
    }

    /// Composition over the platform cache file and the HTTP gateway. With
    /// no endpoint configured the board runs offline behind a no-op gateway.
    pub async fn from_config(
        config: &SyncConfig,
        editing: Arc<dyn EditingGuard>,
    ) -> Result<Self> {
        let cache: Arc<dyn CacheRepository> = Arc::new(JsonCacheRepository::new()?);
        let gateway: Arc<dyn RemoteGateway> = match &config.endpoint {
            Some(endpoint) => Arc::new(HttpGateway::new(endpoint, config.request_timeout())),
            None => Arc::new(NoOpGateway),
        };
        Ok(Self::bootstrap(config, gateway, cache, editing).await)
    }

    /// The reconciler driving background pulls; the composition root starts
    /// its scheduler when an endpoint is configured.
    pub fn reconciler(&self) -> &Arc<Reconciler> {
        &self.reconciler
    }

    /// Registers the presentation callback invoked after every change.
    pub async fn set_render_callback(&self, callback: RenderCallback) {
        self.render.set(callback).await;
    }

    /// A point-in-time copy of the board.
    pub async fn snapshot(&self) -> HouseholdStore {
        self.store.lock().await.clone()
    }

    /// The schedule label for today (the focus banner).
    pub async fn current_focus(&self) -> String {
        let store = self.store.lock().await;
        store.schedule().focus(Local::now().weekday()).to_string()
    }

    /// Flips a task's checkbox.
    pub async fn toggle_task(
        &self,
        person: &str,
        category: &Category,
        index: usize,
    ) -> Result<TaskToggle> {
        let (toggle, board) = {
            let mut store = self.store.lock().await;
            let toggle = store.toggle_task(person, category, index)?;
            (toggle, store.clone())
        };

        self.finish(
            board,
            vec![RemoteMutation::UpdateTask {
                person: person.to_string(),
                text: toggle.text.clone(),
                category: category.clone(),
                completed: toggle.completed,
            }],
        )
        .await;
        Ok(toggle)
    }

    /// Adds a task. Blank input is a no-op, as in any decent input box.
    pub async fn add_task(&self, person: &str, category: &Category, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }

        let board = {
            let mut store = self.store.lock().await;
            store.add_task(person, category, text)?;
            store.clone()
        };

        self.finish(
            board,
            vec![RemoteMutation::AddTask {
                person: person.to_string(),
                text: text.to_string(),
                category: category.clone(),
            }],
        )
        .await;
        Ok(())
    }

    /// Deletes a task by position.
    pub async fn delete_task(&self, person: &str, category: &Category, index: usize) -> Result<()> {
        let (removed, board) = {
            let mut store = self.store.lock().await;
            let removed = store.delete_task(person, category, index)?;
            (removed, store.clone())
        };

        self.finish(
            board,
            vec![RemoteMutation::DeleteTask {
                person: person.to_string(),
                text: removed.text,
                category: category.clone(),
            }],
        )
        .await;
        Ok(())
    }

    /// Rewords a task. The remote has no rename action, so the edit travels
    /// as a delete of the old text followed by an add of the new one, in
    /// that order. An unchanged text skips the whole pipeline.
    pub async fn edit_task(
        &self,
        person: &str,
        category: &Category,
        index: usize,
        new_text: &str,
    ) -> Result<()> {
        let new_text = new_text.trim();

        let (edit, board) = {
            let mut store = self.store.lock().await;
            match store.edit_task(person, category, index, new_text)? {
                Some(edit) => (edit, store.clone()),
                None => return Ok(()),
            }
        };

        self.finish(
            board,
            vec![
                RemoteMutation::DeleteTask {
                    person: person.to_string(),
                    text: edit.old_text,
                    category: category.clone(),
                },
                RemoteMutation::AddTask {
                    person: person.to_string(),
                    text: edit.new_text,
                    category: category.clone(),
                },
            ],
        )
        .await;
        Ok(())
    }

    /// Adds a household member. Blank names are a no-op.
    pub async fn add_person(&self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(());
        }

        let board = {
            let mut store = self.store.lock().await;
            store.add_person(name)?;
            store.clone()
        };

        self.finish(
            board,
            vec![RemoteMutation::AddPerson {
                person: name.to_string(),
            }],
        )
        .await;
        Ok(())
    }

    /// Removes a household member and all their tasks.
    pub async fn delete_person(&self, name: &str) -> Result<()> {
        let board = {
            let mut store = self.store.lock().await;
            store.delete_person(name)?;
            store.clone()
        };

        self.finish(
            board,
            vec![RemoteMutation::DeletePerson {
                person: name.to_string(),
            }],
        )
        .await;
        Ok(())
    }

    /// Unchecks every box for the new week.
    pub async fn reset_week(&self) -> Result<()> {
        let board = {
            let mut store = self.store.lock().await;
            store.reset_all_checkboxes();
            store.clone()
        };

        self.finish(board, vec![RemoteMutation::ResetCheckboxes]).await;
        Ok(())
    }

    /// Replaces the whole weekly schedule.
    pub async fn save_schedule(&self, schedule: WeeklySchedule) -> Result<()> {
        let board = {
            let mut store = self.store.lock().await;
            store.set_schedule(schedule.clone());
            store.clone()
        };

        self.finish(board, vec![RemoteMutation::SaveSchedule { schedule }])
            .await;
        Ok(())
    }

    /// Steps shared by every mutation after the store change: persist the
    /// snapshot, notify the front end, arm the silence window, and queue the
    /// remote writes in order.
    async fn finish(&self, board: HouseholdStore, mutations: Vec<RemoteMutation>) {
        if let Err(err) = self.cache.save(&board).await {
            tracing::warn!("[BoardUseCase] cache write failed: {}", err);
        }
        self.render.notify(&board).await;
        self.suppression.extend();
        for mutation in mutations {
            self.outbox.enqueue(mutation);
        }
    }
}
