/// Domain types of a group and its matches.
pub mod group;

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, RwLock, watch};

use crate::{
    config::AppConfig,
    dao::{group::GroupRepository, sheet_store::SheetStore},
    error::ServiceError,
    state::group::GroupCode,
};

/// Handle to [`AppState`] shared by handlers and background tasks.
pub type SharedState = Arc<AppState>;

/// Central application state: the installed Persistence Gateway and write coordination.
pub struct AppState {
    config: AppConfig,
    sheet_store: RwLock<Option<Arc<dyn SheetStore>>>,
    degraded: watch::Sender<bool>,
    group_locks: DashMap<GroupCode, Arc<Mutex<()>>>,
    registry_lock: Mutex<()>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a storage backend is installed.
    pub fn new(config: AppConfig) -> SharedState {
        Arc::new(Self::build(config, None))
    }

    /// Construct a state with `store` already installed.
    pub fn with_store(config: AppConfig, store: Arc<dyn SheetStore>) -> SharedState {
        Arc::new(Self::build(config, Some(store)))
    }

    fn build(config: AppConfig, store: Option<Arc<dyn SheetStore>>) -> Self {
        let (degraded_tx, _rx) = watch::channel(store.is_none());
        Self {
            config,
            sheet_store: RwLock::new(store),
            degraded: degraded_tx,
            group_locks: DashMap::new(),
            registry_lock: Mutex::new(()),
        }
    }

    /// Configuration loaded at startup.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Obtain a handle to the current sheet store, if one is installed.
    pub async fn sheet_store(&self) -> Option<Arc<dyn SheetStore>> {
        let guard = self.sheet_store.read().await;
        guard.as_ref().cloned()
    }

    /// Current sheet store, or [`ServiceError::Degraded`] when none is installed.
    pub async fn require_sheet_store(&self) -> Result<Arc<dyn SheetStore>, ServiceError> {
        self.sheet_store().await.ok_or(ServiceError::Degraded)
    }

    /// Repository over the installed sheet store.
    pub async fn groups(&self) -> Result<GroupRepository, ServiceError> {
        self.require_sheet_store().await.map(GroupRepository::new)
    }

    /// Install a new sheet store implementation and leave degraded mode.
    pub async fn set_sheet_store(&self, store: Arc<dyn SheetStore>) {
        {
            let mut guard = self.sheet_store.write().await;
            *guard = Some(store);
        }
        self.update_degraded(false).await;
    }

    /// Remove the current sheet store and enter degraded mode.
    pub async fn clear_sheet_store(&self) {
        {
            let mut guard = self.sheet_store.write().await;
            guard.take();
        }
        self.update_degraded(true).await;
    }

    /// Current degraded flag.
    pub async fn is_degraded(&self) -> bool {
        *self.degraded.borrow()
    }

    /// Subscribe to degraded mode updates.
    pub fn degraded_watcher(&self) -> watch::Receiver<bool> {
        self.degraded.subscribe()
    }

    /// Update the degraded flag, notifying watchers only when the value changes.
    pub async fn update_degraded(&self, value: bool) {
        self.degraded.send_if_modified(|current| {
            if *current == value {
                return false;
            }
            *current = value;
            true
        });
    }

    /// Lock serializing read-modify-write cycles on one group's table.
    pub fn group_lock(&self, code: &GroupCode) -> Arc<Mutex<()>> {
        self.group_locks
            .entry(code.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Number of groups that have a write lock allocated.
    #[cfg(test)]
    pub(crate) fn tracked_group_locks(&self) -> usize {
        self.group_locks.len()
    }

    /// Lock serializing group registrations so uniqueness checks cannot interleave.
    pub fn registry_lock(&self) -> &Mutex<()> {
        &self.registry_lock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::sheet_store::memory::MemorySheetStore;

    #[tokio::test]
    async fn starts_degraded_until_a_store_is_installed() {
        let state = AppState::new(AppConfig::default());
        assert!(state.is_degraded().await);
        assert!(matches!(
            state.require_sheet_store().await,
            Err(ServiceError::Degraded)
        ));

        let mut watcher = state.degraded_watcher();
        state.set_sheet_store(Arc::new(MemorySheetStore::new())).await;
        assert!(!state.is_degraded().await);
        assert!(watcher.has_changed().unwrap());
        assert!(!*watcher.borrow_and_update());

        state.clear_sheet_store().await;
        assert!(state.is_degraded().await);
        assert!(state.sheet_store().await.is_none());
    }

    #[test]
    fn group_locks_are_shared_per_code() {
        let state = AppState::new(AppConfig::default());
        let code = GroupCode::parse("abcde").unwrap();
        let first = state.group_lock(&code);
        let second = state.group_lock(&GroupCode::parse("ABCDE").unwrap());
        let other = state.group_lock(&GroupCode::parse("ZZZZZ").unwrap());

        assert!(Arc::ptr_eq(&first, &second));
        assert!(!Arc::ptr_eq(&first, &other));
    }
}
