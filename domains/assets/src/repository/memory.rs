//! In-memory asset store
//!
//! Keeps assets in insertion order and can be told to fail individual
//! operations, which is how the deletion failure paths are exercised.

use crate::domain::entities::{Asset, AssetFiles};
use crate::repository::AssetStore;
use std::sync::{Arc, Mutex};
use studio_common::RepositoryError;
use uuid::Uuid;

/// Operations that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    Find,
    List,
    Delete,
}

#[derive(Debug, Default)]
struct State {
    assets: Vec<Asset>,
    failing: Vec<StoreOperation>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryAssetStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, asset: Asset) {
        self.state
            .lock()
            .expect("store lock poisoned")
            .assets
            .push(asset);
    }

    /// Make every subsequent call of `operation` fail
    pub fn fail_on(&self, operation: StoreOperation) {
        self.state
            .lock()
            .expect("store lock poisoned")
            .failing
            .push(operation);
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.state
            .lock()
            .expect("store lock poisoned")
            .assets
            .iter()
            .any(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.state.lock().expect("store lock poisoned").assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(
        &self,
        operation: StoreOperation,
    ) -> Result<std::sync::MutexGuard<'_, State>, RepositoryError> {
        let state = self
            .state
            .lock()
            .map_err(|e| RepositoryError::Unavailable(format!("store lock poisoned: {e}")))?;
        if state.failing.contains(&operation) {
            return Err(RepositoryError::Unavailable(format!(
                "injected {:?} failure",
                operation
            )));
        }
        Ok(state)
    }
}

#[async_trait::async_trait]
impl AssetStore for InMemoryAssetStore {
    async fn find_files(
        &self,
        id: Uuid,
        media_space: Uuid,
    ) -> Result<Option<AssetFiles>, RepositoryError> {
        let state = self.lock(StoreOperation::Find)?;
        Ok(state
            .assets
            .iter()
            .find(|a| a.id == id && a.media_space == media_space)
            .map(Asset::files))
    }

    async fn find(&self, id: Uuid, media_space: Uuid) -> Result<Option<Asset>, RepositoryError> {
        let state = self.lock(StoreOperation::Find)?;
        Ok(state
            .assets
            .iter()
            .find(|a| a.id == id && a.media_space == media_space)
            .cloned())
    }

    async fn list_for_teardown(&self, media_space: Uuid) -> Result<Vec<Uuid>, RepositoryError> {
        let state = self.lock(StoreOperation::List)?;
        Ok(state
            .assets
            .iter()
            .filter(|a| a.media_space == media_space && !a.is_default_asset)
            .map(|a| a.id)
            .collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut state = self.lock(StoreOperation::Delete)?;
        let before = state.assets.len();
        state.assets.retain(|a| a.id != id);
        Ok(state.assets.len() < before)
    }
}
