//! In-memory distribution store with failure injection

use crate::domain::entities::{AssetDistribution, DistributionStatus, YoutubeVideo};
use crate::repository::DistributionStore;
use chrono::Utc;
use sqlx::types::Json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use studio_common::RepositoryError;
use uuid::Uuid;

/// Store calls that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFailure {
    Find,
    /// Any update that would set the given status
    UpdateTo(DistributionStatus),
}

#[derive(Debug, Default)]
struct State {
    records: HashMap<Uuid, AssetDistribution>,
    failing: Vec<StoreFailure>,
    /// Every status written, in order
    writes: Vec<(Uuid, DistributionStatus)>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryDistributionStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryDistributionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, distribution: AssetDistribution) {
        self.state
            .lock()
            .expect("store lock poisoned")
            .records
            .insert(distribution.id, distribution);
    }

    pub fn remove(&self, id: Uuid) -> Option<AssetDistribution> {
        self.state
            .lock()
            .expect("store lock poisoned")
            .records
            .remove(&id)
    }

    pub fn get(&self, id: Uuid) -> Option<AssetDistribution> {
        self.state
            .lock()
            .expect("store lock poisoned")
            .records
            .get(&id)
            .cloned()
    }

    pub fn fail_on(&self, failure: StoreFailure) {
        self.state
            .lock()
            .expect("store lock poisoned")
            .failing
            .push(failure);
    }

    /// Statuses written for `id`, in order
    pub fn status_history(&self, id: Uuid) -> Vec<DistributionStatus> {
        self.state
            .lock()
            .expect("store lock poisoned")
            .writes
            .iter()
            .filter(|(record, _)| *record == id)
            .map(|(_, status)| *status)
            .collect()
    }

    fn lock(&self, failure: StoreFailure) -> Result<MutexGuard<'_, State>, RepositoryError> {
        let state = self
            .state
            .lock()
            .map_err(|e| RepositoryError::Unavailable(format!("store lock poisoned: {e}")))?;
        if state.failing.contains(&failure) {
            return Err(RepositoryError::Unavailable(format!(
                "injected {:?} failure",
                failure
            )));
        }
        Ok(state)
    }
}

#[async_trait::async_trait]
impl DistributionStore for InMemoryDistributionStore {
    async fn find(&self, id: Uuid) -> Result<Option<AssetDistribution>, RepositoryError> {
        let state = self.lock(StoreFailure::Find)?;
        Ok(state.records.get(&id).cloned())
    }

    async fn update_status(
        &self,
        id: Uuid,
        from: DistributionStatus,
        to: DistributionStatus,
        youtube: Option<YoutubeVideo>,
    ) -> Result<Option<AssetDistribution>, RepositoryError> {
        let mut state = self.lock(StoreFailure::UpdateTo(to))?;
        let updated = match state.records.get_mut(&id) {
            Some(record) if record.status == from => {
                record.status = to;
                record.youtube = youtube.map(Json);
                record.updated_at = Utc::now();
                record.clone()
            }
            _ => return Ok(None),
        };
        state.writes.push((id, to));
        Ok(Some(updated))
    }
}
