//! Metadata store access for the Distributions domain

pub mod distributions;
pub mod memory;

use crate::domain::entities::{AssetDistribution, DistributionStatus, YoutubeVideo};
use crate::domain::errors::DistributionError;
use crate::domain::state::{DistributionStateMachine, StateError};
use studio_common::RepositoryError;
use uuid::Uuid;

pub use distributions::DistributionRepository;
pub use memory::InMemoryDistributionStore;

#[async_trait::async_trait]
pub trait DistributionStore: Send + Sync {
    /// Find a distribution by id
    async fn find(&self, id: Uuid) -> Result<Option<AssetDistribution>, RepositoryError>;

    /// Atomically set `status = to` and the payload where `status == from`.
    /// Returns `None` when no record matched. Callers go through `transition`.
    async fn update_status(
        &self,
        id: Uuid,
        from: DistributionStatus,
        to: DistributionStatus,
        youtube: Option<YoutubeVideo>,
    ) -> Result<Option<AssetDistribution>, RepositoryError>;

    /// Move a distribution along one edge of the state machine.
    ///
    /// The payload must be present exactly when moving to `COMPLETED`.
    async fn transition(
        &self,
        id: Uuid,
        from: DistributionStatus,
        to: DistributionStatus,
        youtube: Option<YoutubeVideo>,
    ) -> Result<AssetDistribution, DistributionError> {
        DistributionStateMachine::validate(from.to_state(), to.to_state())?;
        if youtube.is_some() != (to == DistributionStatus::Completed) {
            return Err(StateError::GuardFailed(format!(
                "provider payload must be present only on {}",
                DistributionStatus::Completed
            ))
            .into());
        }

        self.update_status(id, from, to, youtube)
            .await
            .map_err(DistributionError::StatusUpdateFailed)?
            .ok_or(DistributionError::DistributionNotFound(id))
    }
}
