//! Metadata store access for the Assets domain
//!
//! `AssetStore` is the seam the deletion coordinator talks to. `AssetRepository`
//! is the Postgres implementation; `InMemoryAssetStore` backs tests and local runs.

pub mod assets;
pub mod memory;

use crate::domain::entities::{Asset, AssetFiles};
use studio_common::RepositoryError;
use uuid::Uuid;

pub use assets::AssetRepository;
pub use memory::InMemoryAssetStore;

#[async_trait::async_trait]
pub trait AssetStore: Send + Sync {
    /// Find the file sub-record of an asset within a media space
    async fn find_files(
        &self,
        id: Uuid,
        media_space: Uuid,
    ) -> Result<Option<AssetFiles>, RepositoryError>;

    /// Find a full asset within a media space
    async fn find(&self, id: Uuid, media_space: Uuid) -> Result<Option<Asset>, RepositoryError>;

    /// Ids of every non-default asset in a media space, oldest first
    async fn list_for_teardown(&self, media_space: Uuid) -> Result<Vec<Uuid>, RepositoryError>;

    /// Delete by id only. Returns whether a record was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
}
