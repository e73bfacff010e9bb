//! Coordinated asset deletion
//!
//! Removing an asset touches two systems: the runner, which owns the files on
//! disk, and the metadata store. The runner is always asked first. When it
//! fails, the metadata record is kept so the file reference is not lost.

use std::sync::Arc;

use studio_runner::{DeleteFilesRequest, RunnerService};
use uuid::Uuid;

use crate::domain::entities::AssetFile;
use crate::domain::errors::DeletionError;
use crate::repository::AssetStore;

/// Which runner artifacts a deletion should remove
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactSelection {
    pub source: bool,
    pub encoded: bool,
}

impl Default for ArtifactSelection {
    fn default() -> Self {
        Self {
            source: true,
            encoded: true,
        }
    }
}

impl ArtifactSelection {
    pub fn is_empty(&self) -> bool {
        !self.source && !self.encoded
    }

    /// Build the runner request for the selected artifacts of `file`
    pub fn cleanup_request(&self, file: &AssetFile) -> DeleteFilesRequest {
        DeleteFilesRequest {
            source_path: if self.source { file.source_path() } else { None },
            encoded_path: if self.encoded {
                file.encoded_path().map(str::to_string)
            } else {
                None
            },
        }
    }
}

/// A tenant-scoped deletion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteAsset {
    pub asset_id: Uuid,
    pub media_space: Uuid,
    /// User on whose behalf the runner is called
    pub initiated_by: Uuid,
    pub selection: ArtifactSelection,
}

impl DeleteAsset {
    pub fn new(asset_id: Uuid, media_space: Uuid, initiated_by: Uuid) -> Self {
        Self {
            asset_id,
            media_space,
            initiated_by,
            selection: ArtifactSelection::default(),
        }
    }

    pub fn with_selection(mut self, selection: ArtifactSelection) -> Self {
        self.selection = selection;
        self
    }
}

#[derive(Clone)]
pub struct AssetDeletionCoordinator {
    store: Arc<dyn AssetStore>,
    runner: Arc<dyn RunnerService>,
}

impl AssetDeletionCoordinator {
    pub fn new(store: Arc<dyn AssetStore>, runner: Arc<dyn RunnerService>) -> Self {
        Self { store, runner }
    }

    /// Delete one asset: runner cleanup first, then the metadata record.
    pub async fn delete(&self, request: &DeleteAsset) -> Result<(), DeletionError> {
        let asset_id = request.asset_id;

        let files = self
            .store
            .find_files(asset_id, request.media_space)
            .await
            .map_err(|e| {
                tracing::error!(asset_id = %asset_id, error = %e, "Failed to look up asset");
                DeletionError::MetadataLookupFailed(e)
            })?
            .ok_or(DeletionError::AssetNotFound)?;

        let file = &files.file.0;
        if !file.has_downloaded_source() {
            tracing::debug!(
                asset_id = %asset_id,
                download_status = ?file.download.status,
                "No downloaded source, skipping runner cleanup"
            );
        } else if request.selection.is_empty() {
            tracing::debug!(
                asset_id = %asset_id,
                "No artifacts selected, skipping runner cleanup"
            );
        } else {
            if request.selection.source && file.name.is_none() {
                tracing::warn!(
                    asset_id = %asset_id,
                    "Asset has no file name, source file not sent"
                );
            }

            let cleanup = request.selection.cleanup_request(file);
            self.runner
                .delete_asset_files(request.initiated_by, asset_id, &cleanup)
                .await
                .map_err(|e| {
                    tracing::error!(
                        asset_id = %asset_id,
                        user_id = %request.initiated_by,
                        error = %e,
                        "Runner cleanup failed, keeping asset record"
                    );
                    DeletionError::RemoteCleanupFailed(e)
                })?;
            tracing::info!(asset_id = %asset_id, "Runner removed asset files");
        }

        let removed = self.store.delete(asset_id).await.map_err(|e| {
            tracing::error!(asset_id = %asset_id, error = %e, "Failed to delete asset record");
            DeletionError::MetadataDeleteFailed(e)
        })?;

        if removed {
            tracing::info!(asset_id = %asset_id, "Asset deleted");
        } else {
            tracing::debug!(asset_id = %asset_id, "Asset record already gone");
        }

        Ok(())
    }

    /// Delete every non-default asset of a media space, one at a time.
    /// Stops at the first failure. Returns the number of deleted assets.
    pub async fn delete_all_for_tenant(
        &self,
        media_space: Uuid,
        initiated_by: Uuid,
    ) -> Result<usize, DeletionError> {
        let ids = self
            .store
            .list_for_teardown(media_space)
            .await
            .map_err(|e| {
                tracing::error!(media_space = %media_space, error = %e, "Failed to list assets");
                DeletionError::MetadataLookupFailed(e)
            })?;

        tracing::info!(
            media_space = %media_space,
            count = ids.len(),
            "Deleting media space assets"
        );

        for (deleted, asset_id) in ids.iter().copied().enumerate() {
            let request = DeleteAsset::new(asset_id, media_space, initiated_by);
            if let Err(e) = self.delete(&request).await {
                tracing::error!(
                    media_space = %media_space,
                    asset_id = %asset_id,
                    deleted,
                    "Media space teardown stopped"
                );
                return Err(DeletionError::TeardownFailed {
                    asset_id,
                    source: Box::new(e),
                });
            }
        }

        Ok(ids.len())
    }
}
