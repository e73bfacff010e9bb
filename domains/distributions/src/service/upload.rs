//! Background upload of an asset to a publishing provider
//!
//! One upload is a chain of dependent steps: claim the queued record, stream
//! the media to the provider, record the result. Nothing is returned to the
//! requester; the record's status is the only observable outcome. Failures
//! after the claim move the record to `FAILED`.

use std::path::PathBuf;
use std::sync::Arc;

use studio_publishing::{
    MediaBody, ProgressCallback, PublishingProvider, UploadOptions, UploadProgress,
};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::domain::entities::{DistributionStatus, YoutubeVideo};
use crate::repository::DistributionStore;

/// How an upload ended. For logging and tests only.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    /// Record is `COMPLETED` with the provider payload
    Completed { video_id: String },
    /// Record was moved to `FAILED` (or that was attempted)
    Failed,
    /// Record was not `IN_QUEUE`, missing, or could not be claimed
    NotClaimed,
    /// Provider accepted the upload but the record stayed `IN_PROGRESS`
    CompletionNotRecorded { video_id: String },
}

#[derive(Clone)]
pub struct DistributionUploadWorker {
    store: Arc<dyn DistributionStore>,
    provider: Arc<dyn PublishingProvider>,
}

impl DistributionUploadWorker {
    pub fn new(store: Arc<dyn DistributionStore>, provider: Arc<dyn PublishingProvider>) -> Self {
        Self { store, provider }
    }

    /// Run `upload` on a detached task
    pub fn spawn(
        &self,
        distribution_id: Uuid,
        options: UploadOptions,
        source: PathBuf,
    ) -> JoinHandle<UploadOutcome> {
        let worker = self.clone();
        tokio::spawn(async move { worker.upload(distribution_id, options, source).await })
    }

    pub async fn upload(
        &self,
        distribution_id: Uuid,
        options: UploadOptions,
        source: PathBuf,
    ) -> UploadOutcome {
        if let Err(e) = self
            .store
            .transition(
                distribution_id,
                DistributionStatus::InQueue,
                DistributionStatus::InProgress,
                None,
            )
            .await
        {
            tracing::warn!(
                distribution_id = %distribution_id,
                code = %e.code(),
                error = %e,
                "Distribution not claimed, upload skipped"
            );
            return UploadOutcome::NotClaimed;
        }
        tracing::info!(
            distribution_id = %distribution_id,
            source = %source.display(),
            "Upload started"
        );

        let media = match MediaBody::open(&source).await {
            Ok(media) => media,
            Err(e) => {
                tracing::error!(
                    distribution_id = %distribution_id,
                    source = %source.display(),
                    error = %e,
                    "Failed to open source file"
                );
                self.mark_failed(distribution_id).await;
                return UploadOutcome::Failed;
            }
        };

        let progress: ProgressCallback = Arc::new(move |p: UploadProgress| {
            tracing::debug!(
                distribution_id = %distribution_id,
                bytes_sent = p.bytes_sent,
                total_bytes = p.total_bytes,
                "Upload progress"
            );
        });

        let resource = match self
            .provider
            .insert_video(&options, media, Some(progress))
            .await
        {
            Ok(resource) => resource,
            Err(e) => {
                tracing::error!(distribution_id = %distribution_id, error = %e, "Upload failed");
                self.mark_failed(distribution_id).await;
                return UploadOutcome::Failed;
            }
        };

        let Some(video) = YoutubeVideo::from_resource(&resource) else {
            tracing::error!(
                distribution_id = %distribution_id,
                "Provider response has no video id"
            );
            self.mark_failed(distribution_id).await;
            return UploadOutcome::Failed;
        };
        let video_id = video.id.clone();

        match self
            .store
            .transition(
                distribution_id,
                DistributionStatus::InProgress,
                DistributionStatus::Completed,
                Some(video),
            )
            .await
        {
            Ok(_) => {
                tracing::info!(
                    distribution_id = %distribution_id,
                    video_id = %video_id,
                    "Upload completed"
                );
                UploadOutcome::Completed { video_id }
            }
            Err(e) => {
                // No compensation: the record stays IN_PROGRESS.
                tracing::error!(
                    distribution_id = %distribution_id,
                    video_id = %video_id,
                    code = %e.code(),
                    error = %e,
                    "Upload succeeded but completion was not recorded"
                );
                UploadOutcome::CompletionNotRecorded { video_id }
            }
        }
    }

    /// Move a claimed record to `FAILED`. Errors are logged only.
    async fn mark_failed(&self, distribution_id: Uuid) {
        match self
            .store
            .transition(
                distribution_id,
                DistributionStatus::InProgress,
                DistributionStatus::Failed,
                None,
            )
            .await
        {
            Ok(_) => {
                tracing::info!(distribution_id = %distribution_id, "Distribution marked failed")
            }
            Err(e) => tracing::error!(
                distribution_id = %distribution_id,
                code = %e.code(),
                error = %e,
                "Failed to mark distribution failed"
            ),
        }
    }
}
