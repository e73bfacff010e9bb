//! Mock Publishing Provider
//!
//! Drains the media stream, records what was uploaded and answers with a
//! programmable outcome.

use crate::{
    MediaBody, PrivacyStatus, ProgressCallback, PublishingError, PublishingProvider,
    ResourceSnippet, ResourceStatus, UploadOptions, UploadProgress, VideoResource,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::AsyncReadExt;

/// What outcome the mock should produce
#[derive(Debug, Clone, Default, PartialEq)]
pub enum MockOutcome {
    /// Answer with the configured resource (or a default one)
    #[default]
    Complete,
    /// Transport failure
    Fail,
    /// Well-formed HTTP answer without a video id
    MissingId,
    /// Request exceeded its timeout
    Timeout,
}

/// A recorded upload for test assertions
#[derive(Debug, Clone)]
pub struct RecordedUpload {
    pub options: UploadOptions,
    pub bytes: Vec<u8>,
}

/// Mock publishing provider with programmable behavior
#[derive(Debug, Clone)]
pub struct MockPublishingProvider {
    outcome: Arc<Mutex<MockOutcome>>,
    resource: Arc<Mutex<Option<VideoResource>>>,
    history: Arc<Mutex<Vec<RecordedUpload>>>,
}

impl MockPublishingProvider {
    pub fn new() -> Self {
        Self {
            outcome: Arc::new(Mutex::new(MockOutcome::Complete)),
            resource: Arc::new(Mutex::new(None)),
            history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Configure the outcome of subsequent uploads
    pub fn set_outcome(&self, outcome: MockOutcome) {
        *self.outcome.lock().expect("outcome lock poisoned") = outcome;
    }

    /// Configure the resource returned on `Complete`
    pub fn set_resource(&self, resource: VideoResource) {
        *self.resource.lock().expect("resource lock poisoned") = Some(resource);
    }

    /// Get recorded uploads
    pub fn recorded_uploads(&self) -> Vec<RecordedUpload> {
        self.history.lock().expect("history lock poisoned").clone()
    }

    fn default_resource(options: &UploadOptions) -> VideoResource {
        VideoResource {
            id: Some("mock-video-id".to_string()),
            snippet: Some(ResourceSnippet {
                title: Some(options.snippet.title.clone()),
                description: options.snippet.description.clone(),
                thumbnails: Some(serde_json::json!({
                    "default": {"url": "https://mock-thumbnails.example.com/default.jpg"}
                })),
                channel_id: Some("mock-channel".to_string()),
            }),
            status: Some(ResourceStatus {
                privacy_status: Some(
                    options
                        .status
                        .as_ref()
                        .map(|s| s.privacy_status)
                        .unwrap_or(PrivacyStatus::Private),
                ),
            }),
        }
    }
}

impl Default for MockPublishingProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PublishingProvider for MockPublishingProvider {
    async fn insert_video(
        &self,
        options: &UploadOptions,
        mut media: MediaBody,
        progress: Option<ProgressCallback>,
    ) -> Result<VideoResource, PublishingError> {
        tracing::info!(title = %options.snippet.title, "Mock publishing: received upload");

        let mut bytes = Vec::new();
        media.file.read_to_end(&mut bytes).await?;
        if let Some(report) = &progress {
            report(UploadProgress {
                bytes_sent: bytes.len() as u64,
                total_bytes: media.content_length,
            });
        }

        self.history
            .lock()
            .map_err(|e| PublishingError::Request(format!("history lock poisoned: {e}")))?
            .push(RecordedUpload {
                options: options.clone(),
                bytes,
            });

        let outcome = self
            .outcome
            .lock()
            .map_err(|e| PublishingError::Request(format!("outcome lock poisoned: {e}")))?
            .clone();

        match outcome {
            MockOutcome::Complete => {
                let configured = self
                    .resource
                    .lock()
                    .map_err(|e| PublishingError::Request(format!("resource lock poisoned: {e}")))?
                    .clone();
                Ok(configured.unwrap_or_else(|| Self::default_resource(options)))
            }
            MockOutcome::Fail => Err(PublishingError::Request(
                "connection reset by peer".to_string(),
            )),
            MockOutcome::MissingId => Ok(VideoResource {
                id: None,
                ..Self::default_resource(options)
            }),
            MockOutcome::Timeout => Err(PublishingError::Timeout(Duration::from_secs(3600))),
        }
    }
}
