//! Publishing Providers
//!
//! Uploads asset media to external platforms:
//! - YouTube Data API v3 resumable upload for production
//! - Programmable mock provider for testing and development
//! - Upload progress reporting through an optional callback

pub mod mock;
pub mod youtube;

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PublishingError {
    #[error("Publishing configuration error: {0}")]
    Configuration(String),

    #[error("Publishing request error: {0}")]
    Request(String),

    #[error("Publishing request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Publishing response error: {0}")]
    Response(String),

    #[error("Media read error: {0}")]
    Media(#[from] std::io::Error),
}

/// Visibility of a published video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyStatus {
    Public,
    Private,
    Unlisted,
}

impl std::fmt::Display for PrivacyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::Private => write!(f, "private"),
            Self::Unlisted => write!(f, "unlisted"),
        }
    }
}

/// Descriptive metadata sent with an upload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

/// Status block sent with an upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatusOptions {
    pub privacy_status: PrivacyStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub made_for_kids: Option<bool>,
}

/// Provider options for a single upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadOptions {
    pub snippet: VideoSnippet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<VideoStatusOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localizations: Option<serde_json::Value>,
    /// MIME type of the media body
    #[serde(skip)]
    pub mime_type: String,
}

impl UploadOptions {
    /// Resource parts included in the request, e.g. `snippet,status`
    pub fn parts(&self) -> String {
        let mut parts = vec!["snippet"];
        if self.localizations.is_some() {
            parts.push("localizations");
        }
        if self.status.is_some() {
            parts.push("status");
        }
        parts.join(",")
    }
}

/// Opened media stream handed to a provider
#[derive(Debug)]
pub struct MediaBody {
    pub file: tokio::fs::File,
    pub content_length: u64,
}

impl MediaBody {
    /// Open a file for streaming
    pub async fn open(path: impl AsRef<std::path::Path>) -> Result<Self, PublishingError> {
        let file = tokio::fs::File::open(path.as_ref()).await?;
        let content_length = file.metadata().await?.len();
        Ok(Self {
            file,
            content_length,
        })
    }
}

/// Bytes streamed so far
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    pub bytes_sent: u64,
    pub total_bytes: u64,
}

/// Progress observer; called from the upload stream
pub type ProgressCallback = Arc<dyn Fn(UploadProgress) + Send + Sync>;

/// Snippet returned by the provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSnippet {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnails: Option<serde_json::Value>,
    pub channel_id: Option<String>,
}

/// Status returned by the provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceStatus {
    pub privacy_status: Option<PrivacyStatus>,
}

/// Resource returned by the provider after an upload. Every field is
/// optional: callers decide what a well-formed response is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoResource {
    pub id: Option<String>,
    pub snippet: Option<ResourceSnippet>,
    pub status: Option<ResourceStatus>,
}

/// Publishing service configuration
#[derive(Debug, Clone)]
pub struct PublishingConfig {
    /// Provider (youtube, mock)
    pub provider: String,
    /// Base URL of the upload endpoint
    pub upload_base_url: String,
    /// Applied to each upload request, including streaming the body
    pub timeout: Duration,
}

impl PublishingConfig {
    /// Create publishing config from environment variables
    pub fn from_env() -> Result<Self, PublishingError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Create publishing config from an arbitrary variable source
    pub fn from_vars<F>(var: F) -> Result<Self, PublishingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider = var("PUBLISHING_PROVIDER").unwrap_or_else(|| "youtube".to_string());
        let upload_base_url = var("YOUTUBE_UPLOAD_BASE_URL")
            .unwrap_or_else(|| "https://www.googleapis.com/upload/youtube/v3".to_string());
        let timeout_secs = match var("PUBLISHING_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                PublishingError::Configuration(format!(
                    "PUBLISHING_TIMEOUT_SECS is not a number: {raw}"
                ))
            })?,
            None => 3600,
        };

        Ok(Self {
            provider,
            upload_base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Third-party upload API
#[async_trait::async_trait]
pub trait PublishingProvider: Send + Sync {
    /// Upload the media with the given options. May run for a long time.
    async fn insert_video(
        &self,
        options: &UploadOptions,
        media: MediaBody,
        progress: Option<ProgressCallback>,
    ) -> Result<VideoResource, PublishingError>;
}

/// Factory for creating PublishingProvider implementations
pub struct PublishingProviderFactory;

impl PublishingProviderFactory {
    /// Create a provider acting on behalf of the owner of `access_token`.
    pub fn create(
        config: PublishingConfig,
        access_token: String,
    ) -> Result<Box<dyn PublishingProvider>, PublishingError> {
        match config.provider.as_str() {
            "youtube" => {
                tracing::info!("Creating YouTube publishing provider");
                Ok(Box::new(youtube::YoutubeClient::new(config, access_token)?))
            }
            "mock" => {
                tracing::info!("Creating mock publishing provider");
                Ok(Box::new(mock::MockPublishingProvider::new()))
            }
            provider => Err(PublishingError::Configuration(format!(
                "Unknown publishing provider: {}. Supported providers: youtube, mock",
                provider
            ))),
        }
    }
}
