//! YouTube Data API v3 client
//!
//! Uses the resumable upload protocol:
//! 1. `POST {upload_base_url}/videos?uploadType=resumable&part=...` with the
//!    metadata, answered with a session URI in `Location`
//! 2. `PUT {session_uri}` with the media stream, answered with the video resource

use reqwest::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
use std::time::Duration;
use tokio_stream::StreamExt;
use tokio_util::io::ReaderStream;

use crate::{
    MediaBody, ProgressCallback, PublishingConfig, PublishingError, PublishingProvider,
    UploadOptions, UploadProgress, VideoResource,
};

pub struct YoutubeClient {
    http: reqwest::Client,
    upload_base_url: String,
    access_token: String,
    timeout: Duration,
}

impl std::fmt::Debug for YoutubeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YoutubeClient")
            .field("upload_base_url", &self.upload_base_url)
            .field("access_token", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl YoutubeClient {
    pub fn new(config: PublishingConfig, access_token: String) -> Result<Self, PublishingError> {
        if access_token.is_empty() {
            return Err(PublishingError::Configuration(
                "An OAuth access token is required for the YouTube provider".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PublishingError::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            upload_base_url: config.upload_base_url.trim_end_matches('/').to_string(),
            access_token,
            timeout: config.timeout,
        })
    }

    fn map_send_error(&self, error: reqwest::Error) -> PublishingError {
        if error.is_timeout() {
            PublishingError::Timeout(self.timeout)
        } else {
            PublishingError::Request(error.to_string())
        }
    }

    async fn error_from_response(response: reqwest::Response) -> PublishingError {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response body".to_string());
        PublishingError::Response(format!("YouTube API returned {}: {}", status, body))
    }

    /// Open a resumable upload session and return its URI
    async fn start_session(
        &self,
        options: &UploadOptions,
        content_length: u64,
    ) -> Result<String, PublishingError> {
        let url = format!("{}/videos", self.upload_base_url);
        let parts = options.parts();

        let response = self
            .http
            .post(&url)
            .query(&[("uploadType", "resumable"), ("part", parts.as_str())])
            .header(AUTHORIZATION, format!("Bearer {}", self.access_token))
            .header("X-Upload-Content-Type", options.mime_type.as_str())
            .header("X-Upload-Content-Length", content_length.to_string())
            .json(options)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| {
                PublishingError::Response(
                    "YouTube API did not return an upload session URI".to_string(),
                )
            })
    }
}

#[async_trait::async_trait]
impl PublishingProvider for YoutubeClient {
    async fn insert_video(
        &self,
        options: &UploadOptions,
        media: MediaBody,
        progress: Option<ProgressCallback>,
    ) -> Result<VideoResource, PublishingError> {
        let total_bytes = media.content_length;
        let session_uri = self.start_session(options, total_bytes).await?;
        tracing::debug!(total_bytes, "YouTube upload session opened");

        let mut bytes_sent = 0u64;
        let stream = ReaderStream::new(media.file).map(move |chunk| {
            if let Ok(bytes) = &chunk {
                bytes_sent += bytes.len() as u64;
                if let Some(report) = &progress {
                    report(UploadProgress {
                        bytes_sent,
                        total_bytes,
                    });
                }
            }
            chunk
        });

        let response = self
            .http
            .put(&session_uri)
            .header(AUTHORIZATION, format!("Bearer {}", self.access_token))
            .header(CONTENT_TYPE, options.mime_type.as_str())
            .header(CONTENT_LENGTH, total_bytes)
            .body(reqwest::Body::wrap_stream(stream))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        response
            .json::<VideoResource>()
            .await
            .map_err(|e| PublishingError::Response(e.to_string()))
    }
}
