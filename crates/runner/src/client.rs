//! Runner HTTP Client Implementation
//!
//! Deletes asset files with `POST {base_url}/runner/users/{user_id}/assets/{asset_id}/delete`
//! and probes health with `GET {base_url}/status`.

use std::time::Duration;
use uuid::Uuid;

use crate::{DeleteFilesRequest, RunnerConfig, RunnerError, RunnerService, RunnerStatus};

/// Real runner HTTP client.
pub struct RunnerClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl RunnerClient {
    /// Create a new runner client from configuration.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RunnerError::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
        })
    }

    fn delete_url(&self, user_id: Uuid, asset_id: Uuid) -> String {
        format!(
            "{}/runner/users/{}/assets/{}/delete",
            self.base_url, user_id, asset_id
        )
    }

    fn map_send_error(&self, error: reqwest::Error) -> RunnerError {
        if error.is_timeout() {
            RunnerError::Timeout(self.timeout)
        } else {
            RunnerError::Request(error.to_string())
        }
    }
}

#[async_trait::async_trait]
impl RunnerService for RunnerClient {
    async fn delete_asset_files(
        &self,
        user_id: Uuid,
        asset_id: Uuid,
        request: &DeleteFilesRequest,
    ) -> Result<(), RunnerError> {
        let response = self
            .http
            .post(self.delete_url(user_id, asset_id))
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read response body".to_string());
            return Err(RunnerError::Response(format!(
                "Runner returned {}: {}",
                status, body
            )));
        }

        tracing::debug!(%user_id, %asset_id, "Runner deleted asset files");
        Ok(())
    }

    async fn status(&self) -> Result<(), RunnerError> {
        let response = self
            .http
            .get(format!("{}/status", self.base_url))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            return Err(RunnerError::Response(format!(
                "Runner status returned {}",
                response.status()
            )));
        }

        let status: RunnerStatus = response
            .json()
            .await
            .map_err(|e| RunnerError::Response(e.to_string()))?;

        if !status.success {
            return Err(RunnerError::Response(
                "Runner connection failed.".to_string(),
            ));
        }

        Ok(())
    }
}
