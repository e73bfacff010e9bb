//! Runner Service
//!
//! Client for the remote processing service ("runner") that owns the source
//! and encoded files of every asset:
//! - HTTP client for production
//! - Programmable mock for testing and development
//! - Configurable provider, base URL and request timeout

pub mod client;
pub mod mock;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Runner configuration error: {0}")]
    Configuration(String),

    #[error("Runner request error: {0}")]
    Request(String),

    #[error("Runner request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Runner response error: {0}")]
    Response(String),
}

/// Files to remove for one asset. Absent paths are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFilesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoded_path: Option<String>,
}

impl DeleteFilesRequest {
    pub fn is_empty(&self) -> bool {
        self.source_path.is_none() && self.encoded_path.is_none()
    }
}

/// Body returned by `GET /status`
#[derive(Debug, Clone, Deserialize)]
pub struct RunnerStatus {
    #[serde(default)]
    pub success: bool,
}

/// Runner service configuration
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Runner provider (http, mock)
    pub provider: String,
    /// Base URL, e.g. `http://10.0.0.4:8090`
    pub base_url: String,
    /// Applied to every outbound request
    pub timeout: Duration,
}

impl RunnerConfig {
    /// Create runner config from environment variables
    pub fn from_env() -> Result<Self, RunnerError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Create runner config from an arbitrary variable source
    pub fn from_vars<F>(var: F) -> Result<Self, RunnerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider = var("RUNNER_PROVIDER").unwrap_or_else(|| "http".to_string());

        let base_url = match var("RUNNER_URL").filter(|url| !url.is_empty()) {
            Some(url) => url,
            None => match (var("RUNNER_IP"), var("RUNNER_PORT")) {
                (Some(ip), Some(port)) if !ip.is_empty() && !port.is_empty() => {
                    format!("http://{}:{}", ip, port)
                }
                _ => String::new(),
            },
        };

        let timeout_secs = match var("RUNNER_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                RunnerError::Configuration(format!("RUNNER_TIMEOUT_SECS is not a number: {raw}"))
            })?,
            None => 30,
        };

        if provider == "http" && base_url.is_empty() {
            return Err(RunnerError::Configuration(
                "RUNNER_URL or RUNNER_IP and RUNNER_PORT are required for http provider"
                    .to_string(),
            ));
        }

        Ok(Self {
            provider,
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Runner service trait for different implementations
#[async_trait::async_trait]
pub trait RunnerService: Send + Sync {
    /// Delete the given files of an asset. The runner addresses files
    /// through the namespace of the user who initiated the deletion.
    async fn delete_asset_files(
        &self,
        user_id: Uuid,
        asset_id: Uuid,
        request: &DeleteFilesRequest,
    ) -> Result<(), RunnerError>;

    /// Check that the runner is reachable and reports itself healthy.
    async fn status(&self) -> Result<(), RunnerError>;
}

/// Factory for creating RunnerService implementations
pub struct RunnerServiceFactory;

impl RunnerServiceFactory {
    pub fn create(config: RunnerConfig) -> Result<Box<dyn RunnerService>, RunnerError> {
        match config.provider.as_str() {
            "http" => {
                tracing::info!(base_url = %config.base_url, "Creating runner HTTP client");
                Ok(Box::new(client::RunnerClient::new(config)?))
            }
            "mock" => {
                tracing::info!("Creating mock runner service");
                Ok(Box::new(mock::MockRunnerService::new()))
            }
            provider => Err(RunnerError::Configuration(format!(
                "Unknown runner provider: {}. Supported providers: http, mock",
                provider
            ))),
        }
    }
}
