//! Media studio composition root
//!
//! Builds the metadata stores and service clients from configuration and
//! exposes the two orchestration entry points to the CRUD layer.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Router;
use sqlx::PgPool;
use studio_assets::{Asset, AssetDeletionCoordinator, AssetRepository, AssetStore, DeleteAsset};
use studio_common::Config;
use studio_distributions::{
    source_file_path, upload_options, DistributionError, DistributionRepository,
    DistributionStore, DistributionUploadWorker, UploadOutcome, UploadOverrides,
};
use studio_publishing::{PublishingConfig, PublishingProviderFactory};
use studio_runner::{RunnerConfig, RunnerService, RunnerServiceFactory};
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Wired services shared by the request handlers
#[derive(Clone)]
pub struct Studio {
    config: Config,
    publishing: PublishingConfig,
    runner: Arc<dyn RunnerService>,
    distributions: Arc<dyn DistributionStore>,
    deletion: AssetDeletionCoordinator,
}

impl Studio {
    /// Assemble from already constructed stores and runner
    pub fn new(
        config: Config,
        publishing: PublishingConfig,
        runner: Arc<dyn RunnerService>,
        assets: Arc<dyn AssetStore>,
        distributions: Arc<dyn DistributionStore>,
    ) -> Self {
        let deletion = AssetDeletionCoordinator::new(assets, runner.clone());
        Self {
            config,
            publishing,
            runner,
            distributions,
            deletion,
        }
    }

    /// Build Postgres-backed stores and the configured runner client.
    ///
    /// Mock providers are refused: a mock runner lets deletions drop metadata
    /// without removing any file, and a mock publisher records fake uploads.
    pub fn from_pool(
        config: Config,
        runner: RunnerConfig,
        publishing: PublishingConfig,
        pool: PgPool,
    ) -> anyhow::Result<Self> {
        if runner.provider == "mock" {
            anyhow::bail!("RUNNER_PROVIDER=mock cannot be used to serve the studio");
        }
        if publishing.provider == "mock" {
            anyhow::bail!("PUBLISHING_PROVIDER=mock cannot be used to serve the studio");
        }

        let runner: Arc<dyn RunnerService> = Arc::from(RunnerServiceFactory::create(runner)?);
        Ok(Self::new(
            config,
            publishing,
            runner,
            Arc::new(AssetRepository::new(pool.clone())),
            Arc::new(DistributionRepository::new(pool)),
        ))
    }

    /// Fail fast when the runner cannot be reached
    pub async fn check_runner(&self) -> anyhow::Result<()> {
        self.runner
            .status()
            .await
            .map_err(|e| anyhow::anyhow!("Runner is not reachable: {}", e))
    }

    pub async fn delete_asset(&self, request: &DeleteAsset) -> studio_common::Result<()> {
        Ok(self.deletion.delete(request).await?)
    }

    /// Start publishing `asset` for a queued distribution.
    ///
    /// Returns as soon as the upload is running; its progress is only visible
    /// through the distribution record.
    pub fn publish(
        &self,
        distribution_id: Uuid,
        asset: &Asset,
        overrides: UploadOverrides,
        access_token: String,
    ) -> studio_common::Result<JoinHandle<UploadOutcome>> {
        let options = upload_options(asset, overrides)?;
        let source = source_file_path(&self.config.media_node_root, asset)?;

        let provider = PublishingProviderFactory::create(self.publishing.clone(), access_token)
            .map_err(DistributionError::ProviderUnavailable)?;
        let worker = DistributionUploadWorker::new(self.distributions.clone(), Arc::from(provider));

        tracing::info!(
            distribution_id = %distribution_id,
            asset_id = %asset.id,
            "Publishing asset"
        );
        Ok(worker.spawn(distribution_id, options, source))
    }
}

/// Create the router for operational endpoints
pub fn create_app(studio: Studio) -> Router {
    Router::new()
        .route("/health", axum::routing::get(health_check))
        .route(
            "/",
            axum::routing::get(|| async { "Media Studio core v0.0.1-SNAPSHOT" }),
        )
        .with_state(studio)
}

/// Health check endpoint; reports the runner as a dependency
async fn health_check(State(studio): State<Studio>) -> (StatusCode, &'static str) {
    match studio.runner.status().await {
        Ok(()) => (StatusCode::OK, "OK"),
        Err(e) => {
            tracing::warn!(error = %e, "Runner health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "runner unavailable")
        }
    }
}
