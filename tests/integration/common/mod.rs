//! Common fixtures for the lifecycle integration tests
//!
//! - Runner and YouTube clients pointed at wiremock servers
//! - In-memory stores seeded with assets and distributions
//! - Source files under a temporary media node root
//! - Test database setup for the Postgres store tests

use std::env;
use std::path::PathBuf;
use std::sync::{Arc, Once};
use std::time::Duration;

use anyhow::Result;
use sqlx::PgPool;
use studio_assets::{
    Asset, AssetDeletionCoordinator, AssetType, DownloadStatus, InMemoryAssetStore,
};
use studio_distributions::{
    AssetDistribution, DistributionUploadWorker, InMemoryDistributionStore, SocialMedia,
};
use studio_publishing::youtube::YoutubeClient;
use studio_publishing::PublishingConfig;
use studio_runner::client::RunnerClient;
use studio_runner::RunnerConfig;
use uuid::Uuid;
use wiremock::MockServer;

static INIT: Once = Once::new();

fn load_env() {
    INIT.call_once(|| {
        dotenvy::from_filename(".env.test").ok();
        dotenvy::dotenv().ok();
    });
}

/// Database URL for the Postgres store tests
pub fn database_url() -> Option<String> {
    load_env();
    env::var("TEST_DATABASE_URL")
        .or_else(|_| env::var("DATABASE_URL"))
        .ok()
}

/// Connect and migrate the test database
pub async fn test_pool() -> Result<PgPool> {
    let url = database_url().ok_or_else(|| anyhow::anyhow!("TEST_DATABASE_URL is not set"))?;
    let pool = PgPool::connect(&url).await?;
    sqlx::migrate!("../../migrations").run(&pool).await?;
    Ok(pool)
}

/// Deletion coordinator talking HTTP to a wiremock runner
pub struct DeletionTestApp {
    pub runner: MockServer,
    pub store: InMemoryAssetStore,
    pub coordinator: AssetDeletionCoordinator,
}

impl DeletionTestApp {
    pub async fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(5)).await
    }

    pub async fn with_timeout(timeout: Duration) -> Result<Self> {
        let runner = MockServer::start().await;
        let client = RunnerClient::new(RunnerConfig {
            provider: "http".to_string(),
            base_url: runner.uri(),
            timeout,
        })?;
        let store = InMemoryAssetStore::new();
        let coordinator = AssetDeletionCoordinator::new(Arc::new(store.clone()), Arc::new(client));
        Ok(Self {
            runner,
            store,
            coordinator,
        })
    }

    /// Number of requests the runner received
    pub async fn runner_calls(&self) -> usize {
        self.runner
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or_default()
    }
}

/// Upload worker streaming to a wiremock YouTube upload endpoint
pub struct UploadTestApp {
    pub youtube: MockServer,
    pub store: InMemoryDistributionStore,
    pub worker: DistributionUploadWorker,
    pub root: tempfile::TempDir,
}

impl UploadTestApp {
    pub async fn new() -> Result<Self> {
        let youtube = MockServer::start().await;
        let client = YoutubeClient::new(
            PublishingConfig {
                provider: "youtube".to_string(),
                upload_base_url: youtube.uri(),
                timeout: Duration::from_secs(5),
            },
            "test-access-token".to_string(),
        )?;
        let store = InMemoryDistributionStore::new();
        let worker = DistributionUploadWorker::new(Arc::new(store.clone()), Arc::new(client));
        Ok(Self {
            youtube,
            store,
            worker,
            root: tempfile::tempdir()?,
        })
    }

    /// Queue a distribution for `asset`
    pub fn queue(&self, asset: &Asset) -> Uuid {
        let distribution = AssetDistribution::new(asset.id, Uuid::new_v4(), SocialMedia::Youtube);
        let id = distribution.id;
        self.store.insert(distribution);
        id
    }

    /// Write the source file of `asset` under the media node root
    pub fn write_source(&self, asset: &Asset, contents: &[u8]) -> Result<PathBuf> {
        let path = studio_distributions::source_file_path(self.root.path(), asset)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, contents)?;
        Ok(path)
    }
}

/// A video whose source has been downloaded and encoded
pub fn downloaded_video(media_space: Uuid) -> Asset {
    let mut asset = Asset::new(media_space, AssetType::Video, Some("clip".to_string()));
    asset.file.0.download.status = DownloadStatus::Complete;
    asset.file.0.download.path = Some("/d".to_string());
    asset.file.0.name = Some("v.mp4".to_string());
    asset.file.0.encode.path = Some("/e".to_string());
    asset
}

/// A video still waiting for its download
pub fn pending_video(media_space: Uuid) -> Asset {
    let mut asset = downloaded_video(media_space);
    asset.file.0.download.status = DownloadStatus::Pending;
    asset
}
