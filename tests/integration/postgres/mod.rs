//! Postgres-backed stores
//!
//! Need a migrated database: set `TEST_DATABASE_URL` and run with `--ignored`.

use std::sync::Arc;

use studio_assets::{AssetDeletionCoordinator, AssetRepository, AssetStore, DeleteAsset};
use studio_distributions::{
    AssetDistribution, DistributionError, DistributionRepository, DistributionStatus,
    DistributionStore, SocialMedia, YoutubeVideo,
};
use studio_runner::mock::MockRunnerService;
use uuid::Uuid;

use crate::common::{downloaded_video, pending_video, test_pool};

#[test_log::test(tokio::test)]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_asset_repository_scopes_and_deletes() {
    let pool = test_pool().await.unwrap();
    let repo = AssetRepository::new(pool);
    let space = Uuid::new_v4();
    let asset = repo.create(&downloaded_video(space)).await.unwrap();

    let files = repo.find_files(asset.id, space).await.unwrap().unwrap();
    assert_eq!(files.file.0.source_path().as_deref(), Some("/d/v.mp4"));
    assert!(repo
        .find_files(asset.id, Uuid::new_v4())
        .await
        .unwrap()
        .is_none());

    assert_eq!(repo.list_for_teardown(space).await.unwrap(), vec![asset.id]);
    assert!(repo.delete(asset.id).await.unwrap());
    assert!(!repo.delete(asset.id).await.unwrap());
}

#[test_log::test(tokio::test)]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_coordinator_over_postgres() {
    let pool = test_pool().await.unwrap();
    let repo = AssetRepository::new(pool);
    let runner = MockRunnerService::new();
    let coordinator =
        AssetDeletionCoordinator::new(Arc::new(repo.clone()), Arc::new(runner.clone()));
    let space = Uuid::new_v4();
    let asset = repo.create(&pending_video(space)).await.unwrap();

    coordinator
        .delete(&DeleteAsset::new(asset.id, space, Uuid::new_v4()))
        .await
        .unwrap();

    assert!(runner.recorded_requests().is_empty());
    assert!(repo.find(asset.id, space).await.unwrap().is_none());
}

#[test_log::test(tokio::test)]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_distribution_transitions_are_conditional() {
    let pool = test_pool().await.unwrap();
    let assets = AssetRepository::new(pool.clone());
    let repo = DistributionRepository::new(pool);
    let asset = assets.create(&downloaded_video(Uuid::new_v4())).await.unwrap();
    let distribution = repo
        .create(&AssetDistribution::new(
            asset.id,
            Uuid::new_v4(),
            SocialMedia::Youtube,
        ))
        .await
        .unwrap();
    let id = distribution.id;

    repo.transition(
        id,
        DistributionStatus::InQueue,
        DistributionStatus::InProgress,
        None,
    )
    .await
    .unwrap();

    let second_claim = repo
        .transition(
            id,
            DistributionStatus::InQueue,
            DistributionStatus::InProgress,
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(
        second_claim,
        DistributionError::DistributionNotFound(_)
    ));

    let completed = repo
        .transition(
            id,
            DistributionStatus::InProgress,
            DistributionStatus::Completed,
            Some(YoutubeVideo {
                id: "yt1".to_string(),
                title: Some("T".to_string()),
                description: None,
                thumbnail: None,
                privacy_status: None,
                channel_id: Some("C".to_string()),
            }),
        )
        .await
        .unwrap();
    assert_eq!(completed.status, DistributionStatus::Completed);

    let stored = repo.find(id).await.unwrap().unwrap();
    assert_eq!(stored.youtube.unwrap().0.channel_id.as_deref(), Some("C"));
    assert_eq!(repo.list_for_asset(asset.id).await.unwrap().len(), 1);
}
