//! Coordinated asset deletion over the HTTP runner client

use std::time::Duration;

use serde_json::json;
use studio_assets::{ArtifactSelection, DeleteAsset, DeletionError, StoreOperation};
use uuid::Uuid;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{downloaded_video, pending_video, DeletionTestApp};

#[test_log::test(tokio::test)]
async fn test_downloaded_asset_cleans_runner_before_metadata() {
    let app = DeletionTestApp::new().await.unwrap();
    let space = Uuid::new_v4();
    let user = Uuid::new_v4();
    let asset = downloaded_video(space);
    let id = asset.id;
    app.store.insert(asset);

    Mock::given(method("POST"))
        .and(path(format!("/runner/users/{}/assets/{}/delete", user, id)))
        .and(body_json(json!({"sourcePath": "/d/v.mp4", "encodedPath": "/e"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&app.runner)
        .await;

    app.coordinator
        .delete(&DeleteAsset::new(id, space, user))
        .await
        .unwrap();

    assert!(!app.store.contains(id));
    app.runner.verify().await;
}

#[test_log::test(tokio::test)]
async fn test_pending_asset_never_reaches_runner() {
    let app = DeletionTestApp::new().await.unwrap();
    let space = Uuid::new_v4();
    let asset = pending_video(space);
    let id = asset.id;
    app.store.insert(asset);

    app.coordinator
        .delete(&DeleteAsset::new(id, space, Uuid::new_v4()))
        .await
        .unwrap();

    assert_eq!(app.runner_calls().await, 0);
    assert!(!app.store.contains(id));
}

#[test_log::test(tokio::test)]
async fn test_runner_error_preserves_metadata() {
    let app = DeletionTestApp::new().await.unwrap();
    let space = Uuid::new_v4();
    let asset = downloaded_video(space);
    let id = asset.id;
    app.store.insert(asset);

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("disk busy"))
        .mount(&app.runner)
        .await;

    let err = app
        .coordinator
        .delete(&DeleteAsset::new(id, space, Uuid::new_v4()))
        .await
        .unwrap_err();

    assert!(matches!(err, DeletionError::RemoteCleanupFailed(_)));
    assert_eq!(err.code().to_string(), "asset.requestRunnerFailed");
    assert!(app.store.contains(id));
}

#[test_log::test(tokio::test)]
async fn test_runner_timeout_preserves_metadata() {
    let app = DeletionTestApp::with_timeout(Duration::from_millis(100))
        .await
        .unwrap();
    let space = Uuid::new_v4();
    let asset = downloaded_video(space);
    let id = asset.id;
    app.store.insert(asset);

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&app.runner)
        .await;

    let err = app
        .coordinator
        .delete(&DeleteAsset::new(id, space, Uuid::new_v4()))
        .await
        .unwrap_err();

    assert!(matches!(err, DeletionError::RemoteCleanupFailed(_)));
    assert!(app.store.contains(id));
}

#[test_log::test(tokio::test)]
async fn test_encoded_only_selection() {
    let app = DeletionTestApp::new().await.unwrap();
    let space = Uuid::new_v4();
    let user = Uuid::new_v4();
    let asset = downloaded_video(space);
    let id = asset.id;
    app.store.insert(asset);

    Mock::given(method("POST"))
        .and(body_json(json!({"encodedPath": "/e"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.runner)
        .await;

    let request = DeleteAsset::new(id, space, user).with_selection(ArtifactSelection {
        source: false,
        encoded: true,
    });
    app.coordinator.delete(&request).await.unwrap();

    app.runner.verify().await;
}

#[test_log::test(tokio::test)]
async fn test_metadata_delete_failure_is_reported() {
    let app = DeletionTestApp::new().await.unwrap();
    let space = Uuid::new_v4();
    let asset = pending_video(space);
    let id = asset.id;
    app.store.insert(asset);
    app.store.fail_on(StoreOperation::Delete);

    let err = app
        .coordinator
        .delete(&DeleteAsset::new(id, space, Uuid::new_v4()))
        .await
        .unwrap_err();

    assert_eq!(err.code().to_string(), "asset.deleteAssetFailed");
    let common: studio_common::Error = err.into();
    assert_eq!(common.status_code().as_u16(), 500);
}

#[test_log::test(tokio::test)]
async fn test_media_space_teardown_stops_on_runner_failure() {
    let app = DeletionTestApp::new().await.unwrap();
    let space = Uuid::new_v4();
    let pending = pending_video(space);
    let pending_id = pending.id;
    let downloaded = downloaded_video(space);
    let downloaded_id = downloaded.id;
    let later = pending_video(space);
    let later_id = later.id;
    app.store.insert(pending);
    app.store.insert(downloaded);
    app.store.insert(later);

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&app.runner)
        .await;

    let err = app
        .coordinator
        .delete_all_for_tenant(space, Uuid::new_v4())
        .await
        .unwrap_err();

    assert_eq!(err.code().to_string(), "asset.deleteAssetFailed");
    assert!(!app.store.contains(pending_id));
    assert!(app.store.contains(downloaded_id));
    assert!(app.store.contains(later_id));
}
