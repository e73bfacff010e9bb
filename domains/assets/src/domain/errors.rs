//! Asset deletion errors

use studio_common::{Error, ErrorCode, RepositoryError};
use studio_runner::RunnerError;
use thiserror::Error;
use uuid::Uuid;

pub mod codes {
    use studio_common::ErrorCode;

    const MODULE: &str = "asset";

    pub const FIND_ASSET_FAILED: ErrorCode = ErrorCode::new(MODULE, "findAssetFailed");
    pub const ASSET_DOES_NOT_EXIST: ErrorCode = ErrorCode::new(MODULE, "assetDoesNotExist");
    pub const REQUEST_RUNNER_FAILED: ErrorCode = ErrorCode::new(MODULE, "requestRunnerFailed");
    pub const DELETE_ASSET_FAILED: ErrorCode = ErrorCode::new(MODULE, "deleteAssetFailed");
}

#[derive(Debug, Error)]
pub enum DeletionError {
    #[error("Error occurred while finding the asset.")]
    MetadataLookupFailed(#[source] RepositoryError),

    #[error("Asset does not exist.")]
    AssetNotFound,

    #[error("Error occurred while requesting the runner.")]
    RemoteCleanupFailed(#[source] RunnerError),

    #[error("Error occurred while deleting the asset.")]
    MetadataDeleteFailed(#[source] RepositoryError),

    #[error("Error occurred while deleting the assets.")]
    TeardownFailed {
        asset_id: Uuid,
        #[source]
        source: Box<DeletionError>,
    },
}

impl DeletionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            DeletionError::MetadataLookupFailed(_) => codes::FIND_ASSET_FAILED,
            DeletionError::AssetNotFound => codes::ASSET_DOES_NOT_EXIST,
            DeletionError::RemoteCleanupFailed(_) => codes::REQUEST_RUNNER_FAILED,
            DeletionError::MetadataDeleteFailed(_) | DeletionError::TeardownFailed { .. } => {
                codes::DELETE_ASSET_FAILED
            }
        }
    }
}

impl From<DeletionError> for Error {
    fn from(err: DeletionError) -> Self {
        let code = err.code();
        let message = err.to_string();
        match err {
            DeletionError::AssetNotFound => Error::NotFound { code, message },
            DeletionError::RemoteCleanupFailed(_) => Error::Upstream { code, message },
            _ => Error::Internal { code, message },
        }
    }
}
