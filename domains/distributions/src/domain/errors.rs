//! Distribution errors

use studio_common::{Error, ErrorCode, RepositoryError};
use studio_publishing::PublishingError;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::state::StateError;

pub mod codes {
    use studio_common::ErrorCode;

    const MODULE: &str = "asset_distribution";

    pub const UPDATE_ASSET_DISTRIBUTION_FAILED: ErrorCode =
        ErrorCode::new(MODULE, "updateAssetDistributionFailed");
    pub const ASSET_DISTRIBUTION_NOT_FOUND: ErrorCode =
        ErrorCode::new(MODULE, "assetDistributionNotFound");
    pub const CREATE_PUBLISHING_PROVIDER_FAILED: ErrorCode =
        ErrorCode::new(MODULE, "createPublishingProviderFailed");
}

#[derive(Debug, Error)]
pub enum DistributionError {
    #[error("Error occurred while updating the asset distribution.")]
    StatusUpdateFailed(#[source] RepositoryError),

    #[error("Asset distribution {0} does not exist.")]
    DistributionNotFound(Uuid),

    #[error("Asset distribution cannot change status: {0}")]
    InvalidTransition(#[from] StateError),

    /// The asset has no downloaded media that could be published
    #[error("Asset does not exist.")]
    AssetNotReady(Uuid),

    #[error("Publishing provider could not be created: {0}")]
    ProviderUnavailable(#[source] PublishingError),
}

impl DistributionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            DistributionError::StatusUpdateFailed(_) | DistributionError::InvalidTransition(_) => {
                codes::UPDATE_ASSET_DISTRIBUTION_FAILED
            }
            DistributionError::DistributionNotFound(_) => codes::ASSET_DISTRIBUTION_NOT_FOUND,
            DistributionError::AssetNotReady(_) => {
                studio_assets::domain::errors::codes::ASSET_DOES_NOT_EXIST
            }
            DistributionError::ProviderUnavailable(_) => codes::CREATE_PUBLISHING_PROVIDER_FAILED,
        }
    }
}

impl From<DistributionError> for Error {
    fn from(err: DistributionError) -> Self {
        let code = err.code();
        let message = err.to_string();
        match err {
            DistributionError::DistributionNotFound(_) | DistributionError::AssetNotReady(_) => {
                Error::NotFound { code, message }
            }
            _ => Error::Internal { code, message },
        }
    }
}
