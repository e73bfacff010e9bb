//! Assets domain: asset metadata and coordinated asset deletion

pub mod domain;
pub mod repository;
pub mod service;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{
    Asset, AssetFile, AssetFiles, AssetType, DownloadInfo, DownloadStatus, EncodeInfo,
    EncodeStatus,
};
pub use domain::errors::DeletionError;

// Re-export repository types
pub use repository::memory::StoreOperation;
pub use repository::{AssetRepository, AssetStore, InMemoryAssetStore};

// Re-export services
pub use service::deletion::{ArtifactSelection, AssetDeletionCoordinator, DeleteAsset};
