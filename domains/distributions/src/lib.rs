//! Distributions domain: publishing assets to external platforms
//!
//! An `AssetDistribution` tracks one upload of one asset to one platform. Its
//! status only moves forward (`IN_QUEUE -> IN_PROGRESS -> COMPLETED | FAILED`)
//! and only through `DistributionStore::transition`.

pub mod domain;
pub mod repository;
pub mod service;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{AssetDistribution, DistributionStatus, SocialMedia, YoutubeVideo};
pub use domain::errors::DistributionError;
pub use domain::state::{DistributionState, DistributionStateMachine, StateError};

// Re-export repository types
pub use repository::memory::StoreFailure;
pub use repository::{DistributionRepository, DistributionStore, InMemoryDistributionStore};

// Re-export services
pub use service::options::{source_file_path, upload_options, UploadOverrides};
pub use service::upload::{DistributionUploadWorker, UploadOutcome};
