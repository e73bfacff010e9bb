//! Domain entities for the Distributions domain

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use studio_publishing::{PrivacyStatus, VideoResource};
use uuid::Uuid;

use crate::domain::state::DistributionState;

/// Distribution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "distribution_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DistributionStatus {
    #[default]
    InQueue,
    InProgress,
    Completed,
    Failed,
}

impl DistributionStatus {
    /// Convert to state machine state
    pub fn to_state(&self) -> DistributionState {
        match self {
            DistributionStatus::InQueue => DistributionState::InQueue,
            DistributionStatus::InProgress => DistributionState::InProgress,
            DistributionStatus::Completed => DistributionState::Completed,
            DistributionStatus::Failed => DistributionState::Failed,
        }
    }
}

impl std::fmt::Display for DistributionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistributionStatus::InQueue => write!(f, "IN_QUEUE"),
            DistributionStatus::InProgress => write!(f, "IN_PROGRESS"),
            DistributionStatus::Completed => write!(f, "COMPLETED"),
            DistributionStatus::Failed => write!(f, "FAILED"),
        }
    }
}

/// Target platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "social_media", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SocialMedia {
    Twitter,
    Instagram,
    Youtube,
}

/// Result of a completed YouTube upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YoutubeVideo {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<serde_json::Value>,
    pub privacy_status: Option<PrivacyStatus>,
    pub channel_id: Option<String>,
}

impl YoutubeVideo {
    /// Build the stored payload from a provider response. `None` when the
    /// response carries no video id.
    pub fn from_resource(resource: &VideoResource) -> Option<Self> {
        let id = resource.id.clone().filter(|id| !id.is_empty())?;
        let snippet = resource.snippet.clone().unwrap_or_default();
        Some(Self {
            id,
            title: snippet.title,
            description: snippet.description,
            thumbnail: snippet.thumbnails,
            privacy_status: resource.status.as_ref().and_then(|s| s.privacy_status),
            channel_id: snippet.channel_id,
        })
    }
}

/// Asset distribution entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AssetDistribution {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub user_id: Uuid,
    pub social_media: SocialMedia,
    pub status: DistributionStatus,
    pub youtube: Option<Json<YoutubeVideo>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AssetDistribution {
    /// Create a queued distribution
    pub fn new(asset_id: Uuid, user_id: Uuid, social_media: SocialMedia) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            asset_id,
            user_id,
            social_media,
            status: DistributionStatus::InQueue,
            youtube: None,
            created_at: now,
            updated_at: now,
        }
    }
}
