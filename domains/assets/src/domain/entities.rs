//! Domain entities for the Assets domain
//!
//! An asset is a stored media item. Its `file` sub-record describes where the
//! runner keeps the downloaded source and the encoded variant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

/// Asset media type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "asset_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Video,
    Audio,
    Image,
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetType::Video => write!(f, "video"),
            AssetType::Audio => write!(f, "audio"),
            AssetType::Image => write!(f, "image"),
        }
    }
}

/// Status of the source download on the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DownloadStatus {
    #[default]
    Pending,
    InQueue,
    InProgress,
    Error,
    Complete,
    NoSource,
}

/// Status of the encode job on the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EncodeStatus {
    #[default]
    Pending,
    InQueue,
    InProgress,
    Error,
    Complete,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadInfo {
    #[serde(default)]
    pub status: DownloadStatus,
    /// Directory of the source file on the runner
    pub path: Option<String>,
    /// File name of a downloaded image
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeInfo {
    #[serde(default)]
    pub status: EncodeStatus,
    /// Location of the encoded variant on the runner
    pub path: Option<String>,
}

/// File sub-record of an asset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetFile {
    #[serde(default)]
    pub download: DownloadInfo,
    #[serde(default)]
    pub encode: EncodeInfo,
    pub name: Option<String>,
    pub path: Option<String>,
    pub size: Option<i64>,
    #[serde(rename = "MIME_type")]
    pub mime_type: Option<String>,
}

impl AssetFile {
    /// A downloaded source implies a retrievable file on the runner
    pub fn has_downloaded_source(&self) -> bool {
        self.download.status == DownloadStatus::Complete
    }

    /// `{download.path}/{name}`, when both are known
    pub fn source_path(&self) -> Option<String> {
        match (&self.download.path, &self.name) {
            (Some(dir), Some(name)) => Some(format!("{}/{}", dir, name)),
            _ => None,
        }
    }

    pub fn encoded_path(&self) -> Option<&str> {
        self.encode.path.as_deref()
    }
}

/// Asset entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Asset {
    pub id: Uuid,
    pub media_space: Uuid,
    pub added_by: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub asset_type: AssetType,
    pub is_default_asset: bool,
    pub file: Json<AssetFile>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Asset {
    /// Create a new asset in a media space with an empty file record
    pub fn new(media_space: Uuid, asset_type: AssetType, name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            media_space,
            added_by: None,
            name,
            description: None,
            tags: Vec::new(),
            asset_type,
            is_default_asset: false,
            file: Json(AssetFile::default()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Projection used by the deletion flow
    pub fn files(&self) -> AssetFiles {
        AssetFiles {
            id: self.id,
            media_space: self.media_space,
            file: self.file.clone(),
        }
    }
}

/// Projection of an asset onto its identity and file sub-record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AssetFiles {
    pub id: Uuid,
    pub media_space: Uuid,
    pub file: Json<AssetFile>,
}
