//! Upload options and source file resolution for an asset

use std::path::{Path, PathBuf};

use studio_assets::{Asset, AssetType};
use studio_publishing::{PrivacyStatus, UploadOptions, VideoSnippet, VideoStatusOptions};

use crate::domain::errors::DistributionError;

const DEFAULT_TITLE: &str = "Uploaded From Media Node Studio";

/// Caller-provided values; anything left empty falls back to the asset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadOverrides {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub default_language: Option<String>,
    pub category_id: Option<String>,
    pub privacy_status: Option<PrivacyStatus>,
    pub made_for_kids: Option<bool>,
    pub localizations: Option<serde_json::Value>,
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}

fn media_type(asset: &Asset) -> Result<&'static str, DistributionError> {
    match asset.asset_type {
        AssetType::Video => Ok("video/mp4"),
        AssetType::Image => Ok("image/jpeg"),
        AssetType::Audio => Err(DistributionError::AssetNotReady(asset.id)),
    }
}

/// Build provider options for publishing `asset`.
pub fn upload_options(
    asset: &Asset,
    overrides: UploadOverrides,
) -> Result<UploadOptions, DistributionError> {
    let mime_type = media_type(asset)?;

    let title = non_empty(overrides.title.as_ref())
        .or_else(|| non_empty(asset.name.as_ref()))
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let description = non_empty(overrides.description.as_ref())
        .or_else(|| non_empty(asset.description.as_ref()));
    let tags = if overrides.tags.is_empty() {
        asset.tags.clone()
    } else {
        overrides.tags
    };

    Ok(UploadOptions {
        snippet: VideoSnippet {
            title,
            description,
            tags,
            default_language: overrides.default_language,
            category_id: overrides.category_id,
        },
        status: overrides.privacy_status.map(|privacy_status| VideoStatusOptions {
            privacy_status,
            made_for_kids: overrides.made_for_kids,
        }),
        localizations: overrides.localizations,
        mime_type: mime_type.to_string(),
    })
}

/// Location of the downloaded source of `asset` under the media node root:
/// `{root}/media-node-data/sources/{download.path}/{name}`.
///
/// Videos use `file.name`, images the name recorded by the download.
pub fn source_file_path(root: &Path, asset: &Asset) -> Result<PathBuf, DistributionError> {
    let file = &asset.file.0;
    if !file.has_downloaded_source() {
        return Err(DistributionError::AssetNotReady(asset.id));
    }

    let name = match asset.asset_type {
        AssetType::Video => file.name.as_ref(),
        AssetType::Image => file.download.name.as_ref(),
        AssetType::Audio => None,
    };

    match (&file.download.path, name) {
        (Some(dir), Some(name)) => Ok(root
            .join("media-node-data/sources")
            .join(dir.trim_start_matches('/'))
            .join(name.trim_start_matches('/'))),
        _ => Err(DistributionError::AssetNotReady(asset.id)),
    }
}
