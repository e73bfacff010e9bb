//! Asset distribution repository

use crate::domain::entities::{AssetDistribution, DistributionStatus, YoutubeVideo};
use crate::repository::DistributionStore;
use sqlx::types::Json;
use sqlx::PgPool;
use studio_common::RepositoryError;
use uuid::Uuid;

const DISTRIBUTION_COLUMNS: &str =
    "id, asset_id, user_id, social_media, status, youtube, created_at, updated_at";

#[derive(Clone)]
pub struct DistributionRepository {
    pool: PgPool,
}

impl DistributionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new distribution
    pub async fn create(
        &self,
        distribution: &AssetDistribution,
    ) -> Result<AssetDistribution, RepositoryError> {
        let query = format!(
            r#"
            INSERT INTO asset_distributions ({DISTRIBUTION_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {DISTRIBUTION_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, AssetDistribution>(&query)
            .bind(distribution.id)
            .bind(distribution.asset_id)
            .bind(distribution.user_id)
            .bind(distribution.social_media)
            .bind(distribution.status)
            .bind(&distribution.youtube)
            .bind(distribution.created_at)
            .bind(distribution.updated_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    /// List distributions of an asset, newest first
    pub async fn list_for_asset(
        &self,
        asset_id: Uuid,
    ) -> Result<Vec<AssetDistribution>, RepositoryError> {
        let query = format!(
            "SELECT {DISTRIBUTION_COLUMNS} FROM asset_distributions \
             WHERE asset_id = $1 ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, AssetDistribution>(&query)
            .bind(asset_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

#[async_trait::async_trait]
impl DistributionStore for DistributionRepository {
    async fn find(&self, id: Uuid) -> Result<Option<AssetDistribution>, RepositoryError> {
        let query = format!("SELECT {DISTRIBUTION_COLUMNS} FROM asset_distributions WHERE id = $1");
        let row = sqlx::query_as::<_, AssetDistribution>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_status(
        &self,
        id: Uuid,
        from: DistributionStatus,
        to: DistributionStatus,
        youtube: Option<YoutubeVideo>,
    ) -> Result<Option<AssetDistribution>, RepositoryError> {
        let query = format!(
            r#"
            UPDATE asset_distributions SET
                status = $3, youtube = $4, updated_at = NOW()
            WHERE id = $1 AND status = $2
            RETURNING {DISTRIBUTION_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, AssetDistribution>(&query)
            .bind(id)
            .bind(from)
            .bind(to)
            .bind(youtube.map(Json))
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}
