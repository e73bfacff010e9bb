//! Asset repository

use crate::domain::entities::{Asset, AssetFiles};
use crate::repository::AssetStore;
use sqlx::PgPool;
use studio_common::RepositoryError;
use uuid::Uuid;

const ASSET_COLUMNS: &str = "id, media_space, added_by, name, description, tags, asset_type, \
                             is_default_asset, file, created_at, updated_at";

#[derive(Clone)]
pub struct AssetRepository {
    pool: PgPool,
}

impl AssetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new asset
    pub async fn create(&self, asset: &Asset) -> Result<Asset, RepositoryError> {
        let query = format!(
            r#"
            INSERT INTO assets ({ASSET_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {ASSET_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, Asset>(&query)
            .bind(asset.id)
            .bind(asset.media_space)
            .bind(asset.added_by)
            .bind(&asset.name)
            .bind(&asset.description)
            .bind(&asset.tags)
            .bind(asset.asset_type)
            .bind(asset.is_default_asset)
            .bind(&asset.file)
            .bind(asset.created_at)
            .bind(asset.updated_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }
}

#[async_trait::async_trait]
impl AssetStore for AssetRepository {
    async fn find_files(
        &self,
        id: Uuid,
        media_space: Uuid,
    ) -> Result<Option<AssetFiles>, RepositoryError> {
        let row = sqlx::query_as::<_, AssetFiles>(
            r#"
            SELECT id, media_space, file
            FROM assets WHERE id = $1 AND media_space = $2
            "#,
        )
        .bind(id)
        .bind(media_space)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find(&self, id: Uuid, media_space: Uuid) -> Result<Option<Asset>, RepositoryError> {
        let query =
            format!("SELECT {ASSET_COLUMNS} FROM assets WHERE id = $1 AND media_space = $2");
        let row = sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .bind(media_space)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_for_teardown(&self, media_space: Uuid) -> Result<Vec<Uuid>, RepositoryError> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT id FROM assets
            WHERE media_space = $1 AND is_default_asset = FALSE
            ORDER BY created_at ASC
            "#,
        )
        .bind(media_space)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
