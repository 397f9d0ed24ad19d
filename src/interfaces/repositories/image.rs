use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::image::{Image, ImageInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxImageRepo,
};

const IMAGE_COLUMNS: &str = "id, file_name, file_path, album_id, created_at, updated_at";

#[async_trait]
pub trait ImageRepository: Send + Sync {
    async fn create_image(&self, image: &ImageInsert) -> Result<Uuid, AppError>;
    async fn get_image_by_id(&self, id: &Uuid) -> Result<Option<Image>, AppError>;
    /// Updates only the display name.
    async fn update_image_name(&self, id: &Uuid, name: &str) -> Result<Option<Image>, AppError>;
    /// All images whose album is among `album_ids`, newest first.
    async fn images_in_albums(&self, album_ids: &[Uuid]) -> Result<Vec<Image>, AppError>;
}

impl SqlxImageRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxImageRepo { pool }
    }
}

#[async_trait]
impl ImageRepository for SqlxImageRepo {
    async fn create_image(&self, image: &ImageInsert) -> Result<Uuid, AppError> {
        sqlx::query_scalar::<_, Uuid>(
            r#"INSERT INTO images (file_name, file_path, album_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5) RETURNING id"#,
        )
        .bind(&image.file_name)
        .bind(&image.file_path)
        .bind(image.album_id)
        .bind(image.created_at)
        .bind(image.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn get_image_by_id(&self, id: &Uuid) -> Result<Option<Image>, AppError> {
        sqlx::query_as::<_, Image>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM images WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn update_image_name(&self, id: &Uuid, name: &str) -> Result<Option<Image>, AppError> {
        sqlx::query_as::<_, Image>(&format!(
            r#"UPDATE images SET file_name = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {IMAGE_COLUMNS}"#,
        ))
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn images_in_albums(&self, album_ids: &[Uuid]) -> Result<Vec<Image>, AppError> {
        sqlx::query_as::<_, Image>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM images WHERE album_id = ANY($1) ORDER BY created_at DESC"
        ))
        .bind(album_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }
}
