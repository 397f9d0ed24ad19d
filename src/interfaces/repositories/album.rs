use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::album::{Album, AlbumInsert},
    entities::image::Image,
    errors::AppError,
    repositories::sqlx_repo::SqlxAlbumRepo,
};

const ALBUM_COLUMNS: &str = "id, title, description, user_id, created_at, updated_at";
const IMAGE_COLUMNS: &str = "id, file_name, file_path, album_id, created_at, updated_at";

#[async_trait]
pub trait AlbumRepository: Send + Sync {
    async fn create_album(&self, album: &AlbumInsert) -> Result<Uuid, AppError>;
    async fn get_album_by_id(&self, id: &Uuid) -> Result<Option<Album>, AppError>;
    /// Partial update: a `None` field keeps the stored value.
    async fn update_album(
        &self,
        id: &Uuid,
        title: Option<String>,
        description: Option<String>,
    ) -> Result<Option<Album>, AppError>;
    async fn albums_for_user(&self, user_id: &Uuid) -> Result<Vec<Album>, AppError>;
    async fn album_ids_for_user(&self, user_id: &Uuid) -> Result<Vec<Uuid>, AppError>;
    /// Identifiers of an album's images in insertion order.
    async fn image_ids(&self, album_id: &Uuid) -> Result<Vec<Uuid>, AppError>;
    /// An album's image collection expanded to full records, insertion order.
    async fn images_for_album(&self, album_id: &Uuid) -> Result<Vec<Image>, AppError>;
}

impl SqlxAlbumRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxAlbumRepo { pool }
    }
}

#[async_trait]
impl AlbumRepository for SqlxAlbumRepo {
    async fn create_album(&self, album: &AlbumInsert) -> Result<Uuid, AppError> {
        sqlx::query_scalar::<_, Uuid>(
            r#"INSERT INTO albums (title, description, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5) RETURNING id"#,
        )
        .bind(&album.title)
        .bind(&album.description)
        .bind(album.user_id)
        .bind(album.created_at)
        .bind(album.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn get_album_by_id(&self, id: &Uuid) -> Result<Option<Album>, AppError> {
        sqlx::query_as::<_, Album>(&format!(
            "SELECT {ALBUM_COLUMNS} FROM albums WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn update_album(
        &self,
        id: &Uuid,
        title: Option<String>,
        description: Option<String>,
    ) -> Result<Option<Album>, AppError> {
        sqlx::query_as::<_, Album>(&format!(
            r#"UPDATE albums
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {ALBUM_COLUMNS}"#,
        ))
        .bind(id)
        .bind(title)
        .bind(description)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn albums_for_user(&self, user_id: &Uuid) -> Result<Vec<Album>, AppError> {
        sqlx::query_as::<_, Album>(&format!(
            "SELECT {ALBUM_COLUMNS} FROM albums WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn album_ids_for_user(&self, user_id: &Uuid) -> Result<Vec<Uuid>, AppError> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM albums WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn image_ids(&self, album_id: &Uuid) -> Result<Vec<Uuid>, AppError> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM images WHERE album_id = $1 ORDER BY created_at ASC",
        )
        .bind(album_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn images_for_album(&self, album_id: &Uuid) -> Result<Vec<Image>, AppError> {
        sqlx::query_as::<_, Image>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM images WHERE album_id = $1 ORDER BY created_at ASC"
        ))
        .bind(album_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }
}
