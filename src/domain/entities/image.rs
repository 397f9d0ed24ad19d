use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use validator::Validate;
use uuid::Uuid;
use actix_multipart::form::{tempfile::TempFile, MultipartForm};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Image {
    pub id: Uuid,
    pub file_name: Option<String>,
    pub file_path: String,
    pub album_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct ImageInsert {
    pub file_name: Option<String>,
    pub file_path: String,
    pub album_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Multipart body of `POST /api/images/upload-image/{id}`: a single `image` field.
#[derive(Debug, MultipartForm)]
pub struct ImageUploadForm {
    #[multipart(rename = "image", limit = "5MB")]
    pub image: TempFile,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RenameImageRequest {
    #[validate(length(min = 1, message = "New name is required"))]
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub id: Uuid,
    pub filename: Option<String>,
    pub file_path: String,
    pub album: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Image> for ImageResponse {
    fn from(image: Image) -> Self {
        ImageResponse {
            id: image.id,
            filename: image.file_name,
            file_path: image.file_path,
            album: image.album_id,
            created_at: image.created_at,
            updated_at: image.updated_at,
        }
    }
}

/// Shape returned by the rename endpoint under the `updatedImage` key.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedImage {
    pub id: Uuid,
    pub name: String,
    pub file_path: String,
    pub album: Uuid,
}

impl From<Image> for UpdatedImage {
    fn from(image: Image) -> Self {
        UpdatedImage {
            id: image.id,
            name: image.file_name.unwrap_or_default(),
            file_path: image.file_path,
            album: image.album_id,
        }
    }
}
