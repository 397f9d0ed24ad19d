use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use validator::Validate;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Album {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct AlbumInsert {
    pub title: String,
    pub description: Option<String>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewAlbumRequest {
    #[validate(length(min = 1, message = "Album title is required"))]
    pub title: String,

    pub description: Option<String>,
}

impl NewAlbumRequest {
    pub fn prepare_for_insert(&self, user_id: Uuid) -> AlbumInsert {
        AlbumInsert {
            title: self.title.clone(),
            description: self.description.clone(),
            user_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

/// Partial update: absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAlbumRequest {
    #[validate(length(min = 1, message = "Album title cannot be empty"))]
    pub title: Option<String>,

    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub user: Uuid,
    pub images: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AlbumResponse {
    pub fn from_album(album: Album, images: Vec<Uuid>) -> Self {
        AlbumResponse {
            id: album.id,
            title: album.title,
            description: album.description,
            user: album.user_id,
            images,
            created_at: album.created_at,
            updated_at: album.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_album_request_rejects_empty_title() {
        let request = NewAlbumRequest {
            title: "".into(),
            description: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn prepare_for_insert_binds_the_owner() {
        let owner = Uuid::new_v4();
        let request = NewAlbumRequest {
            title: "Trip".into(),
            description: Some("Summer".into()),
        };
        let insert = request.prepare_for_insert(owner);
        assert_eq!(insert.user_id, owner);
        assert_eq!(insert.title, "Trip");
    }

    #[test]
    fn update_request_accepts_absent_fields() {
        let request: UpdateAlbumRequest = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(request.validate().is_ok());
        assert!(request.title.is_none());
        assert!(request.description.is_none());
    }
}
