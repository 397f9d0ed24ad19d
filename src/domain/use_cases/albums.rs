use uuid::Uuid;
use validator::Validate;

use crate::entities::album::{AlbumResponse, NewAlbumRequest, UpdateAlbumRequest};
use crate::entities::image::ImageResponse;
use crate::errors::AppError;
use crate::ownership::ensure_album_owner;
use crate::repositories::album::AlbumRepository;
use crate::repositories::user::UserRepository;
use crate::utils::valid_uuid::valid_uuid;

pub struct AlbumHandler<A, U>
where
    A: AlbumRepository,
    U: UserRepository,
{
    pub album_repo: A,
    pub user_repo: U,
}

impl<A, U> AlbumHandler<A, U>
where
    A: AlbumRepository,
    U: UserRepository,
{
    pub fn new(album_repo: A, user_repo: U) -> Self {
        AlbumHandler {
            album_repo,
            user_repo,
        }
    }

    /// Creates an album owned by the resolved identity, starting empty.
    pub async fn create_album(
        &self,
        user_id: &Uuid,
        request: NewAlbumRequest,
    ) -> Result<AlbumResponse, AppError> {
        request.validate()?;

        if !self.user_repo.user_exists(user_id).await? {
            return Err(AppError::NotFound("User not found".into()));
        }

        let insert = request.prepare_for_insert(*user_id);
        let id = self.album_repo.create_album(&insert).await?;
        let album = self
            .album_repo
            .get_album_by_id(&id)
            .await?
            .ok_or_else(|| AppError::InternalError("Created album could not be reloaded".into()))?;

        tracing::info!(album_id = %album.id, "Album created");

        Ok(AlbumResponse::from_album(album, Vec::new()))
    }

    /// Partial update of title/description, owner only.
    pub async fn update_album(
        &self,
        user_id: &Uuid,
        album_id: &str,
        request: UpdateAlbumRequest,
    ) -> Result<AlbumResponse, AppError> {
        let album_id = valid_uuid(album_id)?;
        request.validate()?;

        let album = self
            .album_repo
            .get_album_by_id(&album_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Album not found".into()))?;

        ensure_album_owner(&album, user_id)?;

        let updated = self
            .album_repo
            .update_album(&album_id, request.title.clone(), request.description.clone())
            .await?
            .ok_or_else(|| AppError::NotFound("Album not found".into()))?;

        let images = self.album_repo.image_ids(&album_id).await?;
        Ok(AlbumResponse::from_album(updated, images))
    }

    /// All albums owned by the caller, newest-created first.
    pub async fn my_albums(&self, user_id: &Uuid) -> Result<Vec<AlbumResponse>, AppError> {
        if !self.user_repo.user_exists(user_id).await? {
            return Err(AppError::NotFound("User not found".into()));
        }

        let albums = self.album_repo.albums_for_user(user_id).await?;
        let mut responses = Vec::with_capacity(albums.len());
        for album in albums {
            let images = self.album_repo.image_ids(&album.id).await?;
            responses.push(AlbumResponse::from_album(album, images));
        }
        Ok(responses)
    }

    /// An album's image collection expanded to full records. Deliberately
    /// not restricted to the owner (see DESIGN.md).
    pub async fn album_images(&self, album_id: &str) -> Result<Vec<ImageResponse>, AppError> {
        let album_id = valid_uuid(album_id)?;

        if self.album_repo.get_album_by_id(&album_id).await?.is_none() {
            return Err(AppError::NotFound("Album not found".into()));
        }

        let images = self.album_repo.images_for_album(&album_id).await?;
        Ok(images.into_iter().map(ImageResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::album::{Album, AlbumInsert};
    use crate::entities::image::Image;
    use crate::entities::user::{UpdateUserRequest, User, UserInsert};
    use chrono::Utc;
    use mockall::mock;
    use mockall::predicate::*;

    mock! {
        pub AlbumRepo {}

        #[async_trait::async_trait]
        impl AlbumRepository for AlbumRepo {
            async fn create_album(&self, album: &AlbumInsert) -> Result<Uuid, AppError>;
            async fn get_album_by_id(&self, id: &Uuid) -> Result<Option<Album>, AppError>;
            async fn update_album(&self, id: &Uuid, title: Option<String>, description: Option<String>) -> Result<Option<Album>, AppError>;
            async fn albums_for_user(&self, user_id: &Uuid) -> Result<Vec<Album>, AppError>;
            async fn album_ids_for_user(&self, user_id: &Uuid) -> Result<Vec<Uuid>, AppError>;
            async fn image_ids(&self, album_id: &Uuid) -> Result<Vec<Uuid>, AppError>;
            async fn images_for_album(&self, album_id: &Uuid) -> Result<Vec<Image>, AppError>;
        }
    }

    mock! {
        pub UserRepo {}

        #[async_trait::async_trait]
        impl UserRepository for UserRepo {
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
            async fn create_user(&self, user: &UserInsert) -> Result<Uuid, AppError>;
            async fn get_user_by_id(&self, id: &Uuid) -> Result<Option<User>, AppError>;
            async fn user_exists(&self, id: &Uuid) -> Result<bool, AppError>;
            async fn update_profile(&self, id: &Uuid, update: &UpdateUserRequest) -> Result<Option<User>, AppError>;
            async fn list_users(&self) -> Result<Vec<User>, AppError>;
            async fn album_ids(&self, user_id: &Uuid) -> Result<Vec<Uuid>, AppError>;
        }
    }

    fn album_owned_by(user_id: Uuid) -> Album {
        Album {
            id: Uuid::new_v4(),
            title: "Trip".into(),
            description: None,
            user_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn create_album_requires_an_existing_user() {
        let album_repo = MockAlbumRepo::new();
        let mut user_repo = MockUserRepo::new();

        user_repo.expect_user_exists().returning(|_| Ok(false));

        let handler = AlbumHandler::new(album_repo, user_repo);
        let result = handler
            .create_album(
                &Uuid::new_v4(),
                NewAlbumRequest {
                    title: "Trip".into(),
                    description: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn create_album_binds_the_owner_and_starts_empty() {
        let mut album_repo = MockAlbumRepo::new();
        let mut user_repo = MockUserRepo::new();
        let owner = Uuid::new_v4();
        let album = album_owned_by(owner);
        let album_id = album.id;

        user_repo.expect_user_exists().returning(|_| Ok(true));
        album_repo
            .expect_create_album()
            .withf(move |insert| insert.user_id == owner)
            .returning(move |_| Ok(album_id));
        album_repo
            .expect_get_album_by_id()
            .with(eq(album_id))
            .returning(move |_| Ok(Some(album.clone())));

        let handler = AlbumHandler::new(album_repo, user_repo);
        let response = handler
            .create_album(
                &owner,
                NewAlbumRequest {
                    title: "Trip".into(),
                    description: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(response.user, owner);
        assert!(response.images.is_empty());
    }

    #[tokio::test]
    async fn update_album_by_a_non_owner_is_forbidden() {
        let mut album_repo = MockAlbumRepo::new();
        let user_repo = MockUserRepo::new();
        let album = album_owned_by(Uuid::new_v4());
        let album_id = album.id;

        album_repo
            .expect_get_album_by_id()
            .returning(move |_| Ok(Some(album.clone())));
        album_repo.expect_update_album().never();

        let handler = AlbumHandler::new(album_repo, user_repo);
        let result = handler
            .update_album(
                &Uuid::new_v4(),
                &album_id.to_string(),
                UpdateAlbumRequest {
                    title: Some("Stolen".into()),
                    description: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::ForbiddenAccess(_))));
    }

    #[tokio::test]
    async fn update_album_rejects_a_malformed_identifier() {
        let album_repo = MockAlbumRepo::new();
        let user_repo = MockUserRepo::new();

        let handler = AlbumHandler::new(album_repo, user_repo);
        let result = handler
            .update_album(
                &Uuid::new_v4(),
                "not-a-uuid",
                UpdateAlbumRequest {
                    title: None,
                    description: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn update_album_passes_only_the_supplied_fields() {
        let mut album_repo = MockAlbumRepo::new();
        let user_repo = MockUserRepo::new();
        let owner = Uuid::new_v4();
        let album = album_owned_by(owner);
        let album_id = album.id;
        let updated = Album {
            title: "Renamed".into(),
            ..album.clone()
        };

        album_repo
            .expect_get_album_by_id()
            .returning(move |_| Ok(Some(album.clone())));
        album_repo
            .expect_update_album()
            .withf(|_, title, description| title.as_deref() == Some("Renamed") && description.is_none())
            .returning(move |_, _, _| Ok(Some(updated.clone())));
        album_repo.expect_image_ids().returning(|_| Ok(vec![]));

        let handler = AlbumHandler::new(album_repo, user_repo);
        let response = handler
            .update_album(
                &owner,
                &album_id.to_string(),
                UpdateAlbumRequest {
                    title: Some("Renamed".into()),
                    description: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(response.title, "Renamed");
    }

    #[tokio::test]
    async fn album_images_does_not_require_ownership() {
        let mut album_repo = MockAlbumRepo::new();
        let user_repo = MockUserRepo::new();
        let album = album_owned_by(Uuid::new_v4());
        let album_id = album.id;

        album_repo
            .expect_get_album_by_id()
            .returning(move |_| Ok(Some(album.clone())));
        album_repo
            .expect_images_for_album()
            .returning(|_| Ok(vec![]));

        let handler = AlbumHandler::new(album_repo, user_repo);
        let images = handler.album_images(&album_id.to_string()).await.unwrap();
        assert!(images.is_empty());
    }
}
