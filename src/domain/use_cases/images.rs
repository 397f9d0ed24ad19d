use std::path::Path;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::entities::image::{ImageInsert, ImageResponse, RenameImageRequest, UpdatedImage};
use crate::errors::AppError;
use crate::ownership::{ensure_image_owner, owns_album};
use crate::repositories::album::AlbumRepository;
use crate::repositories::image::ImageRepository;
use crate::storage::local::{validate_image_file, ImageStore};
use crate::utils::valid_uuid::valid_uuid;

pub struct ImageHandler<I, A, S>
where
    I: ImageRepository,
    A: AlbumRepository,
    S: ImageStore,
{
    pub image_repo: I,
    pub album_repo: A,
    pub store: S,
}

impl<I, A, S> ImageHandler<I, A, S>
where
    I: ImageRepository,
    A: AlbumRepository,
    S: ImageStore,
{
    pub fn new(image_repo: I, album_repo: A, store: S) -> Self {
        ImageHandler {
            image_repo,
            album_repo,
            store,
        }
    }

    /// Validates and stores the uploaded file, then records it against the
    /// caller's album. The file is saved before the row is written; a row
    /// failure leaves the stored file behind.
    pub async fn upload_image(
        &self,
        user_id: &Uuid,
        album_id: &str,
        original_name: Option<&str>,
        temp_path: &Path,
    ) -> Result<ImageResponse, AppError> {
        let album_id = valid_uuid(album_id)?;

        // A foreign album reports the same as a missing one here.
        let album = match self.album_repo.get_album_by_id(&album_id).await? {
            Some(album) if owns_album(&album, user_id) => album,
            _ => {
                return Err(AppError::NotFound(
                    "Album not found or does not belong to the user".into(),
                ));
            }
        };

        let Some(original) = original_name else {
            return Err(AppError::InvalidInput("An image file is required".into()));
        };
        validate_image_file(Some(original), temp_path).await?;

        let stored = self.store.save(temp_path, original).await?;

        let insert = ImageInsert {
            file_name: Some(stored.file_name.clone()),
            file_path: stored.public_path,
            album_id: album.id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let id = self.image_repo.create_image(&insert).await?;
        let image = self
            .image_repo
            .get_image_by_id(&id)
            .await?
            .ok_or_else(|| AppError::InternalError("Uploaded image could not be reloaded".into()))?;

        tracing::info!(image_id = %image.id, album_id = %album.id, "Image uploaded");

        Ok(ImageResponse::from(image))
    }

    /// All images across the caller's albums, newest first. A caller with
    /// no albums gets an empty list, not an error.
    pub async fn user_images(&self, user_id: &Uuid) -> Result<Vec<ImageResponse>, AppError> {
        let album_ids = self.album_repo.album_ids_for_user(user_id).await?;
        if album_ids.is_empty() {
            return Ok(Vec::new());
        }

        let images = self.image_repo.images_in_albums(&album_ids).await?;
        Ok(images.into_iter().map(ImageResponse::from).collect())
    }

    /// Renames an image's display name; ownership goes through the parent
    /// album.
    pub async fn rename_image(
        &self,
        user_id: &Uuid,
        image_id: &str,
        request: RenameImageRequest,
    ) -> Result<UpdatedImage, AppError> {
        let image_id = valid_uuid(image_id)?;
        request.validate()?;

        let image = self
            .image_repo
            .get_image_by_id(&image_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Image not found".into()))?;

        let album = self.album_repo.get_album_by_id(&image.album_id).await?;
        ensure_image_owner(album.as_ref(), user_id)?;

        let updated = self
            .image_repo
            .update_image_name(&image_id, &request.name)
            .await?
            .ok_or_else(|| AppError::NotFound("Image not found".into()))?;

        Ok(UpdatedImage::from(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::album::{Album, AlbumInsert};
    use crate::entities::image::Image;
    use crate::storage::local::StoredImage;
    use mockall::mock;
    use mockall::predicate::*;
    use std::path::PathBuf;

    mock! {
        pub ImageRepo {}

        #[async_trait::async_trait]
        impl ImageRepository for ImageRepo {
            async fn create_image(&self, image: &ImageInsert) -> Result<Uuid, AppError>;
            async fn get_image_by_id(&self, id: &Uuid) -> Result<Option<Image>, AppError>;
            async fn update_image_name(&self, id: &Uuid, name: &str) -> Result<Option<Image>, AppError>;
            async fn images_in_albums(&self, album_ids: &[Uuid]) -> Result<Vec<Image>, AppError>;
        }
    }

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
        pub Store {}

        #[async_trait::async_trait]
        impl ImageStore for Store {
            async fn save(&self, src: &Path, original_name: &str) -> Result<StoredImage, AppError>;
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

    fn image_in_album(album_id: Uuid) -> Image {
        Image {
            id: Uuid::new_v4(),
            file_name: Some("old.png".into()),
            file_path: "/uploads/old.png".into(),
            album_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn upload_into_a_foreign_album_reports_not_found() {
        let image_repo = MockImageRepo::new();
        let mut album_repo = MockAlbumRepo::new();
        let mut store = MockStore::new();
        let album = album_owned_by(Uuid::new_v4());
        let album_id = album.id;

        album_repo
            .expect_get_album_by_id()
            .returning(move |_| Ok(Some(album.clone())));
        store.expect_save().never();

        let handler = ImageHandler::new(image_repo, album_repo, store);
        let result = handler
            .upload_image(
                &Uuid::new_v4(),
                &album_id.to_string(),
                Some("pic.png"),
                &PathBuf::from("/tmp/nonexistent"),
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn upload_rejects_a_disallowed_extension_before_storing() {
        let mut image_repo = MockImageRepo::new();
        let mut album_repo = MockAlbumRepo::new();
        let mut store = MockStore::new();
        let owner = Uuid::new_v4();
        let album = album_owned_by(owner);
        let album_id = album.id;

        album_repo
            .expect_get_album_by_id()
            .returning(move |_| Ok(Some(album.clone())));
        store.expect_save().never();
        image_repo.expect_create_image().never();

        let handler = ImageHandler::new(image_repo, album_repo, store);
        let result = handler
            .upload_image(
                &owner,
                &album_id.to_string(),
                Some("anim.gif"),
                &PathBuf::from("/tmp/nonexistent"),
            )
            .await;

        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn user_images_is_empty_when_the_caller_owns_no_albums() {
        let mut image_repo = MockImageRepo::new();
        let mut album_repo = MockAlbumRepo::new();
        let store = MockStore::new();

        album_repo
            .expect_album_ids_for_user()
            .returning(|_| Ok(vec![]));
        image_repo.expect_images_in_albums().never();

        let handler = ImageHandler::new(image_repo, album_repo, store);
        let images = handler.user_images(&Uuid::new_v4()).await.unwrap();
        assert!(images.is_empty());
    }

    #[tokio::test]
    async fn rename_by_a_non_owner_is_forbidden_and_changes_nothing() {
        let mut image_repo = MockImageRepo::new();
        let mut album_repo = MockAlbumRepo::new();
        let store = MockStore::new();
        let album = album_owned_by(Uuid::new_v4());
        let image = image_in_album(album.id);
        let image_id = image.id;

        image_repo
            .expect_get_image_by_id()
            .returning(move |_| Ok(Some(image.clone())));
        album_repo
            .expect_get_album_by_id()
            .returning(move |_| Ok(Some(album.clone())));
        image_repo.expect_update_image_name().never();

        let handler = ImageHandler::new(image_repo, album_repo, store);
        let result = handler
            .rename_image(
                &Uuid::new_v4(),
                &image_id.to_string(),
                RenameImageRequest {
                    name: "mine now".into(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::ForbiddenAccess(_))));
    }

    #[tokio::test]
    async fn rename_by_the_owner_updates_only_the_name() {
        let mut image_repo = MockImageRepo::new();
        let mut album_repo = MockAlbumRepo::new();
        let store = MockStore::new();
        let owner = Uuid::new_v4();
        let album = album_owned_by(owner);
        let image = image_in_album(album.id);
        let image_id = image.id;
        let renamed = Image {
            file_name: Some("sunset.png".into()),
            ..image.clone()
        };

        image_repo
            .expect_get_image_by_id()
            .returning(move |_| Ok(Some(image.clone())));
        album_repo
            .expect_get_album_by_id()
            .returning(move |_| Ok(Some(album.clone())));
        image_repo
            .expect_update_image_name()
            .with(eq(image_id), eq("sunset.png"))
            .returning(move |_, _| Ok(Some(renamed.clone())));

        let handler = ImageHandler::new(image_repo, album_repo, store);
        let updated = handler
            .rename_image(
                &owner,
                &image_id.to_string(),
                RenameImageRequest {
                    name: "sunset.png".into(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "sunset.png");
        assert_eq!(updated.file_path, "/uploads/old.png");
    }

    #[tokio::test]
    async fn rename_of_a_missing_image_reports_not_found() {
        let mut image_repo = MockImageRepo::new();
        let album_repo = MockAlbumRepo::new();
        let store = MockStore::new();

        image_repo.expect_get_image_by_id().returning(|_| Ok(None));

        let handler = ImageHandler::new(image_repo, album_repo, store);
        let result = handler
            .rename_image(
                &Uuid::new_v4(),
                &Uuid::new_v4().to_string(),
                RenameImageRequest { name: "x".into() },
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
