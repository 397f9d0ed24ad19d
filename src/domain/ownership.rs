use uuid::Uuid;

use crate::entities::album::Album;
use crate::errors::AppError;

/// Decides whether a resolved identity may act on an album. Pure, no store
/// access: the album must already be loaded.
pub fn ensure_album_owner(album: &Album, user_id: &Uuid) -> Result<(), AppError> {
    if owns_album(album, user_id) {
        Ok(())
    } else {
        Err(AppError::ForbiddenAccess(
            "You can only modify your own album".to_string(),
        ))
    }
}

/// Image mutation authorizes through the image's parent album. A missing
/// parent reads as a denial, not an internal fault.
pub fn ensure_image_owner(parent_album: Option<&Album>, user_id: &Uuid) -> Result<(), AppError> {
    match parent_album {
        Some(album) if owns_album(album, user_id) => Ok(()),
        _ => Err(AppError::ForbiddenAccess(
            "You do not own this image".to_string(),
        )),
    }
}

pub fn owns_album(album: &Album, user_id: &Uuid) -> bool {
    album.user_id == *user_id
}
