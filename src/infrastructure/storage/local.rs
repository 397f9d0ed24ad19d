use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use infer::Infer;
use tokio::fs;

use crate::errors::AppError;
use crate::utils::file_name::{file_extension, sanitize_file_name};

pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;
const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];
const ALLOWED_MIME_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// Checks an uploaded image before any record is written: extension
/// allow-list, sniffed content type, and the 5MB size bound.
///
/// - `original_filename`: The filename from TempFile::file_name()
/// - `file_path`: The path from TempFile::file.path()
pub async fn validate_image_file(
    original_filename: Option<&str>,
    file_path: &Path,
) -> Result<(), AppError> {
    let Some(name) = original_filename else {
        return Err(AppError::InvalidInput("An image file is required".into()));
    };

    match file_extension(name) {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => {}
        _ => {
            return Err(AppError::InvalidInput(
                "Only JPEG, JPG, and PNG files are allowed".into(),
            ));
        }
    }

    let infer = Infer::new();
    match infer.get_from_path(file_path) {
        Ok(Some(kind)) if ALLOWED_MIME_TYPES.contains(&kind.mime_type()) => {}
        Ok(Some(kind)) => {
            return Err(AppError::InvalidInput(format!(
                "Unsupported image type: {}",
                kind.mime_type()
            )));
        }
        Ok(None) => {
            return Err(AppError::InvalidInput(
                "Could not determine the uploaded file type".into(),
            ));
        }
        Err(e) => {
            return Err(AppError::InternalError(format!(
                "File type detection failed: {}",
                e
            )));
        }
    }

    let metadata = fs::metadata(file_path).await?;
    if metadata.len() == 0 {
        return Err(AppError::InvalidInput("An image file is required".into()));
    }
    if metadata.len() > MAX_IMAGE_BYTES {
        return Err(AppError::InvalidInput(
            "Image exceeds the 5MB size limit".into(),
        ));
    }

    Ok(())
}

#[derive(Debug, Clone)]
pub struct StoredImage {
    pub file_name: String,
    pub public_path: String,
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persists the uploaded bytes and returns the stored name plus the
    /// public path the record will reference.
    async fn save(&self, src: &Path, original_name: &str) -> Result<StoredImage, AppError>;
}

/// Filesystem store: files land under `root` and are served back under
/// `public_prefix` by the static file service.
#[derive(Clone)]
pub struct LocalImageStore {
    root: PathBuf,
    public_prefix: String,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        LocalImageStore {
            root: root.into(),
            public_prefix: public_prefix.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn ensure_root(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn save(&self, src: &Path, original_name: &str) -> Result<StoredImage, AppError> {
        let stored_name = format!(
            "{}-{}",
            Utc::now().timestamp_millis(),
            sanitize_file_name(original_name)
        );
        let dest = self.root.join(&stored_name);

        fs::copy(src, &dest).await?;

        let public_path = format!(
            "{}/{}",
            self.public_prefix.trim_end_matches('/'),
            stored_name
        );

        Ok(StoredImage {
            file_name: stored_name,
            public_path,
        })
    }
}
