use actix_multipart::form::MultipartForm;
use actix_web::{get, post, put, web, HttpResponse, Responder};

use crate::entities::image::{ImageUploadForm, RenameImageRequest};
use crate::use_cases::extractors::AuthUser;
use crate::AppState;

#[post("/upload-image/{id}")]
pub async fn upload_image(
    state: web::Data<AppState>,
    auth: AuthUser,
    path: web::Path<String>,
    form: MultipartForm<ImageUploadForm>,
) -> impl Responder {
    let album_id = path.into_inner();
    let upload = form.into_inner();
    let original_name = upload.image.file_name.clone();

    match state
        .image_handler
        .upload_image(
            &auth.user_id,
            &album_id,
            original_name.as_deref(),
            upload.image.file.path(),
        )
        .await
    {
        Ok(image) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Image uploaded successfully",
            "image": image
        })),
        Err(e) => e.to_http_response(),
    }
}

#[get("/user-images")]
pub async fn user_images(state: web::Data<AppState>, auth: AuthUser) -> impl Responder {
    match state.image_handler.user_images(&auth.user_id).await {
        Ok(images) => HttpResponse::Ok().json(images),
        Err(e) => e.to_http_response(),
    }
}

#[put("/update/{id}")]
pub async fn rename_image(
    state: web::Data<AppState>,
    auth: AuthUser,
    path: web::Path<String>,
    body: web::Json<RenameImageRequest>,
) -> impl Responder {
    match state
        .image_handler
        .rename_image(&auth.user_id, &path.into_inner(), body.into_inner())
        .await
    {
        Ok(updated) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": "Image name updated successfully",
            "updatedImage": updated
        })),
        Err(e) => e.to_http_response(),
    }
}
