use actix_web::{web, HttpResponse, Responder};

use crate::entities::album::{NewAlbumRequest, UpdateAlbumRequest};
use crate::use_cases::extractors::AuthUser;
use crate::AppState;

pub async fn create_album(
    state: web::Data<AppState>,
    auth: AuthUser,
    body: web::Json<NewAlbumRequest>,
) -> impl Responder {
    match state
        .album_handler
        .create_album(&auth.user_id, body.into_inner())
        .await
    {
        Ok(album) => HttpResponse::Created().json(serde_json::json!({"album": album})),
        Err(e) => e.to_http_response(),
    }
}

pub async fn my_albums(state: web::Data<AppState>, auth: AuthUser) -> impl Responder {
    match state.album_handler.my_albums(&auth.user_id).await {
        Ok(albums) => HttpResponse::Ok().json(albums),
        Err(e) => e.to_http_response(),
    }
}

pub async fn update_album(
    state: web::Data<AppState>,
    auth: AuthUser,
    path: web::Path<String>,
    body: web::Json<UpdateAlbumRequest>,
) -> impl Responder {
    match state
        .album_handler
        .update_album(&auth.user_id, &path.into_inner(), body.into_inner())
        .await
    {
        Ok(album) => HttpResponse::Ok().json(serde_json::json!({"album": album})),
        Err(e) => e.to_http_response(),
    }
}

/// Public read: listing an album's images does not require ownership.
pub async fn album_images(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match state.album_handler.album_images(&path.into_inner()).await {
        Ok(images) => HttpResponse::Ok().json(images),
        Err(e) => e.to_http_response(),
    }
}
