use actix_web::{cookie::Cookie, web, HttpRequest, HttpResponse, Responder};

use crate::entities::user::{NewUserRequest, UpdateUserRequest};
use crate::use_cases::extractors::{cookie_token, AuthUser};
use crate::AppState;

const AUTH_COOKIE: &str = "auth_token";

/// Bootstraps identity from an email: resolves the existing user or
/// creates one, returning a token either way.
pub async fn create_user(
    state: web::Data<AppState>,
    body: web::Json<NewUserRequest>,
) -> impl Responder {
    match state.user_handler.register_user(body.into_inner()).await {
        Ok(registered) => {
            let cookie = Cookie::build(AUTH_COOKIE, registered.token.clone())
                .path("/")
                .http_only(true)
                .finish();
            let body = serde_json::json!({
                "user": registered.user,
                "token": registered.token
            });

            if registered.created {
                HttpResponse::Created().cookie(cookie).json(body)
            } else {
                HttpResponse::Ok().cookie(cookie).json(body)
            }
        }
        Err(e) => e.to_http_response(),
    }
}

pub async fn current_user(state: web::Data<AppState>, auth: AuthUser) -> impl Responder {
    match state.user_handler.current_user(&auth.user_id).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => e.to_http_response(),
    }
}

pub async fn update_user(
    state: web::Data<AppState>,
    auth: AuthUser,
    body: web::Json<UpdateUserRequest>,
) -> impl Responder {
    match state
        .user_handler
        .update_profile(&auth.user_id, body.into_inner())
        .await
    {
        Ok(user) => HttpResponse::Ok().json(serde_json::json!({
            "message": "User profile updated successfully",
            "user": user
        })),
        Err(e) => e.to_http_response(),
    }
}

pub async fn all_users(state: web::Data<AppState>) -> impl Responder {
    match state.user_handler.list_users().await {
        Ok(users) => HttpResponse::Ok().json(serde_json::json!({"users": users})),
        Err(e) => e.to_http_response(),
    }
}

/// Clears the session cookie. Verification is best-effort: the cookie is
/// removed whether or not it still decodes.
pub async fn logout(req: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    if let Some(token) = cookie_token(&req) {
        if let Err(e) = state.user_handler.token_service.decode_jwt(&token) {
            tracing::warn!("Logout with an invalid session cookie: {}", e);
        }
    }

    let mut cookie = Cookie::new(AUTH_COOKIE, "");
    cookie.set_path("/");
    cookie.make_removal();

    HttpResponse::Ok()
        .cookie(cookie)
        .json(serde_json::json!({"message": "Logged out successfully"}))
}
