use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use uuid::Uuid;

use crate::{entities::token::Claims, errors::AuthError, AppState};

/// Extractor resolving the caller's identity from the bearer credential.
/// Missing and invalid tokens both reject with 401; a token whose subject
/// is not a valid identifier rejects with 400 before any query runs.
/// Usage: add `auth: AuthUser` as a parameter to your handler function.
#[derive(Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub claims: Claims,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(resolve_identity(req))
    }
}

fn resolve_identity(req: &HttpRequest) -> Result<AuthUser, actix_web::Error> {
    let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        tracing::error!("AppState missing while resolving identity");
        actix_web::Error::from(AuthError::MissingTokenService)
    })?;

    let token = bearer_token(req).ok_or_else(|| {
        tracing::warn!("Missing or malformed Authorization header");
        actix_web::Error::from(AuthError::MissingCredentials)
    })?;

    let decoded = state
        .user_handler
        .token_service
        .decode_jwt(&token)
        .map_err(|e| {
            tracing::warn!("Token rejected: {}", e);
            actix_web::Error::from(e)
        })?;

    let user_id = Uuid::parse_str(&decoded.claims.sub)
        .map_err(|_| actix_web::Error::from(AuthError::InvalidUserId))?;

    Ok(AuthUser {
        user_id,
        claims: decoded.claims,
    })
}

pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| {
            let parts: Vec<&str> = header.split_whitespace().collect();
            if parts.len() == 2 && parts[0].eq_ignore_ascii_case("bearer") {
                Some(parts[1].to_string())
            } else {
                None
            }
        })
}

/// Same-origin credential used by the logout route.
pub fn cookie_token(req: &HttpRequest) -> Option<String> {
    req.cookie("auth_token").map(|c| c.value().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn bearer_token_accepts_case_insensitive_scheme() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "bearer abc.def.ghi"))
            .to_http_request();
        assert_eq!(bearer_token(&req).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn bearer_token_rejects_other_schemes_and_shapes() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_http_request();
        assert!(bearer_token(&req).is_none());

        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer"))
            .to_http_request();
        assert!(bearer_token(&req).is_none());

        let req = TestRequest::default().to_http_request();
        assert!(bearer_token(&req).is_none());
    }
}
