use uuid::Uuid;
use validator::Validate;

use crate::entities::user::{NewUserRequest, PublicUser, UpdateUserRequest, UserResponse};
use crate::errors::AppError;
use crate::repositories::token::TokenService;
use crate::repositories::user::UserRepository;

pub struct RegisteredUser {
    pub user: UserResponse,
    pub token: String,
    pub created: bool,
}

pub struct UserHandler<R, T>
where
    R: UserRepository,
    T: TokenService,
{
    pub user_repo: R,
    pub token_service: T,
}

impl<R, T> UserHandler<R, T>
where
    R: UserRepository,
    T: TokenService,
{
    pub fn new(user_repo: R, token_service: T) -> Self {
        UserHandler {
            user_repo,
            token_service,
        }
    }

    /// Resolves or creates the identity for an email. Repeating the call
    /// with the same email never creates a second record; a fresh token is
    /// issued either way.
    pub async fn register_user(&self, request: NewUserRequest) -> Result<RegisteredUser, AppError> {
        request.validate()?;

        if let Some(existing) = self.user_repo.find_by_email(&request.email).await? {
            let token = self.token_service.create_jwt(&existing)?;
            let albums = self.user_repo.album_ids(&existing.id).await?;
            return Ok(RegisteredUser {
                user: UserResponse::from_user(existing, albums),
                token,
                created: false,
            });
        }

        let insert = request.prepare_for_insert();
        let id = match self.user_repo.create_user(&insert).await {
            Ok(id) => id,
            // Lost a concurrent create for the same email: resolve the winner.
            Err(AppError::Conflict(_)) => {
                let existing = self
                    .user_repo
                    .find_by_email(&request.email)
                    .await?
                    .ok_or_else(|| {
                        AppError::InternalError("User create conflicted but no record found".into())
                    })?;
                let token = self.token_service.create_jwt(&existing)?;
                let albums = self.user_repo.album_ids(&existing.id).await?;
                return Ok(RegisteredUser {
                    user: UserResponse::from_user(existing, albums),
                    token,
                    created: false,
                });
            }
            Err(e) => return Err(e),
        };

        let user = self
            .user_repo
            .get_user_by_id(&id)
            .await?
            .ok_or_else(|| AppError::InternalError("Created user could not be reloaded".into()))?;
        let token = self.token_service.create_jwt(&user)?;

        tracing::info!(user_id = %user.id, "New user created");

        Ok(RegisteredUser {
            user: UserResponse::from_user(user, Vec::new()),
            token,
            created: true,
        })
    }

    pub async fn current_user(&self, user_id: &Uuid) -> Result<UserResponse, AppError> {
        let user = self
            .user_repo
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;
        let albums = self.user_repo.album_ids(&user.id).await?;
        Ok(UserResponse::from_user(user, albums))
    }

    pub async fn update_profile(
        &self,
        user_id: &Uuid,
        request: UpdateUserRequest,
    ) -> Result<UserResponse, AppError> {
        request.validate()?;

        let user = self
            .user_repo
            .update_profile(user_id, &request)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))?;
        let albums = self.user_repo.album_ids(&user.id).await?;
        Ok(UserResponse::from_user(user, albums))
    }

    pub async fn list_users(&self) -> Result<Vec<PublicUser>, AppError> {
        let users = self.user_repo.list_users().await?;
        Ok(users.into_iter().map(PublicUser::from).collect())
    }
}
