use async_trait::async_trait;
use uuid::Uuid;
use std::borrow::Cow;

use crate::{
    entities::user::{UpdateUserRequest, User, UserInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxUserRepo,
};

const USER_COLUMNS: &str =
    "id, email, name, username, address_line1, city, country, created_at, updated_at";

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn create_user(&self, user: &UserInsert) -> Result<Uuid, AppError>;
    async fn get_user_by_id(&self, id: &Uuid) -> Result<Option<User>, AppError>;
    async fn user_exists(&self, id: &Uuid) -> Result<bool, AppError>;
    async fn update_profile(
        &self,
        id: &Uuid,
        update: &UpdateUserRequest,
    ) -> Result<Option<User>, AppError>;
    async fn list_users(&self) -> Result<Vec<User>, AppError>;
    /// Identifiers of the albums owned by a user, newest-created first.
    async fn album_ids(&self, user_id: &Uuid) -> Result<Vec<Uuid>, AppError>;
}

impl SqlxUserRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxUserRepo { pool }
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepo {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn create_user(&self, user: &UserInsert) -> Result<Uuid, AppError> {
        sqlx::query_scalar::<_, Uuid>(
            r#"INSERT INTO users (email, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4) RETURNING id"#,
        )
        .bind(&user.email)
        .bind(&user.name)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.code() == Some(Cow::Borrowed("23505")) => {
                AppError::Conflict("User with this email already exists".to_string())
            }
            _ => AppError::from(e),
        })
    }

    async fn get_user_by_id(&self, id: &Uuid) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn user_exists(&self, id: &Uuid) -> Result<bool, AppError> {
        let exists: Option<bool> =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::from)?;

        Ok(exists.unwrap_or(false))
    }

    async fn update_profile(
        &self,
        id: &Uuid,
        update: &UpdateUserRequest,
    ) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(&format!(
            r#"UPDATE users
            SET name = $2, username = $3, address_line1 = $4, country = $5, city = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}"#,
        ))
        .bind(id)
        .bind(&update.name)
        .bind(&update.user_name)
        .bind(&update.address_line1)
        .bind(&update.country)
        .bind(&update.city)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.code() == Some(Cow::Borrowed("23505")) => {
                AppError::Conflict("Username is already taken".to_string())
            }
            _ => AppError::from(e),
        })
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn album_ids(&self, user_id: &Uuid) -> Result<Vec<Uuid>, AppError> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM albums WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)
    }
}
