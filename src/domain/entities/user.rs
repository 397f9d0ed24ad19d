use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use validator::Validate;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub username: Option<String>,
    pub address_line1: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct UserInsert {
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/user`. Identity bootstraps from the email alone.
#[derive(Debug, Deserialize, Validate)]
pub struct NewUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub name: Option<String>,
}

impl NewUserRequest {
    pub fn prepare_for_insert(&self) -> UserInsert {
        UserInsert {
            email: self.email.clone(),
            name: self.name.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

/// Body of `PUT /api/user`. Profile updates are full, not partial.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Username is required"))]
    pub user_name: String,

    #[validate(length(min = 1, message = "Address line is required"))]
    pub address_line1: String,

    #[validate(length(min = 1, message = "Country is required"))]
    pub country: String,

    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub user_name: Option<String>,
    pub address_line1: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub albums: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl UserResponse {
    pub fn from_user(user: User, albums: Vec<Uuid>) -> Self {
        UserResponse {
            id: user.id,
            email: user.email,
            name: user.name,
            user_name: user.username,
            address_line1: user.address_line1,
            city: user.city,
            country: user.country,
            albums,
            created_at: user.created_at,
        }
    }
}

/// Listing shape for `GET /api/user/all-users`; album references are omitted.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub user_name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        PublicUser {
            id: user.id,
            email: user.email,
            name: user.name,
            user_name: user.username,
            city: user.city,
            country: user.country,
            created_at: user.created_at,
        }
    }
}
