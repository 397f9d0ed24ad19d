use jsonwebtoken::TokenData;

use crate::entities::token::Claims;
use crate::entities::user::User;
use crate::errors::AuthError;

/// Seam between the use cases and the concrete token implementation.
/// Verification is stateless, so there is nothing async here.
pub trait TokenService: Send + Sync {
    fn create_jwt(&self, user: &User) -> Result<String, AuthError>;
    fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError>;
}
