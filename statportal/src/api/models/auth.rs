//! API models for authentication endpoints.

use crate::api::models::users::UserResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Login request payload.
///
/// Fields are optional at the serde level so a missing field is a 400
/// validation error (checked in the handler), not a deserialization
/// rejection with a different shape.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Successful login response: the authenticated user plus their bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub user: UserResponse,
    pub token: String,
}

/// Acknowledgement for logout.
///
/// Tokens are stateless, so logout is client-side deletion; the endpoint
/// exists so clients have a uniform call to make.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}

/// Change password for the authenticated user.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Generic success acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthSuccessResponse {
    pub success: bool,
    pub message: String,
}
