//! Auth request/response types shared with the backend
//!
//! Back-office login lives under `/loguin/auth/*`; storefront accounts
//! authenticate against `/api/clientes/*`.

use serde::{Deserialize, Serialize};

use crate::models::{Cliente, Usuario};

// =============================================================================
// Back-office auth DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(alias = "usuario")]
    pub user: Usuario,
}

/// Back-office registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub nombre: String,
    pub rol: crate::models::Rol,
}

/// Password reset request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Password reset answer: the backend hands back the reset link/token
/// so the client can deliver it by e-mail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordResponse {
    #[serde(default)]
    pub reset_token: Option<String>,
    #[serde(default)]
    pub reset_url: Option<String>,
    #[serde(default)]
    pub nombre: Option<String>,
}

// =============================================================================
// Storefront account DTOs
// =============================================================================

/// Storefront login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClienteLoginRequest {
    pub email: String,
    pub password: String,
}

/// Storefront login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClienteLoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    pub cliente: Cliente,
}

/// Google account profile kept in `googleUser`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleUser {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    #[serde(default)]
    pub photo_url: Option<String>,
}
