//! Account and session handlers

use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{auth, AppError, AppState, AuthUser};

/// Credentials for register/login
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Session token issued on successful register/login
#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub user_id: i64,
}

/// POST /api/register - Create an account and sign in
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CredentialsRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let email = body.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::unprocessable("a valid email is required"));
    }
    if body.password.is_empty() {
        return Err(AppError::unprocessable("a password is required"));
    }

    let password_hash = auth::hash_password(&body.password)?;
    let user_id = state
        .db
        .create_user(&email, &password_hash)?
        .ok_or_else(|| AppError::conflict("an account with this email already exists"))?;

    info!(user = %email, "account registered");

    let token = auth::issue_token(&state.config.jwt_secret, user_id, &email)?;
    Ok(Json(TokenResponse { token, user_id }))
}

/// POST /api/login - Exchange credentials for a session token
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CredentialsRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let email = body.email.trim().to_lowercase();

    let user = state
        .db
        .get_user_by_email(&email)?
        .filter(|u| auth::verify_password(&body.password, &u.password_hash))
        .ok_or_else(|| AppError::unauthorized("invalid email or password"))?;

    info!(user = %user.email, "login");

    let token = auth::issue_token(&state.config.jwt_secret, user.id, &user.email)?;
    Ok(Json(TokenResponse {
        token,
        user_id: user.id,
    }))
}

/// Response for the /api/me endpoint
#[derive(Serialize)]
pub struct MeResponse {
    pub user_id: i64,
    pub email: String,
}

/// GET /api/me - The currently authenticated user
pub async fn get_me(Extension(user): Extension<AuthUser>) -> Json<MeResponse> {
    Json(MeResponse {
        user_id: user.user_id,
        email: user.email,
    })
}
