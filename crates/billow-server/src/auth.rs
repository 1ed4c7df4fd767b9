//! Password hashing and session tokens
//!
//! Passwords are hashed with Argon2id at registration and verified at login.
//! Sessions are HS256 JWTs carrying the user id and email with a 24 hour
//! expiry; the token is opaque to clients.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Environment variable holding the token-signing secret
pub const SECRET_ENV: &str = "BILLOW_SECRET";

/// Fallback secret for local development only
const DEV_SECRET: &str = "billow-dev-secret-not-for-production";

/// Session token lifetime
const TOKEN_TTL_HOURS: i64 = 24;

/// JWT claims for a session token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: i64,
    pub email: String,
    /// Expiry as a Unix timestamp
    pub exp: i64,
}

/// Resolve the signing secret from the environment
///
/// Falls back to a well-known development secret when `BILLOW_SECRET` is
/// unset; the caller is expected to warn loudly in that case.
pub fn secret_from_env() -> (String, bool) {
    match std::env::var(SECRET_ENV) {
        Ok(secret) if !secret.is_empty() => (secret, true),
        _ => (DEV_SECRET.to_string(), false),
    }
}

/// Hash a password for storage
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

/// Check a password against a stored hash
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Issue a session token for a user
pub fn issue_token(secret: &str, user_id: i64, email: &str) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        exp: (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

/// Validate a session token, returning its claims
///
/// Expired, malformed, or wrongly-signed tokens all come back `None`; the
/// middleware turns that into a 401.
pub fn validate_token(secret: &str, token: &str) -> Option<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .ok()
}
