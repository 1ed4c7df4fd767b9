//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod auth;
pub mod reports;
pub mod subscriptions;

// Re-export all handlers for use in router
pub use auth::*;
pub use reports::*;
pub use subscriptions::*;

use axum::Json;

/// Root endpoint - a friendly liveness check
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Welcome to the Billow API"
    }))
}
