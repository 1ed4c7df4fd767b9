//! Subscription CRUD handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use billow_core::models::{NewSubscription, Subscription};

use crate::{AppError, AppState, AuthUser, SuccessResponse};

fn validated(fields: &NewSubscription) -> Result<(), AppError> {
    fields
        .validate()
        .map_err(|e| AppError::unprocessable(&e.to_string()))
}

/// GET /api/subscriptions - List the caller's subscriptions
pub async fn list_subscriptions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Subscription>>, AppError> {
    let subscriptions = state.db.list_subscriptions(user.user_id)?;
    Ok(Json(subscriptions))
}

/// GET /api/subscriptions/:id - Fetch a single subscription
pub async fn get_subscription(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<Subscription>, AppError> {
    let subscription = state
        .db
        .get_subscription(user.user_id, id)?
        .ok_or_else(|| AppError::not_found(&format!("Subscription {} not found", id)))?;
    Ok(Json(subscription))
}

/// POST /api/subscriptions - Create a subscription
pub async fn create_subscription(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(fields): Json<NewSubscription>,
) -> Result<Json<Subscription>, AppError> {
    validated(&fields)?;
    let subscription = state.db.create_subscription(user.user_id, &fields)?;
    Ok(Json(subscription))
}

/// PUT /api/subscriptions/:id - Full replace of the mutable fields
pub async fn update_subscription(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(fields): Json<NewSubscription>,
) -> Result<Json<Subscription>, AppError> {
    validated(&fields)?;
    let subscription = state
        .db
        .update_subscription(user.user_id, id, &fields)?
        .ok_or_else(|| AppError::not_found(&format!("Subscription {} not found", id)))?;
    Ok(Json(subscription))
}

/// DELETE /api/subscriptions/:id - Delete a subscription
pub async fn delete_subscription(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    if !state.db.delete_subscription(user.user_id, id)? {
        return Err(AppError::not_found(&format!(
            "Subscription {} not found",
            id
        )));
    }
    Ok(Json(SuccessResponse { success: true }))
}
