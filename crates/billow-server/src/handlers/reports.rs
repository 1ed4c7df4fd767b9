//! Summary report handler
//!
//! Thin wrapper over the core aggregation and budget logic, so API clients
//! can fetch the dashboard numbers in one round trip.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use billow_core::{aggregate, budget, models::Subscription};

use crate::{AppError, AppState, AuthUser};

/// Query params for the summary report
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// Reference date for the upcoming window; defaults to the server's
    /// current calendar day
    pub today: Option<NaiveDate>,
    /// Budget ceiling to evaluate against, if any
    pub budget: Option<f64>,
}

/// Summary report response
#[derive(Serialize)]
pub struct SummaryResponse {
    pub today: NaiveDate,
    pub total_monthly: f64,
    pub total_yearly: f64,
    pub per_category: BTreeMap<String, f64>,
    pub upcoming: Vec<Subscription>,
    pub upcoming_due: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<budget::BudgetReport>,
}

/// GET /api/reports/summary - Aggregated dashboard numbers
pub async fn report_summary(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<SummaryResponse>, AppError> {
    if let Some(ceiling) = query.budget {
        if !ceiling.is_finite() || ceiling < 0.0 {
            return Err(AppError::bad_request("budget must be non-negative"));
        }
    }

    let records = state.db.list_subscriptions(user.user_id)?;
    // The aggregate itself takes an injected date; the HTTP edge is where
    // "now" is allowed to come from the clock
    let today = query.today.unwrap_or_else(|| Utc::now().date_naive());
    let summary = aggregate(&records, today);

    let total_yearly = summary.total_yearly();
    let upcoming_due = summary.upcoming_due();
    let budget_report = query
        .budget
        .map(|ceiling| budget::evaluate(summary.total_monthly, ceiling));

    Ok(Json(SummaryResponse {
        today,
        total_monthly: summary.total_monthly,
        total_yearly,
        per_category: summary.per_category,
        upcoming: summary.upcoming,
        upcoming_due,
        budget: budget_report,
    }))
}
