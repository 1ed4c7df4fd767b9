//! Budget evaluation
//!
//! Compares the aggregated monthly cost against a user-set ceiling and
//! classifies the result for the budget meter.

use serde::{Deserialize, Serialize};

/// Usage percentage at which the status turns to a warning
pub const WARNING_THRESHOLD_PERCENT: f64 = 80.0;

/// Usage percentage at which the budget is exceeded
pub const OVER_THRESHOLD_PERCENT: f64 = 100.0;

/// Budget classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetStatus {
    WithinBudget,
    Warning,
    OverBudget,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WithinBudget => "within-budget",
            Self::Warning => "warning",
            Self::OverBudget => "over-budget",
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of comparing monthly cost against a budget ceiling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetReport {
    /// Percent of the ceiling consumed; +infinity when the ceiling is zero
    /// but money is being spent
    pub usage_percent: f64,
    /// Ceiling minus total; negative when over budget
    pub remaining: f64,
    pub status: BudgetStatus,
}

/// Evaluate the monthly total against a ceiling
///
/// Defined for all non-negative inputs including a zero ceiling: spending
/// against no budget reads as infinite usage rather than a division error.
pub fn evaluate(total_monthly: f64, ceiling: f64) -> BudgetReport {
    let usage_percent = if ceiling > 0.0 {
        (total_monthly / ceiling) * 100.0
    } else if total_monthly > 0.0 {
        f64::INFINITY
    } else {
        0.0
    };

    let status = if usage_percent >= OVER_THRESHOLD_PERCENT {
        BudgetStatus::OverBudget
    } else if usage_percent >= WARNING_THRESHOLD_PERCENT {
        BudgetStatus::Warning
    } else {
        BudgetStatus::WithinBudget
    };

    BudgetReport {
        usage_percent,
        remaining: ceiling - total_monthly,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_at_eighty_percent() {
        let report = evaluate(80.0, 100.0);
        assert_eq!(report.usage_percent, 80.0);
        assert_eq!(report.remaining, 20.0);
        assert_eq!(report.status, BudgetStatus::Warning);
    }

    #[test]
    fn over_budget_past_ceiling() {
        let report = evaluate(120.0, 100.0);
        assert_eq!(report.status, BudgetStatus::OverBudget);
        assert_eq!(report.remaining, -20.0);
    }

    #[test]
    fn exactly_at_ceiling_is_over_budget() {
        let report = evaluate(100.0, 100.0);
        assert_eq!(report.usage_percent, 100.0);
        assert_eq!(report.status, BudgetStatus::OverBudget);
    }

    #[test]
    fn within_budget_below_warning() {
        let report = evaluate(50.0, 100.0);
        assert_eq!(report.status, BudgetStatus::WithinBudget);
        assert_eq!(report.remaining, 50.0);
    }

    #[test]
    fn zero_ceiling_zero_spend() {
        let report = evaluate(0.0, 0.0);
        assert_eq!(report.usage_percent, 0.0);
        assert_eq!(report.remaining, 0.0);
        assert_eq!(report.status, BudgetStatus::WithinBudget);
    }

    #[test]
    fn zero_ceiling_with_spend_is_infinite_usage() {
        let report = evaluate(10.0, 0.0);
        assert!(report.usage_percent.is_infinite());
        assert_eq!(report.status, BudgetStatus::OverBudget);
        assert_eq!(report.remaining, -10.0);
    }

    #[test]
    fn status_serializes_kebab_case() {
        let json = serde_json::to_string(&BudgetStatus::OverBudget).unwrap();
        assert_eq!(json, "\"over-budget\"");
    }
}
