//! Domain models for Billow

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Currency code used when a record carries none.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Subscription category
///
/// The recognized set matches the categories offered by the add/edit forms.
/// Unrecognized values coming back from the Store are preserved and displayed
/// verbatim rather than rejected, so older or hand-edited records keep
/// working.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Entertainment,
    Productivity,
    Utilities,
    Health,
    Education,
    Other,
    /// Any value not in the recognized set, kept as-is
    Custom(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Entertainment => "entertainment",
            Self::Productivity => "productivity",
            Self::Utilities => "utilities",
            Self::Health => "health",
            Self::Education => "education",
            Self::Other => "other",
            Self::Custom(s) => s,
        }
    }

    /// All recognized categories, in display order
    pub fn known() -> [Category; 6] {
        [
            Self::Entertainment,
            Self::Productivity,
            Self::Utilities,
            Self::Health,
            Self::Education,
            Self::Other,
        ]
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "entertainment" => Self::Entertainment,
            "productivity" => Self::Productivity,
            "utilities" => Self::Utilities,
            "health" => Self::Health,
            "education" => Self::Education,
            "other" => Self::Other,
            _ => Self::Custom(s),
        }
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.as_str().to_string()
    }
}

impl std::str::FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Billing cadence for a subscription
///
/// Unrecognized tags are preserved; the money normalizer treats them as
/// already-monthly (identity) rather than erroring, so every record always
/// produces a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Schedule {
    Monthly,
    Yearly,
    Weekly,
    Quarterly,
    OneTime,
    /// Any tag not in the recognized set, kept as-is
    Custom(String),
}

impl Schedule {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Weekly => "weekly",
            Self::Quarterly => "quarterly",
            Self::OneTime => "one-time",
            Self::Custom(s) => s,
        }
    }
}

impl From<String> for Schedule {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "monthly" => Self::Monthly,
            "yearly" => Self::Yearly,
            "weekly" => Self::Weekly,
            "quarterly" => Self::Quarterly,
            "one-time" | "one_time" | "onetime" => Self::OneTime,
            _ => Self::Custom(s),
        }
    }
}

impl From<Schedule> for String {
    fn from(s: Schedule) -> Self {
        s.as_str().to_string()
    }
}

impl std::str::FromStr for Schedule {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl std::fmt::Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A subscription record, owned by the Store
///
/// The core treats this as an immutable snapshot per operation; it never
/// caches or mutates Store state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    /// Store-assigned identifier, stable for the record's lifetime
    pub id: i64,
    pub name: String,
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub due_date: NaiveDate,
    pub category: Category,
    pub recurring_schedule: Schedule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// Fields for creating a subscription or fully replacing one on update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSubscription {
    pub name: String,
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub due_date: NaiveDate,
    pub category: Category,
    pub recurring_schedule: Schedule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewSubscription {
    /// Check required-field and range invariants
    ///
    /// Called before any Store request is issued; a failed create must never
    /// reach the wire or be applied to any local aggregate.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("name must not be empty".to_string()));
        }
        if !self.price.is_finite() {
            return Err(Error::Validation("price must be a finite number".to_string()));
        }
        if self.price < 0.0 {
            return Err(Error::Validation("price must not be negative".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> NewSubscription {
        NewSubscription {
            name: "Netflix".to_string(),
            price: 15.49,
            currency: DEFAULT_CURRENCY.to_string(),
            due_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            category: Category::Entertainment,
            recurring_schedule: Schedule::Monthly,
            notes: None,
        }
    }

    #[test]
    fn category_round_trips_known_values() {
        for cat in Category::known() {
            let parsed: Category = cat.as_str().parse().unwrap();
            assert_eq!(parsed, cat);
        }
    }

    #[test]
    fn category_preserves_unrecognized_values() {
        let cat: Category = "pet-care".parse().unwrap();
        assert_eq!(cat, Category::Custom("pet-care".to_string()));
        assert_eq!(cat.as_str(), "pet-care");
    }

    #[test]
    fn schedule_parses_one_time_spellings() {
        assert_eq!("one-time".parse::<Schedule>().unwrap(), Schedule::OneTime);
        assert_eq!("one_time".parse::<Schedule>().unwrap(), Schedule::OneTime);
        assert_eq!("OneTime".parse::<Schedule>().unwrap(), Schedule::OneTime);
    }

    #[test]
    fn schedule_preserves_unrecognized_tags() {
        let s: Schedule = "biennial".parse().unwrap();
        assert_eq!(s, Schedule::Custom("biennial".to_string()));
    }

    #[test]
    fn subscription_json_defaults_currency() {
        let json = r#"{
            "id": 1,
            "name": "Netflix",
            "price": 15.49,
            "due_date": "2024-01-15",
            "category": "entertainment",
            "recurring_schedule": "monthly"
        }"#;
        let sub: Subscription = serde_json::from_str(json).unwrap();
        assert_eq!(sub.currency, DEFAULT_CURRENCY);
        assert_eq!(sub.category, Category::Entertainment);
        assert_eq!(sub.recurring_schedule, Schedule::Monthly);
        assert!(sub.notes.is_none());
    }

    #[test]
    fn validate_rejects_empty_name() {
        let mut sub = draft();
        sub.name = "   ".to_string();
        assert!(matches!(sub.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn validate_rejects_negative_price() {
        let mut sub = draft();
        sub.price = -1.0;
        assert!(matches!(sub.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn validate_accepts_zero_price() {
        let mut sub = draft();
        sub.price = 0.0;
        assert!(sub.validate().is_ok());
    }
}
