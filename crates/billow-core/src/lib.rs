//! Billow Core Library
//!
//! Shared functionality for the Billow subscription tracker:
//! - Domain models (subscriptions, categories, billing schedules)
//! - Billing normalization and collection-level aggregation
//! - Budget evaluation against a user-set ceiling
//! - Session gate with token persistence
//! - Subscription Store / Auth Provider boundary (REST client + mock)
//! - CSV and text-report export
//! - Local user settings

pub mod billing;
pub mod budget;
pub mod client;
pub mod error;
pub mod export;
pub mod models;
pub mod session;
pub mod settings;
pub mod store;

pub use billing::{aggregate, monthly_equivalent, Summary, UPCOMING_WINDOW_DAYS};
pub use budget::{evaluate, BudgetReport, BudgetStatus};
pub use client::Client;
pub use error::{Error, Result};
pub use models::{Category, NewSubscription, Schedule, Subscription, DEFAULT_CURRENCY};
pub use session::{SessionGate, SessionState, TokenFile};
pub use settings::{Theme, UserSettings};
pub use store::{AuthProvider, HttpStore, SubscriptionStore};
