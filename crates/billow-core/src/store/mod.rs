//! Subscription Store and Auth Provider boundaries
//!
//! The backend of record is an opaque REST service; the core talks to it
//! through these two traits. [`HttpStore`] is the production implementation;
//! a mock lives behind the `test-utils` feature for tests.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{NewSubscription, Subscription};

mod http;
#[cfg(any(test, feature = "test-utils"))]
mod mock;

pub use http::{HttpStore, DEFAULT_API_URL};
#[cfg(any(test, feature = "test-utils"))]
pub use mock::{MockAuth, MockStore, MOCK_TOKEN};

/// CRUD over subscription records
///
/// Every call takes the caller's session token; failures are surfaced
/// immediately (`NotFound`, `Unauthenticated`, `Transport`) with no retry or
/// partial-failure recovery.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Fetch a fresh snapshot of all records
    async fn get_all(&self, token: &str) -> Result<Vec<Subscription>>;

    /// Create a record; the Store assigns the id
    async fn create(&self, token: &str, fields: &NewSubscription) -> Result<Subscription>;

    /// Full replace of a record's mutable fields
    async fn update(&self, token: &str, id: i64, fields: &NewSubscription)
        -> Result<Subscription>;

    /// Remove a record
    async fn delete(&self, token: &str, id: i64) -> Result<()>;
}

/// Credential exchange with the backend
///
/// Both calls return an opaque session token on success. Failures:
/// `InvalidCredentials`, `AlreadyRegistered` (register only), `Transport`.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<String>;

    async fn register(&self, email: &str, password: &str) -> Result<String>;
}
