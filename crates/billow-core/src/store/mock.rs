//! Mock Store and Auth Provider for testing
//!
//! In-memory stand-ins with predictable behavior: a fixed valid token,
//! sequential ids, and configurable records. Useful for unit tests and for
//! exercising the client without a running server.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::models::{NewSubscription, Subscription};

use super::{AuthProvider, SubscriptionStore};

/// The token the mock accepts
pub const MOCK_TOKEN: &str = "mock-token";

/// In-memory subscription store
///
/// Accepts only [`MOCK_TOKEN`]; any other token is rejected with
/// `Unauthenticated`, which is how tests drive the 401 path.
#[derive(Default)]
pub struct MockStore {
    inner: Mutex<MockState>,
}

#[derive(Default)]
struct MockState {
    records: Vec<Subscription>,
    next_id: i64,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the store with records (ids are kept as given)
    pub fn with_records(records: Vec<Subscription>) -> Self {
        let next_id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        Self {
            inner: Mutex::new(MockState { records, next_id }),
        }
    }

    fn check_token(token: &str) -> Result<()> {
        if token == MOCK_TOKEN {
            Ok(())
        } else {
            Err(Error::Unauthenticated)
        }
    }

    fn materialize(id: i64, fields: &NewSubscription) -> Subscription {
        Subscription {
            id,
            name: fields.name.clone(),
            price: fields.price,
            currency: fields.currency.clone(),
            due_date: fields.due_date,
            category: fields.category.clone(),
            recurring_schedule: fields.recurring_schedule.clone(),
            notes: fields.notes.clone(),
        }
    }
}

#[async_trait]
impl SubscriptionStore for MockStore {
    async fn get_all(&self, token: &str) -> Result<Vec<Subscription>> {
        Self::check_token(token)?;
        Ok(self.inner.lock().unwrap().records.clone())
    }

    async fn create(&self, token: &str, fields: &NewSubscription) -> Result<Subscription> {
        Self::check_token(token)?;
        fields.validate()?;
        let mut state = self.inner.lock().unwrap();
        state.next_id += 1;
        let record = Self::materialize(state.next_id, fields);
        state.records.push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        token: &str,
        id: i64,
        fields: &NewSubscription,
    ) -> Result<Subscription> {
        Self::check_token(token)?;
        fields.validate()?;
        let mut state = self.inner.lock().unwrap();
        let slot = state
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::NotFound(format!("subscription {}", id)))?;
        *slot = Self::materialize(id, fields);
        Ok(slot.clone())
    }

    async fn delete(&self, token: &str, id: i64) -> Result<()> {
        Self::check_token(token)?;
        let mut state = self.inner.lock().unwrap();
        let before = state.records.len();
        state.records.retain(|r| r.id != id);
        if state.records.len() == before {
            return Err(Error::NotFound(format!("subscription {}", id)));
        }
        Ok(())
    }
}

/// Mock auth provider with a single configured account
pub struct MockAuth {
    email: String,
    password: String,
    registered: Mutex<bool>,
}

impl MockAuth {
    /// An auth provider where `email`/`password` is already registered
    pub fn with_account(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            registered: Mutex::new(true),
        }
    }

    /// An auth provider with no accounts yet; `register` will accept the
    /// configured credentials once
    pub fn empty(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            registered: Mutex::new(false),
        }
    }
}

#[async_trait]
impl AuthProvider for MockAuth {
    async fn login(&self, email: &str, password: &str) -> Result<String> {
        let registered = *self.registered.lock().unwrap();
        if registered && email == self.email && password == self.password {
            Ok(MOCK_TOKEN.to_string())
        } else {
            Err(Error::InvalidCredentials)
        }
    }

    async fn register(&self, email: &str, _password: &str) -> Result<String> {
        let mut registered = self.registered.lock().unwrap();
        if *registered && email == self.email {
            return Err(Error::AlreadyRegistered);
        }
        *registered = true;
        Ok(MOCK_TOKEN.to_string())
    }
}
