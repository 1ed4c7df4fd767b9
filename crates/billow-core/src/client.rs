//! Session-gated client over the Store and Auth boundaries
//!
//! Owns the [`SessionGate`] and routes every protected call through it:
//! anonymous sessions fail fast with `Unauthenticated` before any request is
//! issued, and a 401 coming back from the Store demotes the gate (clearing
//! the token) before the error is surfaced.

use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{NewSubscription, Subscription};
use crate::session::SessionGate;
use crate::store::{AuthProvider, SubscriptionStore};

/// Client combining session state with the Store/Auth collaborators
pub struct Client {
    gate: SessionGate,
    store: Arc<dyn SubscriptionStore>,
    auth: Arc<dyn AuthProvider>,
}

impl Client {
    /// Build a client from collaborators and an initial gate
    ///
    /// Pass a gate restored via [`SessionGate::with_token`] to resume a
    /// stored session optimistically.
    pub fn new(
        store: Arc<dyn SubscriptionStore>,
        auth: Arc<dyn AuthProvider>,
        gate: SessionGate,
    ) -> Self {
        Self { gate, store, auth }
    }

    pub fn session(&self) -> &SessionGate {
        &self.gate
    }

    pub fn is_authenticated(&self) -> bool {
        self.gate.is_authenticated()
    }

    /// Exchange credentials for a session token
    pub async fn login(&mut self, email: &str, password: &str) -> Result<()> {
        let token = self.auth.login(email, password).await?;
        self.gate.authenticated(token);
        Ok(())
    }

    /// Create an account; a successful registration also signs in
    pub async fn register(&mut self, email: &str, password: &str) -> Result<()> {
        let token = self.auth.register(email, password).await?;
        self.gate.authenticated(token);
        Ok(())
    }

    /// Drop the session token
    pub fn logout(&mut self) {
        self.gate.logout();
    }

    /// Fetch a fresh snapshot of all subscriptions
    pub async fn list(&mut self) -> Result<Vec<Subscription>> {
        let token = self.gate.token()?.to_string();
        let result = self.store.get_all(&token).await;
        self.demote_on_401(result)
    }

    /// Create a subscription; validation runs before the request is issued
    pub async fn create(&mut self, fields: &NewSubscription) -> Result<Subscription> {
        fields.validate()?;
        let token = self.gate.token()?.to_string();
        let result = self.store.create(&token, fields).await;
        self.demote_on_401(result)
    }

    /// Replace a subscription's mutable fields
    pub async fn update(&mut self, id: i64, fields: &NewSubscription) -> Result<Subscription> {
        fields.validate()?;
        let token = self.gate.token()?.to_string();
        let result = self.store.update(&token, id, fields).await;
        self.demote_on_401(result)
    }

    /// Delete a subscription
    pub async fn delete(&mut self, id: i64) -> Result<()> {
        let token = self.gate.token()?.to_string();
        let result = self.store.delete(&token, id).await;
        self.demote_on_401(result)
    }

    /// A 401 from the Store means our token is no longer good: transition
    /// the gate to anonymous before surfacing the error
    fn demote_on_401<T>(&mut self, result: Result<T>) -> Result<T> {
        if matches!(result, Err(Error::Unauthenticated)) {
            debug!("protected call rejected, demoting session");
            self.gate.auth_failed();
        }
        result
    }
}
