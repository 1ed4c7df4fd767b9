//! HTTP implementation of the Store and Auth boundaries
//!
//! Thin reqwest client against the Billow REST API. Status codes map onto
//! the core error taxonomy; anything else non-success is a transport error
//! surfaced verbatim to the caller.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{NewSubscription, Subscription};

use super::{AuthProvider, SubscriptionStore};

/// Default API base URL (the development server)
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// REST client for the Billow backend
#[derive(Debug, Clone)]
pub struct HttpStore {
    http_client: Client,
    base_url: String,
}

/// Credentials payload for login/register
#[derive(Debug, Serialize)]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Token payload returned by login/register
#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// Error payload returned by the API
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

impl HttpStore {
    /// Create a client against the given base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create from the `BILLOW_API_URL` environment variable, falling back
    /// to the development default
    pub fn from_env() -> Self {
        let url =
            std::env::var("BILLOW_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(&url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Pull the API's error message out of a failure response, falling back
    /// to the status line
    async fn error_message(response: Response) -> String {
        let status = response.status();
        match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => format!("HTTP {}", status),
        }
    }

    /// Map a non-success response onto the error taxonomy
    async fn map_failure(response: Response) -> Error {
        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED => Error::Unauthenticated,
            StatusCode::NOT_FOUND => Error::NotFound(Self::error_message(response).await),
            StatusCode::CONFLICT => Error::AlreadyRegistered,
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Error::Validation(Self::error_message(response).await)
            }
            _ => Error::Transport(Self::error_message(response).await),
        }
    }

    async fn check(response: Response) -> Result<Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::map_failure(response).await)
        }
    }

    async fn auth_request(&self, path: &str, email: &str, password: &str) -> Result<String> {
        debug!(path, "auth request");
        let response = self
            .http_client
            .post(self.url(path))
            .json(&CredentialsRequest { email, password })
            .send()
            .await?;

        // Login failures come back 401, which for auth endpoints means bad
        // credentials rather than a missing session
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(Error::InvalidCredentials);
        }
        let response = Self::check(response).await?;
        let body: TokenResponse = response.json().await?;
        Ok(body.token)
    }
}

#[async_trait]
impl AuthProvider for HttpStore {
    async fn login(&self, email: &str, password: &str) -> Result<String> {
        self.auth_request("/api/login", email, password).await
    }

    async fn register(&self, email: &str, password: &str) -> Result<String> {
        self.auth_request("/api/register", email, password).await
    }
}

#[async_trait]
impl SubscriptionStore for HttpStore {
    async fn get_all(&self, token: &str) -> Result<Vec<Subscription>> {
        let response = self
            .http_client
            .get(self.url("/api/subscriptions"))
            .bearer_auth(token)
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    async fn create(&self, token: &str, fields: &NewSubscription) -> Result<Subscription> {
        let response = self
            .http_client
            .post(self.url("/api/subscriptions"))
            .bearer_auth(token)
            .json(fields)
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    async fn update(
        &self,
        token: &str,
        id: i64,
        fields: &NewSubscription,
    ) -> Result<Subscription> {
        let response = self
            .http_client
            .put(self.url(&format!("/api/subscriptions/{}", id)))
            .bearer_auth(token)
            .json(fields)
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    async fn delete(&self, token: &str, id: i64) -> Result<()> {
        let response = self
            .http_client
            .delete(self.url(&format!("/api/subscriptions/{}", id)))
            .bearer_auth(token)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let store = HttpStore::new("http://localhost:8000/");
        assert_eq!(store.base_url(), "http://localhost:8000");
        assert_eq!(store.url("/api/login"), "http://localhost:8000/api/login");
    }
}
