//! Command implementations
//!
//! Each domain gets its own file; shared plumbing (the command context,
//! password prompting, small formatting helpers) lives here.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};

use billow_core::{Client, HttpStore, SessionGate, TokenFile, UserSettings};

mod auth;
mod export;
mod reports;
mod serve;
mod settings;
mod subscriptions;

pub use auth::*;
pub use export::*;
pub use reports::*;
pub use serve::*;
pub use settings::*;
pub use subscriptions::*;

/// Shared command context: where the API lives and where local state is kept
pub struct Context {
    pub api_url: String,
    pub token_file: TokenFile,
    pub settings_path: PathBuf,
}

impl Context {
    pub fn new(api_url: &str) -> Result<Self> {
        Ok(Self {
            api_url: api_url.to_string(),
            token_file: TokenFile::default_location()?,
            settings_path: UserSettings::default_path()?,
        })
    }

    /// Context with explicit state locations (used by tests)
    pub fn at(api_url: &str, token_path: PathBuf, settings_path: PathBuf) -> Self {
        Self {
            api_url: api_url.to_string(),
            token_file: TokenFile::at(token_path),
            settings_path,
        }
    }

    /// Build a client, restoring any stored session optimistically
    pub fn client(&self) -> Result<Client> {
        tracing::debug!(api_url = %self.api_url, "connecting");
        let store = Arc::new(HttpStore::new(&self.api_url));
        let gate = SessionGate::with_token(self.token_file.load()?);
        Ok(Client::new(store.clone(), store, gate))
    }

    /// Persist the client's session state back to disk
    ///
    /// Called after every command that may have changed the gate: a fresh
    /// login stores the token, a 401-driven demotion clears the stale one.
    pub fn sync_session(&self, client: &Client) -> Result<()> {
        match client.session().token() {
            Ok(token) => self.token_file.store(token)?,
            Err(_) => self.token_file.clear()?,
        }
        Ok(())
    }

    pub fn settings(&self) -> Result<UserSettings> {
        Ok(UserSettings::load(&self.settings_path)?)
    }
}

/// Use the given password or prompt for one on stdin
pub(crate) fn resolve_password(password: Option<&str>) -> Result<String> {
    if let Some(p) = password {
        return Ok(p.to_string());
    }
    print!("Password: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("failed to read password")?;
    let password = line.trim_end_matches(['\n', '\r']).to_string();
    if password.is_empty() {
        anyhow::bail!("password must not be empty");
    }
    Ok(password)
}

/// Truncate a string for table display
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

/// Display symbol for the common currency codes
pub(crate) fn currency_symbol(code: &str) -> &str {
    match code.to_uppercase().as_str() {
        "USD" | "CAD" => "$",
        "GBP" => "£",
        "EUR" => "€",
        "JPY" => "¥",
        _ => "",
    }
}
