//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Billow - Track and manage your subscriptions in one place
#[derive(Parser)]
#[command(name = "billow")]
#[command(about = "Personal subscription and bill tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Base URL of the Billow API server
    #[arg(long, default_value = "http://127.0.0.1:8000", global = true)]
    pub api_url: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account and sign in
    Register {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password (prompted for if omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Sign in with an existing account
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password (prompted for if omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Drop the stored session
    Logout,

    /// Show the signed-in account
    Whoami,

    /// List all subscriptions
    List,

    /// Add a subscription
    Add {
        /// Subscription name
        name: String,

        /// Price per billing period
        price: f64,

        /// Next due date (YYYY-MM-DD)
        #[arg(short, long)]
        due: String,

        /// Category (entertainment, productivity, utilities, health,
        /// education, other, or anything else)
        #[arg(short, long, default_value = "other")]
        category: String,

        /// Billing schedule (monthly, yearly, weekly, quarterly, one-time)
        #[arg(short, long, default_value = "monthly")]
        schedule: String,

        /// Currency code (defaults to the settings value)
        #[arg(long)]
        currency: Option<String>,

        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Update a subscription (unspecified fields keep their values)
    Update {
        /// Subscription ID
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        price: Option<f64>,

        /// Next due date (YYYY-MM-DD)
        #[arg(short, long)]
        due: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long)]
        schedule: Option<String>,

        #[arg(long)]
        currency: Option<String>,

        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Remove a subscription
    Remove {
        /// Subscription ID
        id: i64,
    },

    /// Show monthly cost, category breakdown, and budget status
    Summary {
        /// Budget ceiling (defaults to the settings value)
        #[arg(short, long)]
        budget: Option<f64>,
    },

    /// List bills due in the next 30 days
    Upcoming,

    /// Export subscriptions
    Export {
        /// Output format: csv or report
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Manage local preferences
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },

    /// Start the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Database path
        #[arg(long, default_value = "billow.db")]
        db: PathBuf,

        /// Directory containing static files to serve (e.g., a web UI build)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show current settings
    Show,

    /// Change a setting (currency, theme, monthly_budget, budget_alerts,
    /// email_reminders)
    Set {
        /// Setting name
        key: String,

        /// New value
        value: String,
    },
}
