//! Billow CLI - Personal subscription and bill tracker
//!
//! Usage:
//!   billow register --email you@example.com    Create an account
//!   billow add "Netflix" 15.49 --due 2024-02-01
//!   billow summary                             Monthly cost + budget status
//!   billow serve --port 8000                   Start the API server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let ctx = commands::Context::new(&cli.api_url)?;

    match cli.command {
        Commands::Register { email, password } => {
            commands::cmd_register(&ctx, &email, password.as_deref()).await
        }
        Commands::Login { email, password } => {
            commands::cmd_login(&ctx, &email, password.as_deref()).await
        }
        Commands::Logout => commands::cmd_logout(&ctx),
        Commands::Whoami => commands::cmd_whoami(&ctx).await,
        Commands::List => commands::cmd_list(&ctx).await,
        Commands::Add {
            name,
            price,
            due,
            category,
            schedule,
            currency,
            notes,
        } => {
            commands::cmd_add(
                &ctx,
                &name,
                price,
                &due,
                &category,
                &schedule,
                currency.as_deref(),
                notes,
            )
            .await
        }
        Commands::Update {
            id,
            name,
            price,
            due,
            category,
            schedule,
            currency,
            notes,
        } => {
            commands::cmd_update(
                &ctx,
                id,
                commands::UpdateFields {
                    name,
                    price,
                    due,
                    category,
                    schedule,
                    currency,
                    notes,
                },
            )
            .await
        }
        Commands::Remove { id } => commands::cmd_remove(&ctx, id).await,
        Commands::Summary { budget } => commands::cmd_summary(&ctx, budget).await,
        Commands::Upcoming => commands::cmd_upcoming(&ctx).await,
        Commands::Export { format, output } => {
            commands::cmd_export(&ctx, &format, output.as_deref()).await
        }
        Commands::Settings { action } => match action {
            None | Some(SettingsAction::Show) => commands::cmd_settings_show(&ctx),
            Some(SettingsAction::Set { key, value }) => {
                commands::cmd_settings_set(&ctx, &key, &value)
            }
        },
        Commands::Serve {
            port,
            host,
            db,
            static_dir,
        } => commands::cmd_serve(&db, &host, port, static_dir.as_deref()).await,
    }
}
