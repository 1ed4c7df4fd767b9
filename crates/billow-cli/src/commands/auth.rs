//! Account and session command implementations

use anyhow::Result;

use super::{resolve_password, Context};

pub async fn cmd_register(ctx: &Context, email: &str, password: Option<&str>) -> Result<()> {
    let password = resolve_password(password)?;
    let mut client = ctx.client()?;

    client.register(email, &password).await?;
    ctx.sync_session(&client)?;

    println!("✅ Account created for {}", email);
    println!("   You are now signed in.");
    Ok(())
}

pub async fn cmd_login(ctx: &Context, email: &str, password: Option<&str>) -> Result<()> {
    let password = resolve_password(password)?;
    let mut client = ctx.client()?;

    client.login(email, &password).await?;
    ctx.sync_session(&client)?;

    println!("✅ Signed in as {}", email);
    Ok(())
}

pub fn cmd_logout(ctx: &Context) -> Result<()> {
    ctx.token_file.clear()?;
    println!("✅ Signed out");
    Ok(())
}

pub async fn cmd_whoami(ctx: &Context) -> Result<()> {
    let mut client = ctx.client()?;
    if !client.is_authenticated() {
        println!("Not signed in. Run: billow login --email you@example.com");
        return Ok(());
    }

    // The stored token is trusted optimistically; listing is the cheapest
    // way to find out whether the server still honors it
    match client.list().await {
        Ok(records) => {
            println!("✅ Signed in ({} subscriptions on record)", records.len());
        }
        Err(billow_core::Error::Unauthenticated) => {
            ctx.sync_session(&client)?;
            println!("Session expired. Run: billow login --email you@example.com");
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
