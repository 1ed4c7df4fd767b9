//! Settings command implementations

use anyhow::Result;

use super::Context;

pub fn cmd_settings_show(ctx: &Context) -> Result<()> {
    let settings = ctx.settings()?;

    println!();
    println!("⚙️  Settings ({})", ctx.settings_path.display());
    println!("   ─────────────────────────────────────────────");
    println!("   currency         {}", settings.currency);
    println!("   theme            {}", settings.theme);
    println!("   monthly_budget   {:.2}", settings.monthly_budget);
    println!("   budget_alerts    {}", settings.budget_alerts);
    println!("   email_reminders  {}", settings.email_reminders);
    Ok(())
}

pub fn cmd_settings_set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let mut settings = ctx.settings()?;
    settings.set(key, value)?;
    settings.save(&ctx.settings_path)?;

    println!("✅ {} set", key);
    Ok(())
}
