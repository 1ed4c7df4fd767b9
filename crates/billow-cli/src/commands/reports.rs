//! Summary and upcoming-bills command implementations

use anyhow::Result;
use chrono::Local;

use billow_core::{aggregate, evaluate, BudgetStatus};

use super::{currency_symbol, truncate, Context};

pub async fn cmd_summary(ctx: &Context, budget: Option<f64>) -> Result<()> {
    let settings = ctx.settings()?;
    let symbol = currency_symbol(&settings.currency);
    let ceiling = budget.unwrap_or(settings.monthly_budget);
    if !ceiling.is_finite() || ceiling < 0.0 {
        anyhow::bail!("budget must be non-negative");
    }

    let mut client = ctx.client()?;
    let result = client.list().await;
    ctx.sync_session(&client)?;
    let records = result?;

    let today = Local::now().date_naive();
    let summary = aggregate(&records, today);

    println!();
    println!("💰 Monthly Summary");
    println!("   ─────────────────────────────────────────────");
    println!("   Subscriptions:   {}", records.len());
    println!("   Monthly cost:    {}{:.2}", symbol, summary.total_monthly);
    println!("   Yearly cost:     {}{:.2}", symbol, summary.total_yearly());

    if !summary.per_category.is_empty() {
        println!();
        println!("   By category (raw prices):");
        for (category, total) in &summary.per_category {
            println!("     {:16} {}{:.2}", category, symbol, total);
        }
    }

    let report = evaluate(summary.total_monthly, ceiling);
    let (icon, label) = match report.status {
        BudgetStatus::WithinBudget => ("✅", "within budget"),
        BudgetStatus::Warning => ("⚠️ ", "approaching budget"),
        BudgetStatus::OverBudget => ("🔴", "over budget"),
    };

    println!();
    println!("   Budget:          {}{:.2}", symbol, ceiling);
    if report.usage_percent.is_finite() {
        println!("   Used:            {:.1}% {} {}", report.usage_percent, icon, label);
    } else {
        println!("   Used:            ∞ {} {}", icon, label);
    }
    if report.remaining >= 0.0 {
        println!("   Remaining:       {}{:.2}", symbol, report.remaining);
    } else {
        println!("   Over by:         {}{:.2}", symbol, report.remaining.abs());
    }

    if !summary.upcoming.is_empty() {
        println!();
        println!(
            "   {} bill(s) due in the next 30 days ({}{:.2}). See: billow upcoming",
            summary.upcoming.len(),
            symbol,
            summary.upcoming_due()
        );
    }

    Ok(())
}

pub async fn cmd_upcoming(ctx: &Context) -> Result<()> {
    let settings = ctx.settings()?;
    let symbol = currency_symbol(&settings.currency);

    let mut client = ctx.client()?;
    let result = client.list().await;
    ctx.sync_session(&client)?;
    let records = result?;

    let today = Local::now().date_naive();
    let summary = aggregate(&records, today);

    if summary.upcoming.is_empty() {
        println!("No bills due in the next 30 days.");
        return Ok(());
    }

    println!();
    println!("💳 Upcoming Bills (next 30 days)");
    println!("   ─────────────────────────────────────────────");
    for bill in &summary.upcoming {
        println!(
            "   {} │ {:24} │ {}{:>8.2} │ {}",
            bill.due_date,
            truncate(&bill.name, 24),
            currency_symbol(&bill.currency),
            bill.price,
            bill.category,
        );
    }
    println!("   ─────────────────────────────────────────────");
    println!("   Total due:       {}{:.2}", symbol, summary.upcoming_due());

    Ok(())
}
