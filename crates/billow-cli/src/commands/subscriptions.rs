//! Subscription command implementations

use anyhow::{Context as _, Result};
use chrono::NaiveDate;

use billow_core::{Category, NewSubscription, Schedule, Subscription};

use super::{currency_symbol, truncate, Context};

fn parse_due(due: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(due, "%Y-%m-%d").context("Invalid due date (use YYYY-MM-DD)")
}

fn print_table(records: &[Subscription]) {
    println!();
    println!("📋 Subscriptions");
    println!("   ──────────────────────────────────────────────────────────────────");
    for r in records {
        println!(
            "   #{:<4} {:24} │ {}{:>8.2}/{:<9} │ due {} │ {}",
            r.id,
            truncate(&r.name, 24),
            currency_symbol(&r.currency),
            r.price,
            r.recurring_schedule.as_str(),
            r.due_date,
            r.category,
        );
        if let Some(notes) = &r.notes {
            println!("         {}", truncate(notes, 60));
        }
    }
}

pub async fn cmd_list(ctx: &Context) -> Result<()> {
    let mut client = ctx.client()?;
    let result = client.list().await;
    ctx.sync_session(&client)?;
    let records = result?;

    if records.is_empty() {
        println!("No subscriptions yet. Add one with:");
        println!("  billow add \"Netflix\" 15.49 --due 2024-02-01");
        return Ok(());
    }

    print_table(&records);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn cmd_add(
    ctx: &Context,
    name: &str,
    price: f64,
    due: &str,
    category: &str,
    schedule: &str,
    currency: Option<&str>,
    notes: Option<String>,
) -> Result<()> {
    let settings = ctx.settings()?;
    let fields = NewSubscription {
        name: name.to_string(),
        price,
        currency: currency.unwrap_or(&settings.currency).to_uppercase(),
        due_date: parse_due(due)?,
        category: Category::from(category.to_string()),
        recurring_schedule: Schedule::from(schedule.to_string()),
        notes,
    };

    let mut client = ctx.client()?;
    let result = client.create(&fields).await;
    ctx.sync_session(&client)?;
    let created = result?;

    println!(
        "✅ Added #{}: {} at {}{:.2}/{}",
        created.id,
        created.name,
        currency_symbol(&created.currency),
        created.price,
        created.recurring_schedule.as_str()
    );
    Ok(())
}

/// Optional field overrides for `billow update`
#[derive(Default)]
pub struct UpdateFields {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub due: Option<String>,
    pub category: Option<String>,
    pub schedule: Option<String>,
    pub currency: Option<String>,
    pub notes: Option<String>,
}

/// Merge CLI overrides into the existing record, producing the full
/// replacement payload the Store expects
pub(crate) fn merge_update(existing: &Subscription, fields: UpdateFields) -> Result<NewSubscription> {
    Ok(NewSubscription {
        name: fields.name.unwrap_or_else(|| existing.name.clone()),
        price: fields.price.unwrap_or(existing.price),
        currency: fields
            .currency
            .map(|c| c.to_uppercase())
            .unwrap_or_else(|| existing.currency.clone()),
        due_date: match fields.due {
            Some(due) => parse_due(&due)?,
            None => existing.due_date,
        },
        category: fields
            .category
            .map(Category::from)
            .unwrap_or_else(|| existing.category.clone()),
        recurring_schedule: fields
            .schedule
            .map(Schedule::from)
            .unwrap_or_else(|| existing.recurring_schedule.clone()),
        notes: fields.notes.or_else(|| existing.notes.clone()),
    })
}

pub async fn cmd_update(ctx: &Context, id: i64, fields: UpdateFields) -> Result<()> {
    let mut client = ctx.client()?;

    let result = client.list().await;
    if result.is_err() {
        ctx.sync_session(&client)?;
    }
    let existing = result?
        .into_iter()
        .find(|r| r.id == id)
        .ok_or_else(|| anyhow::anyhow!("Subscription not found: {}", id))?;

    let payload = merge_update(&existing, fields)?;
    let result = client.update(id, &payload).await;
    ctx.sync_session(&client)?;
    let updated = result?;

    println!(
        "✅ Updated #{}: {} at {}{:.2}/{}",
        updated.id,
        updated.name,
        currency_symbol(&updated.currency),
        updated.price,
        updated.recurring_schedule.as_str()
    );
    Ok(())
}

pub async fn cmd_remove(ctx: &Context, id: i64) -> Result<()> {
    let mut client = ctx.client()?;
    let result = client.delete(id).await;
    ctx.sync_session(&client)?;
    result?;

    println!("✅ Removed subscription #{}", id);
    Ok(())
}
