//! Export functionality for subscription snapshots
//!
//! Supports:
//! - CSV export of the raw record fields
//! - A plain-text summary report (counts, monthly/yearly cost, per-record
//!   details)

use chrono::NaiveDate;

use crate::billing::{aggregate, monthly_equivalent};
use crate::error::Result;
use crate::models::Subscription;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Report,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "report" | "txt" | "text" => Ok(Self::Report),
            _ => Err(format!("Unknown export format: {} (valid: csv, report)", s)),
        }
    }
}

/// Render a snapshot as CSV
///
/// Header matches the original export: Name, Price, Currency, Due Date,
/// Category, Schedule, Notes. Absent notes become an empty field.
pub fn to_csv(records: &[Subscription]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "Name", "Price", "Currency", "Due Date", "Category", "Schedule", "Notes",
    ])?;

    for r in records {
        writer.write_record([
            r.name.as_str(),
            &r.price.to_string(),
            r.currency.as_str(),
            &r.due_date.to_string(),
            r.category.as_str(),
            r.recurring_schedule.as_str(),
            r.notes.as_deref().unwrap_or(""),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
}

/// Render a snapshot as a plain-text report
///
/// `generated_on` is injected by the caller, like every calendar input in
/// this crate. Amounts are rounded to two decimals here, at the presentation
/// layer.
pub fn to_report(records: &[Subscription], generated_on: NaiveDate) -> String {
    let summary = aggregate(records, generated_on);

    let mut out = String::new();
    out.push_str("SUBSCRIPTION REPORT\n");
    out.push_str(&format!("Generated: {}\n\n", generated_on));
    out.push_str(&format!("Total Subscriptions: {}\n", records.len()));
    out.push_str(&format!("Monthly Cost: {:.2}\n", summary.total_monthly));
    out.push_str(&format!("Yearly Cost: {:.2}\n\n", summary.total_yearly()));
    out.push_str("SUBSCRIPTIONS:\n");

    for r in records {
        out.push_str(&format!(
            "- {}: {:.2} {} ({})\n",
            r.name, r.price, r.currency, r.recurring_schedule
        ));
        out.push_str(&format!(
            "  Due: {} | Category: {} | Monthly: {:.2}\n",
            r.due_date,
            r.category,
            monthly_equivalent(r.price, &r.recurring_schedule)
        ));
        if let Some(notes) = &r.notes {
            out.push_str(&format!("  Notes: {}\n", notes));
        }
    }

    out
}
