//! Export command implementation

use std::path::Path;

use anyhow::Result;
use chrono::Local;

use billow_core::export::{to_csv, to_report, ExportFormat};

use super::Context;

pub async fn cmd_export(ctx: &Context, format: &str, output: Option<&Path>) -> Result<()> {
    let format: ExportFormat = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let mut client = ctx.client()?;
    let result = client.list().await;
    ctx.sync_session(&client)?;
    let records = result?;

    let contents = match format {
        ExportFormat::Csv => to_csv(&records)?,
        ExportFormat::Report => to_report(&records, Local::now().date_naive()),
    };

    match output {
        Some(path) => {
            std::fs::write(path, &contents)?;
            println!(
                "✅ Exported {} subscription(s) to {}",
                records.len(),
                path.display()
            );
        }
        None => print!("{}", contents),
    }

    Ok(())
}
