//! Status command implementation

use anyhow::Result;
use drover_core::{status, Direction, Ledger};
use serde::Serialize;

use crate::cli::{GlobalArgs, StatusArgs, StatusOutput};
use crate::context::RuntimeContext;

/// One row of the status report.
#[derive(Debug, Serialize)]
struct StatusRow {
    name: String,
    applied: bool,
    drifted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    batch: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    applied_at: Option<String>,
}

/// Execute the status command
pub(crate) fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let ledger = Ledger::new(ctx.db.as_ref());
    ledger.ensure()?;

    let mut rows = Vec::new();
    for migration in ctx.registry.ordered(Direction::Up) {
        let state = status(&ledger, migration)?;
        let record = ledger.find(&migration.name)?;
        rows.push(StatusRow {
            name: migration.name.clone(),
            applied: state.has_run,
            drifted: state.has_drifted,
            batch: record.as_ref().map(|r| r.batch),
            applied_at: record.map(|r| r.applied_at),
        });
    }

    match args.output {
        StatusOutput::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        StatusOutput::Table => {
            println!(
                "{:<40} {:>7} {:>7} {:>5}  {}",
                "name", "applied", "drifted", "batch", "applied_at"
            );
            for row in &rows {
                println!(
                    "{:<40} {:>7} {:>7} {:>5}  {}",
                    row.name,
                    if row.applied { "yes" } else { "no" },
                    if row.drifted { "yes" } else { "" },
                    row.batch.map(|b| b.to_string()).unwrap_or_default(),
                    row.applied_at.as_deref().unwrap_or(""),
                );
            }
            println!("\nCurrent batch: {}", ledger.latest_batch()?);
        }
    }

    Ok(())
}
