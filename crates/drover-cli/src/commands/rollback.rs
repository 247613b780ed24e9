//! Rollback command implementation

use anyhow::Result;
use drover_core::Runner;

use crate::cli::{GlobalArgs, RollbackArgs};
use crate::context::RuntimeContext;

/// Execute the rollback command
pub(crate) fn execute(args: &RollbackArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;

    let runner = Runner::new(ctx.db.as_ref(), &ctx.registry);
    let summary = runner.rollback(args.batches, args.force)?;

    if summary.batches.is_empty() {
        println!("No batches to roll back.");
        return Ok(());
    }

    for name in &summary.reversed {
        println!("  Reversed: {name}");
    }
    for name in &summary.failed {
        println!("  Failed (continuing under --force): {name}");
    }
    println!(
        "Rolled back {} batch(es), {} migration(s).",
        summary.batches.len(),
        summary.reversed.len()
    );

    Ok(())
}
