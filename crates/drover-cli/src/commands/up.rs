//! Up command implementation

use anyhow::Result;
use drover_core::{Direction, Runner};

use crate::cli::{GlobalArgs, UpArgs};
use crate::context::RuntimeContext;

/// Execute the up command
pub(crate) fn execute(args: &UpArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    ctx.verbose(&format!("{} registered migrations", ctx.registry.len()));

    let runner = Runner::new(ctx.db.as_ref(), &ctx.registry);
    let summary = runner.run_latest(Direction::Up, args.force)?;

    for name in &summary.applied {
        println!("  Applied: {name}");
    }
    for name in &summary.drifted {
        println!("  Warning: '{name}' has changed since it was applied");
    }
    for name in &summary.failed {
        println!("  Failed (continuing under --force): {name}");
    }
    if global.verbose {
        for name in &summary.skipped {
            println!("  Skipped (already applied): {name}");
        }
    }

    if summary.applied.is_empty() && summary.failed.is_empty() {
        println!("Nothing to migrate.");
    } else if let Some(batch) = summary.batch {
        println!(
            "Applied {} migration(s) as batch {batch}.",
            summary.applied.len()
        );
    }

    Ok(())
}
