//! Down command implementation

use anyhow::Result;
use drover_core::{Direction, Runner};

use crate::cli::{DownArgs, GlobalArgs};
use crate::context::RuntimeContext;

/// Execute the down command: run every registered reverse script in
/// descending name order
pub(crate) fn execute(args: &DownArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    ctx.verbose(&format!("{} registered migrations", ctx.registry.len()));

    let runner = Runner::new(ctx.db.as_ref(), &ctx.registry);
    let summary = runner.run_latest(Direction::Down, args.force)?;

    for name in &summary.applied {
        println!("  Reversed: {name}");
    }
    for name in &summary.drifted {
        println!("  Warning: '{name}' has changed since it was applied");
    }
    for name in &summary.failed {
        println!("  Failed (continuing under --force): {name}");
    }

    println!("Reversed {} migration(s).", summary.applied.len());

    Ok(())
}
