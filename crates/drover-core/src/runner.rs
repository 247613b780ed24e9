//! Run orchestration: forward/reverse runs and whole-batch rollback.

use drover_db::Database;

use crate::error::{MigrateError, MigrateResult};
use crate::ledger::Ledger;
use crate::migration::{Direction, Migration};
use crate::registry::Registry;
use crate::status::status;

/// Outcome of one [`Runner::run_latest`] invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Migrations whose script ran and whose ledger row was mutated.
    pub applied: Vec<String>,
    /// Already-applied migrations skipped during a forward run.
    pub skipped: Vec<String>,
    /// Applied-but-edited migrations reported during the run.
    pub drifted: Vec<String>,
    /// Failures tolerated under force; their ledger rows are untouched.
    pub failed: Vec<String>,
    /// Batch number assigned to this run's forward applications.
    pub batch: Option<i64>,
}

/// Outcome of one [`Runner::rollback`] invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollbackSummary {
    /// Batch numbers processed, most recent first.
    pub batches: Vec<i64>,
    /// Migrations whose down script ran and whose ledger row was deleted.
    pub reversed: Vec<String>,
    /// Failures tolerated under force; their ledger rows remain.
    pub failed: Vec<String>,
}

/// Executes migration scripts against an injected database and keeps the
/// ledger in step.
///
/// Execution is strictly sequential: migrations within one run never
/// execute concurrently, and each script blocks until the store responds.
/// No transaction spans a script and its ledger mutation; a crash between
/// the two leaves the ledger out of step with the actual schema, and
/// callers needing stronger guarantees must coordinate externally.
pub struct Runner<'a> {
    db: &'a dyn Database,
    registry: &'a Registry,
}

impl<'a> Runner<'a> {
    pub fn new(db: &'a dyn Database, registry: &'a Registry) -> Self {
        Self { db, registry }
    }

    /// Apply (`Up`) or reverse (`Down`) registered migrations in name
    /// order.
    ///
    /// Forward runs skip migrations that already have a ledger row; that
    /// is the only automatic skip. Drift is reported but never blocks.
    /// A script failure aborts the run unless `force`, in which case it
    /// is logged and the migration is left unrecorded so the next run
    /// retries it.
    pub fn run_latest(&self, direction: Direction, force: bool) -> MigrateResult<RunSummary> {
        let ledger = Ledger::new(self.db);
        ledger.ensure()?;

        let next_batch = match direction {
            Direction::Up => ledger.latest_batch()? + 1,
            Direction::Down => 0,
        };

        let ordered = self.registry.ordered(direction);
        log::info!(
            "{} registered migrations ({}) on {}",
            ordered.len(),
            direction,
            self.db.db_type()
        );

        let mut summary = RunSummary {
            batch: direction.is_up().then_some(next_batch),
            ..RunSummary::default()
        };

        for migration in ordered {
            let state = status(&ledger, migration)?;

            if direction.is_up() && state.has_run {
                log::debug!("migrate :: SKIP :: {}", migration.name);
                summary.skipped.push(migration.name.clone());
                continue;
            }

            if state.has_drifted {
                log::warn!(
                    "migration '{}' has changed since it was applied; migrations should not be edited once live",
                    migration.name
                );
                summary.drifted.push(migration.name.clone());
            }

            if let Err(e) = self.run_script(migration, direction) {
                if force {
                    log::error!(
                        "migration '{}' failed, continuing under force: {e}",
                        migration.name
                    );
                    summary.failed.push(migration.name.clone());
                    continue;
                }
                return Err(e);
            }

            match direction {
                Direction::Up => ledger.insert(migration, next_batch)?,
                Direction::Down => ledger.delete(&migration.name)?,
            }
            summary.applied.push(migration.name.clone());
        }

        Ok(summary)
    }

    /// Reverse the `num_batches` most recently created batches, whole
    /// batches only.
    ///
    /// Every record must resolve to a registered definition, and the
    /// stored hash must match that definition's current content unless
    /// `force`. Batch numbering is never rewritten; the current batch
    /// after a rollback is simply the remaining maximum.
    pub fn rollback(&self, num_batches: usize, force: bool) -> MigrateResult<RollbackSummary> {
        let ledger = Ledger::new(self.db);
        ledger.ensure()?;

        let batches = ledger.all_batches()?;
        let mut summary = RollbackSummary::default();

        for &batch in batches.iter().take(num_batches) {
            log::info!("rolling back batch {batch}");

            for record in ledger.batch_records(batch)? {
                let migration = self.registry.find(&record.name).ok_or_else(|| {
                    MigrateError::Unregistered {
                        name: record.name.clone(),
                    }
                })?;

                if !force && migration.checksum() != record.content_hash {
                    return Err(MigrateError::Drifted {
                        name: record.name.clone(),
                    });
                }

                if let Err(e) = self.run_script(migration, Direction::Down) {
                    if force {
                        log::error!(
                            "rollback of '{}' failed, continuing under force: {e}",
                            record.name
                        );
                        summary.failed.push(record.name);
                        continue;
                    }
                    return Err(e);
                }

                ledger.delete(&record.name)?;
                summary.reversed.push(record.name);
            }

            summary.batches.push(batch);
        }

        Ok(summary)
    }

    /// Run one script through the batch primitive (migration scripts may
    /// hold multiple statements).
    fn run_script(&self, migration: &Migration, direction: Direction) -> MigrateResult<()> {
        log::info!("migrate :: {} :: {}", direction.tag(), migration.name);
        self.db
            .execute_batch(migration.script(direction))
            .map_err(|e| MigrateError::ScriptFailed {
                name: migration.name.clone(),
                direction,
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
