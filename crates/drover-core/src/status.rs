//! Applied/drifted status oracle.

use crate::error::MigrateResult;
use crate::ledger::Ledger;
use crate::migration::Migration;

/// Whether a migration has been applied, and whether its content has
/// changed since it was recorded.
///
/// Drift is a derived flag on the applied state, not a state of its own:
/// a never-applied migration is vacuously undrifted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MigrationStatus {
    pub has_run: bool,
    pub has_drifted: bool,
}

/// Report the ledger status of one definition.
///
/// An absent ledger row is the valid "never applied" state; any other
/// lookup failure propagates and aborts the caller.
pub fn status(ledger: &Ledger<'_>, migration: &Migration) -> MigrateResult<MigrationStatus> {
    match ledger.find(&migration.name)? {
        None => Ok(MigrationStatus::default()),
        Some(record) => Ok(MigrationStatus {
            has_run: true,
            has_drifted: record.content_hash != migration.checksum(),
        }),
    }
}
