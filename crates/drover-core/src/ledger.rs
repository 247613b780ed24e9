//! Applied-migration ledger.
//!
//! One row per currently applied migration: name, content hash, batch
//! number, timestamp. A row exists iff the migration's forward script has
//! run and has not since been reversed.

use drover_db::{Database, Value};

use crate::error::{MigrateError, MigrateResult};
use crate::migration::Migration;

/// Idempotent DDL for the ledger table. The ledger is created on every
/// run, never migrated itself.
const CREATE_LEDGER_SQL: &str = "\
    CREATE SEQUENCE IF NOT EXISTS migration_id_seq;
    CREATE TABLE IF NOT EXISTS migration (
        id           BIGINT PRIMARY KEY DEFAULT nextval('migration_id_seq'),
        name         VARCHAR NOT NULL,
        batch        BIGINT NOT NULL,
        content_hash VARCHAR NOT NULL,
        applied_at   TIMESTAMP NOT NULL DEFAULT now()
    );";

/// `applied_at` is cast to text in SQL so row decoding stays
/// store-agnostic.
const SELECT_RECORD_COLUMNS: &str = "name, content_hash, batch, CAST(applied_at AS VARCHAR)";

/// One persisted ledger row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerRecord {
    pub name: String,
    pub content_hash: String,
    pub batch: i64,
    pub applied_at: String,
}

/// Ledger access over an injected [`Database`].
pub struct Ledger<'a> {
    db: &'a dyn Database,
}

impl<'a> Ledger<'a> {
    pub fn new(db: &'a dyn Database) -> Self {
        Self { db }
    }

    /// Create the ledger table if it does not already exist.
    ///
    /// Safe to call unconditionally at the start of every run.
    pub fn ensure(&self) -> MigrateResult<()> {
        self.db
            .execute_batch(CREATE_LEDGER_SQL)
            .map_err(|e| MigrateError::LedgerInit(e.to_string()))
    }

    /// Look up the record for `name`. `Ok(None)` is the valid
    /// "never applied" state, not an error.
    pub fn find(&self, name: &str) -> MigrateResult<Option<LedgerRecord>> {
        let rows = self.db.query_rows(
            &format!("SELECT {SELECT_RECORD_COLUMNS} FROM migration WHERE name = ?"),
            &[Value::from(name)],
        )?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(decode_record(row)?)),
            None => Ok(None),
        }
    }

    /// Record `migration` as applied in `batch`, hashing its current
    /// content.
    pub fn insert(&self, migration: &Migration, batch: i64) -> MigrateResult<()> {
        self.db.execute(
            "INSERT INTO migration (name, batch, content_hash) VALUES (?, ?, ?)",
            &[
                Value::from(migration.name.as_str()),
                Value::from(batch),
                Value::from(migration.checksum()),
            ],
        )?;
        Ok(())
    }

    /// Delete the record for `name`. Deleting an absent row is a no-op.
    pub fn delete(&self, name: &str) -> MigrateResult<()> {
        self.db
            .execute("DELETE FROM migration WHERE name = ?", &[Value::from(name)])?;
        Ok(())
    }

    /// Highest recorded batch number, or 0 for an empty ledger.
    pub fn latest_batch(&self) -> MigrateResult<i64> {
        let rows = self
            .db
            .query_rows("SELECT COALESCE(MAX(batch), 0) FROM migration", &[])?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| MigrateError::LedgerQuery("MAX(batch) returned no rows".to_string()))?;
        row.first()
            .and_then(Value::as_i64)
            .ok_or_else(|| MigrateError::MalformedRecord("batch is not an integer".to_string()))
    }

    /// Distinct batch numbers, most recent first.
    pub fn all_batches(&self) -> MigrateResult<Vec<i64>> {
        let rows = self.db.query_rows(
            "SELECT DISTINCT batch FROM migration ORDER BY batch DESC",
            &[],
        )?;
        rows.into_iter()
            .map(|row| {
                row.first().and_then(Value::as_i64).ok_or_else(|| {
                    MigrateError::MalformedRecord("batch is not an integer".to_string())
                })
            })
            .collect()
    }

    /// Records in one batch, by name descending so dependents are
    /// reversed before their dependencies.
    pub fn batch_records(&self, batch: i64) -> MigrateResult<Vec<LedgerRecord>> {
        let rows = self.db.query_rows(
            &format!(
                "SELECT {SELECT_RECORD_COLUMNS} FROM migration WHERE batch = ? ORDER BY name DESC"
            ),
            &[Value::from(batch)],
        )?;
        rows.into_iter().map(decode_record).collect()
    }
}

fn decode_record(row: Vec<Value>) -> MigrateResult<LedgerRecord> {
    fn text(cell: Option<&Value>, column: &str) -> MigrateResult<String> {
        cell.and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| MigrateError::MalformedRecord(format!("{column} is not text")))
    }

    let name = text(row.first(), "name")?;
    let content_hash = text(row.get(1), "content_hash")?;
    let batch = row
        .get(2)
        .and_then(Value::as_i64)
        .ok_or_else(|| MigrateError::MalformedRecord("batch is not an integer".to_string()))?;
    let applied_at = text(row.get(3), "applied_at")?;

    Ok(LedgerRecord {
        name,
        content_hash,
        batch,
        applied_at,
    })
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;
