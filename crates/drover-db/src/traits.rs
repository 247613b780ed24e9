//! Database trait definition

use crate::error::DbResult;
use crate::value::Value;

/// Database abstraction trait for Drover
///
/// The migration engine depends on the target store only through this
/// trait: a write primitive for single statements, a batch primitive for
/// opaque migration scripts, and a row query for ledger reads. All calls
/// block until the store responds; timeouts and cancellation are the
/// implementation's concern.
pub trait Database: Send + Sync {
    /// Execute one parameterized statement, returning affected rows
    fn execute(&self, sql: &str, params: &[Value]) -> DbResult<usize>;

    /// Execute a script that may contain multiple statements
    fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Execute a parameterized query and collect all result rows
    fn query_rows(&self, sql: &str, params: &[Value]) -> DbResult<Vec<Vec<Value>>>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
