//! Error types for drover-core

use drover_db::DbError;
use thiserror::Error;

use crate::migration::Direction;

/// Migration engine errors.
///
/// Everything here aborts the operation that raised it; tolerated
/// conditions (drift during a forward run, script failure under force)
/// are logged and reported through run summaries instead of surfacing as
/// errors.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Ledger table creation failed (M001).
    #[error("[M001] Ledger initialization failed: {0}")]
    LedgerInit(String),

    /// A ledger read misbehaved for a reason other than "no matching row" (M002).
    #[error("[M002] Ledger query failed: {0}")]
    LedgerQuery(String),

    /// A migration script failed against the target store (M003).
    #[error("[M003] Migration '{name}' failed ({direction}): {message}")]
    ScriptFailed {
        name: String,
        direction: Direction,
        message: String,
    },

    /// Stored hash no longer matches the registered definition (M004).
    #[error("[M004] Previously applied migration '{name}' has changed since it was applied")]
    Drifted { name: String },

    /// The ledger references a migration that is not registered (M005).
    #[error("[M005] Ledger references migration '{name}' which is not registered")]
    Unregistered { name: String },

    /// A ledger row decoded to an unexpected shape (M006).
    #[error("[M006] Malformed ledger row: {0}")]
    MalformedRecord(String),

    /// Database failure with preserved source chain (M007).
    #[error("[M007] Database error")]
    Db(#[from] DbError),
}

/// Result type alias for [`MigrateError`].
pub type MigrateResult<T> = Result<T, MigrateError>;
