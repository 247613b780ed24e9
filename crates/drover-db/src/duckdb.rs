//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use crate::value::Value;
use duckdb::{params_from_iter, Connection};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path).map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }
}

/// Convert parameter cells into DuckDB values.
fn to_duckdb_params(params: &[Value]) -> Vec<duckdb::types::Value> {
    params
        .iter()
        .map(|v| match v {
            Value::Null => duckdb::types::Value::Null,
            Value::Integer(n) => duckdb::types::Value::BigInt(*n),
            Value::Real(x) => duckdb::types::Value::Double(*x),
            Value::Text(s) => duckdb::types::Value::Text(s.clone()),
        })
        .collect()
}

/// Read one result cell, probing column types in order.
///
/// DuckDB integer columns return `None` for `Option<String>`, so we try
/// i64 -> f64 -> bool -> String; a cell that matches nothing is NULL.
fn read_cell(row: &duckdb::Row<'_>, idx: usize) -> Value {
    if let Ok(Some(n)) = row.get::<_, Option<i64>>(idx) {
        return Value::Integer(n);
    }
    if let Ok(Some(x)) = row.get::<_, Option<f64>>(idx) {
        return Value::Real(x);
    }
    if let Ok(Some(b)) = row.get::<_, Option<bool>>(idx) {
        return Value::Integer(b as i64);
    }
    if let Ok(Some(s)) = row.get::<_, Option<String>>(idx) {
        return Value::Text(s);
    }
    Value::Null
}

impl Database for DuckDbBackend {
    fn execute(&self, sql: &str, params: &[Value]) -> DbResult<usize> {
        let conn = self.lock()?;
        conn.execute(sql, params_from_iter(to_duckdb_params(params)))
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, sql)))
    }

    fn execute_batch(&self, sql: &str) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql)
            .map_err(|e| DbError::ExecutionError(e.to_string()))
    }

    fn query_rows(&self, sql: &str, params: &[Value]) -> DbResult<Vec<Vec<Value>>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| DbError::QueryError(format!("{}: {}", e, sql)))?;

        let rows = stmt
            .query_map(params_from_iter(to_duckdb_params(params)), |row| {
                let col_count = row.as_ref().column_count();
                Ok((0..col_count).map(|i| read_cell(row, i)).collect())
            })
            .map_err(|e| DbError::QueryError(format!("{}: {}", e, sql)))?
            .collect::<Result<Vec<Vec<Value>>, _>>()
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(rows)
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory() {
        let db = DuckDbBackend::in_memory().unwrap();
        assert_eq!(db.db_type(), "duckdb");
    }

    #[test]
    fn test_from_path_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.duckdb");
        let _db = DuckDbBackend::from_path(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_execute_with_params() {
        let db = DuckDbBackend::in_memory().unwrap();
        db.execute_batch("CREATE TABLE t (name VARCHAR, n BIGINT)")
            .unwrap();

        let affected = db
            .execute(
                "INSERT INTO t (name, n) VALUES (?, ?)",
                &[Value::from("alpha"), Value::from(3i64)],
            )
            .unwrap();
        assert_eq!(affected, 1);
    }

    #[test]
    fn test_query_rows_typed_cells() {
        let db = DuckDbBackend::in_memory().unwrap();
        db.execute_batch(
            "CREATE TABLE t (name VARCHAR, n BIGINT, x DOUBLE);
             INSERT INTO t VALUES ('alpha', 3, 1.5), ('beta', NULL, NULL);",
        )
        .unwrap();

        let rows = db
            .query_rows("SELECT name, n, x FROM t ORDER BY name", &[])
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], Value::Text("alpha".into()));
        assert_eq!(rows[0][1], Value::Integer(3));
        assert_eq!(rows[0][2], Value::Real(1.5));
        assert_eq!(rows[1][1], Value::Null);
        assert_eq!(rows[1][2], Value::Null);
    }

    #[test]
    fn test_query_rows_with_filter_param() {
        let db = DuckDbBackend::in_memory().unwrap();
        db.execute_batch(
            "CREATE TABLE t (name VARCHAR);
             INSERT INTO t VALUES ('alpha'), ('beta');",
        )
        .unwrap();

        let rows = db
            .query_rows("SELECT name FROM t WHERE name = ?", &[Value::from("beta")])
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0].as_str(), Some("beta"));
    }

    #[test]
    fn test_execute_batch_multiple_statements() {
        let db = DuckDbBackend::in_memory().unwrap();
        db.execute_batch("CREATE TABLE t1 (id INT); CREATE TABLE t2 (id INT);")
            .unwrap();

        let rows = db
            .query_rows(
                "SELECT COUNT(*) FROM information_schema.tables WHERE table_name IN ('t1', 't2')",
                &[],
            )
            .unwrap();
        assert_eq!(rows[0][0], Value::Integer(2));
    }

    #[test]
    fn test_bad_sql_is_an_error() {
        let db = DuckDbBackend::in_memory().unwrap();
        assert!(db.execute_batch("NOT REAL SQL").is_err());
        assert!(db.query_rows("SELECT FROM nowhere", &[]).is_err());
    }
}
