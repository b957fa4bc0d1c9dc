//! In-memory SQLite store
//!
//! Prepared statements are tracked by handle. The compiled statement itself
//! lives in rusqlite's statement cache; the store only keeps the SQL text and
//! the values bound so far, so a handle never borrows the connection.

use std::collections::HashMap;

use rusqlite::types::ValueRef;
use rusqlite::{params_from_iter, Batch, Connection, Params, Statement};

use super::{ColumnValue, Row, StatementHandle, Storage, StorageError};

const STATEMENT_CACHE_CAPACITY: usize = 16;

#[derive(Debug)]
struct PreparedEntry {
    sql: String,
    params: Vec<Option<String>>,
}

pub struct SqliteStore {
    conn: Connection,
    statements: HashMap<StatementHandle, PreparedEntry>,
    next_handle: u64,
}

impl SqliteStore {
    /// Open a fresh in-memory database. Contents vanish with the store.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        conn.set_prepared_statement_cache_capacity(STATEMENT_CACHE_CAPACITY);
        log::debug!("Opened in-memory SQLite database");
        Ok(Self {
            conn,
            statements: HashMap::new(),
            next_handle: 1,
        })
    }

    /// Direct access to the connection, for schema setup outside the gateway.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Number of prepared statements that have not been finalized yet.
    pub fn open_statements(&self) -> usize {
        self.statements.len()
    }
}

impl Storage for SqliteStore {
    fn execute_text(&mut self, sql: &str) -> Result<Vec<Row>, StorageError> {
        ensure_single_statement(&self.conn, sql)?;
        let mut stmt = self.conn.prepare(sql)?;
        if !stmt.readonly() {
            return Err(StorageError::NotReadOnly {
                sql: sql.to_string(),
            });
        }
        collect_rows(&mut stmt, rusqlite::params![])
    }

    fn prepare(&mut self, sql: &str) -> Result<StatementHandle, StorageError> {
        ensure_single_statement(&self.conn, sql)?;
        let param_count = {
            let stmt = self.conn.prepare_cached(sql)?;
            if !stmt.readonly() {
                return Err(StorageError::NotReadOnly {
                    sql: sql.to_string(),
                });
            }
            stmt.parameter_count()
        };

        let handle = StatementHandle::new(self.next_handle);
        self.next_handle += 1;
        self.statements.insert(
            handle,
            PreparedEntry {
                sql: sql.to_string(),
                params: vec![None; param_count],
            },
        );
        log::debug!(
            "Prepared statement {} with {} parameter(s)",
            handle,
            param_count
        );
        Ok(handle)
    }

    fn bind_text(
        &mut self,
        handle: StatementHandle,
        index: usize,
        value: &str,
    ) -> Result<(), StorageError> {
        let entry = self
            .statements
            .get_mut(&handle)
            .ok_or(StorageError::UnknownStatement(handle))?;

        let count = entry.params.len();
        if index == 0 || index > count {
            return Err(StorageError::BindIndex { index, count });
        }
        entry.params[index - 1] = Some(value.to_string());
        Ok(())
    }

    fn execute_prepared(&mut self, handle: StatementHandle) -> Result<Vec<Row>, StorageError> {
        let entry = self
            .statements
            .get(&handle)
            .ok_or(StorageError::UnknownStatement(handle))?;

        let mut stmt = self.conn.prepare_cached(&entry.sql)?;
        collect_rows(&mut stmt, params_from_iter(entry.params.iter()))
    }

    fn finalize(&mut self, handle: StatementHandle) {
        if self.statements.remove(&handle).is_some() {
            log::debug!("Finalized statement {}", handle);
        }
    }
}

/// Refuse SQL text holding more than one statement. `Connection::prepare`
/// compiles only the first one and silently ignores the tail.
fn ensure_single_statement(conn: &Connection, sql: &str) -> Result<(), StorageError> {
    let mut batch = Batch::new(conn, sql);
    let mut count = 0;
    while batch.next()?.is_some() {
        count += 1;
        if count > 1 {
            log::warn!("Refusing multi-statement SQL: {:?}", sql);
            return Err(StorageError::MultipleStatements {
                sql: sql.to_string(),
            });
        }
    }
    Ok(())
}

fn collect_rows<P: Params>(stmt: &mut Statement<'_>, params: P) -> Result<Vec<Row>, StorageError> {
    let column_count = stmt.column_count();
    let mut rows = stmt.query(params)?;

    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(column_count);
        for i in 0..column_count {
            values.push(column_value(row.get_ref(i)?));
        }
        out.push(Row::new(values));
    }
    Ok(out)
}

fn column_value(value: ValueRef<'_>) -> ColumnValue {
    match value {
        ValueRef::Null => ColumnValue::Null,
        ValueRef::Integer(i) => ColumnValue::Integer(i),
        ValueRef::Real(r) => ColumnValue::Real(r),
        ValueRef::Text(t) => ColumnValue::Text(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => ColumnValue::Blob(b.to_vec()),
    }
}
