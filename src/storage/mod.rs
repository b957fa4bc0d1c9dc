//! Storage collaborator
//!
//! The gateway never talks to a database driver directly. It goes through the
//! [`Storage`] trait, which only knows how to run a literal statement or a
//! prepared statement with bound values. Rows come back as owned data.
//!
//! - [`sqlite::SqliteStore`]: in-memory SQLite implementation
//! - [`fixtures`]: schema and demo users for the USERS table

use std::fmt;

use serde::Serialize;
use thiserror::Error;

pub mod fixtures;
pub mod sqlite;

pub use sqlite::SqliteStore;

/// Opaque identifier for a prepared statement owned by a [`Storage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatementHandle(u64);

impl StatementHandle {
    pub fn new(id: u64) -> Self {
        StatementHandle(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for StatementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single column value as returned by the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColumnValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnValue::Null => write!(f, "NULL"),
            ColumnValue::Integer(i) => write!(f, "{}", i),
            ColumnValue::Real(r) => write!(f, "{}", r),
            ColumnValue::Text(s) => write!(f, "{}", s),
            ColumnValue::Blob(b) => write!(f, "<blob {} bytes>", b.len()),
        }
    }
}

/// Positional tuple of column values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    values: Vec<ColumnValue>,
}

impl Row {
    pub fn new(values: Vec<ColumnValue>) -> Self {
        Row { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ColumnValue> {
        self.values.get(index)
    }

    pub fn values(&self) -> &[ColumnValue] {
        &self.values
    }
}

impl From<Vec<ColumnValue>> for Row {
    fn from(values: Vec<ColumnValue>) -> Self {
        Row::new(values)
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("statement {0} is not open")]
    UnknownStatement(StatementHandle),

    #[error("bind index {index} out of range (statement has {count} parameters)")]
    BindIndex { index: usize, count: usize },

    #[error("statement would modify the database: {sql}")]
    NotReadOnly { sql: String },

    #[error("more than one statement in: {sql}")]
    MultipleStatements { sql: String },

    #[error("storage engine error: {0}")]
    Engine(String),
}

/// Operations the gateway needs from a relational store.
///
/// Implementations hold at most one connection; callers must pair every
/// successful [`Storage::prepare`] with a [`Storage::finalize`].
#[cfg_attr(test, mockall::automock)]
pub trait Storage {
    /// Run a literal SQL statement and return its rows.
    fn execute_text(&mut self, sql: &str) -> Result<Vec<Row>, StorageError>;

    /// Compile a statement containing `?` placeholders.
    fn prepare(&mut self, sql: &str) -> Result<StatementHandle, StorageError>;

    /// Bind a text value to the 1-based parameter `index`.
    fn bind_text(
        &mut self,
        handle: StatementHandle,
        index: usize,
        value: &str,
    ) -> Result<(), StorageError>;

    /// Run a prepared statement with whatever values are currently bound.
    fn execute_prepared(&mut self, handle: StatementHandle) -> Result<Vec<Row>, StorageError>;

    /// Release a prepared statement. Unknown handles are ignored.
    fn finalize(&mut self, handle: StatementHandle);
}
