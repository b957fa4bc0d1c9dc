//! Shared fixtures for integration tests

use sqlgate::storage::{fixtures, Row, SqliteStore, StatementHandle, Storage, StorageError};
use sqlgate::{Gateway, QueryCatalog};

pub const FRED_QUERY: &str = "SELECT ID, NAME, PASSWORD FROM USERS WHERE NAME='Fred'";

pub fn seeded_store() -> SqliteStore {
    let store = SqliteStore::open_in_memory().expect("in-memory database should open");
    fixtures::seed_users(store.connection()).expect("fixtures should load");
    store
}

pub fn seeded_gateway() -> Gateway<SqliteStore> {
    Gateway::new(QueryCatalog::default(), seeded_store())
}

/// SQLite store that counts statement acquisition and release.
pub struct CountingStore {
    inner: SqliteStore,
    pub prepared: usize,
    pub finalized: usize,
    pub text_queries: Vec<String>,
}

impl CountingStore {
    pub fn new(inner: SqliteStore) -> Self {
        CountingStore {
            inner,
            prepared: 0,
            finalized: 0,
            text_queries: Vec::new(),
        }
    }

    pub fn open_statements(&self) -> usize {
        self.inner.open_statements()
    }
}

impl Storage for CountingStore {
    fn execute_text(&mut self, sql: &str) -> Result<Vec<Row>, StorageError> {
        self.text_queries.push(sql.to_string());
        self.inner.execute_text(sql)
    }

    fn prepare(&mut self, sql: &str) -> Result<StatementHandle, StorageError> {
        let handle = self.inner.prepare(sql)?;
        self.prepared += 1;
        Ok(handle)
    }

    fn bind_text(
        &mut self,
        handle: StatementHandle,
        index: usize,
        value: &str,
    ) -> Result<(), StorageError> {
        self.inner.bind_text(handle, index, value)
    }

    fn execute_prepared(&mut self, handle: StatementHandle) -> Result<Vec<Row>, StorageError> {
        self.inner.execute_prepared(handle)
    }

    fn finalize(&mut self, handle: StatementHandle) {
        self.finalized += 1;
        self.inner.finalize(handle);
    }
}
