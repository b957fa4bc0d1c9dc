//! Scoped prepared statement
//!
//! Holds the store mutably for its whole lifetime and finalizes the handle
//! when dropped, so every exit from the gateway releases it.

use crate::query_catalog::QueryTemplate;
use crate::sanitizer::SanitizedFragment;
use crate::storage::{Row, StatementHandle, Storage, StorageError};

pub struct BoundStatement<'s, S: Storage + ?Sized> {
    store: &'s mut S,
    handle: StatementHandle,
}

impl<'s, S: Storage + ?Sized> BoundStatement<'s, S> {
    /// Prepare `template + " ?"`. Only catalog templates can get here.
    pub(crate) fn prepare(store: &'s mut S, template: &QueryTemplate) -> Result<Self, StorageError> {
        let sql = template.placeholder_sql();
        let handle = store.prepare(&sql)?;
        Ok(BoundStatement { store, handle })
    }

    pub fn handle(&self) -> StatementHandle {
        self.handle
    }

    pub fn bind(&mut self, value: &SanitizedFragment) -> Result<(), StorageError> {
        self.store.bind_text(self.handle, 1, value.as_str())
    }

    pub fn fetch(&mut self) -> Result<Vec<Row>, StorageError> {
        self.store.execute_prepared(self.handle)
    }
}

impl<S: Storage + ?Sized> Drop for BoundStatement<'_, S> {
    fn drop(&mut self) {
        self.store.finalize(self.handle);
    }
}
