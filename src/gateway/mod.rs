//! # Gateway Executor
//!
//! Entry point for running caller queries against the store.
//!
//! ## Flow
//!
//! 1. Allow-list check on the whole query (`NotAllowlisted` on failure)
//! 2. Queries the caller declares free of user input run verbatim
//! 3. Otherwise the query is classified against the catalog, the fragment
//!    after the template is sanitized and whitelisted, and the template plus
//!    one `?` placeholder is prepared with the fragment bound as its value
//!
//! The fragment never becomes part of the SQL text sent to the store. The
//! prepared statement is owned by a [`BoundStatement`] guard and finalized on
//! every return path.

use crate::classifier::{classify, Classification};
use crate::query_catalog::{QueryCatalog, QueryTemplate, TemplateKind};
use crate::sanitizer;
use crate::storage::{Storage, StorageError};

mod bound_statement;
mod errors;
mod record;
mod session;

pub use bound_statement::BoundStatement;
pub use errors::QueryError;
pub use record::UserRecord;
pub use session::QuerySession;

use record::rows_to_records;

pub struct Gateway<S: Storage> {
    catalog: QueryCatalog,
    store: S,
}

impl<S: Storage> Gateway<S> {
    pub fn new(catalog: QueryCatalog, store: S) -> Self {
        Gateway { catalog, store }
    }

    pub fn catalog(&self) -> &QueryCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Run `query` and return the records it produces.
    ///
    /// `caller_supplies_input` tells the gateway whether the query text
    /// carries anything the caller did not write themselves. Nothing is
    /// retried; a failed call is reported once.
    pub fn execute(
        &mut self,
        query: &str,
        caller_supplies_input: bool,
    ) -> Result<Vec<UserRecord>, QueryError> {
        if !self.catalog.is_allowed(query) {
            log::warn!("Rejected query outside the allow-list: {:?}", query);
            return Err(QueryError::NotAllowlisted);
        }

        if !caller_supplies_input {
            log::debug!("Executing trusted query verbatim");
            let rows = self.store.execute_text(query).map_err(storage_failure)?;
            return rows_to_records(rows);
        }

        let Gateway { catalog, store } = self;
        match classify(catalog, query) {
            Classification::NoMatch => {
                log::warn!("No template found for query: {:?}", query);
                Err(QueryError::TemplateNotFound)
            }
            Classification::ExactMatch(template) => match template.kind() {
                TemplateKind::Fixed => {
                    log::debug!("Exact match on fixed template `{}`", template);
                    let rows = store
                        .execute_text(template.text())
                        .map_err(storage_failure)?;
                    rows_to_records(rows)
                }
                TemplateKind::Parameterized => execute_bound(store, template, ""),
            },
            Classification::TemplateWithFragment { template, fragment } => {
                if !template.is_parameterized() {
                    log::warn!(
                        "Input appended to fixed template `{}`: {:?}",
                        template,
                        fragment
                    );
                    return Err(QueryError::TemplateNotFound);
                }
                execute_bound(store, template, fragment)
            }
        }
    }
}

fn execute_bound<S: Storage + ?Sized>(
    store: &mut S,
    template: &QueryTemplate,
    raw_fragment: &str,
) -> Result<Vec<UserRecord>, QueryError> {
    let Some(fragment) = sanitizer::clean(raw_fragment) else {
        log::warn!(
            "Possible SQL injection attempt against `{}`: {:?}",
            template,
            raw_fragment
        );
        return Err(QueryError::SuspectedInjection);
    };

    log::debug!("Binding fragment {:?} to template `{}`", fragment.as_str(), template);
    let mut statement = BoundStatement::prepare(store, template).map_err(storage_failure)?;
    statement.bind(&fragment).map_err(storage_failure)?;
    let rows = statement.fetch().map_err(storage_failure)?;
    drop(statement);

    rows_to_records(rows)
}

fn storage_failure(err: StorageError) -> QueryError {
    log::error!("Data failed to be queried from the store: {}", err);
    err.into()
}
