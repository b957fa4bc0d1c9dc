use thiserror::Error;

use crate::storage::StorageError;

/// Why a gateway call did not produce records.
///
/// The first three are security rejections raised before anything reaches
/// the store; `StorageFailure` is an operational error from the store itself.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("invalid SQL query: not on the allow-list")]
    NotAllowlisted,

    #[error("query not found: no parameterized template accepts this input")]
    TemplateNotFound,

    #[error("the submitted query contains a possible SQL injection attempt")]
    SuspectedInjection,

    #[error("database error: {0}")]
    StorageFailure(String),
}

impl QueryError {
    pub fn is_security_rejection(&self) -> bool {
        !matches!(self, QueryError::StorageFailure(_))
    }
}

impl From<StorageError> for QueryError {
    fn from(err: StorageError) -> Self {
        QueryError::StorageFailure(err.to_string())
    }
}
