use serde::Serialize;

use super::QueryError;
use crate::storage::{ColumnValue, Row};

/// One row of the USERS table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub password: String,
}

impl UserRecord {
    pub fn new(id: i64, name: impl Into<String>, password: impl Into<String>) -> Self {
        UserRecord {
            id,
            name: name.into(),
            password: password.into(),
        }
    }
}

impl TryFrom<Row> for UserRecord {
    type Error = QueryError;

    fn try_from(row: Row) -> Result<Self, Self::Error> {
        if row.len() != 3 {
            return Err(QueryError::StorageFailure(format!(
                "expected 3 columns (id, name, password), got {}",
                row.len()
            )));
        }

        let id = match row.get(0) {
            Some(ColumnValue::Integer(i)) => *i,
            Some(ColumnValue::Text(s)) => s.trim().parse().map_err(|_| {
                QueryError::StorageFailure(format!("id column is not an integer: {}", s))
            })?,
            other => {
                return Err(QueryError::StorageFailure(format!(
                    "id column has unexpected value: {:?}",
                    other
                )))
            }
        };

        Ok(UserRecord {
            id,
            name: text_column(&row, 1, "name")?,
            password: text_column(&row, 2, "password")?,
        })
    }
}

fn text_column(row: &Row, index: usize, column: &str) -> Result<String, QueryError> {
    match row.get(index) {
        Some(ColumnValue::Text(s)) => Ok(s.clone()),
        other => Err(QueryError::StorageFailure(format!(
            "{} column has unexpected value: {:?}",
            column, other
        ))),
    }
}

pub(crate) fn rows_to_records(rows: Vec<Row>) -> Result<Vec<UserRecord>, QueryError> {
    rows.into_iter().map(UserRecord::try_from).collect()
}
