//! Rendering of query results and rejections for the console.

use std::fmt;

use serde::Serialize;

use crate::gateway::{QueryError, UserRecord};

#[derive(Debug, Serialize)]
pub struct QueryReport<'a> {
    pub sql: &'a str,
    pub record_count: usize,
    pub records: &'a [UserRecord],
}

impl<'a> QueryReport<'a> {
    pub fn new(sql: &'a str, records: &'a [UserRecord]) -> Self {
        QueryReport {
            sql,
            record_count: records.len(),
            records,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for QueryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "SQL: {} ==> {} records found.",
            self.sql, self.record_count
        )?;
        for record in self.records {
            writeln!(
                f,
                "User: {} [UID={} PWD={}]",
                record.name, record.id, record.password
            )?;
        }
        Ok(())
    }
}

/// One-line console message that keeps the rejection categories apart.
pub fn rejection_message(err: &QueryError) -> String {
    match err {
        QueryError::NotAllowlisted => "[SQL ERROR]: invalid SQL query".to_string(),
        QueryError::TemplateNotFound => "[SQL ERROR]: query not found".to_string(),
        QueryError::SuspectedInjection => {
            "[SQL ERROR]: The Submitted Query Contains a Possible SQL Injection Attempt!"
                .to_string()
        }
        QueryError::StorageFailure(message) => format!("[DATABASE ERROR]: {}", message),
    }
}
