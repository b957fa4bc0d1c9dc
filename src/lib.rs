//! sqlgate - Allow-listed, parameter-bound query execution
//!
//! This crate runs caller queries against a relational store only when they
//! match a fixed catalog of permitted shapes:
//! - Allow-listed query catalog with case-insensitive matching
//! - Fragment sanitizing and character whitelisting
//! - Parameter binding through prepared statements
//! - Adversarial query generation for exercising the rejection path

pub mod classifier;
pub mod config;
pub mod gateway;
pub mod harness;
pub mod query_catalog;
pub mod report;
pub mod sanitizer;
pub mod storage;

pub use gateway::{Gateway, QueryError, QuerySession, UserRecord};
pub use query_catalog::{QueryCatalog, QueryTemplate, TemplateKind};
