//! # Allow-listed Query Catalog
//!
//! The fixed set of query shapes the gateway will run. Entries are supplied
//! once at startup (code defaults or the deployment config file) and never
//! change afterwards; nothing a caller sends can add to them.
//!
//! Matching is substring containment of the normalized template inside the
//! normalized query. When several templates match, the longest wins.

use thiserror::Error;

pub mod template;

pub use template::{normalize, QueryTemplate, TemplateKind};

use crate::config::TemplateConfig;

pub const SELECT_ALL_USERS: &str = "SELECT * from USERS";
pub const SELECT_USER_BY_NAME: &str = "SELECT ID, NAME, PASSWORD FROM USERS WHERE NAME=";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Query catalog must contain at least one template")]
    Empty,
    #[error("Query template #{index} is blank")]
    BlankTemplate { index: usize },
    #[error("Duplicate query template: `{text}`")]
    Duplicate { text: String },
}

#[derive(Debug, Clone)]
pub struct QueryCatalog {
    templates: Vec<QueryTemplate>,
}

impl QueryCatalog {
    pub fn new<I, S>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (S, TemplateKind)>,
        S: Into<String>,
    {
        let mut templates: Vec<QueryTemplate> = Vec::new();

        for (index, (text, kind)) in entries.into_iter().enumerate() {
            let template = QueryTemplate::new(text, kind);
            if template.text().trim().is_empty() {
                return Err(CatalogError::BlankTemplate { index });
            }
            if let Some(existing) = templates
                .iter()
                .find(|t| t.normalized() == template.normalized())
            {
                return Err(CatalogError::Duplicate {
                    text: existing.text().to_string(),
                });
            }
            for existing in &templates {
                if existing.normalized().contains(template.normalized())
                    || template.normalized().contains(existing.normalized())
                {
                    log::warn!(
                        "Overlapping query templates `{}` and `{}`; the longer one wins",
                        existing,
                        template
                    );
                }
            }
            templates.push(template);
        }

        if templates.is_empty() {
            return Err(CatalogError::Empty);
        }

        log::debug!("Query catalog loaded with {} templates", templates.len());
        Ok(QueryCatalog { templates })
    }

    pub fn from_config(entries: &[TemplateConfig]) -> Result<Self, CatalogError> {
        Self::new(entries.iter().map(|e| (e.sql.clone(), e.kind)))
    }

    /// True iff at least one template occurs in the normalized query.
    pub fn is_allowed(&self, query: &str) -> bool {
        let normalized = normalize(query);
        self.templates.iter().any(|t| t.matches(&normalized))
    }

    /// Longest template contained in the query. Ties go to the entry
    /// registered first.
    pub fn find_template(&self, query: &str) -> Option<&QueryTemplate> {
        let normalized = normalize(query);
        self.templates
            .iter()
            .filter(|t| t.matches(&normalized))
            .fold(None, |best: Option<&QueryTemplate>, t| match best {
                Some(b) if b.len() >= t.len() => Some(b),
                _ => Some(t),
            })
    }

    pub fn templates(&self) -> &[QueryTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for QueryCatalog {
    fn default() -> Self {
        QueryCatalog {
            templates: vec![
                QueryTemplate::new(SELECT_ALL_USERS, TemplateKind::Fixed),
                QueryTemplate::new(SELECT_USER_BY_NAME, TemplateKind::Parameterized),
            ],
        }
    }
}
