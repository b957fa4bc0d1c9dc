use std::fmt;

use serde::{Deserialize, Serialize};

/// Shape of an allow-listed query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    /// Complete statement with no parameter slot
    Fixed,
    /// Prefix that is completed by a single bound value
    Parameterized,
}

/// One permitted query shape.
///
/// Only [`super::QueryCatalog`] creates templates, so holding a
/// `&QueryTemplate` means the text was on the allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTemplate {
    text: String,
    normalized: String,
    kind: TemplateKind,
}

impl QueryTemplate {
    pub(crate) fn new(text: impl Into<String>, kind: TemplateKind) -> Self {
        let text = text.into();
        let normalized = normalize(&text);
        QueryTemplate {
            text,
            normalized,
            kind,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn kind(&self) -> TemplateKind {
        self.kind
    }

    pub fn is_parameterized(&self) -> bool {
        self.kind == TemplateKind::Parameterized
    }

    /// Byte length of the template text. Normalization preserves it.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Template text followed by the single bind placeholder.
    pub fn placeholder_sql(&self) -> String {
        format!("{} ?", self.text)
    }

    /// Case-insensitive containment of this template in `normalized_query`.
    pub fn matches(&self, normalized_query: &str) -> bool {
        normalized_query.contains(&self.normalized)
    }
}

impl fmt::Display for QueryTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// ASCII lower-casing. Byte offsets in the result line up with the input.
pub fn normalize(query: &str) -> String {
    query.to_ascii_lowercase()
}
