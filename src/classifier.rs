//! Query classifier
//!
//! Decides which allow-listed template a raw query belongs to and splits off
//! the caller-supplied fragment. Template lookup uses the catalog's loose
//! containment rule; the fragment is whatever follows the first
//! `template.len()` bytes of the raw query. A query that embeds a template
//! somewhere other than its start therefore produces a fragment containing
//! template text, which the sanitizer rejects.

use crate::query_catalog::{QueryCatalog, QueryTemplate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'c, 'q> {
    /// No catalog entry occurs in the query
    NoMatch,
    /// The query is the template itself (ignoring case)
    ExactMatch(&'c QueryTemplate),
    /// The query carries trailing text beyond the template
    TemplateWithFragment {
        template: &'c QueryTemplate,
        fragment: &'q str,
    },
}

impl<'c, 'q> Classification<'c, 'q> {
    pub fn template(&self) -> Option<&'c QueryTemplate> {
        match *self {
            Classification::NoMatch => None,
            Classification::ExactMatch(t) => Some(t),
            Classification::TemplateWithFragment { template, .. } => Some(template),
        }
    }
}

pub fn classify<'c, 'q>(catalog: &'c QueryCatalog, query: &'q str) -> Classification<'c, 'q> {
    let Some(template) = catalog.find_template(query) else {
        return Classification::NoMatch;
    };

    if query.len() == template.len() {
        return Classification::ExactMatch(template);
    }

    Classification::TemplateWithFragment {
        template,
        fragment: fragment_after(query, template.len()),
    }
}

/// Text from byte `offset` to the end. An offset inside a multi-byte
/// character moves back to that character's start.
fn fragment_after(query: &str, offset: usize) -> &str {
    let mut start = offset.min(query.len());
    while !query.is_char_boundary(start) {
        start -= 1;
    }
    &query[start..]
}
