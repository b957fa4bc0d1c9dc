//! Input sanitizer for caller-supplied fragments
//!
//! The accepted character class is ASCII letters and digits, nothing else.
//! Quote characters are stripped first so that a quoted literal such as
//! `'Fred'` reduces to `Fred`; anything that still contains operators,
//! whitespace, punctuation or comment markers is refused outright.

use std::fmt;

/// A fragment that passed [`is_whitelisted`] after [`sanitize`].
///
/// Can only be obtained through [`clean`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedFragment(String);

impl SanitizedFragment {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SanitizedFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Remove every single-quote character.
pub fn sanitize(fragment: &str) -> String {
    fragment.chars().filter(|&c| c != '\'').collect()
}

/// True iff every character is an ASCII letter or digit. Empty input passes.
pub fn is_whitelisted(fragment: &str) -> bool {
    fragment.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Sanitize then check. `None` means the fragment must not be executed.
pub fn clean(fragment: &str) -> Option<SanitizedFragment> {
    let sanitized = sanitize(fragment);
    if is_whitelisted(&sanitized) {
        Some(SanitizedFragment(sanitized))
    } else {
        None
    }
}
