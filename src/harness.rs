//! Adversarial query generator
//!
//! Produces tautology and quote-breaking variants of a legitimate WHERE-clause
//! query so the gateway's rejection path can be exercised. It validates
//! nothing itself. The randomness source is owned by the generator; a seeded
//! generator replays the same sequence of variants.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Clauses appended to the base query, one per variant.
pub const INJECTION_CLAUSES: [&str; 4] = [
    " or 1=1;",
    " or 2=2;",
    " or 'hi'='hi';",
    " or 'hack'='hack';",
];

const WHERE_KEYWORD: &str = " where ";

pub struct InjectionGenerator<R: Rng = StdRng> {
    rng: R,
}

impl InjectionGenerator<StdRng> {
    /// Replayable generator.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_os_rng() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }
}

impl<R: Rng> InjectionGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        InjectionGenerator { rng }
    }

    /// Append a randomly chosen clause to `base_query`.
    pub fn inject(&mut self, base_query: &str) -> String {
        let clause = INJECTION_CLAUSES[self.rng.random_range(0..INJECTION_CLAUSES.len())];
        apply_clause(base_query, clause)
    }
}

/// Drop one trailing `;` and append `clause`. Queries without a WHERE clause
/// come back unchanged.
pub fn apply_clause(base_query: &str, clause: &str) -> String {
    if !base_query.to_ascii_lowercase().contains(WHERE_KEYWORD) {
        log::debug!("No WHERE clause to widen in {:?}", base_query);
        return base_query.to_string();
    }

    let trimmed = base_query.strip_suffix(';').unwrap_or(base_query);
    format!("{}{}", trimmed, clause)
}
