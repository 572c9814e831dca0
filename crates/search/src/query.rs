//! Query normalization and expansion.

use crate::synonyms::SynonymTable;

/// Meal and dining words that become query variants of their own.
pub const DINING_TERMS: &[&str] = &[
    "restaurant",
    "food",
    "eat",
    "dining",
    "meal",
    "lunch",
    "dinner",
    "breakfast",
    "brunch",
];

/// Trim, lower-case and collapse whitespace runs to a single space.
pub fn normalize(query: &str) -> String {
    query.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Derives the query variants a search runs.
#[derive(Debug, Clone, Copy)]
pub struct QueryExpander {
    table: &'static SynonymTable,
}

impl Default for QueryExpander {
    fn default() -> Self {
        Self::new(SynonymTable::global())
    }
}

impl QueryExpander {
    pub fn new(table: &'static SynonymTable) -> Self {
        Self { table }
    }

    /// Expand `raw` into deduplicated, lower-cased query variants.
    ///
    /// The normalized query always comes first. Each synonym variant found
    /// in it adds its canonical cuisine and the variant itself; each dining
    /// term found in it adds the term. A blank query expands to nothing.
    pub fn expand(&self, raw: &str) -> Vec<String> {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            return Vec::new();
        }

        let mut variants = vec![normalized.clone()];
        let mut add = |candidate: String| {
            if !variants.contains(&candidate) {
                variants.push(candidate);
            }
        };

        for (variant, canonical) in self.table.contained_variants(&normalized) {
            add(canonical.to_lowercase());
            add(variant.to_string());
        }
        for term in DINING_TERMS.iter().filter(|t| normalized.contains(**t)) {
            add(term.to_string());
        }

        variants
    }
}
