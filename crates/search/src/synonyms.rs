//! Cuisine synonym table.
//!
//! Maps free-text terms (misspellings, translations, dishes) onto the
//! canonical cuisine labels used by catalog records. The table is built once
//! per process; lookups are case-insensitive and many-to-one.

use once_cell::sync::Lazy;
use std::collections::{BTreeSet, HashMap};

/// Canonical cuisine name followed by its lower-case variants.
///
/// A variant appears under exactly one cuisine. A canonical name is always a
/// variant of itself, so "mediterranean" lives under Mediterranean rather
/// than Greek. Words tied to one cuisine's own dishes or country sit under
/// that cuisine ("thailand", "pad thai", "tom yum" and "coconut" under Thai).
/// Remaining pan-regional words are filed under the first cuisine that
/// claims them ("asian" under Chinese, "bistro" under Cafe, "curry" and
/// "spicy" under Indian, "olive" under Greek).
pub static CUISINE_VARIANTS: &[(&str, &[&str])] = &[
    ("American", &["american", "burger", "burgers", "steakhouse", "steak", "bbq", "barbecue", "usa"]),
    ("Cafe", &["cafe", "coffee", "bistro", "breakfast", "brunch", "bakery", "pastry", "dessert"]),
    ("Chinese", &["chinese", "chineese", "chineze", "asian", "noodles", "dim sum", "wok", "canton", "cantonese"]),
    ("French", &["french", "france", "brasserie", "croissant", "crepe", "patisserie"]),
    ("Greek", &["greek", "greece", "gyro", "souvlaki", "feta", "olive", "moussaka"]),
    ("Indian", &["indian", "india", "curry", "tandoor", "biryani", "naan", "masala", "spicy"]),
    ("International", &["international", "fusion", "global", "world", "mixed", "varied", "diverse"]),
    ("Italian", &["italian", "italain", "itallian", "italy", "pasta", "pizza", "risotto", "gelato"]),
    ("Japanese", &["japanese", "japan", "sushi", "ramen", "tempura", "teriyaki", "sake"]),
    (
        "Lebanese",
        &[
            "lebanese", "lebanse", "lebanees", "lebanise", "lebanon", "arab", "middle eastern", "levantine",
            "hummus", "shawarma", "kebab",
        ],
    ),
    ("Mediterranean", &["mediterranean", "med", "healthy", "fresh", "herbs"]),
    ("Mexican", &["mexican", "mexico", "tex-mex", "texmex", "tacos", "burritos", "quesadilla", "salsa"]),
    ("Seafood", &["seafood", "fish", "shrimp", "crab", "lobster", "oyster", "salmon", "tuna", "ocean"]),
    ("Spanish", &["spanish", "spain", "tapas", "paella", "iberian", "flamenco", "sangria"]),
    ("Thai", &["thai", "thailand", "pad thai", "coconut", "tom yum"]),
];

static TABLE: Lazy<SynonymTable> = Lazy::new(|| SynonymTable::from_entries(CUISINE_VARIANTS));

/// Immutable variant → canonical cuisine lookup.
#[derive(Debug)]
pub struct SynonymTable {
    entries: &'static [(&'static str, &'static [&'static str])],
    by_variant: HashMap<&'static str, &'static str>,
    by_canonical: HashMap<String, usize>,
}

impl SynonymTable {
    /// The process-wide table built from [`CUISINE_VARIANTS`].
    pub fn global() -> &'static SynonymTable {
        &TABLE
    }

    fn from_entries(entries: &'static [(&'static str, &'static [&'static str])]) -> Self {
        let mut by_variant = HashMap::new();
        let mut by_canonical = HashMap::new();

        for (position, (canonical, variants)) in entries.iter().enumerate() {
            by_canonical.insert(canonical.to_lowercase(), position);
            for variant in variants.iter() {
                // First declaration wins; the table test guards against repeats.
                by_variant.entry(*variant).or_insert(*canonical);
            }
        }

        Self { entries, by_variant, by_canonical }
    }

    /// Resolve a term to its canonical cuisine.
    ///
    /// An exact variant match wins; otherwise the longest variant contained
    /// in the term is used, ties broken alphabetically.
    pub fn resolve(&self, term: &str) -> Option<&'static str> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return None;
        }
        if let Some(canonical) = self.by_variant.get(term.as_str()) {
            return Some(*canonical);
        }

        self.by_variant
            .iter()
            .filter(|(variant, _)| term.contains(**variant))
            .max_by(|(a, _), (b, _)| a.len().cmp(&b.len()).then_with(|| b.cmp(a)))
            .map(|(_, canonical)| *canonical)
    }

    /// Every canonical cuisine with a variant contained in `text`.
    pub fn resolve_all(&self, text: &str) -> BTreeSet<&'static str> {
        let text = text.trim().to_lowercase();
        if text.is_empty() {
            return BTreeSet::new();
        }
        self.contained_variants(&text).into_iter().map(|(_, canonical)| canonical).collect()
    }

    /// `(variant, canonical)` pairs for every variant contained in an
    /// already-normalized `text`, in table order.
    pub fn contained_variants(&self, text: &str) -> Vec<(&'static str, &'static str)> {
        self.entries
            .iter()
            .flat_map(|(canonical, variants)| variants.iter().map(move |v| (*v, *canonical)))
            .filter(|(variant, _)| text.contains(variant))
            .collect()
    }

    /// All variants of a canonical cuisine (case-insensitive lookup).
    pub fn expand(&self, canonical: &str) -> BTreeSet<&'static str> {
        self.variants_of(canonical)
            .map(|variants| variants.iter().copied().collect())
            .unwrap_or_default()
    }

    pub(crate) fn variants_of(&self, canonical: &str) -> Option<&'static [&'static str]> {
        let position = *self.by_canonical.get(&canonical.trim().to_lowercase())?;
        Some(self.entries[position].1)
    }

    /// Canonical cuisine names in table order.
    pub fn canonical_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(canonical, _)| *canonical)
    }

    /// Canonical cuisines with their variants, in table order.
    pub fn entries(&self) -> &'static [(&'static str, &'static [&'static str])] {
        self.entries
    }
}

/// Canonical cuisines mentioned anywhere in `text`.
///
/// Used by callers doing structured filtering rather than fuzzy search.
pub fn resolve_cuisine_aliases(text: &str) -> BTreeSet<&'static str> {
    SynonymTable::global().resolve_all(text)
}
