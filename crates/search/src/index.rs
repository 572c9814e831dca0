//! Per-record searchable fields.
//!
//! The index holds, for every catalog record and in catalog order, the
//! normalized text of each searchable field together with its weight. It is
//! rebuilt wholesale; nothing in it is ever patched in place.

use crate::config::FieldWeights;
use crate::query::normalize;
use crate::record::{CatalogRecord, FieldKind};
use std::collections::HashSet;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// One searchable field of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedField {
    pub kind: FieldKind,
    /// Field text, normalized like queries
    pub value: String,
    pub weight: f64,
}

/// The fields of one record.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    pub id: String,
    pub fields: Vec<IndexedField>,
}

impl IndexEntry {
    fn from_record(record: &CatalogRecord, weights: &FieldWeights) -> Self {
        let mut fields = Vec::with_capacity(4 + record.tags.len());
        let mut push = |kind: FieldKind, text: &str, weight: f64| {
            let value = normalize(text);
            if !value.is_empty() {
                fields.push(IndexedField { kind, value, weight });
            }
        };

        push(FieldKind::Name, &record.name, weights.name);
        push(FieldKind::Category, &record.category, weights.category);
        for tag in &record.tags {
            push(FieldKind::Tag, tag, weights.tags);
        }
        if let Some(description) = &record.description {
            push(FieldKind::Description, description, weights.description);
        }
        if let Some(address) = &record.address {
            push(FieldKind::Address, address, weights.address);
        }

        Self { id: record.id.clone(), fields }
    }
}

/// Weighted field index over one catalog snapshot.
#[derive(Debug, Clone)]
pub struct FieldIndex {
    entries: Vec<IndexEntry>,
    weights: FieldWeights,
    fingerprint: u64,
    built_at: Instant,
}

impl FieldIndex {
    /// Build the index for `catalog`.
    ///
    /// # Panics
    /// If `weights` do not sum to 1.0.
    pub fn build(catalog: &[CatalogRecord], weights: &FieldWeights) -> Self {
        assert!(
            weights.sums_to_one(),
            "field weights must sum to 1.0, got {}",
            weights.total()
        );

        let start = Instant::now();
        let mut seen = HashSet::with_capacity(catalog.len());
        let entries: Vec<IndexEntry> = catalog
            .iter()
            .map(|record| {
                if !seen.insert(record.id.as_str()) {
                    warn!(id = %record.id, "Duplicate record id in catalog");
                }
                IndexEntry::from_record(record, weights)
            })
            .collect();

        let index = Self {
            fingerprint: fingerprint(catalog),
            entries,
            weights: *weights,
            built_at: Instant::now(),
        };

        debug!(
            records = index.len(),
            fields = index.field_count(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Built field index"
        );
        index
    }

    /// Entries, positionally aligned with the catalog the index was built from.
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn get(&self, position: usize) -> Option<&IndexEntry> {
        self.entries.get(position)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of indexed fields across all records.
    pub fn field_count(&self) -> usize {
        self.entries.iter().map(|e| e.fields.len()).sum()
    }

    pub fn weights(&self) -> &FieldWeights {
        &self.weights
    }

    /// Content hash of the catalog this index was built from.
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    pub fn built_at(&self) -> Instant {
        self.built_at
    }

    pub fn age(&self) -> Duration {
        self.built_at.elapsed()
    }

    /// True once more than `ttl` has passed since the build.
    pub fn is_stale(&self, ttl: Duration) -> bool {
        self.age() > ttl
    }

    /// True when this index was built from a catalog with the same content.
    pub fn matches(&self, catalog: &[CatalogRecord]) -> bool {
        self.entries.len() == catalog.len() && self.fingerprint == fingerprint(catalog)
    }
}

/// Hash of every id and indexed text of `catalog`, in order.
pub fn fingerprint(catalog: &[CatalogRecord]) -> u64 {
    let mut hasher = DefaultHasher::new();
    catalog.len().hash(&mut hasher);
    for record in catalog {
        record.id.hash(&mut hasher);
        record.name.hash(&mut hasher);
        record.category.hash(&mut hasher);
        record.tags.hash(&mut hasher);
        record.description.hash(&mut hasher);
        record.address.hash(&mut hasher);
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<CatalogRecord> {
        vec![
            CatalogRecord::new("a", "Al Sultan Grill", "Lebanese")
                .with_tags(["Grill", "family"])
                .with_description("Charcoal grills and mezze")
                .with_address("Hamra Street, Beirut"),
            CatalogRecord::new("b", "Sultan's Diner", "American"),
        ]
    }

    #[test]
    fn test_entries_follow_catalog_order() {
        let index = FieldIndex::build(&catalog(), &FieldWeights::default());
        let ids: Vec<&str> = index.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.field_count(), 6 + 2);
    }

    #[test]
    fn test_fields_are_lowercased_and_weighted() {
        let index = FieldIndex::build(&catalog(), &FieldWeights::default());
        let entry = index.get(0).unwrap();
        let kinds: Vec<FieldKind> = entry.fields.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![
                FieldKind::Name,
                FieldKind::Category,
                FieldKind::Tag,
                FieldKind::Tag,
                FieldKind::Description,
                FieldKind::Address
            ]
        );
        assert_eq!(entry.fields[0].value, "al sultan grill");
        assert_eq!(entry.fields[0].weight, 0.40);
        assert_eq!(entry.fields[2].value, "grill");
        assert_eq!(entry.fields[2].weight, 0.20);
    }

    #[test]
    fn test_field_whitespace_is_collapsed() {
        let record = CatalogRecord::new("x", "  Sushi \t Zen ", "Japanese").with_tags(["date   night"]);
        let index = FieldIndex::build(&[record], &FieldWeights::default());
        let values: Vec<&str> = index.get(0).unwrap().fields.iter().map(|f| f.value.as_str()).collect();
        assert_eq!(values, vec!["sushi zen", "japanese", "date night"]);
    }

    #[test]
    fn test_blank_fields_are_skipped() {
        let mut record = CatalogRecord::new("x", "  ", "Cafe");
        record.tags = vec![String::new()];
        let index = FieldIndex::build(&[record], &FieldWeights::default());
        assert_eq!(index.get(0).unwrap().fields.len(), 1);
    }

    #[test]
    fn test_build_is_deterministic() {
        let weights = FieldWeights::default();
        let first = FieldIndex::build(&catalog(), &weights);
        let second = FieldIndex::build(&catalog(), &weights);
        assert_eq!(first.entries(), second.entries());
        assert_eq!(first.fingerprint(), second.fingerprint());
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let index = FieldIndex::build(&catalog(), &FieldWeights::default());
        assert!(index.matches(&catalog()));

        let mut changed = catalog();
        changed[1].name = "Sultan Diner".into();
        assert!(!index.matches(&changed));
        assert!(!index.matches(&catalog()[..1]));
    }

    #[test]
    fn test_fresh_index_is_not_stale() {
        let index = FieldIndex::build(&catalog(), &FieldWeights::default());
        assert!(!index.is_stale(Duration::from_secs(300)));
        assert!(index.is_stale(Duration::ZERO) || index.age() == Duration::ZERO);
    }

    #[test]
    fn test_empty_catalog() {
        let index = FieldIndex::build(&[], &FieldWeights::default());
        assert!(index.is_empty());
        assert!(index.matches(&[]));
    }

    #[test]
    #[should_panic(expected = "sum to 1.0")]
    fn test_unbalanced_weights_panic() {
        let weights = FieldWeights { name: 0.9, ..FieldWeights::default() };
        FieldIndex::build(&catalog(), &weights);
    }
}
