//! Approximate string matching.
//!
//! A query is matched against a field as a fuzzy *substring*: the best
//! substring of the field within a bounded number of edits. For a pattern of
//! `m` chars, with `e(j)` the fewest edits for a substring ending at field
//! char `j` and `s(j) = max(0, j + 1 - m)` its approximate start, the
//! dissimilarity is
//!
//! ```text
//! min over j of  e(j) / m  +  |s(j) - location| / distance
//! ```
//!
//! clamped to 1.0. The second term favours matches near the start of a field
//! over equally good matches deep inside a long description.
//!
//! Patterns of up to 64 chars run a Wu-Manber bit-parallel scan; longer
//! patterns fall back to the equivalent Sellers dynamic program. Both produce
//! identical scores.

use crate::config::MatcherOptions;
use std::collections::HashMap;

/// Longest pattern handled by the bit-parallel scan.
pub const MAX_BITAP_CHARS: usize = 64;

/// A lower-cased query compiled for repeated matching.
#[derive(Debug, Clone)]
pub struct Pattern {
    text: String,
    chars: Vec<char>,
    masks: HashMap<char, u64>,
}

impl Pattern {
    /// Compile `query`. The query is lower-cased; callers usually pass text
    /// that is already normalized.
    pub fn new(query: &str) -> Self {
        let text = query.to_lowercase();
        let chars: Vec<char> = text.chars().collect();

        let mut masks = HashMap::new();
        if chars.len() <= MAX_BITAP_CHARS {
            for (i, c) in chars.iter().enumerate() {
                *masks.entry(*c).or_insert(0u64) |= 1u64 << i;
            }
        }

        Self { text, chars, masks }
    }

    /// The lower-cased pattern text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    fn mask(&self, c: char) -> u64 {
        self.masks.get(&c).copied().unwrap_or(0)
    }
}

/// Fuzzy matcher configured with a threshold and location preference.
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    options: MatcherOptions,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(MatcherOptions::default())
    }
}

impl Matcher {
    pub fn new(options: MatcherOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MatcherOptions {
        &self.options
    }

    /// Match `pattern` against a lower-cased `field` using the configured
    /// threshold.
    #[inline]
    pub fn score(&self, pattern: &Pattern, field: &str) -> Option<f64> {
        self.score_within(pattern, field, self.options.threshold)
    }

    /// Match `pattern` against a lower-cased `field`, accepting dissimilarity
    /// up to `max_dissimilarity`.
    ///
    /// Empty patterns and empty fields never match. Patterns shorter than
    /// `min_query_chars` only match as an exact prefix of the field.
    pub fn score_within(&self, pattern: &Pattern, field: &str, max_dissimilarity: f64) -> Option<f64> {
        if pattern.is_empty() || field.is_empty() {
            return None;
        }

        if pattern.len() < self.options.min_query_chars {
            return field.starts_with(pattern.as_str()).then_some(0.0);
        }

        if field == pattern.as_str() {
            return Some(0.0);
        }

        let text: Vec<char> = field.chars().collect();
        let score = if pattern.len() <= MAX_BITAP_CHARS {
            self.bitap(pattern, &text, max_dissimilarity)
        } else {
            self.sellers(pattern, &text)
        }?;

        (score <= max_dissimilarity).then_some(score)
    }

    /// Convenience wrapper compiling `query` on the fly.
    pub fn match_str(&self, query: &str, field: &str, max_dissimilarity: f64) -> Option<f64> {
        self.score_within(&Pattern::new(query), &field.to_lowercase(), max_dissimilarity)
    }

    fn location_cost(&self, start: usize) -> f64 {
        let offset = start.abs_diff(self.options.location);
        if self.options.distance == 0 {
            return if offset == 0 { 0.0 } else { 1.0 };
        }
        offset as f64 / self.options.distance as f64
    }

    fn combine(&self, errors: usize, pattern_len: usize, end: usize) -> f64 {
        let start = (end + 1).saturating_sub(pattern_len);
        (errors as f64 / pattern_len as f64 + self.location_cost(start)).min(1.0)
    }

    /// Wu-Manber shift-and scan with one state word per error level.
    ///
    /// Bit `i` of `state[d]` is set when the first `i + 1` pattern chars match
    /// a substring ending at the current field char with at most `d` edits.
    fn bitap(&self, pattern: &Pattern, text: &[char], max_dissimilarity: f64) -> Option<f64> {
        let m = pattern.len();
        let max_errors = ((max_dissimilarity * m as f64).floor() as usize).min(m - 1);
        let match_bit = 1u64 << (m - 1);

        let mut state: Vec<u64> = (0..=max_errors).map(|d| (1u64 << d) - 1).collect();
        let mut best: Option<f64> = None;

        for (j, &c) in text.iter().enumerate() {
            let mask = pattern.mask(c);

            let mut previous_level_old = state[0];
            state[0] = ((state[0] << 1) | 1) & mask;

            for d in 1..=max_errors {
                let old = state[d];
                state[d] = (((old << 1) | 1) & mask)
                    | previous_level_old
                    | ((previous_level_old | state[d - 1]) << 1)
                    | 1;
                previous_level_old = old;
            }

            if let Some(errors) = state.iter().position(|word| word & match_bit != 0) {
                let score = self.combine(errors, m, j);
                if best.is_none_or(|b| score < b) {
                    best = Some(score);
                }
            }

            // Later ends only start further away from `location`.
            if let Some(b) = best {
                let start = (j + 1).saturating_sub(m);
                if start >= self.options.location && self.location_cost(start) >= b {
                    break;
                }
            }
        }

        best
    }

    /// Sellers edit-distance scan: the Levenshtein recurrence with a free
    /// starting position in the field, kept to two rolling columns.
    fn sellers(&self, pattern: &Pattern, text: &[char]) -> Option<f64> {
        let m = pattern.len();
        let mut prev: Vec<usize> = (0..=m).collect();
        let mut curr = vec![0; m + 1];
        let mut best: Option<f64> = None;

        for (j, &c) in text.iter().enumerate() {
            curr[0] = 0;
            for i in 1..=m {
                let cost = if pattern.chars[i - 1] == c { 0 } else { 1 };
                curr[i] = (prev[i] + 1).min(curr[i - 1] + 1).min(prev[i - 1] + cost);
            }
            std::mem::swap(&mut prev, &mut curr);

            let score = self.combine(prev[m], m, j);
            if best.is_none_or(|b| score < b) {
                best = Some(score);
            }
        }

        best
    }
}

/// Case-sensitive Levenshtein distance over chars, with the two-row
/// optimisation.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let n = b_chars.len();
    if a_chars.is_empty() {
        return n;
    }
    if n == 0 {
        return a_chars.len();
    }

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0; n + 1];

    for (i, ac) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for j in 1..=n {
            let cost = if *ac == b_chars[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn matcher() -> Matcher {
        Matcher::default()
    }

    #[test]
    fn test_identical_is_zero() {
        assert_eq!(matcher().match_str("sultan", "Sultan", 0.4), Some(0.0));
    }

    #[test]
    fn test_exact_substring_at_start_is_zero() {
        assert_eq!(matcher().match_str("sultan", "sultan's diner", 0.4), Some(0.0));
    }

    #[test]
    fn test_later_position_costs_distance() {
        let score = matcher().match_str("sultan", "al sultan grill", 0.4).unwrap();
        assert!((score - 0.03).abs() < 1e-12, "score {}", score);
    }

    #[test]
    fn test_typo_tolerated() {
        // one edit out of seven chars
        let score = matcher().match_str("lebanse", "lebanese", 0.4).unwrap();
        assert!(score > 0.0 && score <= 0.2, "score {}", score);
    }

    #[test]
    fn test_too_many_edits_rejected() {
        assert_eq!(matcher().match_str("pizza", "sushi bar", 0.4), None);
    }

    #[test]
    fn test_empty_query_never_matches() {
        assert_eq!(matcher().match_str("", "anything", 1.0), None);
        assert_eq!(matcher().match_str("abc", "", 1.0), None);
    }

    #[test]
    fn test_single_char_uses_prefix_only() {
        let m = matcher();
        assert_eq!(m.match_str("s", "Sushi Bar", 0.4), Some(0.0));
        assert_eq!(m.match_str("b", "Sushi Bar", 0.4), None);
    }

    #[test]
    fn test_query_longer_than_field() {
        assert_eq!(matcher().match_str("mediterranean", "med", 0.4), None);
    }

    #[test]
    fn test_far_match_in_long_field_rejected() {
        let field = format!("{}pizza", "x".repeat(60));
        assert_eq!(matcher().match_str("pizza", &field, 0.4), None);
        assert!(matcher().match_str("pizza", &field, 1.0).is_some());
    }

    #[test]
    fn test_zero_distance_demands_location() {
        let m = Matcher::new(MatcherOptions::default().with_limits(0.4, 0));
        assert_eq!(m.match_str("bar", "bar & grill", 0.4), Some(0.0));
        assert_eq!(m.match_str("grill", "bar & grill", 0.4), None);
    }

    #[test]
    fn test_long_pattern_uses_sellers() {
        let field = "a".repeat(70) + "b";
        let query = "a".repeat(69) + "c";
        let score = matcher().match_str(&query, &field, 0.4).unwrap();
        assert!(score < 0.05, "score {}", score);
    }

    #[test]
    fn test_unicode_field() {
        assert_eq!(matcher().match_str("café", "Café Younes", 0.4), Some(0.0));
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein_distance("hello", "hello"), 0);
        assert_eq!(levenshtein_distance("hello", "hallo"), 1);
        assert_eq!(levenshtein_distance("helo", "hello"), 1);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
    }

    /// Brute-force reference: best score over all substrings.
    fn reference_score(m: &Matcher, pattern: &str, field: &str) -> f64 {
        let p: Vec<char> = pattern.chars().collect();
        let t: Vec<char> = field.chars().collect();
        let mut best = f64::INFINITY;
        for end in 0..t.len() {
            let errors = (0..=end + 1)
                .map(|start| {
                    let sub: String = t[start..end + 1].iter().collect();
                    levenshtein_distance(&sub, pattern)
                })
                .min()
                .unwrap_or(p.len());
            best = best.min(m.combine(errors, p.len(), end));
        }
        best
    }

    proptest! {
        #[test]
        fn prop_bitap_matches_sellers(pattern in "[abc]{2,8}", field in "[abcd ]{1,30}") {
            let m = matcher();
            let compiled = Pattern::new(&pattern);
            let text: Vec<char> = field.chars().collect();
            let fast = m.bitap(&compiled, &text, 0.4).filter(|s| *s <= 0.4);
            let slow = m.sellers(&compiled, &text).filter(|s| *s <= 0.4);
            prop_assert_eq!(fast, slow);
        }

        #[test]
        fn prop_sellers_matches_brute_force(pattern in "[ab]{2,5}", field in "[abc]{1,12}") {
            let m = matcher();
            let compiled = Pattern::new(&pattern);
            let text: Vec<char> = field.chars().collect();
            let dp = m.sellers(&compiled, &text).unwrap();
            let brute = reference_score(&m, &pattern, &field);
            prop_assert!((dp - brute).abs() < 1e-12, "dp {} brute {}", dp, brute);
        }

        #[test]
        fn prop_score_is_bounded(pattern in "[a-z]{0,10}", field in "[a-z ]{0,40}") {
            if let Some(score) = matcher().match_str(&pattern, &field, 1.0) {
                prop_assert!((0.0..=1.0).contains(&score));
            }
        }
    }
}
