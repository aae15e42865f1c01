//! Term-set comparison of narrative sections.
//!
//! Sections are reduced to case-normalized, stop-word-filtered term sets;
//! similarity is Jaccard (intersection over union). `BTreeSet` keeps the
//! added/removed term lists deterministic.

use std::collections::BTreeSet;

/// Common English and filing boilerplate words excluded from term sets.
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "had", "has", "have",
    "her", "his", "its", "may", "our", "out", "was", "were", "will", "with", "this", "that",
    "these", "those", "from", "they", "their", "been", "more", "other", "such", "which", "would",
    "could", "should", "than", "then", "there", "when", "where", "while", "also", "into", "upon",
    "each", "under", "over", "between", "because", "during", "including", "company", "companys",
    "inc", "item", "part", "form", "fiscal", "year", "years", "million", "billion",
];

const MIN_TERM_LEN: usize = 3;

/// Reduce a cleaned section body to its term set.
pub(crate) fn term_set(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter_map(|word| {
            if word.len() < MIN_TERM_LEN {
                return None;
            }
            let term = word.to_lowercase();
            (!STOP_WORDS.contains(&term.as_str())).then_some(term)
        })
        .collect()
}

/// Jaccard similarity of two term sets, in [0, 1]. Two empty sets are
/// identical by convention.
pub(crate) fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let intersection = a.intersection(b).count() as f64;
    let union = a.union(b).count() as f64;
    (intersection / union).clamp(0.0, 1.0)
}

/// Compare an older and a newer section body.
/// Returns `(similarity, added_terms, removed_terms)`; added means present
/// only in the newer filing, removed means present only in the older.
pub(crate) fn diff_sections(older: &str, newer: &str) -> (f64, Vec<String>, Vec<String>) {
    let older_terms = term_set(older);
    let newer_terms = term_set(newer);

    let similarity = jaccard(&older_terms, &newer_terms);
    let added = newer_terms.difference(&older_terms).cloned().collect();
    let removed = older_terms.difference(&newer_terms).cloned().collect();
    (similarity, added, removed)
}
