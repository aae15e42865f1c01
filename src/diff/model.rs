use serde::Serialize;

use crate::core::{FilingReference, FormType};
use crate::filings::SectionName;

/// How materially a section changed between two filings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Significance {
    /// Similarity ≥ 0.9.
    AlmostIdentical,
    /// Similarity ≥ 0.75.
    MinorEdits,
    /// Similarity ≥ 0.5.
    ModerateChanges,
    /// Similarity < 0.5.
    MajorChanges,
}

impl Significance {
    pub fn from_similarity(similarity: f64) -> Self {
        if similarity >= 0.9 {
            Significance::AlmostIdentical
        } else if similarity >= 0.75 {
            Significance::MinorEdits
        } else if similarity >= 0.5 {
            Significance::ModerateChanges
        } else {
            Significance::MajorChanges
        }
    }
}

/// Comparison of one named section across a company's two most recent
/// filings of a form type. Never mutated after creation; a new comparison
/// produces a new result.
#[derive(Debug, Clone, Serialize)]
pub struct SectionDiff {
    /// The company symbol compared.
    pub symbol: String,
    /// The form type searched.
    pub form_type: FormType,
    /// The section compared.
    pub section: SectionName,
    /// The earlier of the two filings.
    pub older: FilingReference,
    /// The later of the two filings.
    pub newer: FilingReference,
    /// Jaccard similarity of the two term sets, in [0, 1].
    pub similarity: f64,
    /// Terms present only in the newer filing, sorted.
    pub added: Vec<String>,
    /// Terms present only in the older filing, sorted.
    pub removed: Vec<String>,
    /// Label derived from the similarity.
    pub significance: Significance,
}
