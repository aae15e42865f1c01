//! In-memory filing storage shared between the monitor and the engines.
//!
//! The monitor (and on-demand fetch paths) write parsed transactions and
//! narrative sections here; the sentiment and diff engines only read. The
//! store also owns the result caches so computed reports survive across
//! builder instances.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::core::cache::ResultCache;
use crate::core::models::{FilingReference, FormType};
use crate::diff::SectionDiff;
use crate::filings::{FilingSection, OwnershipTransaction};
use crate::sentiment::SentimentReport;

/// A long-form filing's extracted narrative sections.
#[derive(Debug, Clone)]
pub struct NarrativeFiling {
    /// The filing the sections were extracted from.
    pub reference: FilingReference,
    /// Sections found in the document; missing sections are simply absent.
    pub sections: Vec<FilingSection>,
}

#[derive(Default)]
struct StoreInner {
    // symbol (uppercase) -> transactions from all parsed Form 4 filings
    transactions: RwLock<HashMap<String, Vec<OwnershipTransaction>>>,
    // (symbol, form) -> narrative filings, newest first
    narratives: RwLock<HashMap<(String, FormType), Vec<NarrativeFiling>>>,
    // accession numbers already ingested, for poll-cycle dedupe
    seen: RwLock<HashSet<String>>,

    sentiment_cache: ResultCache<SentimentReport>,
    diff_cache: ResultCache<SectionDiff>,
}

/// Shared filing storage. Cloning is cheap; clones share contents.
#[derive(Clone, Default)]
pub struct FilingStore {
    inner: Arc<StoreInner>,
}

impl FilingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an accession number has already been ingested.
    pub async fn is_seen(&self, accession_number: &str) -> bool {
        self.inner.seen.read().await.contains(accession_number)
    }

    /// Record an accession number as ingested. Returns `true` when it was not
    /// seen before, so concurrent ingest paths can use the insert as a claim.
    pub async fn mark_seen(&self, accession_number: &str) -> bool {
        self.inner
            .seen
            .write()
            .await
            .insert(accession_number.to_string())
    }

    /// Drop an accession number from the seen set so a later cycle retries it.
    pub async fn unmark_seen(&self, accession_number: &str) {
        self.inner.seen.write().await.remove(accession_number);
    }

    /// Append ownership transactions for a symbol.
    pub async fn insert_transactions(&self, symbol: &str, txns: Vec<OwnershipTransaction>) {
        if txns.is_empty() {
            return;
        }
        let mut guard = self.inner.transactions.write().await;
        guard
            .entry(symbol.to_uppercase())
            .or_default()
            .extend(txns);
    }

    /// Store a long-form filing's sections, keeping the list newest-first.
    pub async fn insert_narrative(&self, filing: NarrativeFiling) {
        let key = (
            filing.reference.symbol.to_uppercase(),
            filing.reference.form_type.clone(),
        );
        let mut guard = self.inner.narratives.write().await;
        let list = guard.entry(key).or_default();
        list.retain(|n| n.reference.accession_number != filing.reference.accession_number);
        list.push(filing);
        list.sort_by(|a, b| b.reference.filing_date.cmp(&a.reference.filing_date));
    }

    /// All stored transactions for a symbol dated on or after `cutoff`.
    pub async fn transactions_since(
        &self,
        symbol: &str,
        cutoff: NaiveDate,
    ) -> Vec<OwnershipTransaction> {
        let guard = self.inner.transactions.read().await;
        guard
            .get(&symbol.to_uppercase())
            .map(|txns| {
                txns.iter()
                    .filter(|t| t.date >= cutoff)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Stored narrative filings for a symbol and form type, newest first.
    pub async fn narratives(&self, symbol: &str, form: &FormType) -> Vec<NarrativeFiling> {
        let guard = self.inner.narratives.read().await;
        guard
            .get(&(symbol.to_uppercase(), form.clone()))
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn sentiment_cache(&self) -> &ResultCache<SentimentReport> {
        &self.inner.sentiment_cache
    }

    pub(crate) fn diff_cache(&self) -> &ResultCache<SectionDiff> {
        &self.inner.diff_cache
    }
}
