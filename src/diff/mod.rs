//! Filing diff: compares a named section across a company's two most recent
//! filings of a form type and grades how much it changed.

mod api;
mod engine;
mod model;

pub use model::{SectionDiff, Significance};

use std::time::Duration;

use crate::core::{Cached, EdgarClient, EdgarError, FilingStore, FormType};
use crate::filings::SectionName;

const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

/// A builder for diffing one section across a company's two latest filings.
///
/// Results are cached per `(symbol, form, section)` with cache provenance on
/// the returned value.
pub struct DiffBuilder {
    client: EdgarClient,
    store: FilingStore,
    symbol: String,
    form_type: FormType,
    section: SectionName,
    refresh: bool,
    ttl: Duration,
}

impl DiffBuilder {
    /// Creates a new `DiffBuilder` for a given symbol, defaulting to the
    /// risk-factors section of the latest two annual reports.
    pub fn new(client: &EdgarClient, store: &FilingStore, symbol: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            store: store.clone(),
            symbol: symbol.into(),
            form_type: FormType::Form10K,
            section: SectionName::RiskFactors,
            refresh: false,
            ttl: DEFAULT_TTL,
        }
    }

    /// Form type to search for (default 10-K).
    pub fn form_type(mut self, form: FormType) -> Self {
        self.form_type = form;
        self
    }

    /// Section to compare (default risk factors).
    pub fn section(mut self, section: SectionName) -> Self {
        self.section = section;
        self
    }

    /// Bypass the cached diff and recompute, still writing the new result.
    pub fn refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    /// Time-to-live for the computed diff (default 15 minutes).
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Computes (or returns the cached) section diff.
    pub async fn fetch(&self) -> Result<Cached<SectionDiff>, EdgarError> {
        let key = format!(
            "diff:{}:{}:{}",
            self.symbol.trim().to_uppercase(),
            self.form_type,
            self.section
        );
        self.store
            .diff_cache()
            .get_or_compute(&key, self.ttl, self.refresh, || {
                api::section_diff(
                    &self.client,
                    &self.store,
                    &self.symbol,
                    &self.form_type,
                    self.section,
                )
            })
            .await
    }
}
