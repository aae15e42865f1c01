//! Insider sentiment: monthly aggregation of Form 4 activity into the OIC
//! confidence score, plus a raw activity window with a rolled-up summary.

mod api;
mod model;
mod score;

pub use model::{
    ActivitySummary, InsiderActivity, MonthKey, MonthlySentiment, SentimentLabel,
    SentimentReport, Trend,
};
pub use score::{OicConfig, aggregate_month, build_months, classify_trend};

use std::time::Duration;

use crate::core::{Cached, EdgarClient, EdgarError, FilingStore};

const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

/// A builder for computing the insider sentiment report of a symbol.
///
/// Reports are cached per `(symbol, months)`; the result carries cache
/// provenance so callers can tell stale from fresh.
pub struct SentimentBuilder {
    client: EdgarClient,
    store: FilingStore,
    symbol: String,
    months: u32,
    refresh: bool,
    ttl: Duration,
    config: OicConfig,
}

impl SentimentBuilder {
    /// Creates a new `SentimentBuilder` for a given symbol.
    pub fn new(client: &EdgarClient, store: &FilingStore, symbol: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            store: store.clone(),
            symbol: symbol.into(),
            months: 12,
            refresh: false,
            ttl: DEFAULT_TTL,
            config: OicConfig::default(),
        }
    }

    /// Months of history to aggregate (default 12, clamped to at least 1).
    pub fn months(mut self, months: u32) -> Self {
        self.months = months.max(1);
        self
    }

    /// Bypass the cached report and recompute, still writing the new result.
    pub fn refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    /// Time-to-live for the computed report (default 15 minutes).
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Replace the default scoring weights and thresholds.
    pub fn config(mut self, config: OicConfig) -> Self {
        self.config = config;
        self
    }

    /// Computes (or returns the cached) sentiment report.
    pub async fn fetch(&self) -> Result<Cached<SentimentReport>, EdgarError> {
        let key = format!("sentiment:{}:{}", self.symbol.trim().to_uppercase(), self.months);
        self.store
            .sentiment_cache()
            .get_or_compute(&key, self.ttl, self.refresh, || {
                api::sentiment_report(
                    &self.client,
                    &self.store,
                    &self.symbol,
                    self.months,
                    &self.config,
                )
            })
            .await
    }
}

/// A builder for fetching a window of raw insider transactions with a
/// rolled-up buy/sell summary.
pub struct InsiderActivityBuilder {
    client: EdgarClient,
    store: FilingStore,
    symbol: String,
    days: u32,
}

impl InsiderActivityBuilder {
    /// Creates a new `InsiderActivityBuilder` for a given symbol.
    pub fn new(client: &EdgarClient, store: &FilingStore, symbol: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            store: store.clone(),
            symbol: symbol.into(),
            days: 90,
        }
    }

    /// Window length in days (default 90, clamped to at least 1).
    pub fn days(mut self, days: u32) -> Self {
        self.days = days.max(1);
        self
    }

    /// Fetches the window of transactions and its summary.
    pub async fn fetch(&self) -> Result<InsiderActivity, EdgarError> {
        api::insider_activity(&self.client, &self.store, &self.symbol, self.days).await
    }
}
