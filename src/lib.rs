//! omnifolio-edgar: SEC EDGAR filing ingestion and insider analytics.
//!
//! Fetches company submissions from the EDGAR registry under its fair-access
//! policy (identifying User-Agent, shared token-bucket rate limit), parses
//! Form 4 ownership filings and long-form narrative filings, and derives
//! two analytics on top: an insider confidence score with a monthly trend,
//! and a term-level diff of a named section across consecutive filings. A
//! background monitor keeps a watchlist's filings flowing into the shared
//! store.

pub mod core;
pub mod diff;
pub mod feed;
pub mod filings;
pub mod monitor;
pub mod sentiment;

pub use crate::core::{
    Backoff, CacheSource, Cached, EdgarClient, EdgarClientBuilder, EdgarError, FilingReference,
    FilingStore, FormType, NarrativeFiling, ResultCache, RetryConfig,
};
pub use diff::{DiffBuilder, SectionDiff, Significance};
pub use feed::{FeedBuilder, FilingSummary};
pub use filings::{
    FilingSection, OwnerRole, OwnershipTransaction, ParsedFiling, SectionName, TransactionCode,
};
pub use monitor::{FilingMonitor, MonitorConfig, MonitorState};
pub use sentiment::{
    ActivitySummary, InsiderActivity, InsiderActivityBuilder, MonthKey, MonthlySentiment,
    OicConfig, SentimentBuilder, SentimentLabel, SentimentReport, Trend,
};
