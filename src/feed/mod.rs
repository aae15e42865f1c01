//! Filing feed: recent submissions for a company, filtered by form type.

mod api;
mod model;
mod wire;

pub use model::FilingSummary;

pub(crate) use api::{fetch_recent, ingest_recent};

use crate::core::{EdgarClient, EdgarError, FilingReference, FormType, client::RetryConfig};

/// Downloads a filing's primary document from the archives, verbatim.
pub async fn fetch_raw_document(
    client: &EdgarClient,
    reference: &FilingReference,
) -> Result<String, EdgarError> {
    api::fetch_document(client, reference, None).await
}

/// A builder for fetching the filing feed of a specific symbol.
pub struct FeedBuilder {
    client: EdgarClient,
    symbol: String,
    form_type: Option<FormType>,
    limit: usize,
    retry_override: Option<RetryConfig>,
}

impl FeedBuilder {
    /// Creates a new `FeedBuilder` for a given symbol.
    pub fn new(client: &EdgarClient, symbol: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            symbol: symbol.into(),
            form_type: None,
            limit: 20,
            retry_override: None,
        }
    }

    /// Restrict the feed to one form type.
    pub fn form_type(mut self, form: FormType) -> Self {
        self.form_type = Some(form);
        self
    }

    /// Maximum number of filings to return (default 20).
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Overrides the default retry policy for this specific API call.
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Fetches the feed, newest filings first.
    pub async fn fetch(&self) -> Result<Vec<FilingSummary>, EdgarError> {
        let forms: Vec<FormType> = self.form_type.iter().cloned().collect();
        fetch_recent(
            &self.client,
            &self.symbol,
            &forms,
            self.limit,
            self.retry_override.as_ref(),
        )
        .await
    }
}
