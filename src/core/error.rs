use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum EdgarError {
    /// An error occurred during an HTTP request (network, timeout, decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A response body could not be decoded as JSON.
    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server returned an unexpected 5xx status after retries were exhausted.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The server rejected the request outright (4xx, including 429).
    ///
    /// Never retried at the fetch layer; callers are expected to back off at
    /// the poll-cycle level using `retry_after` when the server provided one.
    #[error("Request rejected: {status} at {url}")]
    Rejected {
        /// The HTTP status code.
        status: u16,
        /// The URL that rejected the request.
        url: String,
        /// Seconds to wait, from the `Retry-After` header if present.
        retry_after: Option<u64>,
    },

    /// A filing document was malformed or not in the expected format.
    #[error("Filing parse failure: {0}")]
    Parse(String),

    /// The ticker symbol is not present in the EDGAR company directory.
    #[error("Unknown ticker symbol: {0}")]
    UnknownSymbol(String),

    /// A section diff was requested but fewer than two qualifying filings exist.
    #[error("Insufficient filing history for {symbol} {form} \"{section}\"")]
    InsufficientHistory {
        /// The company symbol the comparison was requested for.
        symbol: String,
        /// The form type that was searched.
        form: String,
        /// The requested section name.
        section: String,
    },

    /// The result cache could not store or retrieve an entry.
    #[error("Result cache unavailable: {0}")]
    Cache(String),

    /// The data received was in an unexpected format or missing a required field.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),
}

impl EdgarError {
    /// True when the failure is worth retrying at a higher level (a transient
    /// server or network condition rather than a rejection or bad input).
    pub fn is_transient(&self) -> bool {
        match self {
            EdgarError::Status { .. } => true,
            EdgarError::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}
