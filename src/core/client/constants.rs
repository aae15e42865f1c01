//! Centralized constants for default endpoints, identification, and limits.

/// Default identifying User-Agent. The SEC's fair-access policy requires a
/// descriptive agent with contact information on every request.
pub(crate) const USER_AGENT: &str = "OmniFolio/1.0 (support@omnifolio.app)";

/// Submissions API base (CIK########## .json is appended).
pub(crate) const DEFAULT_BASE_SUBMISSIONS: &str = "https://data.sec.gov/submissions/";

/// Filing archives base ({cik}/{accession}/{document} is appended).
pub(crate) const DEFAULT_BASE_ARCHIVES: &str = "https://www.sec.gov/Archives/edgar/data/";

/// Ticker-to-CIK company directory.
pub(crate) const DEFAULT_TICKER_DIRECTORY: &str = "https://www.sec.gov/files/company_tickers.json";

/// SEC fair-access budget: at most 10 requests per second.
pub(crate) const DEFAULT_REQUESTS_PER_SECOND: u32 = 10;

/// Overall request timeout, seconds.
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;
