//! Public client surface + builder.
//! Internals are split into `cik` (ticker directory bootstrap), `retry`
//! (backoff policy), and `constants` (UA + defaults).

mod cik;
mod constants;
mod retry;

pub use retry::{Backoff, RetryConfig};

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use tokio::sync::{Mutex, RwLock};
use url::Url;

use crate::core::EdgarError;
use constants::{
    DEFAULT_BASE_ARCHIVES, DEFAULT_BASE_SUBMISSIONS, DEFAULT_REQUESTS_PER_SECOND,
    DEFAULT_TICKER_DIRECTORY, DEFAULT_TIMEOUT_SECS, USER_AGENT,
};

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

#[derive(Debug, Default)]
struct CikDirectory {
    // ticker (uppercase) -> (cik, company title)
    by_ticker: Option<HashMap<String, (u64, String)>>,
}

/// Client for the SEC EDGAR registry.
///
/// All outbound calls share one token bucket sized to the SEC fair-access
/// budget and carry the identifying `User-Agent` the registry requires.
/// Cloning is cheap; clones share the limiter and the CIK directory.
#[derive(Clone)]
pub struct EdgarClient {
    http: Client,
    base_submissions: Url,
    base_archives: Url,
    ticker_directory: Url,

    retry: RetryConfig,
    limiter: SharedRateLimiter,

    cik_directory: Arc<RwLock<CikDirectory>>,
    cik_fetch_lock: Arc<Mutex<()>>,
}

impl std::fmt::Debug for EdgarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdgarClient")
            .field("base_submissions", &self.base_submissions.as_str())
            .field("base_archives", &self.base_archives.as_str())
            .finish_non_exhaustive()
    }
}

impl Default for EdgarClient {
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl EdgarClient {
    /// Create a new builder.
    pub fn builder() -> EdgarClientBuilder {
        EdgarClientBuilder::default()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
    pub(crate) fn base_submissions(&self) -> &Url {
        &self.base_submissions
    }
    pub(crate) fn base_archives(&self) -> &Url {
        &self.base_archives
    }
    pub(crate) fn ticker_directory(&self) -> &Url {
        &self.ticker_directory
    }

    /// Send a request through the shared rate limiter, retrying transient
    /// failures per the retry policy. 4xx responses are never retried.
    pub(crate) async fn send_with_retry(
        &self,
        req: reqwest::RequestBuilder,
        retry_override: Option<&RetryConfig>,
    ) -> Result<reqwest::Response, EdgarError> {
        let cfg = retry_override.unwrap_or(&self.retry);
        let mut attempt: u32 = 0;

        loop {
            self.limiter.until_ready().await;

            let attempt_req = req
                .try_clone()
                .ok_or_else(|| EdgarError::Data("request is not cloneable for retry".into()))?;

            match attempt_req.send().await {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        return Ok(resp);
                    }

                    let code = status.as_u16();
                    // Only server errors are ever retried; listing a 4xx code
                    // in `retry_on_status` must not override the rejection.
                    let retriable = cfg.enabled
                        && attempt < cfg.max_retries
                        && status.is_server_error()
                        && cfg.retry_on_status.contains(&code);

                    if !retriable {
                        if status.is_client_error() {
                            let retry_after = resp
                                .headers()
                                .get(reqwest::header::RETRY_AFTER)
                                .and_then(|v| v.to_str().ok())
                                .and_then(|s| s.parse().ok());
                            return Err(EdgarError::Rejected {
                                status: code,
                                url: resp.url().to_string(),
                                retry_after,
                            });
                        }
                        return Err(EdgarError::Status {
                            status: code,
                            url: resp.url().to_string(),
                        });
                    }
                }
                Err(e) => {
                    let transient = (cfg.retry_on_timeout && e.is_timeout())
                        || (cfg.retry_on_connect && e.is_connect());
                    if !(cfg.enabled && transient && attempt < cfg.max_retries) {
                        return Err(e.into());
                    }
                }
            }

            let delay = cfg.backoff.delay(attempt);
            tracing::debug!(
                attempt,
                delay_ms = delay.as_millis() as u64,
                "retrying EDGAR request"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct EdgarClientBuilder {
    user_agent: Option<String>,
    base_submissions: Option<Url>,
    base_archives: Option<Url>,
    ticker_directory: Option<Url>,

    requests_per_second: Option<u32>,
    retry: Option<RetryConfig>,

    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl EdgarClientBuilder {
    /// Set the identifying User-Agent. The SEC expects a company or product
    /// name plus a contact email, e.g. `"MyApp/1.0 (ops@myapp.example)"`.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the submissions API base (e.g. `https://data.sec.gov/submissions/`).
    pub fn base_submissions(mut self, url: Url) -> Self {
        self.base_submissions = Some(url);
        self
    }

    /// Override the filing archives base (e.g. `https://www.sec.gov/Archives/edgar/data/`).
    pub fn base_archives(mut self, url: Url) -> Self {
        self.base_archives = Some(url);
        self
    }

    /// Override the ticker directory URL.
    pub fn ticker_directory(mut self, url: Url) -> Self {
        self.ticker_directory = Some(url);
        self
    }

    /// Set the outbound request budget. Clamped to at least 1; the default
    /// matches the SEC's 10 requests/second fair-access policy.
    pub fn requests_per_second(mut self, rps: u32) -> Self {
        self.requests_per_second = Some(rps);
        self
    }

    /// Replace the default retry policy.
    pub fn retry_policy(mut self, cfg: RetryConfig) -> Self {
        self.retry = Some(cfg);
        self
    }

    /// Set a global request timeout (overall). Default: 30s.
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    pub fn build(self) -> Result<EdgarClient, EdgarError> {
        let base_submissions = self
            .base_submissions
            .map_or_else(|| Url::parse(DEFAULT_BASE_SUBMISSIONS), Ok)?;
        let base_archives = self
            .base_archives
            .map_or_else(|| Url::parse(DEFAULT_BASE_ARCHIVES), Ok)?;
        let ticker_directory = self
            .ticker_directory
            .map_or_else(|| Url::parse(DEFAULT_TICKER_DIRECTORY), Ok)?;

        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
            .timeout(self.timeout.unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)));

        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        let rps = self
            .requests_per_second
            .unwrap_or(DEFAULT_REQUESTS_PER_SECOND)
            .max(1);
        let quota = Quota::per_second(NonZeroU32::new(rps).unwrap_or(NonZeroU32::MIN));
        let limiter = Arc::new(RateLimiter::direct(quota));

        Ok(EdgarClient {
            http,
            base_submissions,
            base_archives,
            ticker_directory,
            retry: self.retry.unwrap_or_default(),
            limiter,
            cik_directory: Arc::new(RwLock::new(CikDirectory::default())),
            cik_fetch_lock: Arc::new(Mutex::new(())),
        })
    }
}
