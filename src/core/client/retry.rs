use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Specifies the backoff strategy for retrying failed requests.
#[derive(Clone, Debug)]
pub enum Backoff {
    /// Uses a fixed delay between retries.
    Fixed(Duration),
    /// Uses an exponential delay between retries.
    /// The delay is calculated as `base * (factor ^ attempt)`.
    Exponential {
        /// The initial backoff duration.
        base: Duration,
        /// The multiplicative factor for each subsequent retry.
        factor: f64,
        /// The maximum duration to wait between retries.
        max: Duration,
        /// Whether to apply random jitter (+/- 50%) to the delay.
        jitter: bool,
    },
}

impl Backoff {
    pub(crate) fn delay(&self, attempt: u32) -> Duration {
        match self {
            Backoff::Fixed(d) => *d,
            Backoff::Exponential {
                base,
                factor,
                max,
                jitter,
            } => {
                let mut millis = base.as_millis() as f64 * factor.powi(attempt as i32);
                millis = millis.min(max.as_millis() as f64);
                if *jitter {
                    // Clock-derived jitter in [0.5, 1.5); avoids a rand dependency.
                    let nanos = SystemTime::now()
                        .duration_since(UNIX_EPOCH)
                        .unwrap_or_default()
                        .subsec_nanos();
                    millis *= 0.5 + f64::from(nanos % 1000) / 1000.0;
                }
                Duration::from_millis(millis as u64)
            }
        }
    }
}

/// Configuration for the automatic retry mechanism.
///
/// Only transient conditions are retried. Client-side rejections (4xx,
/// including 429) always surface as [`EdgarError::Rejected`] without a retry,
/// so the caller can back off at the poll-cycle level.
///
/// [`EdgarError::Rejected`]: crate::core::EdgarError::Rejected
#[derive(Clone, Debug)]
pub struct RetryConfig {
    /// Enables or disables the retry mechanism.
    pub enabled: bool,
    /// The maximum number of retries. Total attempts are `max_retries + 1`.
    pub max_retries: u32,
    /// The backoff strategy to use between retries.
    pub backoff: Backoff,
    /// HTTP status codes that should trigger a retry. Only server errors
    /// (5xx) are honored; a 4xx listed here is still rejected immediately.
    pub retry_on_status: Vec<u16>,
    /// Whether to retry on request timeouts.
    pub retry_on_timeout: bool,
    /// Whether to retry on connection errors.
    pub retry_on_connect: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_retries: 3,
            backoff: Backoff::Exponential {
                base: Duration::from_millis(250),
                factor: 2.0,
                max: Duration::from_secs(5),
                jitter: true,
            },
            retry_on_status: vec![500, 502, 503, 504],
            retry_on_timeout: true,
            retry_on_connect: true,
        }
    }
}
