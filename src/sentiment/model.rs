use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

use crate::filings::OwnershipTransaction;

/// Identifies one calendar month, the aggregation unit for insider activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    /// 1-based month.
    pub month: u32,
}

impl MonthKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Sentiment label buckets, ordered by score threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SentimentLabel {
    StrongBuy,
    BuyLeaning,
    Neutral,
    SellLeaning,
    StrongSell,
}

/// Direction of the score over the recent window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

/// Aggregate insider activity for one company over one calendar month.
///
/// Always recomputed from the month's full transaction set when new
/// transactions arrive; never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySentiment {
    /// The month this aggregate covers.
    pub month: MonthKey,

    /// Count of acquiring transactions.
    pub total_buys: u32,
    /// Count of disposing transactions.
    pub total_sells: u32,
    /// Shares acquired.
    pub buy_shares: f64,
    /// Shares disposed.
    pub sell_shares: f64,
    /// Dollar value acquired (transactions without a price excluded).
    pub buy_value: f64,
    /// Dollar value disposed (transactions without a price excluded).
    pub sell_value: f64,

    /// Buy/sell counts by officers.
    pub officer_buys: u32,
    pub officer_sells: u32,
    /// Buy/sell counts by directors.
    pub director_buys: u32,
    pub director_sells: u32,
    /// Buy/sell counts by ten-percent owners.
    pub ten_percent_buys: u32,
    pub ten_percent_sells: u32,

    /// Distinct insiders who bought this month.
    pub unique_buyers: u32,
    /// Distinct insiders who sold this month.
    pub unique_sellers: u32,
    /// Multiple distinct insiders buying with no offsetting seller cluster.
    pub cluster_buy: bool,
    /// Multiple distinct insiders selling with no offsetting buyer cluster.
    pub cluster_sell: bool,

    /// The OIC score for this month, in [-100, 100].
    pub score: f64,
    /// The score's label bucket.
    pub label: SentimentLabel,
}

impl MonthlySentiment {
    /// Net shares for the month: acquisitions minus dispositions.
    pub fn net_shares(&self) -> f64 {
        self.buy_shares - self.sell_shares
    }
}

/// The sentiment engine's answer for one company.
#[derive(Debug, Clone, Serialize)]
pub struct SentimentReport {
    /// The company symbol scored.
    pub symbol: String,
    /// The most recent month's score, or 0 when the window holds no activity.
    pub current_score: f64,
    /// The most recent month's label.
    pub current_label: SentimentLabel,
    /// Direction of the score across the recent window.
    pub trend: Trend,
    /// Monthly aggregates, oldest first.
    pub months: Vec<MonthlySentiment>,
    /// The transactions the aggregates were computed from, newest first.
    pub transactions: Vec<OwnershipTransaction>,
}

/// A window of raw insider activity with a rolled-up summary.
#[derive(Debug, Clone, Serialize)]
pub struct InsiderActivity {
    /// The company symbol.
    pub symbol: String,
    /// Transactions in the window, newest first.
    pub transactions: Vec<OwnershipTransaction>,
    /// Rolled-up buy/sell totals for the window.
    pub summary: ActivitySummary,
}

/// Buy/sell totals over an activity window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivitySummary {
    /// Length of the window in days.
    pub window_days: u32,
    /// Count of acquiring transactions.
    pub buys: u32,
    /// Count of disposing transactions.
    pub sells: u32,
    /// Shares acquired.
    pub buy_shares: f64,
    /// Shares disposed.
    pub sell_shares: f64,
    /// Dollar value acquired, priced transactions only.
    pub buy_value: f64,
    /// Dollar value disposed, priced transactions only.
    pub sell_value: f64,
    /// `buy_shares - sell_shares`.
    pub net_shares: f64,
}
