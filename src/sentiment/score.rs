//! The OIC (OmniFolio Insider Confidence) scoring algorithm.
//!
//! Each calendar month's transactions are reduced to three signals:
//! a net-purchase ratio over transaction counts, a value-weighted signal over
//! dollar flow, and a role-weighted signal over share flow where officer and
//! ten-percent-owner activity counts for more. The weighted combination is
//! clamped to [-100, 100]; positive means net buying conviction.
//!
//! Every constant is a tunable on [`OicConfig`] rather than a law: the score
//! is validated against behavioral scenarios, not bit-exact expectations.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;

use crate::filings::{OwnerRole, OwnershipTransaction};

use super::model::{MonthKey, MonthlySentiment, SentimentLabel, Trend};

/// Tunable weights and thresholds for the OIC score.
#[derive(Debug, Clone)]
pub struct OicConfig {
    /// Weight for officer transactions.
    pub officer_weight: f64,
    /// Weight for ten-percent-owner transactions.
    pub ten_percent_weight: f64,
    /// Weight for director transactions.
    pub director_weight: f64,
    /// Weight for any other reporting insider.
    pub base_weight: f64,

    /// Mix of the net-purchase-ratio component.
    pub npr_weight: f64,
    /// Mix of the value-weighted component.
    pub vws_weight: f64,
    /// Mix of the role-weighted share component.
    pub rws_weight: f64,

    /// Distinct insiders required in one direction to flag a cluster.
    pub cluster_threshold: u32,

    /// Label cut points, strictly ordered.
    pub strong_buy_at: f64,
    pub buy_leaning_at: f64,
    pub sell_leaning_at: f64,
    pub strong_sell_at: f64,

    /// Months considered by the trend classification.
    pub trend_window: usize,
    /// Slope (score points per month) below which the trend is stable.
    pub trend_epsilon: f64,
}

impl Default for OicConfig {
    fn default() -> Self {
        Self {
            officer_weight: 2.0,
            ten_percent_weight: 1.75,
            director_weight: 1.5,
            base_weight: 1.0,
            npr_weight: 0.30,
            vws_weight: 0.40,
            rws_weight: 0.30,
            cluster_threshold: 3,
            strong_buy_at: 40.0,
            buy_leaning_at: 15.0,
            sell_leaning_at: -15.0,
            strong_sell_at: -40.0,
            trend_window: 3,
            trend_epsilon: 1.0,
        }
    }
}

impl OicConfig {
    fn role_weight(&self, role: &OwnerRole) -> f64 {
        // Officer status dominates when an insider holds several roles.
        if role.officer {
            self.officer_weight
        } else if role.ten_percent_owner {
            self.ten_percent_weight
        } else if role.director {
            self.director_weight
        } else {
            self.base_weight
        }
    }

    fn label(&self, score: f64) -> SentimentLabel {
        if score >= self.strong_buy_at {
            SentimentLabel::StrongBuy
        } else if score >= self.buy_leaning_at {
            SentimentLabel::BuyLeaning
        } else if score > self.sell_leaning_at {
            SentimentLabel::Neutral
        } else if score > self.strong_sell_at {
            SentimentLabel::SellLeaning
        } else {
            SentimentLabel::StrongSell
        }
    }
}

/// Aggregate one month's transactions. Pure: a fixed transaction set always
/// yields the same aggregate.
pub fn aggregate_month(
    config: &OicConfig,
    month: MonthKey,
    txns: &[&OwnershipTransaction],
) -> MonthlySentiment {
    let mut agg = MonthlySentiment {
        month,
        total_buys: 0,
        total_sells: 0,
        buy_shares: 0.0,
        sell_shares: 0.0,
        buy_value: 0.0,
        sell_value: 0.0,
        officer_buys: 0,
        officer_sells: 0,
        director_buys: 0,
        director_sells: 0,
        ten_percent_buys: 0,
        ten_percent_sells: 0,
        unique_buyers: 0,
        unique_sellers: 0,
        cluster_buy: false,
        cluster_sell: false,
        score: 0.0,
        label: SentimentLabel::Neutral,
    };

    let mut buyers: HashSet<&str> = HashSet::new();
    let mut sellers: HashSet<&str> = HashSet::new();
    let mut weighted_buy_shares = 0.0;
    let mut weighted_sell_shares = 0.0;

    for t in txns {
        let weight = config.role_weight(&t.role);
        if t.acquired {
            agg.total_buys += 1;
            agg.buy_shares += t.shares;
            agg.buy_value += t.value().unwrap_or(0.0);
            weighted_buy_shares += weight * t.shares;
            buyers.insert(t.owner_name.as_str());
            if t.role.officer {
                agg.officer_buys += 1;
            }
            if t.role.director {
                agg.director_buys += 1;
            }
            if t.role.ten_percent_owner {
                agg.ten_percent_buys += 1;
            }
        } else {
            agg.total_sells += 1;
            agg.sell_shares += t.shares;
            agg.sell_value += t.value().unwrap_or(0.0);
            weighted_sell_shares += weight * t.shares;
            sellers.insert(t.owner_name.as_str());
            if t.role.officer {
                agg.officer_sells += 1;
            }
            if t.role.director {
                agg.director_sells += 1;
            }
            if t.role.ten_percent_owner {
                agg.ten_percent_sells += 1;
            }
        }
    }

    agg.unique_buyers = buyers.len() as u32;
    agg.unique_sellers = sellers.len() as u32;
    agg.cluster_buy = agg.unique_buyers >= config.cluster_threshold
        && agg.unique_sellers < config.cluster_threshold;
    agg.cluster_sell = agg.unique_sellers >= config.cluster_threshold
        && agg.unique_buyers < config.cluster_threshold;

    let npr = normalized_ratio(
        f64::from(agg.total_buys),
        f64::from(agg.total_sells),
    );
    let vws = normalized_ratio(agg.buy_value, agg.sell_value);
    let rws = normalized_ratio(weighted_buy_shares, weighted_sell_shares);

    let raw = npr * config.npr_weight + vws * config.vws_weight + rws * config.rws_weight;
    agg.score = raw.clamp(-100.0, 100.0);
    agg.label = config.label(agg.score);
    agg
}

/// `(a - b) / (a + b) * 100`, or 0 when there is nothing to compare.
fn normalized_ratio(a: f64, b: f64) -> f64 {
    let total = a + b;
    if total <= 0.0 {
        0.0
    } else {
        (a - b) / total * 100.0
    }
}

/// Group a company's transactions by calendar month (dates before `cutoff`
/// excluded) and aggregate each month, oldest first.
pub fn build_months(
    config: &OicConfig,
    txns: &[OwnershipTransaction],
    cutoff: NaiveDate,
) -> Vec<MonthlySentiment> {
    let mut by_month: BTreeMap<MonthKey, Vec<&OwnershipTransaction>> = BTreeMap::new();
    for t in txns {
        if t.date >= cutoff {
            by_month.entry(MonthKey::from_date(t.date)).or_default().push(t);
        }
    }
    by_month
        .into_iter()
        .map(|(month, group)| aggregate_month(config, month, &group))
        .collect()
}

/// Classify the trend of a score series (oldest first) from the slope of a
/// least-squares linear fit over the configured window.
pub fn classify_trend(config: &OicConfig, scores: &[f64]) -> Trend {
    let window = config.trend_window.max(2);
    let recent: &[f64] = if scores.len() > window {
        &scores[scores.len() - window..]
    } else {
        scores
    };
    if recent.len() < 2 {
        return Trend::Stable;
    }

    let n = recent.len() as f64;
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = recent.iter().sum::<f64>() / n;
    let mut num = 0.0;
    let mut den = 0.0;
    for (i, y) in recent.iter().enumerate() {
        let dx = i as f64 - mean_x;
        num += dx * (y - mean_y);
        den += dx * dx;
    }
    let slope = if den > 0.0 { num / den } else { 0.0 };

    if slope > config.trend_epsilon {
        Trend::Improving
    } else if slope < -config.trend_epsilon {
        Trend::Declining
    } else {
        Trend::Stable
    }
}
