use chrono::{Datelike, Duration, NaiveDate, Utc};

use crate::core::{EdgarClient, EdgarError, FilingStore, FormType};
use crate::feed;

use super::model::{ActivitySummary, InsiderActivity, SentimentLabel, SentimentReport};
use super::score::{self, OicConfig};

/// Upper bound on Form 4 filings fetched per request; roughly eight filings
/// per month of lookback.
fn ingest_limit(months_back: u32) -> usize {
    (months_back as usize * 8).clamp(20, 200)
}

pub(super) async fn sentiment_report(
    client: &EdgarClient,
    store: &FilingStore,
    symbol: &str,
    months_back: u32,
    config: &OicConfig,
) -> Result<SentimentReport, EdgarError> {
    feed::ingest_recent(
        client,
        store,
        symbol,
        &[FormType::Form4],
        ingest_limit(months_back),
    )
    .await?;

    let cutoff = month_start_ago(Utc::now().date_naive(), months_back);
    let mut txns = store.transactions_since(symbol, cutoff).await;
    txns.sort_by(|a, b| b.date.cmp(&a.date));

    let months = score::build_months(config, &txns, cutoff);
    let (current_score, current_label) = months
        .last()
        .map(|m| (m.score, m.label))
        .unwrap_or((0.0, SentimentLabel::Neutral));
    let scores: Vec<f64> = months.iter().map(|m| m.score).collect();
    let trend = score::classify_trend(config, &scores);

    Ok(SentimentReport {
        symbol: symbol.trim().to_uppercase(),
        current_score,
        current_label,
        trend,
        months,
        transactions: txns,
    })
}

pub(super) async fn insider_activity(
    client: &EdgarClient,
    store: &FilingStore,
    symbol: &str,
    days: u32,
) -> Result<InsiderActivity, EdgarError> {
    let approx_months = days.div_ceil(30).max(1);
    feed::ingest_recent(
        client,
        store,
        symbol,
        &[FormType::Form4],
        ingest_limit(approx_months),
    )
    .await?;

    let cutoff = Utc::now().date_naive() - Duration::days(i64::from(days));
    let mut txns = store.transactions_since(symbol, cutoff).await;
    txns.sort_by(|a, b| b.date.cmp(&a.date));

    let mut summary = ActivitySummary {
        window_days: days,
        buys: 0,
        sells: 0,
        buy_shares: 0.0,
        sell_shares: 0.0,
        buy_value: 0.0,
        sell_value: 0.0,
        net_shares: 0.0,
    };
    for t in &txns {
        if t.acquired {
            summary.buys += 1;
            summary.buy_shares += t.shares;
            summary.buy_value += t.value().unwrap_or(0.0);
        } else {
            summary.sells += 1;
            summary.sell_shares += t.shares;
            summary.sell_value += t.value().unwrap_or(0.0);
        }
    }
    summary.net_shares = summary.buy_shares - summary.sell_shares;

    Ok(InsiderActivity {
        symbol: symbol.trim().to_uppercase(),
        transactions: txns,
        summary,
    })
}

/// First day of the month `months_back` months before `today`. Bounds the
/// lookback window; "now" is used for nothing else, keeping scoring
/// deterministic for a fixed transaction set.
fn month_start_ago(today: NaiveDate, months_back: u32) -> NaiveDate {
    let total = today.year() * 12 + today.month() as i32 - 1 - months_back as i32;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(today)
}
