use chrono::NaiveDate;
use omnifolio_edgar::{
    FormType, MonthKey, OicConfig, OwnerRole, OwnershipTransaction, SentimentLabel,
    TransactionCode, Trend,
    sentiment::{aggregate_month, build_months, classify_trend},
};

use crate::common;

fn txn(owner: &str, role: OwnerRole, acquired: bool, date: NaiveDate, shares: f64, price: f64) -> OwnershipTransaction {
    OwnershipTransaction {
        filing: common::reference(FormType::Form4, "0001318605-26-000301"),
        owner_name: owner.to_string(),
        role,
        date,
        code: if acquired {
            TransactionCode::Purchase
        } else {
            TransactionCode::Sale
        },
        shares,
        price_per_share: Some(price),
        shares_owned_after: None,
        acquired,
    }
}

fn officer() -> OwnerRole {
    OwnerRole {
        officer: true,
        ..OwnerRole::default()
    }
}

fn director() -> OwnerRole {
    OwnerRole {
        director: true,
        ..OwnerRole::default()
    }
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, d).unwrap()
}

#[test]
fn five_officer_buys_score_strongly_positive() {
    let config = OicConfig::default();
    let txns: Vec<_> = (0..5u32)
        .map(|i| {
            txn(
                &format!("Officer {i}"),
                officer(),
                true,
                day(i + 3),
                10_000.0,
                50.0,
            )
        })
        .collect();
    let refs: Vec<_> = txns.iter().collect();

    let month = aggregate_month(&config, MonthKey { year: 2026, month: 5 }, &refs);

    assert_eq!(month.total_buys, 5);
    assert_eq!(month.total_sells, 0);
    assert_eq!(month.officer_buys, 5);
    assert_eq!(month.unique_buyers, 5);
    assert!(month.cluster_buy);
    assert!(!month.cluster_sell);
    assert_eq!(month.buy_shares, 50_000.0);
    assert_eq!(month.buy_value, 2_500_000.0);
    assert_eq!(month.net_shares(), 50_000.0);
    assert!(month.score > 0.0);
    assert!(month.score <= 100.0);
    assert_eq!(month.label, SentimentLabel::StrongBuy);
}

#[test]
fn score_is_deterministic_for_a_fixed_transaction_set() {
    let config = OicConfig::default();
    let txns = vec![
        txn("Alice Chen", officer(), true, day(2), 8_000.0, 41.0),
        txn("Bob Ruiz", director(), false, day(9), 3_000.0, 43.5),
        txn("Carol Singh", OwnerRole::default(), true, day(20), 1_200.0, 42.2),
    ];
    let refs: Vec<_> = txns.iter().collect();

    let first = aggregate_month(&config, MonthKey { year: 2026, month: 5 }, &refs);
    let second = aggregate_month(&config, MonthKey { year: 2026, month: 5 }, &refs);
    assert_eq!(first, second);
}

#[test]
fn officer_activity_outweighs_equal_director_activity() {
    let config = OicConfig::default();
    // Same share counts on both sides; the officer buys, the director sells.
    let txns = vec![
        txn("Alice Chen", officer(), true, day(4), 5_000.0, 40.0),
        txn("Bob Ruiz", director(), false, day(5), 5_000.0, 40.0),
    ];
    let refs: Vec<_> = txns.iter().collect();

    let month = aggregate_month(&config, MonthKey { year: 2026, month: 5 }, &refs);
    // Counts and value cancel; the role-weighted component tips it positive.
    assert!(month.score > 0.0, "score was {}", month.score);
}

#[test]
fn heavy_selling_scores_negative_and_clamped() {
    let config = OicConfig::default();
    let txns: Vec<_> = (0..4u32)
        .map(|i| {
            txn(
                &format!("Seller {i}"),
                officer(),
                false,
                day(i + 1),
                200_000.0,
                90.0,
            )
        })
        .collect();
    let refs: Vec<_> = txns.iter().collect();

    let month = aggregate_month(&config, MonthKey { year: 2026, month: 5 }, &refs);
    assert!(month.score < 0.0);
    assert!(month.score >= -100.0);
    assert_eq!(month.label, SentimentLabel::StrongSell);
    assert!(month.cluster_sell);
    assert!(!month.cluster_buy);
}

#[test]
fn mixed_cluster_is_not_flagged() {
    let config = OicConfig::default();
    let mut txns: Vec<_> = (0..3u32)
        .map(|i| txn(&format!("Buyer {i}"), officer(), true, day(i + 1), 1_000.0, 10.0))
        .collect();
    txns.extend((0..3u32).map(|i| {
        txn(&format!("Seller {i}"), officer(), false, day(i + 10), 1_000.0, 10.0)
    }));
    let refs: Vec<_> = txns.iter().collect();

    let month = aggregate_month(&config, MonthKey { year: 2026, month: 5 }, &refs);
    assert!(!month.cluster_buy);
    assert!(!month.cluster_sell);
}

#[test]
fn quiet_month_is_neutral_zero() {
    let config = OicConfig::default();
    let month = aggregate_month(&config, MonthKey { year: 2026, month: 5 }, &[]);
    assert_eq!(month.score, 0.0);
    assert_eq!(month.label, SentimentLabel::Neutral);
    assert_eq!(month.unique_buyers, 0);
}

#[test]
fn months_group_by_calendar_month_and_honor_cutoff() {
    let config = OicConfig::default();
    let txns = vec![
        txn("Alice Chen", officer(), true, NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(), 100.0, 10.0),
        txn("Alice Chen", officer(), true, NaiveDate::from_ymd_opt(2026, 4, 2).unwrap(), 100.0, 10.0),
        txn("Alice Chen", officer(), false, NaiveDate::from_ymd_opt(2026, 5, 28).unwrap(), 100.0, 10.0),
        // Before the cutoff, must be excluded.
        txn("Alice Chen", officer(), true, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(), 100.0, 10.0),
    ];
    let cutoff = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();

    let months = build_months(&config, &txns, cutoff);
    assert_eq!(months.len(), 3);
    assert_eq!(months[0].month, MonthKey { year: 2026, month: 3 });
    assert_eq!(months[2].month, MonthKey { year: 2026, month: 5 });
    assert!(months[0].score > 0.0);
    assert!(months[2].score < 0.0);
}

#[test]
fn trend_classification_follows_the_slope() {
    let config = OicConfig::default();
    assert_eq!(classify_trend(&config, &[-20.0, 10.0, 45.0]), Trend::Improving);
    assert_eq!(classify_trend(&config, &[45.0, 10.0, -20.0]), Trend::Declining);
    assert_eq!(classify_trend(&config, &[12.0, 12.5, 12.0]), Trend::Stable);
    // Not enough history to call a direction.
    assert_eq!(classify_trend(&config, &[80.0]), Trend::Stable);
    assert_eq!(classify_trend(&config, &[]), Trend::Stable);
    // Only the recent window counts: an old crash followed by a flat recovery.
    assert_eq!(
        classify_trend(&config, &[-90.0, 20.0, 20.5, 20.0]),
        Trend::Stable
    );
}
