#![allow(dead_code)]

use std::{fs, path::PathBuf};

use chrono::NaiveDate;
use httpmock::{Method::GET, Mock, MockServer};
use omnifolio_edgar::{EdgarClient, FilingReference, FormType};
use url::Url;

/// Opt-in log output for debugging a failing test: `RUST_LOG=debug cargo test`.
pub fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub const SYMBOL: &str = "OMNI";
pub const COMPANY: &str = "OmniCorp Industries";
pub const CIK: u64 = 1318605;

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

pub fn read_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
}

/// A client whose endpoints all point at the mock server, with the rate
/// limiter effectively disabled so tests run at full speed.
pub fn test_client(server: &MockServer) -> EdgarClient {
    EdgarClient::builder()
        .base_submissions(
            Url::parse(&format!("{}/submissions/", server.base_url())).unwrap(),
        )
        .base_archives(
            Url::parse(&format!("{}/Archives/edgar/data/", server.base_url())).unwrap(),
        )
        .ticker_directory(
            Url::parse(&format!("{}/files/company_tickers.json", server.base_url())).unwrap(),
        )
        .requests_per_second(10_000)
        .build()
        .unwrap()
}

/// Mounts the company ticker directory with OMNI and one other company.
pub fn mount_directory(server: &MockServer) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(GET).path("/files/company_tickers.json");
        then.status(200)
            .header("content-type", "application/json")
            .body(format!(
                r#"{{"0":{{"cik_str":{CIK},"ticker":"{SYMBOL}","title":"{COMPANY}"}},"1":{{"cik_str":320193,"ticker":"AAPL","title":"Apple Inc."}}}}"#
            ));
    })
}

/// One row of the column-oriented submissions payload.
pub struct SubmissionRow {
    pub accession: String,
    pub form: String,
    pub filed: NaiveDate,
    pub document: String,
}

impl SubmissionRow {
    pub fn new(accession: &str, form: &str, filed: NaiveDate, document: &str) -> Self {
        Self {
            accession: accession.to_string(),
            form: form.to_string(),
            filed,
            document: document.to_string(),
        }
    }
}

pub fn submissions_body(rows: &[SubmissionRow]) -> String {
    serde_json::json!({
        "name": COMPANY,
        "filings": { "recent": {
            "accessionNumber": rows.iter().map(|r| r.accession.clone()).collect::<Vec<_>>(),
            "filingDate": rows.iter().map(|r| r.filed.format("%Y-%m-%d").to_string()).collect::<Vec<_>>(),
            "reportDate": rows.iter().map(|_| String::new()).collect::<Vec<_>>(),
            "form": rows.iter().map(|r| r.form.clone()).collect::<Vec<_>>(),
            "primaryDocument": rows.iter().map(|r| r.document.clone()).collect::<Vec<_>>(),
            "primaryDocDescription": rows.iter().map(|_| String::new()).collect::<Vec<_>>(),
        }}
    })
    .to_string()
}

pub fn mount_submissions<'a>(server: &'a MockServer, rows: &[SubmissionRow]) -> Mock<'a> {
    let body = submissions_body(rows);
    server.mock(|when, then| {
        when.method(GET).path(format!("/submissions/CIK{CIK:010}.json"));
        then.status(200)
            .header("content-type", "application/json")
            .body(body);
    })
}

/// Mounts a filing's primary document under the archives path.
pub fn mount_document<'a>(
    server: &'a MockServer,
    accession: &str,
    document: &str,
    body: &str,
) -> Mock<'a> {
    let path = format!(
        "/Archives/edgar/data/{CIK}/{}/{document}",
        accession.replace('-', "")
    );
    let body = body.to_string();
    server.mock(|when, then| {
        when.method(GET).path(path);
        then.status(200).body(body);
    })
}

/// A synthetic Form 4 document with one reporting owner and one
/// non-derivative transaction.
pub fn form4_xml(
    owner: &str,
    officer: bool,
    director: bool,
    code: &str,
    acquired: bool,
    date: NaiveDate,
    shares: f64,
    price: Option<f64>,
) -> String {
    let price_block = price
        .map(|p| format!("<transactionPricePerShare><value>{p}</value></transactionPricePerShare>"))
        .unwrap_or_default();
    let ad = if acquired { "A" } else { "D" };
    format!(
        r#"<?xml version="1.0"?>
<ownershipDocument>
  <reportingOwner>
    <reportingOwnerId><rptOwnerName>{owner}</rptOwnerName></reportingOwnerId>
    <reportingOwnerRelationship>
      <isDirector>{director}</isDirector>
      <isOfficer>{officer}</isOfficer>
      <isTenPercentOwner>0</isTenPercentOwner>
      <officerTitle>{title}</officerTitle>
    </reportingOwnerRelationship>
  </reportingOwner>
  <nonDerivativeTable>
    <nonDerivativeTransaction>
      <transactionDate><value>{date}</value></transactionDate>
      <transactionCoding><transactionCode>{code}</transactionCode></transactionCoding>
      <transactionAmounts>
        <transactionShares><value>{shares}</value></transactionShares>
        {price_block}
        <transactionAcquiredDisposedCode><value>{ad}</value></transactionAcquiredDisposedCode>
      </transactionAmounts>
      <postTransactionAmounts>
        <sharesOwnedFollowingTransaction><value>{after}</value></sharesOwnedFollowingTransaction>
      </postTransactionAmounts>
    </nonDerivativeTransaction>
  </nonDerivativeTable>
</ownershipDocument>"#,
        director = if director { "1" } else { "0" },
        officer = if officer { "1" } else { "0" },
        title = if officer { "Chief Executive Officer" } else { "" },
        date = date.format("%Y-%m-%d"),
        after = shares * 4.0,
    )
}

/// A filing reference for parser tests that never touch the network.
pub fn reference(form: FormType, accession: &str) -> FilingReference {
    FilingReference {
        cik: CIK,
        symbol: SYMBOL.to_string(),
        accession_number: accession.to_string(),
        form_type: form,
        filing_date: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
        report_date: None,
        primary_document: "doc.xml".to_string(),
    }
}
