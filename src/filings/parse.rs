//! Filing document parsing.
//!
//! Dispatches on form type: ownership forms (Form 4 XML) yield transactions,
//! long-form reports (10-K/10-Q) yield named narrative sections. A malformed
//! document is a [`EdgarError::Parse`], which callers count and skip without
//! aborting their batch.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::core::{EdgarError, FilingReference, FormType};

use super::model::{
    FilingSection, OwnerRole, OwnershipTransaction, ParsedFiling, SectionName, TransactionCode,
};

/// Sections longer than this are truncated; enough for any real item body
/// while bounding memory on pathological documents.
const MAX_SECTION_CHARS: usize = 200_000;

/// Parse a raw filing document according to its form type.
pub fn parse(raw: &str, reference: &FilingReference) -> Result<ParsedFiling, EdgarError> {
    match &reference.form_type {
        FormType::Form4 => Ok(ParsedFiling::Ownership(parse_form4(raw, reference)?)),
        FormType::Form10K | FormType::Form10Q => Ok(ParsedFiling::Narrative(parse_narrative(raw))),
        FormType::Form8K | FormType::Other(_) => Ok(ParsedFiling::Unsupported),
    }
}

/* ----------------------- Form 4 (ownership) ----------------------- */

static TXN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<nonDerivativeTransaction>(.*?)</nonDerivativeTransaction>")
        .expect("valid regex")
});

fn parse_form4(
    raw: &str,
    reference: &FilingReference,
) -> Result<Vec<OwnershipTransaction>, EdgarError> {
    if !raw.contains("<ownershipDocument") {
        return Err(EdgarError::Parse(format!(
            "{}: not an ownership document",
            reference.accession_number
        )));
    }

    let owner_block = tag_block(raw, "reportingOwner")
        .ok_or_else(|| parse_err(reference, "reportingOwner missing"))?;
    let owner_name = tag_text(&owner_block, "rptOwnerName")
        .filter(|s| !s.is_empty())
        .ok_or_else(|| parse_err(reference, "rptOwnerName missing"))?;

    let role = OwnerRole {
        officer: flag(&owner_block, "isOfficer"),
        director: flag(&owner_block, "isDirector"),
        ten_percent_owner: flag(&owner_block, "isTenPercentOwner"),
        officer_title: tag_text(&owner_block, "officerTitle").filter(|s| !s.is_empty()),
    };

    let mut out = Vec::new();
    for cap in TXN_RE.captures_iter(raw) {
        let block = &cap[1];

        let date_s = tag_value(block, "transactionDate")
            .ok_or_else(|| parse_err(reference, "transactionDate missing"))?;
        let date = NaiveDate::parse_from_str(&date_s, "%Y-%m-%d")
            .map_err(|e| parse_err(reference, &format!("bad transactionDate {date_s}: {e}")))?;

        let code_s = tag_text(block, "transactionCode")
            .ok_or_else(|| parse_err(reference, "transactionCode missing"))?;

        let shares: f64 = tag_value(block, "transactionShares")
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| parse_err(reference, "transactionShares missing or non-numeric"))?;

        let price_per_share: Option<f64> = tag_value(block, "transactionPricePerShare")
            .and_then(|s| s.parse().ok())
            .filter(|p: &f64| *p > 0.0);

        let ad = tag_value(block, "transactionAcquiredDisposedCode")
            .ok_or_else(|| parse_err(reference, "acquiredDisposedCode missing"))?;

        let shares_owned_after: Option<f64> =
            tag_value(block, "sharesOwnedFollowingTransaction").and_then(|s| s.parse().ok());

        out.push(OwnershipTransaction {
            filing: reference.clone(),
            owner_name: owner_name.clone(),
            role: role.clone(),
            date,
            code: TransactionCode::from_form4(&code_s),
            shares,
            price_per_share,
            shares_owned_after,
            acquired: ad.eq_ignore_ascii_case("A"),
        });
    }

    Ok(out)
}

fn parse_err(reference: &FilingReference, msg: &str) -> EdgarError {
    EdgarError::Parse(format!("{}: {msg}", reference.accession_number))
}

/// Inner content of the first `<tag>...</tag>` block.
fn tag_block(xml: &str, tag: &str) -> Option<String> {
    let re = Regex::new(&format!(r"(?s)<{tag}[^>]*>(.*?)</{tag}>")).ok()?;
    re.captures(xml)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Trimmed text content of the first `<tag>...</tag>`.
fn tag_text(xml: &str, tag: &str) -> Option<String> {
    tag_block(xml, tag).map(|s| s.trim().to_string())
}

/// Form 4 wraps most fields as `<tag><value>x</value></tag>`; older documents
/// sometimes inline the text. Handles both.
fn tag_value(xml: &str, tag: &str) -> Option<String> {
    let inner = tag_block(xml, tag)?;
    if inner.contains("<value>") {
        tag_text(&inner, "value").filter(|s| !s.is_empty())
    } else {
        let trimmed = inner.trim().to_string();
        (!trimmed.is_empty() && !trimmed.contains('<')).then_some(trimmed)
    }
}

fn flag(xml: &str, tag: &str) -> bool {
    tag_text(xml, tag)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/* ----------------------- 10-K / 10-Q (narrative) ----------------------- */

static SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(?:script|style)[^>]*>.*?</(?:script|style)\s*>").expect("valid regex")
});
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));
static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

static BUSINESS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)item\s+1\s*[.:—–-]\s*business").expect("valid regex"));
static RISK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)item\s+1a\s*[.:—–-]?\s*risk\s+factors").expect("valid regex")
});
static LEGAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)item\s+3\s*[.:—–-]?\s*legal\s+proceedings").expect("valid regex")
});
static MDA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)item\s+[27]\s*[.:—–-]?\s*management['’]?s?\s+discussion").expect("valid regex")
});
static MARKET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)item\s+(?:7a|3)\s*[.:—–-]?\s*quantitative\s+and\s+qualitative\s+disclosures?\s+about\s+market\s+risk",
    )
    .expect("valid regex")
});

/// Split a long-form report into named sections. Sections that cannot be
/// located are simply absent; an unrecognizable document yields no sections
/// rather than an error.
fn parse_narrative(raw: &str) -> Vec<FilingSection> {
    let text = clean_html(raw);

    let patterns: [(SectionName, &Regex); 5] = [
        (SectionName::Business, &BUSINESS_RE),
        (SectionName::RiskFactors, &RISK_RE),
        (SectionName::LegalProceedings, &LEGAL_RE),
        (SectionName::ManagementDiscussion, &MDA_RE),
        (SectionName::MarketRisk, &MARKET_RE),
    ];

    // Take the last occurrence of each header so the table of contents does
    // not win over the section body.
    let mut found: Vec<(usize, usize, SectionName)> = Vec::new();
    for (name, re) in patterns {
        if let Some(m) = re.find_iter(&text).last() {
            found.push((m.start(), m.end(), name));
        }
    }
    found.sort_by_key(|(start, _, _)| *start);

    let mut sections = Vec::new();
    for (i, (_, body_start, name)) in found.iter().enumerate() {
        let mut end = found
            .get(i + 1)
            .map(|(next_start, _, _)| *next_start)
            .unwrap_or(text.len())
            .min(body_start + MAX_SECTION_CHARS);
        while end < text.len() && !text.is_char_boundary(end) {
            end -= 1;
        }
        if end <= *body_start {
            continue;
        }
        let body = text[*body_start..end].trim();
        if body.is_empty() {
            continue;
        }
        sections.push(FilingSection {
            name: *name,
            text: body.to_string(),
        });
    }
    sections
}

/// Strip markup down to plain text: scripts/styles removed, tags replaced by
/// spaces, common entities decoded, whitespace collapsed.
fn clean_html(raw: &str) -> String {
    let no_scripts = SCRIPT_RE.replace_all(raw, " ");
    let no_tags = TAG_RE.replace_all(&no_scripts, " ");
    // `&amp;` decodes last so double-escaped entities like `&amp;lt;` come
    // out as the literal `&lt;` instead of a second round of decoding.
    let decoded = no_tags
        .replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#8217;", "'")
        .replace("&#8220;", "\"")
        .replace("&#8221;", "\"")
        .replace("&rsquo;", "'")
        .replace("&amp;", "&");
    WS_RE.replace_all(&decoded, " ").trim().to_string()
}
