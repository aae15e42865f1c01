use chrono::NaiveDate;

use crate::core::{
    EdgarClient, EdgarError, FilingReference, FilingStore, FormType, NarrativeFiling,
    client::RetryConfig, net,
};
use crate::filings::{self, ParsedFiling};

use super::model::FilingSummary;
use super::wire::Submissions;

/// Fetch the most recent filings for a symbol, newest first, optionally
/// restricted to a set of form types. An empty `forms` slice means all forms.
pub(crate) async fn fetch_recent(
    client: &EdgarClient,
    symbol: &str,
    forms: &[FormType],
    limit: usize,
    retry_override: Option<&RetryConfig>,
) -> Result<Vec<FilingSummary>, EdgarError> {
    let (cik, company) = client.resolve_cik(symbol).await?;

    let url = client
        .base_submissions()
        .join(&format!("CIK{cik:010}.json"))?;
    let req = client.http().get(url);
    let resp = client.send_with_retry(req, retry_override).await?;
    let body = net::read_body(resp).await?;

    let submissions: Submissions = serde_json::from_str(&body)?;
    let recent = submissions
        .filings
        .and_then(|f| f.recent)
        .ok_or_else(|| EdgarError::Data("submissions payload has no recent filings".into()))?;
    let company = submissions.name.unwrap_or(company);

    let rows = recent.accession_number.len();
    if recent.form.len() != rows || recent.filing_date.len() != rows {
        return Err(EdgarError::Data(
            "submissions recent arrays have mismatched lengths".into(),
        ));
    }

    let symbol = symbol.trim().to_uppercase();
    let mut out = Vec::new();

    for i in 0..rows {
        let form_type = FormType::parse(&recent.form[i]);
        if !forms.is_empty() && !forms.contains(&form_type) {
            continue;
        }

        let filing_date = match NaiveDate::parse_from_str(&recent.filing_date[i], "%Y-%m-%d") {
            Ok(d) => d,
            Err(_) => continue, // unparsable row, skip rather than abort the feed
        };
        let report_date = recent
            .report_date
            .get(i)
            .filter(|s| !s.is_empty())
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());

        let reference = FilingReference {
            cik,
            symbol: symbol.clone(),
            accession_number: recent.accession_number[i].clone(),
            form_type: form_type.clone(),
            filing_date,
            report_date,
            primary_document: recent
                .primary_document
                .get(i)
                .cloned()
                .unwrap_or_default(),
        };
        let link = reference.document_url(client.base_archives())?.to_string();

        out.push(FilingSummary {
            symbol: symbol.clone(),
            company: company.clone(),
            form_type,
            description: recent
                .primary_doc_description
                .get(i)
                .filter(|s| !s.is_empty())
                .cloned(),
            link,
            filed_at: filing_date,
            reference,
        });

        if out.len() >= limit {
            break;
        }
    }

    Ok(out)
}

/// Fetch, parse, and store any not-yet-seen recent filings for a symbol.
/// Returns `(processed, errors)`.
///
/// Marking a filing seen doubles as the claim on it, so concurrent ingests
/// (a poll cycle racing an on-demand report) each store a filing at most
/// once. A parse failure is counted and the filing stays seen (it will not
/// parse better next time); a download failure releases the claim so a later
/// cycle can retry it. Failures never abort the batch.
pub(crate) async fn ingest_recent(
    client: &EdgarClient,
    store: &FilingStore,
    symbol: &str,
    forms: &[FormType],
    limit: usize,
) -> Result<(u64, u64), EdgarError> {
    let summaries = fetch_recent(client, symbol, forms, limit, None).await?;

    let mut processed: u64 = 0;
    let mut errors: u64 = 0;

    for summary in summaries {
        let reference = &summary.reference;
        if !store.mark_seen(&reference.accession_number).await {
            // Already ingested, or claimed by a concurrent ingest.
            continue;
        }

        let raw = match fetch_document(client, reference, None).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(
                    accession = reference.accession_number.as_str(),
                    error = %e,
                    "failed to download filing document"
                );
                store.unmark_seen(&reference.accession_number).await;
                errors += 1;
                continue;
            }
        };

        match filings::parse(&raw, reference) {
            Ok(ParsedFiling::Ownership(txns)) => {
                store.insert_transactions(&reference.symbol, txns).await;
                processed += 1;
            }
            Ok(ParsedFiling::Narrative(sections)) => {
                store
                    .insert_narrative(NarrativeFiling {
                        reference: reference.clone(),
                        sections,
                    })
                    .await;
                processed += 1;
            }
            Ok(ParsedFiling::Unsupported) => {
                processed += 1;
            }
            Err(e) => {
                tracing::warn!(
                    accession = reference.accession_number.as_str(),
                    error = %e,
                    "failed to parse filing document"
                );
                errors += 1;
            }
        }
    }

    Ok((processed, errors))
}

/// Download a filing's primary document from the archives.
pub(crate) async fn fetch_document(
    client: &EdgarClient,
    reference: &FilingReference,
    retry_override: Option<&RetryConfig>,
) -> Result<String, EdgarError> {
    if reference.primary_document.is_empty() {
        return Err(EdgarError::Data(format!(
            "{}: filing has no primary document",
            reference.accession_number
        )));
    }
    let url = reference.document_url(client.base_archives())?;
    let req = client.http().get(url);
    let resp = client.send_with_retry(req, retry_override).await?;
    net::read_body(resp).await
}
