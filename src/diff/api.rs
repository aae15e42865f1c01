use crate::core::{EdgarClient, EdgarError, FilingStore, FormType};
use crate::feed;
use crate::filings::SectionName;

use super::engine;
use super::model::{SectionDiff, Significance};

/// Filings fetched when the store does not yet hold two of the requested
/// form; annual and quarterly reports are sparse, so a short page suffices.
const INGEST_LIMIT: usize = 8;

pub(super) async fn section_diff(
    client: &EdgarClient,
    store: &FilingStore,
    symbol: &str,
    form: &FormType,
    section: SectionName,
) -> Result<SectionDiff, EdgarError> {
    let mut filings = store.narratives(symbol, form).await;
    if filings.len() < 2 {
        feed::ingest_recent(client, store, symbol, std::slice::from_ref(form), INGEST_LIMIT)
            .await?;
        filings = store.narratives(symbol, form).await;
    }

    // Newest first; take the two most recent that actually carry the section.
    let mut with_section = filings
        .iter()
        .filter_map(|f| {
            f.sections
                .iter()
                .find(|s| s.name == section)
                .map(|s| (f.reference.clone(), s.text.clone()))
        })
        .take(2);

    let (newer_ref, newer_text) = with_section.next().ok_or_else(|| insufficient(symbol, form, section))?;
    let (older_ref, older_text) = with_section.next().ok_or_else(|| insufficient(symbol, form, section))?;

    let (similarity, added, removed) = engine::diff_sections(&older_text, &newer_text);

    Ok(SectionDiff {
        symbol: symbol.trim().to_uppercase(),
        form_type: form.clone(),
        section,
        older: older_ref,
        newer: newer_ref,
        similarity,
        added,
        removed,
        significance: Significance::from_similarity(similarity),
    })
}

fn insufficient(symbol: &str, form: &FormType, section: SectionName) -> EdgarError {
    EdgarError::InsufficientHistory {
        symbol: symbol.trim().to_uppercase(),
        form: form.to_string(),
        section: section.to_string(),
    }
}
