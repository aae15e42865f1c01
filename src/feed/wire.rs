//! Wire types for the EDGAR submissions API.
//!
//! The recent-filings payload is column-oriented: parallel arrays indexed by
//! filing row. Mapping back to row structs happens in `api.rs`.

use serde::Deserialize;

#[derive(Deserialize)]
pub(crate) struct Submissions {
    pub(crate) name: Option<String>,
    pub(crate) filings: Option<Filings>,
}

#[derive(Deserialize)]
pub(crate) struct Filings {
    pub(crate) recent: Option<Recent>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Recent {
    #[serde(default)]
    pub(crate) accession_number: Vec<String>,
    #[serde(default)]
    pub(crate) filing_date: Vec<String>,
    // EDGAR publishes empty strings, not nulls, for absent report dates.
    #[serde(default)]
    pub(crate) report_date: Vec<String>,
    #[serde(default)]
    pub(crate) form: Vec<String>,
    #[serde(default)]
    pub(crate) primary_document: Vec<String>,
    #[serde(default)]
    pub(crate) primary_doc_description: Vec<String>,
}
