use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use url::Url;

use crate::core::EdgarError;

/// The filing form types this crate understands.
///
/// Anything outside the closed set is carried as [`FormType::Other`] so the
/// feed can still list it; the parser reports such documents as unsupported
/// rather than failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormType {
    /// Statement of changes in beneficial ownership (insider transactions).
    Form4,
    /// Annual report.
    Form10K,
    /// Quarterly report.
    Form10Q,
    /// Current report (material events).
    Form8K,
    /// Any other form, carried verbatim.
    Other(String),
}

impl FormType {
    /// The form label as it appears in EDGAR submissions data.
    pub fn as_str(&self) -> &str {
        match self {
            FormType::Form4 => "4",
            FormType::Form10K => "10-K",
            FormType::Form10Q => "10-Q",
            FormType::Form8K => "8-K",
            FormType::Other(s) => s,
        }
    }

    /// Parse an EDGAR form label. Unrecognized labels become [`FormType::Other`].
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "4" => FormType::Form4,
            "10-K" => FormType::Form10K,
            "10-Q" => FormType::Form10Q,
            "8-K" => FormType::Form8K,
            other => FormType::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for FormType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FormType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Identifies one filed document. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilingReference {
    /// SEC Central Index Key of the filer.
    pub cik: u64,
    /// The ticker symbol the reference was resolved through.
    pub symbol: String,
    /// Accession number, unique per filing (with dashes, as published).
    pub accession_number: String,
    /// The filed form type.
    pub form_type: FormType,
    /// The date the document was filed.
    pub filing_date: NaiveDate,
    /// The period the document reports on, when EDGAR provides one.
    pub report_date: Option<NaiveDate>,
    /// Filename of the primary document inside the filing archive.
    pub primary_document: String,
}

impl FilingReference {
    /// URL of the primary document under an EDGAR archives base
    /// (`.../edgar/data/{cik}/{accession-without-dashes}/{document}`).
    pub fn document_url(&self, base_archives: &Url) -> Result<Url, EdgarError> {
        let accession = self.accession_number.replace('-', "");
        let path = format!("{}/{}/{}", self.cik, accession, self.primary_document);
        Ok(base_archives.join(&path)?)
    }
}
