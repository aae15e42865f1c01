use chrono::NaiveDate;
use serde::Serialize;

use crate::core::{FilingReference, FormType};

/// One filing in the feed, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilingSummary {
    /// The ticker symbol the feed was requested for.
    pub symbol: String,
    /// Registrant name from the submissions file.
    pub company: String,
    /// The filed form type.
    pub form_type: FormType,
    /// EDGAR's description of the primary document, when present.
    pub description: Option<String>,
    /// Link to the primary document in the filing archives.
    pub link: String,
    /// The date the filing was published.
    pub filed_at: NaiveDate,
    /// Full reference for follow-up fetches (document download, diffing).
    pub reference: FilingReference,
}
