use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::core::FilingReference;

/// Form 4 transaction codes, mapped onto a closed set.
///
/// Unknown codes become [`TransactionCode::Other`] instead of failing the
/// parse, so a new code introduced by the registry degrades gracefully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionCode {
    /// Open-market or private purchase (code `P`).
    Purchase,
    /// Open-market or private sale (code `S`).
    Sale,
    /// Grant or award from the issuer (code `A`).
    Award,
    /// Disposition back to the issuer (code `D`).
    DispositionToIssuer,
    /// Shares withheld to cover tax on vesting (code `F`).
    TaxWithholding,
    /// Exercise of a derivative security (code `M`).
    Exercise,
    /// Conversion of a derivative security (code `C`).
    Conversion,
    /// Bona fide gift (code `G`).
    Gift,
    /// Small acquisition under Rule 16a-6 (code `L`).
    SmallAcquisition,
    /// Acquisition or disposition by will or the laws of descent (code `W`).
    Inheritance,
    /// Any other code.
    Other,
}

impl TransactionCode {
    /// Map a raw Form 4 transaction code.
    pub fn from_form4(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "P" => TransactionCode::Purchase,
            "S" => TransactionCode::Sale,
            "A" => TransactionCode::Award,
            "D" => TransactionCode::DispositionToIssuer,
            "F" => TransactionCode::TaxWithholding,
            "M" => TransactionCode::Exercise,
            "C" => TransactionCode::Conversion,
            "G" => TransactionCode::Gift,
            "L" => TransactionCode::SmallAcquisition,
            "W" => TransactionCode::Inheritance,
            _ => TransactionCode::Other,
        }
    }
}

/// The reporting owner's relationship to the issuer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct OwnerRole {
    /// The owner is an officer of the issuer.
    pub officer: bool,
    /// The owner sits on the board.
    pub director: bool,
    /// The owner holds ten percent or more of the issuer's stock.
    pub ten_percent_owner: bool,
    /// Officer title when reported (e.g. "Chief Executive Officer").
    pub officer_title: Option<String>,
}

/// One reported change in an insider's holdings. Created at parse time,
/// never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnershipTransaction {
    /// The Form 4 filing this transaction was reported in.
    pub filing: FilingReference,
    /// Reporting owner's name as filed.
    pub owner_name: String,
    /// Role flags for the reporting owner.
    pub role: OwnerRole,
    /// Date the transaction was executed.
    pub date: NaiveDate,
    /// Transaction code, mapped onto the closed set.
    pub code: TransactionCode,
    /// Number of shares in the transaction.
    pub shares: f64,
    /// Price per share; not all transactions report one (grants, gifts).
    pub price_per_share: Option<f64>,
    /// Shares beneficially owned after the transaction, when reported.
    pub shares_owned_after: Option<f64>,
    /// True when the shares were acquired (`A`), false when disposed (`D`).
    pub acquired: bool,
}

impl OwnershipTransaction {
    /// Dollar value of the transaction, when a price was reported.
    pub fn value(&self) -> Option<f64> {
        self.price_per_share.map(|p| p * self.shares)
    }
}

/// Named narrative sections extracted from long-form filings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionName {
    /// Item 1, Business.
    Business,
    /// Item 1A, Risk Factors.
    RiskFactors,
    /// Item 3, Legal Proceedings.
    LegalProceedings,
    /// Item 7 (10-K) / Item 2 (10-Q), Management's Discussion and Analysis.
    ManagementDiscussion,
    /// Item 7A (10-K) / Item 3 (10-Q), Market Risk disclosures.
    MarketRisk,
}

impl SectionName {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionName::Business => "business",
            SectionName::RiskFactors => "risk-factors",
            SectionName::LegalProceedings => "legal-proceedings",
            SectionName::ManagementDiscussion => "management-discussion",
            SectionName::MarketRisk => "market-risk",
        }
    }

    /// Parse a kebab-case section name, as used in cache keys and requests.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "business" => Some(SectionName::Business),
            "risk-factors" => Some(SectionName::RiskFactors),
            "legal-proceedings" => Some(SectionName::LegalProceedings),
            "management-discussion" => Some(SectionName::ManagementDiscussion),
            "market-risk" => Some(SectionName::MarketRisk),
            _ => None,
        }
    }
}

impl std::fmt::Display for SectionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SectionName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A named narrative section holding cleaned plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilingSection {
    /// Which section this is.
    pub name: SectionName,
    /// Cleaned plain text (tags stripped, whitespace collapsed).
    pub text: String,
}

/// The parser's output: a tagged variant per document family, so downstream
/// engines stay exhaustive-match safe against new form types.
#[derive(Debug, Clone)]
pub enum ParsedFiling {
    /// Ownership-change forms: one transaction per reported line item.
    Ownership(Vec<OwnershipTransaction>),
    /// Long-form reports: the named sections that could be located.
    Narrative(Vec<FilingSection>),
    /// A form this crate does not extract structure from.
    Unsupported,
}
