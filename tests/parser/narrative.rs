use omnifolio_edgar::{FormType, ParsedFiling, SectionName};

use crate::common;

#[test]
fn annual_report_splits_into_named_sections() {
    let raw = common::read_fixture("annual_report_2023.html");
    let reference = common::reference(FormType::Form10K, "0001318605-24-000042");

    let ParsedFiling::Narrative(sections) =
        omnifolio_edgar::filings::parse(&raw, &reference).unwrap()
    else {
        panic!("expected narrative sections");
    };

    let names: Vec<SectionName> = sections.iter().map(|s| s.name).collect();
    assert!(names.contains(&SectionName::Business));
    assert!(names.contains(&SectionName::RiskFactors));
    assert!(names.contains(&SectionName::LegalProceedings));
    assert!(names.contains(&SectionName::ManagementDiscussion));
    assert!(names.contains(&SectionName::MarketRisk));

    let risk = sections
        .iter()
        .find(|s| s.name == SectionName::RiskFactors)
        .unwrap();
    assert!(risk.text.contains("semiconductor suppliers"));
    // The table of contents must not win over the section body.
    assert!(risk.text.len() > 100);
    // Markup is stripped down to plain text.
    assert!(!risk.text.contains('<'));

    let business = sections
        .iter()
        .find(|s| s.name == SectionName::Business)
        .unwrap();
    assert!(business.text.contains("industrial automation"));
    assert!(!business.text.contains("semiconductor suppliers"));
}

#[test]
fn entities_decode_exactly_once() {
    let raw = "<html><body>Item 1A. Risk Factors \
        Our R&amp;D spend on AI &amp; robotics may not pay off. \
        Exhibits quote &amp;lt;redacted&amp;gt; passages verbatim.</body></html>";
    let reference = common::reference(FormType::Form10K, "0001318605-26-000060");

    let ParsedFiling::Narrative(sections) =
        omnifolio_edgar::filings::parse(raw, &reference).unwrap()
    else {
        panic!("expected narrative parse");
    };

    let risk = sections
        .iter()
        .find(|s| s.name == SectionName::RiskFactors)
        .unwrap();
    assert!(risk.text.contains("R&D"));
    assert!(risk.text.contains("AI & robotics"));
    // Double-escaped markup stays escaped instead of decoding twice.
    assert!(risk.text.contains("&lt;redacted&gt;"));
    assert!(!risk.text.contains("<redacted>"));
}

#[test]
fn unrecognizable_document_yields_no_sections() {
    let reference = common::reference(FormType::Form10Q, "0001318605-26-000051");
    let ParsedFiling::Narrative(sections) =
        omnifolio_edgar::filings::parse("<html><body>press release</body></html>", &reference)
            .unwrap()
    else {
        panic!("expected narrative parse");
    };
    assert!(sections.is_empty());
}

#[test]
fn section_names_round_trip_through_their_labels() {
    for name in [
        SectionName::Business,
        SectionName::RiskFactors,
        SectionName::LegalProceedings,
        SectionName::ManagementDiscussion,
        SectionName::MarketRisk,
    ] {
        assert_eq!(SectionName::parse(name.as_str()), Some(name));
    }
    assert_eq!(SectionName::parse("exhibits"), None);
}
