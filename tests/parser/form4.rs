use omnifolio_edgar::{EdgarError, FormType, ParsedFiling, TransactionCode};

use crate::common;

#[test]
fn form4_yields_owner_role_and_transactions() {
    let raw = common::read_fixture("form4_officer_purchase.xml");
    let reference = common::reference(FormType::Form4, "0001494730-26-000101");

    let parsed = omnifolio_edgar::filings::parse(&raw, &reference).unwrap();
    let ParsedFiling::Ownership(txns) = parsed else {
        panic!("expected ownership transactions");
    };
    assert_eq!(txns.len(), 2);

    let buy = &txns[0];
    assert_eq!(buy.owner_name, "Jordan Vance");
    assert!(buy.role.officer);
    assert!(!buy.role.director);
    assert_eq!(
        buy.role.officer_title.as_deref(),
        Some("Chief Financial Officer")
    );
    assert_eq!(buy.code, TransactionCode::Purchase);
    assert!(buy.acquired);
    assert_eq!(buy.shares, 12500.0);
    assert_eq!(buy.price_per_share, Some(48.20));
    assert_eq!(buy.value(), Some(12500.0 * 48.20));
    assert_eq!(buy.shares_owned_after, Some(86500.0));
    assert_eq!(buy.date.to_string(), "2026-02-09");

    let withholding = &txns[1];
    assert_eq!(withholding.code, TransactionCode::TaxWithholding);
    assert!(!withholding.acquired);
    assert_eq!(withholding.shares, 1800.0);
}

#[test]
fn transaction_codes_map_onto_closed_set() {
    assert_eq!(TransactionCode::from_form4("P"), TransactionCode::Purchase);
    assert_eq!(TransactionCode::from_form4("s"), TransactionCode::Sale);
    assert_eq!(TransactionCode::from_form4("A"), TransactionCode::Award);
    assert_eq!(
        TransactionCode::from_form4("D"),
        TransactionCode::DispositionToIssuer
    );
    assert_eq!(TransactionCode::from_form4("M"), TransactionCode::Exercise);
    assert_eq!(TransactionCode::from_form4("G"), TransactionCode::Gift);
    assert_eq!(TransactionCode::from_form4(" w "), TransactionCode::Inheritance);
    // A code this library has never heard of must not fail the parse.
    assert_eq!(TransactionCode::from_form4("Z"), TransactionCode::Other);
    assert_eq!(TransactionCode::from_form4(""), TransactionCode::Other);
}

#[test]
fn unpriced_grant_has_no_value() {
    let date = chrono::NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    let raw = common::form4_xml("Dana Whitfield", false, true, "A", true, date, 4000.0, None);
    let reference = common::reference(FormType::Form4, "0001494730-26-000102");

    let ParsedFiling::Ownership(txns) = omnifolio_edgar::filings::parse(&raw, &reference).unwrap()
    else {
        panic!("expected ownership transactions");
    };
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].code, TransactionCode::Award);
    assert!(txns[0].role.director);
    assert!(!txns[0].role.officer);
    assert_eq!(txns[0].price_per_share, None);
    assert_eq!(txns[0].value(), None);
}

#[test]
fn non_ownership_document_is_a_parse_error() {
    let reference = common::reference(FormType::Form4, "0001494730-26-000103");
    let err = omnifolio_edgar::filings::parse("<html>not a form 4</html>", &reference)
        .unwrap_err();
    assert!(matches!(err, EdgarError::Parse(_)), "got {err:?}");
}

#[test]
fn unsupported_forms_parse_to_unsupported() {
    let reference = common::reference(FormType::Form8K, "0001494730-26-000104");
    let parsed = omnifolio_edgar::filings::parse("<html>material event</html>", &reference).unwrap();
    assert!(matches!(parsed, ParsedFiling::Unsupported));
}
