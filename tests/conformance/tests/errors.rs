//! Rejected Documents
//!
//! Failures carry the offending element or attribute name so callers can
//! report them without inspecting the input.

use fed_saml11::{parse_assertion, ParseError};
use saml11_conformance_tests::{fixture, parse_fixture};

#[test]
fn missing_issuer_is_reported() -> anyhow::Result<()> {
    let err = parse_fixture("saml1-assertion-missing-issuer.xml")?
        .expect_err("assertion without Issuer must fail");

    let ParseError::MissingRequiredAttribute {
        attribute, element, ..
    } = &err
    else {
        panic!("unexpected error: {err:?}");
    };
    assert_eq!(attribute, "Issuer");
    assert_eq!(element, "Assertion");
    assert!(err.position().is_some());
    assert_eq!(err.kind(), "missing_required_attribute");
    Ok(())
}

#[test]
fn major_version_2_is_unsupported() -> anyhow::Result<()> {
    let err = parse_fixture("saml1-assertion-v2.xml")?.expect_err("SAML 2 version must fail");
    assert!(matches!(err, ParseError::UnsupportedVersion { major: 2, .. }));
    assert_eq!(err.to_string(), "unsupported SAML version 2.0");
    Ok(())
}

#[test]
fn unknown_statement_is_rejected_by_default() -> anyhow::Result<()> {
    let err = parse_fixture("saml1-assertion-unknown-statement.xml")?
        .expect_err("unknown statement must fail under the default policy");
    assert!(matches!(
        err,
        ParseError::UnsupportedStatementType { ref name, .. } if name == "UnknownStatement"
    ));
    Ok(())
}

#[test]
fn statement_without_subject_is_rejected() -> anyhow::Result<()> {
    let xml = fixture("saml1-assertion.xml")?;
    let start = xml.find("<saml:Subject>").expect("fixture has a subject");
    let end = xml.find("</saml:Subject>").expect("fixture has a subject") + "</saml:Subject>".len();
    let without_subject = format!("{}{}", &xml[..start], &xml[end..]);

    assert!(matches!(
        parse_assertion(&without_subject),
        Err(ParseError::MissingRequiredElement { ref element, ref parent, .. })
            if element == "Subject" && parent == "AuthenticationStatement"
    ));
    Ok(())
}

#[test]
fn naive_timestamp_is_rejected() -> anyhow::Result<()> {
    let xml = fixture("saml1-assertion.xml")?.replace(
        r#"AuthenticationInstant="2002-06-19T17:05:17.706Z""#,
        r#"AuthenticationInstant="2002-06-19T17:05:17.706""#,
    );
    assert_eq!(
        parse_assertion(&xml),
        Err(ParseError::InvalidTemporalFormat {
            text: "2002-06-19T17:05:17.706".to_string()
        })
    );
    Ok(())
}

#[test]
fn blank_validity_window_is_rejected() -> anyhow::Result<()> {
    let xml = fixture("saml1-assertion.xml")?.replace(
        r#"NotBefore="2002-06-19T17:00:37.795Z""#,
        r#"NotBefore="""#,
    );
    assert_eq!(
        parse_assertion(&xml),
        Err(ParseError::InvalidTemporalFormat {
            text: String::new()
        })
    );
    Ok(())
}

#[test]
fn leap_second_and_lowercase_zone_are_rejected() -> anyhow::Result<()> {
    for instant in ["2016-12-31T23:59:60Z", "2002-06-19T17:05:17.706z"] {
        let xml = fixture("saml1-assertion.xml")?.replace(
            "2002-06-19T17:05:17.706Z",
            instant,
        );
        assert!(
            matches!(parse_assertion(&xml), Err(ParseError::InvalidTemporalFormat { .. })),
            "{instant} should be rejected"
        );
    }
    Ok(())
}

#[test]
fn text_inside_empty_content_element_is_malformed() -> anyhow::Result<()> {
    let xml = fixture("saml1-assertion-advice-signed.xml")?;
    let start = xml.find("<saml:SubjectLocality").expect("fixture has a locality");
    let end = start + xml[start..].find("/>").expect("locality is self-closing");
    let with_text = format!(
        "{}>somewhere</saml:SubjectLocality>{}",
        &xml[..end],
        &xml[end + 2..]
    );

    let err = parse_assertion(&with_text).expect_err("text in SubjectLocality must fail");
    assert_eq!(err.kind(), "malformed_input");
    Ok(())
}

#[test]
fn not_well_formed_input_is_malformed() -> anyhow::Result<()> {
    let xml = fixture("saml1-assertion.xml")?.replace(
        "</saml:AuthenticationStatement>",
        "</saml:AttributeStatement>",
    );
    let err = parse_assertion(&xml).expect_err("mismatched end tag must fail");
    assert!(matches!(err, ParseError::MalformedInput { .. }));
    Ok(())
}

#[test]
fn empty_document_has_no_assertion() {
    assert!(matches!(
        parse_assertion(""),
        Err(ParseError::MissingRequiredElement { ref element, ref parent, .. })
            if element == "Assertion" && parent == "document"
    ));
}
