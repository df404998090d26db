//! Parser Properties
//!
//! Determinism, document-order preservation and instant-based timestamp
//! equality.

use fed_saml11::{parse_assertion, parse_instant, Saml11Parser};
use saml11_conformance_tests::{fixture, init_tracing, parse_fixture};

const FIXTURES: [&str; 5] = [
    "saml1-assertion.xml",
    "saml1-assertion-attribstat.xml",
    "saml1-assertion-authzdecision.xml",
    "saml1-assertion-auth-authz.xml",
    "saml1-assertion-advice-signed.xml",
];

#[test]
fn parsing_is_deterministic() -> anyhow::Result<()> {
    let parser = Saml11Parser::new();
    for name in FIXTURES {
        let xml = fixture(name)?;
        let first = parser.parse_str(&xml)?;
        let second = parser.parse_str(&xml)?;
        assert_eq!(first, second, "{name} parsed differently on a second run");

        let streamed = parse_fixture(name)??;
        assert_eq!(first, streamed, "{name} differs between string and reader input");
    }
    Ok(())
}

#[test]
fn every_parsed_assertion_is_version_1_1() -> anyhow::Result<()> {
    for name in FIXTURES {
        let assertion = parse_fixture(name)??;
        assert_eq!(
            (assertion.major_version, assertion.minor_version),
            (1, 1),
            "{name}"
        );
    }
    Ok(())
}

#[test]
fn heterogeneous_statement_order_is_preserved() -> anyhow::Result<()> {
    let assertion = parse_fixture("saml1-assertion-auth-authz.xml")??;
    let kinds: Vec<_> = assertion.statements.iter().map(|s| s.element_name()).collect();
    assert_eq!(kinds, ["AttributeStatement", "AuthenticationStatement"]);

    let assertion = parse_fixture("saml1-assertion-attribstat.xml")??;
    let kinds: Vec<_> = assertion.statements.iter().map(|s| s.element_name()).collect();
    assert_eq!(kinds, ["AuthenticationStatement", "AttributeStatement"]);
    Ok(())
}

#[test]
fn attribute_values_keep_multiplicity_and_order() -> anyhow::Result<()> {
    init_tracing();
    let xml = fixture("saml1-assertion-attribstat.xml")?.replace(
        "<saml:AttributeValue>student</saml:AttributeValue>",
        "<saml:AttributeValue>student</saml:AttributeValue>\
         <saml:AttributeValue>member</saml:AttributeValue>",
    );
    let assertion = parse_assertion(&xml)?;

    let attr_stmt = assertion
        .attribute_statements()
        .next()
        .expect("attribute statement");
    let values: Vec<_> = attr_stmt.attributes[0].text_values().collect();
    assert_eq!(values, ["member", "student", "member"]);
    assert!(attr_stmt.attributes[0].contains_value("student"));
    Ok(())
}

#[test]
fn equivalent_timestamps_are_equal_instants() -> anyhow::Result<()> {
    assert_eq!(
        parse_instant("2002-06-19T17:05:37.795Z")?,
        parse_instant("2002-06-19T17:05:37.795+00:00")?
    );

    let zulu = parse_fixture("saml1-assertion.xml")??;
    let xml = fixture("saml1-assertion.xml")?.replace(
        r#"IssueInstant="2002-06-19T17:05:37.795Z""#,
        r#"IssueInstant="2002-06-19T12:05:37.795-05:00""#,
    );
    let offset = parse_assertion(&xml)?;
    assert_eq!(zulu.issue_instant, offset.issue_instant);
    assert_eq!(zulu, offset);
    Ok(())
}

#[test]
fn assertion_serializes_with_tagged_statements() -> anyhow::Result<()> {
    let assertion = parse_fixture("saml1-assertion-auth-authz.xml")??;
    let json = serde_json::to_value(&assertion)?;

    assert_eq!(json["id"], "_e5c23ff7a3889e12fa01802a47331653");
    assert_eq!(json["statements"][0]["type"], "attribute");
    assert_eq!(json["statements"][1]["type"], "authentication");
    assert!(json.get("signature").is_none());
    Ok(())
}
