//! Reference Assertion Scenarios
//!
//! Each test parses one complete fixture and checks the populated graph
//! field by field.

use fed_saml11::{
    parse_instant, AttributeStatement, AuthenticationMethod, AuthenticationStatement,
    AuthorizationDecisionStatement, Condition, ConfirmationMethod, Decision,
    NameIdentifierFormat, Statement,
};
use saml11_conformance_tests::parse_fixture;

/// saml1-assertion: single authentication statement.
#[test]
fn authentication_assertion() -> anyhow::Result<()> {
    let assertion = parse_fixture("saml1-assertion.xml")??;

    assert_eq!(assertion.major_version, 1);
    assert_eq!(assertion.minor_version, 1);
    assert_eq!(assertion.id, "buGxcG4gILg5NlocyLccDz6iXrUa");
    assert_eq!(assertion.issuer, "https://idp.example.org/saml");
    assert_eq!(assertion.issue_instant, parse_instant("2002-06-19T17:05:37.795Z")?);

    let conditions = assertion.conditions.as_ref().expect("conditions present");
    assert_eq!(conditions.not_before, Some(parse_instant("2002-06-19T17:00:37.795Z")?));
    assert_eq!(
        conditions.not_on_or_after,
        Some(parse_instant("2002-06-19T17:10:37.795Z")?)
    );
    assert!(conditions.conditions.is_empty());

    assert_eq!(assertion.statements.len(), 1);
    let stmt = AuthenticationStatement::try_from(assertion.statements[0].clone())?;
    assert_eq!(stmt.authentication_method, "urn:oasis:names:tc:SAML:1.0:am:password");
    assert_eq!(stmt.parsed_method(), Some(AuthenticationMethod::Password));
    assert_eq!(stmt.authentication_instant, parse_instant("2002-06-19T17:05:17.706Z")?);

    let name = stmt.subject.name_identifier.as_ref().expect("name identifier");
    assert_eq!(name.value, "user@idp.example.org");
    assert_eq!(name.parsed_format(), Some(NameIdentifierFormat::EmailAddress));

    let confirmation = stmt.subject.subject_confirmation.as_ref().expect("confirmation");
    assert_eq!(
        confirmation.confirmation_methods,
        ["urn:oasis:names:tc:SAML:1.0:cm:bearer"]
    );
    Ok(())
}

/// saml1-assertion-attribstat: authentication then attribute statement.
#[test]
fn attribute_statement_assertion() -> anyhow::Result<()> {
    let assertion = parse_fixture("saml1-assertion-attribstat.xml")??;

    assert_eq!(assertion.id, "buGxcG4gILg5NlocyLccDz6iXrUb");
    assert_eq!(assertion.statements.len(), 2);

    let authn = assertion.statements[0]
        .as_authentication()
        .expect("first statement is authentication");
    assert_eq!(authn.authentication_instant, parse_instant("2002-06-19T17:08:37.795Z")?);

    let attr_stmt = AttributeStatement::try_from(assertion.statements[1].clone())?;
    assert_eq!(attr_stmt.subject.name(), Some("user@idp.example.org"));
    assert!(attr_stmt
        .subject
        .subject_confirmation
        .as_ref()
        .is_some_and(|c| c.has_method(ConfirmationMethod::Bearer)));

    assert_eq!(attr_stmt.attributes.len(), 1);
    let attr = attr_stmt
        .attribute("urn:mace:dir:attribute-def:eduPersonAffiliation")
        .expect("affiliation attribute");
    assert_eq!(
        attr.attribute_namespace,
        "urn:mace:shibboleth:1.0:attributeNamespace:uri"
    );
    assert!(attr.contains_value("member"));
    assert!(attr.contains_value("student"));
    assert!(!attr.contains_value("faculty"));
    Ok(())
}

/// saml1-assertion-authzdecision: authorization decision with evidence.
#[test]
fn authorization_decision_assertion() -> anyhow::Result<()> {
    let assertion = parse_fixture("saml1-assertion-authzdecision.xml")??;

    let conditions = assertion.conditions.as_ref().expect("conditions present");
    assert_eq!(conditions.not_before, Some(parse_instant("2002-06-19T17:05:37.795Z")?));
    assert_eq!(
        conditions.not_on_or_after,
        Some(parse_instant("2002-06-19T17:15:37.795Z")?)
    );

    let [statement] = assertion.statements.as_slice() else {
        panic!("expected exactly one statement");
    };
    let authz = AuthorizationDecisionStatement::try_from(statement.clone())?;
    assert_eq!(authz.resource, "https://sp.example.org/finance/reports");
    assert_eq!(authz.decision, Decision::Permit);
    assert_eq!(
        authz.actions.iter().map(|a| a.value.as_str()).collect::<Vec<_>>(),
        ["GET", "HEAD"]
    );
    let evidence = authz.evidence.expect("evidence present");
    assert_eq!(evidence.assertion_id_references, ["buGxcG4gILg5NlocyLccDz6iXrUa"]);
    assert!(evidence.assertions.is_empty());
    Ok(())
}

/// saml1-assertion-auth-authz: CAS-style attribute and authentication
/// statements under an audience restriction.
#[test]
fn attribute_and_authentication_assertion() -> anyhow::Result<()> {
    let assertion = parse_fixture("saml1-assertion-auth-authz.xml")??;

    assert_eq!(assertion.id, "_e5c23ff7a3889e12fa01802a47331653");
    assert_eq!(assertion.issuer, "localhost");
    assert_eq!(assertion.issue_instant, parse_instant("2008-12-10T14:12:14.817Z")?);

    let conditions = assertion.conditions.as_ref().expect("conditions present");
    assert_eq!(conditions.not_before, Some(parse_instant("2008-12-10T14:12:14.817Z")?));
    assert_eq!(
        conditions.not_on_or_after,
        Some(parse_instant("2008-12-10T14:12:44.817Z")?)
    );
    assert_eq!(conditions.conditions.len(), 1);
    let Condition::AudienceRestriction(restriction) = &conditions.conditions[0] else {
        panic!("expected an audience restriction");
    };
    assert_eq!(restriction.audiences, ["https://some-service.example.com/app/"]);

    assert_eq!(assertion.statements.len(), 2);
    let Statement::Attribute(attr_stmt) = &assertion.statements[0] else {
        panic!("expected the attribute statement first");
    };
    assert_eq!(attr_stmt.subject.name(), Some("johnq"));
    assert!(attr_stmt
        .subject
        .subject_confirmation
        .as_ref()
        .is_some_and(|c| c.has_method(ConfirmationMethod::Artifact)));

    let expected = [
        ("uid", "12345"),
        ("groupMembership", "uugid=middleware.staff,ou=Groups,dc=vt,dc=edu"),
        ("eduPersonAffiliation", "staff"),
        ("accountState", "ACTIVE"),
    ];
    assert_eq!(attr_stmt.attributes.len(), expected.len());
    for (attr, (name, value)) in attr_stmt.attributes.iter().zip(expected) {
        assert_eq!(attr.attribute_name, name);
        assert_eq!(attr.attribute_namespace, "http://www.ja-sig.org/products/cas/");
        assert_eq!(attr.text_values().collect::<Vec<_>>(), [value]);
    }

    let Statement::Authentication(authn) = &assertion.statements[1] else {
        panic!("expected the authentication statement second");
    };
    assert_eq!(authn.authentication_instant, parse_instant("2008-12-10T14:12:14.741Z")?);
    assert_eq!(authn.parsed_method(), Some(AuthenticationMethod::Password));
    assert_eq!(authn.subject.name(), Some("johnq"));
    Ok(())
}
