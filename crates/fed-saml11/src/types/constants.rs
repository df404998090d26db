//! SAML 1.x constants and URIs.
//!
//! Namespace URIs, authentication method identifiers, confirmation methods
//! and name identifier formats defined by the SAML 1.1 assertion schema.

/// SAML 1.x assertion namespace URI (shared by SAML 1.0 and 1.1).
pub const SAML1_ASSERTION_NS: &str = "urn:oasis:names:tc:SAML:1.0:assertion";

/// SAML 1.x protocol namespace URI.
pub const SAML1_PROTOCOL_NS: &str = "urn:oasis:names:tc:SAML:1.0:protocol";

/// XML Digital Signature namespace URI.
pub const XMLDSIG_NS: &str = "http://www.w3.org/2000/09/xmldsig#";

/// XSI namespace URI.
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Major version accepted by this parser.
pub const SAML1_MAJOR_VERSION: u32 = 1;

/// Minor version accepted by this parser.
pub const SAML1_MINOR_VERSION: u32 = 1;

// ============================================================================
// Authentication Methods
// ============================================================================

/// SAML 1.x authentication method identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AuthenticationMethod {
    /// Unspecified authentication method.
    #[default]
    Unspecified,
    /// Password authentication.
    Password,
    /// Kerberos (RFC 1510).
    Kerberos,
    /// Secure Remote Password (RFC 2945).
    SecureRemotePassword,
    /// Hardware token.
    HardwareToken,
    /// TLS client certificate (RFC 2246).
    TlsClient,
    /// X.509 public key.
    X509PublicKey,
    /// PGP public key.
    PgpPublicKey,
    /// SPKI public key.
    SpkiPublicKey,
    /// XKMS public key.
    XkmsPublicKey,
    /// XML digital signature (RFC 3075).
    XmlDigitalSignature,
}

impl AuthenticationMethod {
    /// Returns the URI for this authentication method.
    #[must_use]
    pub const fn uri(&self) -> &'static str {
        match self {
            Self::Unspecified => "urn:oasis:names:tc:SAML:1.0:am:unspecified",
            Self::Password => "urn:oasis:names:tc:SAML:1.0:am:password",
            Self::Kerberos => "urn:ietf:rfc:1510",
            Self::SecureRemotePassword => "urn:ietf:rfc:2945",
            Self::HardwareToken => "urn:oasis:names:tc:SAML:1.0:am:HardwareToken",
            Self::TlsClient => "urn:ietf:rfc:2246",
            Self::X509PublicKey => "urn:oasis:names:tc:SAML:1.0:am:X509-PKI",
            Self::PgpPublicKey => "urn:oasis:names:tc:SAML:1.0:am:PGP",
            Self::SpkiPublicKey => "urn:oasis:names:tc:SAML:1.0:am:SPKI",
            Self::XkmsPublicKey => "urn:oasis:names:tc:SAML:1.0:am:XKMS",
            Self::XmlDigitalSignature => "urn:ietf:rfc:3075",
        }
    }

    /// Parses an authentication method from its URI.
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            "urn:oasis:names:tc:SAML:1.0:am:unspecified" => Some(Self::Unspecified),
            "urn:oasis:names:tc:SAML:1.0:am:password" => Some(Self::Password),
            "urn:ietf:rfc:1510" => Some(Self::Kerberos),
            "urn:ietf:rfc:2945" => Some(Self::SecureRemotePassword),
            "urn:oasis:names:tc:SAML:1.0:am:HardwareToken" => Some(Self::HardwareToken),
            "urn:ietf:rfc:2246" => Some(Self::TlsClient),
            "urn:oasis:names:tc:SAML:1.0:am:X509-PKI" => Some(Self::X509PublicKey),
            "urn:oasis:names:tc:SAML:1.0:am:PGP" => Some(Self::PgpPublicKey),
            "urn:oasis:names:tc:SAML:1.0:am:SPKI" => Some(Self::SpkiPublicKey),
            "urn:oasis:names:tc:SAML:1.0:am:XKMS" => Some(Self::XkmsPublicKey),
            "urn:ietf:rfc:3075" => Some(Self::XmlDigitalSignature),
            _ => None,
        }
    }
}

// ============================================================================
// Confirmation Methods
// ============================================================================

/// SAML 1.x subject confirmation methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfirmationMethod {
    /// Bearer: whoever presents the assertion is the subject.
    Bearer,
    /// Artifact (browser/artifact profile).
    Artifact,
    /// Holder of key.
    HolderOfKey,
    /// Sender vouches.
    SenderVouches,
}

impl ConfirmationMethod {
    /// Returns the URI for this confirmation method.
    #[must_use]
    pub const fn uri(&self) -> &'static str {
        match self {
            Self::Bearer => "urn:oasis:names:tc:SAML:1.0:cm:bearer",
            Self::Artifact => "urn:oasis:names:tc:SAML:1.0:cm:artifact",
            Self::HolderOfKey => "urn:oasis:names:tc:SAML:1.0:cm:holder-of-key",
            Self::SenderVouches => "urn:oasis:names:tc:SAML:1.0:cm:sender-vouches",
        }
    }

    /// Parses a confirmation method from its URI.
    ///
    /// Also accepts the legacy SAML 1.0 `artifact-01` identifier.
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            "urn:oasis:names:tc:SAML:1.0:cm:bearer" => Some(Self::Bearer),
            "urn:oasis:names:tc:SAML:1.0:cm:artifact"
            | "urn:oasis:names:tc:SAML:1.0:cm:artifact-01" => Some(Self::Artifact),
            "urn:oasis:names:tc:SAML:1.0:cm:holder-of-key" => Some(Self::HolderOfKey),
            "urn:oasis:names:tc:SAML:1.0:cm:sender-vouches" => Some(Self::SenderVouches),
            _ => None,
        }
    }
}

// ============================================================================
// Name Identifier Formats
// ============================================================================

/// SAML 1.1 name identifier formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NameIdentifierFormat {
    /// Unspecified format.
    #[default]
    Unspecified,
    /// Email address format.
    EmailAddress,
    /// X.509 subject name format.
    X509SubjectName,
    /// Windows domain qualified name format.
    WindowsDomainQualifiedName,
}

impl NameIdentifierFormat {
    /// Returns the URI for this name identifier format.
    #[must_use]
    pub const fn uri(&self) -> &'static str {
        match self {
            Self::Unspecified => "urn:oasis:names:tc:SAML:1.1:nameid-format:unspecified",
            Self::EmailAddress => "urn:oasis:names:tc:SAML:1.1:nameid-format:emailAddress",
            Self::X509SubjectName => "urn:oasis:names:tc:SAML:1.1:nameid-format:X509SubjectName",
            Self::WindowsDomainQualifiedName => {
                "urn:oasis:names:tc:SAML:1.1:nameid-format:WindowsDomainQualifiedName"
            }
        }
    }

    /// Parses a name identifier format from its URI.
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            "urn:oasis:names:tc:SAML:1.1:nameid-format:unspecified" => Some(Self::Unspecified),
            "urn:oasis:names:tc:SAML:1.1:nameid-format:emailAddress" => Some(Self::EmailAddress),
            "urn:oasis:names:tc:SAML:1.1:nameid-format:X509SubjectName" => {
                Some(Self::X509SubjectName)
            }
            "urn:oasis:names:tc:SAML:1.1:nameid-format:WindowsDomainQualifiedName" => {
                Some(Self::WindowsDomainQualifiedName)
            }
            _ => None,
        }
    }
}

// ============================================================================
// Action Namespaces
// ============================================================================

/// Action namespace identifiers for authorization decision statements.
pub mod action_namespaces {
    /// Read/Write/Execute/Delete/Control.
    pub const RWEDC: &str = "urn:oasis:names:tc:SAML:1.0:action:rwedc";

    /// Read/Write/Execute/Delete/Control with negation.
    pub const RWEDC_NEGATION: &str = "urn:oasis:names:tc:SAML:1.0:action:rwedc-negation";

    /// HTTP GET/HEAD/PUT/POST.
    pub const GHPP: &str = "urn:oasis:names:tc:SAML:1.0:action:ghpp";

    /// UNIX file permissions.
    pub const UNIX: &str = "urn:oasis:names:tc:SAML:1.0:action:unix";
}
