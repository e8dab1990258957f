use std::fmt;

/// The classes of cryptographic objects a keystore holds
///
/// Each kind maps onto a family of request attributes: `<Kind>Name` carries
/// the logical object name, `<Kind>` the PEM content and `<Kind>Exists` the
/// presence flag. The handlers spell those attributes out in their typed
/// request structs; this enum identifies the kind in errors and log events.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ObjectKind {
    PrivateKey,
    Certificate,
    Chain,
    CertificateRequest,
    CertificateRequestTemplate,
    TrustAnchors,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::PrivateKey => "PrivateKey",
            ObjectKind::Certificate => "Certificate",
            ObjectKind::Chain => "Chain",
            ObjectKind::CertificateRequest => "CertificateRequest",
            ObjectKind::CertificateRequestTemplate => "CertificateRequestTemplate",
            ObjectKind::TrustAnchors => "TrustAnchors",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
