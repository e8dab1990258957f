use std::fs;

use serde::{Deserialize, Serialize};

use super::request_namespace;
use crate::error::{Error, Result};
use crate::kind::ObjectKind;
use crate::namespace::Namespace;
use crate::request::truthy;
use crate::settings::Settings;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct AttachRequest {
    pub location: Option<String>,
    #[serde(deserialize_with = "truthy")]
    pub mutable: bool,
    #[serde(deserialize_with = "truthy")]
    pub private_key_exists: bool,
    pub private_key_name: Option<String>,
    #[serde(deserialize_with = "truthy")]
    pub certificate_exists: bool,
    pub certificate_name: Option<String>,
    #[serde(deserialize_with = "truthy")]
    pub chain_exists: bool,
    pub chain_name: Option<String>,
    #[serde(deserialize_with = "truthy")]
    pub certificate_request_exists: bool,
    pub certificate_request_name: Option<String>,
    #[serde(deserialize_with = "truthy")]
    pub certificate_request_template_exists: bool,
    pub certificate_request_template_name: Option<String>,
    #[serde(deserialize_with = "truthy")]
    pub trust_anchors_exists: bool,
    pub trust_anchors_name: Option<String>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttachResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_request: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_request_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust_anchors: Option<String>,
}

/// Fetch the contents of every object the caller flagged as existing.
///
/// The flags usually come straight out of a prior Inspect. An object
/// flagged as existing that cannot be read is an error, not a silent gap.
pub fn run(request: AttachRequest, settings: &Settings) -> Result<AttachResponse> {
    let ns = request_namespace(request.location.as_deref(), request.mutable, settings);
    Ok(AttachResponse {
        private_key: read_flagged(
            &ns,
            ObjectKind::PrivateKey,
            request.private_key_exists,
            request.private_key_name.as_deref(),
        )?,
        certificate: read_flagged(
            &ns,
            ObjectKind::Certificate,
            request.certificate_exists,
            request.certificate_name.as_deref(),
        )?,
        chain: read_flagged(
            &ns,
            ObjectKind::Chain,
            request.chain_exists,
            request.chain_name.as_deref(),
        )?,
        certificate_request: read_flagged(
            &ns,
            ObjectKind::CertificateRequest,
            request.certificate_request_exists,
            request.certificate_request_name.as_deref(),
        )?,
        certificate_request_template: read_flagged(
            &ns,
            ObjectKind::CertificateRequestTemplate,
            request.certificate_request_template_exists,
            request.certificate_request_template_name.as_deref(),
        )?,
        trust_anchors: read_flagged(
            &ns,
            ObjectKind::TrustAnchors,
            request.trust_anchors_exists,
            request.trust_anchors_name.as_deref(),
        )?,
    })
}

fn read_flagged(
    ns: &Namespace,
    kind: ObjectKind,
    flagged: bool,
    name: Option<&str>,
) -> Result<Option<String>> {
    let Some(name) = name.filter(|n| !n.is_empty()) else {
        return Ok(None);
    };
    if !flagged {
        return Ok(None);
    }
    let path = ns.resolve(name);
    match fs::read_to_string(&path) {
        Ok(content) => {
            tracing::debug!(%kind, path = %path.display(), "attached object");
            Ok(Some(content))
        }
        Err(source) => Err(Error::Read { kind, path, source }),
    }
}
