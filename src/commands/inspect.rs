use serde::{Deserialize, Serialize};

use super::request_namespace;
use crate::error::Result;
use crate::request::truthy;
use crate::settings::Settings;

/// Echoed when the caller supplied no `EnrollmentID`.
const UNSET_ENROLLMENT_ID: &str = "<unset>";

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct InspectRequest {
    pub location: Option<String>,
    #[serde(deserialize_with = "truthy")]
    pub mutable: bool,
    #[serde(rename = "EnrollmentID")]
    pub enrollment_id: Option<String>,
    pub private_key_name: Option<String>,
    pub certificate_name: Option<String>,
    pub chain_name: Option<String>,
    pub certificate_request_name: Option<String>,
    pub certificate_request_template_name: Option<String>,
    pub trust_anchors_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InspectResponse {
    pub private_key_exists: bool,
    pub certificate_exists: bool,
    pub chain_exists: bool,
    pub certificate_request_exists: bool,
    pub certificate_request_template_exists: bool,
    pub trust_anchors_exists: bool,
    #[serde(rename = "EnrollmentID")]
    pub enrollment_id: String,
}

/// Report which objects exist under the caller's mutable context.
///
/// Pure read: every kind gets a boolean even when its name attribute was
/// absent, so the orchestrator can branch on a complete picture.
pub fn run(request: InspectRequest, settings: &Settings) -> Result<InspectResponse> {
    let ns = request_namespace(request.location.as_deref(), request.mutable, settings);
    let exists = |name: &Option<String>| {
        name.as_deref()
            .is_some_and(|n| !n.is_empty() && ns.resolve(n).exists())
    };
    let response = InspectResponse {
        private_key_exists: exists(&request.private_key_name),
        certificate_exists: exists(&request.certificate_name),
        chain_exists: exists(&request.chain_name),
        certificate_request_exists: exists(&request.certificate_request_name),
        certificate_request_template_exists: exists(&request.certificate_request_template_name),
        trust_anchors_exists: exists(&request.trust_anchors_name),
        enrollment_id: request
            .enrollment_id
            .unwrap_or_else(|| UNSET_ENROLLMENT_ID.to_string()),
    };
    tracing::debug!(
        location = %ns.location().display(),
        mutable = ns.mutable(),
        "inspected store"
    );
    Ok(response)
}
