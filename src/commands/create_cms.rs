use std::fs;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use super::request_namespace;
use crate::error::{Error, Result};
use crate::provider::CryptoProvider;
use crate::request::{required, truthy};
use crate::settings::Settings;

const COMMAND: &str = "CreateCMS";

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CreateCmsRequest {
    pub location: Option<String>,
    #[serde(deserialize_with = "truthy")]
    pub mutable: bool,
    pub private_key_name: Option<String>,
    pub certificate_name: Option<String>,
    pub certificate_request: Option<String>,
    pub key_pin: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateCmsResponse {
    #[serde(rename = "CMS")]
    pub cms: String,
}

/// Wrap a certificate request body in a signed PKCS#7/CMS envelope.
///
/// The body is the armor-stripped base64 a CreateCertificateRequest
/// produced (a full PEM is tolerated too); it is decoded back to DER and
/// signed non-detached with the resolved key and certificate.
pub fn run(
    request: CreateCmsRequest,
    settings: &Settings,
    provider: &dyn CryptoProvider,
) -> Result<CreateCmsResponse> {
    let key_name = required(COMMAND, "PrivateKeyName", request.private_key_name.as_deref())?;
    let body = required(
        COMMAND,
        "CertificateRequest",
        request.certificate_request.as_deref(),
    )?;
    let cert_name = required(COMMAND, "CertificateName", request.certificate_name.as_deref())?;

    let ns = request_namespace(request.location.as_deref(), request.mutable, settings);
    let key_path = ns.resolve(key_name);
    let key_pem = fs::read_to_string(&key_path).map_err(|e| {
        Error::Signing(format!("cannot read private key {}: {}", key_path.display(), e))
    })?;
    let cert_path = ns.resolve(cert_name);
    let cert_pem = fs::read_to_string(&cert_path).map_err(|e| {
        Error::Signing(format!("cannot read certificate {}: {}", cert_path.display(), e))
    })?;

    let payload = decode_request_body(body)?;
    tracing::info!(key = key_name, certificate = cert_name, "signing CMS envelope");
    let cms = provider.sign_message(&key_pem, &cert_pem, &payload, request.key_pin.as_deref())?;
    Ok(CreateCmsResponse { cms })
}

/// Decode an armor-stripped (or fully armored) base64 request body to DER.
fn decode_request_body(body: &str) -> Result<Vec<u8>> {
    let compact: String = body
        .lines()
        .filter(|line| !line.starts_with("-----"))
        .flat_map(|line| line.chars())
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    STANDARD
        .decode(compact)
        .map_err(|e| Error::Signing(format!("certificate request body is not valid base64: {e}")))
}
