use std::fs;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::kind::ObjectKind;
use crate::settings::Settings;

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TruststoreResponse {
    pub trusted_certificates: String,
}

/// Return the backend-configured trust-anchor bundle, concatenated.
///
/// The bundle is fixed per backend configuration; the request body is
/// ignored entirely.
pub fn run(settings: &Settings) -> Result<TruststoreResponse> {
    let mut bundle = String::new();
    for path in &settings.truststore.anchors {
        let pem = fs::read_to_string(path).map_err(|source| Error::Read {
            kind: ObjectKind::TrustAnchors,
            path: path.clone(),
            source,
        })?;
        bundle.push_str(&pem);
        if !pem.ends_with('\n') {
            bundle.push('\n');
        }
    }
    tracing::debug!(anchors = settings.truststore.anchors.len(), "returned truststore");
    Ok(TruststoreResponse {
        trusted_certificates: bundle,
    })
}
