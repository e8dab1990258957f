use std::fs;

use serde::{Deserialize, Serialize};

use super::request_namespace;
use crate::error::{Error, Result};
use crate::kind::ObjectKind;
use crate::request::required;
use crate::settings::Settings;

const COMMAND: &str = "ImportCertificate";

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ImportRequest {
    pub location: Option<String>,
    pub private_key_name: Option<String>,
    pub certificate_name: Option<String>,
    pub chain_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {}

/// Promote staged objects into the live store.
///
/// Resolves each name under both contexts itself, so the request's own
/// `Mutable` attribute plays no role here. Objects that were never staged
/// are skipped without error. The per-kind order (key, certificate, chain)
/// is fixed, and the moves are intentionally not transactional as a set:
/// a crash mid-import leaves the remaining staged objects in place for the
/// next invocation to pick up.
pub fn run(request: ImportRequest, settings: &Settings) -> Result<ImportResponse> {
    let private_key = required(COMMAND, "PrivateKeyName", request.private_key_name.as_deref())?;
    let certificate = required(COMMAND, "CertificateName", request.certificate_name.as_deref())?;
    let chain = required(COMMAND, "ChainName", request.chain_name.as_deref())?;

    let ns = request_namespace(request.location.as_deref(), false, settings);
    for (kind, name) in [
        (ObjectKind::PrivateKey, private_key),
        (ObjectKind::Certificate, certificate),
        (ObjectKind::Chain, chain),
    ] {
        let staged = ns.resolve_as(name, true);
        if !staged.exists() {
            tracing::debug!(%kind, "nothing staged, skipping");
            continue;
        }
        let live = ns.resolve_as(name, false);
        tracing::info!(%kind, from = %staged.display(), to = %live.display(), "promoting staged object");
        fs::rename(&staged, &live).map_err(|source| Error::Move { kind, source })?;
    }
    Ok(ImportResponse {})
}
