use std::fs;

use serde::{Deserialize, Serialize};

use super::request_namespace;
use crate::error::{Error, Result};
use crate::kind::ObjectKind;
use crate::provider::{CryptoProvider, KeySpec};
use crate::request::{loose_u32, required, truthy};
use crate::settings::Settings;

const COMMAND: &str = "GenerateKey";

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct GenerateKeyRequest {
    pub location: Option<String>,
    #[serde(deserialize_with = "truthy")]
    pub mutable: bool,
    pub private_key_name: Option<String>,
    pub key_type: Option<String>,
    #[serde(deserialize_with = "loose_u32")]
    pub key_param: Option<u32>,
    pub key_pin: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GenerateKeyResponse {
    pub private_key: String,
}

/// Generate a fresh private key at the resolved path.
///
/// The parent directory is created if missing; a directory left behind by
/// an earlier failed attempt is simply reused. Enrollments normally run
/// this with `Mutable` set so the key lands in the staging namespace.
pub fn run(
    request: GenerateKeyRequest,
    settings: &Settings,
    provider: &dyn CryptoProvider,
) -> Result<GenerateKeyResponse> {
    let name = required(COMMAND, "PrivateKeyName", request.private_key_name.as_deref())?;
    let key_type = required(COMMAND, "KeyType", request.key_type.as_deref())?;
    let spec = match key_type.to_ascii_lowercase().as_str() {
        "rsa" => {
            let bits = request.key_param.ok_or(Error::MissingParameter {
                command: COMMAND,
                attribute: "KeyParam",
            })?;
            KeySpec::Rsa { bits }
        }
        _ => return Err(Error::UnsupportedKeyType(key_type.to_string())),
    };

    let ns = request_namespace(request.location.as_deref(), request.mutable, settings);
    let path = ns.resolve(name);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    tracing::info!(key = name, ?spec, path = %path.display(), "generating private key");
    let pem = provider.generate_key(&spec, request.key_pin.as_deref())?;
    fs::write(&path, &pem).map_err(|source| Error::Write {
        kind: ObjectKind::PrivateKey,
        path: path.clone(),
        source,
    })?;
    Ok(GenerateKeyResponse { private_key: pem })
}
