use std::fs;

use serde::{Deserialize, Serialize};

use super::request_namespace;
use crate::error::{Error, Result};
use crate::provider::CryptoProvider;
use crate::request::{required, truthy};
use crate::settings::Settings;

const COMMAND: &str = "CreateCertificateRequest";

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CreateCsrRequest {
    pub location: Option<String>,
    #[serde(deserialize_with = "truthy")]
    pub mutable: bool,
    pub private_key_name: Option<String>,
    pub subject: Option<String>,
    pub key_pin: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateCsrResponse {
    pub certificate_request: String,
}

/// Build a PKCS#10 request with the stored private key.
///
/// The caller's subject arrives as a comma-delimited RDN list
/// (`CN=a,O=b`); the provider receives it slash-joined (`/CN=a/O=b`).
/// The response carries the request body with the PEM armor stripped.
pub fn run(
    request: CreateCsrRequest,
    settings: &Settings,
    provider: &dyn CryptoProvider,
) -> Result<CreateCsrResponse> {
    let name = required(COMMAND, "PrivateKeyName", request.private_key_name.as_deref())?;
    let subject = required(COMMAND, "Subject", request.subject.as_deref())?;

    let ns = request_namespace(request.location.as_deref(), request.mutable, settings);
    let path = ns.resolve(name);
    let key_pem = fs::read_to_string(&path).map_err(|e| {
        Error::RequestGeneration(format!("cannot read private key {}: {}", path.display(), e))
    })?;

    let subject = format_subject(subject);
    tracing::info!(key = name, subject = %subject, "creating certificate request");
    let pem = provider.create_request(&key_pem, &subject, request.key_pin.as_deref())?;
    Ok(CreateCsrResponse {
        certificate_request: strip_armor(&pem),
    })
}

/// `CN=a,O=b` → `/CN=a/O=b`. Empty components are dropped.
pub(crate) fn format_subject(subject: &str) -> String {
    let mut out = String::new();
    for component in subject.split(',') {
        let component = component.trim();
        if component.is_empty() {
            continue;
        }
        out.push('/');
        out.push_str(component);
    }
    out
}

/// Drop the BEGIN/END armor lines, keeping the base64 body.
pub(crate) fn strip_armor(pem: &str) -> String {
    pem.lines()
        .filter(|line| !line.starts_with("-----"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockProvider;
    use tempfile::TempDir;

    fn settings_for(dir: &TempDir) -> Settings {
        let mut settings = Settings::default();
        settings.store.location = dir.path().to_path_buf();
        settings
    }

    #[test]
    fn subject_components_are_slash_joined() {
        assert_eq!(format_subject("CN=a,O=b"), "/CN=a/O=b");
        assert_eq!(format_subject("CN=a, O=b ,OU=c"), "/CN=a/O=b/OU=c");
        assert_eq!(format_subject("CN=a,,O=b"), "/CN=a/O=b");
    }

    #[test]
    fn response_body_has_no_armor() {
        let dir = TempDir::new().unwrap();
        let settings = settings_for(&dir);
        fs::write(dir.path().join("k.pem"), "KEY-PEM").unwrap();

        let request = CreateCsrRequest {
            private_key_name: Some("k.pem".into()),
            subject: Some("CN=device-1,O=example".into()),
            ..Default::default()
        };
        let response = run(request, &settings, &MockProvider).unwrap();
        assert!(!response.certificate_request.contains("-----"));
        // the mock echoes the subject it was handed, base64-encoded
        use base64::{engine::general_purpose::STANDARD, Engine as _};
        let echoed = STANDARD.decode(&response.certificate_request).unwrap();
        assert_eq!(echoed, b"/CN=device-1/O=example");
    }

    #[test]
    fn staged_key_is_used_under_mutable_context() {
        let dir = TempDir::new().unwrap();
        let settings = settings_for(&dir);
        fs::write(dir.path().join("k.pem.new"), "STAGED-KEY").unwrap();

        let request = CreateCsrRequest {
            private_key_name: Some("k.pem".into()),
            subject: Some("CN=x".into()),
            mutable: true,
            ..Default::default()
        };
        run(request, &settings, &MockProvider).unwrap();
    }

    #[test]
    fn missing_key_surfaces_as_request_generation_failure() {
        let dir = TempDir::new().unwrap();
        let settings = settings_for(&dir);
        let request = CreateCsrRequest {
            private_key_name: Some("absent.pem".into()),
            subject: Some("CN=x".into()),
            ..Default::default()
        };
        let err = run(request, &settings, &MockProvider).unwrap_err();
        assert!(matches!(err, Error::RequestGeneration(_)));
    }
}
