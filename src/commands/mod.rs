//! Protocol command handlers
//!
//! One module per operation, one typed request/response struct pair per
//! module. The dispatcher below is the only place that knows the wire
//! names; everything underneath works on parsed structs and returns a
//! typed response that is serialized generically at this boundary.

mod attach;
mod create_cms;
mod create_csr;
mod generate_key;
mod import;
mod inspect;
mod persist;
mod truststore;

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::namespace::Namespace;
use crate::provider::CryptoProvider;
use crate::settings::Settings;

/// Route one protocol command to its handler and serialize the result.
///
/// An unknown command name fails deterministically without touching the
/// store; a missing body is treated as an empty request object.
pub fn dispatch(
    command: &str,
    body: &str,
    settings: &Settings,
    provider: &dyn CryptoProvider,
) -> Result<serde_json::Value> {
    let body = if body.trim().is_empty() { "{}" } else { body };
    tracing::debug!(command, "dispatching");
    match command {
        "Inspect" => to_value(inspect::run(serde_json::from_str(body)?, settings)?),
        "Attach" => to_value(attach::run(serde_json::from_str(body)?, settings)?),
        "GenerateKey" => to_value(generate_key::run(
            serde_json::from_str(body)?,
            settings,
            provider,
        )?),
        "CreateCertificateRequest" => to_value(create_csr::run(
            serde_json::from_str(body)?,
            settings,
            provider,
        )?),
        "Persist" => to_value(persist::run(serde_json::from_str(body)?, settings)?),
        "ImportCertificate" => to_value(import::run(serde_json::from_str(body)?, settings)?),
        "CreateCMS" => to_value(create_cms::run(
            serde_json::from_str(body)?,
            settings,
            provider,
        )?),
        "GetTruststore" => to_value(truststore::run(settings)?),
        other => Err(Error::UnknownCommand(other.to_string())),
    }
}

fn to_value<T: serde::Serialize>(response: T) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(response)?)
}

/// Build the invocation's namespace from the request's `Location` and
/// `Mutable` attributes, falling back to the configured store root.
pub(crate) fn request_namespace(
    location: Option<&str>,
    mutable: bool,
    settings: &Settings,
) -> Namespace {
    let location = location
        .map(PathBuf::from)
        .unwrap_or_else(|| settings.store.location.clone());
    Namespace::new(location, mutable, settings.store.staging_suffix.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockProvider;

    #[test]
    fn unknown_command_is_rejected() {
        let settings = Settings::default();
        let err = dispatch("Frobnicate", "{}", &settings, &MockProvider).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported API command 'Frobnicate'"
        );
    }

    #[test]
    fn empty_body_is_an_empty_request() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut settings = Settings::default();
        settings.store.location = dir.path().to_path_buf();
        let value = dispatch("Inspect", "", &settings, &MockProvider).unwrap();
        assert_eq!(value["PrivateKeyExists"], serde_json::json!(false));
        assert_eq!(value["EnrollmentID"], serde_json::json!("<unset>"));
    }

    #[test]
    fn responses_serialize_with_wire_names() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("k.pem"), "pem").unwrap();
        let settings = Settings::default();
        let body = serde_json::json!({
            "Location": dir.path(),
            "PrivateKeyName": "k.pem",
            "EnrollmentID": "req-7"
        })
        .to_string();
        let value = dispatch("Inspect", &body, &settings, &MockProvider).unwrap();
        assert_eq!(value["PrivateKeyExists"], serde_json::json!(true));
        assert_eq!(value["CertificateExists"], serde_json::json!(false));
        assert_eq!(value["EnrollmentID"], serde_json::json!("req-7"));
    }
}
