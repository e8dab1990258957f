use std::fs;

use serde::{Deserialize, Serialize};

use super::request_namespace;
use crate::error::{Error, Result};
use crate::kind::ObjectKind;
use crate::request::truthy;
use crate::settings::Settings;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PersistRequest {
    pub location: Option<String>,
    #[serde(deserialize_with = "truthy")]
    pub mutable: bool,
    pub certificate: Option<String>,
    pub certificate_name: Option<String>,
    pub chain: Option<String>,
    pub chain_name: Option<String>,
    pub certificate_request: Option<String>,
    pub certificate_request_name: Option<String>,
    pub private_key: Option<String>,
    pub private_key_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PersistResponse {}

/// Write caller-supplied object contents into the store, write-once.
///
/// A path that already holds content is left untouched, which makes the
/// operation idempotent across retried enrollments: a previously accepted
/// object is never clobbered. Kinds without both a content and a name
/// attribute are skipped.
pub fn run(request: PersistRequest, settings: &Settings) -> Result<PersistResponse> {
    let ns = request_namespace(request.location.as_deref(), request.mutable, settings);
    let objects = [
        (
            ObjectKind::Certificate,
            request.certificate.as_deref(),
            request.certificate_name.as_deref(),
        ),
        (
            ObjectKind::Chain,
            request.chain.as_deref(),
            request.chain_name.as_deref(),
        ),
        (
            ObjectKind::CertificateRequest,
            request.certificate_request.as_deref(),
            request.certificate_request_name.as_deref(),
        ),
        (
            ObjectKind::PrivateKey,
            request.private_key.as_deref(),
            request.private_key_name.as_deref(),
        ),
    ];
    for (kind, content, name) in objects {
        let (Some(content), Some(name)) = (content, name) else {
            continue;
        };
        if content.is_empty() || name.is_empty() {
            continue;
        }
        let path = ns.resolve(name);
        if path.exists() {
            tracing::debug!(%kind, path = %path.display(), "already persisted, skipping");
            continue;
        }
        fs::write(&path, content).map_err(|source| Error::Write {
            kind,
            path: path.clone(),
            source,
        })?;
        tracing::info!(%kind, path = %path.display(), "persisted object");
    }
    Ok(PersistResponse {})
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn settings_for(dir: &TempDir) -> Settings {
        let mut settings = Settings::default();
        settings.store.location = dir.path().to_path_buf();
        settings
    }

    #[test]
    fn writes_each_supplied_kind() {
        let dir = TempDir::new().unwrap();
        let settings = settings_for(&dir);
        let request = PersistRequest {
            certificate: Some("CERT".into()),
            certificate_name: Some("c.pem".into()),
            chain: Some("CHAIN".into()),
            chain_name: Some("chain.pem".into()),
            ..Default::default()
        };
        run(request, &settings).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("c.pem")).unwrap(), "CERT");
        assert_eq!(
            fs::read_to_string(dir.path().join("chain.pem")).unwrap(),
            "CHAIN"
        );
    }

    #[test]
    fn never_overwrites_existing_content() {
        let dir = TempDir::new().unwrap();
        let settings = settings_for(&dir);
        fs::write(dir.path().join("c.pem"), "ORIGINAL").unwrap();

        let request = PersistRequest {
            certificate: Some("REPLACEMENT".into()),
            certificate_name: Some("c.pem".into()),
            ..Default::default()
        };
        run(request, &settings).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("c.pem")).unwrap(),
            "ORIGINAL"
        );
    }

    #[test]
    fn repeated_persist_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let settings = settings_for(&dir);
        for _ in 0..2 {
            let request = PersistRequest {
                private_key: Some("KEY".into()),
                private_key_name: Some("k.pem".into()),
                ..Default::default()
            };
            run(request, &settings).unwrap();
        }
        assert_eq!(fs::read_to_string(dir.path().join("k.pem")).unwrap(), "KEY");
    }

    #[test]
    fn content_without_a_name_is_skipped() {
        let dir = TempDir::new().unwrap();
        let settings = settings_for(&dir);
        let request = PersistRequest {
            certificate: Some("CERT".into()),
            ..Default::default()
        };
        run(request, &settings).unwrap();
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn mutable_context_stages_the_write() {
        let dir = TempDir::new().unwrap();
        let settings = settings_for(&dir);
        let request = PersistRequest {
            mutable: true,
            certificate_request: Some("CSR".into()),
            certificate_request_name: Some("r.pem".into()),
            ..Default::default()
        };
        run(request, &settings).unwrap();
        assert!(dir.path().join("r.pem.new").exists());
        assert!(!dir.path().join("r.pem").exists());
    }
}
