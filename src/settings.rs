use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::namespace::DEFAULT_STAGING_SUFFIX;

/// Environment variable naming the settings file when `--config` is absent.
pub const CONFIG_ENV: &str = "CERTSTORE_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub store: StoreCfg,
    pub truststore: TruststoreCfg,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreCfg {
    /// Store root used when the request carries no `Location`.
    pub location: PathBuf,
    /// Suffix appended to object names resolved in the staging context.
    pub staging_suffix: String,
}

impl Default for StoreCfg {
    fn default() -> Self {
        Self {
            location: PathBuf::from("/var/lib/certstore"),
            staging_suffix: DEFAULT_STAGING_SUFFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TruststoreCfg {
    /// PEM bundle files concatenated into the GetTruststore response.
    pub anchors: Vec<PathBuf>,
}

impl Settings {
    /// Load settings from `path`, falling back to `$CERTSTORE_CONFIG`,
    /// falling back to built-in defaults when neither names a file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        match path {
            Some(path) => {
                let raw = fs::read_to_string(&path)
                    .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
                toml::from_str(&raw)
                    .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_a_file() {
        let settings = Settings::default();
        assert_eq!(settings.store.location, PathBuf::from("/var/lib/certstore"));
        assert_eq!(settings.store.staging_suffix, ".new");
        assert!(settings.truststore.anchors.is_empty());
    }

    #[test]
    fn partial_toml_keeps_field_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [store]
            location = "/srv/keystore"

            [truststore]
            anchors = ["/etc/certstore/roots.pem"]
            "#,
        )
        .unwrap();
        assert_eq!(settings.store.location, PathBuf::from("/srv/keystore"));
        assert_eq!(settings.store.staging_suffix, ".new");
        assert_eq!(settings.truststore.anchors.len(), 1);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = Settings::load(Some(Path::new("/nonexistent/certstore.toml"))).unwrap_err();
        assert!(err.to_string().starts_with("Invalid configuration"));
    }
}
