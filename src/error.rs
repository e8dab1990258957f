use std::path::PathBuf;

use thiserror::Error;

use crate::kind::ObjectKind;

/// Error surface of the backend protocol
///
/// Every variant is terminal for the current invocation: the dispatcher
/// serializes the display text into the `Error` attribute of the response
/// and the process exits non-zero. Retry policy lives in the orchestrator.
#[derive(Error, Debug)]
pub enum Error {
    /// A required request attribute is missing or empty
    #[error("{command} requires {attribute}")]
    MissingParameter {
        command: &'static str,
        attribute: &'static str,
    },

    /// The command name is not part of the protocol
    #[error("Unsupported API command '{0}'")]
    UnknownCommand(String),

    /// Key type other than the supported ones was requested
    #[error("Unsupported key type '{0}'")]
    UnsupportedKeyType(String),

    /// Parent directory for a generated key could not be created
    #[error("Failed to create directory {path}: {source}")]
    DirectoryCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Key generation failed in the crypto provider
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    /// PKCS#10 request construction failed
    #[error("Certificate request generation failed: {0}")]
    RequestGeneration(String),

    /// CMS envelope construction failed
    #[error("CMS signing failed: {0}")]
    Signing(String),

    /// A store object flagged as existing could not be read
    #[error("Failed to read {kind} from {path}: {source}")]
    Read {
        kind: ObjectKind,
        path: PathBuf,
        source: std::io::Error,
    },

    /// A store object could not be written
    #[error("Failed to write {kind} to {path}: {source}")]
    Write {
        kind: ObjectKind,
        path: PathBuf,
        source: std::io::Error,
    },

    /// A staged object could not be promoted into the live store
    #[error("Failed to import {kind}: {source}")]
    Move {
        kind: ObjectKind,
        source: std::io::Error,
    },

    /// Malformed request body or unserializable response
    #[error("Invalid request: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings file problems
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error outside of a specific store object (e.g. the input channel)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
