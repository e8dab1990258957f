//! certstore - keystore backend for certificate lifecycle managers
//!
//! An orchestrator delegates all access to a local certificate/key store to
//! this backend through a small command protocol: one invocation carries one
//! command name plus a JSON request body and yields one JSON response. The
//! durable state lives entirely in the filesystem; the process holds nothing
//! between invocations, so a retried command simply re-reads the on-disk
//! truth.
//!
//! Modules:
//! - `namespace` - logical name to physical path resolution, with the
//!   staging (mutable) context that isolates in-progress enrollments
//! - `commands` - one handler per protocol operation plus the dispatcher
//! - `provider` - the crypto provider seam (key generation, PKCS#10, CMS)
//! - `request` - loosely-typed attribute normalization
//! - `settings` - backend configuration (store root, staging suffix,
//!   trust anchors)

pub mod commands;
pub mod error;
pub mod kind;
pub mod namespace;
pub mod provider;
pub mod request;
pub mod settings;

pub use error::{Error, Result};
pub use kind::ObjectKind;
pub use namespace::Namespace;
pub use provider::{CryptoProvider, KeySpec, OpensslProvider};
pub use settings::Settings;
