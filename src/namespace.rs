use std::path::{Path, PathBuf};

/// Suffix appended to object names resolved in the staging context.
pub const DEFAULT_STAGING_SUFFIX: &str = ".new";

/// Maps logical object names to physical store paths
///
/// A namespace is built once per invocation from the request's `Location`
/// and `Mutable` attributes (plus settings defaults). Resolution is a pure
/// function of its inputs: the same (location, name) always yields the same
/// path, and the mutable (staging) path is always distinct from the live
/// path. The staging context is what keeps in-progress enrollments from
/// touching the live store.
#[derive(Debug, Clone)]
pub struct Namespace {
    location: PathBuf,
    mutable: bool,
    staging_suffix: String,
}

impl Namespace {
    pub fn new(
        location: impl Into<PathBuf>,
        mutable: bool,
        staging_suffix: impl Into<String>,
    ) -> Self {
        Self {
            location: location.into(),
            mutable,
            staging_suffix: staging_suffix.into(),
        }
    }

    /// Resolve `name` under the invocation's own mutable context.
    pub fn resolve(&self, name: &str) -> PathBuf {
        self.resolve_as(name, self.mutable)
    }

    /// Resolve `name` under an explicit mutable context.
    ///
    /// ImportCertificate uses this to obtain both sides of a promotion:
    /// the staged source and the live destination of the same name.
    pub fn resolve_as(&self, name: &str, mutable: bool) -> PathBuf {
        debug_assert!(!name.is_empty(), "resolver called with an empty name");
        if mutable {
            self.location
                .join(format!("{}{}", name, self.staging_suffix))
        } else {
            self.location.join(name)
        }
    }

    pub fn mutable(&self) -> bool {
        self.mutable
    }

    pub fn location(&self) -> &Path {
        &self.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staged_and_live_paths_are_distinct() {
        let ns = Namespace::new("/store", false, DEFAULT_STAGING_SUFFIX);
        assert_ne!(
            ns.resolve_as("key.pem", true),
            ns.resolve_as("key.pem", false)
        );
    }

    #[test]
    fn resolution_is_deterministic() {
        let ns = Namespace::new("/store", true, DEFAULT_STAGING_SUFFIX);
        assert_eq!(ns.resolve("cert.pem"), ns.resolve("cert.pem"));
        assert_eq!(ns.resolve("cert.pem"), PathBuf::from("/store/cert.pem.new"));
    }

    #[test]
    fn mutable_context_scopes_plain_resolution() {
        let live = Namespace::new("/store", false, DEFAULT_STAGING_SUFFIX);
        let staged = Namespace::new("/store", true, DEFAULT_STAGING_SUFFIX);
        assert_eq!(live.resolve("chain.pem"), PathBuf::from("/store/chain.pem"));
        assert_eq!(
            staged.resolve("chain.pem"),
            PathBuf::from("/store/chain.pem.new")
        );
    }

    #[test]
    fn custom_suffix_is_honored() {
        let ns = Namespace::new("/store", true, ".staged");
        assert_eq!(ns.resolve("k"), PathBuf::from("/store/k.staged"));
    }
}
