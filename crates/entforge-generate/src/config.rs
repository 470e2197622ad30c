use std::path::{Path, PathBuf};

///
/// GenerateConfig
///
/// Output roots and naming for one generation run. Persistence objects are
/// always emitted; controllers and client artifacts only when their output
/// root is configured.
///

#[derive(Clone, Debug)]
pub struct GenerateConfig {
    /// Directory scanned for `*.entity.toml` documents.
    pub entities_dir: PathBuf,

    /// Output root for generated persistence objects.
    pub server_out: PathBuf,

    /// Output root for generated API controllers.
    pub controllers_out: Option<PathBuf>,

    /// Output root for generated client artifacts (`src/generated` of the
    /// web project).
    pub web_out: Option<PathBuf>,

    /// Namespace the server-side artifacts are emitted into.
    pub namespace: String,
}

pub const DEFAULT_NAMESPACE: &str = "App.Server.Model";

impl GenerateConfig {
    #[must_use]
    pub fn new(entities_dir: impl Into<PathBuf>, server_out: impl Into<PathBuf>) -> Self {
        Self {
            entities_dir: entities_dir.into(),
            server_out: server_out.into(),
            controllers_out: None,
            web_out: None,
            namespace: DEFAULT_NAMESPACE.to_owned(),
        }
    }

    #[must_use]
    pub fn with_controllers(mut self, dir: impl Into<PathBuf>) -> Self {
        self.controllers_out = Some(dir.into());
        self
    }

    #[must_use]
    pub fn with_web(mut self, dir: impl Into<PathBuf>) -> Self {
        self.web_out = Some(dir.into());
        self
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    #[must_use]
    pub fn controllers_out(&self) -> Option<&Path> {
        self.controllers_out.as_deref()
    }

    #[must_use]
    pub fn web_out(&self) -> Option<&Path> {
        self.web_out.as_deref()
    }
}
