use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("Module '{module}' failed to render: {source}")]
    ModuleRender {
        module: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("Extension catalog error: {0}")]
    Catalog(String),
}

impl Error {
    /// Tag a fragment rendering failure with the module that produced it
    pub fn module_render(
        module: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::ModuleRender {
            module: module.into(),
            source: source.into(),
        }
    }

    /// Name of the offending module for render failures
    pub fn module_name(&self) -> Option<&str> {
        match self {
            Error::ModuleRender { module, .. } => Some(module),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
