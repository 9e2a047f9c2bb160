//! Deployment Configuration
//!
//! The serializable form of an operator's choices for one wiki. A config is
//! resolved against an [`ExtensionCatalog`] to produce the
//! [`DeploymentDescriptor`] the composition engine consumes.
//!
//! Older field names (`smw_version`, `smwVersion`, `extensionNameList`,
//! `extensionJsonFile`, `article_path`, `host`) are still accepted on input
//! but are never written back out.

use crate::error::{Error, Result};
use crate::extensions::ExtensionCatalog;
use crate::types::{DeploymentDescriptor, SecretCookieConfig};
use crate::version;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_MW_VERSION: &str = "1.39.15";
pub const DEFAULT_PORT: u16 = 9080;
pub const DEFAULT_PREFIX: &str = "mw";
pub const DEFAULT_HOSTNAME: &str = "localhost";
pub const DEFAULT_EXTENSIONS: [&str; 5] = [
    "Admin Links",
    "Header Tabs",
    "ParserFunctions",
    "SyntaxHighlight",
    "Variables",
];

/// Directory below the home directory where composed settings are kept
pub const CONFIG_DIR_NAME: &str = ".mwconf";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeploymentConfig {
    pub mw_version: String,
    #[serde(
        alias = "smw_version",
        alias = "smwVersion",
        skip_serializing_if = "Option::is_none"
    )]
    pub semantic_query_version: Option<String>,
    #[serde(alias = "extensionNameList")]
    pub extensions: Vec<String>,
    #[serde(alias = "extensionJsonFile", skip_serializing_if = "Option::is_none")]
    pub extension_catalog: Option<PathBuf>,
    pub prefix: String,
    #[serde(alias = "article_path", skip_serializing_if = "Option::is_none")]
    pub article_path: Option<String>,
    #[serde(alias = "host")]
    pub hostname: String,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_cookie: Option<SecretCookieConfig>,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            mw_version: DEFAULT_MW_VERSION.to_string(),
            semantic_query_version: None,
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            extension_catalog: None,
            prefix: DEFAULT_PREFIX.to_string(),
            article_path: None,
            hostname: DEFAULT_HOSTNAME.to_string(),
            port: DEFAULT_PORT,
            secret_cookie: None,
        }
    }
}

impl DeploymentConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Short MediaWiki version, e.g. `139` for `1.39.15`
    pub fn short_version(&self) -> Result<String> {
        version::short_version(&self.mw_version)
    }

    /// Wiki identifier, e.g. `mw-9080`
    pub fn wiki_id(&self) -> String {
        format!("{}-{}", self.prefix, self.port)
    }

    /// Base name for this wiki's artifacts, e.g. `mw-139`
    pub fn container_base_name(&self) -> Result<String> {
        Ok(format!("{}-{}", self.prefix, self.short_version()?))
    }

    /// `~/.mwconf/<container base name>/LocalSettings.php`
    pub fn default_output_path(&self) -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "cannot determine home directory",
            ))
        })?;
        Ok(home
            .join(CONFIG_DIR_NAME)
            .join(self.container_base_name()?)
            .join("LocalSettings.php"))
    }

    /// Build the composition input, looking extensions up in `catalog`
    pub fn resolve(&self, catalog: &ExtensionCatalog) -> Result<DeploymentDescriptor> {
        version::short_version(&self.mw_version)?;

        let modules = catalog.resolve(&self.extensions);
        debug!(
            "Resolved {} of {} requested extensions",
            modules.len(),
            self.extensions.len()
        );

        let mut descriptor = DeploymentDescriptor::new(&self.mw_version, &self.hostname, self.port)
            .with_modules(modules);
        descriptor.semantic_query_version = self
            .semantic_query_version
            .clone()
            .filter(|v| !v.trim().is_empty());
        descriptor.article_path = self.article_path.clone().filter(|p| !p.is_empty());
        descriptor.secret_cookie = self.secret_cookie.clone().filter(|c| c.is_active());
        Ok(descriptor)
    }
}
