//! MediaWiki Extension Catalog
//!
//! Extensions are the add-on modules used in real deployments. A built-in
//! catalog is embedded into the binary at compile time; operators can layer
//! their own catalog file on top of it, overriding entries by name.

use crate::error::{Error, Result};
use crate::types::{AddonModule, BoxError};
use crate::version;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Built-in extension catalog content
pub static BUILTIN_CATALOG: &str = include_str!("../../assets/extensions.json");

/// A MediaWiki extension and the LocalSettings it needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    /// Display name, e.g. "Admin Links"
    pub name: String,
    /// Documentation page
    pub url: String,
    /// Name passed to `wfLoadExtension`, e.g. "AdminLinks"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub giturl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composer: Option<String>,
    /// Extra settings appended after the load line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_settings: Option<String>,
    /// Last short MediaWiki version that needs the legacy `require_once` loader
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_once_until: Option<String>,
}

impl Extension {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            extension: None,
            purpose: None,
            giturl: None,
            composer: None,
            local_settings: None,
            require_once_until: None,
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    pub fn with_local_settings(mut self, local_settings: impl Into<String>) -> Self {
        self.local_settings = Some(local_settings.into());
        self
    }

    pub fn with_require_once_until(mut self, short_version: impl Into<String>) -> Self {
        self.require_once_until = Some(short_version.into());
        self
    }

    /// LocalSettings lines for the given short MediaWiki version (e.g. `139`)
    pub fn local_settings_line(&self, short_version: &str) -> String {
        let mut line = String::new();
        if let Some(ref extension) = self.extension {
            let legacy = self
                .require_once_until
                .as_deref()
                .is_some_and(|until| version::at_least(until, short_version));
            if legacy {
                line = format!("require_once \"$IP/extensions/{extension}/{extension}.php\";");
            } else {
                line = format!("wfLoadExtension( '{extension}' );");
            }
        }

        if let Some(ref settings) = self.local_settings {
            if line.is_empty() {
                line = settings.clone();
            } else {
                line.push_str("\n  ");
                line.push_str(settings);
            }
        }
        line
    }
}

impl AddonModule for Extension {
    fn name(&self) -> &str {
        &self.name
    }

    fn documentation_url(&self) -> &str {
        &self.url
    }

    fn render_config_fragment(&self, target_app_version: &str) -> std::result::Result<String, BoxError> {
        if let Some(ref extension) = self.extension {
            if extension.is_empty()
                || !extension
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
            {
                return Err(format!("invalid extension load name: {extension:?}").into());
            }
        }
        Ok(self.local_settings_line(target_app_version))
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ExtensionList {
    #[serde(default)]
    extensions: Vec<Extension>,
}

/// Extensions indexed by display name
#[derive(Debug, Clone, Default)]
pub struct ExtensionCatalog {
    by_name: BTreeMap<String, Arc<Extension>>,
}

impl ExtensionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog shipped with the binary
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parse a catalog; on duplicate names the first definition wins
    pub fn from_json(json: &str) -> Result<Self> {
        let list: ExtensionList = serde_json::from_str(json)?;
        let mut catalog = Self::new();

        for extension in list.extensions {
            if extension.name.is_empty() {
                return Err(Error::Catalog("extension without a name".to_string()));
            }
            if catalog.by_name.contains_key(&extension.name) {
                warn!("Duplicate extension definition ignored: {}", extension.name);
                continue;
            }
            catalog
                .by_name
                .insert(extension.name.clone(), Arc::new(extension));
        }

        debug!("Loaded extension catalog with {} entries", catalog.len());
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json).map_err(|e| match e {
            Error::Json(err) => Error::Catalog(format!("{}: {err}", path.display())),
            other => other,
        })
    }

    /// Layer another catalog on top of this one; its entries replace ours by name
    pub fn merge_overrides(&mut self, overrides: ExtensionCatalog) {
        for (name, extension) in overrides.by_name {
            if self.by_name.contains_key(&name) {
                warn!("Overriding {} extension definition", name);
            }
            self.by_name.insert(name, extension);
        }
    }

    pub fn add(&mut self, extension: Extension) {
        self.by_name
            .insert(extension.name.clone(), Arc::new(extension));
    }

    pub fn get(&self, name: &str) -> Option<Arc<Extension>> {
        self.by_name.get(name).cloned()
    }

    /// Known extension names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.by_name.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Look up extensions in the requested order, skipping unknown names
    pub fn resolve<I, S>(&self, names: I) -> Vec<Arc<dyn AddonModule>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut modules: Vec<Arc<dyn AddonModule>> = Vec::new();
        for name in names {
            let name = name.as_ref();
            match self.get(name) {
                Some(extension) => modules.push(extension),
                None => warn!("Extension {} not known", name),
            }
        }
        modules
    }
}
