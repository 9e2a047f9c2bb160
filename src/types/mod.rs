use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Error type returned by add-on modules when rendering fails
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An installable add-on that contributes a LocalSettings fragment
///
/// Rendering must be pure: the same target version always yields the same
/// fragment, and a module must not depend on fragments of other modules.
pub trait AddonModule: Send + Sync + fmt::Debug {
    /// Display name used in the fragment header
    fn name(&self) -> &str;

    /// Documentation URL used in the fragment header
    fn documentation_url(&self) -> &str;

    /// Render this module's settings for the given short application version (e.g. `139`)
    fn render_config_fragment(&self, target_app_version: &str) -> std::result::Result<String, BoxError>;
}

/// Settings for the authentication-hardening cookie hook
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretCookieConfig {
    pub secret_value: String,
    /// Lifetime after composition time; `None` means a session cookie
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl_seconds: Option<u64>,
}

impl SecretCookieConfig {
    pub fn new(secret_value: impl Into<String>) -> Self {
        Self {
            secret_value: secret_value.into(),
            ttl_seconds: None,
        }
    }

    pub fn with_ttl_seconds(mut self, ttl_seconds: u64) -> Self {
        self.ttl_seconds = Some(ttl_seconds);
        self
    }

    /// An empty secret disables the hook
    pub fn is_active(&self) -> bool {
        !self.secret_value.is_empty()
    }
}

impl fmt::Debug for SecretCookieConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretCookieConfig")
            .field("secret_value", &"<redacted>")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

/// Everything the composition engine needs to know about one deployment
#[derive(Debug, Clone)]
pub struct DeploymentDescriptor {
    /// Full MediaWiki version, e.g. `1.39.15`
    pub target_app_version: String,
    pub semantic_query_version: Option<String>,
    /// Rendered in this order; never sorted or deduplicated
    pub addon_modules: Vec<Arc<dyn AddonModule>>,
    pub article_path: Option<String>,
    pub hostname: String,
    pub port: u16,
    pub secret_cookie: Option<SecretCookieConfig>,
}

impl DeploymentDescriptor {
    pub fn new(target_app_version: impl Into<String>, hostname: impl Into<String>, port: u16) -> Self {
        Self {
            target_app_version: target_app_version.into(),
            semantic_query_version: None,
            addon_modules: Vec::new(),
            article_path: None,
            hostname: hostname.into(),
            port,
            secret_cookie: None,
        }
    }

    pub fn with_semantic_query_version(mut self, version: impl Into<String>) -> Self {
        self.semantic_query_version = Some(version.into());
        self
    }

    pub fn with_module(mut self, module: Arc<dyn AddonModule>) -> Self {
        self.addon_modules.push(module);
        self
    }

    pub fn with_modules(mut self, modules: impl IntoIterator<Item = Arc<dyn AddonModule>>) -> Self {
        self.addon_modules.extend(modules);
        self
    }

    pub fn with_article_path(mut self, article_path: impl Into<String>) -> Self {
        self.article_path = Some(article_path.into());
        self
    }

    pub fn with_secret_cookie(mut self, secret_cookie: SecretCookieConfig) -> Self {
        self.secret_cookie = Some(secret_cookie);
        self
    }

    /// The secret cookie settings, if the hook should be emitted
    pub fn active_secret_cookie(&self) -> Option<&SecretCookieConfig> {
        self.secret_cookie.as_ref().filter(|cookie| cookie.is_active())
    }

    /// The requested Semantic MediaWiki version; blank means none
    pub fn active_semantic_query_version(&self) -> Option<&str> {
        self.semantic_query_version
            .as_deref()
            .filter(|version| !version.trim().is_empty())
    }

    /// The article path, if the reverse-proxy branch applies; empty means none
    pub fn active_article_path(&self) -> Option<&str> {
        self.article_path.as_deref().filter(|path| !path.is_empty())
    }

    /// Check the fields required by the URL branch this descriptor selects
    pub fn validate(&self) -> Result<()> {
        if self.active_article_path().is_none() && self.hostname.is_empty() {
            return Err(Error::InvalidDescriptor(
                "hostname is required when no article path is set".to_string(),
            ));
        }

        if self
            .hostname
            .chars()
            .any(|c| c.is_whitespace() || c == '"' || c == '\'' || c == '\\')
        {
            return Err(Error::InvalidDescriptor(format!(
                "hostname contains forbidden characters: {:?}",
                self.hostname
            )));
        }

        if let Some(smw_version) = self.active_semantic_query_version() {
            if smw_version.chars().any(char::is_control) {
                return Err(Error::InvalidDescriptor(format!(
                    "semantic query version contains control characters: {smw_version:?}"
                )));
            }
        }

        if let Some(path) = self.active_article_path() {
            if path.chars().any(char::is_control) {
                return Err(Error::InvalidDescriptor(format!(
                    "article path contains control characters: {path:?}"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_cookie_activation() {
        assert!(SecretCookieConfig::new("abc").is_active());
        assert!(!SecretCookieConfig::new("").is_active());

        let descriptor = DeploymentDescriptor::new("1.39.15", "example.org", 9080)
            .with_secret_cookie(SecretCookieConfig::new(""));
        assert!(descriptor.active_secret_cookie().is_none());
    }

    #[test]
    fn test_secret_cookie_debug_is_redacted() {
        let cookie = SecretCookieConfig::new("hunter2").with_ttl_seconds(60);
        let debug = format!("{cookie:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("60"));
    }

    #[test]
    fn test_secret_cookie_deserialization() {
        let cookie: SecretCookieConfig =
            serde_json::from_str(r#"{"secretValue": "abc", "ttlSeconds": 3600}"#).unwrap();
        assert_eq!(cookie, SecretCookieConfig::new("abc").with_ttl_seconds(3600));

        let cookie: SecretCookieConfig = serde_json::from_str(r#"{"secretValue": "abc"}"#).unwrap();
        assert_eq!(cookie.ttl_seconds, None);
    }

    #[test]
    fn test_validate_requires_hostname_without_article_path() {
        let descriptor = DeploymentDescriptor::new("1.39.15", "", 9080);
        assert!(matches!(
            descriptor.validate(),
            Err(Error::InvalidDescriptor(_))
        ));

        let descriptor = DeploymentDescriptor::new("1.39.15", "", 9080).with_article_path("/wiki/$1");
        assert!(descriptor.validate().is_ok());
    }

    #[test]
    fn test_validate_treats_empty_article_path_as_absent() {
        let descriptor = DeploymentDescriptor::new("1.39.15", "", 9080).with_article_path("");
        assert!(descriptor.active_article_path().is_none());
        assert!(matches!(
            descriptor.validate(),
            Err(Error::InvalidDescriptor(_))
        ));
    }

    #[test]
    fn test_blank_semantic_query_version_is_inactive() {
        for version in ["", "  "] {
            let descriptor = DeploymentDescriptor::new("1.39.15", "example.org", 9080)
                .with_semantic_query_version(version);
            assert_eq!(descriptor.active_semantic_query_version(), None);
        }
        let descriptor = DeploymentDescriptor::new("1.39.15", "example.org", 9080)
            .with_semantic_query_version("4.1.2");
        assert_eq!(descriptor.active_semantic_query_version(), Some("4.1.2"));
    }

    #[test]
    fn test_validate_rejects_forbidden_characters() {
        let descriptor = DeploymentDescriptor::new("1.39.15", "evil\"host", 9080);
        assert!(descriptor.validate().is_err());

        let descriptor = DeploymentDescriptor::new("1.39.15", "example.org", 9080)
            .with_article_path("/wiki/\n$1");
        assert!(descriptor.validate().is_err());
    }
}
