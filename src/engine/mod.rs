//! Composition Engine
//!
//! Turns a [`DeploymentDescriptor`] into the full LocalSettings text. The
//! order of blocks is fixed:
//!
//! 1. base prologue
//! 2. Semantic MediaWiki activation (if a version is requested)
//! 3. one header and fragment per add-on module, in descriptor order
//! 4. modified defaults
//! 5. authentication hardening hook (if a secret cookie is configured)
//! 6. URL and path settings
//!
//! Composition either returns the whole text or an error; partial output is
//! never handed back.

use crate::error::{Error, Result};
use crate::fragments::{self, authentication_hardening_block, url_path_block};
use crate::types::{AddonModule, DeploymentDescriptor};
use crate::version;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// A fragment that would break out of the surrounding PHP file
#[derive(Debug, thiserror::Error)]
#[error("malformed fragment: {0}")]
pub struct MalformedFragment(String);

/// Composes LocalSettings text from deployment descriptors
#[derive(Debug, Clone, Default)]
pub struct CompositionEngine {
    fixed_time: Option<DateTime<Utc>>,
}

impl CompositionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given instant as composition time instead of the system clock
    pub fn with_fixed_time(mut self, time: DateTime<Utc>) -> Self {
        self.fixed_time = Some(time);
        self
    }

    fn composition_time(&self) -> DateTime<Utc> {
        self.fixed_time.unwrap_or_else(Utc::now)
    }

    pub fn compose(&self, descriptor: &DeploymentDescriptor) -> Result<String> {
        descriptor.validate()?;
        let short_version = version::short_version(&descriptor.target_app_version)
            .map_err(|e| Error::InvalidDescriptor(e.to_string()))?;

        let mut text = String::from(fragments::BASE_PROLOGUE);

        if let Some(smw_version) = descriptor.active_semantic_query_version() {
            debug!("Adding Semantic MediaWiki {} block", smw_version);
            text.push_str(&fragments::semantic_query_block(smw_version));
        }

        for module in &descriptor.addon_modules {
            let fragment = Self::render_module(module.as_ref(), &short_version)?;
            debug!("Rendered module {} ({} bytes)", module.name(), fragment.len());
            text.push_str(&fragments::module_header(
                module.name(),
                module.documentation_url(),
            ));
            text.push_str(&fragment);
        }

        text.push_str(fragments::MODIFIED_DEFAULTS);

        if let Some(cookie) = descriptor.active_secret_cookie() {
            debug!("Adding authentication hardening hook");
            text.push_str(&authentication_hardening_block(
                cookie,
                self.composition_time(),
            ));
        }

        text.push_str(&url_path_block(descriptor));

        info!(
            "Composed LocalSettings for MediaWiki {} with {} modules ({} bytes)",
            descriptor.target_app_version,
            descriptor.addon_modules.len(),
            text.len()
        );
        Ok(text)
    }

    /// Render one module, normalised to end in exactly one newline
    fn render_module(module: &dyn AddonModule, short_version: &str) -> Result<String> {
        let fragment = module
            .render_config_fragment(short_version)
            .map_err(|e| Error::module_render(module.name(), e))?;

        if fragment.contains("?>") || fragment.contains('\0') {
            return Err(Error::module_render(
                module.name(),
                MalformedFragment("fragment leaves PHP mode or contains NUL".to_string()),
            ));
        }

        let trimmed = fragment.trim_end_matches(['\n', '\r']);
        if trimmed.is_empty() {
            Ok(String::new())
        } else {
            Ok(format!("{trimmed}\n"))
        }
    }
}

/// Compose with the system clock
pub fn compose(descriptor: &DeploymentDescriptor) -> Result<String> {
    CompositionEngine::new().compose(descriptor)
}
