//! Command-line interface for mwconf
//!
//! This is the only place that reads the process environment. Values given
//! here override whatever the configuration file says.

use clap::Parser;
use mwconf::config::DeploymentConfig;
use mwconf::SecretCookieConfig;
use std::path::PathBuf;

/// CLI arguments for mwconf
#[derive(Parser, Debug)]
#[command(name = "mwconf")]
#[command(version = mwconf::VERSION)]
#[command(about = "Compose MediaWiki LocalSettings from a deployment description", long_about = None)]
pub struct Args {
    #[arg(short = 'c', long, help = "Deployment configuration JSON file")]
    pub config: Option<PathBuf>,

    #[arg(long = "mw-version", help = "MediaWiki version, e.g. 1.39.15")]
    pub mw_version: Option<String>,

    #[arg(
        long = "smw-version",
        help = "Semantic MediaWiki version; omit to leave SMW disabled"
    )]
    pub smw_version: Option<String>,

    #[arg(
        short = 'e',
        long = "extension",
        help = "Extension to enable (repeatable); replaces the configured list"
    )]
    pub extensions: Vec<String>,

    #[arg(long = "extension-json", help = "Additional extension catalog JSON file")]
    pub extension_json: Option<PathBuf>,

    #[arg(long, help = "Article path, e.g. /wiki/$1 (drops the port from $wgServer)")]
    pub article_path: Option<String>,

    #[arg(long, help = "Host name used in $wgServer")]
    pub host: Option<String>,

    #[arg(long, help = "Port used in $wgServer when no article path is set")]
    pub port: Option<u16>,

    #[arg(
        long,
        env = "MW_SECRET_COOKIE",
        hide_env_values = true,
        help = "Secret value enabling the login cookie hook"
    )]
    pub secret_cookie: Option<String>,

    #[arg(
        long,
        env = "MW_SECRET_COOKIE_TTL",
        help = "Login cookie lifetime in seconds; session cookie if unset"
    )]
    pub secret_cookie_ttl: Option<u64>,

    #[arg(short = 'o', long, help = "Write LocalSettings to this file instead of stdout")]
    pub output: Option<PathBuf>,

    #[arg(
        long,
        conflicts_with = "output",
        help = "Write LocalSettings to ~/.mwconf/<prefix>-<short version>/LocalSettings.php"
    )]
    pub save: bool,

    #[arg(long, help = "List the known extensions and exit")]
    pub list_extensions: bool,

    #[arg(long, help = "Enable JSON output for logs")]
    pub json_logs: bool,

    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

impl Args {
    /// Overlay command-line and environment values onto a loaded config
    pub fn apply_to(&self, config: &mut DeploymentConfig) {
        if let Some(ref mw_version) = self.mw_version {
            config.mw_version = mw_version.clone();
        }
        if let Some(ref smw_version) = self.smw_version {
            config.semantic_query_version = Some(smw_version.clone());
        }
        if !self.extensions.is_empty() {
            config.extensions = self.extensions.clone();
        }
        if let Some(ref path) = self.extension_json {
            config.extension_catalog = Some(path.clone());
        }
        if let Some(ref article_path) = self.article_path {
            config.article_path = Some(article_path.clone());
        }
        if let Some(ref host) = self.host {
            config.hostname = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }

        match self.secret_cookie.as_deref() {
            Some(secret) if !secret.is_empty() => {
                config.secret_cookie = Some(SecretCookieConfig {
                    secret_value: secret.to_string(),
                    ttl_seconds: self.secret_cookie_ttl,
                });
            }
            _ => {
                if let (Some(ttl), Some(cookie)) =
                    (self.secret_cookie_ttl, config.secret_cookie.as_mut())
                {
                    cookie.ttl_seconds = Some(ttl);
                }
            }
        }
    }
}
