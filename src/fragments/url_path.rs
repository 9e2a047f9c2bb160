//! URL and path settings
//!
//! Exactly one of two renderings is used. With an article path the wiki is
//! assumed to sit behind a reverse proxy on the default port, so the server
//! URL carries no port. Without one, the server URL includes the port.
//!
//! Values are emitted as single-quoted PHP strings so `$1` and `{$...}` stay
//! literal.

use super::php_single_quoted;
use crate::types::DeploymentDescriptor;

/// Script path is always empty; the resource base path follows it.
pub const SCRIPT_PATH: &str = "";

pub fn url_path_block(descriptor: &DeploymentDescriptor) -> String {
    let mut block = String::new();
    block.push_str("## The URL base path to the directory containing the wiki;\n");
    block.push_str("## defaults for all runtime URL paths are based off of this.\n");
    block.push_str("## https://www.mediawiki.org/wiki/Manual:Short_URL\n");
    block.push_str(&format!("$wgScriptPath = '{SCRIPT_PATH}';\n"));

    match descriptor.active_article_path() {
        Some(article_path) => {
            block.push_str("## Article path as configured for this deployment\n");
            block.push_str(&format!(
                "$wgArticlePath = '{}';\n",
                php_single_quoted(article_path)
            ));
            block.push_str(
                "## The protocol and server name to use in fully-qualified URLs (without port)\n",
            );
        }
        None => {
            block.push_str(
                "## The protocol and server name to use in fully-qualified URLs (with port)\n",
            );
        }
    }
    block.push_str(&format!(
        "$wgServer = '{}';\n",
        php_single_quoted(&server_url(descriptor))
    ));

    block.push_str("## The URL path to static resources (images, scripts, etc.)\n");
    block.push_str("$wgResourceBasePath = $wgScriptPath;\n");
    block
}

/// Fully-qualified server URL for the selected branch
pub fn server_url(descriptor: &DeploymentDescriptor) -> String {
    if descriptor.active_article_path().is_some() {
        format!("http://{}", descriptor.hostname)
    } else {
        format!("http://{}:{}", descriptor.hostname, descriptor.port)
    }
}
