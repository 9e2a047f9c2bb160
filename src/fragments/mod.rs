//! LocalSettings Fragments
//!
//! Each function here renders one self-contained block of LocalSettings text.
//! The composition engine decides which blocks are active and in what order;
//! the blocks themselves know nothing about each other.

pub mod secret_cookie;
pub mod url_path;

pub use secret_cookie::authentication_hardening_block;
pub use url_path::url_path_block;

use crate::version;

/// Settings the target application always needs
pub static BASE_PROLOGUE: &str = "# general LocalSettings\n$wgEnableAPI = true;\n";

/// Our opinionated overrides of MediaWiki defaults
pub static MODIFIED_DEFAULTS: &str = r#"# modified defaults
# https://www.mediawiki.org/wiki/Manual:$wgEnableUploads
$wgEnableUploads = true;
# https://www.mediawiki.org/wiki/Manual:$wgDeprecationReleaseLimit
$wgDeprecationReleaseLimit = "1.35.0";
# settings for warnings
# https://www.mediawiki.org/wiki/Manual:$wgDevelopmentWarnings
$wgDevelopmentWarnings = false;
"#;

/// Semantic MediaWiki releases from this version on must be loaded explicitly
pub const SEMANTIC_MODULE_LOAD_THRESHOLD: &str = "4";

pub const SEMANTIC_QUERY_MAX_LIMIT: u32 = 10000;
pub const SEMANTIC_QUERY_MAX_INLINE_LIMIT: u32 = 2000;

/// Activation block for Semantic MediaWiki
pub fn semantic_query_block(semantic_query_version: &str) -> String {
    let mut block = String::new();
    block.push_str("# enable Support for Semantic MediaWiki\n");
    block.push_str("# see https://www.semantic-mediawiki.org/wiki/Help:EnableSemantics\n");
    block.push_str(&format!(
        "# Version of SemanticMediaWiki at install time: {}\n",
        comment_text(semantic_query_version)
    ));
    if version::at_least(semantic_query_version, SEMANTIC_MODULE_LOAD_THRESHOLD) {
        block.push_str("wfLoadExtension( 'SemanticMediaWiki' );\n");
    }
    block.push_str("enableSemantics();\n");
    block.push_str("# https://www.semantic-mediawiki.org/wiki/Help:$smwgQMaxInlineLimit\n");
    block.push_str(&format!("$smwgQMaxLimit={SEMANTIC_QUERY_MAX_LIMIT};\n"));
    block.push_str(&format!(
        "$smwgQMaxInlineLimit={SEMANTIC_QUERY_MAX_INLINE_LIMIT};\n"
    ));
    block
}

/// Header comment naming a module and where it is documented
pub fn module_header(name: &str, documentation_url: &str) -> String {
    format!(
        "# {}\n# {}\n",
        comment_text(name),
        comment_text(documentation_url)
    )
}

/// Flatten text so it stays inside a single `#` comment line
pub fn comment_text(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Escape text for use inside a PHP single-quoted string literal
pub fn php_single_quoted(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}
