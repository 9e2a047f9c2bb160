//! Authentication hardening hook
//!
//! Renders PHP hook code that sets a fixed-name cookie when a user logs in
//! and overwrites it with an expired one on logout. Nothing here touches
//! cookies itself; the wiki runs the emitted hooks later.

use super::php_single_quoted;
use crate::types::SecretCookieConfig;
use chrono::{DateTime, Utc};

/// Name of the cookie set on login
pub const SECRET_COOKIE_NAME: &str = "mw_secret_cookie";

/// PHP reads an expiry of 0 as "until the browser session ends"
pub const SESSION_EXPIRY: i64 = 0;

/// A timestamp in the past, used to clear the cookie on logout
pub const EXPIRED_TIMESTAMP: i64 = 1;

/// Absolute expiry for the cookie, given the time of composition
pub fn cookie_expiry(cookie: &SecretCookieConfig, composed_at: DateTime<Utc>) -> i64 {
    match cookie.ttl_seconds {
        Some(ttl) => composed_at
            .timestamp()
            .saturating_add(i64::try_from(ttl).unwrap_or(i64::MAX)),
        None => SESSION_EXPIRY,
    }
}

pub fn authentication_hardening_block(
    cookie: &SecretCookieConfig,
    composed_at: DateTime<Utc>,
) -> String {
    let expiry = cookie_expiry(cookie, composed_at);
    let mut block = String::new();

    block.push_str("# authentication hardening\n");
    block.push_str(&format!(
        "# sets the {SECRET_COOKIE_NAME} cookie on login and clears it on logout\n"
    ));
    if cookie.ttl_seconds.is_some() {
        let at = DateTime::<Utc>::from_timestamp(expiry, 0)
            .map(|at| at.to_rfc3339())
            .unwrap_or_else(|| expiry.to_string());
        block.push_str(&format!("# cookie expires at {at}\n"));
    } else {
        block.push_str("# session cookie: expires when the browser session ends\n");
    }

    block.push_str(&set_cookie_hook(
        "UserLoginComplete",
        &php_single_quoted(&cookie.secret_value),
        expiry,
    ));
    block.push_str(&set_cookie_hook("UserLogoutComplete", "", EXPIRED_TIMESTAMP));
    block
}

fn set_cookie_hook(hook: &str, value: &str, expires: i64) -> String {
    format!(
        "$wgHooks['{hook}'][] = static function ( $user, &$injectHtml ) {{\n\
         \tsetcookie( '{SECRET_COOKIE_NAME}', '{value}', [\n\
         \t\t'expires' => {expires},\n\
         \t\t'path' => '/',\n\
         \t\t'secure' => true,\n\
         \t\t'httponly' => true,\n\
         \t] );\n\
         \treturn true;\n\
         }};\n"
    )
}
