//! Dotted version handling
//!
//! Versions are compared component-wise as dot-separated integers. A component
//! that is not a plain integer is malformed and sorts below every numeric
//! component; malformed components compare lexically among themselves.
//! Missing trailing components count as `0`, so `"4"` equals `"4.0.0"`.

use crate::error::{Error, Result};
use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

static SHORT_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<major>[0-9]+)\.(?P<minor>[0-9]+)").expect("short version pattern is valid")
});

/// One dot-separated part of a version string
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Component<'a> {
    // Variant order matters: malformed parts sort before numeric ones.
    Malformed(&'a str),
    Numeric(u64),
}

impl<'a> Component<'a> {
    fn parse(part: &'a str) -> Self {
        if !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()) {
            match part.parse() {
                Ok(n) => Component::Numeric(n),
                Err(_) => Component::Malformed(part),
            }
        } else {
            Component::Malformed(part)
        }
    }
}

/// Compare two dotted version strings
pub fn compare(a: &str, b: &str) -> Ordering {
    let left: Vec<Component> = a.trim().split('.').map(Component::parse).collect();
    let right: Vec<Component> = b.trim().split('.').map(Component::parse).collect();
    let len = left.len().max(right.len());

    for i in 0..len {
        let l = left.get(i).cloned().unwrap_or(Component::Numeric(0));
        let r = right.get(i).cloned().unwrap_or(Component::Numeric(0));
        match l.cmp(&r) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// True if `version` is greater than or equal to `threshold`
pub fn at_least(version: &str, threshold: &str) -> bool {
    compare(version, threshold) != Ordering::Less
}

/// Short form of a MediaWiki version, e.g. `1.39.15` becomes `139`
pub fn short_version(version: &str) -> Result<String> {
    let caps = SHORT_VERSION.captures(version.trim()).ok_or_else(|| {
        Error::InvalidVersion(format!("'{version}' is not of the form major.minor[.patch]"))
    })?;
    Ok(format!("{}{}", &caps["major"], &caps["minor"]))
}
