#![allow(dead_code)]

use chrono::{DateTime, Utc};
use mwconf::types::BoxError;
use mwconf::AddonModule;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Instant used wherever a test needs a deterministic composition time
pub const FIXED_TIMESTAMP: i64 = 1_700_000_000;

pub fn fixed_time() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TIMESTAMP, 0).expect("valid timestamp")
}

/// Module that renders a fixed fragment and records the version it was given
#[derive(Debug)]
pub struct TestModule {
    pub name: String,
    pub url: String,
    pub fragment: String,
    calls: AtomicUsize,
    last_version: Mutex<Option<String>>,
}

impl TestModule {
    pub fn new(name: &str, fragment: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            url: format!(
                "https://www.mediawiki.org/wiki/Extension:{}",
                name.replace(' ', "_")
            ),
            fragment: fragment.to_string(),
            calls: AtomicUsize::new(0),
            last_version: Mutex::new(None),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_version(&self) -> Option<String> {
        self.last_version.lock().unwrap().clone()
    }
}

impl AddonModule for TestModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn documentation_url(&self) -> &str {
        &self.url
    }

    fn render_config_fragment(&self, target_app_version: &str) -> Result<String, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_version.lock().unwrap() = Some(target_app_version.to_string());
        Ok(self.fragment.clone())
    }
}

/// Module whose rendering always fails
#[derive(Debug)]
pub struct FailingModule(pub &'static str);

impl AddonModule for FailingModule {
    fn name(&self) -> &str {
        self.0
    }

    fn documentation_url(&self) -> &str {
        "https://example.org/failing"
    }

    fn render_config_fragment(&self, _target_app_version: &str) -> Result<String, BoxError> {
        Err("version metadata unavailable".into())
    }
}
