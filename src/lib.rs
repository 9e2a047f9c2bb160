pub mod config;
pub mod engine;
pub mod error;
pub mod extensions;
pub mod fragments;
pub mod types;
pub mod version;

pub use engine::{compose, CompositionEngine};
pub use error::{Error, Result};
pub use types::{AddonModule, DeploymentDescriptor, SecretCookieConfig};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
