mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Args;
use mwconf::config::DeploymentConfig;
use mwconf::extensions::ExtensionCatalog;
use mwconf::CompositionEngine;
use std::path::Path;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(&args)?;

    tracing::info!("Starting {} v{}", mwconf::PKG_NAME, mwconf::VERSION);

    let mut config = match args.config {
        Some(ref path) => {
            let json = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            DeploymentConfig::from_json(&json)
                .with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => DeploymentConfig::default(),
    };
    args.apply_to(&mut config);

    let mut catalog =
        ExtensionCatalog::builtin().context("Failed to load built-in extension catalog")?;
    if let Some(ref path) = config.extension_catalog {
        catalog.merge_overrides(load_catalog(path).await?);
    }

    if args.list_extensions {
        for name in catalog.names() {
            if let Some(extension) = catalog.get(name) {
                println!("{}\t{}", name, extension.url);
            }
        }
        return Ok(());
    }

    tracing::info!(
        "Composing settings for wiki {} (MediaWiki {})",
        config.wiki_id(),
        config.mw_version
    );
    let descriptor = config.resolve(&catalog)?;
    let settings = CompositionEngine::new()
        .compose(&descriptor)
        .context("Failed to compose LocalSettings")?;

    let target = match args.output {
        Some(ref path) => Some(path.clone()),
        None if args.save => Some(config.default_output_path()?),
        None => None,
    };

    match target {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&path, settings)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => print!("{settings}"),
    }

    Ok(())
}

async fn load_catalog(path: &Path) -> Result<ExtensionCatalog> {
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read extension catalog {}", path.display()))?;
    ExtensionCatalog::from_json(&json)
        .with_context(|| format!("Invalid extension catalog {}", path.display()))
}

fn init_logging(args: &Args) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    // stdout carries the composed settings, so logs go to stderr
    let fmt_layer = if args.json_logs {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
