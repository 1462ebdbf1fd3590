//! Runtime configuration: CLI flags, falling back to `SLUMBER_*` environment
//! variables (clap reads both), falling back to defaults.

use std::path::{Path, PathBuf};

use anyhow::Context;

use slumber_catalog::StaticCatalog;
use slumber_core::Locale;
use slumber_observability::LogConfig;

use crate::cli::Cli;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub catalog_path: Option<PathBuf>,
    pub locale: Locale,
    pub log: LogConfig,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let data_dir = match &cli.data_dir {
            Some(dir) => dir.clone(),
            None => default_data_dir()?,
        };

        Ok(Self {
            data_dir,
            catalog_path: cli.catalog.clone(),
            locale: cli.locale.unwrap_or_default(),
            log: LogConfig::new(cli.log_format.unwrap_or_default(), "warn"),
        })
    }

    /// The configured catalog file, or the bundled catalog.
    pub fn load_catalog(&self) -> anyhow::Result<StaticCatalog> {
        match &self.catalog_path {
            Some(path) => load_catalog_file(path),
            None => Ok(StaticCatalog::bundled()),
        }
    }
}

fn load_catalog_file(path: &Path) -> anyhow::Result<StaticCatalog> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file at {path:?}"))?;
    StaticCatalog::from_json(&json).with_context(|| format!("invalid catalog file at {path:?}"))
}

/// `{app_data_dir}/slumber`.
fn default_data_dir() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

    Ok(base.join("slumber"))
}
