//! `slumber-cli`: command-line storefront.
//!
//! The presentation layer: lists the catalog, shows product details and the
//! cart panel, and maps each subcommand onto one cart engine operation.

pub mod app;
pub mod cli;
pub mod config;
pub mod render;

pub use app::Shop;
pub use cli::{Cli, Command};
pub use config::Config;
