use std::path::PathBuf;

use clap::{Parser, Subcommand};

use slumber_catalog::CategoryFilter;
use slumber_core::{Locale, ProductId};
use slumber_observability::LogFormat;

/// Pillows and mattresses, from the terminal.
#[derive(Debug, Parser)]
#[command(name = "slumber", version)]
pub struct Cli {
    /// Directory holding the saved cart.
    #[arg(long, env = "SLUMBER_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// JSON catalog to use instead of the bundled one.
    #[arg(long, env = "SLUMBER_CATALOG", global = true)]
    pub catalog: Option<PathBuf>,

    /// Price display locale (ru or en).
    #[arg(long, env = "SLUMBER_LOCALE", global = true)]
    pub locale: Option<Locale>,

    /// Log format on stderr (text or json).
    #[arg(long, env = "SLUMBER_LOG_FORMAT", global = true)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List catalog products.
    Products {
        /// all, pillows or mattresses.
        #[arg(long, short, default_value = "all")]
        category: CategoryFilter,
    },
    /// Show one product in detail.
    Show { id: ProductId },
    /// Add one unit of a product to the cart.
    Add { id: ProductId },
    /// Remove a product's line from the cart.
    Remove { id: ProductId },
    /// Show the cart.
    Cart,
    /// Empty the cart.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
    /// Place the order and empty the cart.
    Checkout {
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use slumber_catalog::Category;

    #[test]
    fn parses_subcommands_and_typed_arguments() {
        let cli = Cli::try_parse_from(["slumber", "add", "3"]).unwrap();
        assert_eq!(cli.command, Command::Add { id: ProductId::new(3) });

        let cli = Cli::try_parse_from(["slumber", "products", "--category", "pillows"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Products {
                category: CategoryFilter::Only(Category::Pillows)
            }
        );

        let cli = Cli::try_parse_from(["slumber", "clear", "--yes", "--locale", "en"]).unwrap();
        assert_eq!(cli.command, Command::Clear { yes: true });
        assert_eq!(cli.locale, Some(Locale::En));
    }

    #[test]
    fn rejects_non_numeric_product_ids() {
        assert!(Cli::try_parse_from(["slumber", "show", "pillow"]).is_err());
    }

    #[test]
    fn products_defaults_to_all_categories() {
        let cli = Cli::try_parse_from(["slumber", "products"]).unwrap();
        assert_eq!(cli.command, Command::Products { category: CategoryFilter::All });
    }
}
