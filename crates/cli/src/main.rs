use std::io::Write;

use clap::Parser;
use dialoguer::Confirm;

use slumber_cli::{Cli, Config, Shop};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli)?;
    slumber_observability::tracing::init(&config.log);

    let mut shop = Shop::open(&config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    shop.run(&cli.command, &mut out, &mut confirm)?;
    out.flush()?;

    Ok(())
}

/// Interactive yes/no; anything but an explicit yes declines.
fn confirm(prompt: &str) -> bool {
    match Confirm::new().with_prompt(prompt).default(false).interact() {
        Ok(answer) => answer,
        Err(err) => {
            tracing::warn!(error = %err, "confirmation prompt failed; treating as no");
            false
        }
    }
}
