use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the data directory and an initial `config.json` file with default settings.
///
/// # Errors
/// - Returns an error if any file operations fail or the directory is already initialized.
pub fn init(payoff_home: &Path) -> Result<Out<()>> {
    let config = Config::create(payoff_home)
        .context("Unable to create the data directory and config")?;
    Ok(format!(
        "Successfully created the payoff directory at {}",
        config.root().display()
    )
    .into())
}
