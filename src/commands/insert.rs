//! Insert command handlers.

use crate::commands::Out;
use crate::model::Debt;
use crate::{Config, Result};

/// Adds a debt titled `title` with a zero balance and a zero interest rate.
///
/// A blank title adds nothing; the returned `Out` then has no structure.
pub fn add(config: &Config, title: &str) -> Result<Out<Debt>> {
    let mut store = config.store()?;
    Ok(match store.add_debt(title)? {
        Some(debt) => Out::new(format!("Added debt '{}' ({})", debt.title(), debt.id()), debt),
        None => Out::new_message("Nothing was added because the title is empty"),
    })
}
