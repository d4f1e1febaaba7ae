//! Delete command handlers.

use crate::args::DeleteArgs;
use crate::commands::Out;
use crate::model::{Debt, DebtId};
use crate::{Config, Result};
use anyhow::Context;
use std::str::FromStr;

/// Deletes the debt with the given id. An unknown id deletes nothing and is not an error.
pub fn delete(config: &Config, args: &DeleteArgs) -> Result<Out<Debt>> {
    let id = DebtId::from_str(args.id())
        .with_context(|| format!("'{}' is not a valid debt id", args.id()))?;
    let mut store = config.store()?;
    Ok(match store.delete_debt(id)? {
        Some(debt) => Out::new(format!("Deleted debt '{}'", debt.title()), debt),
        None => Out::new_message(format!("No debt with id {id}, nothing was deleted")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[test]
    fn test_delete() {
        let env = TestEnv::new();
        let id = env.add_debt("Card", "1500", "22").to_string();
        let out = delete(&env.config(), &DeleteArgs::new(&id)).unwrap();
        assert!(out.message().contains("Deleted debt 'Card'"));
        let store = env.config().store().unwrap();
        assert!(store.debts().is_empty());
        assert!(store.total_debts().is_zero());
    }

    #[test]
    fn test_delete_unknown_id() {
        let env = TestEnv::new();
        env.add_debt("Card", "1500", "22");
        let stranger = Debt::new("stranger").id().to_string();
        let out = delete(&env.config(), &DeleteArgs::new(stranger)).unwrap();
        assert!(out.structure().is_none());
        assert!(out.message().contains("nothing was deleted"));
        assert_eq!(env.config().store().unwrap().debts().len(), 1);
    }

    #[test]
    fn test_delete_malformed_id() {
        let env = TestEnv::new();
        let err = delete(&env.config(), &DeleteArgs::new("12")).unwrap_err();
        assert!(err.to_string().contains("not a valid debt id"));
    }
}
