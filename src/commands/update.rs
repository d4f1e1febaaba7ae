//! Update command handlers.

use crate::args::{IncomeArgs, MethodArgs, UpdateArgs};
use crate::commands::Out;
use crate::model::{Amount, Debt, DebtId, DebtUpdate, PayoffMethod};
use crate::payoff::{self, PayoffError};
use crate::{Config, Result};
use anyhow::Context;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Replaces the balance, interest rate and months until payoff of a debt.
///
/// # Errors
/// - Returns an error if the id is malformed.
/// - Returns a `PayoffError` if the balance, rate or months are not numbers, or are negative.
///
/// An id that is well-formed but unknown updates nothing and is not an error.
pub fn update(config: &Config, args: &UpdateArgs) -> Result<Out<Debt>> {
    let id = DebtId::from_str(args.id())
        .with_context(|| format!("'{}' is not a valid debt id", args.id()))?;
    let update = DebtUpdate::parse(args.balance(), args.rate(), args.months())?;
    let mut store = config.store()?;
    Ok(match store.update_debt(id, update)? {
        Some(debt) => Out::new(
            format!(
                "Updated debt '{}': balance {}, interest rate {}%",
                debt.title(),
                debt.balance(),
                debt.interest_rate()
            ),
            debt,
        ),
        None => Out::new_message(format!("No debt with id {id}, nothing was updated")),
    })
}

/// Chooses the payoff method used to order the debts.
pub fn method(config: &Config, args: &MethodArgs) -> Result<Out<PayoffMethod>> {
    let mut store = config.store()?;
    store.set_payoff_method(args.method())?;
    Ok(Out::new(
        format!("Payoff method set to {}", args.method()),
        args.method(),
    ))
}

/// Saves the disposable income to the config, then recomputes and saves the months until payoff
/// with it.
///
/// # Errors
/// - Returns a `PayoffError` if the amount is not a number or is not greater than zero. In that
///   case neither the config nor the stored months until payoff change.
pub fn income(config: &mut Config, args: &IncomeArgs) -> Result<Out<Decimal>> {
    let amount = Amount::from_str(args.amount()).map_err(|_| PayoffError::NotNumeric {
        field: "disposable income",
        value: args.amount().to_string(),
    })?;
    let mut store = config.store()?;
    payoff::months_until_payoff(store.total_debts(), amount.value())?;
    config.set_disposable_income(amount)?;
    let months = store.set_disposable_income(amount.value())?;
    Ok(Out::new(
        format!("Disposable income set to {amount}, your debts are paid off in {months} months"),
        months,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_update() {
        let env = TestEnv::new();
        let id = env.add_debt("Car Loan", "0", "0").to_string();
        let args = UpdateArgs::new(&id, "$5,000", "6%", Some("12".to_string()));
        let out = update(&env.config(), &args).unwrap();
        assert!(out.message().contains("Updated debt 'Car Loan'"));
        let debt = out.structure().unwrap();
        assert_eq!(debt.balance().value(), dec("5000"));
        assert_eq!(debt.interest_rate(), dec("6"));

        let store = env.config().store().unwrap();
        assert_eq!(store.total_debts().value(), dec("5000"));
        assert_eq!(store.last_month_number(), 12);
    }

    #[test]
    fn test_update_rejects_non_numeric_balance() {
        let env = TestEnv::new();
        let id = env.add_debt("Car Loan", "100", "1").to_string();
        let args = UpdateArgs::new(&id, "a lot", "6", None);
        let err = update(&env.config(), &args).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PayoffError>(),
            Some(PayoffError::NotNumeric { .. })
        ));
        let store = env.config().store().unwrap();
        assert_eq!(store.debts()[0].balance().value(), dec("100"));
    }

    #[test]
    fn test_update_unknown_id() {
        let env = TestEnv::new();
        let stranger = Debt::new("stranger").id().to_string();
        let out = update(&env.config(), &UpdateArgs::new(stranger, "1", "1", None)).unwrap();
        assert!(out.structure().is_none());
        assert!(out.message().contains("nothing was updated"));
    }

    #[test]
    fn test_method() {
        let env = TestEnv::new();
        let out = method(&env.config(), &MethodArgs::new(PayoffMethod::Snowball)).unwrap();
        assert_eq!(out.message(), "Payoff method set to snowball");
        assert_eq!(
            env.config().store().unwrap().payoff_method(),
            PayoffMethod::Snowball
        );
    }

    #[test]
    fn test_income() {
        let env = TestEnv::new();
        env.add_debt("Card", "1200", "22");
        let mut config = env.config();
        let out = income(&mut config, &IncomeArgs::new("$400")).unwrap();
        assert_eq!(out.structure(), Some(&dec("3.00")));

        let reloaded = env.config();
        assert_eq!(
            reloaded.disposable_income(),
            Some(Amount::from_str("400").unwrap())
        );
        assert_eq!(reloaded.store().unwrap().months_until_payoff(), dec("3.00"));
    }

    #[test]
    fn test_zero_income_is_rejected() {
        let env = TestEnv::new();
        env.add_debt("Card", "1200", "22");
        let mut config = env.config();
        income(&mut config, &IncomeArgs::new("600")).unwrap();

        let err = income(&mut config, &IncomeArgs::new("0")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PayoffError>(),
            Some(PayoffError::NonPositiveIncome(_))
        ));
        let reloaded = env.config();
        assert_eq!(
            reloaded.disposable_income(),
            Some(Amount::from_str("600").unwrap())
        );
        assert_eq!(reloaded.store().unwrap().months_until_payoff(), dec("2.00"));
    }

    #[test]
    fn test_income_is_not_applied_when_config_cannot_be_saved() {
        let env = TestEnv::new();
        env.add_debt("Card", "1200", "22");
        let mut config = env.config();
        income(&mut config, &IncomeArgs::new("600")).unwrap();

        let config_path = config.config_path().to_path_buf();
        std::fs::remove_file(&config_path).unwrap();
        std::fs::create_dir(&config_path).unwrap();
        assert!(income(&mut config, &IncomeArgs::new("300")).is_err());
        assert_eq!(
            config.disposable_income(),
            Some(Amount::from_str("600").unwrap())
        );
        assert_eq!(config.store().unwrap().months_until_payoff(), dec("2.00"));
    }

    #[test]
    fn test_non_numeric_income_is_rejected() {
        let env = TestEnv::new();
        let mut config = env.config();
        let err = income(&mut config, &IncomeArgs::new("plenty")).unwrap_err();
        assert!(err.to_string().contains("not a number"));
    }
}
