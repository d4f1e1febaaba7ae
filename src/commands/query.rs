//! Query commands that report on the debts without changing them.
//!
//! This module provides:
//! - `list`: The debts in payoff order
//! - `summary`: The aggregate figures and projected payoff date
//! - `calendar`: The twelve-month payoff calendar

use crate::commands::Out;
use crate::model::{Amount, Debt, PayoffMethod};
use crate::payoff::{self, CalendarMonth, MonthState};
use crate::{Config, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// The aggregate figures shown by `payoff summary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub payoff_method: PayoffMethod,
    pub total_debts: Amount,
    pub disposable_income: Option<Amount>,
    pub months_until_payoff: Decimal,
    pub last_month_number: u32,
    pub payoff_date: Option<NaiveDate>,
}

/// Lists the debts in the order they should be paid off under the current method.
pub fn list(config: &Config) -> Result<Out<Vec<Debt>>> {
    let store = config.store()?;
    let ordered: Vec<Debt> = store.ordered_debts().into_iter().cloned().collect();
    let mut message = format!(
        "{} debt{}, ordered by the {} method",
        ordered.len(),
        if ordered.len() == 1 { "" } else { "s" },
        store.payoff_method()
    );
    for (ix, debt) in ordered.iter().enumerate() {
        let _ = write!(
            message,
            "\n  {}. {} {} at {}% ({})",
            ix + 1,
            debt.title(),
            debt.balance(),
            debt.interest_rate(),
            debt.id()
        );
    }
    Ok(Out::new(message, ordered))
}

/// Reports the total debt, the months until payoff and the date of the final payment counting from
/// `today`.
pub fn summary(config: &Config, today: NaiveDate) -> Result<Out<Summary>> {
    let store = config.store()?;
    let disposable_income = config.disposable_income();
    let payoff_date = match disposable_income {
        Some(_) => payoff::projected_payoff_date(today, store.months_until_payoff()),
        None => None,
    };
    let summary = Summary {
        payoff_method: store.payoff_method(),
        total_debts: store.total_debts(),
        disposable_income,
        months_until_payoff: store.months_until_payoff(),
        last_month_number: store.last_month_number(),
        payoff_date,
    };
    let mut message = format!(
        "Total debt is {} using the {} method",
        summary.total_debts, summary.payoff_method
    );
    match (summary.disposable_income, summary.payoff_date) {
        (Some(income), Some(date)) => {
            let _ = write!(
                message,
                ", paying {income} a month it is paid off in {} months, on {date}",
                summary.months_until_payoff
            );
        }
        _ => message.push_str(", set your disposable income with 'payoff income' to see a payoff date"),
    }
    Ok(Out::new(message, summary))
}

/// Shows which months of the calendar are spent paying off debt.
pub fn calendar(config: &Config) -> Result<Out<Vec<CalendarMonth>>> {
    let store = config.store()?;
    let months = store.calendar();
    let mut message = format!("Payoff calendar for {} months", store.months_until_payoff());
    for month in &months {
        let state = match month.state {
            MonthState::Full => "paying".to_string(),
            MonthState::Partial(fraction) => {
                format!("final payment, {}% of the month", (fraction * Decimal::ONE_HUNDRED).round())
            }
            MonthState::Upcoming => "-".to_string(),
        };
        let _ = write!(message, "\n  {:<10} {state}", month.name);
    }
    Ok(Out::new(message, months))
}
