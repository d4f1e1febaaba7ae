//! The payoff engine: pure functions that order debts, compute the aggregate figures and map the
//! payoff horizon onto a calendar. Nothing here touches storage.

mod aggregate;
mod calendar;
mod ordering;

pub use aggregate::{last_month_number, months_until_payoff, total_balance};
pub use calendar::{calendar, month_state, projected_payoff_date, CalendarMonth, MonthState, MONTHS};
pub use ordering::order_debts;

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by the payoff engine. Every variant describes input that was rejected rather than
/// turned into a non-finite or nonsensical figure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayoffError {
    #[error("Invalid input: disposable income must be greater than zero, got {0}")]
    NonPositiveIncome(Decimal),

    #[error("Invalid input: {field} '{value}' is not a number")]
    NotNumeric { field: &'static str, value: String },

    #[error("Invalid input: {field} cannot be negative, got {value}")]
    Negative { field: &'static str, value: Decimal },

    #[error("Invalid input: {0} is too large to compute")]
    Overflow(&'static str),
}
