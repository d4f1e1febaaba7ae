use crate::model::{Amount, Debt};
use crate::payoff::PayoffError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// The sum of every debt's balance. An empty list sums to zero.
///
/// # Errors
/// - `PayoffError::Overflow` when the sum cannot be represented.
pub fn total_balance(debts: &[Debt]) -> Result<Amount, PayoffError> {
    debts.iter().try_fold(Amount::ZERO, |total, debt| {
        total
            .checked_add(debt.balance())
            .ok_or(PayoffError::Overflow("total balance"))
    })
}

/// How many months `disposable_income` per month needs to pay off `total_balance`, rounded to two
/// decimal places.
///
/// # Errors
/// - `PayoffError::NonPositiveIncome` when `disposable_income` is zero or negative.
/// - `PayoffError::Overflow` when the quotient cannot be represented.
pub fn months_until_payoff(
    total_balance: Amount,
    disposable_income: Decimal,
) -> Result<Decimal, PayoffError> {
    if disposable_income <= Decimal::ZERO {
        return Err(PayoffError::NonPositiveIncome(disposable_income));
    }
    let mut months = total_balance
        .value()
        .checked_div(disposable_income)
        .ok_or(PayoffError::Overflow("months until payoff"))?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    months.rescale(2);
    Ok(months)
}

/// The floor of the sum of every debt's own `months_until_payoff`. Debts that have not been given
/// a month count contribute nothing, and an empty list yields zero.
pub fn last_month_number(debts: &[Debt]) -> u32 {
    let sum = debts
        .iter()
        .filter_map(Debt::months_until_payoff)
        .fold(Decimal::ZERO, |acc, months| acc.saturating_add(months));
    sum.floor().to_u32().unwrap_or(u32::MAX)
}
