use crate::model::{Debt, PayoffMethod};

/// Returns `debts` in the order they should be paid off under `method`.
///
/// - `Snowball`: ascending by balance.
/// - `Avalanche`: descending by interest rate.
///
/// The sort is stable, so debts with equal keys keep their insertion order. The input is never
/// reordered; the returned vector borrows from it.
pub fn order_debts(debts: &[Debt], method: PayoffMethod) -> Vec<&Debt> {
    let mut ordered: Vec<&Debt> = debts.iter().collect();
    match method {
        PayoffMethod::Snowball => ordered.sort_by_key(|debt| debt.balance()),
        PayoffMethod::Avalanche => {
            ordered.sort_by(|a, b| b.interest_rate().cmp(&a.interest_rate()))
        }
    }
    ordered
}
