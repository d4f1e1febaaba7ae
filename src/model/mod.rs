//! Types that represent the core data model, such as `Debt` and `PayoffMethod`.
mod amount;
mod debt;
mod method;

pub use amount::{Amount, AmountError};
pub use debt::{Debt, DebtId, DebtUpdate};
pub use method::PayoffMethod;
