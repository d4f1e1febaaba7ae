use crate::model::Amount;
use crate::payoff::PayoffError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// The unique identifier of a `Debt`. It is assigned once, when the debt is created, and never
/// changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DebtId(Uuid);

impl DebtId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for DebtId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for DebtId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(DebtId)
    }
}

/// One debt obligation, such as a car loan or a credit card.
///
/// Serialized field names are camelCase, e.g.
/// ```json
/// {
///   "id": "0b7c2f0e-3c57-4d6f-9a43-5d0f1f3c3f7e",
///   "title": "Car Loan",
///   "balance": "5000",
///   "interestRate": "6",
///   "monthsUntilPayoff": "12.5"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    id: DebtId,
    title: String,
    balance: Amount,
    /// Annual rate as a percentage, i.e. `22` means 22%.
    interest_rate: Decimal,
    /// Supplied by the caller on update, never computed here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    months_until_payoff: Option<Decimal>,
}

impl Debt {
    /// Creates a debt with a fresh id, a zero balance and a zero interest rate.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: DebtId::generate(),
            title: title.into(),
            balance: Amount::ZERO,
            interest_rate: Decimal::ZERO,
            months_until_payoff: None,
        }
    }

    pub fn id(&self) -> DebtId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn interest_rate(&self) -> Decimal {
        self.interest_rate
    }

    pub fn months_until_payoff(&self) -> Option<Decimal> {
        self.months_until_payoff
    }

    /// Replaces every mutable field with the values in `update`.
    pub fn apply(&mut self, update: &DebtUpdate) {
        self.balance = update.balance;
        self.interest_rate = update.interest_rate;
        self.months_until_payoff = update.months_until_payoff;
    }
}

/// The mutable fields of a `Debt`, validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebtUpdate {
    balance: Amount,
    interest_rate: Decimal,
    months_until_payoff: Option<Decimal>,
}

impl DebtUpdate {
    /// # Errors
    /// - `PayoffError::Negative` if `balance` or `months_until_payoff` is below zero.
    pub fn new(
        balance: Amount,
        interest_rate: Decimal,
        months_until_payoff: Option<Decimal>,
    ) -> Result<Self, PayoffError> {
        if balance.is_negative() {
            return Err(PayoffError::Negative {
                field: "balance",
                value: balance.value(),
            });
        }
        if let Some(months) = months_until_payoff {
            if months < Decimal::ZERO {
                return Err(PayoffError::Negative {
                    field: "months until payoff",
                    value: months,
                });
            }
        }
        Ok(Self {
            balance,
            interest_rate,
            months_until_payoff,
        })
    }

    /// Parses user-entered text. The balance may be written like `$1,500.00` and the interest rate
    /// may carry a trailing `%`.
    pub fn parse(
        balance: &str,
        interest_rate: &str,
        months_until_payoff: Option<&str>,
    ) -> Result<Self, PayoffError> {
        let balance = Amount::from_str(balance).map_err(|_| PayoffError::NotNumeric {
            field: "balance",
            value: balance.to_string(),
        })?;
        let rate_text = interest_rate.trim();
        let rate_text = rate_text.strip_suffix('%').unwrap_or(rate_text);
        let rate = Decimal::from_str(rate_text.trim()).map_err(|_| PayoffError::NotNumeric {
            field: "interest rate",
            value: interest_rate.to_string(),
        })?;
        let months = match months_until_payoff {
            None => None,
            Some(text) => Some(Decimal::from_str(text.trim()).map_err(|_| {
                PayoffError::NotNumeric {
                    field: "months until payoff",
                    value: text.to_string(),
                }
            })?),
        };
        Self::new(balance, rate, months)
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn interest_rate(&self) -> Decimal {
        self.interest_rate
    }

    pub fn months_until_payoff(&self) -> Option<Decimal> {
        self.months_until_payoff
    }
}
