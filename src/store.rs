//! The debt list store.
//!
//! `DebtStore` owns the list of debts along with the aggregate figures derived from it. Every
//! mutation recomputes the aggregates and writes the results through to the injected `Storage`
//! before returning.

use crate::model::{Amount, Debt, DebtId, DebtUpdate, PayoffMethod};
use crate::payoff::{self, CalendarMonth};
use crate::storage::Storage;
use crate::Result;
use anyhow::Context;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::str::FromStr;
use tracing::{debug, warn};

/// Storage key for the list of debts.
pub const DEBTS: &str = "debts";

/// Storage key for the payoff method tag.
pub const PAYOFF_METHOD: &str = "payoffMethod";

/// Storage key for the sum of all balances.
pub const TOTAL_DEBTS: &str = "totalDebts";

/// Storage key for the months needed to pay off `totalDebts`.
pub const MONTHS_UNTIL_PAYOFF: &str = "monthsUntilPayoff";

/// Storage key for the last highlighted month of the calendar.
pub const LAST_MONTH_NUMBER: &str = "lastMonthNumber";

pub struct DebtStore<S>
where
    S: Storage,
{
    storage: S,
    debts: Vec<Debt>,
    payoff_method: PayoffMethod,
    total_debts: Amount,
    months_until_payoff: Decimal,
    last_month_number: u32,
    /// Owned by the caller. When present, debt mutations also recompute `months_until_payoff`.
    disposable_income: Option<Decimal>,
}

impl<S> DebtStore<S>
where
    S: Storage,
{
    /// Rehydrates a store from `storage`. Keys that have never been written take their empty
    /// values: no debts, the avalanche method and zero for every aggregate.
    ///
    /// # Errors
    /// - Returns an error if `storage` fails or if a stored value cannot be decoded.
    pub fn load(storage: S) -> Result<Self> {
        let debts: Vec<Debt> = load_key(&storage, DEBTS)?.unwrap_or_default();
        let payoff_method = match load_key::<String>(&storage, PAYOFF_METHOD)? {
            Some(tag) if !tag.is_empty() => PayoffMethod::from_str(&tag)
                .with_context(|| format!("Unknown payoff method '{tag}' in storage"))?,
            _ => PayoffMethod::default(),
        };
        let total_debts = load_key(&storage, TOTAL_DEBTS)?.unwrap_or_default();
        let months_until_payoff = load_key(&storage, MONTHS_UNTIL_PAYOFF)?.unwrap_or_default();
        let last_month_number = load_key(&storage, LAST_MONTH_NUMBER)?.unwrap_or_default();
        debug!(
            "Loaded {} debt{} using the {payoff_method} method",
            debts.len(),
            if debts.len() == 1 { "" } else { "s" }
        );
        Ok(Self {
            storage,
            debts,
            payoff_method,
            total_debts,
            months_until_payoff,
            last_month_number,
            disposable_income: None,
        })
    }

    /// Sets the disposable income used when debt mutations recompute `months_until_payoff`. Nothing
    /// is recomputed or written by this call.
    pub fn with_disposable_income(mut self, disposable_income: Option<Decimal>) -> Self {
        self.disposable_income = disposable_income;
        self
    }

    /// Creates a debt titled `title` with a zero balance and a zero interest rate and appends it to
    /// the list. Returns `None`, and changes nothing, when `title` is blank.
    pub fn add_debt(&mut self, title: &str) -> Result<Option<Debt>> {
        let title = title.trim();
        if title.is_empty() {
            debug!("Ignoring a debt with an empty title");
            return Ok(None);
        }
        let debt = Debt::new(title);
        debug!("Adding debt {} '{}'", debt.id(), debt.title());
        let mut debts = self.debts.clone();
        debts.push(debt.clone());
        self.commit(debts)?;
        Ok(Some(debt))
    }

    /// Replaces the balance, interest rate and months until payoff of the debt with `id`. Returns
    /// the updated debt, or `None` if no debt has that `id`.
    pub fn update_debt(&mut self, id: DebtId, update: DebtUpdate) -> Result<Option<Debt>> {
        let Some(ix) = self.debts.iter().position(|debt| debt.id() == id) else {
            debug!("No debt with id {id}, nothing to update");
            return Ok(None);
        };
        let mut debts = self.debts.clone();
        debts[ix].apply(&update);
        let updated = debts[ix].clone();
        self.commit(debts)?;
        Ok(Some(updated))
    }

    /// Removes the debt with `id`. Returns the removed debt, or `None` if no debt has that `id`.
    pub fn delete_debt(&mut self, id: DebtId) -> Result<Option<Debt>> {
        let Some(ix) = self.debts.iter().position(|debt| debt.id() == id) else {
            debug!("No debt with id {id}, nothing to delete");
            return Ok(None);
        };
        let mut debts = self.debts.clone();
        let removed = debts.remove(ix);
        self.commit(debts)?;
        Ok(Some(removed))
    }

    /// Sets and saves the method used by `ordered_debts`.
    pub fn set_payoff_method(&mut self, method: PayoffMethod) -> Result<()> {
        let value = encode(PAYOFF_METHOD, &method)?;
        self.storage.set(PAYOFF_METHOD, value)?;
        self.payoff_method = method;
        Ok(())
    }

    /// Recomputes and saves `months_until_payoff` using `disposable_income`, which is also kept for
    /// later mutations.
    ///
    /// # Errors
    /// - Returns a `PayoffError` if `disposable_income` is not greater than zero. The previous
    ///   income and months until payoff are kept.
    pub fn set_disposable_income(&mut self, disposable_income: Decimal) -> Result<Decimal> {
        let months = payoff::months_until_payoff(self.total_debts, disposable_income)?;
        let value = encode(MONTHS_UNTIL_PAYOFF, &months)?;
        self.storage.set(MONTHS_UNTIL_PAYOFF, value)?;
        self.disposable_income = Some(disposable_income);
        self.months_until_payoff = months;
        Ok(months)
    }

    /// The debts in insertion order.
    pub fn debts(&self) -> &[Debt] {
        &self.debts
    }

    /// The debts in the order they should be paid off under the current method.
    pub fn ordered_debts(&self) -> Vec<&Debt> {
        payoff::order_debts(&self.debts, self.payoff_method)
    }

    /// The twelve calendar cells for the current payoff horizon.
    pub fn calendar(&self) -> Vec<CalendarMonth> {
        payoff::calendar(self.last_month_number, self.months_until_payoff)
    }

    pub fn payoff_method(&self) -> PayoffMethod {
        self.payoff_method
    }

    pub fn total_debts(&self) -> Amount {
        self.total_debts
    }

    pub fn months_until_payoff(&self) -> Decimal {
        self.months_until_payoff
    }

    pub fn last_month_number(&self) -> u32 {
        self.last_month_number
    }

    pub fn disposable_income(&self) -> Option<Decimal> {
        self.disposable_income
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Recomputes the aggregates for `debts` and writes everything through to storage. `self` only
    /// changes once every key has been written; if a write fails, the keys already written are
    /// restored to their previous values.
    fn commit(&mut self, debts: Vec<Debt>) -> Result<()> {
        let total_debts = match payoff::total_balance(&debts) {
            Ok(total) => total,
            Err(e) => {
                warn!("Keeping total debts at {}: {e}", self.total_debts);
                self.total_debts
            }
        };
        let last_month_number = payoff::last_month_number(&debts);
        let months_until_payoff = match self.disposable_income {
            None => self.months_until_payoff,
            Some(income) => match payoff::months_until_payoff(total_debts, income) {
                Ok(months) => months,
                Err(e) => {
                    warn!(
                        "Keeping months until payoff at {}: {e}",
                        self.months_until_payoff
                    );
                    self.months_until_payoff
                }
            },
        };

        let writes = [
            (DEBTS, encode(DEBTS, &debts)?),
            (TOTAL_DEBTS, encode(TOTAL_DEBTS, &total_debts)?),
            (
                MONTHS_UNTIL_PAYOFF,
                encode(MONTHS_UNTIL_PAYOFF, &months_until_payoff)?,
            ),
            (
                LAST_MONTH_NUMBER,
                encode(LAST_MONTH_NUMBER, &last_month_number)?,
            ),
        ];
        let previous = [
            (DEBTS, encode(DEBTS, &self.debts)?),
            (TOTAL_DEBTS, encode(TOTAL_DEBTS, &self.total_debts)?),
            (
                MONTHS_UNTIL_PAYOFF,
                encode(MONTHS_UNTIL_PAYOFF, &self.months_until_payoff)?,
            ),
            (
                LAST_MONTH_NUMBER,
                encode(LAST_MONTH_NUMBER, &self.last_month_number)?,
            ),
        ];
        for (ix, (key, value)) in writes.into_iter().enumerate() {
            if let Err(e) = self.storage.set(key, value) {
                for (key, value) in previous.into_iter().take(ix + 1) {
                    if let Err(restore) = self.storage.set(key, value) {
                        warn!("Unable to restore '{key}' after a failed write: {restore:#}");
                    }
                }
                return Err(e);
            }
        }

        self.debts = debts;
        self.total_debts = total_debts;
        self.months_until_payoff = months_until_payoff;
        self.last_month_number = last_month_number;
        Ok(())
    }
}

fn load_key<T>(storage: &impl Storage, key: &str) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    match storage.get(key)? {
        None => Ok(None),
        Some(text) => serde_json::from_str(&text)
            .map(Some)
            .with_context(|| format!("Unable to decode '{key}' from storage")),
    }
}

fn encode<T>(key: &str, value: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    serde_json::to_string(value).with_context(|| format!("Unable to encode '{key}' for storage"))
}
