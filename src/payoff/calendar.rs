use chrono::{Months, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

/// The twelve cells of the payoff calendar, in order.
pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// How much of a calendar month falls inside the payoff horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "fraction", rename_all = "snake_case")]
pub enum MonthState {
    /// The whole month is spent paying off debt.
    Full,
    /// The month in which the final payment lands, holding the fraction of the month it uses.
    Partial(Decimal),
    /// The debts are already paid off by this month.
    Upcoming,
}

/// A single cell of the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarMonth {
    pub number: u32,
    pub name: &'static str,
    pub state: MonthState,
}

/// Decides the state of the 1-based `month_number`.
///
/// The boundary is `floor(months_until_payoff)`: months up to it are `Full`, the month after it is
/// `Partial` when there is a fractional remainder, and everything else is `Upcoming`. A non-zero
/// `last_month_number` caps the highlighted range at month `last_month_number + 1`.
pub fn month_state(
    month_number: u32,
    last_month_number: u32,
    months_until_payoff: Decimal,
) -> MonthState {
    if last_month_number > 0 && month_number > last_month_number.saturating_add(1) {
        return MonthState::Upcoming;
    }
    let boundary = months_until_payoff.floor();
    let fraction = months_until_payoff - boundary;
    let month = Decimal::from(month_number);
    if month <= boundary {
        MonthState::Full
    } else if month == boundary + Decimal::ONE && fraction > Decimal::ZERO {
        MonthState::Partial(fraction)
    } else {
        MonthState::Upcoming
    }
}

/// Builds all twelve calendar cells.
pub fn calendar(last_month_number: u32, months_until_payoff: Decimal) -> Vec<CalendarMonth> {
    MONTHS
        .iter()
        .zip(1u32..)
        .map(|(name, number)| CalendarMonth {
            number,
            name: *name,
            state: month_state(number, last_month_number, months_until_payoff),
        })
        .collect()
}

/// The date on which the last payment is made, counting whole months from `start`. A partial month
/// counts as a whole one. Returns `None` if the date cannot be represented.
pub fn projected_payoff_date(start: NaiveDate, months_until_payoff: Decimal) -> Option<NaiveDate> {
    if months_until_payoff < Decimal::ZERO {
        return None;
    }
    let months = months_until_payoff.ceil().to_u32()?;
    start.checked_add_months(Months::new(months))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_fractional_horizon() {
        let mup = dec("3.25");
        assert_eq!(month_state(1, 0, mup), MonthState::Full);
        assert_eq!(month_state(3, 0, mup), MonthState::Full);
        assert_eq!(month_state(4, 0, mup), MonthState::Partial(dec("0.25")));
        assert_eq!(month_state(5, 0, mup), MonthState::Upcoming);
    }

    #[test]
    fn test_whole_horizon_has_no_partial_month() {
        let mup = dec("3.00");
        assert_eq!(month_state(3, 3, mup), MonthState::Full);
        assert_eq!(month_state(4, 3, mup), MonthState::Upcoming);
    }

    #[test]
    fn test_zero_horizon() {
        assert!(calendar(0, Decimal::ZERO)
            .iter()
            .all(|m| m.state == MonthState::Upcoming));
    }

    #[test]
    fn test_horizon_past_december_fills_the_year() {
        assert!(calendar(0, dec("18.5"))
            .iter()
            .all(|m| m.state == MonthState::Full));
    }

    #[test]
    fn test_last_month_number_caps_range() {
        let mup = dec("8.5");
        assert_eq!(month_state(3, 2, mup), MonthState::Full);
        assert_eq!(month_state(4, 2, mup), MonthState::Upcoming);
    }

    #[test]
    fn test_calendar_cells() {
        let cells = calendar(2, dec("2.5"));
        assert_eq!(cells.len(), 12);
        assert_eq!(cells[0].name, "January");
        assert_eq!(cells[11].name, "December");
        assert_eq!(cells[11].number, 12);
        assert_eq!(cells[1].state, MonthState::Full);
        assert_eq!(cells[2].state, MonthState::Partial(dec("0.5")));
        assert_eq!(cells[3].state, MonthState::Upcoming);
    }

    #[test]
    fn test_month_state_json() {
        let json = serde_json::to_string(&MonthState::Partial(dec("0.5"))).unwrap();
        assert_eq!(json, r#"{"state":"partial","fraction":"0.5"}"#);
        let json = serde_json::to_string(&MonthState::Full).unwrap();
        assert_eq!(json, r#"{"state":"full"}"#);
    }

    #[test]
    fn test_projected_payoff_date() {
        let start = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(
            projected_payoff_date(start, dec("3.00")),
            NaiveDate::from_ymd_opt(2027, 1, 18)
        );
        assert_eq!(
            projected_payoff_date(start, dec("3.01")),
            NaiveDate::from_ymd_opt(2027, 2, 18)
        );
        assert_eq!(projected_payoff_date(start, Decimal::ZERO), Some(start));
    }
}
