// Calendar-date handling and the date guard that keeps check-in/check-out inputs above their floors

use crate::error::{CalculatorError, Result};
use crate::page::InputField;
use chrono::{Days, Local, NaiveDate};
use std::sync::Arc;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

// Canonical YYYY-MM-DD only, surrounding whitespace aside
pub fn parse_calendar_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    if !is_canonical_date(trimmed) {
        return Err(CalculatorError::UnparsableDate(value.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| CalculatorError::UnparsableDate(value.to_string()))
}

fn is_canonical_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

// Empty input means "not chosen yet"; anything else must parse
pub fn parse_optional_date(value: &str) -> Result<Option<NaiveDate>> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_calendar_date(value).map(Some)
}

// Source of "today" for date floors.
pub trait Clock: Send + Sync + 'static {
    fn today(&self) -> NaiveDate;
}

// Local calendar day of the machine running the page
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

// Computes the earliest selectable check-in and check-out days.
//
// The guard only publishes floors as the `min` bound of the inputs; values
// below the floor are still accepted and left to the price engine to reject.
#[derive(Clone)]
pub struct DateGuard {
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for DateGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DateGuard")
            .field("today", &self.clock.today())
            .finish()
    }
}

impl DateGuard {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn checkin_floor(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn checkout_floor(&self, checkin: Option<NaiveDate>) -> NaiveDate {
        let base = checkin.unwrap_or_else(|| self.clock.today());
        // Only NaiveDate::MAX has no successor
        base.checked_add_days(Days::new(1)).unwrap_or(base)
    }

    pub fn apply_checkin_floor(&self, field: &InputField) -> NaiveDate {
        let floor = self.checkin_floor();
        field.set_min(floor);
        floor
    }

    // An unparsable check-in counts as unset
    pub fn apply_checkout_floor(&self, checkin: &InputField, checkout: &InputField) -> NaiveDate {
        let checkin_date = parse_optional_date(&checkin.value()).ok().flatten();
        let floor = self.checkout_floor(checkin_date);
        checkout.set_min(floor);
        floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn guard_on(today: NaiveDate) -> DateGuard {
        DateGuard::new(Arc::new(FixedClock(today)))
    }

    #[test_case("2025-06-01", date(2025, 6, 1); "plain date")]
    #[test_case(" 2024-02-29 ", date(2024, 2, 29); "leap day with padding")]
    #[test_case("1999-12-31", date(1999, 12, 31); "end of century")]
    fn test_parse_calendar_date(input: &str, expected: NaiveDate) {
        assert_eq!(parse_calendar_date(input).unwrap(), expected);
    }

    #[test_case("2025-02-30"; "day out of range")]
    #[test_case("2025-13-01"; "month out of range")]
    #[test_case("01/06/2025"; "wrong layout")]
    #[test_case("tomorrow"; "free text")]
    #[test_case("2025-6-1"; "unpadded month and day")]
    #[test_case("+2025-06-01"; "signed year")]
    #[test_case("12025-06-01"; "five digit year")]
    #[test_case("2025-06-01T00:00"; "trailing time")]
    fn test_parse_rejects_garbage(input: &str) {
        assert!(matches!(
            parse_calendar_date(input),
            Err(CalculatorError::UnparsableDate(_))
        ));
    }

    #[test]
    fn test_empty_input_is_absent() {
        assert_eq!(parse_optional_date("").unwrap(), None);
        assert_eq!(parse_optional_date("   ").unwrap(), None);
        assert!(parse_optional_date("2025-06-31").is_err());
    }

    #[test]
    fn test_format_parse_round_trip() {
        let mut day = date(1900, 1, 1);
        let end = date(2100, 12, 31);
        while day <= end {
            let text = format_calendar_date(day);
            assert_eq!(text.len(), 10);
            assert_eq!(parse_calendar_date(&text).unwrap(), day);
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_checkin_floor_is_today() {
        let guard = guard_on(date(2025, 6, 1));
        assert_eq!(guard.checkin_floor(), date(2025, 6, 1));
    }

    #[test]
    fn test_checkout_floor_follows_checkin() {
        let guard = guard_on(date(2025, 6, 1));
        assert_eq!(guard.checkout_floor(None), date(2025, 6, 2));
        assert_eq!(
            guard.checkout_floor(Some(date(2025, 12, 31))),
            date(2026, 1, 1)
        );
        assert_eq!(
            guard.checkout_floor(Some(date(2024, 2, 28))),
            date(2024, 2, 29)
        );
    }

    #[test]
    fn test_apply_floors_to_inputs() {
        let guard = guard_on(date(2025, 6, 1));
        let checkin = InputField::new();
        let checkout = InputField::new();

        guard.apply_checkin_floor(&checkin);
        guard.apply_checkout_floor(&checkin, &checkout);
        assert_eq!(checkin.min(), Some(date(2025, 6, 1)));
        assert_eq!(checkout.min(), Some(date(2025, 6, 2)));

        checkin.set_value("2025-06-10");
        guard.apply_checkout_floor(&checkin, &checkout);
        assert_eq!(checkout.min(), Some(date(2025, 6, 11)));

        // Garbage check-in falls back to tomorrow
        checkin.set_value("not-a-date");
        guard.apply_checkout_floor(&checkin, &checkout);
        assert_eq!(checkout.min(), Some(date(2025, 6, 2)));
    }

    #[test]
    fn test_floor_does_not_reject_values() {
        let guard = guard_on(date(2025, 6, 1));
        let checkin = InputField::new();
        checkin.set_value("2020-01-01");
        guard.apply_checkin_floor(&checkin);
        assert_eq!(checkin.value(), "2020-01-01");
    }
}
