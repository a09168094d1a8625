// Price engine: turns a stay (date range + room type) into a priced quote

use crate::catalog::RoomCatalog;
use crate::dates::{format_calendar_date, parse_optional_date};
use crate::error::{CalculatorError, Result};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub checkin: Option<NaiveDate>,
    pub checkout: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(checkin: Option<NaiveDate>, checkout: Option<NaiveDate>) -> Self {
        Self { checkin, checkout }
    }

    // Unparsable values are folded into "absent"
    pub fn from_inputs(checkin: &str, checkout: &str) -> Self {
        Self {
            checkin: lenient_date(checkin),
            checkout: lenient_date(checkout),
        }
    }

    // Number of nights between the two days, or why there is no stay
    pub fn nights(&self) -> Result<u64> {
        let checkin = self.checkin.ok_or(CalculatorError::MissingDate("check-in"))?;
        let checkout = self
            .checkout
            .ok_or(CalculatorError::MissingDate("check-out"))?;

        let days = checkout.signed_duration_since(checkin).num_days();
        if days <= 0 {
            return Err(CalculatorError::InvalidRange {
                checkin: format_calendar_date(checkin),
                checkout: format_calendar_date(checkout),
            });
        }
        Ok(days as u64)
    }
}

fn lenient_date(value: &str) -> Option<NaiveDate> {
    match parse_optional_date(value) {
        Ok(date) => date,
        Err(e) => {
            debug!("Treating date input as absent: {}", e);
            None
        }
    }
}

// Invariant: total == nights * rate, and nights == 0 whenever !valid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BookingQuote {
    pub nights: u64,
    pub rate: u64,
    pub total: u64,
    pub valid: bool,
}

impl BookingQuote {
    pub fn invalid() -> Self {
        Self::default()
    }
}

pub struct PriceEngine;

impl PriceEngine {
    // Pure: the same range, room type and catalog always yield the same quote
    pub fn quote(range: &DateRange, room_type: &str, catalog: &RoomCatalog) -> BookingQuote {
        match Self::try_quote(range, room_type, catalog) {
            Ok(quote) => quote,
            Err(e) => {
                debug!("Quote invalid: {}", e);
                BookingQuote::invalid()
            }
        }
    }

    // Quote straight from raw input values
    pub fn quote_inputs(
        checkin: &str,
        checkout: &str,
        room_type: &str,
        catalog: &RoomCatalog,
    ) -> BookingQuote {
        Self::quote(&DateRange::from_inputs(checkin, checkout), room_type, catalog)
    }

    fn try_quote(
        range: &DateRange,
        room_type: &str,
        catalog: &RoomCatalog,
    ) -> Result<BookingQuote> {
        let nights = range.nights()?;
        if room_type.is_empty() {
            return Err(CalculatorError::MissingRoomType);
        }

        // Unknown room types are priced at zero but still quoted
        let rate = catalog.lookup(room_type).unwrap_or_else(|| {
            debug!("Room type {:?} not in catalog, pricing at zero", room_type);
            0
        });

        // Totals past u64::MAX make the stay unquotable
        let total = nights
            .checked_mul(rate)
            .ok_or(CalculatorError::TotalOverflow { nights, rate })?;

        Ok(BookingQuote {
            nights,
            rate,
            total,
            valid: true,
        })
    }
}

// "₦" + 255000 -> "₦255,000"
pub fn format_currency(symbol: &str, amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{}{}", symbol, grouped)
}
