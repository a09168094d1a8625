// Booking form submission: confirm a valid quote and reset that form, or reject

use crate::calculator::CalculatorInstance;
use crate::error::{CalculatorError, Result};
use crate::pricing::format_currency;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingConfirmation {
    pub instance: String,
    pub room_type: String,
    pub checkin: NaiveDate,
    pub checkout: NaiveDate,
    pub nights: u64,
    pub rate: u64,
    pub total: u64,
    pub total_display: String,
}

impl BookingConfirmation {
    pub fn message(&self) -> String {
        format!(
            "Thank you! Your {} room is reserved for {} night(s) from {} to {}. Total: {}",
            self.room_type, self.nights, self.checkin, self.checkout, self.total_display
        )
    }
}

// Submits one booking form.
//
// The quote is recomputed from the fields as they are now, so values edited
// without a change event are still priced. A valid form becomes a confirmation
// and the instance is reset; otherwise the fields are left as they are and
// InvalidSelection carries the message to show.
pub fn submit(
    instance: &mut CalculatorInstance,
    rejection_message: &str,
) -> Result<BookingConfirmation> {
    let quote = instance.recompute();
    let range = instance.date_range();
    let (checkin, checkout) = match (range.checkin, range.checkout) {
        (Some(checkin), Some(checkout)) if quote.valid => (checkin, checkout),
        _ => {
            info!("Booking on {} rejected", instance.name());
            return Err(CalculatorError::InvalidSelection(
                rejection_message.to_string(),
            ));
        }
    };

    let confirmation = BookingConfirmation {
        instance: instance.name().to_string(),
        room_type: instance.room_type(),
        checkin,
        checkout,
        nights: quote.nights,
        rate: quote.rate,
        total: quote.total,
        total_display: format_currency(instance.currency_symbol(), quote.total),
    };

    instance.reset();
    info!(
        "Booking on {} confirmed: {} x{} = {}",
        confirmation.instance,
        confirmation.room_type,
        confirmation.nights,
        confirmation.total_display
    );
    Ok(confirmation)
}
