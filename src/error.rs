use thiserror::Error;

// Error types for the booking calculator
#[derive(Error, Debug)]
pub enum CalculatorError {
    #[error("Missing binding for {field} in instance {instance}: no element with id {element_id}")]
    MissingBinding {
        instance: String,
        field: &'static str,
        element_id: String,
    },

    #[error("Element {0} is bound by more than one calculator instance")]
    OverlappingBindings(String),

    #[error("Calculator instance {0} is already registered")]
    DuplicateInstance(String),

    #[error("Missing {0} date")]
    MissingDate(&'static str),

    #[error("Unparsable date: {0:?}")]
    UnparsableDate(String),

    #[error("Invalid range: check-out {checkout} is not after check-in {checkin}")]
    InvalidRange { checkin: String, checkout: String },

    #[error("Total for {nights} night(s) at {rate} does not fit in a quote")]
    TotalOverflow { nights: u64, rate: u64 },

    #[error("No room type selected")]
    MissingRoomType,

    #[error("Booking rejected: {0}")]
    InvalidSelection(String),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CalculatorError>;
