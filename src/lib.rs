// Booking price calculator for the hotel page's booking forms

pub mod calculator;
pub mod catalog;
pub mod config;
pub mod dates;
pub mod error;
pub mod logger;
pub mod notice;
pub mod page;
pub mod pricing;
pub mod registry;
pub mod submission;

// Re-export key types for convenience
pub use calculator::{CalculatorInstance, CalculatorState, FieldKind};
pub use catalog::RoomCatalog;
pub use config::CalculatorConfig;
pub use dates::{Clock, DateGuard, FixedClock, SystemClock};
pub use error::{CalculatorError, Result};
pub use notice::{CancellableTimer, NoticeTimer};
pub use page::{FieldBindings, FieldIds, Page};
pub use pricing::{format_currency, BookingQuote, DateRange, PriceEngine};
pub use registry::{InstanceSpec, Registry, MAIN_INSTANCE, MODAL_INSTANCE};
pub use submission::{submit, BookingConfirmation};
