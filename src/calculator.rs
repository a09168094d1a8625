// Calculator instance: one booking form wired to the date guard, price engine and notice

use crate::catalog::RoomCatalog;
use crate::config::CalculatorConfig;
use crate::dates::DateGuard;
use crate::notice::NoticeTimer;
use crate::page::FieldBindings;
use crate::pricing::{format_currency, BookingQuote, DateRange, PriceEngine};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculatorState {
    Uninitialized,
    Settled { valid: bool },
}

// The input fields whose change events the calculator reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    CheckIn,
    CheckOut,
    RoomType,
}

// A booking calculator bound to one form.
//
// Everything mutable it touches (inputs, display sinks, notice timer) comes
// from its own FieldBindings; the catalog is the only shared value and is
// never written to.
#[derive(Debug)]
pub struct CalculatorInstance {
    name: String,
    bindings: FieldBindings,
    catalog: Arc<RoomCatalog>,
    guard: DateGuard,
    notice: NoticeTimer,
    currency_symbol: String,
    state: CalculatorState,
    last_quote: BookingQuote,
}

impl CalculatorInstance {
    pub fn new(
        name: impl Into<String>,
        bindings: FieldBindings,
        catalog: Arc<RoomCatalog>,
        guard: DateGuard,
        config: &CalculatorConfig,
    ) -> Self {
        let notice = NoticeTimer::new(
            bindings.notice.clone(),
            config.notice_message.clone(),
            config.notice_delay(),
        );
        let instance = Self {
            name: name.into(),
            bindings,
            catalog,
            guard,
            notice,
            currency_symbol: config.currency_symbol.clone(),
            state: CalculatorState::Uninitialized,
            last_quote: BookingQuote::invalid(),
        };
        instance.apply_date_floors();
        instance
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> CalculatorState {
        self.state
    }

    pub fn is_valid(&self) -> bool {
        self.state == CalculatorState::Settled { valid: true }
    }

    pub fn last_quote(&self) -> BookingQuote {
        self.last_quote
    }

    pub fn bindings(&self) -> &FieldBindings {
        &self.bindings
    }

    pub fn catalog(&self) -> &RoomCatalog {
        &self.catalog
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    pub fn date_range(&self) -> DateRange {
        DateRange::from_inputs(
            &self.bindings.checkin.value(),
            &self.bindings.checkout.value(),
        )
    }

    pub fn room_type(&self) -> String {
        self.bindings.room_type.value()
    }

    // First settle once the surrounding page is ready
    pub fn initialize(&mut self) -> BookingQuote {
        let quote = self.recompute();
        info!(
            "Calculator {} initialized (valid: {})",
            self.name, quote.valid
        );
        quote
    }

    pub fn handle_change(&mut self, field: FieldKind) -> BookingQuote {
        match field {
            FieldKind::CheckIn => self.on_checkin_change(),
            FieldKind::CheckOut => self.on_checkout_change(),
            FieldKind::RoomType => self.on_room_type_change(),
        }
    }

    // Only a check-in change moves the check-out floor
    pub fn on_checkin_change(&mut self) -> BookingQuote {
        let floor = self
            .guard
            .apply_checkout_floor(&self.bindings.checkin, &self.bindings.checkout);
        debug!("Calculator {} check-out floor now {}", self.name, floor);
        self.recompute()
    }

    pub fn on_checkout_change(&mut self) -> BookingQuote {
        self.recompute()
    }

    pub fn on_room_type_change(&mut self) -> BookingQuote {
        self.recompute()
    }

    // Writes into this instance's room-type field and raises its change event
    pub fn prefill_room_type(&mut self, room_type: &str) -> BookingQuote {
        self.bindings.room_type.set_value(room_type);
        self.handle_change(FieldKind::RoomType)
    }

    // Full recompute from the current field values; idempotent for unchanged inputs
    pub fn recompute(&mut self) -> BookingQuote {
        let quote = PriceEngine::quote(&self.date_range(), &self.room_type(), &self.catalog);
        self.render(&quote);
        self.notice.notify(quote.valid);

        self.state = CalculatorState::Settled { valid: quote.valid };
        self.last_quote = quote;
        quote
    }

    // Clears the form after a successful booking; the instance stays usable
    pub fn reset(&mut self) {
        self.bindings.checkin.clear();
        self.bindings.checkout.clear();
        self.bindings.room_type.clear();
        self.notice.dismiss();
        self.apply_date_floors();

        let quote = BookingQuote::invalid();
        self.render(&quote);
        self.state = CalculatorState::Settled { valid: false };
        self.last_quote = quote;
        info!("Calculator {} reset", self.name);
    }

    pub fn nights_display(&self) -> String {
        self.bindings.nights.text()
    }

    pub fn rate_display(&self) -> String {
        self.bindings.rate.text()
    }

    pub fn total_display(&self) -> String {
        self.bindings.total.text()
    }

    pub fn notice_visible(&self) -> bool {
        self.notice.is_visible()
    }

    fn render(&self, quote: &BookingQuote) {
        self.bindings.nights.set_text(quote.nights.to_string());
        self.bindings
            .rate
            .set_text(format_currency(&self.currency_symbol, quote.rate));
        self.bindings
            .total
            .set_text(format_currency(&self.currency_symbol, quote.total));
    }

    fn apply_date_floors(&self) {
        self.guard.apply_checkin_floor(&self.bindings.checkin);
        self.guard
            .apply_checkout_floor(&self.bindings.checkin, &self.bindings.checkout);
    }
}
