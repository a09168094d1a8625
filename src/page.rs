// Page surface the calculator is mounted on: element store plus typed element handles

use crate::error::{CalculatorError, Result};
use chrono::NaiveDate;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InputState {
    pub value: String,
    pub min: Option<NaiveDate>,
}

// Handle to a form input (date picker or room-type select)
#[derive(Debug, Clone, Default)]
pub struct InputField {
    state: Arc<Mutex<InputState>>,
}

impl InputField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> String {
        self.state.lock().value.clone()
    }

    pub fn set_value(&self, value: impl Into<String>) {
        self.state.lock().value = value.into();
    }

    pub fn clear(&self) {
        self.state.lock().value.clear();
    }

    pub fn min(&self) -> Option<NaiveDate> {
        self.state.lock().min
    }

    pub fn set_min(&self, min: NaiveDate) {
        self.state.lock().min = Some(min);
    }

    pub fn snapshot(&self) -> InputState {
        self.state.lock().clone()
    }

    pub fn same_element(&self, other: &InputField) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

// Handle to a text display element (nights, rate, total)
#[derive(Debug, Clone, Default)]
pub struct TextSink {
    text: Arc<Mutex<String>>,
}

impl TextSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.text.lock().clone()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        *self.text.lock() = text.into();
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NoticeView {
    pub visible: bool,
    pub message: String,
}

// Handle to the validation notice element
#[derive(Debug, Clone, Default)]
pub struct NoticeSink {
    view: Arc<Mutex<NoticeView>>,
}

impl NoticeSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&self, message: &str) {
        let mut view = self.view.lock();
        view.message = message.to_string();
        view.visible = true;
    }

    pub fn hide(&self) {
        self.view.lock().visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.view.lock().visible
    }

    pub fn view(&self) -> NoticeView {
        self.view.lock().clone()
    }
}

#[derive(Debug, Clone)]
pub enum Element {
    Input(InputField),
    Text(TextSink),
    Notice(NoticeSink),
}

// The document: every element the page exposes, keyed by element id
#[derive(Debug, Default)]
pub struct Page {
    elements: DashMap<String, Element>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_input(&self, id: &str) -> InputField {
        let field = InputField::new();
        self.elements
            .insert(id.to_string(), Element::Input(field.clone()));
        field
    }

    pub fn add_text(&self, id: &str) -> TextSink {
        let sink = TextSink::new();
        self.elements.insert(id.to_string(), Element::Text(sink.clone()));
        sink
    }

    pub fn add_notice(&self, id: &str) -> NoticeSink {
        let sink = NoticeSink::new();
        self.elements
            .insert(id.to_string(), Element::Notice(sink.clone()));
        sink
    }

    pub fn remove(&self, id: &str) -> bool {
        self.elements.remove(id).is_some()
    }

    pub fn input(&self, id: &str) -> Option<InputField> {
        match self.elements.get(id).as_deref() {
            Some(Element::Input(field)) => Some(field.clone()),
            _ => None,
        }
    }

    pub fn text(&self, id: &str) -> Option<TextSink> {
        match self.elements.get(id).as_deref() {
            Some(Element::Text(sink)) => Some(sink.clone()),
            _ => None,
        }
    }

    pub fn notice(&self, id: &str) -> Option<NoticeSink> {
        match self.elements.get(id).as_deref() {
            Some(Element::Notice(sink)) => Some(sink.clone()),
            _ => None,
        }
    }

    // Creates every element named by the binding set
    pub fn mount_form(&self, ids: &FieldIds) {
        self.add_input(&ids.checkin);
        self.add_input(&ids.checkout);
        self.add_input(&ids.room_type);
        self.add_text(&ids.nights);
        self.add_text(&ids.rate);
        self.add_text(&ids.total);
        self.add_notice(&ids.notice);
    }
}

// Element ids making up one calculator binding set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIds {
    pub checkin: String,
    pub checkout: String,
    pub room_type: String,
    pub nights: String,
    pub rate: String,
    pub total: String,
    pub notice: String,
}

impl FieldIds {
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            checkin: format!("{}checkin", prefix),
            checkout: format!("{}checkout", prefix),
            room_type: format!("{}room-type", prefix),
            nights: format!("{}nights", prefix),
            rate: format!("{}rate", prefix),
            total: format!("{}total", prefix),
            notice: format!("{}calc-notice", prefix),
        }
    }

    // Booking section form
    pub fn main() -> Self {
        Self::with_prefix("")
    }

    // Booking modal form
    pub fn modal() -> Self {
        Self::with_prefix("modal-")
    }

    pub fn all(&self) -> [&str; 7] {
        [
            &self.checkin,
            &self.checkout,
            &self.room_type,
            &self.nights,
            &self.rate,
            &self.total,
            &self.notice,
        ]
    }
}

// Typed element references handed to a calculator instance at construction
#[derive(Debug, Clone)]
pub struct FieldBindings {
    pub checkin: InputField,
    pub checkout: InputField,
    pub room_type: InputField,
    pub nights: TextSink,
    pub rate: TextSink,
    pub total: TextSink,
    pub notice: NoticeSink,
}

impl FieldBindings {
    // Resolves every id once; the first absent element aborts the whole binding set
    pub fn resolve(page: &Page, instance: &str, ids: &FieldIds) -> Result<Self> {
        let missing = |field: &'static str, element_id: &str| CalculatorError::MissingBinding {
            instance: instance.to_string(),
            field,
            element_id: element_id.to_string(),
        };

        Ok(Self {
            checkin: page
                .input(&ids.checkin)
                .ok_or_else(|| missing("checkin", &ids.checkin))?,
            checkout: page
                .input(&ids.checkout)
                .ok_or_else(|| missing("checkout", &ids.checkout))?,
            room_type: page
                .input(&ids.room_type)
                .ok_or_else(|| missing("room_type", &ids.room_type))?,
            nights: page
                .text(&ids.nights)
                .ok_or_else(|| missing("nights", &ids.nights))?,
            rate: page
                .text(&ids.rate)
                .ok_or_else(|| missing("rate", &ids.rate))?,
            total: page
                .text(&ids.total)
                .ok_or_else(|| missing("total", &ids.total))?,
            notice: page
                .notice(&ids.notice)
                .ok_or_else(|| missing("notice", &ids.notice))?,
        })
    }
}
