// Calculator configuration: timings and fixed display texts

use crate::error::Result;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_NOTICE_MESSAGE: &str = "Please choose valid dates and a room type.";
pub const DEFAULT_REJECTION_MESSAGE: &str =
    "Please choose valid check-in/check-out dates and a room type before booking.";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub notice_delay_ms: u64,
    pub init_delay_ms: u64,
    pub notice_message: String,
    pub rejection_message: String,
    pub currency_symbol: String,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            notice_delay_ms: 2200,
            init_delay_ms: 50,
            notice_message: DEFAULT_NOTICE_MESSAGE.to_string(),
            rejection_message: DEFAULT_REJECTION_MESSAGE.to_string(),
            currency_symbol: "₦".to_string(),
        }
    }
}

impl CalculatorConfig {
    // Missing keys fall back to the defaults above
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn notice_delay(&self) -> Duration {
        Duration::from_millis(self.notice_delay_ms)
    }

    pub fn init_delay(&self) -> Duration {
        Duration::from_millis(self.init_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timings() {
        let config = CalculatorConfig::default();
        assert_eq!(config.notice_delay(), Duration::from_millis(2200));
        assert_eq!(config.currency_symbol, "₦");
        assert_eq!(config.notice_message, DEFAULT_NOTICE_MESSAGE);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = CalculatorConfig::from_json(r#"{"notice_delay_ms": 500}"#).unwrap();
        assert_eq!(config.notice_delay_ms, 500);
        assert_eq!(config.init_delay_ms, 50);
        assert_eq!(config.currency_symbol, "₦");
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let result = CalculatorConfig::from_json("{not json");
        assert!(matches!(
            result,
            Err(crate::error::CalculatorError::Config(_))
        ));
    }
}
