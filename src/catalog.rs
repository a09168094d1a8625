// Room catalog: the fixed room-type to nightly-rate mapping shared by every calculator instance

use crate::error::Result;
use std::collections::HashMap;

// Reference rates in whole Naira
pub const STANDARD_RATE: u64 = 85_000;
pub const DELUXE_RATE: u64 = 120_000;
pub const EXECUTIVE_RATE: u64 = 180_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomCatalog {
    rates: HashMap<String, u64>,
}

impl Default for RoomCatalog {
    fn default() -> Self {
        Self::from_rates([
            ("standard", STANDARD_RATE),
            ("deluxe", DELUXE_RATE),
            ("executive", EXECUTIVE_RATE),
        ])
    }
}

impl RoomCatalog {
    pub fn from_rates<K, I>(rates: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, u64)>,
    {
        Self {
            rates: rates.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    // Expects a flat object such as {"standard": 85000, "deluxe": 120000}
    pub fn from_json(json: &str) -> Result<Self> {
        let rates: HashMap<String, u64> = serde_json::from_str(json)?;
        Ok(Self { rates })
    }

    pub fn lookup(&self, room_type: &str) -> Option<u64> {
        self.rates.get(room_type).copied()
    }

    pub fn contains(&self, room_type: &str) -> bool {
        self.rates.contains_key(room_type)
    }

    pub fn room_types(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("standard", Some(85_000); "standard room")]
    #[test_case("deluxe", Some(120_000); "deluxe room")]
    #[test_case("executive", Some(180_000); "executive room")]
    #[test_case("penthouse", None; "unknown room")]
    #[test_case("", None; "empty key")]
    fn test_reference_catalog_lookup(room_type: &str, expected: Option<u64>) {
        let catalog = RoomCatalog::default();
        assert_eq!(catalog.lookup(room_type), expected);
    }

    #[test]
    fn test_reference_catalog_has_three_entries() {
        let catalog = RoomCatalog::default();
        assert_eq!(catalog.len(), 3);
        let mut keys: Vec<&str> = catalog.room_types().collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["deluxe", "executive", "standard"]);
    }

    #[test]
    fn test_catalog_from_json() {
        let catalog = RoomCatalog::from_json(r#"{"suite": 250000, "twin": 60000}"#).unwrap();
        assert_eq!(catalog.lookup("suite"), Some(250_000));
        assert!(catalog.contains("twin"));
        assert!(!catalog.contains("standard"));
    }

    #[test]
    fn test_catalog_rejects_negative_rates() {
        assert!(RoomCatalog::from_json(r#"{"standard": -5}"#).is_err());
    }
}
