use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_selector, Validate,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_MAX_RETRIES: u32 = 10;
const MAX_RETRIES_CEILING: u32 = 120;

/// Everything the per-card processing needs to know about the marketplace markup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    pub selectors: SelectorSettings,
    pub markers: TierMarkers,
    pub polling: PollingSettings,
    pub aggregation: AggregationSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorSettings {
    pub search_card: String,
    pub card_price: String,
    pub card_title: String,
    pub offer_row: String,
    pub tier_region: String,
    pub identity_attribute: String,
    pub price_attribute: String,
}

impl Default for SelectorSettings {
    fn default() -> Self {
        Self {
            search_card: ".blueprint-search-card".to_string(),
            card_price: ".blueprint-search-card__price".to_string(),
            card_title: ".blueprint-search-card__title".to_string(),
            offer_row: ".products-table>table>tbody>tr".to_string(),
            tier_region: ".products-table__zero".to_string(),
            identity_attribute: "id".to_string(),
            price_attribute: "gtm-price".to_string(),
        }
    }
}

/// Tokens whose presence in an offer's tier markup marks it Zero or DayOne.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierMarkers {
    pub zero: String,
    pub day_one: String,
}

impl Default for TierMarkers {
    fn default() -> Self {
        Self {
            zero: "btn-secondary".to_string(),
            day_one: "btn-success".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingSettings {
    pub interval_ms: u64,
    pub max_retries: u32,
}

impl PollingSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationSettings {
    /// Stop scanning a card's offers at the first Zero offer that is not DayOne.
    /// Only correct when the marketplace lists offers by ascending price.
    pub stop_at_plain_zero: bool,
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self {
            stop_at_plain_zero: true,
        }
    }
}

impl Validate for ScanSettings {
    fn validate(&self) -> Result<()> {
        validate_selector("selectors.search_card", &self.selectors.search_card)?;
        validate_selector("selectors.card_price", &self.selectors.card_price)?;
        validate_selector("selectors.card_title", &self.selectors.card_title)?;
        validate_selector("selectors.offer_row", &self.selectors.offer_row)?;
        validate_selector("selectors.tier_region", &self.selectors.tier_region)?;
        validate_non_empty_string(
            "selectors.identity_attribute",
            &self.selectors.identity_attribute,
        )?;
        validate_non_empty_string("selectors.price_attribute", &self.selectors.price_attribute)?;

        validate_non_empty_string("markers.zero", &self.markers.zero)?;
        validate_non_empty_string("markers.day_one", &self.markers.day_one)?;

        validate_range("polling.max_retries", self.polling.max_retries, 0, MAX_RETRIES_CEILING)?;
        validate_range("polling.interval_ms", self.polling.interval_ms, 0, 60_000)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = ScanSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.polling.interval(), Duration::from_secs(1));
        assert_eq!(settings.polling.max_retries, 10);
        assert!(settings.aggregation.stop_at_plain_zero);
    }

    #[test]
    fn test_empty_marker_rejected() {
        let mut settings = ScanSettings::default();
        settings.markers.day_one = String::new();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_retry_ceiling() {
        let mut settings = ScanSettings::default();
        settings.polling.max_retries = 1000;
        assert!(settings.validate().is_err());
    }
}
