use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel shown in place of a price that could not be computed.
pub const NOT_AVAILABLE: &str = "N/A";

/// One row of the search results page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardRef {
    pub title: String,
    pub url: String,
    /// First character of the row's listed price, e.g. `€`. Empty when the
    /// row carries no price display.
    pub currency: String,
    pub listed_price: Option<String>,
}

impl CardRef {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            currency: String::new(),
            listed_price: None,
        }
    }

    pub fn with_listed_price(mut self, listed_price: &str) -> Self {
        let trimmed = listed_price.trim();
        self.currency = trimmed.chars().next().map(String::from).unwrap_or_default();
        self.listed_price = Some(trimmed.to_string());
        self
    }
}

/// Owned snapshot of an offer row as it appeared in the detail page markup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawOfferRecord {
    /// Value of the identity attribute. Only presence is significant.
    pub identity: Option<String>,
    /// Raw text of the price attribute.
    pub price: Option<String>,
    /// Inner markup of the tier sub-region, when the row has one.
    pub tier_markup: Option<String>,
    /// Inner markup of the whole row.
    pub markup: String,
}

impl RawOfferRecord {
    pub fn has_identity(&self) -> bool {
        self.identity.is_some()
    }

    /// Markup inspected for tier markers: the sub-region if present, the row otherwise.
    pub fn tier_source(&self) -> &str {
        self.tier_markup.as_deref().unwrap_or(&self.markup)
    }
}

/// Fulfillment tier an offer qualifies for. `DayOne` is a refinement of `Zero`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    #[default]
    None,
    Zero,
    DayOne,
}

impl Tier {
    pub fn is_zero_eligible(self) -> bool {
        matches!(self, Tier::Zero | Tier::DayOne)
    }

    pub fn is_day_one_eligible(self) -> bool {
        matches!(self, Tier::DayOne)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offer {
    pub price: f64,
    pub tier: Tier,
}

impl Offer {
    pub fn new(price: f64, tier: Tier) -> Self {
        Self { price, tier }
    }

    pub fn tier_zero_eligible(&self) -> bool {
        self.tier.is_zero_eligible()
    }

    pub fn tier_day_one_eligible(&self) -> bool {
        self.tier.is_day_one_eligible()
    }
}

/// Minimum prices of one card, overall and per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSummary {
    pub min_any: Option<f64>,
    pub min_zero: Option<f64>,
    pub min_day_one: Option<f64>,
}

impl PriceSummary {
    pub fn is_empty(&self) -> bool {
        self.min_any.is_none() && self.min_zero.is_none() && self.min_day_one.is_none()
    }

    pub fn render(&self, currency: &str) -> RenderedPrices {
        RenderedPrices {
            any: format_price(self.min_any, currency),
            zero: format_price(self.min_zero, currency),
            day_one: format_price(self.min_day_one, currency),
        }
    }
}

pub fn format_price(value: Option<f64>, currency: &str) -> String {
    match value {
        Some(price) => format!("{}{:.2}", currency, price),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Display strings in the order they are presented: overall, Zero, DayOne.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedPrices {
    pub any: String,
    pub zero: String,
    pub day_one: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardReport {
    pub card: CardRef,
    pub summary: PriceSummary,
    pub display: RenderedPrices,
    pub offers_found: usize,
    pub error: Option<String>,
}

impl CardReport {
    pub fn new(card: CardRef, summary: PriceSummary, offers_found: usize) -> Self {
        let display = summary.render(&card.currency);
        Self {
            card,
            summary,
            display,
            offers_found,
            error: None,
        }
    }

    pub fn failed(card: CardRef, error: String) -> Self {
        let mut report = Self::new(card, PriceSummary::default(), 0);
        report.error = Some(error);
        report
    }

    pub fn display_line(&self) -> String {
        format!(
            "{} | any {} | zero {} | 1-day {}",
            self.card.title, self.display.any, self.display.zero, self.display.day_one
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub search_url: String,
    pub generated_at: DateTime<Utc>,
    pub cards: Vec<CardReport>,
}

impl ScanReport {
    pub fn new(search_url: impl Into<String>, cards: Vec<CardReport>) -> Self {
        Self {
            search_url: search_url.into(),
            generated_at: Utc::now(),
            cards,
        }
    }
}
