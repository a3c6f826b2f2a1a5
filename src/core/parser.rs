use crate::config::settings::TierMarkers;
use crate::domain::model::{Offer, RawOfferRecord, Tier};
use crate::utils::error::{Result, ScanError};

/// Turns one raw offer row into an [`Offer`].
#[derive(Debug, Clone, Default)]
pub struct OfferParser {
    markers: TierMarkers,
}

impl OfferParser {
    pub fn new(markers: TierMarkers) -> Self {
        Self { markers }
    }

    pub fn parse(&self, record: &RawOfferRecord) -> Result<Offer> {
        let price = parse_price(record.price.as_deref())?;
        Ok(Offer::new(price, self.tier_of(record)))
    }

    /// The Zero marker is checked first, so a row carrying both is Zero-only.
    pub fn tier_of(&self, record: &RawOfferRecord) -> Tier {
        let markup = record.tier_source();
        if markup.contains(&self.markers.zero) {
            Tier::Zero
        } else if markup.contains(&self.markers.day_one) {
            Tier::DayOne
        } else {
            Tier::None
        }
    }
}

fn parse_price(raw: Option<&str>) -> Result<f64> {
    let malformed = || ScanError::MalformedPriceError {
        value: raw.map(str::to_string),
    };

    let price: f64 = raw
        .map(str::trim)
        .ok_or_else(malformed)?
        .parse()
        .map_err(|_| malformed())?;

    if !price.is_finite() || price < 0.0 {
        return Err(malformed());
    }
    Ok(price)
}
