use crate::config::settings::AggregationSettings;
use crate::core::parser::OfferParser;
use crate::domain::model::{PriceSummary, RawOfferRecord};

/// Folds a card's offer rows into its three minimum prices in one pass.
///
/// Rows without the identity attribute are layout rows and are ignored, as are
/// rows whose price cannot be read. With `stop_at_plain_zero` set, the pass ends
/// at the first offer that is Zero but not DayOne: on a listing sorted by
/// ascending price nothing after it can lower any of the three minimums.
#[derive(Debug, Clone)]
pub struct PriceAggregator {
    parser: OfferParser,
    stop_at_plain_zero: bool,
}

impl Default for PriceAggregator {
    fn default() -> Self {
        Self::new(OfferParser::default(), AggregationSettings::default())
    }
}

impl PriceAggregator {
    pub fn new(parser: OfferParser, settings: AggregationSettings) -> Self {
        Self {
            parser,
            stop_at_plain_zero: settings.stop_at_plain_zero,
        }
    }

    pub fn aggregate<'a, I>(&self, records: I) -> PriceSummary
    where
        I: IntoIterator<Item = &'a RawOfferRecord>,
    {
        let mut summary = PriceSummary::default();

        for (index, record) in records.into_iter().enumerate() {
            if !record.has_identity() {
                continue;
            }

            let offer = match self.parser.parse(record) {
                Ok(offer) => offer,
                Err(e) => {
                    tracing::debug!("Skipping offer row {}: {}", index, e);
                    continue;
                }
            };

            fold_min(&mut summary.min_any, offer.price);
            if offer.tier_zero_eligible() {
                fold_min(&mut summary.min_zero, offer.price);
                if offer.tier_day_one_eligible() {
                    fold_min(&mut summary.min_day_one, offer.price);
                }
            }

            if self.stop_at_plain_zero && offer.tier_zero_eligible() && !offer.tier_day_one_eligible()
            {
                tracing::debug!("Zero-only offer at row {}, stopping scan", index);
                break;
            }
        }

        summary
    }
}

fn fold_min(current: &mut Option<f64>, price: f64) {
    *current = Some(current.map_or(price, |min| min.min(price)));
}
