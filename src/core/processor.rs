use crate::config::settings::ScanSettings;
use crate::core::aggregator::PriceAggregator;
use crate::core::parser::OfferParser;
use crate::core::poller::OfferPoller;
use crate::domain::model::{CardRef, CardReport};
use crate::domain::ports::{DetailLoader, DetailView};
use tracing::Instrument;

/// Runs one card through fetch, aggregate and release.
///
/// Failures stay inside the returned [`CardReport`]; a card never fails the run.
pub struct CardProcessor<L: DetailLoader> {
    loader: L,
    poller: OfferPoller,
    aggregator: PriceAggregator,
}

impl<L: DetailLoader> CardProcessor<L> {
    pub fn new(loader: L, settings: &ScanSettings) -> Self {
        Self {
            loader,
            poller: OfferPoller::new(settings.polling),
            aggregator: PriceAggregator::new(
                OfferParser::new(settings.markers.clone()),
                settings.aggregation,
            ),
        }
    }

    pub async fn process(&self, card: CardRef) -> CardReport {
        let span = tracing::info_span!("card", url = %card.url);
        async move {
            let view = match self.loader.open(&card).await {
                Ok(view) => view,
                Err(e) => {
                    tracing::warn!("Could not open detail page: {}", e);
                    return CardReport::failed(card, e.to_string());
                }
            };

            let records = self.poller.poll(&view).await;
            let summary = self.aggregator.aggregate(&records);
            view.release();

            tracing::debug!(
                "{} offer rows -> any {:?}, zero {:?}, 1-day {:?}",
                records.len(),
                summary.min_any,
                summary.min_zero,
                summary.min_day_one
            );
            CardReport::new(card, summary, records.len())
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::PollingSettings;
    use crate::domain::model::{RawOfferRecord, NOT_AVAILABLE};
    use crate::utils::error::{Result, ScanError};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct Counters {
        opened: AtomicUsize,
        released: AtomicUsize,
    }

    struct FakeLoader {
        pages: HashMap<String, Vec<RawOfferRecord>>,
        counters: Arc<Counters>,
    }

    struct FakeView {
        rows: Vec<RawOfferRecord>,
        counters: Arc<Counters>,
    }

    #[async_trait]
    impl DetailLoader for FakeLoader {
        type View = FakeView;

        async fn open(&self, card: &CardRef) -> Result<FakeView> {
            let rows = self
                .pages
                .get(&card.url)
                .cloned()
                .ok_or_else(|| ScanError::HttpStatusError {
                    status: 404,
                    url: card.url.clone(),
                })?;
            self.counters.opened.fetch_add(1, Ordering::SeqCst);
            Ok(FakeView {
                rows,
                counters: self.counters.clone(),
            })
        }
    }

    #[async_trait]
    impl DetailView for FakeView {
        async fn offer_rows(&self) -> Result<Vec<RawOfferRecord>> {
            Ok(self.rows.clone())
        }

        fn release(self) {
            self.counters.released.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn settings() -> ScanSettings {
        ScanSettings {
            polling: PollingSettings {
                interval_ms: 1,
                max_retries: 2,
            },
            ..Default::default()
        }
    }

    fn offer(id: &str, price: &str, tier_markup: &str) -> RawOfferRecord {
        RawOfferRecord {
            identity: Some(id.to_string()),
            price: Some(price.to_string()),
            tier_markup: Some(tier_markup.to_string()),
            markup: String::new(),
        }
    }

    #[tokio::test]
    async fn test_process_releases_view_on_every_path() {
        let counters = Arc::new(Counters::default());
        let mut pages = HashMap::new();
        pages.insert(
            "https://example.com/cards/early".to_string(),
            vec![
                offer("a", "3.00", "btn-secondary"),
                offer("b", "2.50", "btn-success"),
            ],
        );
        pages.insert("https://example.com/cards/empty".to_string(), Vec::new());
        let processor = CardProcessor::new(
            FakeLoader {
                pages,
                counters: counters.clone(),
            },
            &settings(),
        );

        let early = processor
            .process(
                CardRef::new("Early", "https://example.com/cards/early").with_listed_price("€9.99"),
            )
            .await;
        assert_eq!(early.summary.min_zero, Some(3.0));
        assert_eq!(early.summary.min_day_one, None);
        assert_eq!(early.display.zero, "€3.00");
        assert_eq!(early.display.day_one, NOT_AVAILABLE);

        let empty = processor
            .process(CardRef::new("Empty", "https://example.com/cards/empty"))
            .await;
        assert!(empty.summary.is_empty());
        assert_eq!(empty.offers_found, 0);
        assert!(empty.error.is_none());

        assert_eq!(counters.opened.load(Ordering::SeqCst), 2);
        assert_eq!(counters.released.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_open_failure_is_isolated() {
        let counters = Arc::new(Counters::default());
        let processor = CardProcessor::new(
            FakeLoader {
                pages: HashMap::new(),
                counters: counters.clone(),
            },
            &settings(),
        );

        let report = processor
            .process(CardRef::new("Missing", "https://example.com/cards/missing"))
            .await;
        assert!(report.summary.is_empty());
        assert!(report.error.as_deref().unwrap_or_default().contains("404"));
        assert_eq!(counters.released.load(Ordering::SeqCst), 0);
    }
}
