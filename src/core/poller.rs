use crate::config::settings::PollingSettings;
use crate::domain::model::RawOfferRecord;
use crate::domain::ports::DetailView;
use std::time::Duration;

/// Reads offer rows from a detail view that may still be loading.
///
/// Waits one interval before every check and gives up after `max_retries`
/// further checks, so a view that never fills is queried `max_retries + 1`
/// times. There is no backoff growth and no jitter.
#[derive(Debug, Clone, Copy)]
pub struct OfferPoller {
    interval: Duration,
    max_retries: u32,
}

impl Default for OfferPoller {
    fn default() -> Self {
        Self::new(PollingSettings::default())
    }
}

impl OfferPoller {
    pub fn new(settings: PollingSettings) -> Self {
        Self {
            interval: settings.interval(),
            max_retries: settings.max_retries,
        }
    }

    /// Returns the first non-empty set of rows, or an empty set once retries run out.
    pub async fn poll<V: DetailView>(&self, view: &V) -> Vec<RawOfferRecord> {
        let mut remaining = self.max_retries;

        loop {
            tokio::time::sleep(self.interval).await;

            let rows = match view.offer_rows().await {
                Ok(rows) => rows,
                Err(e) => {
                    tracing::warn!("Offer query failed ({} retries left): {}", remaining, e);
                    Vec::new()
                }
            };

            if !rows.is_empty() {
                tracing::debug!("Found {} offer rows", rows.len());
                return rows;
            }
            if remaining == 0 {
                tracing::debug!("No offer rows after {} checks", self.max_retries + 1);
                return rows;
            }

            tracing::trace!("No offer rows yet, {} retries left", remaining);
            remaining -= 1;
        }
    }
}
