use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct ScanEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ScanEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting price scan");

        // Extract
        let cards = self.pipeline.extract().await?;
        tracing::info!("Found {} cards on the search page", cards.len());

        // Transform
        let report = self.pipeline.transform(cards).await?;
        let priced = report
            .cards
            .iter()
            .filter(|card| card.summary.min_any.is_some())
            .count();
        tracing::info!("Priced {}/{} cards", priced, report.cards.len());

        // Load
        let output = self.pipeline.load(report).await?;
        tracing::info!("Report saved to {} in {:?}", output, started.elapsed());

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CardRef, CardReport, PriceSummary, ScanReport};
    use crate::utils::error::ScanError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingPipeline {
        fail_extract: bool,
        phases: Mutex<Vec<&'static str>>,
    }

    impl RecordingPipeline {
        fn new(fail_extract: bool) -> Self {
            Self {
                fail_extract,
                phases: Mutex::new(Vec::new()),
            }
        }

        fn record(&self, phase: &'static str) {
            self.phases.lock().unwrap().push(phase);
        }
    }

    #[async_trait]
    impl Pipeline for RecordingPipeline {
        async fn extract(&self) -> Result<Vec<CardRef>> {
            self.record("extract");
            if self.fail_extract {
                return Err(ScanError::HttpStatusError {
                    status: 500,
                    url: "https://example.com/search".to_string(),
                });
            }
            Ok(vec![CardRef::new("Bolt", "https://example.com/cards/1")])
        }

        async fn transform(&self, cards: Vec<CardRef>) -> Result<ScanReport> {
            self.record("transform");
            let reports = cards
                .into_iter()
                .map(|card| CardReport::new(card, PriceSummary::default(), 0))
                .collect();
            Ok(ScanReport::new("https://example.com/search", reports))
        }

        async fn load(&self, report: ScanReport) -> Result<String> {
            self.record("load");
            Ok(format!("{} cards", report.cards.len()))
        }
    }

    #[tokio::test]
    async fn test_runs_phases_in_order() {
        let engine = ScanEngine::new(RecordingPipeline::new(false));
        let output = engine.run().await.unwrap();

        assert_eq!(output, "1 cards");
        assert_eq!(
            *engine.pipeline.phases.lock().unwrap(),
            vec!["extract", "transform", "load"]
        );
    }

    #[tokio::test]
    async fn test_search_failure_stops_run() {
        let engine = ScanEngine::new(RecordingPipeline::new(true));
        assert!(engine.run().await.is_err());
        assert_eq!(*engine.pipeline.phases.lock().unwrap(), vec!["extract"]);
    }
}
