use crate::adapters::http::{build_client, fetch_page, HttpDetailLoader};
use crate::adapters::markup;
use crate::adapters::report::ReportWriter;
use crate::config::settings::ScanSettings;
use crate::core::processor::CardProcessor;
use crate::core::{CardRef, ConfigProvider, DetailLoader, Pipeline, ScanReport, Storage};
use crate::utils::error::Result;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use url::Url;

/// Search page -> per-card minimum prices -> report files.
pub struct SearchPipeline<S: Storage, C: ConfigProvider, L: DetailLoader = HttpDetailLoader> {
    storage: S,
    config: C,
    settings: ScanSettings,
    client: Client,
    processor: CardProcessor<L>,
}

impl<S: Storage, C: ConfigProvider> SearchPipeline<S, C, HttpDetailLoader> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let client = build_client(config.request_timeout())?;
        let loader = HttpDetailLoader::new(client.clone(), config.settings().selectors);
        Ok(Self::with_loader(storage, config, client, loader))
    }
}

impl<S: Storage, C: ConfigProvider, L: DetailLoader> SearchPipeline<S, C, L> {
    pub fn with_loader(storage: S, config: C, client: Client, loader: L) -> Self {
        let settings = config.settings();
        Self {
            processor: CardProcessor::new(loader, &settings),
            storage,
            config,
            settings,
            client,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, L: DetailLoader> Pipeline for SearchPipeline<S, C, L> {
    async fn extract(&self) -> Result<Vec<CardRef>> {
        let search_url = Url::parse(self.config.search_url())?;
        let html = fetch_page(&self.client, search_url.as_str()).await?;
        let cards = markup::extract_search_cards(&html, &search_url, &self.settings.selectors)?;

        if cards.is_empty() {
            tracing::warn!("No card rows matched `{}`", self.settings.selectors.search_card);
        }
        Ok(cards)
    }

    async fn transform(&self, cards: Vec<CardRef>) -> Result<ScanReport> {
        let processor = &self.processor;
        let concurrency = self.config.concurrent_requests().max(1);

        let reports = stream::iter(cards)
            .map(move |card| processor.process(card))
            .buffered(concurrency)
            .collect::<Vec<_>>()
            .await;

        Ok(ScanReport::new(self.config.search_url(), reports))
    }

    async fn load(&self, report: ScanReport) -> Result<String> {
        for card in &report.cards {
            match &card.error {
                Some(error) => tracing::warn!("{} ({})", card.display_line(), error),
                None => tracing::info!("{}", card.display_line()),
            }
            println!("{}", card.display_line());
        }

        let files = ReportWriter::render(&report, self.config.output_formats())?;
        let mut written = Vec::with_capacity(files.len());
        for (name, data) in files {
            tracing::debug!("Writing {} ({} bytes)", name, data.len());
            written.push(self.storage.write_file(name, &data).await?);
        }

        if written.is_empty() {
            Ok(self.config.output_path().to_string())
        } else {
            Ok(written.join(", "))
        }
    }
}
