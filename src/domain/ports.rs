use crate::config::settings::ScanSettings;
use crate::domain::model::{CardRef, RawOfferRecord, ScanReport};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    /// Writes `data` under `path` and returns the location it was written to.
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn search_url(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn concurrent_requests(&self) -> usize;
    fn request_timeout(&self) -> Duration;
    fn settings(&self) -> ScanSettings;
}

/// Opens the background view of a card's detail page.
#[async_trait]
pub trait DetailLoader: Send + Sync {
    type View: DetailView;

    async fn open(&self, card: &CardRef) -> Result<Self::View>;
}

/// A detail page that may still be loading. Each call reads the offer rows
/// currently present.
#[async_trait]
pub trait DetailView: Send + Sync {
    async fn offer_rows(&self) -> Result<Vec<RawOfferRecord>>;

    /// Tears the view down. Called exactly once per card run.
    fn release(self)
    where
        Self: Sized;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<CardRef>>;
    async fn transform(&self, cards: Vec<CardRef>) -> Result<ScanReport>;
    async fn load(&self, report: ScanReport) -> Result<String>;
}
