pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::storage::LocalStorage;
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::{
    aggregator::PriceAggregator, engine::ScanEngine, parser::OfferParser, pipeline::SearchPipeline,
    poller::OfferPoller, processor::CardProcessor,
};
pub use crate::domain::model::{
    CardRef, CardReport, Offer, PriceSummary, RawOfferRecord, ScanReport, Tier,
};
pub use crate::utils::error::{Result, ScanError};
