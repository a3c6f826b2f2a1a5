pub mod aggregator;
pub mod engine;
pub mod parser;
pub mod pipeline;
pub mod poller;
pub mod processor;

pub use crate::domain::model::{CardRef, CardReport, Offer, PriceSummary, RawOfferRecord, ScanReport, Tier};
pub use crate::domain::ports::{ConfigProvider, DetailLoader, DetailView, Pipeline, Storage};
pub use crate::utils::error::Result;
