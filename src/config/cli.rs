use crate::config::settings::{ScanSettings, DEFAULT_MAX_RETRIES, DEFAULT_POLL_INTERVAL_MS};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_output_formats, validate_path, validate_positive_number, validate_url, Validate,
};
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "ctzero-scan")]
#[command(about = "Minimum overall, CT Zero and 1-Day prices for every card of a search page")]
pub struct CliConfig {
    /// Search results or versions page to scan
    #[arg(long)]
    pub search_url: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "json")]
    pub output_formats: Vec<String>,

    #[arg(long, default_value = "4")]
    pub concurrent_requests: usize,

    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL_MS)]
    pub poll_interval_ms: u64,

    #[arg(long, default_value_t = DEFAULT_MAX_RETRIES)]
    pub max_poll_retries: u32,

    #[arg(long, default_value = "30")]
    pub timeout_seconds: u64,

    /// Read every offer row instead of stopping at the first CT Zero offer
    /// without 1-Day delivery
    #[arg(long)]
    pub full_scan: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn search_url(&self) -> &str {
        &self.search_url
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.output_formats
    }

    fn concurrent_requests(&self) -> usize {
        self.concurrent_requests
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn settings(&self) -> ScanSettings {
        let mut settings = ScanSettings::default();
        settings.polling.interval_ms = self.poll_interval_ms;
        settings.polling.max_retries = self.max_poll_retries;
        settings.aggregation.stop_at_plain_zero = !self.full_scan;
        settings
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("search_url", &self.search_url)?;
        validate_path("output_path", &self.output_path)?;
        validate_output_formats("output_formats", &self.output_formats)?;
        validate_positive_number("concurrent_requests", self.concurrent_requests, 1)?;
        validate_positive_number("timeout_seconds", self.timeout_seconds as usize, 1)?;
        self.settings().validate()
    }
}
