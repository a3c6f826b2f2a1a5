use clap::Parser;
use ctzero_scan::core::ConfigProvider;
use ctzero_scan::utils::{logger, validation::Validate};
use ctzero_scan::{LocalStorage, ScanEngine, SearchPipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-scan")]
#[command(about = "Price scan driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "ctzero-scan.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    json_logs: bool,

    /// Override the search page from the config
    #[arg(long)]
    search_url: Option<String>,

    /// Show the effective configuration without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based price scan");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(search_url) = &args.search_url {
        config.source.search_url = search_url.clone();
        tracing::info!("🔧 Search URL overridden to: {}", search_url);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be fetched");
        return Ok(());
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = SearchPipeline::new(storage, config)?;
    let engine = ScanEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Scan completed");
            println!("📁 Report saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!("❌ Scan failed: {} (Severity: {:?})", e, e.severity());
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());

            let exit_code = e.severity().exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    let settings = config.settings();

    println!("📋 Configuration Summary:");
    println!("  Search page: {}", config.search_url());
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output_formats().join(", "));
    println!("  Concurrent Requests: {}", config.concurrent_requests());
    println!(
        "  Polling: every {:?}, up to {} retries",
        settings.polling.interval(),
        settings.polling.max_retries
    );
    println!(
        "  Stop at first Zero-only offer: {}",
        settings.aggregation.stop_at_plain_zero
    );
    println!("  Offer rows: {}", settings.selectors.offer_row);
    println!(
        "  Markers: zero={:?} 1-day={:?}",
        settings.markers.zero, settings.markers.day_one
    );

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
