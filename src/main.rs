use clap::Parser;
use ctzero_scan::core::ConfigProvider;
use ctzero_scan::utils::{logger, validation::Validate};
use ctzero_scan::{CliConfig, LocalStorage, ScanEngine, SearchPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting ctzero-scan CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
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
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = e.severity().exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
