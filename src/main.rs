use alloy::providers::{Provider, ProviderBuilder};
use anyhow::Context;
use clap::Parser;
use registry_report::app::render::render;
use registry_report::core::lookup::exit_code;
use registry_report::domain::ports::ConfigProvider;
use registry_report::utils::{logger, validation::Validate};
use registry_report::{
    CliConfig, ContractRegistryReader, ProviderLookup, ProviderReportAggregator, ReaderSettings,
};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting registry-report");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let settings = match config.validate().and_then(|_| config.resolve()) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(e.exit_code());
        }
    };

    let reader = match build_reader(&settings) {
        Ok(reader) => reader,
        Err(e) => {
            tracing::error!("❌ Could not set up the registry reader: {:#}", e);
            eprintln!("❌ {:#}", e);
            std::process::exit(2);
        }
    };

    let aggregator =
        ProviderReportAggregator::new(reader).with_concurrent_reads(settings.concurrent_reads());
    let lookup = ProviderLookup::new(aggregator);

    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_err() {
            // Without a signal handler the lookup just runs to completion.
            std::future::pending::<()>().await;
        }
    };
    let entries = lookup.run_until(&config.addresses, shutdown).await;

    match render(&entries, settings.format) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            tracing::error!("❌ Could not render results: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(e.exit_code());
        }
    }

    std::process::exit(exit_code(&entries));
}

fn build_reader(settings: &ReaderSettings) -> anyhow::Result<ContractRegistryReader> {
    let url = settings
        .rpc_url()
        .parse()
        .with_context(|| format!("invalid rpc url {}", settings.rpc_url()))?;
    let provider = ProviderBuilder::new().connect_http(url).erased();

    let registry = settings
        .registry_address()
        .parse()
        .context("invalid registry address")?;
    let bondage = settings
        .bondage_address()
        .parse()
        .context("invalid bondage address")?;

    Ok(ContractRegistryReader::new(provider, registry, bondage)
        .with_call_timeout(settings.call_timeout()))
}
