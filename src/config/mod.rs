pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::app::render::OutputFormat;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_address, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use settings::ReaderSettings;
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "registry-report")]
#[command(about = "Show what a provider account has published in the on-chain registry")]
pub struct CliConfig {
    /// Provider account(s) to look up
    #[arg(long = "address", value_delimiter = ',', required = true)]
    pub addresses: Vec<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub rpc_url: Option<String>,

    #[arg(long)]
    pub registry_address: Option<String>,

    #[arg(long)]
    pub bondage_address: Option<String>,

    /// Parameters or endpoints resolved at once
    #[arg(long)]
    pub concurrent_reads: Option<usize>,

    #[arg(long)]
    pub call_timeout_seconds: Option<u64>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the config file (if any) and lays the command line over it.
    pub fn resolve(&self) -> Result<ReaderSettings> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(url) = &self.rpc_url {
            config.network.rpc_url = Some(url.clone());
        }
        if let Some(address) = &self.registry_address {
            config.network.registry_address = Some(address.clone());
        }
        if let Some(address) = &self.bondage_address {
            config.network.bondage_address = Some(address.clone());
        }
        if let Some(reads) = self.concurrent_reads {
            config.lookup.concurrent_reads = Some(reads);
        }
        if let Some(secs) = self.call_timeout_seconds {
            config.lookup.call_timeout_seconds = Some(secs);
        }
        if let Some(format) = self.format {
            config.output.format = Some(format.as_str().to_string());
        }

        ReaderSettings::from_toml(&config)
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        for address in &self.addresses {
            validate_address("address", address)?;
        }
        Ok(())
    }
}
