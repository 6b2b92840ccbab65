use crate::app::render::OutputFormat;
use crate::config::toml_config::TomlConfig;
use crate::core::aggregator::DEFAULT_CONCURRENT_READS;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_address, validate_range, validate_required_field, validate_url, Validate,
};
use std::time::Duration;

pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderSettings {
    pub rpc_url: String,
    pub registry_address: String,
    pub bondage_address: String,
    pub concurrent_reads: usize,
    pub call_timeout: Duration,
    pub format: OutputFormat,
}

impl ReaderSettings {
    pub fn from_toml(config: &TomlConfig) -> Result<Self> {
        config.validate()?;

        let format = match &config.output.format {
            Some(format) => format.parse()?,
            None => OutputFormat::default(),
        };

        let settings = Self {
            rpc_url: validate_required_field("network.rpc_url", &config.network.rpc_url)?.clone(),
            registry_address: validate_required_field(
                "network.registry_address",
                &config.network.registry_address,
            )?
            .clone(),
            bondage_address: validate_required_field(
                "network.bondage_address",
                &config.network.bondage_address,
            )?
            .clone(),
            concurrent_reads: config
                .lookup
                .concurrent_reads
                .unwrap_or(DEFAULT_CONCURRENT_READS),
            call_timeout: config
                .lookup
                .call_timeout_seconds
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_CALL_TIMEOUT),
            format,
        };
        settings.validate()?;
        Ok(settings)
    }
}

impl ConfigProvider for ReaderSettings {
    fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    fn registry_address(&self) -> &str {
        &self.registry_address
    }

    fn bondage_address(&self) -> &str {
        &self.bondage_address
    }

    fn concurrent_reads(&self) -> usize {
        self.concurrent_reads
    }

    fn call_timeout(&self) -> Duration {
        self.call_timeout
    }
}

impl Validate for ReaderSettings {
    fn validate(&self) -> Result<()> {
        validate_url("network.rpc_url", &self.rpc_url)?;
        validate_address("network.registry_address", &self.registry_address)?;
        validate_address("network.bondage_address", &self.bondage_address)?;
        validate_range("lookup.concurrent_reads", self.concurrent_reads, 1, 64)?;
        validate_range(
            "lookup.call_timeout_seconds",
            self.call_timeout.as_secs(),
            1,
            600,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::AppError;

    fn network_only() -> TomlConfig {
        TomlConfig::from_toml_str(
            r#"
[network]
rpc_url = "http://127.0.0.1:8545"
registry_address = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
bondage_address = "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_defaults_fill_optional_values() {
        let settings = ReaderSettings::from_toml(&network_only()).unwrap();

        assert_eq!(settings.concurrent_reads, DEFAULT_CONCURRENT_READS);
        assert_eq!(settings.call_timeout(), DEFAULT_CALL_TIMEOUT);
        assert_eq!(settings.format, OutputFormat::Text);
        assert_eq!(settings.rpc_url(), "http://127.0.0.1:8545");
    }

    #[test]
    fn test_explicit_values_are_used() {
        let mut config = network_only();
        config.lookup.concurrent_reads = Some(2);
        config.lookup.call_timeout_seconds = Some(5);
        config.output.format = Some("json".to_string());

        let settings = ReaderSettings::from_toml(&config).unwrap();

        assert_eq!(settings.concurrent_reads(), 2);
        assert_eq!(settings.call_timeout(), Duration::from_secs(5));
        assert_eq!(settings.format, OutputFormat::Json);
    }

    #[test]
    fn test_missing_network_values_are_reported_by_field() {
        let mut config = network_only();
        config.network.bondage_address = None;

        match ReaderSettings::from_toml(&config) {
            Err(AppError::MissingConfigError { field }) => {
                assert_eq!(field, "network.bondage_address")
            }
            other => panic!("expected missing bondage address, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_timeout_is_rejected() {
        let mut config = network_only();
        config.lookup.call_timeout_seconds = Some(0);

        assert!(ReaderSettings::from_toml(&config).is_err());
    }
}
