use crate::utils::error::{AppError, Result};
use crate::utils::validation::{validate_address, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub lookup: LookupConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub rpc_url: Option<String>,
    pub registry_address: Option<String>,
    pub bondage_address: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LookupConfig {
    pub concurrent_reads: Option<usize>,
    pub call_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// `text` or `json`.
    pub format: Option<String>,
}

impl TomlConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AppError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AppError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` references with environment values. Unset variables
    /// are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| AppError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Checks only the values that are present; required values are enforced
    /// once the file is merged with the command line.
    pub fn validate_config(&self) -> Result<()> {
        if let Some(url) = &self.network.rpc_url {
            validate_url("network.rpc_url", url)?;
        }
        if let Some(address) = &self.network.registry_address {
            validate_address("network.registry_address", address)?;
        }
        if let Some(address) = &self.network.bondage_address {
            validate_address("network.bondage_address", address)?;
        }
        if let Some(reads) = self.lookup.concurrent_reads {
            validate_range("lookup.concurrent_reads", reads, 1, 64)?;
        }
        if let Some(secs) = self.lookup.call_timeout_seconds {
            validate_range("lookup.call_timeout_seconds", secs, 1, 600)?;
        }
        if let Some(format) = &self.output.format {
            if !["text", "json"].contains(&format.as_str()) {
                return Err(AppError::InvalidConfigValueError {
                    field: "output.format".to_string(),
                    value: format.clone(),
                    reason: "Unsupported format. Valid formats: text, json".to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
