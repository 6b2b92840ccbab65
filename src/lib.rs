pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

#[cfg(feature = "rpc")]
pub use adapters::registry::ContractRegistryReader;

pub use app::render::OutputFormat;
pub use config::settings::ReaderSettings;
pub use core::{aggregator::ProviderReportAggregator, lookup::ProviderLookup};
pub use domain::model::{EndpointReport, ProviderIdentity, ProviderReport, ReportOutcome};
pub use domain::ports::RegistryReader;
pub use utils::error::{AppError, ReportError, Result};
