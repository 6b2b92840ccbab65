pub mod aggregator;
pub mod lookup;

pub use crate::domain::model::{
    EndpointReport, ParameterSet, ProviderIdentity, ProviderReport, ReportOutcome,
};
pub use crate::domain::ports::{ConfigProvider, RegistryReader};
pub use crate::utils::error::{ReportError, Result};
