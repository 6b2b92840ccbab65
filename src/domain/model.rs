use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Decoded parameter name to decoded value, in registry order.
pub type ParameterSet = IndexMap<String, String>;

/// Endpoint name to its report, in registry order.
pub type EndpointMap = IndexMap<String, EndpointReport>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderIdentity {
    pub account: String,
    pub owner: String,
    pub title: String,
    pub pubkey: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointReport {
    /// Bonding curve exactly as the registry returned it.
    pub curve: serde_json::Value,
    pub bound: serde_json::Value,
    pub params: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderReport {
    pub identity: ProviderIdentity,
    pub params: ParameterSet,
    pub endpoints: EndpointMap,
}

/// Successful result of a report build.
///
/// An empty title is the registry's way of saying nothing was published for
/// the account, so it is an outcome here and not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    Registered(ProviderReport),
    NotRegistered { account: String, owner: String },
}

impl ReportOutcome {
    pub fn is_registered(&self) -> bool {
        matches!(self, ReportOutcome::Registered(_))
    }

    pub fn into_report(self) -> Option<ProviderReport> {
        match self {
            ReportOutcome::Registered(report) => Some(report),
            ReportOutcome::NotRegistered { .. } => None,
        }
    }
}
