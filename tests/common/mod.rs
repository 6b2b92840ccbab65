use async_trait::async_trait;
use registry_report::utils::error::{ReadResult, RemoteCallError};
use registry_report::utils::hex_text::encode_hex_text;
use registry_report::RegistryReader;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default, Clone)]
pub struct Listing {
    pub title: String,
    pub pubkey: String,
    pub params: Vec<(String, String)>,
    pub endpoints: Vec<EndpointListing>,
}

#[derive(Default, Clone)]
pub struct EndpointListing {
    pub name: String,
    pub curve: serde_json::Value,
    pub bound: serde_json::Value,
    pub params: Vec<String>,
}

/// Registry held in memory, keyed by account. Unknown accounts read as unset
/// slots, the way the contract answers for them.
#[derive(Default)]
pub struct InMemoryRegistry {
    listings: HashMap<String, Listing>,
    broken_endpoint: Option<String>,
    reads: AtomicUsize,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listing(mut self, account: &str, listing: Listing) -> Self {
        self.listings.insert(account.to_string(), listing);
        self
    }

    /// Every bound read for `endpoint` fails.
    pub fn with_broken_endpoint(mut self, endpoint: &str) -> Self {
        self.broken_endpoint = Some(endpoint.to_string());
        self
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn listing(&self, account: &str) -> Listing {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.listings.get(account).cloned().unwrap_or_default()
    }

    fn endpoint(&self, account: &str, endpoint: &str) -> Option<EndpointListing> {
        self.listing(account)
            .endpoints
            .into_iter()
            .find(|e| e.name == endpoint)
    }
}

#[async_trait]
impl RegistryReader for InMemoryRegistry {
    async fn get_owner(&self, account: &str) -> ReadResult<String> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(account.to_string())
    }

    async fn get_title(&self, account: &str) -> ReadResult<String> {
        Ok(self.listing(account).title)
    }

    async fn get_pubkey(&self, account: &str) -> ReadResult<String> {
        Ok(self.listing(account).pubkey)
    }

    async fn get_all_param_names(&self, account: &str) -> ReadResult<Vec<String>> {
        Ok(self
            .listing(account)
            .params
            .iter()
            .map(|(name, _)| encode_hex_text(name))
            .collect())
    }

    async fn get_param_value(&self, account: &str, name: &str) -> ReadResult<String> {
        let value = self
            .listing(account)
            .params
            .into_iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
            .unwrap_or_default();
        Ok(encode_hex_text(&value))
    }

    async fn get_endpoint_names(&self, account: &str) -> ReadResult<Vec<String>> {
        Ok(self
            .listing(account)
            .endpoints
            .into_iter()
            .map(|e| e.name)
            .collect())
    }

    async fn get_curve(&self, account: &str, endpoint: &str) -> ReadResult<serde_json::Value> {
        Ok(self
            .endpoint(account, endpoint)
            .map(|e| e.curve)
            .unwrap_or(json!([])))
    }

    async fn get_bound(&self, account: &str, endpoint: &str) -> ReadResult<serde_json::Value> {
        if self.broken_endpoint.as_deref() == Some(endpoint) {
            return Err(RemoteCallError::Contract("execution reverted".to_string()));
        }
        Ok(self
            .endpoint(account, endpoint)
            .map(|e| e.bound)
            .unwrap_or(json!(0)))
    }

    async fn get_endpoint_params(&self, account: &str, endpoint: &str) -> ReadResult<Vec<String>> {
        Ok(self
            .endpoint(account, endpoint)
            .map(|e| e.params.iter().map(|p| encode_hex_text(p)).collect())
            .unwrap_or_default())
    }
}

pub fn weather_listing() -> Listing {
    Listing {
        title: "Weather".to_string(),
        pubkey: "111".to_string(),
        params: vec![("region".to_string(), "US".to_string())],
        endpoints: vec![EndpointListing {
            name: "hourly".to_string(),
            curve: json!(["3", "0", "0", "2", "1000"]),
            bound: json!(100),
            params: vec!["unit".to_string()],
        }],
    }
}
