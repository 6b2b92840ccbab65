use crate::utils::error::ReadResult;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// One remote lookup per call against a provider's registry entry.
///
/// Unset slots come back as empty or default values rather than errors. Raw
/// values (parameter names, parameter values, endpoint params) are
/// `0x`-prefixed hex and are decoded by the caller.
#[async_trait]
pub trait RegistryReader: Send + Sync {
    async fn get_owner(&self, account: &str) -> ReadResult<String>;

    async fn get_title(&self, account: &str) -> ReadResult<String>;

    async fn get_pubkey(&self, account: &str) -> ReadResult<String>;

    async fn get_all_param_names(&self, account: &str) -> ReadResult<Vec<String>>;

    /// `name` is the decoded parameter name.
    async fn get_param_value(&self, account: &str, name: &str) -> ReadResult<String>;

    async fn get_endpoint_names(&self, account: &str) -> ReadResult<Vec<String>>;

    async fn get_curve(&self, account: &str, endpoint: &str) -> ReadResult<serde_json::Value>;

    async fn get_bound(&self, account: &str, endpoint: &str) -> ReadResult<serde_json::Value>;

    async fn get_endpoint_params(&self, account: &str, endpoint: &str) -> ReadResult<Vec<String>>;
}

#[async_trait]
impl<R: RegistryReader + ?Sized> RegistryReader for Arc<R> {
    async fn get_owner(&self, account: &str) -> ReadResult<String> {
        (**self).get_owner(account).await
    }

    async fn get_title(&self, account: &str) -> ReadResult<String> {
        (**self).get_title(account).await
    }

    async fn get_pubkey(&self, account: &str) -> ReadResult<String> {
        (**self).get_pubkey(account).await
    }

    async fn get_all_param_names(&self, account: &str) -> ReadResult<Vec<String>> {
        (**self).get_all_param_names(account).await
    }

    async fn get_param_value(&self, account: &str, name: &str) -> ReadResult<String> {
        (**self).get_param_value(account, name).await
    }

    async fn get_endpoint_names(&self, account: &str) -> ReadResult<Vec<String>> {
        (**self).get_endpoint_names(account).await
    }

    async fn get_curve(&self, account: &str, endpoint: &str) -> ReadResult<serde_json::Value> {
        (**self).get_curve(account, endpoint).await
    }

    async fn get_bound(&self, account: &str, endpoint: &str) -> ReadResult<serde_json::Value> {
        (**self).get_bound(account, endpoint).await
    }

    async fn get_endpoint_params(&self, account: &str, endpoint: &str) -> ReadResult<Vec<String>> {
        (**self).get_endpoint_params(account, endpoint).await
    }
}

pub trait ConfigProvider: Send + Sync {
    fn rpc_url(&self) -> &str;
    fn registry_address(&self) -> &str;
    fn bondage_address(&self) -> &str;
    fn concurrent_reads(&self) -> usize;
    fn call_timeout(&self) -> Duration;
}
