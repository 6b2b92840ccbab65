use crate::config::settings::DEFAULT_CALL_TIMEOUT;
use crate::domain::ports::RegistryReader;
use crate::utils::error::{ReadResult, RemoteCallError};
use crate::utils::hex_text::{decode_text_bytes, encode_bytes32, to_raw};
use alloy::{
    primitives::{Address, FixedBytes},
    providers::DynProvider,
};
use async_trait::async_trait;
use std::future::IntoFuture;
use std::time::Duration;

alloy::sol! {
    #[sol(rpc)]
    interface IZapRegistry {
        function getProviderTitle(address provider) external view returns (bytes32);
        function getProviderPublicKey(address provider) external view returns (uint256);
        function getAllProviderParams(address provider) external view returns (bytes32[]);
        function getProviderParameter(address provider, bytes32 key) external view returns (bytes);
        function getProviderEndpoints(address provider) external view returns (bytes32[]);
        function getProviderCurve(address provider, bytes32 endpoint) external view returns (int256[]);
        function getEndpointParams(address provider, bytes32 endpoint) external view returns (bytes32[]);
    }

    #[sol(rpc)]
    interface IZapBondage {
        function getZapBound(address oracleAddress, bytes32 endpoint) external view returns (uint256);
    }
}

/// [`RegistryReader`] over the registry and bondage contracts of a chain.
pub struct ContractRegistryReader {
    registry: IZapRegistry::IZapRegistryInstance<DynProvider>,
    bondage: IZapBondage::IZapBondageInstance<DynProvider>,
    call_timeout: Duration,
}

impl ContractRegistryReader {
    pub fn new(provider: DynProvider, registry: Address, bondage: Address) -> Self {
        Self {
            registry: IZapRegistry::new(registry, provider.clone()),
            bondage: IZapBondage::new(bondage, provider),
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    async fn timed<T, F>(&self, call: F) -> ReadResult<T>
    where
        F: IntoFuture<Output = Result<T, alloy::contract::Error>>,
    {
        match tokio::time::timeout(self.call_timeout, call).await {
            Ok(result) => result.map_err(|e| RemoteCallError::Contract(e.to_string())),
            Err(_) => Err(RemoteCallError::Timeout(self.call_timeout)),
        }
    }
}

fn parse_account(account: &str) -> ReadResult<Address> {
    account
        .parse::<Address>()
        .map_err(|e| RemoteCallError::InvalidRequest(format!("account {}: {}", account, e)))
}

fn bytes32_key(text: &str) -> ReadResult<FixedBytes<32>> {
    encode_bytes32(text)
        .map(FixedBytes::from)
        .map_err(|e| RemoteCallError::InvalidRequest(format!("key {:?}: {}", text, e)))
}

fn bytes32_text(value: &FixedBytes<32>) -> ReadResult<String> {
    decode_text_bytes(value.as_slice())
        .map_err(|e| RemoteCallError::InvalidResponse(format!("{}: {}", value, e)))
}

#[async_trait]
impl RegistryReader for ContractRegistryReader {
    async fn get_owner(&self, account: &str) -> ReadResult<String> {
        // Entries are keyed by the owning address itself.
        Ok(parse_account(account)?.to_checksum(None))
    }

    async fn get_title(&self, account: &str) -> ReadResult<String> {
        let provider = parse_account(account)?;
        let call = self.registry.getProviderTitle(provider);
        let title = self.timed(call.call()).await?;
        bytes32_text(&title)
    }

    async fn get_pubkey(&self, account: &str) -> ReadResult<String> {
        let provider = parse_account(account)?;
        let call = self.registry.getProviderPublicKey(provider);
        Ok(self.timed(call.call()).await?.to_string())
    }

    async fn get_all_param_names(&self, account: &str) -> ReadResult<Vec<String>> {
        let provider = parse_account(account)?;
        let call = self.registry.getAllProviderParams(provider);
        let names = self.timed(call.call()).await?;
        Ok(names.iter().map(|name| to_raw(name.as_slice())).collect())
    }

    async fn get_param_value(&self, account: &str, name: &str) -> ReadResult<String> {
        let provider = parse_account(account)?;
        let call = self
            .registry
            .getProviderParameter(provider, bytes32_key(name)?);
        let value = self.timed(call.call()).await?;
        Ok(to_raw(&value))
    }

    async fn get_endpoint_names(&self, account: &str) -> ReadResult<Vec<String>> {
        let provider = parse_account(account)?;
        let call = self.registry.getProviderEndpoints(provider);
        let endpoints = self.timed(call.call()).await?;
        endpoints.iter().map(bytes32_text).collect()
    }

    async fn get_curve(&self, account: &str, endpoint: &str) -> ReadResult<serde_json::Value> {
        let provider = parse_account(account)?;
        let call = self
            .registry
            .getProviderCurve(provider, bytes32_key(endpoint)?);
        let curve = self.timed(call.call()).await?;
        // int256 terms overflow JSON numbers, so they travel as decimal strings.
        Ok(serde_json::Value::Array(
            curve
                .iter()
                .map(|term| serde_json::Value::String(term.to_string()))
                .collect(),
        ))
    }

    async fn get_bound(&self, account: &str, endpoint: &str) -> ReadResult<serde_json::Value> {
        let provider = parse_account(account)?;
        let call = self.bondage.getZapBound(provider, bytes32_key(endpoint)?);
        let bound = self.timed(call.call()).await?;
        Ok(serde_json::Value::String(bound.to_string()))
    }

    async fn get_endpoint_params(&self, account: &str, endpoint: &str) -> ReadResult<Vec<String>> {
        let provider = parse_account(account)?;
        let call = self
            .registry
            .getEndpointParams(provider, bytes32_key(endpoint)?);
        let params = self.timed(call.call()).await?;
        Ok(params.iter().map(|param| to_raw(param.as_slice())).collect())
    }
}
