use crate::domain::model::{
    EndpointMap, EndpointReport, ParameterSet, ProviderIdentity, ProviderReport, ReportOutcome,
};
use crate::domain::ports::RegistryReader;
use crate::utils::error::{ReadResult, ReportError, ResolveStage};
use crate::utils::hex_text::decode_hex_text;
use futures_util::stream::{self, StreamExt, TryStreamExt};
use std::future::Future;

pub const DEFAULT_CONCURRENT_READS: usize = 8;

/// Builds a [`ProviderReport`] out of individual registry reads.
///
/// The title and owner are read first. An empty title ends the build with
/// [`ReportOutcome::NotRegistered`] before any parameter or endpoint read is
/// issued. Otherwise the public key, parameters and endpoints are resolved
/// concurrently, and the first failure aborts the whole build.
pub struct ProviderReportAggregator<R: RegistryReader> {
    reader: R,
    concurrent_reads: usize,
}

impl<R: RegistryReader> ProviderReportAggregator<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            concurrent_reads: DEFAULT_CONCURRENT_READS,
        }
    }

    /// Caps how many parameters or endpoints are resolved at once.
    pub fn with_concurrent_reads(mut self, concurrent_reads: usize) -> Self {
        self.concurrent_reads = concurrent_reads.max(1);
        self
    }

    pub async fn build_report(&self, account: &str) -> Result<ReportOutcome, ReportError> {
        tracing::debug!("Probing registry entry for {}", account);

        let (owner, title) = tokio::try_join!(
            remote(ResolveStage::Owner, self.reader.get_owner(account)),
            remote(ResolveStage::Title, self.reader.get_title(account)),
        )?;

        if title.is_empty() {
            tracing::debug!("No registration for {}", account);
            return Ok(ReportOutcome::NotRegistered {
                account: account.to_string(),
                owner,
            });
        }

        let (pubkey, params, endpoints) = tokio::try_join!(
            remote(ResolveStage::Pubkey, self.reader.get_pubkey(account)),
            self.resolve_params(account),
            self.resolve_endpoints(account),
        )?;

        tracing::debug!(
            "Resolved '{}' for {}: {} params, {} endpoints",
            title,
            account,
            params.len(),
            endpoints.len()
        );

        Ok(ReportOutcome::Registered(ProviderReport {
            identity: ProviderIdentity {
                account: account.to_string(),
                owner,
                title,
                pubkey,
            },
            params,
            endpoints,
        }))
    }

    async fn resolve_params(&self, account: &str) -> Result<ParameterSet, ReportError> {
        let names = remote(
            ResolveStage::ParamNames,
            self.reader.get_all_param_names(account),
        )
        .await?;
        tracing::debug!("Resolving {} parameters for {}", names.len(), account);

        stream::iter(names)
            .map(|raw_name| self.resolve_param(account, raw_name))
            .buffered(self.concurrent_reads)
            .try_collect()
            .await
    }

    async fn resolve_param(
        &self,
        account: &str,
        raw_name: String,
    ) -> Result<(String, String), ReportError> {
        // The registry keys values by the decoded name.
        let name = decode(ResolveStage::ParamName, &raw_name)?;
        let stage = ResolveStage::ParamValue { name: name.clone() };

        let raw_value = remote(stage.clone(), self.reader.get_param_value(account, &name)).await?;
        let value = decode(stage, &raw_value)?;

        Ok((name, value))
    }

    async fn resolve_endpoints(&self, account: &str) -> Result<EndpointMap, ReportError> {
        let names = remote(
            ResolveStage::EndpointNames,
            self.reader.get_endpoint_names(account),
        )
        .await?;
        tracing::debug!("Resolving {} endpoints for {}", names.len(), account);

        stream::iter(names)
            .map(|endpoint| self.resolve_endpoint(account, endpoint))
            .buffered(self.concurrent_reads)
            .try_collect()
            .await
    }

    async fn resolve_endpoint(
        &self,
        account: &str,
        endpoint: String,
    ) -> Result<(String, EndpointReport), ReportError> {
        let params_stage = ResolveStage::EndpointParams {
            endpoint: endpoint.clone(),
        };

        let (curve, bound, raw_params) = tokio::try_join!(
            remote(
                ResolveStage::Curve {
                    endpoint: endpoint.clone()
                },
                self.reader.get_curve(account, &endpoint),
            ),
            remote(
                ResolveStage::Bound {
                    endpoint: endpoint.clone()
                },
                self.reader.get_bound(account, &endpoint),
            ),
            remote(
                params_stage.clone(),
                self.reader.get_endpoint_params(account, &endpoint),
            ),
        )?;

        let params = raw_params
            .iter()
            .map(|raw| decode(params_stage.clone(), raw))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((
            endpoint,
            EndpointReport {
                curve,
                bound,
                params,
            },
        ))
    }
}

async fn remote<T>(
    stage: ResolveStage,
    call: impl Future<Output = ReadResult<T>>,
) -> Result<T, ReportError> {
    call.await
        .map_err(|source| ReportError::RemoteCall { stage, source })
}

fn decode(stage: ResolveStage, raw: &str) -> Result<String, ReportError> {
    decode_hex_text(raw).map_err(|source| ReportError::Decode {
        stage,
        raw: raw.to_string(),
        source,
    })
}
