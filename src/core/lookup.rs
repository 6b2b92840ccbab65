use crate::core::aggregator::ProviderReportAggregator;
use crate::domain::model::ReportOutcome;
use crate::domain::ports::RegistryReader;
use crate::utils::error::{AppError, ReportError};
use chrono::{DateTime, Utc};
use std::future::Future;

#[derive(Debug, Clone)]
pub struct LookupEntry {
    pub account: String,
    pub retrieved_at: DateTime<Utc>,
    pub result: Result<ReportOutcome, ReportError>,
}

impl LookupEntry {
    pub fn is_failure(&self) -> bool {
        self.result.is_err()
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.result, Err(ReportError::Cancelled))
    }
}

/// Process exit code for a finished lookup: 130 if it was cancelled, 1 if
/// any account failed, 0 otherwise. Unregistered accounts are not failures.
pub fn exit_code(entries: &[LookupEntry]) -> i32 {
    if entries.iter().any(LookupEntry::is_cancelled) {
        return AppError::Report(ReportError::Cancelled).exit_code();
    }
    if entries.iter().any(LookupEntry::is_failure) {
        return 1;
    }
    0
}

/// Runs report builds for a list of accounts, one after another.
pub struct ProviderLookup<R: RegistryReader> {
    aggregator: ProviderReportAggregator<R>,
}

impl<R: RegistryReader> ProviderLookup<R> {
    pub fn new(aggregator: ProviderReportAggregator<R>) -> Self {
        Self { aggregator }
    }

    pub async fn run(&self, accounts: &[String]) -> Vec<LookupEntry> {
        self.run_until(accounts, std::future::pending::<()>()).await
    }

    /// Like [`run`](Self::run), but stops as soon as `shutdown` completes.
    ///
    /// The build in flight at that moment is dropped and recorded as
    /// [`ReportError::Cancelled`]; accounts after it are not queried.
    pub async fn run_until<F>(&self, accounts: &[String], shutdown: F) -> Vec<LookupEntry>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut entries = Vec::with_capacity(accounts.len());

        for account in accounts {
            tracing::info!("🔎 Looking up provider {}", account);

            let result = tokio::select! {
                biased;
                _ = &mut shutdown => Err(ReportError::Cancelled),
                result = self.aggregator.build_report(account) => result,
            };

            match &result {
                Ok(ReportOutcome::Registered(report)) => tracing::info!(
                    "✅ {} is registered as '{}'",
                    account,
                    report.identity.title
                ),
                Ok(ReportOutcome::NotRegistered { .. }) => {
                    tracing::info!("➖ {} has no registry entry", account)
                }
                Err(ReportError::Cancelled) => {
                    tracing::warn!("⛔ Lookup cancelled while reading {}", account)
                }
                Err(e) => tracing::warn!("❌ Lookup failed for {}: {}", account, e),
            }

            let cancelled = matches!(result, Err(ReportError::Cancelled));
            entries.push(LookupEntry {
                account: account.clone(),
                retrieved_at: Utc::now(),
                result,
            });

            if cancelled {
                break;
            }
        }

        entries
    }
}
