use crate::core::lookup::LookupEntry;
use crate::domain::model::{ProviderReport, ReportOutcome};
use crate::utils::error::{AppError, ReportError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(AppError::InvalidConfigValueError {
                field: "output.format".to_string(),
                value: other.to_string(),
                reason: "Unsupported format. Valid formats: text, json".to_string(),
            }),
        }
    }
}

pub fn render(entries: &[LookupEntry], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(entries)),
        OutputFormat::Json => render_json(entries),
    }
}

pub fn render_text(entries: &[LookupEntry]) -> String {
    entries
        .iter()
        .map(render_entry_text)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_entry_text(entry: &LookupEntry) -> String {
    let mut lines = vec![format!("Address: {}", entry.account)];

    match &entry.result {
        Ok(ReportOutcome::Registered(report)) => lines.extend(report_lines(report)),
        Ok(ReportOutcome::NotRegistered { .. }) => {
            lines.push("Provider is not registered with this account".to_string())
        }
        Err(ReportError::Cancelled) => lines.push("Lookup cancelled".to_string()),
        Err(e) => lines.push(format!("Failed to read provider: {}", e)),
    }

    lines.join("\n")
}

fn report_lines(report: &ProviderReport) -> Vec<String> {
    let identity = &report.identity;
    let mut lines = vec![
        "Provider is registered:".to_string(),
        format!("  Owner: {}", identity.owner),
        format!("  Title: {}", identity.title),
        format!("  Public Key: {}", identity.pubkey),
        "  Params:".to_string(),
    ];

    for (name, value) in &report.params {
        lines.push(format!("    {}: {}", name, value));
    }

    let names: Vec<&str> = report.endpoints.keys().map(String::as_str).collect();
    lines.push(format!("  Endpoints: {}", names.join(", ")));

    for (name, endpoint) in &report.endpoints {
        lines.push(format!("    {}:", name));
        lines.push(format!("      Bonding Curve: {}", plain(&endpoint.curve)));
        lines.push(format!("      Bound: {}", plain(&endpoint.bound)));
        lines.push(format!("      Params: {}", endpoint.params.join(", ")));
    }

    lines
}

/// Strings print bare, everything else as compact JSON.
fn plain(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    account: &'a str,
    retrieved_at: DateTime<Utc>,
    #[serde(flatten)]
    status: JsonStatus<'a>,
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum JsonStatus<'a> {
    Registered { report: &'a ProviderReport },
    NotRegistered { owner: &'a str },
    Failed { error: JsonError },
}

#[derive(Serialize)]
struct JsonError {
    stage: Option<String>,
    message: String,
}

pub fn render_json(entries: &[LookupEntry]) -> Result<String> {
    let json_entries: Vec<JsonEntry> = entries
        .iter()
        .map(|entry| JsonEntry {
            account: &entry.account,
            retrieved_at: entry.retrieved_at,
            status: match &entry.result {
                Ok(ReportOutcome::Registered(report)) => JsonStatus::Registered { report },
                Ok(ReportOutcome::NotRegistered { owner, .. }) => {
                    JsonStatus::NotRegistered { owner }
                }
                Err(e) => JsonStatus::Failed {
                    error: JsonError {
                        stage: e.stage().map(|stage| stage.to_string()),
                        message: e.to_string(),
                    },
                },
            },
        })
        .collect();

    Ok(serde_json::to_string_pretty(&json_entries)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{EndpointReport, ProviderIdentity};
    use crate::utils::error::{RemoteCallError, ResolveStage};
    use indexmap::IndexMap;
    use serde_json::json;

    fn entry(result: std::result::Result<ReportOutcome, ReportError>) -> LookupEntry {
        LookupEntry {
            account: "0xDEF".to_string(),
            retrieved_at: Utc::now(),
            result,
        }
    }

    fn weather_report() -> ProviderReport {
        let mut params = IndexMap::new();
        params.insert("region".to_string(), "US".to_string());

        let mut endpoints = IndexMap::new();
        endpoints.insert(
            "hourly".to_string(),
            EndpointReport {
                curve: json!(["3", "0", "0", "2", "1000"]),
                bound: json!("100"),
                params: vec!["unit".to_string()],
            },
        );

        ProviderReport {
            identity: ProviderIdentity {
                account: "0xDEF".to_string(),
                owner: "0xDEF".to_string(),
                title: "Weather".to_string(),
                pubkey: "111".to_string(),
            },
            params,
            endpoints,
        }
    }

    #[test]
    fn test_text_for_registered_provider() {
        let text = render_text(&[entry(Ok(ReportOutcome::Registered(weather_report())))]);

        let expected = [
            "Address: 0xDEF",
            "Provider is registered:",
            "  Owner: 0xDEF",
            "  Title: Weather",
            "  Public Key: 111",
            "  Params:",
            "    region: US",
            "  Endpoints: hourly",
            "    hourly:",
            "      Bonding Curve: [\"3\",\"0\",\"0\",\"2\",\"1000\"]",
            "      Bound: 100",
            "      Params: unit",
        ]
        .join("\n");
        assert_eq!(text, expected);
    }

    #[test]
    fn test_text_for_unregistered_and_failed() {
        let not_registered = entry(Ok(ReportOutcome::NotRegistered {
            account: "0xDEF".to_string(),
            owner: "0xDEF".to_string(),
        }));
        let failed = entry(Err(ReportError::RemoteCall {
            stage: ResolveStage::Title,
            source: RemoteCallError::Timeout(std::time::Duration::from_secs(30)),
        }));

        let text = render_text(&[not_registered, failed]);

        assert!(text.contains("Provider is not registered with this account"));
        assert!(text.contains("Failed to read provider: remote call failed while resolving title"));
        assert_eq!(text.matches("Address: 0xDEF").count(), 2);
    }

    #[test]
    fn test_json_statuses() {
        let entries = vec![
            entry(Ok(ReportOutcome::Registered(weather_report()))),
            entry(Ok(ReportOutcome::NotRegistered {
                account: "0xDEF".to_string(),
                owner: "0xDEF".to_string(),
            })),
            entry(Err(ReportError::RemoteCall {
                stage: ResolveStage::Bound {
                    endpoint: "hourly".to_string(),
                },
                source: RemoteCallError::Contract("reverted".to_string()),
            })),
            entry(Err(ReportError::Cancelled)),
        ];

        let rendered = render(&entries, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value[0]["status"], "registered");
        assert_eq!(value[0]["account"], "0xDEF");
        assert_eq!(value[0]["report"]["identity"]["title"], "Weather");
        assert_eq!(value[0]["report"]["params"]["region"], "US");
        assert_eq!(value[0]["report"]["endpoints"]["hourly"]["bound"], "100");
        assert_eq!(value[0]["report"]["endpoints"]["hourly"]["params"], json!(["unit"]));
        assert!(value[0]["retrieved_at"].is_string());

        assert_eq!(value[1]["status"], "not_registered");
        assert_eq!(value[1]["owner"], "0xDEF");

        assert_eq!(value[2]["status"], "failed");
        assert_eq!(value[2]["error"]["stage"], "bound of endpoint 'hourly'");

        assert_eq!(value[3]["status"], "failed");
        assert!(value[3]["error"]["stage"].is_null());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Json.as_str(), "json");
    }
}
