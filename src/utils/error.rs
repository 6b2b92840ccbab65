use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// A raw wire value could not be turned into text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("missing 0x prefix")]
    MissingPrefix,

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid UTF-8: {0}")]
    InvalidUtf8(String),

    #[error("{len} bytes does not fit in {max} bytes")]
    TooLong { len: usize, max: usize },
}

/// A single registry read could not be completed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteCallError {
    #[error("contract call failed: {0}")]
    Contract(String),

    #[error("call timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

pub type ReadResult<T> = std::result::Result<T, RemoteCallError>;

/// The field or endpoint being resolved when a report build failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveStage {
    Owner,
    Title,
    Pubkey,
    ParamNames,
    ParamName,
    ParamValue { name: String },
    EndpointNames,
    Curve { endpoint: String },
    Bound { endpoint: String },
    EndpointParams { endpoint: String },
}

impl fmt::Display for ResolveStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveStage::Owner => write!(f, "owner"),
            ResolveStage::Title => write!(f, "title"),
            ResolveStage::Pubkey => write!(f, "public key"),
            ResolveStage::ParamNames => write!(f, "parameter names"),
            ResolveStage::ParamName => write!(f, "parameter name"),
            ResolveStage::ParamValue { name } => write!(f, "parameter '{}'", name),
            ResolveStage::EndpointNames => write!(f, "endpoint names"),
            ResolveStage::Curve { endpoint } => write!(f, "curve of endpoint '{}'", endpoint),
            ResolveStage::Bound { endpoint } => write!(f, "bound of endpoint '{}'", endpoint),
            ResolveStage::EndpointParams { endpoint } => {
                write!(f, "params of endpoint '{}'", endpoint)
            }
        }
    }
}

/// Failure of a whole report build. Never carries a partial report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("remote call failed while resolving {stage}: {source}")]
    RemoteCall {
        stage: ResolveStage,
        #[source]
        source: RemoteCallError,
    },

    #[error("could not decode {stage} value {raw:?}: {source}")]
    Decode {
        stage: ResolveStage,
        raw: String,
        #[source]
        source: DecodeError,
    },

    #[error("report build cancelled")]
    Cancelled,
}

impl ReportError {
    pub fn stage(&self) -> Option<&ResolveStage> {
        match self {
            ReportError::RemoteCall { stage, .. } | ReportError::Decode { stage, .. } => {
                Some(stage)
            }
            ReportError::Cancelled => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value {value:?} for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Report failed: {0}")]
    Report(#[from] ReportError),
}

impl AppError {
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            AppError::ConfigError { .. }
                | AppError::MissingConfigError { .. }
                | AppError::InvalidConfigValueError { .. }
                | AppError::ConfigValidationError { .. }
        )
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Report(ReportError::Cancelled) => 130,
            e if e.is_config_error() => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
