use miette::Diagnostic;
use thiserror::Error;

pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid server response";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error";

/// The request never produced a response.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
#[error("{message}")]
#[diagnostic(help("Check that the scan service is running and reachable"))]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();

        if message.trim().is_empty() {
            return Self {
                message: NETWORK_ERROR_MESSAGE.to_string(),
            };
        }

        Self { message }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            return Self::new(format!("request timed out: {value}"));
        }

        Self::new(value.to_string())
    }
}

/// Every way a scan attempt can end without a result. All of them leave the
/// session back in `Idle`.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("{0}")]
    #[diagnostic(help("Targets must be absolute URLs such as https://example.com"))]
    Validation(String),

    #[error("{}", INVALID_RESPONSE_MESSAGE)]
    ResponseParse,

    #[error("{0}")]
    Service(String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Transport(#[from] TransportError),
}

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("can't read config file {path}")]
    CantRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}")]
    #[diagnostic(help("Try fixing the config file or removing it to use the defaults"))]
    Invalid {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid progress settings: {0}")]
    InvalidProgress(String),
}
