use thiserror::Error;

/// Why a request never produced an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportCause {
    #[error(
        "Model request timed out after {timeout_secs}s while calling '{api_url}'. \
         Increase MODEL_TIMEOUT_SECS or check model responsiveness."
    )]
    Timeout { api_url: String, timeout_secs: u64 },
    #[error(
        "Connection refused by model API at '{api_url}'. \
         Ensure the endpoint is reachable and MODEL_API_URL is correct."
    )]
    ConnectionRefused { api_url: String },
    #[error(
        "Failed to connect to model API at '{api_url}'. \
         Check MODEL_API_URL and network connectivity."
    )]
    Connect { api_url: String },
    #[error("Failed to call model API at '{api_url}': {detail}")]
    Other { api_url: String, detail: String },
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error(
        "Missing {var} environment variable. \
         Set it before starting: export {var}='hf_your_token_here'"
    )]
    Configuration { var: &'static str },
    #[error("Model request failed with status {status}: {body}")]
    Remote { status: u16, body: String },
    #[error("{cause}")]
    Transport { cause: TransportCause },
    #[error("Malformed completion response: {detail}")]
    MalformedResponse { detail: String },
}

impl ChatError {
    /// Everything except a missing credential can be shown to the user and
    /// the session continued.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Configuration { .. })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "configuration",
            Self::Remote { .. } => "remote",
            Self::Transport { .. } => "transport",
            Self::MalformedResponse { .. } => "malformed response",
        }
    }
}

impl From<TransportCause> for ChatError {
    fn from(cause: TransportCause) -> Self {
        Self::Transport { cause }
    }
}
