use thiserror::Error;

use super::transport::TransportError;
use crate::logging::LogError;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The request payload failed local validation and was never sent
    #[error("{0}")]
    InvalidInput(String),
    /// The API answered with a non-success status
    #[error("{message}")]
    ApiRequest { status: u16, message: String },
    /// The request never reached the API
    #[error(transparent)]
    Network(TransportError),
    #[error(transparent)]
    Transport(TransportError),
    #[error("failed to parse API response")]
    Decode(#[source] serde_json::Error),
    #[error("failed to encode request payload")]
    Encode(#[source] serde_json::Error),
    #[error(transparent)]
    Log(#[from] LogError),
}

impl ClientError {
    /// Variant name reported as `errorType` in failure logs
    pub fn kind(&self) -> &'static str {
        match self {
            ClientError::InvalidInput(_) => "InvalidInputError",
            ClientError::ApiRequest { .. } => "ApiRequestError",
            ClientError::Network(_) => "NetworkError",
            ClientError::Transport(_) => "TransportError",
            ClientError::Decode(_) => "DecodeError",
            ClientError::Encode(_) => "EncodeError",
            ClientError::Log(_) => "LogError",
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }

    /// Full `source()` chain, one cause per line
    pub fn trace(&self) -> String {
        let mut lines = vec![self.to_string()];
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            lines.push(format!("caused by: {cause}"));
            source = std::error::Error::source(cause);
        }
        lines.join("\n")
    }
}

impl From<TransportError> for ClientError {
    fn from(err: TransportError) -> Self {
        if err.reached_server() {
            ClientError::Transport(err)
        } else {
            ClientError::Network(err)
        }
    }
}
