//! Error types for storm event lookups.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FreeboardError {
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request failed with status: {0}")]
    Status(reqwest::StatusCode),

    #[error("Location {latitude}, {longitude} is outside the data server's coverage")]
    OutOfCoverage { latitude: f64, longitude: f64 },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FreeboardError {
    /// Whether the error came from talking to the data server.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Status(_))
    }

    /// Whether the caller supplied bad input, as opposed to a failure downstream.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidLocation(_) | Self::InvalidParameter(_) | Self::OutOfCoverage { .. }
        )
    }
}

pub type Result<T, E = FreeboardError> = std::result::Result<T, E>;
