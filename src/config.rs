use std::time::Duration;

use crate::constants::{DEFAULT_TIMEOUT_SECS, PFDS_URL};

/// Settings for talking to the data server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetcherConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl FetcherConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: PFDS_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FetcherConfig::default();
        assert_eq!(config.base_url, PFDS_URL);
        assert_eq!(config.timeout, Duration::from_secs(15));

        let config = FetcherConfig::with_base_url("http://localhost:1234");
        assert_eq!(config.base_url, "http://localhost:1234");
        assert_eq!(config.timeout, Duration::from_secs(15));
    }
}
