use crate::fetch::RetryPolicy;
use crate::http::DEFAULT_TIMEOUT;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.tmsandbox.co.nz/v1/Categories/6327/Details.json";

/// Address plus fixed query parameters of the resource under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub address: String,
    pub params: Vec<(String, String)>,
}

impl Endpoint {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            params: vec![("catalogue".to_string(), "false".to_string())],
        }
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub endpoint: Endpoint,
    pub retry: RetryPolicy,
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::default(),
            retry: RetryPolicy::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
