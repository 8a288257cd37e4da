use anyhow::{Context, Result};
use std::time::Duration;
use tracing::debug;

/// 30 seconds per request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Status line and body of a single GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

impl Reply {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// "503 Service Unavailable", or just the code when no reason is known.
    pub fn status_line(&self) -> String {
        if self.reason.is_empty() {
            self.status.to_string()
        } else {
            format!("{} {}", self.status, self.reason)
        }
    }
}

pub trait Transport {
    fn get(&self, address: &str, params: &[(String, String)]) -> Result<Reply>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, address: &str, params: &[(String, String)]) -> Result<Reply> {
        (**self).get(address, params)
    }
}

/// Blocking reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, address: &str, params: &[(String, String)]) -> Result<Reply> {
        let response = self
            .client
            .get(address)
            .query(params)
            .send()
            .with_context(|| format!("GET {address} failed"))?;
        let status = response.status();
        debug!(%status, url = %response.url(), "received response");
        let body = response
            .text()
            .with_context(|| format!("Failed to read response body from {address}"))?;
        Ok(Reply {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}
