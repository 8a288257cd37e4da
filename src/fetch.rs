use crate::error::ApiError;
use crate::http::Transport;
use serde_json::Value;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_ATTEMPTS: u32 = 3;

/// How many times to try and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    /// At least one attempt is always made.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ATTEMPTS, Duration::ZERO)
    }
}

/// GET `address` until a 200 arrives or the policy runs out, returning the JSON body.
pub fn fetch<T: Transport + ?Sized>(
    transport: &T,
    policy: &RetryPolicy,
    address: &str,
    params: &[(String, String)],
) -> Result<Value, ApiError> {
    let mut last_reason = String::from("no response");
    for attempt in 1..=policy.max_attempts {
        if attempt > 1 && !policy.delay.is_zero() {
            thread::sleep(policy.delay);
        }
        match transport.get(address, params) {
            Ok(reply) if reply.is_ok() => {
                debug!(attempt, "request succeeded");
                return serde_json::from_str(&reply.body).map_err(|e| ApiError::InvalidBody {
                    reason: e.to_string(),
                });
            }
            Ok(reply) => {
                last_reason = reply.status_line();
                warn!(attempt, max = policy.max_attempts, reason = %last_reason, "request rejected");
            }
            Err(e) => {
                last_reason = format!("{e:#}");
                warn!(attempt, max = policy.max_attempts, reason = %last_reason, "request failed");
            }
        }
    }
    Err(ApiError::Exhausted {
        attempts: policy.max_attempts,
        reason: last_reason,
    })
}
