use thiserror::Error;

/// Failure to obtain a usable response from the endpoint.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("API request failed after {attempts} attempt(s) with the following cause: {reason}")]
    Exhausted { attempts: u32, reason: String },
    #[error("API response body is not valid JSON: {reason}")]
    InvalidBody { reason: String },
}

/// A verification condition evaluated false. Displays as the bare message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct VerificationError {
    pub message: String,
}
