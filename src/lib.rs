pub mod config;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod http;
pub mod report;
pub mod suite;
pub mod types;
pub mod verify;

pub use crate::error::{ApiError, VerificationError};
pub use crate::verify::verify;
