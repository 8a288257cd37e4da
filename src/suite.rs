//! The category-details checks.
//!
//! Each check receives the JSON object fetched during its own setup, so a
//! failing fetch only ever affects the case that performed it.

use crate::config::Endpoint;
use crate::engine::run_cases;
use crate::fetch::{RetryPolicy, fetch};
use crate::http::Transport;
use crate::types::{Summary, TestCase};
use crate::verify::verify;
use anyhow::Result;
use serde_json::Value;
use std::time::{Duration, Instant};

pub const EXPECTED_NAME: &str = "Carbon credits";
pub const GALLERY_PROMOTION: &str = "Gallery";
pub const GALLERY_TEXT: &str = "2x larger image";

/// Field value as it should read in a message: strings unquoted, absent as `null`.
fn show(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "null".to_string(),
    }
}

pub fn test_response_name(response: &Value) -> Result<()> {
    let name = response.get("Name");
    verify(
        name.and_then(Value::as_str) == Some(EXPECTED_NAME),
        format!(
            "Name returned as expected. '{}'=='{EXPECTED_NAME}'",
            show(name)
        ),
    )?;
    Ok(())
}

pub fn test_relist_true(response: &Value) -> Result<()> {
    let can_relist = response.get("CanRelist");
    verify(
        can_relist == Some(&Value::Bool(true)),
        format!(
            "CanRelist returned as expected. '{}'=='true'",
            show(can_relist)
        ),
    )?;
    Ok(())
}

pub fn test_gallery_promotion_description(response: &Value) -> Result<()> {
    let galleries: Vec<&Value> = response
        .get("Promotions")
        .and_then(Value::as_array)
        .map(|promotions| {
            promotions
                .iter()
                .filter(|p| p.get("Name").and_then(Value::as_str) == Some(GALLERY_PROMOTION))
                .collect()
        })
        .unwrap_or_default();
    verify(
        galleries.len() == 1,
        format!(
            "Target name is unique within the promotions array. Found {} entries",
            galleries.len()
        ),
    )?;
    let description = galleries[0]
        .get("Description")
        .and_then(Value::as_str)
        .unwrap_or_default();
    verify(
        description.contains(GALLERY_TEXT),
        format!(
            "Expected text found within targeted promotion. '{GALLERY_TEXT}' in '{description}'"
        ),
    )?;
    Ok(())
}

pub fn category_cases() -> Vec<TestCase<Value>> {
    vec![
        TestCase::new("test_response_name", test_response_name),
        TestCase::new("test_relist_true", test_relist_true),
        TestCase::new(
            "test_gallery_promotion_description",
            test_gallery_promotion_description,
        ),
    ]
}

#[derive(Debug, Clone)]
pub struct SuiteRun {
    pub summary: Summary,
    pub duration: Duration,
}

pub struct CategorySuite<T: Transport> {
    transport: T,
    endpoint: Endpoint,
    retry: RetryPolicy,
}

impl<T: Transport> CategorySuite<T> {
    pub fn new(transport: T, endpoint: Endpoint, retry: RetryPolicy) -> Self {
        Self {
            transport,
            endpoint,
            retry,
        }
    }

    fn setup(&self) -> Result<Value> {
        let body = fetch(
            &self.transport,
            &self.retry,
            &self.endpoint.address,
            &self.endpoint.params,
        )?;
        Ok(body)
    }

    /// Run every case once. Each call starts from an empty summary.
    pub fn run(&self) -> SuiteRun {
        let cases = category_cases();
        let start = Instant::now();
        let summary = run_cases(|| self.setup(), || Ok(()), &cases);
        SuiteRun {
            summary,
            duration: start.elapsed(),
        }
    }
}
