use anyhow::Result;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Lifecycle phase a test case had reached when it finished.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    PreTest,
    Setup,
    Call,
    Teardown,
    Complete,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::PreTest => "pre-test",
            Stage::Setup => "setup",
            Stage::Call => "call",
            Stage::Teardown => "teardown",
            Stage::Complete => "complete",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "result", content = "message", rename_all = "UPPERCASE")]
pub enum Outcome {
    Passed,
    Failed(String),
}

impl Outcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, Outcome::Passed)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Passed => f.write_str("PASSED"),
            Outcome::Failed(msg) if msg.is_empty() => f.write_str("FAILED"),
            Outcome::Failed(msg) => write!(f, "FAILED: {msg}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CaseRecord {
    pub stage: Stage,
    pub outcome: Outcome,
}

/// Results of one run, keyed by test name in execution order.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Summary {
    pub cases: IndexMap<String, CaseRecord>,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.cases.len()
    }

    pub fn passed(&self) -> usize {
        self.cases.values().filter(|r| r.outcome.is_passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    pub fn get(&self, name: &str) -> Option<&CaseRecord> {
        self.cases.get(name)
    }
}

type Check<C> = Box<dyn Fn(&C) -> Result<()>>;

/// A named check run against the context produced by setup.
pub struct TestCase<C> {
    name: String,
    check: Check<C>,
}

impl<C> TestCase<C> {
    pub fn new(name: impl Into<String>, check: impl Fn(&C) -> Result<()> + 'static) -> Self {
        Self {
            name: name.into(),
            check: Box::new(check),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, context: &C) -> Result<()> {
        (self.check)(context)
    }
}

impl<C> fmt::Debug for TestCase<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase").field("name", &self.name).finish()
    }
}
