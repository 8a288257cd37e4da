use crate::types::{CaseRecord, Outcome, Stage, Summary, TestCase};
use anyhow::Result;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{info, warn};

fn run_case<C, S, T>(
    setup: &mut S,
    teardown: &mut T,
    case: &TestCase<C>,
    stage: &mut Stage,
) -> Result<()>
where
    S: FnMut() -> Result<C>,
    T: FnMut() -> Result<()>,
{
    *stage = Stage::Setup;
    let context = setup()?;
    *stage = Stage::Call;
    case.call(&context)?;
    *stage = Stage::Teardown;
    teardown()?;
    *stage = Stage::Complete;
    Ok(())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}

/// Run every case through setup, call and teardown. A failure in one case is
/// recorded against it and never stops the remaining cases.
pub fn run_cases<C, S, T>(mut setup: S, mut teardown: T, cases: &[TestCase<C>]) -> Summary
where
    S: FnMut() -> Result<C>,
    T: FnMut() -> Result<()>,
{
    let mut summary = Summary::default();
    for case in cases {
        info!(case = case.name(), "starting");
        let mut stage = Stage::PreTest;
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            run_case(&mut setup, &mut teardown, case, &mut stage)
        }));
        let outcome = match result {
            Ok(Ok(())) => Outcome::Passed,
            Ok(Err(e)) => Outcome::Failed(format!("{e:#}")),
            Err(payload) => Outcome::Failed(panic_message(payload.as_ref())),
        };
        match &outcome {
            Outcome::Passed => info!(case = case.name(), %stage, "passed"),
            Outcome::Failed(msg) => warn!(case = case.name(), %stage, error = %msg, "failed"),
        }
        let record = CaseRecord { stage, outcome };
        if summary.cases.insert(case.name().to_string(), record).is_some() {
            warn!(case = case.name(), "duplicate test name replaced earlier result");
        }
    }
    summary
}
