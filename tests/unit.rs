use anyhow::{Result, anyhow};
use api_verify::engine::run_cases;
use api_verify::report::{OutputKind, render, render_table};
use api_verify::types::*;
use api_verify::verify;
use pretty_assertions::assert_eq;
use std::cell::Cell;
use std::time::Duration;

fn passing(_ctx: &u32) -> Result<()> {
    Ok(())
}

fn failing_check(ctx: &u32) -> Result<()> {
    verify(*ctx == 7, format!("context is 7. '{ctx}'=='7'"))?;
    Ok(())
}

#[test]
fn all_stages_succeed_marks_complete() {
    let teardowns = Cell::new(0);
    let cases = vec![TestCase::new("ok", passing)];
    let summary = run_cases(
        || Ok(1u32),
        || {
            teardowns.set(teardowns.get() + 1);
            Ok(())
        },
        &cases,
    );
    assert_eq!(
        summary.get("ok"),
        Some(&CaseRecord {
            stage: Stage::Complete,
            outcome: Outcome::Passed,
        })
    );
    assert_eq!(teardowns.get(), 1);
}

#[test]
fn setup_failure_skips_call_and_teardown() {
    let calls = std::rc::Rc::new(Cell::new(0));
    let teardowns = Cell::new(0);
    let seen = calls.clone();
    let cases = vec![TestCase::new("needs_setup", move |_: &u32| {
        seen.set(seen.get() + 1);
        Ok(())
    })];
    let summary = run_cases(
        || Err(anyhow!("endpoint unreachable")),
        || {
            teardowns.set(teardowns.get() + 1);
            Ok(())
        },
        &cases,
    );
    let record = summary.get("needs_setup").unwrap();
    assert_eq!(record.stage, Stage::Setup);
    assert_eq!(record.outcome, Outcome::Failed("endpoint unreachable".into()));
    assert_eq!(calls.get(), 0);
    assert_eq!(teardowns.get(), 0);
}

#[test]
fn check_failure_stops_at_call_without_teardown() {
    let teardowns = Cell::new(0);
    let cases = vec![TestCase::new("wrong_value", failing_check)];
    let summary = run_cases(
        || Ok(3u32),
        || {
            teardowns.set(teardowns.get() + 1);
            Ok(())
        },
        &cases,
    );
    let record = summary.get("wrong_value").unwrap();
    assert_eq!(record.stage, Stage::Call);
    assert_eq!(
        record.outcome,
        Outcome::Failed("context is 7. '3'=='7'".into())
    );
    assert_eq!(teardowns.get(), 0);
}

#[test]
fn teardown_failure_is_recorded_at_teardown() {
    let cases = vec![TestCase::new("cleanup", passing)];
    let summary = run_cases(|| Ok(1u32), || Err(anyhow!("cleanup failed")), &cases);
    let record = summary.get("cleanup").unwrap();
    assert_eq!(record.stage, Stage::Teardown);
    assert_eq!(record.outcome, Outcome::Failed("cleanup failed".into()));
}

#[test]
fn panicking_check_is_contained() {
    let cases = vec![
        TestCase::new("panics", |_: &u32| -> Result<()> { panic!("index out of range") }),
        TestCase::new("after", passing),
    ];
    let summary = run_cases(|| Ok(1u32), || Ok(()), &cases);
    let record = summary.get("panics").unwrap();
    assert_eq!(record.stage, Stage::Call);
    assert_eq!(
        record.outcome,
        Outcome::Failed("panicked: index out of range".into())
    );
    assert!(summary.get("after").unwrap().outcome.is_passed());
}

#[test]
fn every_case_gets_one_record_in_order_with_fresh_setup() {
    let setups = Cell::new(0u32);
    let cases = vec![
        TestCase::new("first", passing),
        TestCase::new("second", failing_check),
        TestCase::new("third", passing),
    ];
    let summary = run_cases(
        || {
            setups.set(setups.get() + 1);
            Ok(setups.get())
        },
        || Ok(()),
        &cases,
    );
    assert_eq!(setups.get(), 3);
    let names: Vec<&str> = summary.cases.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["first", "second", "third"]);
    assert_eq!(summary.total(), 3);
    assert_eq!(summary.passed(), 2);
    assert_eq!(summary.failed(), 1);
}

#[test]
fn repeated_runs_do_not_accumulate() {
    let cases = vec![TestCase::new("only", passing)];
    let first = run_cases(|| Ok(1u32), || Ok(()), &cases);
    let second = run_cases(|| Ok(1u32), || Ok(()), &cases);
    assert_eq!(first.total(), 1);
    assert_eq!(second.total(), 1);
    assert_eq!(first, second);
}

fn mixed_summary() -> Summary {
    let cases = vec![
        TestCase::new("test_ok", passing),
        TestCase::new("test_bad", failing_check),
    ];
    run_cases(|| Ok(1u32), || Ok(()), &cases)
}

#[test]
fn table_lists_each_case_with_stage_and_outcome() {
    let text = render_table(&mixed_summary(), false);
    assert!(text.contains("Test Name"));
    assert!(text.contains("Stage"));
    assert!(text.contains("Outcome"));
    assert!(text.contains("test_ok"));
    assert!(text.contains("complete"));
    assert!(text.contains("PASSED"));
    assert!(text.contains("test_bad"));
    assert!(text.contains("call"));
    assert!(text.contains("FAILED: context is 7."));
}

#[test]
fn footer_counts_passes_and_duration() {
    let text = render(
        &mixed_summary(),
        Duration::from_millis(1500),
        OutputKind::Terse,
        false,
    )
    .unwrap();
    assert_eq!(text, "Tests passed: 1/2\tduration: 1.50 seconds\n");
}

#[test]
fn unstyled_report_has_no_escape_codes_even_when_color_is_forced() {
    colored::control::set_override(true);
    let summary = mixed_summary();
    let plain = render(&summary, Duration::from_secs(1), OutputKind::Table, false).unwrap();
    let styled = render(&summary, Duration::from_secs(1), OutputKind::Table, true).unwrap();
    colored::control::unset_override();
    assert!(!plain.contains('\u{1b}'));
    assert!(plain.contains("Tests passed: 1/2\tduration: 1.00 seconds"));
    assert!(styled.contains('\u{1b}'));
}

#[test]
fn json_report_carries_counts_and_records() {
    let text = render(
        &mixed_summary(),
        Duration::from_secs(2),
        OutputKind::Json,
        false,
    )
    .unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["passed"], 1);
    assert_eq!(json["total"], 2);
    assert_eq!(json["cases"][0]["name"], "test_ok");
    assert_eq!(json["cases"][0]["stage"], "complete");
    assert_eq!(json["cases"][0]["outcome"]["result"], "PASSED");
    assert_eq!(json["cases"][1]["stage"], "call");
    assert_eq!(json["cases"][1]["outcome"]["result"], "FAILED");
}
