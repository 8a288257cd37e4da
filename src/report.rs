use crate::types::{CaseRecord, Outcome, Summary};
use colored::Colorize;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputKind {
    #[default]
    Table,
    Json,
    Terse,
}

#[derive(Serialize)]
struct JsonCase<'a> {
    name: &'a str,
    #[serde(flatten)]
    record: &'a CaseRecord,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    cases: Vec<JsonCase<'a>>,
    passed: usize,
    total: usize,
    duration_secs: f64,
}

pub fn render_table(summary: &Summary, styled: bool) -> String {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Test Name", "Stage", "Outcome"]);
    if styled {
        table.enforce_styling();
    } else {
        table.force_no_tty();
    }
    for (name, record) in &summary.cases {
        let color = match record.outcome {
            Outcome::Passed => Color::Green,
            Outcome::Failed(_) => Color::Red,
        };
        table.add_row(vec![
            Cell::new(name).fg(color),
            Cell::new(record.stage).fg(color),
            Cell::new(&record.outcome).fg(color),
        ]);
    }
    table.to_string()
}

pub fn render_footer(summary: &Summary, duration: Duration, styled: bool) -> String {
    let counts = format!("{}/{}", summary.passed(), summary.total());
    let counts = if !styled {
        counts
    } else if summary.failed() > 0 {
        counts.red().bold().to_string()
    } else {
        counts.green().to_string()
    };
    format!(
        "Tests passed: {counts}\tduration: {:.2} seconds",
        duration.as_secs_f64()
    )
}

pub fn render_json(summary: &Summary, duration: Duration) -> serde_json::Result<String> {
    let report = JsonReport {
        cases: summary
            .cases
            .iter()
            .map(|(name, record)| JsonCase { name, record })
            .collect(),
        passed: summary.passed(),
        total: summary.total(),
        duration_secs: duration.as_secs_f64(),
    };
    serde_json::to_string_pretty(&report)
}

pub fn render(
    summary: &Summary,
    duration: Duration,
    kind: OutputKind,
    styled: bool,
) -> serde_json::Result<String> {
    Ok(match kind {
        OutputKind::Table => format!(
            "\n{}\n\n{}\n",
            render_table(summary, styled),
            render_footer(summary, duration, styled)
        ),
        OutputKind::Json => render_json(summary, duration)? + "\n",
        OutputKind::Terse => render_footer(summary, duration, styled) + "\n",
    })
}

pub fn print_report(
    summary: &Summary,
    duration: Duration,
    kind: OutputKind,
    styled: bool,
) -> serde_json::Result<()> {
    print!("{}", render(summary, duration, kind, styled)?);
    Ok(())
}
