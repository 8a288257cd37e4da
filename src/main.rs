use anyhow::{Context, Result};
use api_verify::config::{Endpoint, Settings};
use api_verify::fetch::RetryPolicy;
use api_verify::http::HttpTransport;
use api_verify::report::{OutputKind, print_report};
use api_verify::suite::CategorySuite;
use clap::{Parser, ValueEnum};
use colored::control::set_override as set_color_override;
use std::time::Duration;
use tracing::info;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Terse,
}

impl From<OutputFormat> for OutputKind {
    fn from(v: OutputFormat) -> Self {
        match v {
            OutputFormat::Table => OutputKind::Table,
            OutputFormat::Json => OutputKind::Json,
            OutputFormat::Terse => OutputKind::Terse,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Verify the category-details API response")]
struct Cli {
    /// Endpoint to query
    #[arg(long, env = "API_VERIFY_ENDPOINT", default_value = api_verify::config::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Attempts per fetch before giving up
    #[arg(long, default_value_t = api_verify::fetch::DEFAULT_ATTEMPTS,
          value_parser = clap::value_parser!(u32).range(1..))]
    attempts: u32,

    /// Pause between attempts
    #[arg(long = "retry-delay-ms", value_name = "MS", default_value_t = 0)]
    retry_delay_ms: u64,

    /// Per-request timeout
    #[arg(long = "timeout-secs", value_name = "SECS", default_value_t = 30,
          value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: u64,

    /// Report format
    #[arg(short = 'o', long = "output", value_enum, default_value = "table")]
    output: OutputFormat,

    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    #[arg(long = "no-color")]
    no_color: bool,

    /// Suppress the final report
    #[arg(short = 'q', long = "silent")]
    silent: bool,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            endpoint: Endpoint::new(self.endpoint.trim()),
            retry: RetryPolicy::new(self.attempts, Duration::from_millis(self.retry_delay_ms)),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

fn run(cli: &Cli) -> Result<bool> {
    let settings = cli.settings();
    info!(
        endpoint = %settings.endpoint.address,
        attempts = settings.retry.max_attempts,
        "starting suite"
    );

    let transport = HttpTransport::new(settings.timeout)?;
    let suite = CategorySuite::new(transport, settings.endpoint, settings.retry);
    let run = suite.run();

    if !cli.silent {
        print_report(&run.summary, run.duration, cli.output.into(), !cli.no_color)
            .context("Failed to render report")?;
    }
    info!(
        total = run.summary.total(),
        passed = run.summary.passed(),
        failed = run.summary.failed(),
        "suite finished"
    );
    Ok(run.summary.failed() == 0)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "api_verify=info".to_string())
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "api_verify=warn".to_string())
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    set_color_override(!cli.no_color);

    match run(&cli) {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(2);
        }
    }
}
