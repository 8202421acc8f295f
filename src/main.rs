//! healthscore: command-line driver for the assessment engine.
//!
//! # Usage
//!
//! ```bash
//! healthscore assess [--input <path|->] [--user <id>]
//! healthscore trends --history <path> [--timeframe <1month|3months|6months|1year>] [--user <id>]
//! healthscore --help
//! ```
//!
//! `assess` reads one metrics JSON object and prints the assessment.
//! `trends` reads a JSON array of assessments and prints a trend report.
//! JSON goes to stdout; logs go to stderr or a file.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use healthscore::adapters::sanitize::SanitizingMakeWriter;
use healthscore::adapters::InMemoryStore;
use healthscore::application::AssessmentService;
use healthscore::domain::{Assessment, HealthMetrics, Timeframe};

const DEFAULT_USER: &str = "local";

#[derive(Debug, Parser)]
#[command(name = "healthscore")]
#[command(version)]
#[command(about = "Score health metrics and report trends over assessment history", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score one metrics JSON object and print the assessment
    Assess {
        /// Metrics file (stdin if not specified or `-`)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// User the assessment is recorded for
        #[arg(short, long, default_value = DEFAULT_USER)]
        user: String,
    },

    /// Print a trend report over a JSON array of assessments
    Trends {
        /// History file
        #[arg(long)]
        history: PathBuf,

        /// Look-back window: 1month, 3months, 6months or 1year
        #[arg(short, long)]
        timeframe: Option<Timeframe>,

        /// User the history belongs to
        #[arg(short, long, default_value = DEFAULT_USER)]
        user: String,
    },
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path.filter(|p| p.as_os_str() != "-") {
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("Failed to read {}", p.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read metrics from stdin")?;
            Ok(buf)
        }
    }
}

fn run(command: Command) -> Result<()> {
    let output = match command {
        Command::Assess { input, user } => {
            let raw = read_input(input.as_ref())?;
            let metrics: HealthMetrics =
                serde_json::from_str(&raw).context("Metrics JSON is missing or has malformed fields")?;

            let service = AssessmentService::from_env(Arc::new(InMemoryStore::new()));
            let assessment = service.assess(&user, &metrics)?;
            serde_json::to_string_pretty(&assessment)?
        }
        Command::Trends {
            history,
            timeframe,
            user,
        } => {
            let raw = read_input(Some(&history))?;
            let assessments: Vec<Assessment> =
                serde_json::from_str(&raw).context("History must be a JSON array of assessments")?;
            if assessments.is_empty() {
                bail!("History file {} contains no assessments", history.display());
            }

            let store = InMemoryStore::with_history(&user, assessments)?;
            let service = AssessmentService::from_env(Arc::new(store));
            let report = service.trend_report(&user, timeframe)?;
            serde_json::to_string_pretty(&report)?
        }
    };

    println!("{output}");
    Ok(())
}

fn main() -> Result<()> {
    // stdout carries JSON, so logs default to stderr.
    let log_mode = std::env::var("HEALTHSCORE_LOG_MODE").unwrap_or_else(|_| "auto".to_string());

    let (writer, _guard) = if log_mode == "file" {
        let log_file = std::env::var("HEALTHSCORE_LOG_FILE")
            .unwrap_or_else(|_| "healthscore.log".to_string());

        if let Some(parent) = std::path::Path::new(&log_file).parent() {
            // Best-effort: don't fail startup just because the directory is missing.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)?;
        tracing_appender::non_blocking(file)
    } else if log_mode == "stdout" {
        tracing_appender::non_blocking(std::io::stdout())
    } else {
        tracing_appender::non_blocking(std::io::stderr())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(SanitizingMakeWriter::new(writer)),
        )
        .init();

    let cli = Cli::parse();
    run(cli.command)
}
