use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glob::glob;
use hubscope_core::{HubFamily, ReplayReport};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hubscope")]
#[command(version)]
#[command(
    about = "Decoder for IoT hub telemetry payloads (V5008 / G6000).",
    long_about = None,
    after_help = "Examples:\n  hubscope decode --topic V5008Upload/2437871205 CB01000030390C\n  hubscope replay capture.jsonl -o report.json\n  hubscope replay capture.jsonl --stdout --pretty"
)]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a single payload given as hex text and print it as JSON.
    Decode {
        /// Topic the payload was received on (selects the device family)
        #[arg(short, long)]
        topic: String,

        /// Payload as hex text
        payload: String,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Print the wire layout of the decoded shape to stderr
        #[arg(long)]
        layout: bool,
    },
    /// Replay a JSON Lines capture of (topic, payload) records in order.
    #[command(
        after_help = "Input records:\n  {\"topic\": \"V5008Upload/1\", \"payload\": \"CB01...\", \"ts\": 1700000000}\n\nExamples:\n  hubscope replay capture.jsonl -o report.json\n  hubscope replay capture.jsonl --stdout --strict"
    )]
    Replay {
        /// Path to a .jsonl capture (glob patterns must match one file)
        input: PathBuf,

        /// Output report path (JSON)
        #[arg(short = 'o', long, required_unless_present = "stdout")]
        report: Option<PathBuf>,

        /// Write JSON report to stdout
        #[arg(long, conflicts_with = "report")]
        stdout: bool,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,

        /// Exit with a non-zero code if any record failed to decode
        #[arg(long)]
        strict: bool,

        /// List records that failed to decode after the replay
        #[arg(long)]
        list_failures: bool,
    },
}

struct ReplayOptions {
    input: PathBuf,
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
    strict: bool,
    list_failures: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Decode {
            topic,
            payload,
            pretty,
            compact,
            layout,
        } => cmd_decode(&topic, &payload, pretty, compact, layout),
        Commands::Replay {
            input,
            report,
            stdout,
            pretty,
            compact,
            quiet,
            strict,
            list_failures,
        } => cmd_replay(ReplayOptions {
            input,
            report,
            stdout,
            pretty,
            compact,
            quiet,
            strict,
            list_failures,
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(err.to_string(), None)
    }
}

fn cmd_decode(
    topic: &str,
    payload: &str,
    pretty: bool,
    compact: bool,
    layout: bool,
) -> Result<(), CliError> {
    let message = hubscope_core::decode_hex(topic, payload).map_err(|err| {
        CliError::new(
            format!(
                "decode failed for {}: {}",
                payload.trim().to_ascii_uppercase(),
                err
            ),
            Some(decode_hint(topic)),
        )
    })?;
    let json = serialize_json(&message, pretty, compact)?;
    println!("{}", json);
    if layout {
        match message.msg_format() {
            Some(format) => eprintln!("layout: {}", format),
            None => eprintln!("layout: unknown message id"),
        }
    }
    debug!(message_type = message.message_type(), "decoded single payload");
    Ok(())
}

fn decode_hint(topic: &str) -> String {
    match hubscope_core::classify_topic(topic) {
        None => "topic must start with V5008 or G6000".to_string(),
        Some(HubFamily::V6800) => "V6800 hubs publish JSON, which is not decoded here".to_string(),
        Some(_) => "check the payload hex and its leading message id".to_string(),
    }
}

fn cmd_replay(opts: ReplayOptions) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&opts.input)?;
    validate_input_file(&resolved_input)?;
    let input_abs = fs::canonicalize(&resolved_input)
        .with_context(|| format!("Failed to resolve input path: {}", resolved_input.display()))?;
    let report = if opts.stdout {
        None
    } else {
        Some(opts.report.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };

    if let Some(report_path) = report.as_ref() {
        ensure_distinct_output(report_path, &input_abs)?;
    }

    let rep = hubscope_core::replay_file(&resolved_input)
        .map_err(|err| CliError::new(format!("replay failed: {}", err), None))?;
    let json = serialize_json(&rep, opts.pretty, opts.compact)?;
    info!(
        records = rep.input.records,
        decoded = rep.summary.decoded,
        failed = rep.summary.failed,
        "replay complete"
    );

    match report {
        None => print!("{}", json),
        Some(report) => {
            if let Some(parent) = report.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
            }
            fs::write(&report, json)
                .with_context(|| format!("Failed to write report: {}", report.display()))?;
            if !opts.quiet {
                eprintln!("OK: report written -> {}", report.display());
            }
        }
    }

    if opts.list_failures && !opts.quiet {
        print_failures(&rep);
    }
    if opts.strict && rep.summary.failed > 0 {
        return Err(CliError::new(
            format!("{} record(s) failed to decode", rep.summary.failed),
            Some("use --list-failures to inspect".to_string()),
        ));
    }
    Ok(())
}

fn ensure_distinct_output(report_path: &Path, input_abs: &Path) -> Result<(), CliError> {
    let Some(file_name) = report_path.file_name() else {
        return Err(CliError::new(
            format!("invalid report path: {}", report_path.display()),
            Some("pass a file path to -o/--report".to_string()),
        ));
    };
    let dir = match report_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    // A report directory that does not exist yet cannot contain the input.
    let Ok(dir_abs) = fs::canonicalize(dir) else {
        return Ok(());
    };
    if dir_abs.join(file_name) == input_abs {
        return Err(CliError::new(
            format!("report path must differ from input: {}", report_path.display()),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn serialize_json<T: serde::Serialize>(
    value: &T,
    pretty: bool,
    compact: bool,
) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(value)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(value)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn print_failures(rep: &ReplayReport) {
    eprintln!("Decode failures:");
    for entry in rep.entries.iter().filter(|entry| entry.error.is_some()) {
        eprintln!(
            "  #{} [{}] {} {}",
            entry.index,
            entry.topic,
            entry.raw_hex,
            entry.error.as_deref().unwrap_or_default()
        );
    }
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use a .jsonl capture file".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use a .jsonl capture file".to_string()),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "jsonl" && ext != "ndjson" {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected a .jsonl or .ndjson file".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let pattern_error = |detail: String| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", detail)),
        )
    };
    let mut matches = glob(&pattern)
        .map_err(|err| pattern_error(err.msg.to_string()))?
        .filter_map(|entry| match entry {
            Ok(path) if path.is_file() => Some(Ok(path)),
            Ok(_) => None,
            Err(err) => Some(Err(pattern_error(err.to_string()))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    match matches.len() {
        0 => Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern; expected .jsonl".to_string()),
        )),
        1 => Ok(matches.remove(0)),
        count => {
            let listed = matches
                .iter()
                .take(3)
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            let more = if count > 3 { ", ..." } else { "" };
            Err(CliError::new(
                format!(
                    "multiple files match pattern '{}' ({} matches); matches: {}{}",
                    pattern, count, listed, more
                ),
                Some("pass a single capture file, or run once per file".to_string()),
            ))
        }
    }
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
