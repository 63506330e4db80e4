use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glob::glob;
use log::debug;
use mpkscan_core::{InspectError, InspectOptions, Report};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("MPKSCAN_BUILD_COMMIT"),
    " (",
    env!("MPKSCAN_BUILD_COMMIT_FULL"),
    ")\nbuilt: ",
    env!("MPKSCAN_BUILD_DATE"),
);

const EXAMPLES: &str = "Examples:\n  mpkscan inspect doc.mpk -o report.json\n  mpkscan dump doc.mpk --stdout --pretty\n  mpkscan inspect doc.mpk --path /servers/0 --stdout";

#[derive(Parser, Debug)]
#[command(name = "mpkscan")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Zero-copy MessagePack inspector: structural JSON reports of encoded buffers.",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Inspect the first element of a MessagePack file and write a JSON report.
    #[command(alias = "dump")]
    #[command(after_help = EXAMPLES)]
    Inspect {
        /// Path (or glob matching one file) of an encoded buffer
        input: PathBuf,

        /// Element to report, as a /-separated path of keys and indexes
        #[arg(long)]
        path: Option<String>,

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

        /// Collection levels to expand below the reported element
        #[arg(long, default_value_t = mpkscan_core::DEFAULT_MAX_DEPTH)]
        max_depth: usize,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
}

struct OutputOptions {
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Inspect {
            input,
            path,
            report,
            stdout,
            pretty,
            compact,
            max_depth,
            quiet,
        } => {
            let options = InspectOptions {
                path,
                max_depth,
                ..InspectOptions::default()
            };
            let output = OutputOptions {
                report,
                stdout,
                pretty,
                compact,
                quiet,
            };
            cmd_inspect(input, &options, output)
        }
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
    let env = env_logger::Env::default().default_filter_or("warn");
    let mut builder = env_logger::Builder::from_env(env);
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
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
        CliError::new(format!("{err:#}"), None)
    }
}

impl From<InspectError> for CliError {
    fn from(err: InspectError) -> Self {
        match err {
            InspectError::Source(err) => CliError::new(
                format!("failed to load input: {err}"),
                Some("pass a non-empty, readable file".to_string()),
            ),
            InspectError::Decode(err) => CliError::new(
                format!("decode failed [{}]: {err}", err.code()),
                Some("check that the input is a MessagePack buffer and the path exists".to_string()),
            ),
            InspectError::Path(err) => CliError::new(
                format!("invalid --path: {err}"),
                Some("escape '/' as ~1 and '~' as ~0 inside keys".to_string()),
            ),
            InspectError::DepthLimit { requested, limit } => CliError::new(
                format!("--max-depth {requested} exceeds the limit of {limit}"),
                Some(format!("pass --max-depth {limit} or lower")),
            ),
        }
    }
}

fn cmd_inspect(
    input: PathBuf,
    options: &InspectOptions,
    output: OutputOptions,
) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;

    let report_path = if output.stdout {
        None
    } else {
        let path = output.report.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?;
        ensure_distinct_paths(&resolved_input, &path)?;
        Some(path)
    };

    debug!("inspecting {}", resolved_input.display());
    let rep = mpkscan_core::inspect_file(&resolved_input, options)?;
    let json = serialize_report(&rep, output.pretty, output.compact)?;

    let Some(report_path) = report_path else {
        println!("{}", json);
        return Ok(());
    };

    if let Some(parent) = report_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(&report_path, json)
        .with_context(|| format!("Failed to write report: {}", report_path.display()))?;

    if !output.quiet {
        eprintln!("OK: report written -> {}", report_path.display());
    }
    Ok(())
}

fn ensure_distinct_paths(input: &Path, report_path: &Path) -> Result<(), CliError> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let report_dir = match report_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::canonicalize(parent),
        _ => fs::canonicalize("."),
    };
    // A missing output directory cannot contain the input.
    let Ok(report_dir) = report_dir else {
        return Ok(());
    };
    let file_name = report_path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid report path: {}", report_path.display()))?;
    if report_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!(
                "report path must differ from input: {}",
                report_path.display()
            ),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn serialize_report(rep: &Report, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass the path of a MessagePack-encoded file".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass the path of a MessagePack-encoded file".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    match matches.len() {
        0 => Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        )),
        1 => Ok(matches.remove(0)),
        count => {
            let mut listed = matches
                .iter()
                .take(3)
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            if count > 3 {
                listed.push_str(", ...");
            }
            Err(CliError::new(
                format!(
                    "multiple files match pattern '{}' ({} matches); matches: {}",
                    pattern, count, listed
                ),
                Some("pass a single file, or run once per file".to_string()),
            ))
        }
    }
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
