// crates/aegis-dataset-cli/src/main.rs
// ============================================================================
// Module: Aegis Dataset CLI Entry Point
// Description: Command dispatcher for dataset generation and inspection.
// Purpose: Provide a localized CLI over the dataset core and config crates.
// Dependencies: clap, aegis-dataset-cli, aegis-dataset-config, serde_json.
// ============================================================================

//! ## Overview
//! `aegis-dataset` generates the train/eval dataset, explains the decision
//! for a single sensor context, checks tool documents, and validates config
//! files. Results go to stdout; logs and errors go to stderr. All
//! user-facing strings are routed through the i18n catalog.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use aegis_dataset_cli::decide::explain;
use aegis_dataset_cli::generate::GenerateOverrides;
use aegis_dataset_cli::generate::run_generation;
use aegis_dataset_cli::t;
use aegis_dataset_cli::telemetry::LogFormat;
use aegis_dataset_cli::telemetry::init_tracing;
use aegis_dataset_config::DEFAULT_SEED;
use aegis_dataset_config::DatasetConfig;
use aegis_dataset_schema::ToolCatalog;
use clap::ArgAction;
use clap::CommandFactory;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of a sensor context JSON input.
const MAX_CONTEXT_BYTES: usize = 1024 * 1024;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "aegis-dataset", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Log line format.
    #[arg(long, value_enum, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormatArg,
    /// Log at debug level unless `RUST_LOG` is set.
    #[arg(long, action = ArgAction::SetTrue, global = true)]
    verbose: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Log format selection.
#[derive(ValueEnum, Clone, Copy, Debug)]
enum LogFormatArg {
    /// Human-readable lines.
    Text,
    /// Newline-delimited JSON.
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Text => Self::Text,
            LogFormatArg::Json => Self::Json,
        }
    }
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate train.jsonl, eval_a.jsonl, and eval_b.jsonl.
    Generate(GenerateCommand),
    /// Explain the decision and tool calls for one sensor context.
    Decide(DecideCommand),
    /// Tool document utilities.
    Catalog {
        /// Selected catalog subcommand.
        #[command(subcommand)]
        command: CatalogCommand,
    },
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Tool document path overrides shared by several commands.
#[derive(Args, Debug, Default)]
struct CatalogArgs {
    /// Context tool document (defaults to the bundled document).
    #[arg(long, value_name = "PATH")]
    context_schema: Option<PathBuf>,
    /// Action tool document (defaults to the bundled document).
    #[arg(long, value_name = "PATH")]
    action_schema: Option<PathBuf>,
}

/// Arguments for the `generate` command.
#[derive(Args, Debug)]
struct GenerateCommand {
    /// Optional config file path (defaults to aegis-dataset.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// RNG seed.
    #[arg(long, value_name = "N")]
    seed: Option<u64>,
    /// Training split size.
    #[arg(long, value_name = "N")]
    train: Option<usize>,
    /// First evaluation split size.
    #[arg(long = "eval-a", value_name = "N")]
    eval_a: Option<usize>,
    /// Second evaluation split size.
    #[arg(long = "eval-b", value_name = "N")]
    eval_b: Option<usize>,
    /// Output directory.
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,
    /// Attempts per sample before the run aborts.
    #[arg(long = "max-tries", value_name = "N")]
    max_tries: Option<usize>,
    /// Tool document overrides.
    #[command(flatten)]
    catalog: CatalogArgs,
}

/// Arguments for the `decide` command.
#[derive(Args, Debug)]
struct DecideCommand {
    /// Sensor context JSON object keyed by context tool name.
    #[arg(long, value_name = "PATH")]
    context: PathBuf,
    /// RNG seed for tool-call argument draws.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_SEED)]
    seed: u64,
    /// Tool document overrides.
    #[command(flatten)]
    catalog: CatalogArgs,
}

/// Catalog subcommands.
#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Load both tool documents and report tool counts.
    Check(CatalogArgs),
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a configuration file.
    Validate(ConfigValidateCommand),
}

/// Arguments for `config validate`.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to aegis-dataset.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

/// Errors raised by bounded file reads.
#[derive(Debug, Error)]
enum ReadLimitError {
    /// I/O failure while reading.
    #[error("{0}")]
    Io(std::io::Error),
    /// The file exceeds the limit.
    #[error("{size} bytes exceeds limit {limit}")]
    TooLarge {
        /// Observed size in bytes.
        size: u64,
        /// Limit in bytes.
        limit: usize,
    },
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.log_format.into(), cli.verbose)
        .map_err(|err| CliError::new(t!("telemetry.init_failed", error = err)))?;

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Generate(command) => command_generate(command),
        Commands::Decide(command) => command_decide(&command),
        Commands::Catalog {
            command,
        } => command_catalog(&command),
        Commands::Config {
            command,
        } => command_config(&command),
    }
}

/// Prints top-level help.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))
}

// ============================================================================
// SECTION: Generate Command
// ============================================================================

/// Executes a dataset run and prints the per-split bucket counts.
fn command_generate(command: GenerateCommand) -> CliResult<ExitCode> {
    let config = DatasetConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let overrides = GenerateOverrides {
        seed: command.seed,
        train: command.train,
        eval_a: command.eval_a,
        eval_b: command.eval_b,
        out_dir: command.out_dir,
        max_attempts: command.max_tries,
        context_schema: command.catalog.context_schema,
        action_schema: command.catalog.action_schema,
    };
    let config = overrides
        .apply(config)
        .map_err(|err| CliError::new(t!("config.override_invalid", error = err)))?;
    let summary = run_generation(&config)
        .map_err(|err| CliError::new(t!("generate.failed", error = err)))?;
    write_json_pretty(&summary)?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Decide Command
// ============================================================================

/// Prints candidates, decision, and tool calls for one context file.
fn command_decide(command: &DecideCommand) -> CliResult<ExitCode> {
    let catalog = load_catalog(&command.catalog)?;
    let context = read_json_input(&command.context, &t!("input.kind.context"), MAX_CONTEXT_BYTES)?;
    let report = explain(&catalog, &context, command.seed)
        .map_err(|err| CliError::new(t!("decide.failed", error = err)))?;
    write_json_pretty(&report)?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Catalog Commands
// ============================================================================

/// Dispatches catalog subcommands.
fn command_catalog(command: &CatalogCommand) -> CliResult<ExitCode> {
    match command {
        CatalogCommand::Check(args) => {
            let catalog = load_catalog(args)?;
            aegis_dataset_core::require_generator_tools(&catalog)
                .map_err(|err| CliError::new(t!("catalog.load_failed", error = err)))?;
            write_stdout_line(&t!(
                "catalog.check.ok",
                context = catalog.context().len(),
                action = catalog.action().len()
            ))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Loads the tool catalog with optional path overrides.
fn load_catalog(args: &CatalogArgs) -> CliResult<ToolCatalog> {
    ToolCatalog::load(args.context_schema.as_deref(), args.action_schema.as_deref())
        .map_err(|err| CliError::new(t!("catalog.load_failed", error = err)))
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: &ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => {
            let _config = DatasetConfig::load(command.config.as_deref())
                .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
            write_stdout_line(&t!("config.validate.ok"))
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Reads and parses a JSON file no larger than `max_bytes`.
fn read_json_input(path: &Path, kind: &str, max_bytes: usize) -> CliResult<Value> {
    let bytes = read_bytes_with_limit(path, max_bytes).map_err(|err| match err {
        ReadLimitError::Io(error) => CliError::new(t!(
            "input.read_failed",
            kind = kind,
            path = path.display(),
            error = error
        )),
        ReadLimitError::TooLarge {
            size,
            limit,
        } => CliError::new(t!(
            "input.read_too_large",
            kind = kind,
            path = path.display(),
            size = size,
            limit = limit
        )),
    })?;
    serde_json::from_slice(&bytes).map_err(|err| {
        CliError::new(t!("input.parse_failed", kind = kind, path = path.display(), error = err))
    })
}

/// Reads a file, failing when it exceeds `max_bytes`.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let metadata = file.metadata().map_err(ReadLimitError::Io)?;
    let size = metadata.len();
    let limit = u64::try_from(max_bytes).map_err(|_| ReadLimitError::TooLarge {
        size,
        limit: max_bytes,
    })?;
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let mut limited = file.take(limit.saturating_add(1));
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        return Err(ReadLimitError::TooLarge {
            size: u64::try_from(bytes.len()).unwrap_or(u64::MAX),
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Writes pretty-printed JSON to stdout.
fn write_json_pretty<T: Serialize>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::new(t!("output.serialize_failed", error = err)))?;
    write_stdout_line(&text).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
