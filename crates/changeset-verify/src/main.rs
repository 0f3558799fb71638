mod environment;
mod error;
mod output;
mod verify;

use std::path::PathBuf;
use std::process::ExitCode;

use changeset_core::ReaderMode;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "changeset-verify")]
#[command(version)]
#[command(
    about = "Fail CI when a touched workspace package has no changeset entry",
    long_about = None
)]
struct Cli {
    /// Repository root to run collaborator commands in (default: current directory)
    #[arg(long = "path", short = 'C')]
    path: Option<PathBuf>,

    /// JSON array of changed file paths, relative to the repository root
    #[arg(long, env = "INPUT_CHANGED_FILES", default_value = "[]")]
    changed_files: String,

    /// Name of the triggering event, e.g. `pull_request` or `push`
    #[arg(long, env = "GITHUB_EVENT_NAME")]
    event_name: String,

    /// Path to the JSON webhook payload of the triggering event
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: Option<PathBuf>,

    /// Identifier of this run, used to name the status file
    #[arg(long, env = "GITHUB_RUN_ID", default_value = "local")]
    run_id: String,

    /// How to read pending releases, overriding the config file
    #[arg(long, value_enum)]
    reader: Option<ReaderMode>,

    /// Config file (default: .changeset/verify.toml under the repository root)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Suppress progress lines
    #[arg(short, long)]
    quiet: bool,

    /// Log collaborator invocations and decisions to stderr
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let root = match resolve_root(cli.path) {
        Ok(path) => path,
        Err(e) => {
            print_error(&e);
            return ExitCode::FAILURE;
        }
    };

    let args = verify::VerifyArgs {
        changed_files: cli.changed_files,
        event_name: cli.event_name,
        event_path: cli.event_path,
        run_id: cli.run_id,
        reader: cli.reader,
        config: cli.config,
        quiet: cli.quiet,
    };

    if let Err(e) = verify::run(&args, &root) {
        print_error(&e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_root(path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    match path {
        Some(p) => Ok(p),
        None => std::env::current_dir().map_err(CliError::CurrentDir),
    }
}

fn print_error(error: &CliError) {
    eprintln!("error: {error}");

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("caused by: {cause}");
        source = std::error::Error::source(cause);
    }

    if environment::is_github_actions() {
        println!("{}", output::error_annotation(&error.to_string()));
    }
}
