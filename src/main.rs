mod cli_logger;

use anyhow::{Context as _, Result};
use clap::Parser;
use speedclip::{
    ClipOptions, ClipReport, Config, DEFAULT_CONFIG_FILE, DocumentPath, TimeOffset, Window,
    clip_file,
};
use tracing_subscriber::EnvFilter;

use std::path::PathBuf;
use std::process::ExitCode;

use crate::cli_logger::CliLogger;

const LONG_ABOUT: &str = "Speedclip crops speedscope files by timestamp.

Durations are offsets from the start of each profile, such as 33s, 1.5m or
2h45m. Negative durations count back from the end of each profile. An end of
0 keeps everything after the start.

Examples:

speedclip --start 33s --end 36.5s profile.json > clipped.json

speedclip --start 5m --end 10m profile.json clipped.json

speedclip --start=-30s --end 0 profile.json last-30s.json";

#[derive(Debug, Parser)]
#[command(name = "speedclip", version, about = "Trim speedscope files", long_about = LONG_ABOUT)]
struct Cli {
    /// Start timestamp.
    #[arg(short, long, allow_hyphen_values = true, value_name = "DURATION")]
    start: TimeOffset,

    /// End timestamp (0 for the end of the profile).
    #[arg(short, long, allow_hyphen_values = true, value_name = "DURATION")]
    end: TimeOffset,

    /// Speedscope file to read, or `-` for stdin.
    #[arg(value_name = "INPUT")]
    input: DocumentPath,

    /// Where to write the clipped file, or `-` for stdout.
    #[arg(value_name = "OUTPUT", default_value = "-")]
    output: DocumentPath,

    /// Pretty-print the clipped document.
    #[arg(long)]
    pretty: bool,

    /// Print a per-profile summary of what was kept to stderr.
    #[arg(long)]
    report: bool,

    /// Render the report and errors as JSON.
    #[arg(long)]
    json: bool,

    #[arg(long)]
    no_color: bool,

    /// Log at debug level (RUST_LOG takes precedence).
    #[arg(short, long)]
    verbose: bool,

    #[arg(long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "speedclip=debug" } else { "speedclip=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli, config: &Config) -> Result<ClipReport> {
    let options = ClipOptions {
        window: Window::new(cli.start, cli.end),
        pretty: cli.pretty || config.pretty,
    };
    clip_file(&cli.input, &cli.output, &options)
        .with_context(|| format!("failed to clip {}", cli.input))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load_optional(&cli.config);
    let logger = CliLogger::new(cli.json, cli.no_color);

    match run(&cli, &config) {
        Ok(report) => {
            if cli.report || config.report {
                if let Err(err) = logger.print_report(&report) {
                    logger.print_error(&format!("{err:#}"));
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            logger.print_error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
