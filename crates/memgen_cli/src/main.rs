//! memgen CLI: generates synthesizable VHDL for simulator RAM components.
//!
//! Provides `memgen init` for project scaffolding, `memgen check` for the
//! per-instance feasibility report, `memgen plan` to inspect the signals of
//! one instance, and `memgen generate` to write the entity and port map of
//! every RAM in the project.

#![warn(missing_docs)]

mod check;
mod generate;
mod init;
mod pipeline;
mod plan;

use std::process;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

/// memgen: RAM component generator.
#[derive(Parser, Debug)]
#[command(name = "memgen", version, about = "RAM component HDL generator")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a custom `memgen.toml` configuration file or its directory.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new memgen project.
    Init {
        /// Project name (creates a subdirectory). If omitted, initializes in
        /// the current directory.
        name: Option<String>,
    },
    /// Report which RAM instances can be generated.
    Check(CheckArgs),
    /// Print the signal plan of one RAM instance as JSON.
    Plan(PlanArgs),
    /// Generate HDL for every RAM instance.
    Generate(GenerateArgs),
}

/// Arguments for the `memgen check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Output format for the report.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `memgen plan` subcommand.
#[derive(Parser, Debug)]
pub struct PlanArgs {
    /// Name of the `[[ram]]` instance.
    pub instance: String,
}

/// Arguments for the `memgen generate` subcommand.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Output directory (default: `output_dir` from `memgen.toml`).
    #[arg(short, long)]
    pub out: Option<String>,

    /// Only generate the named instances.
    #[arg(long, num_args = 1..)]
    pub only: Vec<String>,

    /// Output format for diagnostics.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_level(cli.quiet, cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    let color = match cli.color {
        ColorChoice::Auto => atty_is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        color,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Init { name } => init::run(name, &global),
        Command::Check(ref args) => check::run(args, &global),
        Command::Plan(ref args) => plan::run(args, &global),
        Command::Generate(ref args) => generate::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// The tracing filter for the `--quiet`/`-v` flags.
fn log_level(quiet: bool, verbose: u8) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Rough terminal detection from the TERM env var.
fn atty_is_terminal() -> bool {
    std::env::var("TERM").is_ok()
}
