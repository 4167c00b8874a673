//! refmark CLI binary entry point.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use refmark::cli::{run_generate, GenerateOptions};
use refmark::links::{DEFAULT_LINK_EXTENSION, DEFAULT_LINK_TEMPLATE};

// ============================================================================
// CLI Structure
// ============================================================================

/// Generate Markdown API reference pages from a structure document.
#[derive(Parser, Debug)]
#[command(name = "refmark", version, about = "Markdown API reference generator")]
struct Cli {
    /// Structure document produced by the static-analysis tool (JSON).
    input: PathBuf,

    /// Output directory for generated pages.
    #[arg(default_value = ".")]
    out_dir: PathBuf,

    /// Link template; %c is replaced with the short type name.
    #[arg(long, default_value = DEFAULT_LINK_TEMPLATE)]
    link_template: String,

    /// Extension the .md link targets are rewritten to.
    #[arg(long, default_value = DEFAULT_LINK_EXTENSION)]
    link_extension: String,

    /// Skip the ApiIndex.md namespace tree.
    #[arg(long)]
    no_index: bool,

    /// Log level for tracing output.
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

/// Log level for tracing output.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.log_level);

    let options = GenerateOptions {
        link_template: cli.link_template,
        link_extension: cli.link_extension,
        index: !cli.no_index,
    };

    match run_generate(&cli.input, &cli.out_dir, &options) {
        Ok(summary) => {
            println!(
                "Generated {} pages for {} types in {}",
                summary.pages,
                summary.types,
                cli.out_dir.display()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::from(err.error_code().code())
        }
    }
}

/// Initialize tracing subscriber.
fn init_tracing(level: LogLevel) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_tracing_level().to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
