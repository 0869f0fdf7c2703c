use aegis::config::DEFAULT_THRESHOLD;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

/// Environment variable holding the log filter (e.g. `AEGIS_LOG=debug`)
const LOG_ENV_VAR: &str = "AEGIS_LOG";

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Audit neural network code for security weaknesses with Gemini", long_about = None)]
struct Cli {
    /// Path to model file
    #[arg(long)]
    file: PathBuf,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Security threshold
    #[arg(long, default_value_t = DEFAULT_THRESHOLD, allow_negative_numbers = true)]
    threshold: i64,

    /// Model identifier
    #[arg(long, env = "AEGIS_MODEL")]
    model: Option<String>,

    /// API base URL
    #[arg(long, env = "AEGIS_ENDPOINT")]
    endpoint: Option<String>,

    /// Output results as JSON
    #[arg(short, long)]
    json: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let exit_code = commands::audit::execute(commands::audit::AuditArgs {
        file: cli.file,
        api_key: cli.api_key,
        threshold: cli.threshold,
        model: cli.model,
        endpoint: cli.endpoint,
        json: cli.json,
    });
    std::process::exit(exit_code);
}
