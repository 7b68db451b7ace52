use anyhow::{Context as _, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use devboard::config::Config;
use devboard::{rest, AppContext};

#[derive(Parser)]
#[command(
    name = "devboard",
    about = "Local operations dashboard — sync the checkout and restart the dev server over HTTP",
    version
)]
struct Args {
    /// Path to the JSON config file
    #[arg(long, env = "DEVBOARD_CONFIG", default_value = "config.json")]
    config: PathBuf,

    /// Log level filter (trace, debug, info, warn, error)
    #[arg(long, env = "DEVBOARD_LOG", default_value = "info")]
    log: String,

    /// Write logs to this file path (rotated daily). Optional.
    #[arg(long, env = "DEVBOARD_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Log output format: "pretty" (human-readable) | "json" (structured)
    #[arg(long, env = "DEVBOARD_LOG_FORMAT", default_value = "pretty")]
    log_format: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _guard = setup_logging(&args.log, args.log_file.as_deref(), &args.log_format);

    // Fail fast: a missing or malformed config aborts before any listener binds.
    let config = Config::load(&args.config)
        .with_context(|| format!("cannot start without config {}", args.config.display()))?;
    info!(
        project_dir = %config.project_dir,
        port = config.port,
        debug = config.debug,
        "config loaded"
    );

    let ctx = Arc::new(AppContext::new(config));
    rest::start_server(ctx).await
}

/// Initialize the tracing subscriber.
/// If `log_file` is set, logs go to both stdout and a daily-rolling file.
/// Returns a `WorkerGuard` that must stay alive for the process lifetime.
///
/// If the log directory cannot be created, falls back to stdout-only logging
/// with a warning — never panics.
fn setup_logging(
    log_level: &str,
    log_file: Option<&std::path::Path>,
    log_format: &str,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let use_json = log_format == "json";

    if let Some(path) = log_file {
        let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
        let filename = path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("devboard.log"));

        // Ensure the directory exists before tracing-appender tries to open it.
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!(
                "warn: could not create log directory '{}': {e} — falling back to stdout",
                dir.display()
            );
            if use_json {
                tracing_subscriber::fmt().json().with_env_filter(log_level).init();
            } else {
                tracing_subscriber::fmt().with_env_filter(log_level).compact().init();
            }
            return None;
        }

        let appender = tracing_appender::rolling::daily(dir, filename);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);

        if use_json {
            tracing_subscriber::registry()
                .with(EnvFilter::new(log_level))
                .with(fmt::layer().json())
                .with(fmt::layer().json().with_writer(non_blocking))
                .init();
        } else {
            tracing_subscriber::registry()
                .with(EnvFilter::new(log_level))
                .with(fmt::layer().compact())
                .with(fmt::layer().with_writer(non_blocking))
                .init();
        }

        Some(guard)
    } else if use_json {
        tracing_subscriber::fmt().json().with_env_filter(log_level).init();
        None
    } else {
        tracing_subscriber::fmt().with_env_filter(log_level).compact().init();
        None
    }
}
