use anyhow::{Context, Result};
use civo_opencp::config::Config;
use civo_opencp::server::{build_router, AppState};
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// OpenCP gateway for Civo
#[derive(Parser, Debug)]
#[command(name = "civo-opencp", version = civo_opencp::VERSION, about, long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(short, long, env = "OPENCP_LISTEN")]
    listen: Option<SocketAddr>,

    /// Civo API base URL
    #[arg(long, env = "CIVO_API_URL")]
    api_url: Option<String>,

    /// Region used when REGION is unset at call time
    #[arg(long, env = "CIVO_DEFAULT_REGION")]
    default_region: Option<String>,

    /// Config file (defaults to <config dir>/civo-opencp/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level, overridden by RUST_LOG when set
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,

    /// Write logs to this file instead of stdout
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

fn setup_logging(level: LogLevel, log_file: Option<&PathBuf>) -> Result<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    let (writer, guard) = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            tracing_appender::non_blocking(file)
        },
        None => tracing_appender::non_blocking(std::io::stdout()),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(log_file.is_none())
        .with_target(true)
        .init();

    Ok(guard)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level, args.log_file.as_ref())?;

    let config = Config::load(args.config.as_deref())?.with_overrides(
        args.listen,
        args.api_url,
        args.default_region,
    );

    tracing::info!(
        version = civo_opencp::VERSION,
        api_url = %config.api_url,
        default_region = ?config.default_region,
        "civo-opencp starting"
    );

    let listen = config.listen;
    let state = AppState::new(config).context("failed to build provider client")?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .with_context(|| format!("failed to bind {}", listen))?;
    tracing::info!("listening on {}", listen);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}
