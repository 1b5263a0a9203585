use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

use top_nodes_smoke::config::{Config, ConfigOverrides, LogFormat};
use top_nodes_smoke::runner::{self, Mode};

/// Sends a profile to the analysis service and prints its top time-consuming nodes.
#[derive(Parser)]
#[command(name = "top-nodes-smoke", version)]
struct Cli {
    /// Profile file to submit (env: PROFILE_PATH)
    #[arg(long)]
    profile: Option<PathBuf>,
    /// Analysis service base URL (env: ANALYZER_URL)
    #[arg(long)]
    url: Option<String>,
    /// Request timeout in milliseconds; unbounded when unset (env: HTTP_TIMEOUT_MS)
    #[arg(long)]
    timeout_ms: Option<String>,
    /// Upload through the multipart /analyze-file route
    #[arg(long, conflicts_with = "health")]
    upload: bool,
    /// Only probe GET /health
    #[arg(long)]
    health: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    let cfg = Config::from_env_with_overrides(ConfigOverrides {
        profile_path: cli.profile,
        analyzer_url: cli.url,
        http_timeout_ms: cli.timeout_ms,
    })?;

    init_logging(cfg.log_format);
    tracing::info!(
        profile = %cfg.profile_path.display(),
        analyzer_url = %cfg.analyzer_url,
        timeout_ms = ?cfg.http_timeout_ms,
        "loaded config"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if cli.health {
        runner::check_health(&cfg, &mut out).await?;
        return Ok(());
    }

    let mode = if cli.upload { Mode::Upload } else { Mode::Json };
    let outcome = runner::run(&cfg, mode, &mut out).await?;
    tracing::info!(?outcome, "smoke test finished");
    Ok(())
}

// Logs go to stderr; stdout carries only the report.
fn init_logging(format: LogFormat) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    match format {
        LogFormat::Json => builder
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(true)
            .init(),
        LogFormat::Pretty => builder.init(),
    }
}
