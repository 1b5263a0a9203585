use std::io::Write;
use std::path::Path;

use crate::client::AnalyzerClient;
use crate::config::Config;
use crate::error::{Result, SmokeError};
use crate::models::AnalyzeResponse;
use crate::report::{render_report, Outcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// `POST /analyze` with a JSON body.
    #[default]
    Json,
    /// `POST /analyze-file` multipart upload.
    Upload,
}

pub async fn read_profile(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path).await.map_err(|source| SmokeError::ProfileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads the profile, submits it, and writes the report to `out`.
///
/// Only `success: false` is treated as a reportable outcome; file, transport and
/// decoding failures are returned to the caller.
pub async fn run<W: Write>(cfg: &Config, mode: Mode, out: &mut W) -> Result<Outcome> {
    let profile_text = read_profile(&cfg.profile_path).await?;
    tracing::debug!(path = %cfg.profile_path.display(), bytes = profile_text.len(), "profile loaded");

    let client = AnalyzerClient::new(cfg.analyzer_url.clone(), cfg.http_timeout(), &cfg.http_user_agent)?;
    let resp = match mode {
        Mode::Json => client.analyze(profile_text).await?,
        Mode::Upload => {
            let file_name = cfg
                .profile_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "profile.txt".to_string());
            client.analyze_file(file_name, profile_text.into_bytes()).await?
        }
    };
    log_response(&resp);

    let outcome = render_report(&resp, out)?;
    out.flush()?;
    Ok(outcome)
}

/// Probes `GET /health` and writes a one-line status.
pub async fn check_health<W: Write>(cfg: &Config, out: &mut W) -> Result<()> {
    let client = AnalyzerClient::new(cfg.analyzer_url.clone(), cfg.http_timeout(), &cfg.http_user_agent)?;
    let health = client.health().await?;
    writeln!(out, "✅ Service healthy ({})", health.status)?;
    Ok(())
}

fn log_response(resp: &AnalyzeResponse) {
    if !resp.success {
        tracing::info!(error = ?resp.error, "analyze: service reported failure");
        return;
    }
    let summary = resp.data.as_ref().and_then(|d| d.summary.as_ref());
    tracing::info!(
        query_id = ?summary.and_then(|s| s.query_id.as_deref()),
        query_state = ?summary.and_then(|s| s.query_state.as_deref()),
        total_time = ?summary.and_then(|s| s.total_time.as_deref()),
        nodes = resp.top_nodes().map(|n| n.len()).unwrap_or(0),
        "analyze: success"
    );
    for node in resp.top_nodes().unwrap_or_default() {
        tracing::debug!(rank = node.rank, operator = %node.operator_name, plan_node_id = ?node.plan_node_id, "top node");
    }
}
