use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, SmokeError};

pub const DEFAULT_PROFILE_PATH: &str = "profiles/profile4.txt";
pub const DEFAULT_ANALYZER_URL: &str = "http://localhost:3030";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub profile_path: PathBuf,
    pub analyzer_url: String,
    // None blocks until the service answers
    pub http_timeout_ms: Option<u64>,
    pub http_user_agent: String,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile_path: PathBuf::from(DEFAULT_PROFILE_PATH),
            analyzer_url: DEFAULT_ANALYZER_URL.to_string(),
            http_timeout_ms: None,
            http_user_agent: default_user_agent(),
            log_format: LogFormat::Pretty,
        }
    }
}

/// Command-line values; each one set here wins over its env counterpart.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub profile_path: Option<PathBuf>,
    pub analyzer_url: Option<String>,
    pub http_timeout_ms: Option<String>,
}

fn default_user_agent() -> String {
    format!("top-nodes-smoke/{}", env!("CARGO_PKG_VERSION"))
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_overrides(ConfigOverrides::default())
    }

    pub fn from_env_with_overrides(overrides: ConfigOverrides) -> Result<Self> {
        Self::from_lookup_with_overrides(|k| std::env::var(k).ok(), overrides)
    }

    pub fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup_with_overrides(get, ConfigOverrides::default())
    }

    pub fn from_lookup_with_overrides<F>(get: F, overrides: ConfigOverrides) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let profile_path = overrides
            .profile_path
            .or_else(|| get("PROFILE_PATH").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROFILE_PATH));
        let analyzer_url = overrides
            .analyzer_url
            .or_else(|| get("ANALYZER_URL"))
            .unwrap_or_else(|| DEFAULT_ANALYZER_URL.to_string());
        // env timeout is only parsed when the command line leaves it unset
        let http_timeout_ms = match overrides.http_timeout_ms {
            Some(raw) => Some(parse_timeout_ms("--timeout-ms", &raw)?),
            None => match get("HTTP_TIMEOUT_MS").filter(|v| !v.trim().is_empty()) {
                Some(raw) => Some(parse_timeout_ms("HTTP_TIMEOUT_MS", &raw)?),
                None => None,
            },
        };
        let http_user_agent = get("HTTP_USER_AGENT").unwrap_or_else(default_user_agent);
        let log_format = match get("LOG_FORMAT") {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self { profile_path, analyzer_url, http_timeout_ms, http_user_agent, log_format })
    }

    pub fn http_timeout(&self) -> Option<Duration> {
        self.http_timeout_ms.map(Duration::from_millis)
    }
}

fn parse_timeout_ms(source: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| SmokeError::Config(format!("invalid {} {:?}: {}", source, raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_match_fixed_targets() {
        let cfg = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.profile_path, PathBuf::from("profiles/profile4.txt"));
        assert_eq!(cfg.analyzer_url, "http://localhost:3030");
        assert!(cfg.http_timeout().is_none());
        assert_eq!(cfg.log_format, LogFormat::Pretty);
        assert!(cfg.http_user_agent.starts_with("top-nodes-smoke/"));
    }

    #[test]
    fn env_overrides_apply() {
        let cfg = Config::from_lookup(lookup(&[
            ("PROFILE_PATH", "/tmp/p.txt"),
            ("ANALYZER_URL", "http://10.0.0.2:9000"),
            ("HTTP_TIMEOUT_MS", "2500"),
            ("HTTP_USER_AGENT", "ci-smoke"),
            ("LOG_FORMAT", "JSON"),
        ]))
        .unwrap();
        assert_eq!(cfg.profile_path, PathBuf::from("/tmp/p.txt"));
        assert_eq!(cfg.analyzer_url, "http://10.0.0.2:9000");
        assert_eq!(cfg.http_timeout(), Some(Duration::from_millis(2500)));
        assert_eq!(cfg.http_user_agent, "ci-smoke");
        assert_eq!(cfg.log_format, LogFormat::Json);
    }

    #[test]
    fn blank_timeout_means_none() {
        let cfg = Config::from_lookup(lookup(&[("HTTP_TIMEOUT_MS", "  ")])).unwrap();
        assert!(cfg.http_timeout_ms.is_none());
    }

    #[test]
    fn command_line_beats_env() {
        let env = lookup(&[
            ("PROFILE_PATH", "/env/profile.txt"),
            ("ANALYZER_URL", "http://env:3030"),
            ("HTTP_TIMEOUT_MS", "9000"),
        ]);
        let cfg = Config::from_lookup_with_overrides(
            env,
            ConfigOverrides {
                profile_path: Some(PathBuf::from("/cli/profile.txt")),
                analyzer_url: Some("http://cli:4040".into()),
                http_timeout_ms: Some("100".into()),
            },
        )
        .unwrap();
        assert_eq!(cfg.profile_path, PathBuf::from("/cli/profile.txt"));
        assert_eq!(cfg.analyzer_url, "http://cli:4040");
        assert_eq!(cfg.http_timeout(), Some(Duration::from_millis(100)));
    }

    #[test]
    fn unset_command_line_values_fall_back_to_env() {
        let env = lookup(&[("ANALYZER_URL", "http://env:3030"), ("HTTP_TIMEOUT_MS", "9000")]);
        let overrides = ConfigOverrides { profile_path: Some(PathBuf::from("/cli/p.txt")), ..Default::default() };
        let cfg = Config::from_lookup_with_overrides(env, overrides).unwrap();
        assert_eq!(cfg.profile_path, PathBuf::from("/cli/p.txt"));
        assert_eq!(cfg.analyzer_url, "http://env:3030");
        assert_eq!(cfg.http_timeout_ms, Some(9000));
    }

    #[test]
    fn command_line_timeout_skips_bad_env_timeout() {
        let env = lookup(&[("HTTP_TIMEOUT_MS", "soon")]);
        let overrides = ConfigOverrides { http_timeout_ms: Some("100".into()), ..Default::default() };
        let cfg = Config::from_lookup_with_overrides(env, overrides).unwrap();
        assert_eq!(cfg.http_timeout_ms, Some(100));
    }

    #[test]
    fn bad_command_line_timeout_is_config_error() {
        let overrides = ConfigOverrides { http_timeout_ms: Some("later".into()), ..Default::default() };
        let err = Config::from_lookup_with_overrides(lookup(&[]), overrides).unwrap_err();
        assert!(err.to_string().contains("--timeout-ms"), "{err}");
    }

    #[test]
    fn bad_timeout_is_config_error() {
        let err = Config::from_lookup(lookup(&[("HTTP_TIMEOUT_MS", "soon")])).unwrap_err();
        assert!(matches!(err, SmokeError::Config(_)), "{err}");
    }
}
