use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};

/// Which implementation answers "fetch analysis".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisBackend {
    Mock,
    Keyword,
    Remote,
}

impl FromStr for AnalysisBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "keyword" => Ok(Self::Keyword),
            "remote" => Ok(Self::Remote),
            other => Err(anyhow!(
                "unknown analysis backend '{other}' (expected mock, keyword or remote)"
            )),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Every variable has a default except `ANALYSIS_REMOTE_URL`, which the remote backend needs.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub analysis_backend: AnalysisBackend,
    pub analysis_delay: Duration,
    pub analysis_timeout: Duration,
    pub remote_url: Option<String>,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let analysis_backend = match lookup("ANALYSIS_BACKEND") {
            Some(raw) => raw
                .parse::<AnalysisBackend>()
                .context("ANALYSIS_BACKEND is invalid")?,
            None => AnalysisBackend::Mock,
        };

        let remote_url = lookup("ANALYSIS_REMOTE_URL").filter(|url| !url.trim().is_empty());
        if analysis_backend == AnalysisBackend::Remote && remote_url.is_none() {
            bail!("ANALYSIS_REMOTE_URL must be set when ANALYSIS_BACKEND=remote");
        }

        Ok(Config {
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            analysis_backend,
            analysis_delay: Duration::from_millis(parse_or(&lookup, "ANALYSIS_DELAY_MS", 3000)?),
            analysis_timeout: Duration::from_secs(parse_or(&lookup, "ANALYSIS_TIMEOUT_SECS", 30)?),
            remote_url,
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.analysis_backend, AnalysisBackend::Mock);
        assert_eq!(config.analysis_delay, Duration::from_secs(3));
        assert_eq!(config.analysis_timeout, Duration::from_secs(30));
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert!(config.remote_url.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "9000"),
            ("ANALYSIS_BACKEND", "Keyword"),
            ("ANALYSIS_DELAY_MS", "250"),
            ("ANALYSIS_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.analysis_backend, AnalysisBackend::Keyword);
        assert_eq!(config.analysis_delay, Duration::from_millis(250));
        assert_eq!(config.analysis_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_port_names_variable() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"), "got: {err}");
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("ANALYSIS_BACKEND", "llm")])).unwrap_err();
        assert!(format!("{err:#}").contains("unknown analysis backend"));
    }

    #[test]
    fn test_remote_backend_requires_url() {
        let err =
            Config::from_lookup(lookup_from(&[("ANALYSIS_BACKEND", "remote")])).unwrap_err();
        assert!(err.to_string().contains("ANALYSIS_REMOTE_URL"));

        let config = Config::from_lookup(lookup_from(&[
            ("ANALYSIS_BACKEND", "remote"),
            ("ANALYSIS_REMOTE_URL", "http://localhost:5000/analyze"),
        ]))
        .unwrap();
        assert_eq!(
            config.remote_url.as_deref(),
            Some("http://localhost:5000/analyze")
        );
    }
}
