use crate::error::{Error, Result};
use std::env;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const MAX_PER_PAGE: u32 = 100;
pub const DEFAULT_LOG_FILTER: &str = "prstats=info,reqwest=warn";

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: Option<String>,
    pub api_base_url: String,
    pub per_page: u32,
    pub requests_per_minute: u32,
    pub max_retries: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source, `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let github_token = lookup("GITHUB_TOKEN").filter(|t| !t.is_empty());

        let api_base_url = lookup("GITHUB_API_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let per_page = parse_var(&lookup, "PRSTATS_PER_PAGE", MAX_PER_PAGE)?;
        if per_page == 0 || per_page > MAX_PER_PAGE {
            return Err(Error::Config(format!(
                "PRSTATS_PER_PAGE must be between 1 and {}, got {}",
                MAX_PER_PAGE, per_page
            )));
        }

        let requests_per_minute = parse_var(&lookup, "PRSTATS_REQUESTS_PER_MINUTE", 30)?;
        let max_retries = parse_var(&lookup, "PRSTATS_MAX_RETRIES", 3)?;

        Ok(Self {
            github_token,
            api_base_url,
            per_page,
            requests_per_minute,
            max_retries,
        })
    }

    /// Picks the token given on the command line over the one from the environment.
    pub fn resolve_token(&self, cli_token: Option<String>) -> Result<String> {
        cli_token
            .filter(|t| !t.is_empty())
            .or_else(|| self.github_token.clone())
            .ok_or_else(|| {
                Error::Config("no GitHub token: pass --token or set GITHUB_TOKEN".to_string())
            })
    }
}

fn parse_var(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: u32) -> Result<u32> {
    match lookup(name) {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("{} is not a valid number: {}", name, v))),
        None => Ok(default),
    }
}

/// `RUST_LOG` when set and valid, otherwise `DEFAULT_LOG_FILTER`.
pub fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub per_page: u32,
    pub show_progress: bool,
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            per_page: config.per_page,
            show_progress: true,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            per_page: MAX_PER_PAGE,
            show_progress: false,
        }
    }
}
