use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_CLASSIFIER_MODEL: &str = "facebook/bart-large-mnli";
pub const DEFAULT_CLASSIFIER_API_URL: &str = "https://api-inference.huggingface.co/models";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub hf_api_token: String,
    pub classifier_model: String,
    pub classifier_api_url: String,
    pub scoring_timeout: Duration,
    pub max_resume_chars: usize,
    pub max_job_description_chars: usize,
    pub max_upload_bytes: usize,
    /// Browser origins allowed by CORS. Empty allows any origin.
    pub cors_allowed_origins: Vec<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            hf_api_token: require_env("HF_API_TOKEN")?,
            classifier_model: std::env::var("CLASSIFIER_MODEL")
                .unwrap_or_else(|_| DEFAULT_CLASSIFIER_MODEL.to_string()),
            classifier_api_url: std::env::var("CLASSIFIER_API_URL")
                .unwrap_or_else(|_| DEFAULT_CLASSIFIER_API_URL.to_string()),
            scoring_timeout: Duration::from_secs(parse_env("SCORING_TIMEOUT_SECS", 60)?),
            max_resume_chars: parse_env("MAX_RESUME_CHARS", 3000)?,
            max_job_description_chars: parse_env("MAX_JOB_DESCRIPTION_CHARS", 1000)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            cors_allowed_origins: parse_origins(
                &std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default(),
            ),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

/// Comma-separated origin list; blank entries are skipped.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
