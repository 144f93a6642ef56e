//! Client configuration loaded from environment variables

use outreach_client::{OutreachClient, DEFAULT_BASE_URL};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::pages::process::{ExtractionMode, DEFAULT_DEMO_DELAY};

pub const SESSION_FILE_NAME: &str = "session.json";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_url: String,
    /// Directory holding the persisted client session.
    pub state_dir: PathBuf,
    pub extraction_mode: ExtractionMode,
    pub request_timeout: Option<Duration>,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_url = var("OUTREACH_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let state_dir = match var("OUTREACH_STATE_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => var("HOME")
                .map(|home| PathBuf::from(home).join(".outreach"))
                .ok_or_else(|| {
                    AppError::Config("OUTREACH_STATE_DIR or HOME must be set".to_string())
                })?,
        };

        let delay = match var("OUTREACH_DELAY_MS") {
            Some(ms) => Duration::from_millis(ms.trim().parse().map_err(|_| {
                AppError::Config(format!("OUTREACH_DELAY_MS must be a number, got {ms:?}"))
            })?),
            None => DEFAULT_DEMO_DELAY,
        };

        let extraction_mode = match var("OUTREACH_EXTRACTION_MODE").as_deref().map(str::trim) {
            None | Some("live") => ExtractionMode::Live,
            Some("delay") => ExtractionMode::FixedDelay(delay),
            Some(other) => {
                return Err(AppError::Config(format!(
                    "OUTREACH_EXTRACTION_MODE must be 'live' or 'delay', got {other:?}"
                )))
            }
        };

        let request_timeout = var("OUTREACH_REQUEST_TIMEOUT_SECS")
            .map(|secs| {
                secs.trim().parse::<u64>().map(Duration::from_secs).map_err(|_| {
                    AppError::Config(format!(
                        "OUTREACH_REQUEST_TIMEOUT_SECS must be a number, got {secs:?}"
                    ))
                })
            })
            .transpose()?;

        Ok(Self {
            api_url,
            state_dir,
            extraction_mode,
            request_timeout,
        })
    }

    pub fn session_file(&self) -> PathBuf {
        self.state_dir.join(SESSION_FILE_NAME)
    }

    /// HTTP client for the configured backend.
    pub fn build_client(&self) -> Result<OutreachClient> {
        match self.request_timeout {
            Some(timeout) => Ok(OutreachClient::with_timeout(&self.api_url, timeout)?),
            None => Ok(OutreachClient::new(&self.api_url)),
        }
    }
}
