use std::{fs, io, path::Path};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const SETTINGS_FILE: &str = "vitalis.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.into(),
            log_filter: DEFAULT_LOG_FILTER.into(),
        }
    }
}

/// Keys accepted in `vitalis.toml`; unknown keys are ignored.
#[derive(Debug, Deserialize)]
struct SettingsFile {
    server_url: Option<String>,
    log_filter: Option<String>,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid server url '{url}': {source}")]
    InvalidServerUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("server url '{0}' must use http or https")]
    UnsupportedScheme(String),
}

/// Loads settings from `vitalis.toml` in the working directory and the process
/// environment. `server_url`, when given (a command-line flag), wins over both.
pub fn load_settings(server_url: Option<&str>) -> Result<Settings, SettingsError> {
    load_settings_from(
        Path::new(SETTINGS_FILE),
        |key| std::env::var(key).ok(),
        server_url,
    )
}

/// Defaults, then the flat `key = "value"` table at `path` (if present), then
/// environment variables looked up through `env`, then `server_url`. Only the
/// merged URL is validated.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
    server_url: Option<&str>,
) -> Result<Settings, SettingsError> {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => {
            let file_cfg = toml::from_str::<SettingsFile>(&raw).map_err(|source| {
                SettingsError::Parse {
                    path: path.display().to_string(),
                    source,
                }
            })?;
            if let Some(v) = file_cfg.server_url {
                settings.server_url = v;
            }
            if let Some(v) = file_cfg.log_filter {
                settings.log_filter = v;
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.display().to_string(),
                source,
            })
        }
    }

    if let Some(v) = env("VITALIS_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("VITALIS_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = server_url {
        settings.server_url = v.to_string();
    }

    settings.server_url = normalize_server_url(&settings.server_url)?;
    Ok(settings)
}

/// Trims whitespace and trailing slashes and checks the URL is http(s).
pub fn normalize_server_url(raw: &str) -> Result<String, SettingsError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(DEFAULT_SERVER_URL.to_string());
    }

    let parsed = Url::parse(trimmed).map_err(|source| SettingsError::InvalidServerUrl {
        url: trimmed.to_string(),
        source,
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(SettingsError::UnsupportedScheme(trimmed.to_string()));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
