use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: SocketAddr,
    pub data_dir: PathBuf,
    pub youtube_api_key: Option<String>,
    pub webhook_url: Option<String>,
    pub app_token: Option<String>,
    pub request_timeout: Duration,
    pub max_results: u32,
    pub cors_allow_origins: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid socket address: {0}")]
    InvalidSocket(String),
    #[error("invalid integer for {0}: {1}")]
    InvalidNumber(&'static str, String),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let http_addr_raw = read_string("VIEWFINDER_HTTP_ADDR", "127.0.0.1:8080");
        let http_addr = http_addr_raw
            .parse()
            .map_err(|_| ConfigError::InvalidSocket(http_addr_raw.clone()))?;
        let data_dir = PathBuf::from(read_string("VIEWFINDER_DATA_DIR", "./data"));
        let youtube_api_key = read_optional_string("YOUTUBE_API_KEY");
        let webhook_url = read_optional_string("WEBHOOK_URL");
        let app_token = read_optional_string("APP_TOKEN");
        let request_timeout_secs = read_u64("VIEWFINDER_REQUEST_TIMEOUT_SECS", 15)?;
        let max_results = read_u32("VIEWFINDER_MAX_RESULTS", 25)?;
        if max_results == 0 {
            return Err(ConfigError::InvalidValue(
                "VIEWFINDER_MAX_RESULTS",
                "0".to_string(),
            ));
        }
        let cors_allow_origins = read_list("VIEWFINDER_CORS_ALLOW_ORIGINS");

        Ok(Self {
            http_addr,
            data_dir,
            youtube_api_key,
            webhook_url,
            app_token,
            request_timeout: Duration::from_secs(request_timeout_secs),
            max_results,
            cors_allow_origins,
        })
    }

    pub fn archive_dir(&self) -> PathBuf {
        self.data_dir.join("snapshots")
    }

    pub fn prefs_path(&self) -> PathBuf {
        self.data_dir.join("prefs.json")
    }
}

pub fn load_dotenv() -> Result<(), std::io::Error> {
    let path = Path::new(".env");
    if !path.exists() {
        return Ok(());
    }
    let contents = std::fs::read_to_string(path)?;
    for (key, value) in contents.lines().filter_map(parse_dotenv_line) {
        if std::env::var_os(&key).is_none() {
            // Safety: invoked during startup before any threads are spawned.
            unsafe {
                std::env::set_var(key, value);
            }
        }
    }
    Ok(())
}

fn read_string(key: &'static str, default: &'static str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn read_u64(key: &'static str, default: u64) -> Result<u64, ConfigError> {
    let raw = std::env::var(key).unwrap_or_else(|_| default.to_string());
    raw.parse()
        .map_err(|_| ConfigError::InvalidNumber(key, raw))
}

fn read_u32(key: &'static str, default: u32) -> Result<u32, ConfigError> {
    let raw = std::env::var(key).unwrap_or_else(|_| default.to_string());
    raw.parse()
        .map_err(|_| ConfigError::InvalidNumber(key, raw))
}

fn read_optional_string(key: &'static str) -> Option<String> {
    let value = std::env::var(key).unwrap_or_default();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn read_list(key: &'static str) -> Vec<String> {
    std::env::var(key)
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_dotenv_line(line: &str) -> Option<(String, String)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
    let (key, value) = trimmed.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), strip_quotes(value.trim()).to_string()))
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::{parse_dotenv_line, read_list};

    #[test]
    fn parse_dotenv_line_basic() {
        let (key, value) = parse_dotenv_line("APP_TOKEN=hunter2").unwrap();
        assert_eq!(key, "APP_TOKEN");
        assert_eq!(value, "hunter2");
    }

    #[test]
    fn parse_dotenv_line_export_prefix() {
        let (key, value) = parse_dotenv_line("export YOUTUBE_API_KEY=abc").unwrap();
        assert_eq!(key, "YOUTUBE_API_KEY");
        assert_eq!(value, "abc");
    }

    #[test]
    fn parse_dotenv_line_quoted_values() {
        let (_, value) = parse_dotenv_line(r#"WEBHOOK_URL="https://example.com/hook""#).unwrap();
        assert_eq!(value, "https://example.com/hook");
        let (_, value) = parse_dotenv_line("APP_TOKEN='with space'").unwrap();
        assert_eq!(value, "with space");
    }

    #[test]
    fn parse_dotenv_line_skips_comments_and_blanks() {
        assert!(parse_dotenv_line("# comment").is_none());
        assert!(parse_dotenv_line("   ").is_none());
        assert!(parse_dotenv_line("=value").is_none());
    }

    #[test]
    fn read_list_ignores_empty_segments() {
        // Unset variable reads as empty, which must yield no origins.
        assert!(read_list("VIEWFINDER_TEST_UNSET_LIST").is_empty());
    }
}
