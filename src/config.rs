//! Settings, environment overrides and on-disk paths.

use crate::app_core::route::Route;
use crate::model::{Language, Region};
use crate::theme::Theme;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "http://localhost:5001/api";
pub const API_BASE_ENV: &str = "VTRACKER_API_BASE";

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
pub const HTTP_TIMEOUT_ENV: &str = "VTRACKER_HTTP_TIMEOUT_SECS";

pub const DEFAULT_LOG_FILTER: &str = "info";
pub const LOG_FILTER_ENV: &str = "VTRACKER_LOG";
pub const LOG_FILE_NAME: &str = "vtracker.log";

/// Base URL baked in at compile time; the browser build has no runtime environment.
pub fn compiled_api_base() -> &'static str {
    option_env!("VTRACKER_API_BASE")
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_API_BASE)
}

pub fn api_base() -> String {
    std::env::var(API_BASE_ENV)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| compiled_api_base().to_string())
}

pub fn http_timeout() -> Duration {
    std::env::var(HTTP_TIMEOUT_ENV)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
}

pub fn log_filter() -> String {
    std::env::var(LOG_FILTER_ENV)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// Effective settings after CLI flags are layered over the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base: String,
    pub http_timeout: Duration,
    pub region: Region,
    pub language: Language,
    pub theme: Theme,
    pub route: Route,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            api_base: api_base(),
            http_timeout: http_timeout(),
            region: Region::default(),
            language: Language::default(),
            theme: Theme::default(),
            route: Route::default(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod paths {
    use anyhow::{Context, Result};
    use std::fs;
    use std::path::PathBuf;

    fn project_dirs() -> Result<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "vtracker", "vtracker")
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let data_dir = project_dirs()?.data_dir().to_path_buf();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create {}", data_dir.display()))?;
        Ok(data_dir)
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(data_dir()?.join(super::LOG_FILE_NAME))
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use paths::{data_dir, log_path};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_base_env_override() {
        temp_env::with_var(API_BASE_ENV, Some("  https://stats.example.test/api  "), || {
            assert_eq!(api_base(), "https://stats.example.test/api");
        });
        temp_env::with_var(API_BASE_ENV, Some("   "), || {
            assert_eq!(api_base(), compiled_api_base());
        });
    }

    #[test]
    fn test_http_timeout_parsing() {
        temp_env::with_var(HTTP_TIMEOUT_ENV, Some("25"), || {
            assert_eq!(http_timeout(), Duration::from_secs(25));
        });
        temp_env::with_var(HTTP_TIMEOUT_ENV, Some("0"), || {
            assert_eq!(http_timeout(), Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS));
        });
        temp_env::with_var(HTTP_TIMEOUT_ENV, Some("soon"), || {
            assert_eq!(http_timeout(), Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS));
        });
    }

    #[test]
    fn test_log_filter_default() {
        temp_env::with_var_unset(LOG_FILTER_ENV, || {
            assert_eq!(log_filter(), DEFAULT_LOG_FILTER);
        });
        temp_env::with_var(LOG_FILTER_ENV, Some("vtracker=debug"), || {
            assert_eq!(log_filter(), "vtracker=debug");
        });
    }

    #[test]
    fn test_settings_from_env() {
        temp_env::with_vars(
            [
                (API_BASE_ENV, Some("http://api.test")),
                (HTTP_TIMEOUT_ENV, None),
            ],
            || {
                let settings = Settings::from_env();
                assert_eq!(settings.api_base, "http://api.test");
                assert_eq!(settings.http_timeout, Duration::from_secs(10));
                assert_eq!(settings.region, Region::Br);
                assert_eq!(settings.route, Route::Leaderboard);
            },
        );
    }
}
