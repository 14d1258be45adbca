use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{HnError, Result};
use crate::feed::{DEFAULT_END_THRESHOLD, DEFAULT_PAGE_SIZE};
use crate::hn::DEFAULT_API_BASE;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base: String,
    pub page_size: usize,
    /// Share of the loaded list left below the selection that triggers the next page
    pub end_threshold: f64,
    /// Unset means requests never time out
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            end_threshold: DEFAULT_END_THRESHOLD,
            request_timeout_secs: None,
        }
    }
}

/// ~/.config/hntop/config.toml (Linux) or ~/Library/Application Support/hntop/config.toml (macOS)
pub fn config_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("hntop").join("config.toml"))
}

impl Config {
    /// Load from `path`, or the default location. A missing file yields defaults; a file
    /// that does not parse is logged and ignored.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(config_path) else {
            return Config::default();
        };

        let Ok(content) = std::fs::read_to_string(&path) else {
            return Config::default();
        };

        match toml::from_str::<Config>(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config");
                Config::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(HnError::Config("page_size must be at least 1".into()));
        }
        if !(0.0..1.0).contains(&self.end_threshold) {
            return Err(HnError::Config(format!(
                "end_threshold must be in [0, 1), got {}",
                self.end_threshold
            )));
        }
        if !self.api_base.starts_with("http://") && !self.api_base.starts_with("https://") {
            return Err(HnError::Config(format!(
                "api_base must be an http(s) URL, got {}",
                self.api_base
            )));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
api_base = "http://localhost:9000/v0"
page_size = 25
end_threshold = 0.2
request_timeout_secs = 15
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api_base, "http://localhost:9000/v0");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.end_threshold, 0.2);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: Config = toml::from_str("page_size = 5").unwrap();
        assert_eq!(config.page_size, 5);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn missing_file_uses_default() {
        let config = Config::load(Some(Path::new("/nonexistent/hntop/config.toml")));
        assert_eq!(config, Config::default());
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn zero_page_size_rejected() {
        let config = Config {
            page_size: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(HnError::Config(_))));
    }

    #[test]
    fn threshold_out_of_range_rejected() {
        let config = Config {
            end_threshold: 1.0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn non_http_base_rejected() {
        let config = Config {
            api_base: "ftp://example.com".into(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
