// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration file support for conc
//!
//! Loads configuration from .concrc.toml in current directory or ~/.config/conc/config.toml

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::concordance::{ConcordanceOptions, DEFAULT_CONTEXT_LENGTH, DEFAULT_PAGE_SIZE};

/// Output format for results (mirrored from cli for library use)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigOutputFormat {
    #[default]
    Text,
    Json,
}

/// Configuration loaded from .concrc.toml or ~/.config/conc/config.toml
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tokens shown on each side of the node
    pub context_length: Option<usize>,
    /// Concordance lines per page
    pub page_size: Option<usize>,
    /// Default ordering policy (e.g. "1R2R3R" or "LEFT")
    pub order: Option<String>,
    /// Reuse coarse tables across requests in one process
    pub use_cache: Option<bool>,
    /// Match queries regardless of case
    pub ignore_case: Option<bool>,
    /// Default output format (text or json)
    pub default_format: Option<String>,
}

/// Per-invocation values given on the command line; `None` defers to config.
#[derive(Debug, Clone, Default)]
pub struct ConcordanceOverrides {
    pub context_length: Option<usize>,
    pub page_size: Option<usize>,
    pub order: Option<String>,
    pub page: Option<usize>,
    pub show_all_columns: bool,
    pub no_cache: bool,
}

impl Config {
    /// Load configuration from files
    ///
    /// Precedence (highest to lowest):
    /// 1. .concrc.toml in current directory
    /// 2. ~/.config/conc/config.toml
    pub fn load() -> Self {
        if let Some(config) = Self::load_from_path(Path::new(".concrc.toml")) {
            return config;
        }

        if let Some(config_path) = Self::user_config_path() {
            if let Some(config) = Self::load_from_path(&config_path) {
                return config;
            }
        }

        Self::default()
    }

    pub fn load_from_path(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Failed to parse {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Path of the user-level config file, if a home directory is known
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("conc").join("config.toml"))
    }

    /// Get output format from config, parsing the string to ConfigOutputFormat
    pub fn output_format(&self) -> Option<ConfigOutputFormat> {
        self.default_format.as_ref().and_then(|s| match s.to_lowercase().as_str() {
            "json" => Some(ConfigOutputFormat::Json),
            "text" => Some(ConfigOutputFormat::Text),
            _ => None,
        })
    }

    /// Whether queries should match case-sensitively (CLI flag wins)
    pub fn case_sensitive(&self, cli_flag: bool) -> bool {
        cli_flag || !self.ignore_case.unwrap_or(true)
    }

    /// Merge CLI options with config (CLI wins)
    pub fn concordance_options(&self, cli: &ConcordanceOverrides) -> ConcordanceOptions {
        let defaults = ConcordanceOptions::default();
        ConcordanceOptions {
            context_length: cli
                .context_length
                .or(self.context_length)
                .unwrap_or(DEFAULT_CONTEXT_LENGTH),
            order: cli
                .order
                .clone()
                .or_else(|| self.order.clone())
                .unwrap_or(defaults.order),
            page_size: cli
                .page_size
                .or(self.page_size)
                .unwrap_or(DEFAULT_PAGE_SIZE),
            page: cli.page.unwrap_or(1),
            show_all_columns: cli.show_all_columns,
            use_cache: !cli.no_cache && self.use_cache.unwrap_or(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_config_file() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join(".concrc.toml");
        std::fs::write(
            &path,
            "context_length = 3\norder = \"LEFT\"\nuse_cache = false\ndefault_format = \"JSON\"\n",
        )
        .expect("write config");

        let config = Config::load_from_path(&path).expect("config");
        assert_eq!(config.context_length, Some(3));
        assert_eq!(config.output_format(), Some(ConfigOutputFormat::Json));

        let options = config.concordance_options(&ConcordanceOverrides::default());
        assert_eq!(options.context_length, 3);
        assert_eq!(options.order, "LEFT");
        assert_eq!(options.page_size, DEFAULT_PAGE_SIZE);
        assert!(!options.use_cache);
    }

    #[test]
    fn cli_values_override_config() {
        let config = Config {
            context_length: Some(3),
            page_size: Some(50),
            ..Config::default()
        };
        let cli = ConcordanceOverrides {
            context_length: Some(7),
            order: Some("1L1R2R".to_string()),
            page: Some(4),
            ..ConcordanceOverrides::default()
        };
        let options = config.concordance_options(&cli);
        assert_eq!(options.context_length, 7);
        assert_eq!(options.page_size, 50);
        assert_eq!(options.order, "1L1R2R");
        assert_eq!(options.page, 4);
        assert!(options.use_cache);
    }

    #[test]
    fn malformed_config_is_ignored() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "context_length = \"wide\"").expect("write config");
        assert!(Config::load_from_path(&path).is_none());
    }

    #[test]
    fn case_sensitivity_defaults_off() {
        assert!(!Config::default().case_sensitive(false));
        assert!(Config::default().case_sensitive(true));
        let config = Config {
            ignore_case: Some(false),
            ..Config::default()
        };
        assert!(config.case_sensitive(false));
    }
}
