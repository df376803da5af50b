//! Configuration management.
//!
//! Configuration comes from a TOML file, then `WORKFACTS_*` environment
//! overrides. Every field has a default, so a missing file is not an error.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default per-query lookup deadline.
pub const DEFAULT_LOOKUP_DEADLINE_MS: u64 = 5_000;

/// Main configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkfactsConfig {
    /// Fact store database file.
    pub database_path: PathBuf,
    /// Per-query deadline in milliseconds. `0` disables the deadline.
    pub lookup_deadline_ms: u64,
    /// Result caps for list lookups.
    pub list_caps: ListCaps,
    /// Framework keywords used when a caller supplies none.
    pub default_framework_keywords: Vec<String>,
    /// Logging and metrics settings.
    pub observability: ObservabilitySettings,
}

/// Result caps for list lookups.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ListCaps {
    /// Skills per occupation.
    pub skills: usize,
    /// Statutes per state.
    pub statutes: usize,
    /// Credential requirements per state.
    pub credentials: usize,
    /// Program completions per institution.
    pub completions: usize,
    /// Frameworks per search.
    pub frameworks: usize,
    /// Employers per search.
    pub employers: usize,
    /// Industries in a service-area ranking.
    pub industries: usize,
    /// Fiscal years of visa demand.
    pub visa: usize,
    /// Institutions per name search.
    pub institutions: usize,
}

impl Default for ListCaps {
    fn default() -> Self {
        Self {
            skills: 10,
            statutes: 20,
            credentials: 20,
            completions: 25,
            frameworks: 5,
            employers: 50,
            industries: 10,
            visa: 5,
            institutions: 10,
        }
    }
}

/// Observability settings from the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ObservabilitySettings {
    /// Logging settings.
    pub logging: Option<LoggingSettings>,
    /// Metrics settings.
    pub metrics: Option<MetricsSettings>,
}

/// Logging settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `pretty` or `json`.
    pub format: Option<String>,
    /// Default level, e.g. `info`.
    pub level: Option<String>,
    /// Full `EnvFilter` directive; wins over `level`.
    pub filter: Option<String>,
    /// Log file path. Logs go to stderr when unset.
    pub file: Option<PathBuf>,
}

/// Metrics settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MetricsSettings {
    /// Whether the Prometheus recorder is installed.
    pub enabled: Option<bool>,
    /// HTTP listener port.
    pub port: Option<u16>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ConfigFile {
    /// Database path.
    pub database_path: Option<String>,
    /// Lookup deadline in milliseconds.
    pub lookup_deadline_ms: Option<u64>,
    /// List caps.
    pub list_caps: Option<ListCaps>,
    /// Default framework keywords.
    pub default_framework_keywords: Option<Vec<String>>,
    /// Observability section.
    pub observability: Option<ObservabilitySettings>,
}

impl Default for WorkfactsConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            lookup_deadline_ms: DEFAULT_LOOKUP_DEADLINE_MS,
            list_caps: ListCaps::default(),
            default_framework_keywords: vec!["workforce".to_string(), "competency".to_string()],
            observability: ObservabilitySettings::default(),
        }
    }
}

impl WorkfactsConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lookup deadline, or `None` when disabled.
    #[must_use]
    pub const fn lookup_deadline(&self) -> Option<Duration> {
        if self.lookup_deadline_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.lookup_deadline_ms))
        }
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::NotFound(path.display().to_string())
            } else {
                Error::OperationFailed {
                    operation: "read_config_file".to_string(),
                    cause: e.to_string(),
                }
            }
        })?;
        Self::parse_toml(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse_toml(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents).map_err(|e| Error::OperationFailed {
            operation: "parse_config_file".to_string(),
            cause: e.to_string(),
        })?;
        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from an explicit path, `WORKFACTS_CONFIG_PATH`, or
    /// `<config_dir>/workfacts/config.toml`, then applies env overrides.
    ///
    /// An explicit path must exist. The default location may be absent.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file cannot be loaded, or if an
    /// env override is malformed.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var("WORKFACTS_CONFIG_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let config = match explicit.map(Path::to_path_buf).or(env_path) {
            Some(path) => Self::load_from_file(&path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::load_from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_env_overrides()
    }

    /// Applies `WORKFACTS_DB_PATH` and `WORKFACTS_LOOKUP_DEADLINE_MS`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the deadline is not an integer.
    pub fn apply_env_overrides(mut self) -> Result<Self> {
        if let Some(path) = std::env::var("WORKFACTS_DB_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
        {
            self.database_path = PathBuf::from(path);
        }
        if let Ok(raw) = std::env::var("WORKFACTS_LOOKUP_DEADLINE_MS") {
            self.lookup_deadline_ms = raw.trim().parse().map_err(|_| {
                Error::InvalidInput(format!("WORKFACTS_LOOKUP_DEADLINE_MS must be an integer, got {raw:?}"))
            })?;
        }
        Ok(self)
    }

    /// Sets the database path.
    #[must_use]
    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = path.into();
        self
    }

    /// Sets the lookup deadline in milliseconds.
    #[must_use]
    pub const fn with_lookup_deadline_ms(mut self, ms: u64) -> Self {
        self.lookup_deadline_ms = ms;
        self
    }

    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(path) = file.database_path {
            config.database_path = PathBuf::from(path);
        }
        if let Some(ms) = file.lookup_deadline_ms {
            config.lookup_deadline_ms = ms;
        }
        if let Some(caps) = file.list_caps {
            config.list_caps = caps;
        }
        if let Some(keywords) = file.default_framework_keywords {
            config.default_framework_keywords = keywords;
        }
        if let Some(observability) = file.observability {
            config.observability = observability;
        }

        config
    }
}

/// Returns `<config_dir>/workfacts/config.toml`, if a home directory exists.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.config_dir().join("workfacts").join("config.toml"))
}

/// Returns `<data_dir>/workfacts/facts.db`, or `facts.db` without a home directory.
#[must_use]
pub fn default_database_path() -> PathBuf {
    directories::BaseDirs::new().map_or_else(
        || PathBuf::from("facts.db"),
        |dirs| dirs.data_dir().join("workfacts").join("facts.db"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = WorkfactsConfig::default();
        assert_eq!(config.lookup_deadline(), Some(Duration::from_secs(5)));
        assert_eq!(config.list_caps.statutes, 20);
        assert_eq!(config.list_caps.frameworks, 5);
    }

    #[test]
    fn test_zero_deadline_disables() {
        let config = WorkfactsConfig::default().with_lookup_deadline_ms(0);
        assert!(config.lookup_deadline().is_none());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = WorkfactsConfig::parse_toml(
            r#"
            database_path = "/var/lib/workfacts/facts.db"
            lookup_deadline_ms = 750

            [list_caps]
            statutes = 5

            [observability.logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/var/lib/workfacts/facts.db"));
        assert_eq!(config.lookup_deadline_ms, 750);
        assert_eq!(config.list_caps.statutes, 5);
        assert_eq!(config.list_caps.skills, 10);
        assert_eq!(
            config.observability.logging.and_then(|l| l.format).as_deref(),
            Some("json")
        );
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            WorkfactsConfig::parse_toml("lookup_deadline_ms = \"soon\""),
            Err(Error::OperationFailed { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_framework_keywords = [\"nursing\"]").unwrap();

        let config = WorkfactsConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.default_framework_keywords, vec!["nursing".to_string()]);
    }

    #[test]
    fn test_missing_explicit_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = WorkfactsConfig::load_from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(Error::NotFound(_))));
    }
}
