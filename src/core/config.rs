//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars (`.env` included).
//!
//! Config lives at `~/.meteo/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::input::{DEFAULT_CHAR_LIMIT, DEFAULT_WIDTH};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MeteoConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ProbeConfig {
    pub geocoding_url: Option<String>,
    pub forecast_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct InputConfig {
    pub char_limit: Option<usize>,
    pub width: Option<u16>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_GEOCODING_URL: &str =
    "https://geocoding-api.open-meteo.com/v1/search?name=Berlin";
/// Reserved for the forecast lookup; nothing requests it yet.
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub log_level: LevelFilter,
    pub geocoding_url: String,
    pub forecast_url: String,
    pub probe_timeout: Duration,
    pub char_limit: usize,
    pub input_width: u16,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.meteo/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".meteo").join("config.toml"))
}

/// Load config from `~/.meteo/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `MeteoConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<MeteoConfig, ConfigError> {
    let Some(path) = config_path() else {
        warn!("Could not determine home directory, using default config");
        return Ok(MeteoConfig::default());
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(MeteoConfig::default());
    }

    load_config_from(&path)
}

/// Parse the config file at `path`.
pub fn load_config_from(path: &Path) -> Result<MeteoConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: MeteoConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# meteo configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars.

# [general]
# log_level = "debug"                # "off", "error", "warn", "info", "debug", "trace"

# [probe]
# geocoding_url = "https://geocoding-api.open-meteo.com/v1/search?name=Berlin"
# forecast_url = "https://api.open-meteo.com/v1/forecast"
# timeout_secs = 10

# [input]
# char_limit = 156                   # 0 = unlimited
# width = 20                         # visible columns, 0 = no scrolling window
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars.
pub fn resolve(config: &MeteoConfig) -> ResolvedConfig {
    resolve_from(config, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_from(config: &MeteoConfig, env: impl Fn(&str) -> Option<String>) -> ResolvedConfig {
    // Geocoding URL: env → config → default
    let geocoding_url = env("METEO_GEOCODING_URL")
        .or_else(|| config.probe.geocoding_url.clone())
        .unwrap_or_else(|| DEFAULT_GEOCODING_URL.to_string());

    // Forecast URL: env → config → default
    let forecast_url = env("METEO_FORECAST_URL")
        .or_else(|| config.probe.forecast_url.clone())
        .unwrap_or_else(|| DEFAULT_FORECAST_URL.to_string());

    // Timeout: env → config → default (unparseable or zero values are skipped)
    let timeout_secs = env("METEO_PROBE_TIMEOUT_SECS")
        .and_then(|raw| match raw.trim().parse::<u64>() {
            Ok(0) => {
                warn!("Ignoring METEO_PROBE_TIMEOUT_SECS=0: timeout must be positive");
                None
            }
            Ok(secs) => Some(secs),
            Err(e) => {
                warn!("Ignoring METEO_PROBE_TIMEOUT_SECS={:?}: {}", raw, e);
                None
            }
        })
        .or_else(|| match config.probe.timeout_secs {
            Some(0) => {
                warn!("Ignoring probe.timeout_secs = 0: timeout must be positive");
                None
            }
            secs => secs,
        })
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    // Log level: env → config → default
    let log_level = env("METEO_LOG_LEVEL")
        .or_else(|| config.general.log_level.clone())
        .and_then(|raw| match raw.trim().parse::<LevelFilter>() {
            Ok(level) => Some(level),
            Err(_) => {
                warn!("Unknown log level {:?}, using {}", raw, DEFAULT_LOG_LEVEL);
                None
            }
        })
        .unwrap_or(DEFAULT_LOG_LEVEL);

    ResolvedConfig {
        log_level,
        geocoding_url,
        forecast_url,
        probe_timeout: Duration::from_secs(timeout_secs),
        char_limit: config.input.char_limit.unwrap_or(DEFAULT_CHAR_LIMIT),
        input_width: config.input.width.unwrap_or(DEFAULT_WIDTH),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_from(&MeteoConfig::default(), no_env);
        assert_eq!(resolved.geocoding_url, DEFAULT_GEOCODING_URL);
        assert_eq!(resolved.forecast_url, DEFAULT_FORECAST_URL);
        assert_eq!(resolved.probe_timeout, Duration::from_secs(10));
        assert_eq!(resolved.char_limit, 156);
        assert_eq!(resolved.input_width, 20);
        assert_eq!(resolved.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = MeteoConfig {
            general: GeneralConfig {
                log_level: Some("warn".to_string()),
            },
            probe: ProbeConfig {
                geocoding_url: Some("http://localhost:8080/search".to_string()),
                forecast_url: None,
                timeout_secs: Some(3),
            },
            input: InputConfig {
                char_limit: Some(40),
                width: Some(30),
            },
        };
        let resolved = resolve_from(&config, no_env);
        assert_eq!(resolved.geocoding_url, "http://localhost:8080/search");
        assert_eq!(resolved.forecast_url, DEFAULT_FORECAST_URL);
        assert_eq!(resolved.probe_timeout, Duration::from_secs(3));
        assert_eq!(resolved.char_limit, 40);
        assert_eq!(resolved.input_width, 30);
        assert_eq!(resolved.log_level, LevelFilter::Warn);
    }

    #[test]
    fn test_resolve_env_wins_over_config() {
        let config = MeteoConfig {
            probe: ProbeConfig {
                geocoding_url: Some("http://from-config/".to_string()),
                timeout_secs: Some(3),
                ..Default::default()
            },
            ..Default::default()
        };
        let env: HashMap<&str, &str> = HashMap::from([
            ("METEO_GEOCODING_URL", "http://from-env/"),
            ("METEO_PROBE_TIMEOUT_SECS", "7"),
            ("METEO_LOG_LEVEL", "info"),
        ]);
        let resolved = resolve_from(&config, |key| env.get(key).map(|v| v.to_string()));
        assert_eq!(resolved.geocoding_url, "http://from-env/");
        assert_eq!(resolved.probe_timeout, Duration::from_secs(7));
        assert_eq!(resolved.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_resolve_skips_bad_env_values() {
        let config = MeteoConfig {
            probe: ProbeConfig {
                timeout_secs: Some(4),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_from(&config, |key| match key {
            "METEO_PROBE_TIMEOUT_SECS" => Some("soon".to_string()),
            "METEO_LOG_LEVEL" => Some("loud".to_string()),
            _ => None,
        });
        assert_eq!(resolved.probe_timeout, Duration::from_secs(4));
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_resolve_skips_zero_timeout() {
        let zero_in_file = MeteoConfig {
            probe: ProbeConfig {
                timeout_secs: Some(0),
                ..Default::default()
            },
            ..Default::default()
        };
        let zero_env = |key: &str| (key == "METEO_PROBE_TIMEOUT_SECS").then(|| "0".to_string());

        // Both sources zero: the default applies.
        let resolved = resolve_from(&zero_in_file, zero_env);
        assert_eq!(resolved.probe_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        // Zero in env only: the file value applies.
        let five_in_file = MeteoConfig {
            probe: ProbeConfig {
                timeout_secs: Some(5),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_from(&five_in_file, zero_env);
        assert_eq!(resolved.probe_timeout, Duration::from_secs(5));

        // Zero in file only: the default applies.
        let resolved = resolve_from(&zero_in_file, |_| None);
        assert!(!resolved.probe_timeout.is_zero());
        assert_eq!(resolved.probe_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_full_toml_parses() {
        let toml_str = r#"
[general]
log_level = "trace"

[probe]
geocoding_url = "https://example.test/search?name=Oslo"
forecast_url = "https://example.test/forecast"
timeout_secs = 5

[input]
char_limit = 64
width = 32
"#;
        let config: MeteoConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level.as_deref(), Some("trace"));
        assert_eq!(
            config.probe.geocoding_url.as_deref(),
            Some("https://example.test/search?name=Oslo")
        );
        assert_eq!(config.probe.timeout_secs, Some(5));
        assert_eq!(config.input.char_limit, Some(64));
        assert_eq!(config.input.width, Some(32));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[probe]
timeout_secs = 2
"#;
        let config: MeteoConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.probe.timeout_secs, Some(2));
        assert!(config.probe.geocoding_url.is_none());
        assert!(config.general.log_level.is_none());
        assert!(config.input.width.is_none());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("meteo-config-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[probe\ntimeout_secs = ").unwrap();

        let result = load_config_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_config_from(Path::new("/nonexistent/meteo/config.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_generated_default_parses_to_defaults() {
        let dir = std::env::temp_dir().join(format!("meteo-default-test-{}", std::process::id()));
        let path = dir.join("config.toml");
        generate_default_config(&path);

        let config = load_config_from(&path).unwrap();
        assert!(config.probe.geocoding_url.is_none());
        assert!(config.input.char_limit.is_none());

        fs::remove_dir_all(&dir).unwrap();
    }
}
