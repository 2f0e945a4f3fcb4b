//! Configuration file parser for ~/.config/brief/config.toml.
//!
//! The config file is optional — a missing file yields `Config::default()`.
//! Unknown keys are ignored by serde, though we log a warning for each one so
//! typos are visible with `RUST_LOG=warn`.
use secrecy::SecretString;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Environment variable holding the news API key. Takes precedence over `api_key`.
pub const API_KEY_ENV: &str = "NEWS_API_KEY";

/// Default news API base URL (v2).
pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration
// ============================================================================

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
///
/// The custom Debug impl masks `api_key` so the key never reaches logs.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// News API key (alternative to the `NEWS_API_KEY` env var).
    pub api_key: Option<String>,

    /// Base URL of the news API, without a trailing endpoint path.
    pub base_url: String,

    /// Language filter for top headlines.
    pub language: String,

    /// Country filter for top headlines.
    pub country: String,

    /// Keyword used for the trending search.
    pub trending_query: String,

    /// Per-request timeout in seconds. 0 disables the timeout.
    pub request_timeout_secs: u64,

    /// Theme variant name ("dark" or "light").
    pub theme: String,

    /// Keybinding overrides: action name to key string.
    pub keybindings: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            language: "en".to_string(),
            country: "us".to_string(),
            trending_query: "trending".to_string(),
            request_timeout_secs: 30,
            theme: "dark".to_string(),
            keybindings: HashMap::new(),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("language", &self.language)
            .field("country", &self.country)
            .field("trending_query", &self.trending_query)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("theme", &self.theme)
            .field("keybindings", &self.keybindings)
            .finish()
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 8] = [
        "api_key",
        "base_url",
        "language",
        "country",
        "trending_query",
        "request_timeout_secs",
        "theme",
        "keybindings",
    ];

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)`
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(
            path = %path.display(),
            base_url = %config.base_url,
            has_api_key = config.api_key.is_some(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Resolve the API key from an environment value and the config file.
    ///
    /// A non-empty `env_value` wins over `api_key`. Blank values on either side
    /// count as absent, so the loader sees `None` and stays idle.
    pub fn resolve_api_key(&self, env_value: Option<String>) -> Option<SecretString> {
        let from_env = env_value.filter(|k| !k.trim().is_empty());
        if from_env.is_some() {
            tracing::debug!(source = API_KEY_ENV, "Using news API key from environment");
        }
        from_env
            .or_else(|| self.api_key.clone().filter(|k| !k.trim().is_empty()))
            .map(SecretString::from)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn write_config(name: &str, content: &str) -> (std::path::PathBuf, std::path::PathBuf) {
        let dir = std::env::temp_dir().join(format!("brief_config_test_{}", name));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.base_url, "https://newsapi.org/v2");
        assert_eq!(config.language, "en");
        assert_eq!(config.country, "us");
        assert_eq!(config.trending_query, "trending");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/brief_test_nonexistent_config.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config.language, "en");
    }

    #[test]
    fn test_whitespace_only_file_returns_default() {
        let (dir, path) = write_config("whitespace", "   \n  \n");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.country, "us");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_partial_config_uses_defaults_for_missing() {
        let (dir, path) = write_config("partial", "country = \"gb\"\n");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.country, "gb");
        assert_eq!(config.language, "en");
        assert_eq!(config.request_timeout_secs, 30);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_full_config() {
        let content = r#"
api_key = "file-key"
base_url = "http://127.0.0.1:9000/v2"
language = "de"
country = "de"
trending_query = "viral"
request_timeout_secs = 5
theme = "light"

[keybindings]
reload = "F5"
quit = "Ctrl+q"
"#;
        let (dir, path) = write_config("full", content);
        let config = Config::load(&path).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("file-key"));
        assert_eq!(config.base_url, "http://127.0.0.1:9000/v2");
        assert_eq!(config.language, "de");
        assert_eq!(config.trending_query, "viral");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.theme, "light");
        assert_eq!(config.keybindings.get("reload").map(String::as_str), Some("F5"));
        assert_eq!(config.keybindings.get("quit").map(String::as_str), Some("Ctrl+q"));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let (dir, path) = write_config("invalid", "this is not [valid toml");
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("Invalid TOML"));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_wrong_type_returns_error() {
        let (dir, path) = write_config("wrongtype", "request_timeout_secs = \"soon\"\n");
        assert!(Config::load(&path).is_err());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let (dir, path) = write_config("unknown", "theme = \"dark\"\npagesize = 50\n");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.theme, "dark");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_too_large_file_rejected() {
        let (dir, path) = write_config("too_large", &"a".repeat(1_048_577));
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge(_)));
        assert!(err.to_string().contains("too large"));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_debug_masks_api_key() {
        let config = Config {
            api_key: Some("super-secret-key-12345".to_string()),
            ..Config::default()
        };
        let debug_output = format!("{:?}", config);
        assert!(!debug_output.contains("super-secret-key-12345"));
        assert!(debug_output.contains("[REDACTED]"));
    }

    #[test]
    fn test_env_key_takes_precedence() {
        let config = Config {
            api_key: Some("file-key".to_string()),
            ..Config::default()
        };
        let key = config.resolve_api_key(Some("env-key".to_string())).unwrap();
        assert_eq!(key.expose_secret(), "env-key");
    }

    #[test]
    fn test_file_key_used_without_env() {
        let config = Config {
            api_key: Some("file-key".to_string()),
            ..Config::default()
        };
        let key = config.resolve_api_key(None).unwrap();
        assert_eq!(key.expose_secret(), "file-key");

        let key = config.resolve_api_key(Some("  ".to_string())).unwrap();
        assert_eq!(key.expose_secret(), "file-key");
    }

    #[test]
    fn test_blank_keys_resolve_to_none() {
        let config = Config {
            api_key: Some(String::new()),
            ..Config::default()
        };
        assert!(config.resolve_api_key(Some(String::new())).is_none());
        assert!(Config::default().resolve_api_key(None).is_none());
    }
}
