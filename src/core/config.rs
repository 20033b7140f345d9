//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.corpguide/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CorpGuideConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub base_url: Option<String>,
    pub chat_path: Option<String>,
    pub reset_path: Option<String>,
    /// 0 disables the timeout.
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChatConfig {
    pub greeting: Option<String>,
    pub max_turns: Option<usize>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_CHAT_PATH: &str = "/chat";
pub const DEFAULT_RESET_PATH: &str = "/reset";

pub const DEFAULT_GREETING: &str =
    "Hello! 👋 I'm CorpGuide AI.\nAsk me anything about company policies.";

// ============================================================================
// Resolved Config (concrete values)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub chat_path: String,
    pub reset_path: String,
    pub timeout: Option<Duration>,
    pub greeting: String,
    pub max_turns: Option<usize>,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
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

/// Returns the path to `~/.corpguide/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".corpguide").join("config.toml"))
}

/// Load config from `~/.corpguide/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `CorpGuideConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<CorpGuideConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(CorpGuideConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<CorpGuideConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(CorpGuideConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: CorpGuideConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# CorpGuide Chat Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [server]
# base_url = "http://localhost:8000"   # Or set CORPGUIDE_BASE_URL env var
# chat_path = "/chat"
# reset_path = "/reset"
# timeout_secs = 0                     # 0 = wait indefinitely; or CORPGUIDE_TIMEOUT_SECS

# [chat]
# greeting = "Hello! Ask me anything about company policies."
# max_turns = 40                       # Oldest exchanges dropped beyond this; odd values round up
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

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &CorpGuideConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| std::env::var("CORPGUIDE_BASE_URL").ok())
        .or_else(|| config.server.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Timeout: CLI → env → config → none
    let timeout_secs = cli
        .timeout_secs
        .or_else(|| {
            std::env::var("CORPGUIDE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
        })
        .or(config.server.timeout_secs)
        .unwrap_or(0);
    let timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));

    ResolvedConfig {
        base_url,
        chat_path: config
            .server
            .chat_path
            .clone()
            .unwrap_or_else(|| DEFAULT_CHAT_PATH.to_string()),
        reset_path: config
            .server
            .reset_path
            .clone()
            .unwrap_or_else(|| DEFAULT_RESET_PATH.to_string()),
        timeout,
        greeting: config
            .chat
            .greeting
            .clone()
            .unwrap_or_else(|| DEFAULT_GREETING.to_string()),
        max_turns: config.chat.max_turns.filter(|&n| n > 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_empty() {
        let config = CorpGuideConfig::default();
        assert!(config.server.base_url.is_none());
        assert!(config.chat.max_turns.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = CorpGuideConfig::default();
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.chat_path, DEFAULT_CHAT_PATH);
        assert_eq!(resolved.reset_path, DEFAULT_RESET_PATH);
        assert_eq!(resolved.greeting, DEFAULT_GREETING);
        assert_eq!(resolved.max_turns, None);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = CorpGuideConfig {
            server: ServerConfig {
                base_url: None,
                chat_path: Some("/api/chat".into()),
                reset_path: Some("/api/reset".into()),
                timeout_secs: None,
            },
            chat: ChatConfig {
                greeting: Some("Hi.".into()),
                max_turns: Some(10),
            },
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.chat_path, "/api/chat");
        assert_eq!(resolved.reset_path, "/api/reset");
        assert_eq!(resolved.greeting, "Hi.");
        assert_eq!(resolved.max_turns, Some(10));
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = CorpGuideConfig {
            server: ServerConfig {
                base_url: Some("http://from-config:8000".into()),
                timeout_secs: Some(5),
                ..Default::default()
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            base_url: Some("http://from-cli:9000".into()),
            timeout_secs: Some(30),
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.base_url, "http://from-cli:9000");
        assert_eq!(resolved.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_zero_timeout_disables_it() {
        let cli = CliOverrides {
            timeout_secs: Some(0),
            ..Default::default()
        };
        let resolved = resolve(&CorpGuideConfig::default(), &cli);
        assert_eq!(resolved.timeout, None);
    }

    #[test]
    fn test_zero_max_turns_means_unbounded() {
        let config = CorpGuideConfig {
            chat: ChatConfig {
                max_turns: Some(0),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(resolve(&config, &CliOverrides::default()).max_turns, None);
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[server]
timeout_secs = 20
"#;
        let config: CorpGuideConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.timeout_secs, Some(20));
        assert!(config.server.base_url.is_none());
        assert!(config.chat.greeting.is_none());
    }

    #[test]
    fn test_missing_file_generates_commented_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = load_config_from(&path).unwrap();
        assert!(config.server.base_url.is_none());

        // Generated file is all comments, so it parses back to defaults
        let generated = fs::read_to_string(&path).unwrap();
        assert!(generated.contains("# [server]"));
        let reparsed: CorpGuideConfig = toml::from_str(&generated).unwrap();
        assert!(reparsed.server.chat_path.is_none());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[server\nbase_url = ").unwrap();

        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
    }
}
