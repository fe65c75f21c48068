//! Config loader — reads `~/.quizbot/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.quizbot/config.json` (or an explicit path)
//! 3. Environment variables `QUIZBOT_<SECTION>__<FIELD>` (override JSON)
//!
//! A missing or unparsable file is never fatal; startup falls back to
//! defaults so the server can still come up (and report that no backend
//! is usable).

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::schema::Config;

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    let home = home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".quizbot").join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't
/// be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);
    load_config_from_path(&config_path)
}

/// Load config from a specific file path.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return apply_env_overrides(Config::default());
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return apply_env_overrides(Config::default());
        }
    };

    let config: Config = match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            return apply_env_overrides(Config::default());
        }
    };

    apply_env_overrides(config)
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Env var format: `QUIZBOT_<SECTION>__<FIELD>` (double underscore as
/// delimiter).
///
/// Supported overrides:
/// - `QUIZBOT_SERVER__HOST` → `server.host`
/// - `QUIZBOT_SERVER__PORT` → `server.port`
fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(val) = std::env::var("QUIZBOT_SERVER__HOST") {
        config.server.host = val;
    }
    if let Ok(val) = std::env::var("QUIZBOT_SERVER__PORT") {
        if let Ok(p) = val.parse::<u16>() {
            config.server.port = p;
        }
    }

    config
}

/// Helper to get home directory.
fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| std::env::var("USERPROFILE").ok().map(PathBuf::from))
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_missing_file() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.json"));
        // Should return defaults
        assert_eq!(config.server.port, 8080);
        assert!(config.ai_providers.is_empty());
    }

    #[test]
    fn test_load_valid_json() {
        let file = write_temp_json(
            r#"{
            "server": { "port": 9090 },
            "aiProviders": [
                {"type": "GoogleAi", "apiKey": "g-key"},
                {"type": "OpenAi", "apiKey": "o-key", "model": "gpt-4o-mini"}
            ]
        }"#,
        );

        let config = load_config_from_path(file.path());
        assert_eq!(config.server.port, 9090);
        // Default preserved
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.ai_providers.len(), 2);
        assert_eq!(config.ai_providers[0].kind, "GoogleAi");
    }

    #[test]
    fn test_load_invalid_json_returns_defaults() {
        let file = write_temp_json("not valid json {{{");
        let config = load_config_from_path(file.path());
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_load_empty_json() {
        let file = write_temp_json("{}");
        let config = load_config_from_path(file.path());
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.ai_providers.is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.server.port = 1234;
        config.ai_providers.push(super::super::schema::ProviderEntry {
            kind: "OpenAi".to_string(),
            api_key: Some("sk-test".to_string()),
            model: Some("gpt-4o-mini".to_string()),
            endpoint: None,
        });

        save_config(&config, Some(&path)).unwrap();

        let reloaded = load_config_from_path(&path);
        assert_eq!(reloaded.server.port, 1234);
        assert_eq!(reloaded.ai_providers.len(), 1);
        assert_eq!(reloaded.ai_providers[0].api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_saved_json_uses_camel_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.ai_providers.push(super::super::schema::ProviderEntry {
            kind: "OpenAi".to_string(),
            api_key: Some("k".to_string()),
            model: Some("m".to_string()),
            endpoint: None,
        });
        save_config(&config, Some(&path)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let raw: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert!(raw.get("aiProviders").is_some());
        assert!(raw.get("ai_providers").is_none());
        assert_eq!(raw["aiProviders"][0]["apiKey"], "k");
        assert_eq!(raw["aiProviders"][0]["type"], "OpenAi");
    }

    #[test]
    fn test_env_override_port() {
        std::env::set_var("QUIZBOT_SERVER__PORT", "9999");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.server.port, 9999);

        // An unparsable value leaves the configured port alone
        std::env::set_var("QUIZBOT_SERVER__PORT", "not-a-port");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.server.port, 8080);

        std::env::remove_var("QUIZBOT_SERVER__PORT");
    }

    #[test]
    fn test_env_override_host() {
        std::env::set_var("QUIZBOT_SERVER__HOST", "127.0.0.1");
        let config = apply_env_overrides(Config::default());
        assert_eq!(config.server.host, "127.0.0.1");
        std::env::remove_var("QUIZBOT_SERVER__HOST");
    }
}
