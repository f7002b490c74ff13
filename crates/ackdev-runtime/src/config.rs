use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Resolve the settings file path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. ACKDEV_CONFIG environment variable (with tilde expansion)
/// 3. XDG config directory
/// 4. ~/.ackdev/config.toml (fallback for systems without XDG)
pub fn resolve_settings_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("ACKDEV_CONFIG") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("ackdev").join("config.toml"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".ackdev").join("config.toml"));
    }

    Err(Error::Config(
        "Could not determine settings path: no HOME directory or XDG config directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// Key names per wizard action, e.g. `up = ["up", "k"]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub confirm: Vec<String>,
    pub back: Vec<String>,
    pub quit: Vec<String>,
    pub interrupt: Vec<String>,
    pub ignore: Vec<String>,
    pub next_field: Vec<String>,
    pub prev_field: Vec<String>,
    pub required: Vec<String>,
    pub primary_key: Vec<String>,
    pub secret: Vec<String>,
    pub immutable: Vec<String>,
    pub arn: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            up: keys(&["up", "k"]),
            down: keys(&["down", "j"]),
            left: keys(&["left"]),
            right: keys(&["right"]),
            confirm: keys(&["enter"]),
            back: keys(&["esc"]),
            quit: keys(&["q"]),
            interrupt: keys(&["ctrl+c"]),
            ignore: keys(&["i"]),
            next_field: keys(&["down", "tab"]),
            prev_field: keys(&["up", "backtab"]),
            required: keys(&["r"]),
            primary_key: keys(&["p"]),
            secret: keys(&["s"]),
            immutable: keys(&["m"]),
            arn: keys(&["a"]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Upper bound of deferred intents waiting to be dispatched
    pub intent_queue_capacity: usize,
    /// How often the terminal source wakes up to check for interrupts
    pub poll_interval_ms: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            intent_queue_capacity: 32,
            poll_interval_ms: 200,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub keys: KeyBindings,
    #[serde(default)]
    pub session: SessionSettings,
}

impl Settings {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.session.intent_queue_capacity == 0 {
            return Err(Error::Config(
                "session.intent_queue_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.keys.confirm, vec!["enter"]);
        assert_eq!(settings.session.intent_queue_capacity, 32);
    }

    #[test]
    fn test_settings_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("ackdev/config.toml");

        let mut settings = Settings::default();
        settings.keys.quit = vec!["x".to_string(), "ctrl+q".to_string()];
        settings.session.poll_interval_ms = 50;

        settings.save_to(&path)?;
        let loaded = Settings::load_from(&path)?;
        assert_eq!(loaded, settings);
        Ok(())
    }

    #[test]
    fn test_partial_settings_fill_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[keys]\nignore = [\"x\"]\n")?;

        let loaded = Settings::load_from(&path)?;
        assert_eq!(loaded.keys.ignore, vec!["x"]);
        assert_eq!(loaded.keys.up, vec!["up", "k"]);
        assert_eq!(loaded.session, SessionSettings::default());
        Ok(())
    }

    #[test]
    fn test_zero_queue_capacity_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[session]\nintent_queue_capacity = 0\n").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let loaded = Settings::load_from(&temp_dir.path().join("missing.toml"))?;
        assert_eq!(loaded, Settings::default());
        Ok(())
    }

    #[test]
    fn test_explicit_settings_path_wins() -> Result<()> {
        let path = resolve_settings_path(Some("/etc/ackdev.toml"))?;
        assert_eq!(path, PathBuf::from("/etc/ackdev.toml"));
        Ok(())
    }
}
