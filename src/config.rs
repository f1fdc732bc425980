use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::core::scene::Pacing;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Content document to load. When unset, `data.json` in the data
    /// directory is used if present, otherwise the bundled document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_path: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub sound: bool,
    /// Redraw each frame on a cleared screen.
    #[serde(default = "default_true")]
    pub clear_screen: bool,
    #[serde(default)]
    pub pacing: PacingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacingConfig {
    pub quote_interval_ms: u64,
    pub skip_reveal_ms: u64,
    pub transition_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        PacingConfig {
            quote_interval_ms: 2000,
            skip_reveal_ms: 5000,
            transition_ms: 1500,
        }
    }
}

impl PacingConfig {
    /// No waiting anywhere. Used by `--fast` and `HEARTS_FAST`.
    pub fn instant() -> Self {
        PacingConfig {
            quote_interval_ms: 0,
            skip_reveal_ms: 0,
            transition_ms: 0,
        }
    }

    pub fn scene_pacing(&self) -> Pacing {
        Pacing {
            quote_interval: Duration::from_millis(self.quote_interval_ms),
            skip_reveal: Duration::from_millis(self.skip_reveal_ms),
        }
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Loads the config file and applies `HEARTS_*` environment overrides.
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let mut config = Self::load(data_dir)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Loads the config file only, creating it with defaults when missing.
    pub fn load(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => Self::default_data_dir()?,
        };

        std::fs::create_dir_all(&data_dir).context("Failed to create data directory")?;

        let config_path = data_dir.join("config.json");
        let config = if config_path.exists() {
            let config_str =
                std::fs::read_to_string(&config_path).context("Failed to read config.json")?;

            if config_str.trim().is_empty() {
                tracing::warn!(path = %config_path.display(), "config file is empty, recreating");
                Self::create_default(data_dir.clone())?
            } else {
                let mut config: Config =
                    serde_json::from_str(&config_str).context("Failed to parse config.json")?;
                config.data_dir = data_dir.clone();
                config
            }
        } else {
            Self::create_default(data_dir.clone())?
        };

        Ok(config)
    }

    pub fn default_data_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("hearts");
        Ok(dir)
    }

    fn create_default(data_dir: PathBuf) -> Result<Self> {
        let config = Config {
            data_dir,
            content_path: None,
            sound: true,
            clear_screen: true,
            pacing: PacingConfig::default(),
        };
        config.save()?;
        Ok(config)
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(path) = var("HEARTS_CONTENT") {
            if !path.trim().is_empty() {
                self.content_path = Some(PathBuf::from(path));
            }
        }
        if var("HEARTS_FAST").map_or(false, |v| is_truthy(&v)) {
            self.pacing = PacingConfig::instant();
        }
    }

    /// Applies `hearts play` flags. `fast` only touches pacing.
    pub fn apply_play_flags(&mut self, fast: bool, no_clear: bool) {
        if fast {
            self.pacing = PacingConfig::instant();
        }
        if no_clear {
            self.clear_screen = false;
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = self.data_dir.join("config.json");
        let json_str = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, json_str).context("Failed to write config.json")?;
        Ok(())
    }

    /// The content document this configuration points at, if any.
    pub fn content_source(&self) -> Option<PathBuf> {
        if let Some(path) = &self.content_path {
            return Some(path.clone());
        }
        let local = self.data_dir.join("data.json");
        local.exists().then_some(local)
    }

    pub fn profile_file(&self) -> PathBuf {
        self.data_dir.join("profile.json")
    }

    pub fn share_file(&self) -> PathBuf {
        self.data_dir.join("share.txt")
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(dir.path().to_path_buf())).unwrap();

        assert!(dir.path().join("config.json").exists());
        assert_eq!(config.data_dir, dir.path());
        assert_eq!(config.profile_file(), dir.path().join("profile.json"));
        assert_eq!(config.share_file(), dir.path().join("share.txt"));
    }

    #[test]
    fn test_reads_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.json"),
            r#"{"content_path": "/tmp/custom.json", "sound": false,
                "pacing": {"quote_interval_ms": 10, "skip_reveal_ms": 20, "transition_ms": 0}}"#,
        )
        .unwrap();

        let config = Config::load(Some(dir.path().to_path_buf())).unwrap();
        assert!(!config.sound);
        assert!(config.clear_screen);
        assert_eq!(config.pacing.quote_interval_ms, 10);
        assert_eq!(config.pacing.scene_pacing().skip_reveal, Duration::from_millis(20));
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), "{}").unwrap();

        let config = Config::load(Some(dir.path().to_path_buf())).unwrap();
        assert!(config.sound);
        assert!(config.clear_screen);
        assert_eq!(config.pacing, PacingConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::load(Some(dir.path().to_path_buf())).unwrap();

        config.apply_env(|_| None);
        assert_eq!(config.content_path, None);
        assert_eq!(config.pacing, PacingConfig::default());

        config.apply_env(|key| match key {
            "HEARTS_CONTENT" => Some("/tmp/story.json".to_string()),
            "HEARTS_FAST" => Some("yes".to_string()),
            _ => None,
        });
        assert_eq!(config.content_path, Some(PathBuf::from("/tmp/story.json")));
        assert_eq!(config.pacing, PacingConfig::instant());
    }

    #[test]
    fn test_fast_flag_keeps_screen_clearing() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::load(Some(dir.path().to_path_buf())).unwrap();

        config.apply_play_flags(true, false);
        assert_eq!(config.pacing, PacingConfig::instant());
        assert!(config.clear_screen);

        config.apply_play_flags(false, true);
        assert!(!config.clear_screen);
    }

    #[test]
    fn test_content_source_prefers_data_dir_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::load(Some(dir.path().to_path_buf())).unwrap();
        config.content_path = None;
        assert_eq!(config.content_source(), None);

        std::fs::write(dir.path().join("data.json"), "{}").unwrap();
        assert_eq!(config.content_source(), Some(dir.path().join("data.json")));

        config.content_path = Some(PathBuf::from("/elsewhere/content.json"));
        assert_eq!(config.content_source(), Some(PathBuf::from("/elsewhere/content.json")));
    }

    #[test]
    fn test_truthy_values() {
        assert!(is_truthy("1"));
        assert!(is_truthy(" TRUE "));
        assert!(!is_truthy("0"));
        assert!(!is_truthy(""));
    }
}
