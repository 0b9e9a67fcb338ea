use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::i18n::Locale;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,
    #[serde(default = "default_question_count")]
    pub question_count: usize,
    #[serde(default = "default_probe_url")]
    pub probe_url: String,
    #[serde(default = "default_probe_interval_secs")]
    pub probe_interval_secs: u64,
}

fn default_locale() -> String {
    "en".to_string()
}
fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_reply_delay_ms() -> u64 {
    1000
}
fn default_question_count() -> usize {
    3
}
fn default_probe_url() -> String {
    "https://www.gstatic.com/generate_204".to_string()
}
fn default_probe_interval_secs() -> u64 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            theme: default_theme(),
            reply_delay_ms: default_reply_delay_ms(),
            question_count: default_question_count(),
            probe_url: default_probe_url(),
            probe_interval_secs: default_probe_interval_secs(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("padhai")
            .join("config.toml")
    }

    pub fn locale(&self) -> Locale {
        Locale::from_tag(&self.locale).unwrap_or_default()
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    pub fn probe_interval(&self) -> Duration {
        Duration::from_secs(self.probe_interval_secs.max(1))
    }

    /// Clamp stale or hand-edited values back into usable ranges.
    pub fn normalize(&mut self) {
        if Locale::from_tag(&self.locale).is_none() {
            self.locale = default_locale();
        }
        self.reply_delay_ms = self.reply_delay_ms.clamp(250, 5000);
        self.question_count = self.question_count.clamp(1, 10);
    }
}
