use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use tripfinder_core::MatchLimits;

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub clock: ClockConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct DatasetConfig {
    /// Path or http(s) URL of the dataset JSON document
    #[serde(default = "DatasetConfig::default_source")]
    pub source: String,
    #[serde(default = "DatasetConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            source: Self::default_source(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

impl DatasetConfig {
    fn default_source() -> String {
        "assets/travel_recommendation_api.json".to_string()
    }

    const fn default_timeout_secs() -> u64 {
        10
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    #[serde(default = "SearchConfig::default_cap")]
    pub results_per_category: usize,
    #[serde(default = "SearchConfig::default_cap")]
    pub cities_per_country: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            results_per_category: Self::default_cap(),
            cities_per_country: Self::default_cap(),
        }
    }
}

impl SearchConfig {
    const fn default_cap() -> usize {
        2
    }

    #[must_use]
    pub const fn limits(&self) -> MatchLimits {
        MatchLimits {
            per_category: self.results_per_category,
            cities_per_country: self.cities_per_country,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ClockConfig {
    #[serde(default = "ClockConfig::default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: Self::default_refresh_interval_ms(),
        }
    }
}

impl ClockConfig {
    const fn default_refresh_interval_ms() -> u64 {
        1000
    }

    #[must_use]
    pub const fn refresh_interval(&self) -> Duration {
        // A zero period would make tokio's interval panic.
        let ms = if self.refresh_interval_ms == 0 {
            1
        } else {
            self.refresh_interval_ms
        };
        Duration::from_millis(ms)
    }
}

const CONFIG_TEMPLATE: &str = r#"{
  "dataset": {
    "source": "assets/travel_recommendation_api.json",
    "timeout_secs": 10
  },
  "search": {
    "results_per_category": 2,
    "cities_per_country": 2
  },
  "clock": {
    "refresh_interval_ms": 1000
  }
}"#;

impl Config {
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("tripfinder")
            .join("config.json"))
    }

    /// Load the config file, or fall back to defaults when there is none.
    pub fn load_or_default() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            return Self::from_json(&content);
        }

        info!(
            "No config at {}, using built-in defaults",
            config_path.display()
        );
        Ok(Self::default())
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("tripfinder");

        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        std::fs::write(&config_path, CONFIG_TEMPLATE)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Point dataset.source at your travel_recommendation_api.json (path or URL)");
        println!("   2. Run 'tripfinder search beaches' or 'tripfinder interactive'");
        println!();
        println!("🔧 Configuration options:");
        println!("   - search.results_per_category: cards shown for beach/temple keywords");
        println!("   - search.cities_per_country: cities shown for a matched country");
        println!("   - clock.refresh_interval_ms: how often local-time clocks update");
        println!();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_matches_defaults() {
        let config = Config::from_json(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config = Config::from_json(r#"{ "search": { "cities_per_country": 3 } }"#).unwrap();

        assert_eq!(config.search.results_per_category, 2);
        assert_eq!(config.search.limits().cities_per_country, 3);
        assert_eq!(config.dataset.timeout(), Duration::from_secs(10));
        assert_eq!(config.clock.refresh_interval(), Duration::from_secs(1));
    }

    #[test]
    fn zero_refresh_interval_is_clamped() {
        let config = Config::from_json(r#"{ "clock": { "refresh_interval_ms": 0 } }"#).unwrap();
        assert_eq!(config.clock.refresh_interval(), Duration::from_millis(1));
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(Config::from_json("{ \"search\": ").is_err());
        assert!(Config::from_json(r#"{ "clock": { "refresh_interval_ms": "fast" } }"#).is_err());
    }
}
