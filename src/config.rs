//! Configuration management
//!
//! TOML config with serde-defaulted sections. Provider secrets can live
//! in the file but environment variables always win, matching the .env
//! driven setups this runs alongside.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// External provider credentials
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Planner behavior
    #[serde(default)]
    pub planner: PlannerConfig,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// Amadeus client id (env: AMADEUS_CLIENT_ID)
    pub amadeus_client_id: Option<String>,
    /// Amadeus client secret (env: AMADEUS_CLIENT_SECRET)
    pub amadeus_client_secret: Option<String>,
    /// Groq API key (env: GROQ_API_KEY)
    pub groq_api_key: Option<String>,
    /// Chat model for hotel and activity lookups
    #[serde(default = "default_llm_model")]
    pub llm_model: String,
    /// OpenWeather API key (env: OPENWEATHER_API_KEY)
    pub openweather_api_key: Option<String>,
}

fn default_llm_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            amadeus_client_id: None,
            amadeus_client_secret: None,
            groq_api_key: None,
            llm_model: default_llm_model(),
            openweather_api_key: None,
        }
    }
}

impl ProvidersConfig {
    fn env_or(&self, var: &str, fallback: &Option<String>) -> Option<String> {
        std::env::var(var).ok().or_else(|| fallback.clone())
    }

    pub fn amadeus_credentials(&self) -> Option<(String, String)> {
        let id = self.env_or("AMADEUS_CLIENT_ID", &self.amadeus_client_id)?;
        let secret = self.env_or("AMADEUS_CLIENT_SECRET", &self.amadeus_client_secret)?;
        Some((id, secret))
    }

    pub fn groq_key(&self) -> Option<String> {
        self.env_or("GROQ_API_KEY", &self.groq_api_key)
    }

    pub fn openweather_key(&self) -> Option<String> {
        self.env_or("OPENWEATHER_API_KEY", &self.openweather_api_key)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Seconds to wait for agent results before closing the window
    #[serde(default = "default_collect_window")]
    pub collect_window_secs: u64,
    /// Origin used when a request does not name one
    #[serde(default = "default_origin")]
    pub default_origin: String,
    /// Currency label for reports
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_collect_window() -> u64 {
    120
}

fn default_origin() -> String {
    "Mumbai".to_string()
}

fn default_currency() -> String {
    "INR".to_string()
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            collect_window_secs: default_collect_window(),
            default_origin: default_origin(),
            currency: default_currency(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from the default path, creating it on first run
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path).context("Failed to read config file")?;
            let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = path.parent().context("Config path has no parent")?;
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, contents).context("Failed to write config file")?;
        Ok(())
    }
}

/// Get the configuration file path
pub fn config_path() -> Result<PathBuf> {
    let base = directories::ProjectDirs::from("com", "trip-planner", "trip-planner")
        .context("Failed to get project directories")?;
    Ok(base.config_dir().join("config.toml"))
}

/// Show current configuration
pub fn show_config() -> Result<()> {
    let config = Config::load()?;
    println!("Planner:");
    println!("  collect window: {}s", config.planner.collect_window_secs);
    println!("  default origin: {}", config.planner.default_origin);
    println!("  currency:       {}", config.planner.currency);
    println!("Providers:");
    println!(
        "  amadeus:     {}",
        if config.providers.amadeus_credentials().is_some() { "configured" } else { "not configured" }
    );
    println!(
        "  groq:        {} (model {})",
        if config.providers.groq_key().is_some() { "configured" } else { "not configured" },
        config.providers.llm_model
    );
    println!(
        "  openweather: {}",
        if config.providers.openweather_key().is_some() { "configured" } else { "not configured" }
    );
    println!("Server:");
    println!("  {}:{}", config.server.host, config.server.port);
    Ok(())
}

/// Set the collection window
pub fn set_collect_window(secs: u64) -> Result<()> {
    let mut config = Config::load()?;
    config.planner.collect_window_secs = secs;
    config.save()?;
    println!("Collection window set to {}s", secs);
    Ok(())
}

/// Set the chat model used for hotel and activity lookups
pub fn set_llm_model(model: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.providers.llm_model = model.to_string();
    config.save()?;
    println!("Chat model set to {}", model);
    Ok(())
}

/// Set the default origin city
pub fn set_default_origin(origin: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.planner.default_origin = origin.to_string();
    config.save()?;
    println!("Default origin set to {}", origin);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        // First load writes defaults
        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.planner.collect_window_secs, 120);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.providers.llm_model, "llama-3.3-70b-versatile");

        // Second load parses what was written
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.planner.default_origin, "Mumbai");
        assert_eq!(reloaded.planner.currency, "INR");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[planner]\ncollect_window_secs = 15\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.planner.collect_window_secs, 15);
        assert_eq!(config.planner.default_origin, "Mumbai");
        assert_eq!(config.server.host, "127.0.0.1");
    }
}
