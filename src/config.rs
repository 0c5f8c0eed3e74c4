use crate::datasources::regions::District;
use crate::error::{CropRiskError, Result};
use dialoguer::{Input, Select};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_WEATHER_URL: &str = "https://api.open-meteo.com/v1";
pub const MAX_FORECAST_DAYS: u8 = 16;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub model: ModelConfig,
    pub weather: WeatherConfig,
    pub location: LocationConfig,
}

/// Learned classifier artifact. No path means rules only.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelConfig {
    pub path: Option<PathBuf>,
    pub enabled: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: None,
            enabled: true,
        }
    }
}

impl ModelConfig {
    /// Artifact path to load, if the model is both configured and enabled
    pub fn artifact_path(&self) -> Option<&Path> {
        if self.enabled {
            self.path.as_deref()
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub base_url: String,
    pub forecast_days: u8,
    pub timeout_secs: u64,
    pub enabled: bool,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_WEATHER_URL.into(),
            forecast_days: 7,
            timeout_secs: 10,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LocationConfig {
    pub default_district: Option<String>,
}

impl Config {
    /// Load from an explicit path, or from the first standard location.
    ///
    /// An explicit path must exist. Without one, a missing file yields the
    /// defaults so the engine runs unconfigured.
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = config_override {
            if !path.exists() {
                return Err(CropRiskError::Config(format!(
                    "Config file not found at {:?}",
                    path
                )));
            }
            return Self::load_from_path(&path);
        }

        match Self::find_config_path() {
            Some(path) => Self::load_from_path(&path),
            None => {
                tracing::debug!("No config file found - using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .map_err(|e| CropRiskError::Config(format!("Failed to read config: {}", e)))?;
        let config = Self::from_yaml(&config_str)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse YAML after `${VAR}` substitution, then validate
    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content)?;

        let has_content = content.lines().any(|line| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        });
        let config: Config = if has_content {
            serde_yaml::from_str(&content)
                .map_err(|e| CropRiskError::Config(format!("Failed to parse config: {}", e)))?
        } else {
            Config::default()
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let days = self.weather.forecast_days;
        if days == 0 || days > MAX_FORECAST_DAYS {
            return Err(CropRiskError::Config(format!(
                "weather.forecast_days must be between 1 and {}, got {}",
                MAX_FORECAST_DAYS, days
            )));
        }
        if self.weather.timeout_secs == 0 {
            return Err(CropRiskError::Config(
                "weather.timeout_secs must be greater than zero".into(),
            ));
        }
        if let Some(name) = &self.location.default_district {
            if District::lookup(name).is_none() {
                return Err(CropRiskError::Config(format!(
                    "location.default_district '{}' is not a supported district",
                    name
                )));
            }
        }
        Ok(())
    }

    /// First existing config among `./config/config.yaml` and the XDG location
    fn find_config_path() -> Option<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir()
            .map(|dir| dir.join("croprisk").join("config.yaml"))
            .filter(|p| p.exists())
    }

    /// Default path for writing new config files (~/.config/croprisk/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CropRiskError::Config("Cannot determine config directory".into()))?
            .join("croprisk");
        Ok(config_dir.join("config.yaml"))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)
            .map_err(|e| CropRiskError::Config(format!("Failed to serialize config: {}", e)))?;
        let content = format!(
            "# CropRisk Configuration\n# Generated by `croprisk init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the new Config and the path it was written to.
    pub fn setup_interactive(target: Option<PathBuf>) -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up CropRisk!");
        println!();

        // --- Risk model ---
        println!("Risk model (leave blank for rule-based scoring only)");
        let model_path: String = Input::new()
            .with_prompt("  Model artifact path")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| CropRiskError::Config(format!("Input error: {}", e)))?;

        println!();

        // --- Weather ---
        println!("Weather forecast (Open-Meteo)");
        let forecast_days: u8 = Input::new()
            .with_prompt("  Forecast days")
            .default(7)
            .validate_with(|d: &u8| {
                if (1..=MAX_FORECAST_DAYS).contains(d) {
                    Ok(())
                } else {
                    Err(format!("must be between 1 and {}", MAX_FORECAST_DAYS))
                }
            })
            .interact_text()
            .map_err(|e| CropRiskError::Config(format!("Input error: {}", e)))?;

        println!();

        // --- Location ---
        println!("Location");
        let mut choices: Vec<&str> = District::ALL.iter().map(|d| d.key()).collect();
        choices.push("none");
        let picked = Select::new()
            .with_prompt("  Default district")
            .items(&choices)
            .default(0)
            .interact()
            .map_err(|e| CropRiskError::Config(format!("Input error: {}", e)))?;
        let default_district = District::ALL.get(picked).map(|d| d.key().to_string());

        println!();

        let config = Config {
            model: ModelConfig {
                path: (!model_path.trim().is_empty()).then(|| PathBuf::from(model_path.trim())),
                enabled: true,
            },
            weather: WeatherConfig {
                forecast_days,
                ..WeatherConfig::default()
            },
            location: LocationConfig { default_district },
        };

        let config_path = match target {
            Some(p) => p,
            None => Self::default_config_path()?,
        };
        config.save(&config_path)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| CropRiskError::Config(format!("Bad substitution pattern: {}", e)))?;

        let mut result = content.to_string();
        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        Ok(result)
    }
}
