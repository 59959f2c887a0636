/// Configuration management for graph-walk
use crate::error::ConfigError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub traversal: TraversalSettings,
    pub output: OutputSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraversalSettings {
    /// Reject cyclic ancestry instead of enumerating forever
    pub cycle_guard: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidValue {
                key: "output.format".to_string(),
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            traversal: TraversalSettings { cycle_guard: false },
            output: OutputSettings {
                format: OutputFormat::Text,
            },
            logging: LoggingSettings {
                level: "info".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: Config =
            serde_yaml::from_str(&content).context("Failed to parse configuration file")?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from environment variables
    pub fn load_from_env() -> Result<Self> {
        let mut config = Config::default();

        // Override with environment variables if present
        if let Ok(cycle_guard) = std::env::var("GRAPH_WALK_CYCLE_GUARD") {
            config.traversal.cycle_guard = cycle_guard.parse().map_err(|_| {
                ConfigError::InvalidValue {
                    key: "GRAPH_WALK_CYCLE_GUARD".to_string(),
                    value: cycle_guard.clone(),
                }
            })?;
        }

        if let Ok(format) = std::env::var("GRAPH_WALK_OUTPUT_FORMAT") {
            config.output.format = format.parse()?;
        }

        if let Ok(level) = std::env::var("GRAPH_WALK_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(config)
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge_with(&mut self, other: Config) {
        self.traversal.cycle_guard = other.traversal.cycle_guard;
        self.output.format = other.output.format;
        self.logging.level = other.logging.level;
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::UnsupportedLogLevel(self.logging.level.clone()).into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_save_and_load() {
        let mut config = Config::default();
        config.traversal.cycle_guard = true;
        config.output.format = OutputFormat::Json;
        let temp_file = NamedTempFile::new().unwrap();

        config.save_to_file(temp_file.path()).unwrap();
        let loaded_config = Config::load_from_file(temp_file.path()).unwrap();

        assert_eq!(config, loaded_config);
    }

    #[test]
    fn test_config_parses_yaml() {
        let yaml = "traversal:\n  cycle_guard: true\noutput:\n  format: json\nlogging:\n  level: debug\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert!(config.traversal.cycle_guard);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.logging.level = "WARN".to_string();
        assert!(config.validate().is_ok());

        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_merge() {
        let mut base_config = Config::default();
        let mut override_config = Config::default();

        override_config.traversal.cycle_guard = true;
        override_config.logging.level = "debug".to_string();

        base_config.merge_with(override_config);

        assert!(base_config.traversal.cycle_guard);
        assert_eq!(base_config.output.format, OutputFormat::Text);
        assert_eq!(base_config.logging.level, "debug");
    }

    #[test]
    fn test_config_merge_restores_defaults() {
        let mut env_config = Config::default();
        env_config.traversal.cycle_guard = true;
        env_config.output.format = OutputFormat::Json;
        env_config.logging.level = "debug".to_string();

        let file_config: Config = serde_yaml::from_str(
            "traversal:\n  cycle_guard: false\noutput:\n  format: text\nlogging:\n  level: info\n",
        )
        .unwrap();

        env_config.merge_with(file_config);

        assert_eq!(env_config, Config::default());
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_missing_config_file() {
        assert!(Config::load_from_file("/nonexistent/graph-walk.yml").is_err());
    }
}
