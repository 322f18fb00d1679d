//! Configuration for the schema generator
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (conduit-schemas.toml)
//! - Environment variables (CONDUIT_SCHEMAS_*)
//!
//! ## Example config file (conduit-schemas.toml):
//! ```toml
//! [output]
//! dir = "./schemas"
//!
//! [discovery]
//! manifest_name = "conduit.json"
//! skip_prefixes = ["node_modules/", "dist/"]
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the schema generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Package discovery settings
    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory generated documents are written into
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

/// Package discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// File name that marks a plugin package root
    #[serde(default = "default_manifest_name")]
    pub manifest_name: String,

    /// Skip manifests under these path prefixes (relative to the scan root)
    #[serde(default = "default_skip_prefixes")]
    pub skip_prefixes: Vec<String>,
}

// Default value functions
fn default_output_dir() -> PathBuf {
    PathBuf::from("schemas")
}

fn default_manifest_name() -> String {
    "conduit.json".to_string()
}

fn default_skip_prefixes() -> Vec<String> {
    vec![
        "node_modules/".to_string(),
        "target/".to_string(),
        ".git/".to_string(),
        "dist/".to_string(),
    ]
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            manifest_name: default_manifest_name(),
            skip_prefixes: default_skip_prefixes(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output: OutputConfig::default(),
            discovery: DiscoveryConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // Load from default locations
        let config_locations = [
            "conduit-schemas.toml",
            ".conduit-schemas.toml",
            "config/conduit-schemas.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "conduit", "schemas") {
            let xdg_config = config_dir.config_dir().join("conduit-schemas.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        // Load from specified path
        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Load from environment variables (CONDUIT_SCHEMAS_*)
        builder = builder.add_source(
            Environment::with_prefix("CONDUIT_SCHEMAS")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Get the output directory (resolves relative paths)
    pub fn output_dir(&self) -> PathBuf {
        if self.output.dir.is_absolute() {
            self.output.dir.clone()
        } else {
            std::env::current_dir()
                .unwrap_or_default()
                .join(&self.output.dir)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.discovery.manifest_name, "conduit.json");
        assert!(config
            .discovery
            .skip_prefixes
            .iter()
            .any(|p| p == "node_modules/"));
        assert_eq!(config.output.dir, PathBuf::from("schemas"));
    }

    #[test]
    fn test_serialize_config() {
        let config = GeneratorConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[output]"));
        assert!(toml_str.contains("[discovery]"));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: GeneratorConfig = toml::from_str(
            r#"
            [output]
            dir = "out/schemas"
            "#,
        )
        .unwrap();
        assert_eq!(config.output.dir, PathBuf::from("out/schemas"));
        // Untouched sections keep their defaults.
        assert_eq!(config.discovery.manifest_name, "conduit.json");
    }
}
