//! Configuration module for Glossmap

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Backend service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the companion backend service
    #[serde(default)]
    pub endpoint: String,
    /// Request timeout in seconds (0 means unset)
    #[serde(default)]
    pub timeout_secs: u64,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for rendered article pages
    #[serde(default)]
    pub pages_dir: String,
    /// Directory for exported mindmap graphs
    #[serde(default)]
    pub maps_dir: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Backend settings
    #[serde(default)]
    pub backend: BackendConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override backend endpoint
    pub endpoint: Option<String>,
    /// Override backend request timeout in seconds
    pub timeout_secs: Option<u64>,
    /// Override pages output directory
    pub pages_dir: Option<String>,
    /// Override maps output directory
    pub maps_dir: Option<String>,
}

impl Config {
    /// Get the `$GLOSSMAP` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/glossmap`
    /// - macOS: `~/Library/Application Support/glossmap`
    /// - Windows: `%APPDATA%\glossmap`
    #[must_use]
    pub fn get_glossmap_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("glossmap")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// This method is used when loading configuration to ensure that newly added
    /// configuration fields are populated with their default values. Only fields
    /// that are empty in the current config and non-empty in defaults are updated.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        // Merge logging fields - only if they're empty (use defaults for empty values)
        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        // Merge backend fields - only add if default is non-empty
        if self.backend.endpoint.is_empty() && !defaults.backend.endpoint.is_empty() {
            self.backend.endpoint.clone_from(&defaults.backend.endpoint);
            changed = true;
        }
        if self.backend.timeout_secs == 0 && defaults.backend.timeout_secs != 0 {
            self.backend.timeout_secs = defaults.backend.timeout_secs;
            changed = true;
        }

        // Merge paths fields
        if self.paths.pages_dir.is_empty() && !defaults.paths.pages_dir.is_empty() {
            self.paths.pages_dir.clone_from(&defaults.paths.pages_dir);
            changed = true;
        }
        if self.paths.maps_dir.is_empty() && !defaults.paths.maps_dir.is_empty() {
            self.paths.maps_dir.clone_from(&defaults.paths.maps_dir);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// This allows command-line arguments to override configuration file values
    /// without modifying the persistent configuration file. Only non-`None` values
    /// in the overrides struct will replace config values.
    ///
    /// # Arguments
    ///
    /// * `overrides` - A `ConfigOverrides` struct with optional override values
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(endpoint) = &overrides.endpoint {
            self.backend.endpoint.clone_from(endpoint);
        }
        if let Some(timeout_secs) = overrides.timeout_secs {
            self.backend.timeout_secs = timeout_secs;
        }

        if let Some(pages_dir) = &overrides.pages_dir {
            self.paths.pages_dir.clone_from(pages_dir);
        }
        if let Some(maps_dir) = &overrides.maps_dir {
            self.paths.maps_dir.clone_from(maps_dir);
        }
    }

    /// Get the user config file path
    ///
    /// Returns the full path to the configuration file:
    /// - `config.toml` for release builds
    /// - `dconfig.toml` for debug builds (allows separate debug config)
    ///
    /// The file is located in the directory returned by [`get_glossmap_dir`].
    ///
    /// [`get_glossmap_dir`]: Self::get_glossmap_dir
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_glossmap_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$GLOSSMAP` variable in a string
    ///
    /// Replaces occurrences of `$GLOSSMAP` with the actual glossmap directory
    /// path, so configuration values can reference the config directory
    /// dynamically.
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains("$GLOSSMAP") {
            let glossmap_dir = Self::get_glossmap_dir();
            value.replace("$GLOSSMAP", glossmap_dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Parses a TOML configuration string and expands any `$GLOSSMAP` variables
    /// in the values. Missing fields use their serde defaults (typically empty
    /// strings or false).
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        // Expand variables in config values
        config.logging.file = Self::expand_variables(&config.logging.file);
        config.backend.endpoint = Self::expand_variables(&config.backend.endpoint);
        config.paths.pages_dir = Self::expand_variables(&config.paths.pages_dir);
        config.paths.maps_dir = Self::expand_variables(&config.paths.maps_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// The defaults differ between debug and release builds:
    /// - Debug: Uses `DefaultCLIConfigDebug.toml`
    /// - Release: Uses `DefaultCLIConfigRelease.toml`
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML or cannot be parsed.
    /// This should never happen in practice since the defaults are compiled into the binary.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// This is the primary way to load configuration. It handles several scenarios:
    /// - If config file exists: Loads from file, merges missing fields from defaults, saves updated config
    /// - If config file doesn't exist (first run): Creates config directory if needed, loads defaults, saves to file
    ///
    /// The merge behavior ensures that upgrading the application automatically adds new config
    /// fields while preserving existing user settings.
    ///
    /// # Returns
    /// A `Config` instance loaded from file or defaults. Falls back to defaults if any error occurs
    /// during loading.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    // Merge any missing fields from defaults
                    if config.merge_defaults(&defaults) {
                        // Save the updated config with new fields
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            // First run: create directory and config file from defaults

            // Create the directory if it doesn't exist
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }

            // Save the default config
            let _ = defaults.save();

            return defaults;
        }

        defaults
    }

    /// Save configuration to file
    ///
    /// Serializes the current configuration to TOML format and writes it to the
    /// platform-specific config file. The config directory will be created if it
    /// doesn't exist.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config cannot be serialized to TOML (shouldn't happen)
    /// - The config directory cannot be created
    /// - The file cannot be written (permissions, disk full, etc.)
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys:
    /// - `level`: Logging level ("debug", "info", "warn", "error")
    /// - `file`: Log file path
    /// - `verbose`: Verbose logging boolean
    /// - `endpoint`: Backend base URL
    /// - `timeout_secs`: Backend request timeout in seconds
    /// - `pages_dir`: Rendered pages output directory
    /// - `maps_dir`: Exported maps output directory
    ///
    /// # Returns
    /// - `Some(String)`: The configuration value as a string
    /// - `None`: If the key is not recognized
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "endpoint" => Some(self.backend.endpoint.clone()),
            "timeout_secs" | "timeout-secs" => Some(self.backend.timeout_secs.to_string()),
            "pages_dir" | "pages-dir" => Some(self.paths.pages_dir.clone()),
            "maps_dir" | "maps-dir" => Some(self.paths.maps_dir.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates a configuration value using a string key and value. The value will
    /// be validated and converted to the appropriate type.
    ///
    /// Note: This method updates the in-memory config. Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The key is not recognized
    /// - The value cannot be parsed (e.g., "maybe" for verbose boolean)
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "endpoint" => self.backend.endpoint = value.to_string(),
            "timeout_secs" | "timeout-secs" => {
                self.backend.timeout_secs = value
                    .parse::<u64>()
                    .map_err(|_| format!("Invalid number for 'timeout_secs': '{value}'"))?;
            }
            "pages_dir" | "pages-dir" => self.paths.pages_dir = value.to_string(),
            "maps_dir" | "maps-dir" => self.paths.maps_dir = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// Resets a single configuration value to its default value. The default is
    /// taken from the provided defaults config (typically from
    /// [`from_defaults()`](Config::from_defaults)).
    ///
    /// Note: This method updates the in-memory config. Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "endpoint" => self.backend.endpoint.clone_from(&defaults.backend.endpoint),
            "timeout_secs" | "timeout-secs" => {
                self.backend.timeout_secs = defaults.backend.timeout_secs;
            }
            "pages_dir" | "pages-dir" => {
                self.paths.pages_dir.clone_from(&defaults.paths.pages_dir);
            }
            "maps_dir" | "maps-dir" => self.paths.maps_dir.clone_from(&defaults.paths.maps_dir),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file, causing the next [`load()`](Config::load) call to
    /// recreate it from defaults. This is a destructive operation that removes all user
    /// customizations. The CLI requires confirmation before calling it.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted
    /// (permissions, file locked, etc.)
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[backend]")?;
        writeln!(f, "  endpoint = \"{}\"", self.backend.endpoint)?;
        writeln!(f, "  timeout_secs = {}", self.backend.timeout_secs)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  pages_dir = \"{}\"", self.paths.pages_dir)?;
        writeln!(f, "  maps_dir = \"{}\"", self.paths.maps_dir)?;

        Ok(())
    }
}
