//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.
//!
//! Only the collaborators around the core are configurable. The display
//! gradient, glyph font and grid size are compile-time constants.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use crate::error::{Result, RevMatrixError};
use crate::pcars2::protocol::PCARS2_UDP_PORT;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,

    #[serde(default)]
    pub matrix: MatrixConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// UDP listener configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ListenConfig {
    #[serde(default = "default_listen_address")]
    pub address: String,
}

/// Which sink receives rendered frames
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Serial-attached LED matrix board
    Serial,
    /// Discard frames (dry run)
    Null,
}

/// LED matrix configuration
#[derive(Debug, Deserialize, Clone)]
pub struct MatrixConfig {
    #[serde(default = "default_sink")]
    pub sink: SinkKind,

    /// Serial device; empty auto-detects
    #[serde(default)]
    pub port: String,

    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,

    #[serde(default = "default_brightness")]
    pub brightness: f32,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for daily rolling log files; empty logs to stdout only
    #[serde(default)]
    pub log_dir: String,
}

// Default value functions
fn default_listen_address() -> String { format!("0.0.0.0:{}", PCARS2_UDP_PORT) }

fn default_sink() -> SinkKind { SinkKind::Serial }
fn default_baud_rate() -> u32 { 115200 }
fn default_brightness() -> f32 { 0.75 }

fn default_log_level() -> String { "info".to_string() }

impl Default for ListenConfig {
    fn default() -> Self {
        Self { address: default_listen_address() }
    }
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            sink: default_sink(),
            port: String::new(),
            baud_rate: default_baud_rate(),
            brightness: default_brightness(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_dir: String::new(),
        }
    }
}

const SUPPORTED_BAUD_RATES: [u32; 6] = [9600, 57600, 115200, 230400, 460800, 921600];

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Missing sections and keys fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use rev_matrix::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Parsed UDP listen address
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.address.parse().map_err(|_| {
            invalid(format!("listen address '{}' is not a valid socket address", self.listen.address))
        })
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;

        if !(0.0..=1.0).contains(&self.matrix.brightness) {
            return Err(invalid("brightness must be between 0.0 and 1.0"));
        }

        if self.matrix.sink == SinkKind::Serial
            && !SUPPORTED_BAUD_RATES.contains(&self.matrix.baud_rate)
        {
            return Err(invalid(format!(
                "baud_rate must be one of: {:?}",
                SUPPORTED_BAUD_RATES
            )));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(invalid(format!(
                "log level must be one of: {}",
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}

fn invalid(msg: impl std::fmt::Display) -> RevMatrixError {
    RevMatrixError::Config(toml::de::Error::custom(msg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.listen.address, "0.0.0.0:5606");
        assert_eq!(config.matrix.sink, SinkKind::Serial);
        assert!(config.matrix.port.is_empty());
        assert_eq!(config.matrix.baud_rate, 115200);
        assert_eq!(config.matrix.brightness, 0.75);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.listen_addr().unwrap().port(), PCARS2_UDP_PORT);
    }

    #[test]
    fn test_full_toml() {
        let config = Config::from_toml(
            r#"
[listen]
address = "127.0.0.1:5607"

[matrix]
sink = "null"
port = "/dev/ttyUSB1"
baud_rate = 9600
brightness = 0.3

[logging]
level = "debug"
log_dir = "/tmp/rev-matrix"
"#,
        )
        .unwrap();

        assert_eq!(config.listen_addr().unwrap(), "127.0.0.1:5607".parse().unwrap());
        assert_eq!(config.matrix.sink, SinkKind::Null);
        assert_eq!(config.matrix.port, "/dev/ttyUSB1");
        assert_eq!(config.matrix.baud_rate, 9600);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.log_dir, "/tmp/rev-matrix");
    }

    #[test]
    fn test_invalid_listen_address() {
        let result = Config::from_toml("[listen]\naddress = \"not-an-address\"\n");
        assert!(matches!(result, Err(RevMatrixError::Config(_))));
    }

    #[test]
    fn test_invalid_brightness() {
        let mut config = Config::default();
        config.matrix.brightness = 1.5;
        assert!(config.validate().is_err());

        config.matrix.brightness = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_baud_rate() {
        let mut config = Config::default();
        config.matrix.baud_rate = 12345;
        assert!(config.validate().is_err());

        // Baud rate is irrelevant without a serial sink
        config.matrix.sink = SinkKind::Null;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_sink_rejected() {
        let result = Config::from_toml("[matrix]\nsink = \"hdmi\"\n");
        assert!(matches!(result, Err(RevMatrixError::Config(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let toml_content = r#"
[matrix]
sink = "null"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config.matrix.sink, SinkKind::Null);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("/nonexistent/rev-matrix.toml");
        assert!(matches!(result, Err(RevMatrixError::Io(_))));
    }
}
