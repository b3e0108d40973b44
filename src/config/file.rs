// Configuration file
//
// Optional TOML file whose keys mirror the `Config` fields. Every key is
// optional; colors and keys are written as strings.
//
// ```toml
// scale_factor = 10
// bg_color = "#000000FF"
// pacing = "compensated"
// pause_key = "P"
// ```

use super::{lenient, Config, Pacing};
use crate::display::parse_color;
use crate::input::Key;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

/// Errors that can occur while reading a configuration file
#[derive(Debug)]
pub enum ConfigFileError {
    /// I/O error
    Io(io::Error),

    /// TOML syntax or type error
    Parse(toml::de::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigFileError::Io(e) => write!(f, "I/O error: {}", e),
            ConfigFileError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigFileError {}

impl From<io::Error> for ConfigFileError {
    fn from(e: io::Error) -> Self {
        ConfigFileError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigFileError {
    fn from(e: toml::de::Error) -> Self {
        ConfigFileError::Parse(e)
    }
}

/// Overrides read from a TOML file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub window_width: Option<u32>,
    pub window_height: Option<u32>,
    pub scale_factor: Option<u32>,
    pub fg_color: Option<String>,
    pub bg_color: Option<String>,
    pub tick_rate: Option<u32>,
    pub pacing: Option<Pacing>,
    pub pause_key: Option<String>,
}

impl ConfigFile {
    /// Read and parse a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigFileError> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration file contents
    pub fn parse(contents: &str) -> Result<Self, ConfigFileError> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply the overrides present in the file on top of `config`
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(width) = self.window_width {
            config = config.with_size(width, config.window_height);
        }
        if let Some(height) = self.window_height {
            config = config.with_size(config.window_width, height);
        }
        if let Some(scale) = self.scale_factor {
            config = config.with_scale(scale);
        }
        if let Some(fg) = setting("fg_color", &self.fg_color, parse_color) {
            config = config.with_fg_color(fg);
        }
        if let Some(bg) = setting("bg_color", &self.bg_color, parse_color) {
            config = config.with_bg_color(bg);
        }
        if let Some(rate) = self.tick_rate {
            config = config.with_tick_rate(rate);
        }
        if let Some(pacing) = self.pacing {
            config = config.with_pacing(pacing);
        }
        if let Some(key) = setting("pause_key", &self.pause_key, |s| s.parse::<Key>()) {
            config = config.with_pause_key(Some(key));
        }
        config
    }
}

fn setting<T>(
    name: &str,
    raw: &Option<String>,
    parse: impl FnOnce(&str) -> Result<T, String>,
) -> Option<T> {
    lenient("config file", name, raw.as_deref()?, parse)
}
