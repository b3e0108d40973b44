// Configuration management
//
// Resolves display geometry, colors and pacing from built-in defaults, an
// optional TOML file and command-line overrides. Resolution never fails:
// anything malformed is logged and skipped.

mod args;
mod file;

pub use args::Cli;
pub use file::{ConfigFile, ConfigFileError};

use crate::display::Rgba;
use crate::input::{Key, KeyBindings};
use serde::Deserialize;
use std::ffi::OsString;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// CHIP-8 native X resolution
pub const DEFAULT_WINDOW_WIDTH: u32 = 64;
/// CHIP-8 native Y resolution
pub const DEFAULT_WINDOW_HEIGHT: u32 = 32;
/// Default window is 1280x640
pub const DEFAULT_SCALE_FACTOR: u32 = 20;
/// Largest accepted scale factor
pub const MAX_SCALE_FACTOR: u32 = 40;
/// White
pub const DEFAULT_FG_COLOR: u32 = 0xFFFFFFFF;
/// Yellow
pub const DEFAULT_BG_COLOR: u32 = 0xFFFF00FF;
/// Ticks per second
pub const DEFAULT_TICK_RATE: u32 = 60;

/// How the main loop waits between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pacing {
    /// Sleep a flat `1000 / tick_rate` ms every tick, ignoring work time
    #[default]
    FixedDelay,
    /// Sleep whatever is left of the tick period after the tick's work
    Compensated,
}

impl FromStr for Pacing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed-delay" | "fixed" => Ok(Pacing::FixedDelay),
            "compensated" => Ok(Pacing::Compensated),
            _ => Err(format!("Unknown pacing mode: {}", s)),
        }
    }
}

impl fmt::Display for Pacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pacing::FixedDelay => write!(f, "fixed-delay"),
            Pacing::Compensated => write!(f, "compensated"),
        }
    }
}

/// Emulator configuration
///
/// Built once at startup and read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Logical width in CHIP-8 pixels
    pub window_width: u32,
    /// Logical height in CHIP-8 pixels
    pub window_height: u32,
    /// Multiplier from logical to window pixels
    pub scale_factor: u32,
    /// Foreground color, RGBA8888
    pub fg_color: u32,
    /// Background color, RGBA8888
    pub bg_color: u32,
    /// Target ticks per second
    pub tick_rate: u32,
    pub pacing: Pacing,
    /// Key toggling pause, unbound by default
    pub pause_key: Option<Key>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            scale_factor: DEFAULT_SCALE_FACTOR,
            fg_color: DEFAULT_FG_COLOR,
            bg_color: DEFAULT_BG_COLOR,
            tick_rate: DEFAULT_TICK_RATE,
            pacing: Pacing::FixedDelay,
            pause_key: None,
        }
    }
}

impl Config {
    /// Configuration with all defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the configuration from a raw argument vector
    ///
    /// The first element is the program name. Defaults are overridden by the
    /// file named with `--config`, then by individual flags. Unknown or
    /// malformed input is logged and ignored.
    pub fn from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cli = Cli::parse_lenient(args);
        let mut config = Self::default();

        if let Some(path) = &cli.config {
            match ConfigFile::load(path) {
                Ok(file) => config = file.apply(config),
                Err(err) => log::warn!("Ignoring config file {}: {}", path.display(), err),
            }
        }

        config = cli.apply(config);
        log::debug!("Resolved configuration: {:?}", config);
        config
    }

    /// Set the logical resolution (each dimension at least 1)
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width.max(1);
        self.window_height = height.max(1);
        self
    }

    /// Set the scale factor
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale_factor = scale.clamp(1, MAX_SCALE_FACTOR);
        self
    }

    pub fn with_fg_color(mut self, color: u32) -> Self {
        self.fg_color = color;
        self
    }

    pub fn with_bg_color(mut self, color: u32) -> Self {
        self.bg_color = color;
        self
    }

    /// Set the target tick rate
    pub fn with_tick_rate(mut self, rate: u32) -> Self {
        self.tick_rate = rate.max(1);
        self
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_pause_key(mut self, key: Option<Key>) -> Self {
        self.pause_key = key;
        self
    }

    /// Window size in screen pixels
    pub fn physical_size(&self) -> (u32, u32) {
        (
            self.window_width.saturating_mul(self.scale_factor),
            self.window_height.saturating_mul(self.scale_factor),
        )
    }

    pub fn bg_rgba(&self) -> Rgba {
        Rgba::from_packed(self.bg_color)
    }

    /// Length of one tick period at the target rate
    pub fn frame_duration(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.tick_rate.max(1) as u64)
    }

    /// Flat per-tick delay used by `Pacing::FixedDelay` (16 ms at 60 Hz)
    pub fn fixed_delay(&self) -> Duration {
        Duration::from_millis(1000 / self.tick_rate.max(1) as u64)
    }

    pub fn key_bindings(&self) -> KeyBindings {
        KeyBindings {
            pause: self.pause_key,
            ..KeyBindings::default()
        }
    }
}

/// Parse one override, logging and dropping it on failure
fn lenient<T>(
    origin: &str,
    name: &str,
    raw: &str,
    parse: impl FnOnce(&str) -> Result<T, String>,
) -> Option<T> {
    match parse(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("Ignoring {} setting {} = {:?}: {}", origin, name, raw, err);
            None
        }
    }
}

fn parse_number(raw: &str) -> Result<u32, String> {
    raw.trim().parse::<u32>().map_err(|e| e.to_string())
}
