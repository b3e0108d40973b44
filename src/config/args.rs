// Command-line overrides
//
// Values are taken as raw strings and converted one by one, so a single bad
// value only drops that setting instead of the whole command line. Options
// clap does not know are filtered out before parsing, and a repeated option
// keeps its last value.

use super::{lenient, parse_number, Config, Pacing};
use crate::display::parse_color;
use crate::input::Key;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "yac8")]
#[command(version, about = "YAC8 CHIP-8 emulator")]
#[command(args_override_self = true)]
pub struct Cli {
    /// TOML file with configuration overrides
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logical width in CHIP-8 pixels
    #[arg(long)]
    pub width: Option<String>,

    /// Logical height in CHIP-8 pixels
    #[arg(long)]
    pub height: Option<String>,

    /// Window pixels per CHIP-8 pixel
    #[arg(long)]
    pub scale: Option<String>,

    /// Foreground color (#RRGGBBAA)
    #[arg(long)]
    pub fg: Option<String>,

    /// Background color (#RRGGBBAA)
    #[arg(long)]
    pub bg: Option<String>,

    /// Ticks per second
    #[arg(long)]
    pub tick_rate: Option<String>,

    /// fixed-delay or compensated
    #[arg(long)]
    pub pacing: Option<String>,

    /// Key that toggles pause (e.g. P, Space)
    #[arg(long)]
    pub pause_key: Option<String>,

    /// Anything else is accepted and ignored
    #[arg(hide = true)]
    pub rest: Vec<String>,
}

impl Cli {
    /// Parse arguments, falling back to no overrides if they cannot be parsed
    ///
    /// `--help` and `--version` print and exit like any other CLI.
    pub fn parse_lenient<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Self::try_parse_from(known_tokens(args)) {
            Ok(cli) => {
                if !cli.rest.is_empty() {
                    log::debug!("Ignoring arguments: {:?}", cli.rest);
                }
                cli
            }
            Err(err) => match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
                _ => {
                    log::warn!("Ignoring command line, using defaults: {}", err);
                    Self::default()
                }
            },
        }
    }

    /// Apply the flag overrides on top of `config`
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(width) = flag("width", self.width.as_deref(), parse_number) {
            config = config.with_size(width, config.window_height);
        }
        if let Some(height) = flag("height", self.height.as_deref(), parse_number) {
            config = config.with_size(config.window_width, height);
        }
        if let Some(scale) = flag("scale", self.scale.as_deref(), parse_number) {
            config = config.with_scale(scale);
        }
        if let Some(fg) = flag("fg", self.fg.as_deref(), parse_color) {
            config = config.with_fg_color(fg);
        }
        if let Some(bg) = flag("bg", self.bg.as_deref(), parse_color) {
            config = config.with_bg_color(bg);
        }
        if let Some(rate) = flag("tick-rate", self.tick_rate.as_deref(), parse_number) {
            config = config.with_tick_rate(rate);
        }
        if let Some(pacing) = flag("pacing", self.pacing.as_deref(), |s| s.parse::<Pacing>()) {
            config = config.with_pacing(pacing);
        }
        if let Some(key) = flag("pause-key", self.pause_key.as_deref(), |s| s.parse::<Key>()) {
            config = config.with_pause_key(Some(key));
        }
        config
    }
}

/// Drop every token clap would reject, keeping the rest in order
///
/// Valued options are rewritten as `--name=value` so a value starting with
/// `-` is never mistaken for an option. An option missing its value is
/// dropped on its own.
fn known_tokens<I, T>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let command = Cli::command();
    let mut args = args.into_iter().map(Into::into).peekable();
    let mut kept: Vec<String> = args
        .next()
        .map(|name| name.to_string_lossy().into_owned())
        .into_iter()
        .collect();

    while let Some(raw) = args.next() {
        let Some(token) = raw.to_str() else {
            log::warn!("Ignoring non UTF-8 argument {:?}", raw);
            continue;
        };

        if token == "--" {
            kept.push(token.to_string());
            kept.extend(args.by_ref().filter_map(|rest| rest.into_string().ok()));
            break;
        }

        if let Some(option) = token.strip_prefix("--") {
            let (name, inline_value) = match option.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (option, None),
            };

            if name == "help" || name == "version" {
                kept.push(token.to_string());
                continue;
            }

            let Some(arg) = command
                .get_arguments()
                .find(|arg| arg.get_long() == Some(name))
            else {
                log::warn!("Ignoring unknown option {}", token);
                continue;
            };

            if !arg.get_action().takes_values() {
                kept.push(token.to_string());
                continue;
            }

            let value = match inline_value {
                Some(value) => Some(value.to_string()),
                None => args
                    .next_if(|next| next.to_str().is_some_and(|v| !v.starts_with("--")))
                    .map(|next| next.to_string_lossy().into_owned()),
            };
            match value {
                Some(value) => kept.push(format!("--{}={}", name, value)),
                None => log::warn!("Ignoring option {} without a value", token),
            }
            continue;
        }

        if token.len() > 1 && token.starts_with('-') {
            if token == "-h" || token == "-V" {
                kept.push(token.to_string());
            } else {
                log::warn!("Ignoring unknown option {}", token);
            }
            continue;
        }

        kept.push(token.to_string());
    }

    kept
}

fn flag<T>(
    name: &str,
    raw: Option<&str>,
    parse: impl FnOnce(&str) -> Result<T, String>,
) -> Option<T> {
    lenient("command-line", name, raw?, parse)
}
