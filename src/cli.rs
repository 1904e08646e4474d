//! Command line parsing
//!
//! Every option has a long, a short, and a DOS-style form, and a bare
//! argument naming an existing directory selects the document root without
//! any switch. The DOS forms and the bare directory both reach lexopt as
//! positional values and are dispatched here.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use lexopt::prelude::*;

use crate::settings::{LaunchMode, Settings};

pub const USAGE: &str = "\
Starts a basic, static HTTP server. Useful for developing and testing web
sites locally. DO NOT RUN IN PRODUCTION!

starthere [--help|/?] [(--port|-p|/P) PORT] [(--browser|-b|/B) BROWSER]
          [(--mode|-m|/M) MODE] [--kiosk|-k|/K] [[--directory|-d|/D] DIR]

    --help        This help text. /? is an alias.

    --port        Port to listen on; when it is taken, the next free port
                  above it is used instead. Defaults to 80. -p and /P are
                  aliases.

    --browser     Path to a browser executable used to open the served URL.
                  Defaults to the system default browser. -b and /B are
                  aliases.

    --mode        'kiosk' opens Chrome-family browsers full screen;
                  'default' opens a normal window. -m and /M are aliases.
    --kiosk       Alias for '--mode kiosk', as are -k and /K.

    --directory   Directory to serve. A bare trailing argument naming an
                  existing directory works too. Defaults to the current
                  directory. -d and /D are aliases.

Settings that differ from the defaults are written to 'starthere.json' in
the current directory and reused on the next start; an all-default
configuration removes the file again.";

/// Command line overrides, applied on top of the settings file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub port: Option<u16>,
    pub path: Option<PathBuf>,
    pub browser: Option<String>,
    pub mode: Option<LaunchMode>,
    pub help: bool,
}

impl CliArgs {
    /// Overlay these arguments on settings loaded from disk.
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(port) = self.port {
            settings.port = port;
        }
        if let Some(path) = &self.path {
            settings.path = path.clone();
        }
        if let Some(browser) = &self.browser {
            settings.browser = Some(browser.clone());
        }
        if let Some(mode) = self.mode {
            settings.mode = mode;
        }
    }
}

/// Parse command line arguments (without the binary name).
pub fn parse<I>(args: I) -> Result<CliArgs, lexopt::Error>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    let mut parsed = CliArgs::default();
    let mut parser = lexopt::Parser::from_args(args);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('p') | Long("port") => {
                parsed.port = Some(parser.value()?.parse()?);
            }
            Short('d') | Long("directory") => {
                parsed.path = Some(PathBuf::from(parser.value()?));
            }
            Short('b') | Long("browser") => {
                parsed.browser = Some(parser.value()?.string()?);
            }
            Short('m') | Long("mode") => {
                parsed.mode = Some(parse_mode(&parser.value()?.string()?)?);
            }
            Short('k') | Long("kiosk") => {
                parsed.mode = Some(LaunchMode::Kiosk);
            }
            Long("help") => {
                parsed.help = true;
            }
            Value(value) => {
                let text = value.string()?;
                match text.as_str() {
                    "/P" => parsed.port = Some(parser.value()?.parse()?),
                    "/D" => parsed.path = Some(PathBuf::from(parser.value()?)),
                    "/B" => parsed.browser = Some(parser.value()?.string()?),
                    "/M" => parsed.mode = Some(parse_mode(&parser.value()?.string()?)?),
                    "/K" => parsed.mode = Some(LaunchMode::Kiosk),
                    "/?" => parsed.help = true,
                    _ if Path::new(&text).is_dir() => parsed.path = Some(PathBuf::from(text)),
                    _ => {
                        return Err(lexopt::Error::Custom(
                            format!("unexpected argument '{}' (not an existing directory)", text)
                                .into(),
                        ))
                    }
                }
            }
            _ => return Err(arg.unexpected()),
        }
    }

    Ok(parsed)
}

fn parse_mode(text: &str) -> Result<LaunchMode, lexopt::Error> {
    LaunchMode::parse(text).ok_or_else(|| {
        lexopt::Error::Custom(
            format!("unknown mode '{}', expected 'default' or 'kiosk'", text).into(),
        )
    })
}
