//! Persisted launch settings
//!
//! Settings are merged from three layers: built-in defaults, the
//! `starthere.json` file in the current directory, and command line
//! arguments, with later layers winning per field. Only fields that differ
//! from the defaults are written back; a fully default configuration
//! removes the file so an uncustomized run leaves no residue.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

/// Name of the settings file, looked up in the invocation directory.
pub const SETTINGS_FILE: &str = "starthere.json";

/// Port tried first when none is configured.
pub const DEFAULT_PORT: u16 = 80;

/// How the browser window is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaunchMode {
    Default,
    Kiosk,
}

impl LaunchMode {
    /// Parse the user-facing mode names.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "default" => Some(LaunchMode::Default),
            "kiosk" => Some(LaunchMode::Kiosk),
            _ => None,
        }
    }
}

/// Resolved settings the program runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory to serve.
    pub path: PathBuf,
    /// First port tried when binding.
    pub port: u16,
    /// Browser executable; `None` opens the system default browser.
    pub browser: Option<String>,
    pub mode: LaunchMode,
}

/// On-disk form: every field optional, so the file records only what
/// differs from the defaults.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    browser: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<LaunchMode>,
}

impl StoredSettings {
    fn is_empty(&self) -> bool {
        self.path.is_none() && self.port.is_none() && self.browser.is_none() && self.mode.is_none()
    }
}

/// Read the settings for a run started in `dir`: the defaults, overlaid
/// with whatever the settings file there holds. A missing file is normal;
/// an unreadable one is logged and ignored.
pub fn load(dir: &Path) -> Settings {
    let mut settings = Settings {
        path: dir.to_path_buf(),
        port: DEFAULT_PORT,
        browser: None,
        mode: LaunchMode::Default,
    };

    let file = dir.join(SETTINGS_FILE);
    match fs::read_to_string(&file) {
        Ok(contents) => match serde_json::from_str::<StoredSettings>(&contents) {
            Ok(stored) => {
                if let Some(path) = stored.path {
                    settings.path = path;
                }
                if let Some(port) = stored.port {
                    settings.port = port;
                }
                if let Some(browser) = stored.browser {
                    settings.browser = Some(browser);
                }
                if let Some(mode) = stored.mode {
                    settings.mode = mode;
                }
            }
            Err(e) => warn!("Ignoring unreadable settings file '{}': {}", file.display(), e),
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!("Ignoring unreadable settings file '{}': {}", file.display(), e),
    }

    settings
}

/// Persist `settings` for the next run from `dir`: write the fields that
/// differ from the defaults, or remove the file when none do.
pub fn store(dir: &Path, settings: &Settings) -> io::Result<()> {
    let stored = StoredSettings {
        path: (settings.path != dir).then(|| settings.path.clone()),
        port: (settings.port != DEFAULT_PORT).then_some(settings.port),
        browser: settings.browser.clone(),
        mode: (settings.mode != LaunchMode::Default).then_some(settings.mode),
    };

    let file = dir.join(SETTINGS_FILE);
    if stored.is_empty() {
        match fs::remove_file(&file) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    } else {
        let json = serde_json::to_string_pretty(&stored)?;
        fs::write(&file, json)
    }
}
