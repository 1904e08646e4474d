//! Opening the served site in a browser
//!
//! Runs once the listener is bound, with the port the bind actually landed
//! on. A launch failure is logged and otherwise ignored; the server keeps
//! running either way.

use std::process::Command;

use log::{info, warn};

use crate::settings::{LaunchMode, Settings};

/// The URL the server is reachable at from the local machine.
///
/// # Arguments
///
/// * `port` - The port the listener is bound to
///
/// # Returns
///
/// * `String` - "http://localhost/" with the port appended unless it is 80
pub fn local_url(port: u16) -> String {
    if port == 80 {
        "http://localhost/".to_string()
    } else {
        format!("http://localhost:{}/", port)
    }
}

/// Open the served site, either in the system default browser or in the
/// executable configured in the settings.
pub fn launch(settings: &Settings, port: u16) {
    let url = local_url(port);

    match &settings.browser {
        None => {
            info!("Starting the default browser at '{}'", url);
            if let Err(error) = open::that(&url) {
                warn!("Failed to start the default browser: {}", error);
            }
        }
        Some(browser) => {
            info!("Starting browser '{}' at '{}'", browser, url);
            let mut command = Command::new(browser);
            if settings.mode == LaunchMode::Kiosk && supports_kiosk(browser) {
                command.arg("--kiosk");
            }
            command.arg(&url);
            if let Err(error) = command.spawn() {
                warn!("Failed to start browser '{}': {}", browser, error);
            }
        }
    }
}

// Only the Chrome family takes --kiosk; other browsers are started plain.
fn supports_kiosk(browser: &str) -> bool {
    let lowered = browser.to_ascii_lowercase();
    lowered.contains("chrome") || lowered.contains("chromium")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_url_omits_default_port() {
        assert_eq!(local_url(80), "http://localhost/");
    }

    #[test]
    fn test_local_url_includes_other_ports() {
        assert_eq!(local_url(8080), "http://localhost:8080/");
    }

    #[test]
    fn test_kiosk_support_is_chrome_only() {
        assert!(supports_kiosk("/usr/bin/google-chrome"));
        assert!(supports_kiosk("C:\\Apps\\Chromium\\chromium.exe"));
        assert!(!supports_kiosk("/usr/bin/firefox"));
    }
}
