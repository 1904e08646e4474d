//! starthere - a static HTTP server for local web development
//!
//! Serves a directory over plain HTTP, walks up from the requested port when
//! it is taken, opens a browser once the listener is bound, and remembers
//! non-default settings in 'starthere.json' for the next start.

use std::env;
use std::path::Path;
use std::process::ExitCode;

use log::{error, info, warn};

use starthere::settings::{self, Settings};
use starthere::{browser, cli, logger};
use starthere::{ServerConfig, StaticFileServer};

#[tokio::main]
async fn main() -> ExitCode {
    logger::init();

    let args = match cli::parse(env::args_os().skip(1)) {
        Ok(args) => args,
        Err(error) => {
            eprintln!("{}", error);
            eprintln!("Try 'starthere --help' for usage.");
            return ExitCode::from(2);
        }
    };

    if args.help {
        println!("{}", cli::USAGE);
        return ExitCode::SUCCESS;
    }

    let current_dir = match env::current_dir() {
        Ok(dir) => dir,
        Err(error) => {
            eprintln!("Failed to determine the current directory: {}", error);
            return ExitCode::from(2);
        }
    };

    let mut settings = settings::load(&current_dir);
    args.apply_to(&mut settings);

    if let Err(message) = validate(&settings) {
        eprintln!("{}", message);
        return ExitCode::from(2);
    }

    if let Err(error) = settings::store(&current_dir, &settings) {
        warn!("Failed to save settings: {}", error);
    }

    // Resolved once here so every request joins against a stable, absolute root.
    let root = match settings.path.canonicalize() {
        Ok(root) => root,
        Err(error) => {
            eprintln!(
                "No directory from which to serve found at {}: {}",
                settings.path.display(),
                error
            );
            return ExitCode::from(2);
        }
    };

    info!("Serving path '{}'", root.display());

    let launch_settings = settings.clone();
    let server = StaticFileServer::new(ServerConfig {
        root,
        port: settings.port,
    })
    .on_ready(move |port| browser::launch(&launch_settings, port));

    let handle = match server.start().await {
        Ok(handle) => handle,
        Err(error) => {
            eprintln!("{}", error);
            return ExitCode::FAILURE;
        }
    };

    info!("Running. Hit CTRL+C to exit.");
    shutdown_signal().await;

    handle.stop();
    handle.wait().await;

    info!("Goodbye!");
    ExitCode::SUCCESS
}

fn validate(settings: &Settings) -> Result<(), String> {
    if settings.port == 0 {
        return Err(format!(
            "Invalid port {}, expected an integer like 80, 81, 8080, 8383",
            settings.port
        ));
    }
    if !settings.path.is_dir() {
        return Err(format!(
            "No directory from which to serve found at {}",
            settings.path.display()
        ));
    }
    if let Some(browser) = &settings.browser {
        if !Path::new(browser).is_file() {
            return Err(format!("No file found for browser at path {}", browser));
        }
    }
    Ok(())
}

/// Completes when the process is asked to stop, via Ctrl+C anywhere or
/// SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            error!("Failed to install the Ctrl+C handler: {}", error);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(error) => {
                error!("Failed to install the SIGTERM handler: {}", error);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
