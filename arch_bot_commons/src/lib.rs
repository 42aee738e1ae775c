//! This create houses common for me functions, because some things
//! are just boilerplate and aaAAAAAAAAA

use std::{ffi::OsString, future::Future};

pub mod useful_methods;

/// Load `.env`, initialize logging and start the `closure` in an async runtime.
///
/// Variables from a `.env` file in the working directory are loaded first, if
/// the file exists, so that it can set `RUST_LOG` and anything the bot reads
/// later. Variables already set in the real environment win.
///
/// Logging is configured with `default_log_filter` (like `"info"` or
/// `"WARN,my_bot=info"`) unless overridden by environment variable `RUST_LOG`,
/// which may come from `.env` too. This uses the crate [pretty_env_logger][]
/// internally, see its documentation for more details.
///
/// [pretty_env_logger]: https://docs.rs/pretty_env_logger
///
/// # Panics
///
/// Panics if the tokio runtime can't be built.
pub fn start_everything(default_log_filter: &str, closure: impl Future<Output = ()>) {
    // Missing `.env` is the common case, not worth complaining about yet.
    let dotenv_result = dotenvy::dotenv();

    let log_level = log_filter(std::env::var_os("RUST_LOG"), default_log_filter);

    let running_as_systemd_service = std::env::var_os("JOURNAL_STREAM").is_some();

    let mut builder = match running_as_systemd_service {
        true => pretty_env_logger::formatted_builder(),
        false => pretty_env_logger::formatted_timed_builder(),
    };

    builder.parse_filters(&log_level);

    if builder.try_init().is_err() {
        log::error!("Tried to init logger twice!");
    }

    match dotenv_result {
        Ok(path) => log::info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => log::debug!("No .env file, using the environment as is."),
        Err(e) => log::warn!("Failed to load .env file: {e}"),
    }

    log::info!("hi");

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to build the tokio runtime!")
        .block_on(closure);
}

/// `RUST_LOG` if it's set to something usable, `default` otherwise.
fn log_filter(rust_log: Option<OsString>, default: &str) -> String {
    rust_log
        .and_then(|value| value.into_string().ok())
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_owned())
}
