use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use werewolf_backend::AppError;

const DEFAULT_FILTER: &str = "info,actix_web=info,actix_server=warn";

/// Installs the JSON log subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() -> Result<(), AppError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(false)
        .json();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| AppError::config(format!("Failed to install tracing subscriber: {e}")))
}
