use std::{fs::File, path::Path, sync::Mutex};

use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{PacerTuiError, PacerTuiResult};

/// Routes `tracing` output to `log_file`; the terminal belongs to the UI.
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init(log_file: &Path) -> PacerTuiResult<()> {
    let file = File::create(log_file)?;
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_thread_names(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| PacerTuiError::Logging(e.to_string()))
}
