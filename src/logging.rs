use env_logger::{Builder, Env, Target};
use std::path::Path;
use thiserror::Error;

/// Install a logger that appends records to the file at `path`.
///
/// The filter is taken from `RUST_LOG`, defaulting to `info`.  Records are
/// never written to the terminal, as that would corrupt the game display.
pub(crate) fn init(path: &Path) -> Result<(), LogError> {
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(LogError::Open)?;
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()?;
    Ok(())
}

#[derive(Debug, Error)]
pub(crate) enum LogError {
    #[error("failed to open log file")]
    Open(#[source] std::io::Error),
    #[error("failed to install logger")]
    Install(#[from] log::SetLoggerError),
}
