use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::kernel::services::adapters;
use crate::kernel::services::ports::LoggingSettings;

const LOG_FILE_PREFIX: &str = "skill-workbench.log";

/// Keeps the background log writer alive; drop it to flush and stop.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    log_dir: PathBuf,
}

impl LoggingGuard {
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

/// Installs the global subscriber: a daily rolling file in `log_dir`, filtered by
/// `RUST_LOG` or else `default_filter`.
///
/// Returns `None` when the directory cannot be created or a global subscriber
/// is already installed.
pub fn init(log_dir: &Path, default_filter: &str) -> Option<LoggingGuard> {
    std::fs::create_dir_all(log_dir).ok()?;

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true),
    );

    if subscriber.try_init().is_err() {
        return None;
    }

    tracing::info!(log_dir = %log_dir.display(), "tracing initialized");

    Some(LoggingGuard {
        _guard: guard,
        log_dir: log_dir.to_path_buf(),
    })
}

pub fn init_with_settings(log_dir: &Path, settings: &LoggingSettings) -> Option<LoggingGuard> {
    init(log_dir, &settings.filter)
}

/// Routes panics into the log. Only hosts that own the process should call this.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        tracing::error!(panic = %panic_info, "panic");
    }));
}

/// Host entry point: the default log directory (falling back to the temp dir),
/// the filter from the settings file, and the panic hook.
pub fn init_default() -> Option<LoggingGuard> {
    let log_dir = adapters::ensure_log_dir()
        .unwrap_or_else(|_| std::env::temp_dir().join("skill-workbench").join("logs"));
    let settings = adapters::load_default_settings();
    let guard = init_with_settings(&log_dir, &settings.logging)?;
    install_panic_hook();
    Some(guard)
}
