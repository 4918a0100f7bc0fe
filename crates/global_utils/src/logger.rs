use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Keeps the non-blocking writer alive so buffered records flush on drop.
pub struct LoggerGuard {
    _writer_guard: WorkerGuard,
}

/// Installs the global subscriber. Repeated calls are no-ops, which lets
/// integration tests share one `LazyLock<LoggerGuard>`.
pub fn init_logger() -> LoggerGuard {
    let (writer, writer_guard) = tracing_appender::non_blocking(std::io::stderr());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .try_init();
    LoggerGuard { _writer_guard: writer_guard }
}
