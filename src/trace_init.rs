//! Tracing bootstrap for diagnostics builds. Without the `trace` feature the
//! entry point compiles to a no-op, so callers need no feature checks.

#[cfg(feature = "trace")]
mod enabled {
    use std::path::Path;
    use std::sync::OnceLock;

    use tracing_appender::non_blocking::WorkerGuard;
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    // Holding the guard here keeps the background writer alive for the
    // whole process.
    static GUARD: OnceLock<WorkerGuard> = OnceLock::new();

    /// Routes `sanifu_engine=debug` spans to a JSONL file under `log_dir`.
    /// `RUST_LOG` overrides the default filter. Repeat calls do nothing.
    pub fn init_tracing(log_dir: &Path) {
        GUARD.get_or_init(|| {
            let appender = tracing_appender::rolling::never(log_dir, "sanifu-trace.jsonl");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sanifu_engine=debug"));
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_span_events(FmtSpan::CLOSE)
                .with_target(true)
                .init();
            guard
        });
    }
}

#[cfg(feature = "trace")]
pub use enabled::init_tracing;

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: &std::path::Path) {}
