use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt, prelude::*};

/// Installs the stdout subscriber. Keep the returned guard alive for as long
/// as logs should be flushed.
pub fn logging_stdout() -> impl Drop {
    let (nonblocking, guard) = tracing_appender::non_blocking(std::io::stdout());

    let default_level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(nonblocking)
                .with_target(false)
                .with_file(cfg!(debug_assertions))
                .with_line_number(cfg!(debug_assertions)),
        )
        .with(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy()
                // reqwest's connection pool is noisy at debug level
                .add_directive("hyper_util=info".parse().unwrap_or(default_level.into())),
        )
        .init();

    guard
}
