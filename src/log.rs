use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global subscriber. `RUST_LOG` wins over `verbose` when set.
pub fn init_logging(verbose: bool) {
    let env = std::env::var("RUST_LOG").ok();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_target(false),
        )
        .with(log_filter(verbose, env.as_deref()))
        .init();
}

/// Dependencies stay at `warn`; the crate's own level follows `verbose`.
fn log_filter(verbose: bool, env: Option<&str>) -> EnvFilter {
    let level = if verbose { "debug" } else { "warn" };
    env.and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(format!("warn,finboard={level}")))
}
