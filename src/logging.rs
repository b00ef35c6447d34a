//! Logging setup, powered by tracing-subscriber

use tracing_subscriber::EnvFilter;

/// Third-party targets kept quiet unless `RUST_LOG` says otherwise
const NOISY_TARGETS: &[(&str, &str)] = &[("sqlparser", "warn"), ("globset", "warn")];

/// Build the filter: `RUST_LOG` when set, otherwise `info` (or `debug` when
/// verbose) with noisy crates held back.
fn build_env_filter(verbose: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let level = if verbose { "debug" } else { "info" };
    let mut directives = vec![level.to_string()];
    for (target, lvl) in NOISY_TARGETS {
        directives.push(format!("{}={}", target, lvl));
    }

    EnvFilter::try_new(directives.join(",")).unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install a stderr fmt subscriber. Calling it again is a no-op.
pub fn init_logging(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(verbose))
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init();
}
