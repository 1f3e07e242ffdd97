//! Tracing subscriber setup
//!
//! Logs go to stderr so `--json` output on stdout stays machine-readable.

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::FmtSubscriber;

/// Filter directive for a `-v` count
#[must_use]
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Build the filter: `RUST_LOG` first, then `-v`, then the config file level
#[must_use]
pub fn env_filter(verbosity: u8, configured: Option<&str>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = match (verbosity, configured) {
        (0, Some(level)) => level,
        (v, _) => level_for(v),
    };
    EnvFilter::builder().parse_lossy(level)
}

/// Install the global subscriber; a second call is a no-op
pub fn init(verbosity: u8, configured: Option<&str>) {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter(verbosity, configured))
        .with_writer(std::io::stderr)
        .with_target(verbosity > 1)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("Subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(1), "info");
        assert_eq!(level_for(2), "debug");
        assert_eq!(level_for(9), "trace");
    }
}
