//! Logging init for the binary: `RUST_LOG` if set, else the given directive.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_DIRECTIVE: &str = "social_downloader=info,social_downloader_lib=info";

/// Install a stderr fmt subscriber. Returns `false` if one was already set.
pub fn init_logging(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_noop() {
        init_logging(DEFAULT_DIRECTIVE);
        assert!(!init_logging("debug"));
    }
}
