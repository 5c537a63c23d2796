// 📝 Logging - tracing subscriber for the batch driver
//
// Events go to stderr; RUST_LOG overrides the default filter.
// Library code only emits events, the binary installs the subscriber.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "smart_sales_etl=info";

/// Filter from RUST_LOG, or `smart_sales_etl=info` when unset/invalid
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global fmt subscriber. A second call is a no-op.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging();
        init_logging();
        tracing::info!("logging initialized");
    }

    #[test]
    fn test_default_filter_parses() {
        let filter = EnvFilter::new(DEFAULT_FILTER);
        assert!(filter.to_string().contains("smart_sales_etl"));
    }
}
