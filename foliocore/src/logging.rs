//! Structured logging for every folioOS binary.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default directive when neither `RUST_LOG` nor a configured filter is set.
pub const DEFAULT_FILTER: &str = "folio=info";

/// Install the global subscriber. `RUST_LOG` wins over `filter`, which wins
/// over [`DEFAULT_FILTER`]. Calling this twice is harmless.
pub fn init_logging(filter: Option<&str>) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter.unwrap_or(DEFAULT_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let result = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(env_filter)
        .try_init();

    if result.is_err() {
        tracing::debug!(event = "core.logging.already_initialized");
    }
}

/// Route panics through the log before the default hook prints them.
pub fn install_panic_hook(app: &'static str) {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let msg = info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        let location = info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown location".to_string());
        tracing::error!(event = "core.panic", app, location = %location, message = %msg);
        default_hook(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_twice_does_not_panic() {
        init_logging(Some("folio=debug"));
        init_logging(None);
    }

    #[test]
    fn test_bad_filter_falls_back() {
        init_logging(Some("=[not a directive"));
    }
}
