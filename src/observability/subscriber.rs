use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Errors that can occur while installing the global subscriber.
#[derive(Debug, thiserror::Error)]
pub enum SubscriberError {
    #[error("Invalid filter directive: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("Failed to init subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Install a console subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `default_filter` is used
/// (e.g. `"nexus_plugins=debug"`).
pub fn init_tracing_subscriber(default_filter: &str) -> Result<(), SubscriberError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => parse_filter(default_filter)?,
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;
    Ok(())
}

fn parse_filter(directives: &str) -> Result<EnvFilter, SubscriberError> {
    Ok(EnvFilter::try_new(directives)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_rejected() {
        let err = parse_filter("nexus_plugins=loud").unwrap_err();
        assert!(matches!(err, SubscriberError::Filter(_)));
    }

    #[test]
    fn test_default_filter_parses() {
        assert!(parse_filter("nexus_plugins=debug,warn").is_ok());
    }
}
