use tracing_subscriber::EnvFilter;

use crate::args::LogArgs;

/// Installs the global subscriber. An unparsable filter falls back to `info`.
pub fn init_logger(log: &LogArgs) {
    let filter = EnvFilter::try_new(&log.filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if log.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
