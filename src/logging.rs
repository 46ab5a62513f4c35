use once_cell::sync::OnceCell;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _};

static INIT: OnceCell<()> = OnceCell::new();

/// Install the global subscriber once, filtered by `RUST_LOG` and defaulting to `info`
pub fn init() {
    INIT.get_or_init(|| {
        // forward records from crates that log through `log`
        if let Err(error) = tracing_log::LogTracer::init() {
            eprintln!("unable to forward log records: {error}");
        }

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let subscriber = tracing_subscriber::registry().with(filter).with(fmt::layer());

        if let Err(error) = tracing::subscriber::set_global_default(subscriber) {
            eprintln!("unable to set global subscriber: {error}");
        }
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_init_twice_is_harmless() {
        super::init();
        super::init();
        tracing::info!("logging initialized");
    }
}
