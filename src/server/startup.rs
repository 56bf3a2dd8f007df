use tracing_subscriber::EnvFilter;

/// Default log filter when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "info,serenity=warn";

/// Initializes the global tracing subscriber.
///
/// Log levels are taken from `RUST_LOG` when set, otherwise the bot logs at
/// `info` and Serenity's own chatter is limited to warnings.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Routes panics through the tracing subscriber.
///
/// Serenity runs every event handler in its own task, so a panic only kills
/// the affected interaction. Without this hook it would go to stderr unnoticed
/// by log collection.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("Unhandled panic: {}", info);
    }));
}
