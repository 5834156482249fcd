//! Subscriber setup for the binary.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` selects levels (default `info`); `SPGATE_LOG_JSON=1` switches
/// to one JSON object per event. Output goes to stderr.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder =
        tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);

    let installed = if json_requested() {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(e) = installed {
        eprintln!("logging already initialized: {e}");
    }
}

fn json_requested() -> bool {
    std::env::var("SPGATE_LOG_JSON")
        .map(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}
