use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing for the reporter.
///
/// Diagnostics go to stderr only; stdout carries nothing but status
/// records. The default level follows the `-v` count (warn, then info,
/// debug, trace), with `RUST_LOG` taking precedence when set.
///
/// # Errors
/// Returns error if tracing subscriber initialization fails
pub fn init(verbosity: u8) -> Result<(), Box<dyn std::error::Error>> {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(true)
                .with_level(true)
                .with_writer(std::io::stderr),
        )
        .try_init()?;

    Ok(())
}
