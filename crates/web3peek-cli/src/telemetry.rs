//! Telemetry and logging initialization.
//!
//! Logs go to stderr so stdout stays clean for command output.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive for a `-v` count, used when neither `--log-level`
/// nor `RUST_LOG` is given.
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Pick the filter: explicit level, then `-v`, then `RUST_LOG`, then `warn`.
pub fn build_filter(explicit: Option<&str>, verbose: u8) -> anyhow::Result<EnvFilter> {
    if let Some(level) = explicit {
        return Ok(EnvFilter::try_new(level)?);
    }
    if verbose > 0 {
        return Ok(EnvFilter::try_new(level_for_verbosity(verbose))?);
    }
    Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
}

/// Initialize telemetry (logging and tracing).
pub fn init_telemetry(filter: EnvFilter, json_format: bool) -> anyhow::Result<()> {
    if json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()?;
    }

    Ok(())
}
