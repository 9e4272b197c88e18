//! Logging bootstrap for the `debora` binary.
//!
//! The library only emits through the `log` facade; a process that never
//! calls [`init_logging`] simply drops those events. Logs go to stderr so
//! they never mix with command output on stdout.

use std::sync::OnceLock;

use flexi_logger::{Logger, LoggerHandle};
use log::info;

/// Level used when neither `--verbose` nor `--log-level` is given.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Level used by `--verbose`.
pub const VERBOSE_LOG_LEVEL: &str = "debug";

static LOGGER: OnceLock<(String, LoggerHandle)> = OnceLock::new();

/// Pick the effective level spec from the command line flags.
/// An explicit `--log-level` wins over `--verbose`.
pub fn resolve_level(verbose: bool, log_level: Option<&str>) -> String {
    match log_level {
        Some(spec) if !spec.trim().is_empty() => spec.trim().to_string(),
        _ if verbose => VERBOSE_LOG_LEVEL.to_string(),
        _ => DEFAULT_LOG_LEVEL.to_string(),
    }
}

/// Start the stderr logger with a flexi_logger spec such as `info` or
/// `warn, debora::application=debug`.
///
/// Idempotent for the same spec; a second call with a different spec is
/// rejected instead of silently ignored.
pub fn init_logging(spec: &str) -> Result<(), String> {
    if let Some((active, _)) = LOGGER.get() {
        if active == spec {
            return Ok(());
        }
        return Err(format!(
            "logging already initialized with `{}`; refusing to switch to `{}`",
            active, spec
        ));
    }

    let handle = Logger::try_with_str(spec)
        .map_err(|err| format!("invalid log level `{spec}`: {err}"))?
        .log_to_stderr()
        .format(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    // Lost race: another thread installed a logger between get() and here.
    if LOGGER.set((spec.to_string(), handle)).is_err() {
        return Err("logging already initialized".to_string());
    }

    info!(
        "event=app_start module=core status=ok level={} version={}",
        spec,
        env!("CARGO_PKG_VERSION")
    );
    Ok(())
}
