//! Debug diagnostics gated by `OBJJ_LOG`.
//!
//! User-facing progress goes to stdout/stderr directly from commands. This is
//! only for the "why did that file get skipped" kind of question.

/// Environment variable enabling debug output.
pub const LOG_ENV_VAR: &str = "OBJJ_LOG";

/// Whether debug logging is on for this process
pub fn debug_enabled() -> bool {
    std::env::var_os(LOG_ENV_VAR).is_some()
}

/// Print `[DEBUG scope] msg` to stderr when `OBJJ_LOG` is set
pub fn log_debug(scope: &str, msg: &str) {
    if debug_enabled() {
        eprintln!("[DEBUG {}] {}", scope, msg);
    }
}
