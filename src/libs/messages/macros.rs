//! Convenient macros for application messaging and logging.
//!
//! The macros give every call site one interface for user output while
//! routing it according to the run mode:
//!
//! - **Normal mode**: plain `println!`/`eprintln!` with an emoji prefix
//! - **Debug mode**: the same text goes through `tracing` so it interleaves
//!   with the structured logs emitted by the engine and the store
//!
//! ## Debug Mode Detection
//!
//! Debug mode is on when either environment variable is set:
//! - **`CADENCE_DEBUG`**: Application-specific flag
//! - **`RUST_LOG`**: Standard Rust logging configuration
//!
//! The check runs once and is cached.
//!
//! ## Output Routing
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Macro Call    │    │   Debug Mode    │    │   Output        │
//! │   msg_info!()   │───▶│   Detection     │───▶│   Routing       │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!                                 │                       │
//!                                 ▼                       ▼
//!                        ┌─────────────────┐    ┌─────────────────┐
//!                        │ CADENCE_DEBUG or│    │ tracing::info!  │
//!                        │ RUST_LOG set?   │    │ OR println!     │
//!                        └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Usage Examples
//!
//! ```rust
//! use cadence::{msg_info, msg_success};
//! use cadence::libs::messages::Message;
//!
//! msg_success!(Message::TaskCreated("Water plants".to_string()));
//! msg_info!(Message::NoUpcomingOccurrences, true);
//! ```
//!
//! ```rust
//! use cadence::msg_error_anyhow;
//! use cadence::libs::messages::Message;
//!
//! let error = msg_error_anyhow!(Message::TaskNotFound("3f2a".to_string()));
//! assert!(error.to_string().contains("3f2a"));
//! ```

use std::sync::OnceLock;

/// Cached result of the debug-mode environment check.
static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

/// Environment variable that switches the application into debug mode.
pub const DEBUG_ENV_VAR: &str = "CADENCE_DEBUG";

/// Returns `true` when `CADENCE_DEBUG` or `RUST_LOG` is set.
#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var(DEBUG_ENV_VAR).is_ok() || std::env::var("RUST_LOG").is_ok())
}

/// Shared body of the output macros: prefix, optional blank-line padding,
/// then either the console or `tracing` at `$level`.
#[doc(hidden)]
#[macro_export]
macro_rules! __msg_emit {
    ($level:ident, $print:ident, $prefix:literal, $msg:expr, $padded:expr) => {{
        let text = if $padded {
            format!("\n{}{}\n", $prefix, $msg)
        } else {
            format!("{}{}", $prefix, $msg)
        };
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::$level!("{}", text);
        } else {
            $print!("{}", text);
        }
    }};
}

/// Plain output. Pass `true` as a second argument to pad with blank lines.
#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        $crate::__msg_emit!(info, println, "", $msg, false)
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(info, println, "", $msg, true)
    };
}

#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        $crate::__msg_emit!(info, println, "✅ ", $msg, false)
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(info, println, "✅ ", $msg, true)
    };
}

/// Goes to stderr outside debug mode.
#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        $crate::__msg_emit!(error, eprintln, "❌ ", $msg, false)
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(error, eprintln, "❌ ", $msg, true)
    };
}

#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        $crate::__msg_emit!(info, println, "ℹ️ ", $msg, false)
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(info, println, "ℹ️ ", $msg, true)
    };
}

/// Only emitted in debug mode.
#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::debug!("🔍 {}", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_error_anyhow {
    ($msg:expr) => {
        anyhow::anyhow!("❌ {}", $msg)
    };
}

#[macro_export]
macro_rules! msg_bail_anyhow {
    ($msg:expr) => {
        anyhow::bail!("❌ {}", $msg)
    };
}
