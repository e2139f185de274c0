//! Macros for user-facing output.
//!
//! Every line the tool prints goes through these macros. In normal mode they
//! write straight to the console; in debug mode they become `tracing` events
//! so that user messages interleave with the structured diagnostics.
//!
//! ## Debug Mode Detection
//!
//! Debug mode is on when either variable is set:
//! - **`JIRA_REPORTER_DEBUG`**: explicit switch
//! - **`RUST_LOG`**: standard Rust logging configuration
//!
//! The check runs once and is cached for the life of the process.
//!
//! ## Macros
//!
//! - **`msg_success!`**: prefixed with ✅
//! - **`msg_info!`**: prefixed with ℹ️
//! - **`msg_warning!`**: prefixed with ⚠️
//! - **`msg_error!`**: prefixed with ❌, written to stderr
//! - **`msg_debug!`**: only emitted in debug mode
//!
//! Each display macro accepts an optional `true` second argument that pads
//! the message with blank lines.
//!
//! ```rust
//! use jira_reporter::{msg_info, msg_success};
//! use jira_reporter::libs::messages::Message;
//!
//! msg_info!(Message::FetchingIssues("01/12/2024".into(), "31/12/2024".into()));
//! msg_success!(Message::ReportGenerated("reports/report_5_12_2024.html".into()), true);
//! ```

use std::sync::OnceLock;

static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var("JIRA_REPORTER_DEBUG").is_ok() || std::env::var("RUST_LOG").is_ok())
}

#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("✅ {}", $msg);
        } else {
            println!("✅ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\n✅ {}\n", $msg);
        } else {
            println!("\n✅ {}\n", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("❌ {}", $msg);
        } else {
            eprintln!("❌ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::error!("\n❌ {}\n", $msg);
        } else {
            eprintln!("\n❌ {}\n", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::warn!("⚠️ {}", $msg);
        } else {
            println!("⚠️ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::warn!("\n⚠️ {}\n", $msg);
        } else {
            println!("\n⚠️ {}\n", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("ℹ️ {}", $msg);
        } else {
            println!("ℹ️ {}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::info!("\nℹ️ {}\n", $msg);
        } else {
            println!("\nℹ️ {}\n", $msg);
        }
    };
}

#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::debug!("🔍 {}", $msg);
        }
    };
}
