// ABOUTME: Library root for vigil - exposes the monitor, client and config for the CLI and tests.
// ABOUTME: The main binary is in main.rs.

pub mod api;
pub mod config;
pub mod deploy;
pub mod diagnostics;
pub mod error;
pub mod hooks;
pub mod monitor;
pub mod output;
pub mod types;
