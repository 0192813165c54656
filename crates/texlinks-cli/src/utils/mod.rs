//! Shared helpers for the CLI commands.
//!
//! - [`logging`]: tracing subscriber and color control
//! - [`settings`]: config file discovery and loading

pub mod logging;
pub mod settings;

pub use logging::initialize_logging;
