//! Logging setup for the pizza storefront.
//!
//! The library crates only emit `tracing` events. Binaries call
//! [`init_logging`] once at startup to decide where those events go:
//! - `LogLevel` - Minimum level when `RUST_LOG` is not set
//! - `LogFormat` - Human-readable or JSON lines
//! - `LoggingConfig` - The `[logging]` config section

mod logging;

pub use logging::*;
