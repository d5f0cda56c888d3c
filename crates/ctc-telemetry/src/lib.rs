//! Structured logging for the CTC market maker.
//!
//! - Pretty, human-readable output during development
//! - JSON output when `RUST_ENV=production`
//! - Filter via `RUST_LOG` (default `info,ctc_pricing=debug,ctc_bot=debug`)

pub mod error;
pub mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{init_logging, LogFormat};
