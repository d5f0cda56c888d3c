//! CTC dice derivatives market maker harness.
//!
//! Wires the pricing engine to file-based inputs:
//! - TOML application config (game + pricing sections)
//! - JSON market snapshot (products, rolls, positions, round info)
//! - Quote output as `{ product_id: [bid, ask] }`

pub mod app;
pub mod config;
pub mod error;
pub mod snapshot;

pub use app::Application;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use snapshot::SnapshotFile;
