//! Core domain types for the CTC dice derivatives market maker.
//!
//! This crate provides the read-only inputs the pricing engine consumes:
//! - `Product`, `ProductKind`: Product ids parsed once into a typed variant
//! - `Position`, `PositionBook`: Ledger snapshot queried per product id
//! - `RoundInfo`: Sub-round state with defaults for missing keys
//! - `GameConfig`, `RoundResult`, `GameSummary`: Lifecycle payloads

pub mod error;
pub mod position;
pub mod product;
pub mod round;

pub use error::{CoreError, Result};
pub use position::{Position, PositionBook, PositionLookup, PositionSummary, Trade};
pub use product::{Product, ProductKind};
pub use round::{GameConfig, GameSummary, Roll, RoundInfo, RoundResult};
