//! Product identification.
//!
//! Products arrive as comma-separated ids that double as a wire format:
//! - `S,F,N`: future settling to the roll sum of the first N sub-rounds
//! - `S,C,STRIKE,EXPIRY`: call on the roll sum at sub-round EXPIRY
//! - `S,P,STRIKE,EXPIRY`: put on the roll sum at sub-round EXPIRY
//!
//! Ids are parsed once into [`ProductKind`] at the boundary. A malformed id
//! becomes [`ProductKind::Invalid`] and is never priced.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Derivative type and parameters decoded from a product id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProductKind {
    /// Linear payoff: sum of rolls in the first `settle_round` sub-rounds.
    Future { settle_round: u32 },
    /// Pays `max(0, sum - strike)` at `expiry`.
    Call { strike: f64, expiry: u32 },
    /// Pays `max(0, strike - sum)` at `expiry`.
    Put { strike: f64, expiry: u32 },
    /// Id could not be decoded.
    Invalid,
}

impl ProductKind {
    /// Sub-round at which the payoff is determined.
    pub fn horizon(&self) -> Option<u32> {
        match *self {
            Self::Future { settle_round } => Some(settle_round),
            Self::Call { expiry, .. } | Self::Put { expiry, .. } => Some(expiry),
            Self::Invalid => None,
        }
    }

    pub fn is_option(&self) -> bool {
        matches!(self, Self::Call { .. } | Self::Put { .. })
    }
}

impl FromStr for ProductKind {
    type Err = CoreError;

    fn from_str(id: &str) -> Result<Self> {
        let fields: Vec<&str> = id.split(',').map(str::trim).collect();
        let invalid = |reason: &str| CoreError::InvalidProduct(format!("{id:?}: {reason}"));

        if fields.len() < 3 {
            return Err(invalid("expected at least 3 fields"));
        }
        if fields[0].is_empty() {
            return Err(invalid("missing underlying"));
        }

        match fields[1] {
            "F" => {
                if fields.len() != 3 {
                    return Err(invalid("future takes exactly 3 fields"));
                }
                let settle_round =
                    parse_round(fields[2]).ok_or_else(|| invalid("bad settle round"))?;
                Ok(Self::Future { settle_round })
            }
            code @ ("C" | "P") => {
                if fields.len() != 4 {
                    return Err(invalid("option takes exactly 4 fields"));
                }
                let strike = fields[2]
                    .parse::<f64>()
                    .ok()
                    .filter(|s| s.is_finite())
                    .ok_or_else(|| invalid("bad strike"))?;
                let expiry = parse_round(fields[3]).ok_or_else(|| invalid("bad expiry"))?;
                if code == "C" {
                    Ok(Self::Call { strike, expiry })
                } else {
                    Ok(Self::Put { strike, expiry })
                }
            }
            _ => Err(invalid("unknown type code")),
        }
    }
}

fn parse_round(field: &str) -> Option<u32> {
    field.parse::<u32>().ok()
}

/// A tradeable product: the raw id plus its decoded kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Product {
    pub id: String,
    pub kind: ProductKind,
}

impl Product {
    /// Decode a product id. Never fails; undecodable ids map to `Invalid`.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let kind = id.parse().unwrap_or(ProductKind::Invalid);
        Self { id, kind }
    }
}

impl From<String> for Product {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<Product> for String {
    fn from(product: Product) -> Self {
        product.id
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
