//! Products

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    num::ParseIntError,
    str::FromStr,
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Catalog product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Wrap a raw catalog identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw catalog identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for ProductId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Product record as served by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier
    pub id: ProductId,

    /// Display title
    #[serde(alias = "name")]
    pub title: String,

    /// Unit price, carried as-is from the catalog
    pub price: Decimal,

    /// Image URL
    #[serde(default)]
    pub image: String,

    /// Any further attributes the catalog returns
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Available stock for a product at the time it was queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Stock {
    /// Product identifier, when the catalog echoes it back
    #[serde(default)]
    pub id: Option<ProductId>,

    /// Units available
    pub amount: u32,
}
