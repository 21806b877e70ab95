//! Cart manager errors.

use thiserror::Error;

use crate::{catalog::CatalogError, notifications::NotificationMessage, products::ProductId};

/// The cart operation an error was raised by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Adding one unit of a product.
    Add,

    /// Removing a product line.
    Remove,

    /// Setting a product's quantity.
    Update,
}

/// Reasons a cart operation can be rejected.
#[derive(Debug, Error)]
pub enum CartError {
    /// The requested quantity is above the stock available right now.
    #[error("requested {requested} of product {product} but only {available} in stock")]
    StockExceeded {
        /// Product the quantity was requested for
        product: ProductId,

        /// Quantity that would have resulted
        requested: u64,

        /// Stock reported by the catalog
        available: u32,
    },

    /// The product has no line in the cart.
    #[error("product {0} is not in the cart")]
    ItemNotFound(ProductId),

    /// The catalog could not be queried or answered unexpectedly.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The updated cart could not be serialized.
    #[error("failed to serialize cart")]
    Snapshot(#[from] serde_json::Error),
}

impl CartError {
    /// The message shown to the user when `operation` fails with this error.
    pub fn notification(&self, operation: Operation) -> NotificationMessage {
        match (self, operation) {
            (Self::StockExceeded { .. }, _) => NotificationMessage::StockExceeded,
            (_, Operation::Add) => NotificationMessage::AddFailed,
            (_, Operation::Remove) => NotificationMessage::RemoveFailed,
            (_, Operation::Update) => NotificationMessage::UpdateFailed,
        }
    }
}
