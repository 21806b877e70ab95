//! Line Items

use serde::{Deserialize, Serialize};

use crate::products::{Product, ProductId};

/// A product in the cart together with the quantity requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product attributes as fetched from the catalog
    #[serde(flatten)]
    pub product: Product,

    /// Requested quantity, always at least one
    pub amount: u32,
}

impl LineItem {
    /// Create a line item for a freshly added product with a quantity of one.
    ///
    /// Any `amount` attribute the catalog attached to the product is dropped so
    /// it cannot shadow the requested quantity in snapshots.
    pub fn new(mut product: Product) -> Self {
        product.attributes.remove("amount");

        Self { product, amount: 1 }
    }

    /// Identifier of the product this line refers to.
    pub fn id(&self) -> ProductId {
        self.product.id
    }
}
