//! Cart

use rustc_hash::FxHashSet;
use serde_json::Error as JsonError;
use thiserror::Error;

use crate::{items::LineItem, products::ProductId};

/// Errors raised while restoring a cart from a stored snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The snapshot is not a JSON array of line items.
    #[error("malformed cart snapshot")]
    Json(#[from] JsonError),

    /// The snapshot lists the same product more than once.
    #[error("product {0} appears more than once in the snapshot")]
    DuplicateItem(ProductId),

    /// The snapshot holds a line item with a zero quantity.
    #[error("product {0} has a zero amount in the snapshot")]
    InvalidAmount(ProductId),
}

/// Ordered collection of line items, at most one per product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a cart from a serialized snapshot.
    ///
    /// # Errors
    ///
    /// Returns a `SnapshotError` if the snapshot cannot be parsed, or if it
    /// breaks the one-line-per-product or non-zero quantity rules.
    pub fn from_snapshot(snapshot: &str) -> Result<Self, SnapshotError> {
        let items: Vec<LineItem> = serde_json::from_str(snapshot)?;

        let mut seen = FxHashSet::default();

        for item in &items {
            if !seen.insert(item.id()) {
                return Err(SnapshotError::DuplicateItem(item.id()));
            }

            if item.amount == 0 {
                return Err(SnapshotError::InvalidAmount(item.id()));
            }
        }

        Ok(Self { items })
    }

    /// Serialize the cart into its stored form.
    ///
    /// # Errors
    ///
    /// Returns an error if a product attribute cannot be serialized.
    pub fn to_snapshot(&self) -> Result<String, JsonError> {
        serde_json::to_string(&self.items)
    }

    /// Line items in the order they were first added.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Find the line item for a product.
    pub fn find(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub(crate) fn find_mut(&mut self, id: ProductId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    /// Position of the line item for a product.
    pub fn position(&self, id: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Whether the cart holds a line for the product.
    pub fn contains(&self, id: ProductId) -> bool {
        self.position(id).is_some()
    }

    /// Quantity of a product currently in the cart, zero when absent.
    pub fn amount_of(&self, id: ProductId) -> u32 {
        self.find(id).map_or(0, |item| item.amount)
    }

    /// Total number of units across all lines.
    pub fn quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.amount)).sum()
    }

    /// Number of distinct lines in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a line for a product not yet in the cart.
    pub(crate) fn push(&mut self, item: LineItem) {
        debug_assert!(
            !self.contains(item.id()),
            "product {} is already in the cart",
            item.id()
        );

        self.items.push(item);
    }

    /// Remove the line for a product, keeping the order of the rest.
    pub(crate) fn remove(&mut self, id: ProductId) -> Option<LineItem> {
        let index = self.position(id)?;

        Some(self.items.remove(index))
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::Map;
    use testresult::TestResult;

    use crate::products::Product;

    use super::*;

    fn item(id: u64, amount: u32) -> LineItem {
        LineItem {
            product: Product {
                id: ProductId::new(id),
                title: format!("Product {id}"),
                price: Decimal::new(9990, 2),
                image: String::new(),
                attributes: Map::new(),
            },
            amount,
        }
    }

    fn cart(items: impl IntoIterator<Item = LineItem>) -> Cart {
        let mut cart = Cart::new();

        for item in items {
            cart.push(item);
        }

        cart
    }

    #[test]
    fn new_cart_is_empty() {
        let cart = Cart::new();

        assert!(cart.is_empty());
        assert_eq!(cart.len(), 0);
        assert_eq!(cart.quantity(), 0);
    }

    #[test]
    fn find_and_position_by_product() {
        let cart = cart([item(1, 1), item(2, 3)]);

        assert_eq!(cart.position(ProductId::new(2)), Some(1));
        assert_eq!(cart.amount_of(ProductId::new(2)), 3);
        assert_eq!(cart.amount_of(ProductId::new(9)), 0);
        assert!(cart.find(ProductId::new(9)).is_none());
    }

    #[test]
    fn quantity_sums_amounts() {
        let cart = cart([item(1, 2), item(2, 3)]);

        assert_eq!(cart.quantity(), 5);
    }

    #[test]
    fn remove_preserves_order() {
        let mut cart = cart([item(1, 1), item(2, 1), item(3, 1)]);

        let removed = cart.remove(ProductId::new(2));

        assert_eq!(removed.map(|item| item.id()), Some(ProductId::new(2)));

        let ids: Vec<_> = cart.items().iter().map(LineItem::id).collect();

        assert_eq!(ids, [ProductId::new(1), ProductId::new(3)]);
    }

    #[test]
    fn remove_missing_returns_none() {
        let mut cart = cart([item(1, 1)]);

        assert!(cart.remove(ProductId::new(2)).is_none());
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn snapshot_round_trips() -> TestResult {
        let cart = cart([item(2, 1), item(1, 4)]);

        let restored = Cart::from_snapshot(&cart.to_snapshot()?)?;

        assert_eq!(restored, cart);

        Ok(())
    }

    #[test]
    fn empty_snapshot_is_empty_array() -> TestResult {
        assert_eq!(Cart::new().to_snapshot()?, "[]");

        Ok(())
    }

    #[test]
    fn malformed_snapshot_errors() {
        let result = Cart::from_snapshot("{not json");

        assert!(matches!(result, Err(SnapshotError::Json(_))));
    }

    #[test]
    fn duplicate_snapshot_items_error() -> TestResult {
        let snapshot = serde_json::to_string(&[item(1, 1), item(1, 2)])?;

        let result = Cart::from_snapshot(&snapshot);

        assert!(
            matches!(result, Err(SnapshotError::DuplicateItem(id)) if id == ProductId::new(1)),
            "expected DuplicateItem, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn zero_amount_snapshot_items_error() -> TestResult {
        let snapshot = serde_json::to_string(&[item(4, 0)])?;

        let result = Cart::from_snapshot(&snapshot);

        assert!(
            matches!(result, Err(SnapshotError::InvalidAmount(id)) if id == ProductId::new(4)),
            "expected InvalidAmount, got {result:?}"
        );

        Ok(())
    }
}
