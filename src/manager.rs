//! Cart manager
//!
//! Owns the cart for one storefront session, validates quantity changes
//! against live stock and writes every change through to a [`CartStore`].
//! Rejected operations never return an error to the caller; they raise a
//! [`Notification`] instead and leave both the cart and the stored snapshot
//! untouched.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

use crate::{
    cart::Cart,
    catalog::{CatalogError, CatalogService},
    items::LineItem,
    notifications::{Notification, Notifier},
    products::ProductId,
    storage::CartStore,
};

mod errors;

pub use errors::{CartError, Operation};

/// Shared cart state with stock-checked mutations.
pub struct CartManager {
    catalog: Arc<dyn CatalogService>,
    store: Arc<dyn CartStore>,
    notifier: Arc<dyn Notifier>,
    key: String,
    cart: watch::Sender<Cart>,

    /// Last snapshot handed to the store.
    ///
    /// Held for the whole of each mutation so operations on one cart run one
    /// at a time.
    last_write: Mutex<Option<String>>,
}

impl CartManager {
    /// Restore the cart stored under `key`, or start empty.
    ///
    /// A missing, unreadable or malformed snapshot yields an empty cart; the
    /// problem is logged but not surfaced.
    pub async fn load(
        catalog: Arc<dyn CatalogService>,
        store: Arc<dyn CartStore>,
        notifier: Arc<dyn Notifier>,
        key: impl Into<String>,
    ) -> Self {
        let key = key.into();

        let (cart, last_write) = match store.get(&key).await {
            Ok(Some(snapshot)) => match Cart::from_snapshot(&snapshot) {
                Ok(cart) => {
                    info!(%key, lines = cart.len(), "restored cart");

                    (cart, Some(snapshot))
                }
                Err(error) => {
                    warn!(%key, %error, "discarding unreadable cart snapshot");

                    (Cart::new(), None)
                }
            },
            Ok(None) => {
                debug!(%key, "no stored cart, starting empty");

                (Cart::new(), None)
            }
            Err(error) => {
                warn!(%key, %error, "failed to read stored cart, starting empty");

                (Cart::new(), None)
            }
        };

        let (cart, _) = watch::channel(cart);

        Self {
            catalog,
            store,
            notifier,
            key,
            cart,
            last_write: Mutex::new(last_write),
        }
    }

    /// Current line items, in the order they were first added.
    pub fn cart(&self) -> Vec<LineItem> {
        self.cart.borrow().items().to_vec()
    }

    /// Total number of units in the cart.
    pub fn quantity(&self) -> u64 {
        self.cart.borrow().quantity()
    }

    /// Watch the cart for changes; the receiver sees every committed state.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.cart.subscribe()
    }

    /// Storage key the cart is persisted under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Add one unit of a product, appending a new line when it is not yet in
    /// the cart.
    pub async fn add_product(&self, product: ProductId) {
        let mut last_write = self.last_write.lock().await;

        let result = self.try_add_product(&mut last_write, product).await;

        self.settle(Operation::Add, product, result);
    }

    /// Remove a product's line from the cart.
    pub async fn remove_product(&self, product: ProductId) {
        let mut last_write = self.last_write.lock().await;

        let result = self.try_remove_product(&mut last_write, product).await;

        self.settle(Operation::Remove, product, result);
    }

    /// Set the quantity of a product already in the cart.
    ///
    /// Amounts of zero or below are ignored without any notification, so a
    /// quantity stepper can be decremented past one harmlessly.
    pub async fn update_product_amount(&self, product: ProductId, amount: i64) {
        if amount <= 0 {
            debug!(%product, amount, "ignoring non-positive amount");

            return;
        }

        let mut last_write = self.last_write.lock().await;

        let result = self
            .try_update_product_amount(&mut last_write, product, amount)
            .await;

        self.settle(Operation::Update, product, result);
    }

    async fn try_add_product(
        &self,
        last_write: &mut Option<String>,
        product: ProductId,
    ) -> Result<(), CartError> {
        let stock = self.catalog.stock(product).await?;

        let mut cart = self.cart.borrow().clone();
        let current = cart.amount_of(product);

        let amount = current
            .checked_add(1)
            .filter(|amount| *amount <= stock.amount)
            .ok_or(CartError::StockExceeded {
                product,
                requested: u64::from(current) + 1,
                available: stock.amount,
            })?;

        if let Some(item) = cart.find_mut(product) {
            item.amount = amount;
        } else {
            let details = self.catalog.product(product).await?;

            if details.id != product {
                return Err(CatalogError::UnexpectedResponse(format!(
                    "requested product {product} but catalog returned {}",
                    details.id
                ))
                .into());
            }

            cart.push(LineItem::new(details));
        }

        self.commit(last_write, cart).await
    }

    async fn try_remove_product(
        &self,
        last_write: &mut Option<String>,
        product: ProductId,
    ) -> Result<(), CartError> {
        let mut cart = self.cart.borrow().clone();

        cart.remove(product)
            .ok_or(CartError::ItemNotFound(product))?;

        self.commit(last_write, cart).await
    }

    async fn try_update_product_amount(
        &self,
        last_write: &mut Option<String>,
        product: ProductId,
        amount: i64,
    ) -> Result<(), CartError> {
        let stock = self.catalog.stock(product).await?;

        let amount = u32::try_from(amount)
            .ok()
            .filter(|amount| *amount <= stock.amount)
            .ok_or(CartError::StockExceeded {
                product,
                requested: amount.unsigned_abs(),
                available: stock.amount,
            })?;

        let mut cart = self.cart.borrow().clone();

        let item = cart
            .find_mut(product)
            .ok_or(CartError::ItemNotFound(product))?;

        if item.amount == amount {
            return Ok(());
        }

        item.amount = amount;

        self.commit(last_write, cart).await
    }

    /// Replace the in-memory cart and write it through to the store.
    ///
    /// A failed write is logged and otherwise ignored; the next commit will
    /// try again with the then-current cart.
    async fn commit(&self, last_write: &mut Option<String>, cart: Cart) -> Result<(), CartError> {
        let snapshot = cart.to_snapshot()?;

        self.cart.send_modify(|current| *current = cart);

        if last_write.as_deref() == Some(snapshot.as_str()) {
            debug!(key = %self.key, "cart unchanged since last write");

            return Ok(());
        }

        match self.store.set(&self.key, snapshot.clone()).await {
            Ok(()) => {
                debug!(key = %self.key, "cart persisted");

                *last_write = Some(snapshot);
            }
            Err(error) => warn!(key = %self.key, %error, "failed to persist cart"),
        }

        Ok(())
    }

    fn settle(&self, operation: Operation, product: ProductId, result: Result<(), CartError>) {
        if let Err(error) = result {
            warn!(?operation, %product, %error, "cart operation rejected");

            self.notifier
                .notify(Notification::error(error.notification(operation)));
        }
    }
}

impl Debug for CartManager {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CartManager")
            .field("key", &self.key)
            .field("cart", &*self.cart.borrow())
            .finish_non_exhaustive()
    }
}
