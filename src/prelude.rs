//! Lattice Cart prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, SnapshotError},
    catalog::{CatalogError, CatalogService, HttpCatalog, HttpCatalogConfig},
    items::LineItem,
    manager::{CartError, CartManager, Operation},
    notifications::{
        ChannelNotifier, Notification, NotificationLevel, NotificationMessage, Notifier,
        TracingNotifier,
    },
    products::{Product, ProductId, Stock},
    storage::{CartStore, DEFAULT_CART_KEY, JsonFileStore, MemoryStore, StoreError},
};
