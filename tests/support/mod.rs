//! Shared fixtures for cart integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde_json::{Map, Value};

use lattice_cart::prelude::*;

/// In-process catalog with adjustable stock levels.
#[derive(Debug, Clone, Default)]
pub struct FakeCatalog {
    stock: Arc<Mutex<FxHashMap<ProductId, u32>>>,
}

impl FakeCatalog {
    pub fn with_stock(levels: impl IntoIterator<Item = (u64, u32)>) -> Self {
        let catalog = Self::default();

        for (id, amount) in levels {
            catalog.set_stock(id, amount);
        }

        catalog
    }

    pub fn set_stock(&self, id: u64, amount: u32) {
        if let Ok(mut stock) = self.stock.lock() {
            stock.insert(ProductId::new(id), amount);
        }
    }

    fn level(&self, id: ProductId) -> Option<u32> {
        self.stock.lock().ok()?.get(&id).copied()
    }
}

#[async_trait]
impl CatalogService for FakeCatalog {
    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        let amount = self.level(id).ok_or(CatalogError::NotFound(id))?;

        Ok(Stock {
            id: Some(id),
            amount,
        })
    }

    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.level(id).ok_or(CatalogError::NotFound(id))?;

        Ok(product(id.get()))
    }
}

/// Notifier that keeps every notification for later inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    seen: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<NotificationMessage> {
        self.seen
            .lock()
            .map(|seen| seen.iter().map(|notification| notification.message).collect())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(notification);
        }
    }
}

pub fn product(id: u64) -> Product {
    let mut attributes = Map::new();
    attributes.insert("brand".to_string(), Value::from("rocketshoes"));

    Product {
        id: ProductId::new(id),
        title: format!("Tênis {id}"),
        price: Decimal::new(17990, 2),
        image: format!("https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/{id}.jpg"),
        attributes,
    }
}

pub fn item(id: u64, amount: u32) -> LineItem {
    LineItem {
        product: product(id),
        amount,
    }
}

pub fn snapshot(items: &[LineItem]) -> String {
    serde_json::to_string(items).unwrap_or_default()
}

pub struct Harness {
    pub catalog: FakeCatalog,
    pub store: MemoryStore,
    pub notifier: RecordingNotifier,
    pub manager: CartManager,
}

impl Harness {
    pub async fn new(catalog: FakeCatalog, items: &[LineItem]) -> Self {
        let store = if items.is_empty() {
            MemoryStore::new()
        } else {
            MemoryStore::with_entry(DEFAULT_CART_KEY, snapshot(items))
        };

        Self::with_store(catalog, store).await
    }

    pub async fn with_store(catalog: FakeCatalog, store: MemoryStore) -> Self {
        let notifier = RecordingNotifier::default();

        let manager = CartManager::load(
            Arc::new(catalog.clone()),
            Arc::new(store.clone()),
            Arc::new(notifier.clone()),
            DEFAULT_CART_KEY,
        )
        .await;

        Self {
            catalog,
            store,
            notifier,
            manager,
        }
    }

    pub async fn stored(&self) -> Option<String> {
        self.store.get(DEFAULT_CART_KEY).await.ok().flatten()
    }
}
