//! Lattice Cart
//!
//! Client-side shopping cart state for a storefront: line items are added,
//! removed and re-quantified against live catalog stock, and every change is
//! written through to a durable local store.

pub mod cart;
pub mod catalog;
pub mod items;
pub mod manager;
pub mod notifications;
pub mod prelude;
pub mod products;
pub mod storage;
