//! Cart commands and output.

use std::io;

use lattice_cart::{
    items::LineItem,
    manager::CartManager,
    notifications::Notification,
};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::config::Command;

/// Apply `command` to the cart.
pub(crate) async fn run(manager: &CartManager, command: Command) {
    match command {
        Command::Show => {}
        Command::Add { product } => manager.add_product(product).await,
        Command::Remove { product } => manager.remove_product(product).await,
        Command::Update { product, amount } => {
            manager.update_product_amount(product, amount).await;
        }
    }
}

/// Collect every notification raised so far.
pub(crate) fn drain(receiver: &mut UnboundedReceiver<Notification>) -> Vec<Notification> {
    let mut notifications = Vec::new();

    while let Ok(notification) = receiver.try_recv() {
        notifications.push(notification);
    }

    notifications
}

/// Write notifications followed by the cart table.
///
/// # Errors
///
/// Returns an error if `out` cannot be written to.
pub(crate) fn write_cart(
    mut out: impl io::Write,
    items: &[LineItem],
    notifications: &[Notification],
) -> io::Result<()> {
    for notification in notifications {
        writeln!(out, "error: {notification}")?;
    }

    if items.is_empty() {
        return writeln!(out, "cart is empty");
    }

    let mut builder = Builder::default();

    builder.push_record(["Id", "Product", "Price", "Amount"]);

    for item in items {
        builder.push_record([
            item.id().to_string(),
            item.product.title.clone(),
            item.product.price.to_string(),
            item.amount.to_string(),
        ]);
    }

    let units: u64 = items.iter().map(|item| u64::from(item.amount)).sum();

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..4), Alignment::right());

    writeln!(out, "{table}")?;
    writeln!(out, "{} line(s), {units} unit(s)", items.len())
}
