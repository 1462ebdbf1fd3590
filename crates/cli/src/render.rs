//! Plain-text rendering of catalog, product detail and cart panel.

use std::fmt::Write as _;

use slumber_cart::{CartLine, Receipt};
use slumber_catalog::Product;
use slumber_core::{Entity, Locale, Price};

/// One catalog row: image, id, category, name and price.
pub fn product_row(product: &Product, locale: Locale) -> String {
    format!(
        "{image} #{id} [{category}] {name} - {price}",
        image = product.image(),
        id = product.id(),
        category = product.category().label(locale),
        name = product.name(),
        price = product.price().display(locale.price_format()),
    )
}

/// Product detail panel: price, description and feature checklist.
pub fn product_detail(product: &Product, locale: Locale) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", product.image(), product.name());
    let _ = writeln!(out, "{}", product.category().label(locale));
    let _ = writeln!(out, "{}", product.price().display(locale.price_format()));

    if !product.description().is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", product.description());
    }

    if !product.features().is_empty() {
        let _ = writeln!(out);
        for feature in product.features() {
            let _ = writeln!(out, "  ✓ {feature}");
        }
    }
    out
}

/// Cart panel: one row per line, then count and total.
pub fn cart_panel(lines: &[CartLine<'_>], count: u64, total: Price, locale: Locale) -> String {
    let format = locale.price_format();
    let mut out = String::new();

    if lines.is_empty() {
        let _ = writeln!(out, "Cart is empty");
    }

    for line in lines {
        let _ = writeln!(
            out,
            "#{id} {name}: {price} × {quantity} = {line_total}",
            id = line.product.id(),
            name = line.product.name(),
            price = line.product.price().display(format),
            quantity = line.quantity,
            line_total = line.line_total().display(format),
        );
    }

    let _ = writeln!(out, "Items: {count}");
    let _ = writeln!(out, "Total: {}", total.display(format));
    out
}

pub fn receipt(receipt: &Receipt, locale: Locale) -> String {
    let format = locale.price_format();
    let mut out = String::from("Thank you for your order! We will contact you shortly.\n");

    for line in &receipt.lines {
        let _ = writeln!(
            out,
            "  {name} × {quantity} = {total}",
            name = line.name,
            quantity = line.quantity,
            total = line.line_total.display(format),
        );
    }
    let _ = writeln!(out, "Total: {}", receipt.total.display(format));
    out
}
