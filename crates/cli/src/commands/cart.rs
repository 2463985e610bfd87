//! Cart display for the terminal.

#![allow(clippy::print_stdout)] // user-facing CLI output

use shopcart_core::Cart;

/// Print the cart entries and subtotal.
pub fn show(cart: &Cart) {
    if cart.is_empty() {
        println!("cart is empty");
        return;
    }

    println!(
        "{:<6} {:<30} {:>6} {:>10} {:>10}",
        "id", "title", "qty", "price", "total"
    );
    for entry in cart.entries() {
        let line_total = format!(
            "{}{:.2}",
            entry.price.currency_code.symbol(),
            entry.line_total()
        );
        println!(
            "{:<6} {:<30} {:>6} {:>10} {:>10}",
            entry.product_id,
            entry.title,
            entry.amount,
            entry.price.display(),
            line_total,
        );
    }
    println!(
        "{} item(s), subtotal {:.2}",
        cart.total_quantity(),
        cart.subtotal()
    );
}
