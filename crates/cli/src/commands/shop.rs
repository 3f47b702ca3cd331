//! Cart and wishlist commands.
//!
//! Mutations made while logged out only affect this invocation and are
//! lost when it exits.

use shopfront_core::{ProductId, format_price};

use super::{CliError, Context, product_row};

fn warn_if_unsaved(ctx: &Context) {
    if !ctx.storefront.shop().is_loaded() {
        println!("(not logged in: changes will not be saved)");
    }
}

pub fn show_cart(ctx: &Context) {
    let shop = ctx.storefront.shop();
    let cart = &shop.state().cart;
    if cart.is_empty() {
        println!("Your cart is empty");
        return;
    }

    for item in cart {
        println!(
            "{} x{:<3} {:>10}",
            product_row(&item.product),
            item.quantity,
            format_price(item.line_total())
        );
    }
    println!(
        "{} item(s), total {}",
        shop.cart_items_count(),
        format_price(shop.cart_total())
    );
}

/// Add one unit of a catalog product.
///
/// # Errors
///
/// Returns `CliError::UnknownProduct` for ids not in the catalog.
pub fn add_to_cart(ctx: &mut Context, id: ProductId) -> Result<(), CliError> {
    let product = ctx.product(id)?;
    println!("Added {} to cart", product.name);
    ctx.storefront.shop_mut().add_to_cart(product);
    warn_if_unsaved(ctx);
    show_cart(ctx);
    Ok(())
}

pub fn remove_from_cart(ctx: &mut Context, id: ProductId) {
    ctx.storefront.shop_mut().remove_from_cart(id);
    warn_if_unsaved(ctx);
    show_cart(ctx);
}

pub fn set_quantity(ctx: &mut Context, id: ProductId, quantity: i64) {
    ctx.storefront.shop_mut().update_quantity(id, quantity);
    warn_if_unsaved(ctx);
    show_cart(ctx);
}

pub fn clear_cart(ctx: &mut Context) {
    ctx.storefront.shop_mut().clear_cart();
    warn_if_unsaved(ctx);
    println!("Cart cleared");
}

pub fn show_wishlist(ctx: &Context) {
    let wishlist = &ctx.storefront.shop().state().wishlist;
    if wishlist.is_empty() {
        println!("Your wishlist is empty");
        return;
    }
    for product in wishlist {
        println!("{}", product_row(product));
    }
}

/// Save a catalog product.
///
/// # Errors
///
/// Returns `CliError::UnknownProduct` for ids not in the catalog.
pub fn add_to_wishlist(ctx: &mut Context, id: ProductId) -> Result<(), CliError> {
    let product = ctx.product(id)?;
    println!("Saved {}", product.name);
    ctx.storefront.shop_mut().add_to_wishlist(product);
    warn_if_unsaved(ctx);
    Ok(())
}

pub fn remove_from_wishlist(ctx: &mut Context, id: ProductId) {
    ctx.storefront.shop_mut().remove_from_wishlist(id);
    warn_if_unsaved(ctx);
    show_wishlist(ctx);
}
