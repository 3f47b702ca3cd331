//! Session commands.

use shopfront_core::Identity;

use super::{CliError, Context};

fn describe(identity: &Identity) -> String {
    format!("{} <{}> (id {})", identity.greeting_name(), identity.email, identity.id)
}

/// Log in and report the shop state that was restored.
///
/// # Errors
///
/// Returns `CliError::Auth` for malformed emails or bad credentials.
pub fn login(ctx: &mut Context, email: &str, password: &str) -> Result<(), CliError> {
    let identity = ctx.storefront.login(email, password)?;
    let shop = ctx.storefront.shop();
    println!("Logged in as {}", describe(&identity));
    println!(
        "{} item(s) in cart, {} saved",
        shop.cart_items_count(),
        shop.state().wishlist.len()
    );
    Ok(())
}

/// Register and log in.
///
/// # Errors
///
/// Returns `CliError::Auth` for malformed emails or taken accounts.
pub fn register(
    ctx: &mut Context,
    email: &str,
    password: &str,
    name: Option<String>,
) -> Result<(), CliError> {
    let identity = ctx.storefront.register(email, password, name)?;
    println!("Welcome, {}", describe(&identity));
    Ok(())
}

pub fn logout(ctx: &mut Context) {
    if ctx.storefront.identity().is_none() {
        println!("Not logged in");
        return;
    }
    ctx.storefront.logout();
    println!("Logged out");
}

pub fn whoami(ctx: &Context) {
    match ctx.storefront.identity() {
        Some(identity) => println!("{}", describe(identity)),
        None => println!("Not logged in"),
    }
}
