//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `session` - Mock authentication and the persisted current identity
//! - `shop` - Cart and wishlist, namespaced per identity
//! - `chat` - Scripted chat assistant
//!
//! [`Storefront`] ties the session and shop stores together: it is the only
//! place that feeds identity changes into the shop store.

pub mod chat;
pub mod session;
pub mod shop;

use std::sync::Arc;

use shopfront_core::Identity;

use crate::storage::KeyValueStore;

pub use chat::ChatResponder;
pub use session::{AuthError, Roster, SessionStore, UnknownEmailPolicy};
pub use shop::ShopStore;

/// Session and shop state for one client.
pub struct Storefront {
    session: SessionStore,
    shop: ShopStore,
}

impl Storefront {
    /// Restore the session from `storage` and load its shop data.
    #[must_use]
    pub fn open(
        storage: Arc<dyn KeyValueStore>,
        roster: Roster,
        policy: UnknownEmailPolicy,
    ) -> Self {
        let session = SessionStore::restore(storage.clone(), roster, policy);
        let mut shop = ShopStore::new(storage);
        shop.sync_identity(session.current());
        Self { session, shop }
    }

    /// The signed-in identity.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        self.session.current()
    }

    /// Log in and switch the shop to the new identity.
    ///
    /// # Errors
    ///
    /// Returns the session store's `AuthError`; state is unchanged on error.
    pub fn login(&mut self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let identity = self.session.login(email, password)?;
        self.shop.sync_identity(Some(&identity));
        Ok(identity)
    }

    /// Register and switch the shop to the new identity.
    ///
    /// # Errors
    ///
    /// Returns the session store's `AuthError`; state is unchanged on error.
    pub fn register(
        &mut self,
        email: &str,
        password: &str,
        display_name: Option<String>,
    ) -> Result<Identity, AuthError> {
        let identity = self.session.register(email, password, display_name)?;
        self.shop.sync_identity(Some(&identity));
        Ok(identity)
    }

    /// Log out and unload the shop state.
    pub fn logout(&mut self) {
        self.session.logout();
        self.shop.sync_identity(None);
    }

    #[must_use]
    pub const fn shop(&self) -> &ShopStore {
        &self.shop
    }

    pub const fn shop_mut(&mut self) -> &mut ShopStore {
        &mut self.shop
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use rust_decimal::Decimal;
    use shopfront_core::{Product, ProductId};

    fn open(storage: &Arc<MemoryStore>) -> Storefront {
        Storefront::open(storage.clone(), Roster::demo(), UnknownEmailPolicy::Accept)
    }

    fn mug() -> Product {
        Product::new(ProductId::new(1), "Mug", Decimal::from(12), "kitchen")
    }

    #[test]
    fn test_logout_then_relogin_restores_shop() {
        let storage = Arc::new(MemoryStore::new());
        let mut storefront = open(&storage);

        storefront.login("demo@example.com", "demo123").unwrap();
        storefront.shop_mut().add_to_cart(mug());
        storefront.shop_mut().add_to_wishlist(mug());

        storefront.logout();
        assert!(storefront.identity().is_none());
        assert_eq!(storefront.shop().cart_items_count(), 0);
        assert!(!storefront.shop().is_in_wishlist(ProductId::new(1)));

        storefront.login("demo@example.com", "demo123").unwrap();
        assert_eq!(storefront.shop().cart_items_count(), 1);
        assert!(storefront.shop().is_in_wishlist(ProductId::new(1)));
    }

    #[test]
    fn test_reopen_restores_session_and_shop() {
        let storage = Arc::new(MemoryStore::new());
        {
            let mut storefront = open(&storage);
            storefront.login("jane@example.com", "password123").unwrap();
            storefront.shop_mut().add_to_cart(mug());
            storefront.shop_mut().add_to_cart(mug());
        }

        let storefront = open(&storage);
        assert_eq!(storefront.identity().map(|i| i.id.as_str()), Some("2"));
        assert_eq!(storefront.shop().cart_total(), Decimal::from(24));
    }

    #[test]
    fn test_failed_login_keeps_current_shop() {
        let storage = Arc::new(MemoryStore::new());
        let mut storefront = open(&storage);
        storefront.login("jane@example.com", "password123").unwrap();
        storefront.shop_mut().add_to_cart(mug());

        assert!(storefront.login("demo@example.com", "bad").is_err());
        assert_eq!(storefront.identity().map(|i| i.id.as_str()), Some("2"));
        assert_eq!(storefront.shop().cart_items_count(), 1);
    }

    #[test]
    fn test_login_as_other_user_swaps_shop() {
        let storage = Arc::new(MemoryStore::new());
        let mut storefront = open(&storage);
        storefront.login("jane@example.com", "password123").unwrap();
        storefront.shop_mut().add_to_cart(mug());

        storefront.login("someone@example.com", "whatever").unwrap();
        assert_eq!(storefront.shop().cart_items_count(), 0);

        storefront.login("jane@example.com", "password123").unwrap();
        assert_eq!(storefront.shop().cart_items_count(), 1);
    }
}
