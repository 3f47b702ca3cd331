//! Shop store: cart and wishlist of the current identity.
//!
//! The store is either *unloaded* (no identity, empty working state, nothing
//! persisted) or *loaded* for exactly one identity (state hydrated from that
//! identity's `shop_data_<id>` record, every mutation re-saved there).
//!
//! The store never looks up the identity itself; the owner hands identity
//! changes to [`ShopStore::sync_identity`]. A save only ever targets the
//! identity whose record has already been loaded, so an empty default state
//! can never overwrite a saved one.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::instrument;

use shopfront_core::{Identity, Product, ProductId, ShopState, UserId};

use crate::storage::{KeyValueStore, keys, load_json, save_json};

pub struct ShopStore {
    storage: Arc<dyn KeyValueStore>,
    state: ShopState,
    /// Identity whose record has been loaded into `state`.
    loaded_for: Option<UserId>,
}

impl ShopStore {
    /// Create an unloaded store.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            state: ShopState::default(),
            loaded_for: None,
        }
    }

    /// React to the current identity changing.
    ///
    /// - `None`: clear working state, keep the persisted record
    /// - a different identity: load its record (or start empty)
    /// - the already-loaded identity: nothing to do
    #[instrument(skip_all, fields(user_id = identity.map(|i| i.id.as_str())))]
    pub fn sync_identity(&mut self, identity: Option<&Identity>) {
        match identity {
            None => {
                self.loaded_for = None;
                self.state = ShopState::default();
            }
            Some(identity) if self.loaded_for.as_ref() == Some(&identity.id) => {}
            Some(identity) => {
                self.loaded_for = None;
                self.state = load_json::<ShopState>(
                    self.storage.as_ref(),
                    &keys::shop_data(&identity.id),
                )
                .map(ShopState::normalized)
                .unwrap_or_default();
                tracing::debug!(
                    cart_lines = self.state.cart.len(),
                    wishlist = self.state.wishlist.len(),
                    "Loaded shop data"
                );
                self.loaded_for = Some(identity.id.clone());
            }
        }
    }

    /// Whether state has been loaded for an identity.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded_for.is_some()
    }

    /// Identity the state belongs to.
    #[must_use]
    pub const fn loaded_for(&self) -> Option<&UserId> {
        self.loaded_for.as_ref()
    }

    #[must_use]
    pub const fn state(&self) -> &ShopState {
        &self.state
    }

    pub fn add_to_cart(&mut self, product: Product) {
        self.mutate(|state| state.add_to_cart(product));
    }

    pub fn remove_from_cart(&mut self, id: ProductId) {
        self.mutate(|state| state.remove_from_cart(id));
    }

    /// Set a line's quantity; `quantity <= 0` removes the line.
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) {
        self.mutate(|state| state.update_quantity(id, quantity));
    }

    pub fn clear_cart(&mut self) {
        self.mutate(ShopState::clear_cart);
    }

    pub fn add_to_wishlist(&mut self, product: Product) {
        self.mutate(|state| state.add_to_wishlist(product));
    }

    pub fn remove_from_wishlist(&mut self, id: ProductId) {
        self.mutate(|state| state.remove_from_wishlist(id));
    }

    #[must_use]
    pub fn cart_total(&self) -> Decimal {
        self.state.cart_total()
    }

    #[must_use]
    pub fn cart_items_count(&self) -> u64 {
        self.state.cart_items_count()
    }

    #[must_use]
    pub fn is_in_wishlist(&self, id: ProductId) -> bool {
        self.state.is_in_wishlist(id)
    }

    fn mutate(&mut self, apply: impl FnOnce(&mut ShopState)) {
        apply(&mut self.state);
        self.persist();
    }

    /// Write the whole state to the loaded identity's record.
    fn persist(&self) {
        let Some(user_id) = &self.loaded_for else {
            return;
        };
        if let Err(e) = save_json(
            self.storage.as_ref(),
            &keys::shop_data(user_id),
            &self.state,
        ) {
            tracing::warn!(user_id = %user_id, error = %e, "Failed to persist shop data");
        }
    }
}
