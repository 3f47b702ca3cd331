//! Cart and wishlist state.
//!
//! [`ShopState`] is the pure reducer behind the shop store: every operation
//! keeps the invariants below and none of them can fail.
//!
//! - at most one [`CartItem`] per product id, always with `quantity >= 1`
//! - at most one wishlist entry per product id
//! - insertion order is preserved in both lists

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::product::Product;

/// A product in the cart together with how many of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    /// Product id of this line.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// Price × quantity, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product
            .price
            .checked_mul(Decimal::from(self.quantity))
            .unwrap_or(Decimal::MAX)
    }
}

/// Cart and wishlist of one identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopState {
    #[serde(default)]
    pub cart: Vec<CartItem>,
    #[serde(default)]
    pub wishlist: Vec<Product>,
}

impl ShopState {
    /// Add one unit of `product`, merging with an existing line.
    pub fn add_to_cart(&mut self, product: Product) {
        match self.cart.iter_mut().find(|item| item.id() == product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => self.cart.push(CartItem {
                product,
                quantity: 1,
            }),
        }
    }

    /// Remove the line for `id`, if any.
    pub fn remove_from_cart(&mut self, id: ProductId) {
        self.cart.retain(|item| item.id() != id);
    }

    /// Set the quantity of the line for `id`. Non-positive quantities remove
    /// the line; quantities beyond `u32::MAX` saturate. Unknown ids are ignored.
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_from_cart(id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(item) = self.cart.iter_mut().find(|item| item.id() == id) {
            item.quantity = quantity;
        }
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// Add `product` to the wishlist unless it is already there.
    pub fn add_to_wishlist(&mut self, product: Product) {
        if !self.is_in_wishlist(product.id) {
            self.wishlist.push(product);
        }
    }

    pub fn remove_from_wishlist(&mut self, id: ProductId) {
        self.wishlist.retain(|product| product.id != id);
    }

    #[must_use]
    pub fn is_in_wishlist(&self, id: ProductId) -> bool {
        self.wishlist.iter().any(|product| product.id == id)
    }

    /// Σ price × quantity over the cart, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn cart_total(&self) -> Decimal {
        self.cart
            .iter()
            .map(CartItem::line_total)
            .try_fold(Decimal::ZERO, Decimal::checked_add)
            .unwrap_or(Decimal::MAX)
    }

    /// Σ quantity over the cart.
    #[must_use]
    pub fn cart_items_count(&self) -> u64 {
        self.cart.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Drop entries that violate the invariants (zero quantities, duplicate
    /// ids). Used on state read back from storage, which may have been
    /// written by another tool.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        let mut seen = Vec::with_capacity(self.cart.len());
        self.cart.retain(|item| {
            if item.quantity == 0 || seen.contains(&item.id()) {
                return false;
            }
            seen.push(item.id());
            true
        });

        let mut seen = Vec::with_capacity(self.wishlist.len());
        self.wishlist.retain(|product| {
            if seen.contains(&product.id) {
                return false;
            }
            seen.push(product.id);
            true
        });
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn product(id: i32, price: Decimal) -> Product {
        Product::new(ProductId::new(id), format!("Product {id}"), price, "misc")
    }

    #[test]
    fn test_repeated_add_merges_into_one_line() {
        let mut state = ShopState::default();
        for _ in 0..5 {
            state.add_to_cart(product(1, Decimal::from(3)));
        }

        assert_eq!(state.cart.len(), 1);
        assert_eq!(state.cart[0].quantity, 5);
        assert_eq!(state.cart_items_count(), 5);
    }

    #[test]
    fn test_cart_total_is_exact() {
        let mut state = ShopState::default();
        state.add_to_cart(product(1, Decimal::from(10)));
        state.add_to_cart(product(1, Decimal::from(10)));
        state.add_to_cart(product(2, Decimal::from(5)));

        assert_eq!(state.cart_total(), Decimal::from(25));

        let mut cents = ShopState::default();
        for _ in 0..3 {
            cents.add_to_cart(product(9, Decimal::new(10, 2)));
        }
        assert_eq!(cents.cart_total(), Decimal::new(30, 2));
    }

    #[test]
    fn test_cart_total_saturates_instead_of_overflowing() {
        let mut state = ShopState::default();
        state.add_to_cart(product(1, Decimal::from_i128_with_scale(10_i128.pow(20), 0)));
        state.update_quantity(ProductId::new(1), 10_000_000_000);
        assert_eq!(state.cart[0].line_total(), Decimal::MAX);
        assert_eq!(state.cart_total(), Decimal::MAX);

        let mut two_lines = ShopState::default();
        two_lines.add_to_cart(product(1, Decimal::MAX));
        two_lines.add_to_cart(product(2, Decimal::ONE));
        assert_eq!(two_lines.cart_total(), Decimal::MAX);
    }

    #[test]
    fn test_remove_from_cart_excludes_id_from_count() {
        let mut state = ShopState::default();
        state.add_to_cart(product(1, Decimal::ONE));
        state.add_to_cart(product(2, Decimal::ONE));
        state.add_to_cart(product(2, Decimal::ONE));

        state.remove_from_cart(ProductId::new(2));
        assert_eq!(state.cart_items_count(), 1);

        state.remove_from_cart(ProductId::new(42));
        assert_eq!(state.cart_items_count(), 1);
    }

    #[test]
    fn test_update_quantity_zero_equals_remove() {
        let mut updated = ShopState::default();
        updated.add_to_cart(product(1, Decimal::ONE));
        updated.add_to_cart(product(2, Decimal::ONE));
        let mut removed = updated.clone();

        updated.update_quantity(ProductId::new(1), 0);
        removed.remove_from_cart(ProductId::new(1));
        assert_eq!(updated, removed);

        updated.update_quantity(ProductId::new(2), -4);
        assert!(updated.cart.is_empty());
    }

    #[test]
    fn test_update_quantity_sets_and_saturates() {
        let mut state = ShopState::default();
        state.add_to_cart(product(1, Decimal::ONE));

        state.update_quantity(ProductId::new(1), 7);
        assert_eq!(state.cart[0].quantity, 7);

        state.update_quantity(ProductId::new(1), i64::MAX);
        assert_eq!(state.cart[0].quantity, u32::MAX);

        state.update_quantity(ProductId::new(99), 3);
        assert_eq!(state.cart.len(), 1);
    }

    #[test]
    fn test_clear_cart_keeps_wishlist() {
        let mut state = ShopState::default();
        state.add_to_cart(product(1, Decimal::ONE));
        state.add_to_wishlist(product(2, Decimal::ONE));

        state.clear_cart();
        assert!(state.cart.is_empty());
        assert!(state.is_in_wishlist(ProductId::new(2)));
    }

    #[test]
    fn test_wishlist_add_is_idempotent() {
        let mut state = ShopState::default();
        state.add_to_wishlist(product(4, Decimal::ONE));
        state.add_to_wishlist(product(4, Decimal::ONE));

        assert_eq!(state.wishlist.len(), 1);
        assert!(state.is_in_wishlist(ProductId::new(4)));

        state.remove_from_wishlist(ProductId::new(4));
        assert!(!state.is_in_wishlist(ProductId::new(4)));
    }

    #[test]
    fn test_cart_item_json_is_flat() {
        let item = CartItem {
            product: product(5, Decimal::new(1250, 2)),
            quantity: 2,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], 5);
        assert_eq!(json["quantity"], 2);

        let back: CartItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_normalized_drops_invalid_entries() {
        let json = serde_json::json!({
            "cart": [
                {"id": 1, "name": "A", "price": "2", "image": "", "category": "x", "quantity": 0},
                {"id": 2, "name": "B", "price": "3", "image": "", "category": "x", "quantity": 1},
                {"id": 2, "name": "B", "price": "3", "image": "", "category": "x", "quantity": 4}
            ],
            "wishlist": [
                {"id": 7, "name": "C", "price": "1", "image": "", "category": "x"},
                {"id": 7, "name": "C", "price": "1", "image": "", "category": "x"}
            ]
        });
        let state: ShopState = serde_json::from_value(json).unwrap();
        let state = state.normalized();

        assert_eq!(state.cart.len(), 1);
        assert_eq!(state.cart[0].quantity, 1);
        assert_eq!(state.wishlist.len(), 1);
    }
}
