//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod identity;
pub mod price;
pub mod product;
pub mod shop;

pub use email::{Email, EmailError};
pub use id::*;
pub use identity::{Identity, UserId};
pub use price::format_price;
pub use product::Product;
pub use shop::{CartItem, ShopState};
