//! CLI command implementations.
//!
//! # Commands
//!
//! - `auth` - login, register, logout, whoami
//! - `shop` - cart and wishlist
//! - `catalog` - local product filter
//! - `assistant` - chat, recommendations and collaborator search

pub mod assistant;
pub mod auth;
pub mod catalog;
pub mod shop;

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use shopfront_core::{Product, ProductId, format_price};
use shopfront_storefront::catalog::Catalog;
use shopfront_storefront::collaborator::CollaboratorError;
use shopfront_storefront::config::{ConfigError, StorefrontConfig};
use shopfront_storefront::services::{AuthError, Storefront};
use shopfront_storefront::storage::{FileStore, StorageError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Auth(#[from] AuthError),

    #[error("Recommendation service error: {0}")]
    Collaborator(#[from] CollaboratorError),

    #[error("No product with id {0}")]
    UnknownProduct(ProductId),
}

/// Everything a command needs: configuration, the restored storefront and
/// the catalog products are resolved against.
pub struct Context {
    pub config: StorefrontConfig,
    pub storefront: Storefront,
    pub catalog: Catalog,
}

impl Context {
    /// Load configuration and restore the persisted session.
    ///
    /// # Errors
    ///
    /// Returns `CliError` if configuration, the data directory, the roster or
    /// the catalog cannot be loaded.
    pub fn open(data_dir: Option<PathBuf>) -> Result<Self, CliError> {
        let mut config = StorefrontConfig::from_env()?;
        if let Some(dir) = data_dir {
            config.data_dir = dir;
        }

        let storage = FileStore::open(&config.data_dir)?;
        let roster = config.load_roster()?;
        let catalog = config.load_catalog()?;
        let storefront =
            Storefront::open(Arc::new(storage), roster, config.unknown_email_policy);

        Ok(Self {
            config,
            storefront,
            catalog,
        })
    }

    /// Resolve a product id against the catalog.
    ///
    /// # Errors
    ///
    /// Returns `CliError::UnknownProduct` for ids not in the catalog.
    pub fn product(&self, id: ProductId) -> Result<Product, CliError> {
        self.catalog
            .get(id)
            .cloned()
            .ok_or(CliError::UnknownProduct(id))
    }
}

/// One product as a listing row.
pub fn product_row(product: &Product) -> String {
    let sale = if product.is_on_sale() { " (sale)" } else { "" };
    format!(
        "{:>4}  {:<32} {:>10}{sale}  [{}]",
        product.id,
        product.name,
        format_price(product.price),
        product.category
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_product_row() {
        let product = Product::new(ProductId::new(7), "Desk Lamp", Decimal::new(4999, 2), "home");
        let row = product_row(&product);
        assert!(row.contains("Desk Lamp"));
        assert!(row.contains("$49.99"));
        assert!(row.ends_with("[home]"));
        assert!(!row.contains("(sale)"));
    }
}
