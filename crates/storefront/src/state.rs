//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use shopfront_core::Product;

use crate::catalog::Catalog;
use crate::collaborator::{CollaboratorClient, CollaboratorError, Recommendations, SequencedSlot};
use crate::config::StorefrontConfig;
use crate::services::{ChatResponder, Roster, Storefront};
use crate::storage::KeyValueStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The server fronts a single
/// client session, so session and shop state live behind one mutex.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    storefront: Mutex<Storefront>,
    catalog: Catalog,
    chat: ChatResponder,
    collaborator: CollaboratorClient,
    recommendations: SequencedSlot<Recommendations>,
    search_results: SequencedSlot<Vec<Product>>,
}

impl AppState {
    /// Create a new application state, restoring any persisted session.
    ///
    /// # Errors
    ///
    /// Returns an error if the collaborator HTTP client cannot be built.
    pub fn new(
        config: StorefrontConfig,
        storage: Arc<dyn KeyValueStore>,
        roster: Roster,
        catalog: Catalog,
    ) -> Result<Self, CollaboratorError> {
        let collaborator = CollaboratorClient::new(&config.collaborator)?;
        let storefront = Storefront::open(storage, roster, config.unknown_email_policy);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                storefront: Mutex::new(storefront),
                catalog,
                chat: ChatResponder::new(),
                collaborator,
                recommendations: SequencedSlot::new(),
                search_results: SequencedSlot::new(),
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Session and shop state.
    #[must_use]
    pub fn storefront(&self) -> &Mutex<Storefront> {
        &self.inner.storefront
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn chat(&self) -> &ChatResponder {
        &self.inner.chat
    }

    /// Recommendation/search API client.
    #[must_use]
    pub fn collaborator(&self) -> &CollaboratorClient {
        &self.inner.collaborator
    }

    /// Latest accepted recommendations.
    #[must_use]
    pub fn recommendations(&self) -> &SequencedSlot<Recommendations> {
        &self.inner.recommendations
    }

    /// Latest accepted collaborator search results.
    #[must_use]
    pub fn search_results(&self) -> &SequencedSlot<Vec<Product>> {
        &self.inner.search_results
    }
}
