//! Integration tests for Shopfront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! Tests start the storefront router on an ephemeral port and talk to it
//! over HTTP with `reqwest`. Collaborator endpoints are served by a small
//! axum app started the same way, so no external service is needed.
//!
//! # Test Categories
//!
//! - `storefront_api` - auth, cart, wishlist, catalog and chat endpoints
//! - `collaborator` - recommendations and search through the mock collaborator
//! - `persistence` - file-backed state surviving restarts

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use reqwest::Client;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use uuid::Uuid;

use shopfront_storefront::config::StorefrontConfig;
use shopfront_storefront::routes;
use shopfront_storefront::state::AppState;
use shopfront_storefront::storage::{FileStore, KeyValueStore};

/// A unique directory under the system temp dir, removed on drop.
pub struct TempDataDir {
    path: PathBuf,
}

impl TempDataDir {
    #[must_use]
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!("shopfront-it-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&path).expect("Failed to create temp data dir");
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a file store rooted at this directory.
    #[must_use]
    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        Arc::new(FileStore::open(&self.path).expect("Failed to open file store"))
    }
}

impl Default for TempDataDir {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TempDataDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// Configuration for tests: no chat delay and the given collaborator.
#[must_use]
pub fn test_config(data_dir: &Path, collaborator_url: &str) -> StorefrontConfig {
    let vars: HashMap<&str, String> = HashMap::from([
        ("STOREFRONT_DATA_DIR", data_dir.display().to_string()),
        ("STOREFRONT_CHAT_DELAY_MS", "0".to_string()),
        ("COLLABORATOR_BASE_URL", collaborator_url.to_string()),
        ("COLLABORATOR_TIMEOUT_SECS", "2".to_string()),
    ]);
    StorefrontConfig::from_lookup(|key| vars.get(key).cloned()).expect("Invalid test config")
}

/// A server bound to an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Serve `app` on `127.0.0.1:0`.
    pub async fn start(app: Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });
        Self { addr, handle }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A running storefront and a client for it.
pub struct TestApp {
    pub server: TestServer,
    pub client: Client,
    pub state: AppState,
}

impl TestApp {
    /// Start the storefront over `storage` with the bundled catalog and demo roster.
    pub async fn spawn(config: StorefrontConfig, storage: Arc<dyn KeyValueStore>) -> Self {
        let roster = config.load_roster().expect("Failed to load roster");
        let catalog = config.load_catalog().expect("Failed to load catalog");
        let state =
            AppState::new(config, storage, roster, catalog).expect("Failed to build app state");
        let server = TestServer::start(routes::app(state.clone())).await;

        Self {
            server,
            client: Client::new(),
            state,
        }
    }

    /// Start the storefront over a fresh directory with an unreachable collaborator.
    pub async fn spawn_in(dir: &TempDataDir) -> Self {
        Self::spawn(test_config(dir.path(), "http://127.0.0.1:9"), dir.store()).await
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        self.server.url(path)
    }

    /// GET `path`, returning status and JSON body.
    pub async fn get(&self, path: &str) -> (u16, Value) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Request failed");
        into_parts(resp).await
    }

    /// POST a JSON body to `path`.
    pub async fn post(&self, path: &str, body: &Value) -> (u16, Value) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Request failed");
        into_parts(resp).await
    }

    /// PATCH a JSON body to `path`.
    pub async fn patch(&self, path: &str, body: &Value) -> (u16, Value) {
        let resp = self
            .client
            .patch(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Request failed");
        into_parts(resp).await
    }

    /// DELETE `path`.
    pub async fn delete(&self, path: &str) -> (u16, Value) {
        let resp = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("Request failed");
        into_parts(resp).await
    }

    /// Log in, asserting success.
    pub async fn login(&self, email: &str, password: &str) -> Value {
        let (status, body) = self
            .post(
                "/api/auth/login",
                &serde_json::json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(status, 200, "login failed: {body}");
        body
    }
}

async fn into_parts(resp: reqwest::Response) -> (u16, Value) {
    let status = resp.status().as_u16();
    let text = resp.text().await.expect("Failed to read body");
    let body = if text.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).unwrap_or(Value::String(text))
    };
    (status, body)
}
