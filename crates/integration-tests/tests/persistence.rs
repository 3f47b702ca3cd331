//! Integration tests for state surviving restarts of the file-backed store.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::json;
use shopfront_core::{ProductId, ShopState, UserId};
use shopfront_integration_tests::{TempDataDir, TestApp};
use shopfront_storefront::catalog::Catalog;
use shopfront_storefront::services::{Roster, Storefront, UnknownEmailPolicy};
use shopfront_storefront::storage::{FileStore, KeyValueStore, keys, load_json, save_json};

fn open(dir: &TempDataDir) -> Storefront {
    Storefront::open(dir.store(), Roster::demo(), UnknownEmailPolicy::Accept)
}

fn catalog() -> Catalog {
    Catalog::builtin().expect("bundled catalog")
}

#[test]
fn test_session_and_shop_survive_reopen() {
    let dir = TempDataDir::new();
    let catalog = catalog();
    let tee = catalog.get(ProductId::new(1)).cloned().expect("product 1");
    let mat = catalog.get(ProductId::new(12)).cloned().expect("product 12");

    {
        let mut storefront = open(&dir);
        storefront.login("demo@example.com", "demo123").expect("login");
        storefront.shop_mut().add_to_cart(tee.clone());
        storefront.shop_mut().add_to_cart(tee);
        storefront.shop_mut().add_to_wishlist(mat);
    }

    let storefront = open(&dir);
    assert_eq!(storefront.identity().map(|i| i.id.as_str()), Some("1"));
    assert_eq!(storefront.shop().cart_items_count(), 2);
    assert_eq!(storefront.shop().cart_total(), Decimal::new(4998, 2));
    assert!(storefront.shop().is_in_wishlist(ProductId::new(12)));
}

#[test]
fn test_record_layout_on_disk() {
    let dir = TempDataDir::new();
    let mut storefront = open(&dir);
    storefront.login("jane@example.com", "password123").expect("login");
    storefront
        .shop_mut()
        .add_to_cart(catalog().get(ProductId::new(4)).cloned().expect("product 4"));

    assert!(dir.path().join("currentUser.json").is_file());
    assert!(dir.path().join("shop_data_2.json").is_file());

    let store = FileStore::open(dir.path()).expect("open store");
    let state: ShopState =
        load_json(&store, &keys::shop_data(&UserId::new("2"))).expect("shop record");
    assert_eq!(state.cart.len(), 1);
    assert_eq!(state.cart.first().map(|item| item.quantity), Some(1));
}

#[test]
fn test_logout_keeps_shop_record_on_disk() {
    let dir = TempDataDir::new();
    {
        let mut storefront = open(&dir);
        storefront.login("jane@example.com", "password123").expect("login");
        storefront
            .shop_mut()
            .add_to_wishlist(catalog().get(ProductId::new(6)).cloned().expect("product 6"));
        storefront.logout();
    }

    assert!(!dir.path().join("currentUser.json").exists());
    assert!(dir.path().join("shop_data_2.json").is_file());

    let mut storefront = open(&dir);
    assert!(storefront.identity().is_none());
    storefront.login("jane@example.com", "password123").expect("login");
    assert!(storefront.shop().is_in_wishlist(ProductId::new(6)));
}

#[test]
fn test_corrupt_records_are_ignored() {
    let dir = TempDataDir::new();
    let store = dir.store();
    store.set(keys::CURRENT_USER, "not json").expect("write");
    store
        .set(&keys::shop_data(&UserId::new("1")), "{\"cart\": 5}")
        .expect("write");

    let mut storefront = open(&dir);
    assert!(storefront.identity().is_none());

    storefront.login("demo@example.com", "demo123").expect("login");
    assert_eq!(storefront.shop().cart_items_count(), 0);
    assert!(storefront.shop().is_loaded());
}

#[tokio::test]
async fn test_server_restart_restores_cart() {
    let dir = TempDataDir::new();

    {
        let app = TestApp::spawn_in(&dir).await;
        app.login("demo@example.com", "demo123").await;
        app.post("/api/cart/items", &json!({ "product_id": 3 })).await;
        app.patch("/api/cart/items/3", &json!({ "quantity": 2 })).await;
    }

    let app = TestApp::spawn_in(&dir).await;
    let (_, me) = app.get("/api/auth/me").await;
    assert_eq!(me["identity"]["id"], "1");

    let (_, cart) = app.get("/api/cart").await;
    assert_eq!(cart["item_count"], 2);
    assert_eq!(cart["total_display"], "$179.98");
}

#[test]
fn test_stores_share_one_directory() {
    let dir = TempDataDir::new();
    let first: Arc<dyn KeyValueStore> = dir.store();
    let second: Arc<dyn KeyValueStore> = dir.store();

    first.set("greeting", "\"hello\"").expect("write");
    assert_eq!(
        second.get("greeting").expect("read").as_deref(),
        Some("\"hello\"")
    );

    second.remove("greeting").expect("remove");
    assert!(first.get("greeting").expect("read").is_none());
}

#[test]
fn test_shop_records_of_similar_ids_stay_apart() {
    let dir = TempDataDir::new();
    let store = FileStore::open(dir.path()).expect("open store");
    let mut dotted = ShopState::default();
    dotted.add_to_wishlist(catalog().get(ProductId::new(2)).cloned().expect("product 2"));

    save_json(&store, &keys::shop_data(&UserId::new("ops.lead")), &dotted).expect("write");

    let other: Option<ShopState> = load_json(&store, &keys::shop_data(&UserId::new("ops_lead")));
    assert!(other.is_none());
    let own: Option<ShopState> = load_json(&store, &keys::shop_data(&UserId::new("ops.lead")));
    assert_eq!(own, Some(dotted));
}
