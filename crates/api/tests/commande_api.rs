//! End-to-end order flows against a real database.

mod common;

use std::str::FromStr;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, delete_auth, expect_error, get, get_auth, post_json,
    post_json_auth, put_json_auth, token_for,
};
use restau_core::catalog::ProductType;
use restau_core::snapshot::{CatalogProduct, ProductSnapshot};
use restau_core::types::{DbId, Money};
use restau_db::models::menu::CreateMenu;
use restau_db::models::product::{CreateProduct, UpdateProduct};
use restau_db::repositories::{MenuRepo, ProductRepo};
use serde_json::json;
use sqlx::PgPool;

struct Catalog {
    menu_id: DbId,
    burger_id: DbId,
    tiramisu_id: DbId,
}

async fn seed_catalog(pool: &PgPool) -> Catalog {
    let burger = ProductRepo::create(
        pool,
        &CreateProduct {
            name: "Burger".into(),
            price: Money::from_str("12.00").unwrap(),
            is_available: None,
            description: Some("Boeuf, cheddar".into()),
            image_url: None,
            product_type: ProductType::Plat,
        },
    )
    .await
    .unwrap();
    let tiramisu = ProductRepo::create(
        pool,
        &CreateProduct {
            name: "Tiramisu".into(),
            price: Money::from_str("6.00").unwrap(),
            is_available: Some(false),
            description: None,
            image_url: None,
            product_type: ProductType::Dessert,
        },
    )
    .await
    .unwrap();

    let item = ProductSnapshot::from(&CatalogProduct::try_from(burger.clone()).unwrap());
    let menu = MenuRepo::create(
        pool,
        &CreateMenu {
            name: "Menu estival".into(),
            price: Money::from_str("21.50").unwrap(),
            description: None,
            image_url: None,
            items: vec![burger.id],
        },
        &[item],
    )
    .await
    .unwrap();

    Catalog {
        menu_id: menu.menu.id,
        burger_id: burger.id,
        tiramisu_id: tiramisu.id,
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn order_lifecycle_across_roles(pool: PgPool) {
    let catalog = seed_catalog(&pool).await;
    let receiver = token_for(10, "receiver");
    let preparer = token_for(11, "preparer");
    let admin = token_for(12, "admin");

    // Create: snapshots copied, status pending, price computed from the lines.
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/commandes",
        json!({ "menus": [catalog.menu_id], "products": [catalog.tiramisu_id], "price": "1.00" }),
        &receiver,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["status"], "pending");
    assert_eq!(created["price"], "27.50");
    assert_eq!(created["menus"][0]["name"], "Menu estival");
    assert_eq!(created["products"][0]["type"], "dessert");

    // Catalog edits do not leak into the order.
    ProductRepo::update(
        &pool,
        catalog.tiramisu_id,
        &UpdateProduct {
            price: Some(Money::from_str("9.00").unwrap()),
            ..UpdateProduct::default()
        },
    )
    .await
    .unwrap();
    let fetched = body_json(
        get_auth(build_test_app(pool.clone()), &format!("/api/commandes/{id}"), &receiver).await,
    )
    .await;
    assert_eq!(fetched["products"][0]["price"], "6.00");

    // Preparer may not move an order back to pending.
    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/commandes/preparer/{id}"),
        json!({ "status": "pending", "menus": [catalog.menu_id] }),
        &preparer,
    )
    .await;
    expect_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;

    // Preparer marks it ready; the line set is replaced wholesale.
    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/commandes/preparer/{id}"),
        json!({ "status": "ready", "products": [catalog.burger_id] }),
        &preparer,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["status"], "ready");
    assert_eq!(updated["menus"].as_array().unwrap().len(), 0);
    assert_eq!(updated["products"].as_array().unwrap().len(), 1);
    assert_eq!(updated["price"], "12.00");

    // Admin through the preparer endpoint is held to the preparer's statuses.
    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/commandes/preparer/{id}"),
        json!({ "status": "delivered", "products": [catalog.burger_id] }),
        &admin,
    )
    .await;
    expect_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;

    // Receiver delivers.
    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/commandes/receiver/{id}"),
        json!({ "status": "delivered", "products": [catalog.burger_id] }),
        &receiver,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Admin deletes; the order disappears from reads.
    let response = delete_auth(
        build_test_app(pool.clone()),
        &format!("/api/commandes/{id}"),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(
        build_test_app(pool.clone()),
        &format!("/api/commandes/{id}"),
        &admin,
    )
    .await;
    expect_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;

    let response = delete_auth(build_test_app(pool), &format!("/api/commandes/{id}"), &admin).await;
    expect_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_reference_creates_nothing(pool: PgPool) {
    let catalog = seed_catalog(&pool).await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/commandes",
        json!({ "menus": [catalog.menu_id, 9999] }),
        &token_for(10, "receiver"),
    )
    .await;
    let json = expect_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
    assert!(json["error"].as_str().unwrap().contains("menu"));

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM commandes")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn order_total_beyond_price_column_is_a_validation_error(pool: PgPool) {
    let mut ids = Vec::new();
    for name in ["Truffe blanche", "Caviar"] {
        let product = ProductRepo::create(
            &pool,
            &CreateProduct {
                name: name.into(),
                price: Money::from_str("99999999.99").unwrap(),
                is_available: None,
                description: None,
                image_url: None,
                product_type: ProductType::Entree,
            },
        )
        .await
        .unwrap();
        ids.push(product.id);
    }

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/commandes",
        json!({ "products": ids }),
        &token_for(10, "receiver"),
    )
    .await;
    expect_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM commandes")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn menu_creation_requires_available_products(pool: PgPool) {
    let catalog = seed_catalog(&pool).await;
    let admin = token_for(12, "admin");

    let body = json!({
        "name": "Menu gourmand",
        "price": "18.00",
        "items": [catalog.burger_id, catalog.tiramisu_id],
    });
    let response = post_json_auth(build_test_app(pool.clone()), "/api/menus", body, &admin).await;
    expect_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;

    let body = json!({ "name": "Menu solo", "price": "12.00", "items": [catalog.burger_id] });
    let response = post_json_auth(build_test_app(pool.clone()), "/api/menus", body, &admin).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Menu listing is public.
    let response = get(build_test_app(pool), "/api/menus").await;
    assert_eq!(response.status(), StatusCode::OK);
    let menus = body_json(response).await;
    assert_eq!(menus.as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_then_login(pool: PgPool) {
    let body = json!({
        "email": " Chef@Restau.test ",
        "password": "mise-en-place",
        "role": "preparer",
        "description": "Cuisine",
    });
    let response = post_json(build_test_app(pool.clone()), "/auth/register", body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let user = body_json(response).await;
    assert_eq!(user["email"], "chef@restau.test");
    assert!(user.get("password_hash").is_none());

    let response = post_json(build_test_app(pool.clone()), "/auth/register", body).await;
    expect_error(response, StatusCode::CONFLICT, "CONFLICT").await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/auth/login",
        json!({ "email": "chef@restau.test", "password": "wrong-password" }),
    )
    .await;
    expect_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;

    let response = post_json(
        build_test_app(pool.clone()),
        "/auth/login",
        json!({ "email": "CHEF@restau.test", "password": "mise-en-place" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let login = body_json(response).await;
    assert_eq!(login["token_type"], "Bearer");
    assert_eq!(login["expires_in"], 7200);
    assert_eq!(login["user"]["role"], "preparer");

    let token = login["token"].as_str().unwrap();
    let response = get_auth(build_test_app(pool), "/api/products", token).await;
    assert_eq!(response.status(), StatusCode::OK);
}
