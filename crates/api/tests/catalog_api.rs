//! HTTP-level integration tests for categories and menu items.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get, get_auth, patch_json_auth, post_json, post_json_auth,
    put_json_auth,
};
use lemon_db::repositories::CategoryRepo;
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_categories_require_authentication(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/categories").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_customer_can_list_but_not_create_categories(pool: PgPool) {
    common::create_category(&pool, "Starters").await;
    let user = common::customer(&pool, "cathy").await;

    let response = get_auth(common::build_test_app(pool.clone()), "/api/v1/categories", &user.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["title"], "Starters");

    let id = json[0]["id"].as_i64().unwrap();
    let response = get_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/categories/{id}"),
        &user.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/categories",
        &user.token,
        json!({"title": "Desserts"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_forbidden_category_write_ignores_body(pool: PgPool) {
    let user = common::customer(&pool, "cora").await;

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/categories",
        &user.token,
        json!({"title": 42}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_malformed_menu_query_is_json_400(pool: PgPool) {
    for uri in ["/api/v1/menu-items?featured=maybe", "/api/v1/menu-items?price=abc"] {
        let response = get(common::build_test_app(pool.clone()), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        let json = body_json(response).await;
        assert_eq!(json["code"], "BAD_REQUEST", "{uri}");
        assert!(json["error"].is_string());
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_manager_category_crud(pool: PgPool) {
    let boss = common::manager(&pool, "boss").await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/categories",
        &boss.token,
        json!({"title": "Main Course"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["title"], "Main Course");
    assert!(created.get("slug").is_none(), "slug is not part of the representation");

    let stored = CategoryRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(stored.slug, "main-course");

    let response = patch_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/categories/{id}"),
        &boss.token,
        json!({"title": "Mains"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["title"], "Mains");

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/categories/{id}"),
        &boss.token,
        json!({"title": "Entrees"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let stored = CategoryRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(stored.slug, "entrees");

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/categories/{id}"),
        &boss.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(
        common::build_test_app(pool),
        &format!("/api/v1/categories/{id}"),
        &boss.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_empty_category_title_is_400(pool: PgPool) {
    let boss = common::manager(&pool, "boss").await;

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/categories",
        &boss.token,
        json!({"title": ""}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_referenced_category_cannot_be_deleted(pool: PgPool) {
    let category = common::create_category(&pool, "Drinks").await;
    common::create_menu_item(&pool, "Lemonade", "2.50", category).await;
    let boss = common::manager(&pool, "boss").await;

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/categories/{category}"),
        &boss.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(CategoryRepo::find_by_id(&pool, category).await.unwrap().is_some());
}

// ---------------------------------------------------------------------------
// Menu items
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_menu_is_public(pool: PgPool) {
    let category = common::create_category(&pool, "Desserts").await;
    let item = common::create_menu_item(&pool, "Lemon Tart", "6.50", category).await;

    let response = get(common::build_test_app(pool.clone()), "/api/v1/menu-items").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json[0]["title"], "Lemon Tart");
    assert_eq!(json[0]["price"], "6.50");
    assert_eq!(json[0]["featured"], false);
    assert_eq!(json[0]["category_title"], "Desserts");
    assert!(json[0].get("category").is_none(), "category id is write-only");

    let response = get(common::build_test_app(pool), &format!("/api/v1/menu-items/{item}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["id"], item);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_menu_search_filter_and_ordering(pool: PgPool) {
    let mains = common::create_category(&pool, "Mains").await;
    let desserts = common::create_category(&pool, "Desserts").await;
    common::create_menu_item(&pool, "Greek Salad", "12.00", mains).await;
    common::create_menu_item(&pool, "Bruschetta", "7.50", mains).await;
    common::create_menu_item(&pool, "Lemon Cake", "5.00", desserts).await;

    // Search covers the category title too.
    let response = get(common::build_test_app(pool.clone()), "/api/v1/menu-items?search=dessert").await;
    let json = body_json(response).await;
    let titles: Vec<_> = json.as_array().unwrap().iter().map(|i| i["title"].clone()).collect();
    assert_eq!(titles, vec![json!("Lemon Cake")]);

    let response = get(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/menu-items?category={mains}&ordering=-price"),
    )
    .await;
    let json = body_json(response).await;
    let titles: Vec<_> = json.as_array().unwrap().iter().map(|i| i["title"].clone()).collect();
    assert_eq!(titles, vec![json!("Greek Salad"), json!("Bruschetta")]);

    let response = get(common::build_test_app(pool.clone()), "/api/v1/menu-items?price=7.50").await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["title"], "Bruschetta");

    let response = get(common::build_test_app(pool), "/api/v1/menu-items?ordering=title&limit=1&offset=1").await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["title"], "Greek Salad");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_manager_creates_and_patches_menu_item(pool: PgPool) {
    let category = common::create_category(&pool, "Mains").await;
    let boss = common::manager(&pool, "boss").await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/menu-items",
        &boss.token,
        json!({"title": "Pasta", "price": "9.99", "category": category}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["category_title"], "Mains");

    let response = patch_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/menu-items/{id}"),
        &boss.token,
        json!({"featured": true, "price": 11}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["featured"], true);
    assert_eq!(json["price"], "11.00");
    assert_eq!(json["title"], "Pasta");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_menu_item_write_validation(pool: PgPool) {
    let category = common::create_category(&pool, "Mains").await;
    let boss = common::manager(&pool, "boss").await;

    for body in [
        json!({"title": "Ghost", "price": "1.00", "category": 999_999}),
        json!({"title": "Cheap", "price": "-1.00", "category": category}),
        json!({"title": "Precise", "price": "1.005", "category": category}),
        json!({"title": "", "price": "1.00", "category": category}),
        json!({"title": "Typo", "price": "abc", "category": category}),
    ] {
        let response = post_json_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/menu-items",
            &boss.token,
            body.clone(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_menu_writes_are_manager_only(pool: PgPool) {
    let category = common::create_category(&pool, "Mains").await;
    let item = common::create_menu_item(&pool, "Soup", "4.00", category).await;
    let crew = common::delivery(&pool, "driver").await;

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/menu-items/{item}"),
        &crew.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/menu-items",
        json!({"title": "Soup", "price": "4.00", "category": category}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
