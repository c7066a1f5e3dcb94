#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use http_body_util::BodyExt;
use lemon_api::auth::jwt::JwtConfig;
use lemon_api::config::ServerConfig;
use lemon_api::router::{build_app, App};
use lemon_api::state::AppState;
use lemon_core::types::DbId;
use lemon_db::models::category::CreateCategory;
use lemon_db::models::menu_item::CreateMenuItem;
use lemon_db::models::user::CreateUser;
use lemon_db::repositories::{CategoryRepo, GroupRepo, MenuItemRepo, UserRepo};
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: String::new(),
        db_max_connections: 5,
        jwt: JwtConfig {
            secret: "test-secret-for-integration-tests".to_string(),
            access_token_expiry_mins: 60,
        },
        bootstrap_admin: None,
    }
}

/// Build the full application (router, middleware, path normalization) on
/// the given pool, exactly as `main.rs` does.
pub fn build_test_app(pool: PgPool) -> App {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: App,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: App, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: App, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: App, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: App, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: App, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(app: App, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(app: App, uri: &str, token: &str, body: Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: App, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A user created directly in the database, with a valid bearer token.
pub struct TestUser {
    pub id: DbId,
    pub token: String,
}

/// Create a user in the given groups. The password hash is a placeholder:
/// these users authenticate with a minted token, never by password.
pub async fn create_user(pool: &PgPool, username: &str, groups: &[&str]) -> TestUser {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "not-a-real-hash".to_string(),
            is_superuser: false,
        },
    )
    .await
    .expect("user creation should succeed");

    for group in groups {
        GroupRepo::add_member(pool, user.id, group)
            .await
            .expect("group membership should succeed");
    }

    let token = test_config()
        .jwt
        .issue(user.id, &user.username)
        .expect("token generation should succeed");
    TestUser { id: user.id, token }
}

pub async fn customer(pool: &PgPool, username: &str) -> TestUser {
    create_user(pool, username, &[]).await
}

pub async fn manager(pool: &PgPool, username: &str) -> TestUser {
    create_user(pool, username, &["Manager"]).await
}

pub async fn delivery(pool: &PgPool, username: &str) -> TestUser {
    create_user(pool, username, &["Delivery Crew"]).await
}

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub async fn create_category(pool: &PgPool, title: &str) -> DbId {
    CategoryRepo::create(
        pool,
        &CreateCategory {
            slug: lemon_core::catalog::slugify(title),
            title: title.to_string(),
        },
    )
    .await
    .expect("category creation should succeed")
    .id
}

pub async fn create_menu_item(pool: &PgPool, title: &str, price: &str, category_id: DbId) -> DbId {
    MenuItemRepo::create(
        pool,
        &CreateMenuItem {
            title: title.to_string(),
            price: dec(price),
            featured: false,
            category_id,
        },
    )
    .await
    .expect("menu item creation should succeed")
    .id
}
