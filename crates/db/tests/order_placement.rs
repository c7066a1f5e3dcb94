//! Integration tests for cart-to-order placement and scoped order reads.

use std::str::FromStr;

use lemon_core::types::DbId;
use lemon_db::models::cart::CreateCartLine;
use lemon_db::models::category::CreateCategory;
use lemon_db::models::menu_item::CreateMenuItem;
use lemon_db::models::order::{Checkout, OrderFilter, OrderScope, UpdateOrder, DEFAULT_ORDER_ORDERING};
use lemon_db::models::user::CreateUser;
use lemon_db::repositories::{
    CartRepo, CategoryRepo, MenuItemRepo, OrderItemRepo, OrderRepo, UserRepo,
};
use rust_decimal::Decimal;
use sqlx::PgPool;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn create_user(pool: &PgPool, username: &str) -> DbId {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: "not-a-real-hash".to_string(),
        is_superuser: false,
    };
    UserRepo::create(pool, &input).await.unwrap().id
}

async fn create_item(pool: &PgPool, title: &str, price: &str) -> DbId {
    let category = CategoryRepo::create(
        pool,
        &CreateCategory {
            slug: format!("{}-cat", title.to_lowercase()),
            title: format!("{title} category"),
        },
    )
    .await
    .unwrap();

    MenuItemRepo::create(
        pool,
        &CreateMenuItem {
            title: title.to_string(),
            price: dec(price),
            featured: false,
            category_id: category.id,
        },
    )
    .await
    .unwrap()
    .id
}

async fn add_to_cart(pool: &PgPool, user_id: DbId, menuitem_id: DbId, quantity: i16) {
    let line = CartRepo::add(
        pool,
        &CreateCartLine {
            user_id,
            menuitem_id,
            quantity,
        },
    )
    .await
    .unwrap();
    assert!(line.is_some(), "cart line should be inserted");
}

fn default_filter() -> OrderFilter {
    OrderFilter {
        search: None,
        ordering: DEFAULT_ORDER_ORDERING,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_order_snapshots_cart_and_drains_it(pool: PgPool) {
    let customer = create_user(&pool, "alice").await;
    let item_a = create_item(&pool, "Bruschetta", "5.00").await;
    let item_b = create_item(&pool, "Lemonade", "3.00").await;
    add_to_cart(&pool, customer, item_a, 2).await;
    add_to_cart(&pool, customer, item_b, 1).await;

    let (order, items) = OrderRepo::create_from_cart(&pool, customer)
        .await
        .unwrap()
        .placed()
        .expect("non-empty cart should produce an order");

    assert_eq!(order.user_id, customer);
    assert_eq!(order.total, dec("13.00"));
    assert!(!order.status);
    assert_eq!(order.delivery_crew_id, None);

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].menuitem_id, item_a);
    assert_eq!(items[0].unit_price, dec("5.00"));
    assert_eq!(items[0].price, dec("10.00"));
    assert_eq!(items[0].title, "Bruschetta");
    assert_eq!(items[1].price, dec("3.00"));

    let cart = CartRepo::list_for_user(&pool, customer).await.unwrap();
    assert!(cart.is_empty(), "cart must be drained after ordering");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_empty_cart_creates_nothing(pool: PgPool) {
    let customer = create_user(&pool, "bob").await;

    let result = OrderRepo::create_from_cart(&pool, customer).await.unwrap();
    assert!(matches!(result, Checkout::EmptyCart));

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_oversized_total_leaves_cart_untouched(pool: PgPool) {
    let customer = create_user(&pool, "frank").await;
    let item = create_item(&pool, "Caviar", "9999.99").await;
    add_to_cart(&pool, customer, item, 20_000).await;

    let result = OrderRepo::create_from_cart(&pool, customer).await.unwrap();
    match result {
        Checkout::TotalTooLarge(total) => assert_eq!(total, dec("199999800.00")),
        other => panic!("expected TotalTooLarge, got {other:?}"),
    }

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
    assert_eq!(CartRepo::list_for_user(&pool, customer).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_item_prices_survive_menu_price_change(pool: PgPool) {
    let customer = create_user(&pool, "carol").await;
    let item = create_item(&pool, "Pasta", "12.50").await;
    add_to_cart(&pool, customer, item, 2).await;

    let (order, _) = OrderRepo::create_from_cart(&pool, customer)
        .await
        .unwrap()
        .placed()
        .unwrap();

    sqlx::query("UPDATE menu_items SET price = 99.00 WHERE id = $1")
        .bind(item)
        .execute(&pool)
        .await
        .unwrap();

    let items = OrderItemRepo::list_for_order(&pool, order.id).await.unwrap();
    assert_eq!(items[0].unit_price, dec("12.50"));
    assert_eq!(items[0].price, dec("25.00"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_cart_line_is_not_merged(pool: PgPool) {
    let customer = create_user(&pool, "dave").await;
    let item = create_item(&pool, "Salad", "7.00").await;
    add_to_cart(&pool, customer, item, 1).await;

    let second = CartRepo::add(
        &pool,
        &CreateCartLine {
            user_id: customer,
            menuitem_id: item,
            quantity: 4,
        },
    )
    .await
    .unwrap();
    assert!(second.is_none(), "duplicate line must be rejected");

    let cart = CartRepo::list_for_user(&pool, customer).await.unwrap();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0].quantity, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_scoped_reads(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;
    let driver = create_user(&pool, "driver").await;
    let item = create_item(&pool, "Soup", "4.00").await;

    add_to_cart(&pool, alice, item, 1).await;
    let (alice_order, _) = OrderRepo::create_from_cart(&pool, alice).await.unwrap().placed().unwrap();
    add_to_cart(&pool, bob, item, 1).await;
    let (bob_order, _) = OrderRepo::create_from_cart(&pool, bob).await.unwrap().placed().unwrap();

    OrderRepo::update(
        &pool,
        bob_order.id,
        &UpdateOrder {
            status: None,
            delivery_crew_id: Some(Some(driver)),
        },
    )
    .await
    .unwrap();

    let all = OrderRepo::list(&pool, OrderScope::All, &default_filter()).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, bob_order.id, "default ordering is newest first");

    let mine = OrderRepo::list(&pool, OrderScope::PlacedBy(alice), &default_filter())
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, alice_order.id);

    let assigned = OrderRepo::list(&pool, OrderScope::AssignedTo(driver), &default_filter())
        .await
        .unwrap();
    assert_eq!(assigned.len(), 1);
    assert_eq!(assigned[0].id, bob_order.id);

    let hidden = OrderRepo::find_scoped(&pool, OrderScope::PlacedBy(alice), bob_order.id)
        .await
        .unwrap();
    assert!(hidden.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_can_unassign_delivery_crew(pool: PgPool) {
    let customer = create_user(&pool, "erin").await;
    let driver = create_user(&pool, "driver").await;
    let item = create_item(&pool, "Tiramisu", "6.00").await;
    add_to_cart(&pool, customer, item, 1).await;
    let (order, _) = OrderRepo::create_from_cart(&pool, customer).await.unwrap().placed().unwrap();

    let assigned = OrderRepo::update(
        &pool,
        order.id,
        &UpdateOrder {
            status: Some(true),
            delivery_crew_id: Some(Some(driver)),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(assigned.delivery_crew_id, Some(driver));
    assert!(assigned.status);

    // Status-only update leaves the crew untouched.
    let untouched = OrderRepo::update(
        &pool,
        order.id,
        &UpdateOrder {
            status: Some(false),
            delivery_crew_id: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(untouched.delivery_crew_id, Some(driver));

    let cleared = OrderRepo::update(
        &pool,
        order.id,
        &UpdateOrder {
            status: None,
            delivery_crew_id: Some(None),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(cleared.delivery_crew_id, None);
    assert_eq!(cleared.total, order.total, "total is never touched by updates");
}
