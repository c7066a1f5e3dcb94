//! Handlers for the `/orders` resource.
//!
//! Every read and write goes through an [`OrderScope`] derived from the
//! caller's role, so an order outside the caller's scope looks exactly like
//! a missing one (404).

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use lemon_core::access::{restrict_order_patch, Action, Resource};
use lemon_core::error::CoreError;
use lemon_core::pricing::MAX_ORDER_TOTAL;
use lemon_core::roles::GROUP_DELIVERY_CREW;
use lemon_core::types::DbId;
use lemon_db::models::order::{Checkout, Order, OrderItem, OrderScope, UpdateOrder};
use lemon_db::repositories::{GroupRepo, OrderItemRepo, OrderRepo};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::extract::{AppQuery, JsonBody};
use crate::middleware::auth::AuthUser;
use crate::query::OrderQuery;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `PATCH /orders/{id}`.
///
/// `delivery_crew: null` unassigns the crew; omitting the key leaves it as is.
#[derive(Debug, Deserialize)]
pub struct PatchOrderRequest {
    pub status: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub delivery_crew: Option<Option<DbId>>,
}

/// Request body for `PUT /orders/{id}`. Both keys are required;
/// `delivery_crew` may be `null`.
#[derive(Debug, Deserialize)]
pub struct PutOrderRequest {
    pub status: bool,
    #[serde(deserialize_with = "Option::deserialize")]
    pub delivery_crew: Option<DbId>,
}

/// Distinguishes a present `null` (`Some(None)`) from an absent key (`None`).
fn deserialize_some<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// An order with its items and its own resource path.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
    pub link: String,
}

impl OrderResponse {
    fn new(order: Order, items: Vec<OrderItem>) -> Self {
        let link = order_link(order.id);
        Self { order, items, link }
    }
}

/// Resource path of a single order.
pub fn order_link(id: DbId) -> String {
    format!("/api/v1/orders/{id}")
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Order",
        id,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject a delivery crew assignment unless the user is in the Delivery Crew
/// group. Unknown user ids fail the same way.
async fn ensure_delivery_crew(state: &AppState, crew: Option<Option<DbId>>) -> AppResult<()> {
    let Some(Some(user_id)) = crew else {
        return Ok(());
    };

    if GroupRepo::is_member(&state.pool, user_id, GROUP_DELIVERY_CREW).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Validation(format!(
            "User {user_id} is not a member of the {GROUP_DELIVERY_CREW} group"
        ))))
    }
}

/// Look up an order inside the caller's scope, then apply `update`.
async fn apply_update(
    state: &AppState,
    auth: &AuthUser,
    id: DbId,
    update: UpdateOrder,
) -> AppResult<Json<OrderResponse>> {
    let scope = OrderScope::for_caller(auth.role, auth.user_id);
    OrderRepo::find_scoped(&state.pool, scope, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    ensure_delivery_crew(state, update.delivery_crew_id).await?;

    let order = OrderRepo::update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| not_found(id))?;
    let items = OrderItemRepo::list_for_order(&state.pool, id).await?;

    tracing::info!(
        order_id = id,
        user_id = auth.user_id,
        role = %auth.role,
        status = order.status,
        delivery_crew = ?order.delivery_crew_id,
        "Order updated"
    );

    Ok(Json(OrderResponse::new(order, items)))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/orders
///
/// Managers see all orders, delivery crew their assignments, customers their
/// own. Supports `search` (customer or crew username) and `ordering`.
pub async fn list_orders(
    State(state): State<AppState>,
    auth: AuthUser,
    AppQuery(params): AppQuery<OrderQuery>,
) -> AppResult<Json<Vec<OrderResponse>>> {
    auth.authorize(Resource::Order, Action::List)?;

    let scope = OrderScope::for_caller(auth.role, auth.user_id);
    let orders = OrderRepo::list(&state.pool, scope, &params.into_filter()).await?;

    let ids: Vec<DbId> = orders.iter().map(|o| o.id).collect();
    let mut items_by_order: HashMap<DbId, Vec<OrderItem>> = HashMap::new();
    for item in OrderItemRepo::list_for_orders(&state.pool, &ids).await? {
        items_by_order.entry(item.order_id).or_default().push(item);
    }

    let responses = orders
        .into_iter()
        .map(|order| {
            let items = items_by_order.remove(&order.id).unwrap_or_default();
            OrderResponse::new(order, items)
        })
        .collect();

    Ok(Json(responses))
}

/// GET /api/v1/orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<OrderResponse>> {
    auth.authorize(Resource::Order, Action::Retrieve)?;

    let scope = OrderScope::for_caller(auth.role, auth.user_id);
    let order = OrderRepo::find_scoped(&state.pool, scope, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let items = OrderItemRepo::list_for_order(&state.pool, id).await?;

    Ok(Json(OrderResponse::new(order, items)))
}

/// POST /api/v1/orders
///
/// Places an order from the caller's cart and empties the cart, all in one
/// transaction. An empty cart yields 404.
pub async fn create_order(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<(StatusCode, Json<OrderResponse>)> {
    auth.authorize(Resource::Order, Action::Create)?;

    let (order, items) = match OrderRepo::create_from_cart(&state.pool, auth.user_id).await? {
        Checkout::Placed { order, items } => (order, items),
        Checkout::EmptyCart => {
            return Err(CoreError::NotFoundMessage("Your cart is empty.".into()).into());
        }
        Checkout::TotalTooLarge(total) => {
            return Err(CoreError::Validation(format!(
                "Order total {total} exceeds the maximum of {MAX_ORDER_TOTAL}"
            ))
            .into());
        }
    };

    tracing::info!(
        order_id = order.id,
        user_id = auth.user_id,
        total = %order.total,
        items = items.len(),
        "Order placed"
    );

    Ok((StatusCode::CREATED, Json(OrderResponse::new(order, items))))
}

/// PATCH /api/v1/orders/{id}
///
/// Delivery crew (and anyone else who is not a manager) may send only
/// `{"status": <bool>}`; that restriction is checked before the lookup.
pub async fn patch_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    body: JsonBody,
) -> AppResult<Json<OrderResponse>> {
    auth.authorize(Resource::Order, Action::PartialUpdate)?;

    let Value::Object(fields) = body.parse::<Value>()? else {
        return Err(AppError::BadRequest("Expected a JSON object".into()));
    };
    restrict_order_patch(auth.role, &fields)?;

    let input: PatchOrderRequest = serde_json::from_value(Value::Object(fields))
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let update = UpdateOrder {
        status: input.status,
        delivery_crew_id: input.delivery_crew,
    };
    apply_update(&state, &auth, id, update).await
}

/// PUT /api/v1/orders/{id}
pub async fn update_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    body: JsonBody,
) -> AppResult<Json<OrderResponse>> {
    auth.authorize(Resource::Order, Action::Update)?;
    let input: PutOrderRequest = body.parse()?;

    let update = UpdateOrder {
        status: Some(input.status),
        delivery_crew_id: Some(input.delivery_crew),
    };
    apply_update(&state, &auth, id, update).await
}

/// DELETE /api/v1/orders/{id}
pub async fn delete_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    auth.authorize(Resource::Order, Action::Destroy)?;

    if OrderRepo::delete(&state.pool, id).await? {
        tracing::info!(order_id = id, user_id = auth.user_id, "Order deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
