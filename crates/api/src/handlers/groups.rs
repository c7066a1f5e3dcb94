//! Handlers for the group rosters (`/groups/manager/users` and
//! `/groups/delivery-crew/users`).
//!
//! Both rosters behave identically; the per-roster handlers only pick the
//! [`Roster`] and delegate. All of them require a manager.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use lemon_core::access::{Action, Resource};
use lemon_core::error::CoreError;
use lemon_core::roles::Roster;
use lemon_core::types::DbId;
use lemon_db::models::user::GroupMember;
use lemon_db::repositories::{GroupRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Request body for adding a user to a roster.
#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    pub user_id: DbId,
}

// ---------------------------------------------------------------------------
// Shared roster operations
// ---------------------------------------------------------------------------

async fn list_members(
    state: &AppState,
    auth: &AuthUser,
    roster: Roster,
) -> AppResult<Json<Vec<GroupMember>>> {
    auth.authorize(Resource::GroupMembership, Action::List)?;
    let members = GroupRepo::list_members(&state.pool, roster.group_name()).await?;
    Ok(Json(members))
}

async fn ensure_user_exists(state: &AppState, user_id: DbId) -> AppResult<()> {
    UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .map(|_| ())
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))
}

async fn add_member(
    state: &AppState,
    auth: &AuthUser,
    roster: Roster,
    body: JsonBody,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    auth.authorize(Resource::GroupMembership, Action::Create)?;
    let AddMemberRequest { user_id } = body.parse::<AddMemberRequest>()?;
    ensure_user_exists(state, user_id).await?;

    let group = roster.group_name();
    let added = GroupRepo::add_member(&state.pool, user_id, group).await?;
    tracing::info!(user_id, group, added, by = auth.user_id, "Group member added");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(format!("User added to the {group} group."))),
    ))
}

async fn remove_member(
    state: &AppState,
    auth: &AuthUser,
    roster: Roster,
    user_id: DbId,
) -> AppResult<Json<MessageResponse>> {
    auth.authorize(Resource::GroupMembership, Action::Destroy)?;
    ensure_user_exists(state, user_id).await?;

    let group = roster.group_name();
    let removed = GroupRepo::remove_member(&state.pool, user_id, group).await?;
    tracing::info!(user_id, group, removed, by = auth.user_id, "Group member removed");

    Ok(Json(MessageResponse::new(format!(
        "User removed from the {group} group."
    ))))
}

// ---------------------------------------------------------------------------
// Manager roster
// ---------------------------------------------------------------------------

/// GET /api/v1/groups/manager/users
pub async fn list_managers(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<GroupMember>>> {
    list_members(&state, &auth, Roster::Manager).await
}

/// POST /api/v1/groups/manager/users
pub async fn add_manager(
    State(state): State<AppState>,
    auth: AuthUser,
    body: JsonBody,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    add_member(&state, &auth, Roster::Manager, body).await
}

/// DELETE /api/v1/groups/manager/users/{id}
pub async fn remove_manager(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    remove_member(&state, &auth, Roster::Manager, user_id).await
}

// ---------------------------------------------------------------------------
// Delivery crew roster
// ---------------------------------------------------------------------------

/// GET /api/v1/groups/delivery-crew/users
pub async fn list_delivery_crew(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<GroupMember>>> {
    list_members(&state, &auth, Roster::DeliveryCrew).await
}

/// POST /api/v1/groups/delivery-crew/users
pub async fn add_delivery_crew(
    State(state): State<AppState>,
    auth: AuthUser,
    body: JsonBody,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    add_member(&state, &auth, Roster::DeliveryCrew, body).await
}

/// DELETE /api/v1/groups/delivery-crew/users/{id}
pub async fn remove_delivery_crew(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    remove_member(&state, &auth, Roster::DeliveryCrew, user_id).await
}
