//! User endpoints, dispatched to the user SOAP backend.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use relay_clients::TaskRpc;
use relay_core::{Envelope, UserId};

use crate::error::ApiError;
use crate::handlers::{base_url, require};
use crate::state::GatewayState;

/// Request to create a user. Both fields are required.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserBody {
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
}

/// Create a user.
///
/// Validation happens before any backend call, so a rejected request never
/// creates a record.
///
/// # Errors
///
/// Returns 400 if `name` or `email` is missing or blank.
pub async fn create_user<R>(
    State(state): State<Arc<GatewayState<R>>>,
    headers: HeaderMap,
    payload: Result<Json<CreateUserBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    R: TaskRpc + 'static,
{
    let Json(body) = payload?;
    let name = require("name", body.name)?;
    let email = require("email", body.email)?;

    let reply = state.users.create_user(&name, &email).await?;
    let envelope = Envelope::item(reply.user, reply.message, &base_url(&state.config, &headers));

    Ok((StatusCode::CREATED, Json(envelope)))
}

/// List every user in creation order.
///
/// # Errors
///
/// Returns an error if the user backend fails.
pub async fn list_users<R>(
    State(state): State<Arc<GatewayState<R>>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError>
where
    R: TaskRpc + 'static,
{
    let reply = state.users.list_users().await?;
    let envelope =
        Envelope::collection(reply.users, reply.message, &base_url(&state.config, &headers));

    Ok(Json(envelope))
}

/// Get a single user by ID.
///
/// # Errors
///
/// Returns 400 for a non-integer id and 404 if the user does not exist.
pub async fn get_user<R>(
    State(state): State<Arc<GatewayState<R>>>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    R: TaskRpc + 'static,
{
    let user_id: UserId = user_id
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("user id must be an integer, got '{user_id}'")))?;

    let reply = state.users.get_user(user_id).await?;
    let envelope = Envelope::item(reply.user, reply.message, &base_url(&state.config, &headers));

    Ok(Json(envelope))
}
