// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Player roster endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::debug;

use crate::{
    auth::Auth,
    error::ApiError,
    models::{DeleteResult, Document, InsertResult, UpdateResult},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/players",
    tag = "Players",
    security(("bearer" = [])),
    responses(
        (status = 200, body = [Document]),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid or expired token")
    )
)]
pub async fn list_players(
    Auth(_caller): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Document>>, ApiError> {
    Ok(Json(state.blocking(|s| s.players().list_all()).await?))
}

/// Fetch one player. A missing player is `null`, not 404.
#[utoipa::path(
    get,
    path = "/players/{id}",
    params(("id" = String, Path, description = "Player id")),
    tag = "Players",
    security(("bearer" = [])),
    responses(
        (status = 200, body = Document, description = "The player, or null when absent"),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid or expired token")
    )
)]
pub async fn get_player(
    Auth(_caller): Auth,
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Option<Document>>, ApiError> {
    Ok(Json(state.blocking(move |s| s.players().find_by_id(&id)).await?))
}

/// Merge the body into the player, creating it under `id` if absent.
#[utoipa::path(
    put,
    path = "/players/{id}",
    params(("id" = String, Path, description = "Player id")),
    request_body = Document,
    tag = "Players",
    responses((status = 200, body = UpdateResult))
)]
pub async fn upsert_player(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(patch): Json<Document>,
) -> Result<Json<UpdateResult>, ApiError> {
    let key = id.clone();
    let result = state
        .blocking(move |s| s.players().upsert_by_id(&key, patch))
        .await?;
    debug!(player_id = %id, upserted = result.is_upsert(), "Player updated");
    Ok(Json(result))
}

#[utoipa::path(
    delete,
    path = "/players/{id}",
    params(("id" = String, Path, description = "Player id")),
    tag = "Players",
    responses((status = 200, body = DeleteResult))
)]
pub async fn delete_player(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteResult>, ApiError> {
    let key = id.clone();
    let result = state.blocking(move |s| s.players().delete_by_id(&key)).await?;
    debug!(player_id = %id, deleted = result.deleted_count, "Player delete");
    Ok(Json(result))
}

#[utoipa::path(
    post,
    path = "/addplayer",
    request_body = Document,
    tag = "Players",
    responses((status = 200, body = InsertResult))
)]
pub async fn add_player(
    State(state): State<AppState>,
    Json(player): Json<Document>,
) -> Result<Json<InsertResult>, ApiError> {
    let result = state.blocking(|s| s.players().insert(player)).await?;
    debug!(player_id = %result.inserted_id, "Player added");
    Ok(Json(result))
}
