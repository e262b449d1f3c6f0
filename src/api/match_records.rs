// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Club match history endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::debug;

use crate::{
    auth::Auth,
    error::ApiError,
    models::{DeleteResult, Document, InsertResult},
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/addmatchrecord",
    request_body = Document,
    tag = "Match records",
    responses((status = 200, body = InsertResult))
)]
pub async fn add_match_record(
    State(state): State<AppState>,
    Json(record): Json<Document>,
) -> Result<Json<InsertResult>, ApiError> {
    let result = state.blocking(|s| s.match_records().insert(record)).await?;
    debug!(record_id = %result.inserted_id, "Match record added");
    Ok(Json(result))
}

#[utoipa::path(
    get,
    path = "/matchrecord",
    tag = "Match records",
    security(("bearer" = [])),
    responses(
        (status = 200, body = [Document]),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid or expired token")
    )
)]
pub async fn list_match_records(
    Auth(_caller): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Document>>, ApiError> {
    Ok(Json(state.blocking(|s| s.match_records().list_all()).await?))
}

#[utoipa::path(
    delete,
    path = "/matchrecord/{id}",
    params(("id" = String, Path, description = "Match record id")),
    tag = "Match records",
    responses((status = 200, body = DeleteResult))
)]
pub async fn delete_match_record(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteResult>, ApiError> {
    Ok(Json(
        state
            .blocking(move |s| s.match_records().delete_by_id(&id))
            .await?,
    ))
}
