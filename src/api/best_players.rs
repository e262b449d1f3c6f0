// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::debug;

use crate::{
    error::ApiError,
    models::{DeleteResult, Document, UpdateResult},
    state::AppState,
};

/// Merge the body into the best-player record, creating it under `id` if absent.
#[utoipa::path(
    put,
    path = "/bestplayer/{id}",
    params(("id" = String, Path, description = "Best-player record id")),
    request_body = Document,
    tag = "Best players",
    responses((status = 200, body = UpdateResult))
)]
pub async fn upsert_best_player(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(patch): Json<Document>,
) -> Result<Json<UpdateResult>, ApiError> {
    let key = id.clone();
    let result = state
        .blocking(move |s| s.best_players().upsert_by_id(&key, patch))
        .await?;
    debug!(record_id = %id, upserted = result.is_upsert(), "Best player updated");
    Ok(Json(result))
}

#[utoipa::path(
    get,
    path = "/bestplayer",
    tag = "Best players",
    responses((status = 200, body = [Document]))
)]
pub async fn list_best_players(
    State(state): State<AppState>,
) -> Result<Json<Vec<Document>>, ApiError> {
    Ok(Json(state.blocking(|s| s.best_players().list_all()).await?))
}

#[utoipa::path(
    delete,
    path = "/bestplayer/{id}",
    params(("id" = String, Path, description = "Best-player record id")),
    tag = "Best players",
    responses((status = 200, body = DeleteResult))
)]
pub async fn delete_best_player(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteResult>, ApiError> {
    Ok(Json(
        state
            .blocking(move |s| s.best_players().delete_by_id(&id))
            .await?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentId;
    use crate::storage::contract::doc;
    use serde_json::json;

    #[tokio::test]
    async fn upsert_with_new_id_creates_record_under_that_id() {
        let state = AppState::for_tests();
        let id = DocumentId::generate().to_string();

        let patch = Json(doc(json!({"month": "2026-09", "player": "Ana"})));
        let Json(result) = upsert_best_player(Path(id.clone()), State(state.clone()), patch)
            .await
            .unwrap();
        assert_eq!(result.upserted_id.as_deref(), Some(id.as_str()));

        let Json(records) = list_best_players(State(state)).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id(), Some(id.as_str()));
    }

    #[tokio::test]
    async fn same_patch_twice_leaves_one_record() {
        let state = AppState::for_tests();
        let id = DocumentId::generate().to_string();
        let patch = || Json(doc(json!({"player": "Ana"})));

        upsert_best_player(Path(id.clone()), State(state.clone()), patch())
            .await
            .unwrap();
        let Json(again) = upsert_best_player(Path(id.clone()), State(state.clone()), patch())
            .await
            .unwrap();

        assert_eq!(again, UpdateResult::matched(false));
        assert_eq!(state.best_players().list_all().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_missing_record_reports_zero() {
        let state = AppState::for_tests();
        let id = DocumentId::generate().to_string();

        let Json(result) = delete_best_player(Path(id), State(state)).await.unwrap();
        assert_eq!(result.deleted_count, 0);
    }
}
