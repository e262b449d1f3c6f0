// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::require_auth,
    models::{AdminStatus, DeleteResult, Document, InsertResult, LoginResponse, UpdateResult},
    state::AppState,
};

pub mod best_players;
pub mod health;
pub mod match_records;
pub mod players;
pub mod users;

/// Build the application router.
///
/// Routes that read players, users or match records sit behind
/// [`require_auth`]. The mutating roster and record routes are open, as they
/// have always been for the club's clients.
pub fn router(state: AppState) -> Router {
    let verified = Router::new()
        .route("/players", get(players::list_players))
        .route("/players/{id}", get(players::get_player))
        .route("/user", get(users::list_users))
        .route("/user/admin/{email}", put(users::make_admin))
        .route("/user/removeadmin/{email}", put(users::remove_admin))
        .route("/matchrecord", get(match_records::list_match_records))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let open = Router::new()
        .route("/", get(health::root))
        .route(
            "/players/{id}",
            put(players::upsert_player).delete(players::delete_player),
        )
        .route("/addplayer", post(players::add_player))
        .route("/user/{email}", put(users::login))
        .route("/admin/{email}", get(users::admin_status))
        .route("/bestplayer", get(best_players::list_best_players))
        .route(
            "/bestplayer/{id}",
            put(best_players::upsert_best_player).delete(best_players::delete_best_player),
        )
        .route("/addmatchrecord", post(match_records::add_match_record))
        .route("/matchrecord/{id}", delete(match_records::delete_match_record));

    Router::new()
        .merge(verified)
        .merge(open)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::root,
        players::list_players,
        players::get_player,
        players::upsert_player,
        players::delete_player,
        players::add_player,
        users::login,
        users::list_users,
        users::make_admin,
        users::remove_admin,
        users::admin_status,
        best_players::upsert_best_player,
        best_players::list_best_players,
        best_players::delete_best_player,
        match_records::add_match_record,
        match_records::list_match_records,
        match_records::delete_match_record
    ),
    components(
        schemas(
            Document,
            UpdateResult,
            InsertResult,
            DeleteResult,
            LoginResponse,
            AdminStatus
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Players", description = "Club roster"),
        (name = "Users", description = "Sign-in and admin roles"),
        (name = "Best players", description = "Best-player records"),
        (name = "Match records", description = "Club match history")
    )
)]
struct ApiDoc;

/// Registers the `bearer` scheme referenced by protected paths.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
