// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints: login, listing and admin role changes.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{debug, info, warn};

use crate::{
    auth::{is_admin, AdminOnly, Auth, Role},
    error::ApiError,
    models::{AdminStatus, Document, LoginResponse, UpdateResult},
    state::AppState,
};

/// Upsert the user's profile and hand back a fresh token.
///
/// The profile body is merged into the stored user, and a string `_id` in it
/// names a newly created user. A `role` field in the body is dropped; roles
/// only change through the admin routes.
///
/// Dropping `role` departs from storing the profile exactly as sent. The club's
/// product owners have to confirm this before any client depends on it.
#[utoipa::path(
    put,
    path = "/user/{email}",
    params(("email" = String, Path, description = "User email")),
    request_body = Document,
    tag = "Users",
    responses(
        (status = 200, body = LoginResponse),
        (status = 400, description = "Empty email")
    )
)]
pub async fn login(
    Path(email): Path<String>,
    State(state): State<AppState>,
    Json(mut profile): Json<Document>,
) -> Result<Json<LoginResponse>, ApiError> {
    let token = state.tokens.issue(&email)?;

    if profile.remove(Role::FIELD).is_some() {
        warn!(email = %email, "Ignoring role in login profile");
    }

    let key = email.clone();
    let result = state
        .blocking(move |s| s.users().upsert_by_email(&key, profile))
        .await?;
    debug!(email = %email, created = result.is_upsert(), "User signed in");

    Ok(Json(LoginResponse { result, token }))
}

#[utoipa::path(
    get,
    path = "/user",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, body = [Document]),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid or expired token")
    )
)]
pub async fn list_users(
    Auth(_caller): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Document>>, ApiError> {
    Ok(Json(state.blocking(|s| s.users().list_all()).await?))
}

/// Grant admin to `email`. The caller must currently be an admin.
#[utoipa::path(
    put,
    path = "/user/admin/{email}",
    params(("email" = String, Path, description = "User to promote")),
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, body = UpdateResult),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid token or caller is not an admin")
    )
)]
pub async fn make_admin(
    AdminOnly(caller): AdminOnly,
    Path(email): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UpdateResult>, ApiError> {
    let key = email.clone();
    let result = state.blocking(move |s| s.users().grant_admin(&key)).await?;
    info!(granted_by = %caller.email, email = %email, "Admin role granted");
    Ok(Json(result))
}

/// Remove the admin role from `email`.
///
/// Any verified caller may do this. A missing user is left missing.
#[utoipa::path(
    put,
    path = "/user/removeadmin/{email}",
    params(("email" = String, Path, description = "User to demote")),
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, body = UpdateResult),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid or expired token")
    )
)]
pub async fn remove_admin(
    Auth(caller): Auth,
    Path(email): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UpdateResult>, ApiError> {
    let key = email.clone();
    let result = state.blocking(move |s| s.users().revoke_admin(&key)).await?;
    info!(revoked_by = %caller.email, email = %email, "Admin role revoked");
    Ok(Json(result))
}

/// Whether `email` is an admin. Unknown users are not.
#[utoipa::path(
    get,
    path = "/admin/{email}",
    params(("email" = String, Path, description = "User email")),
    tag = "Users",
    responses((status = 200, body = AdminStatus))
)]
pub async fn admin_status(
    Path(email): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<AdminStatus>, ApiError> {
    let admin = state.blocking(move |s| is_admin(&s.users(), &email)).await?;
    Ok(Json(AdminStatus { admin }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthenticatedUser;
    use crate::storage::contract::doc;
    use axum::http::StatusCode;
    use serde_json::json;

    fn caller(email: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            email: email.to_string(),
            issued_at: 0,
            expires_at: 0,
        }
    }

    async fn status(state: &AppState, email: &str) -> bool {
        admin_status(Path(email.to_string()), State(state.clone()))
            .await
            .unwrap()
            .0
            .admin
    }

    #[tokio::test]
    async fn login_creates_user_and_issues_token() {
        let state = AppState::for_tests();
        let profile = Json(doc(json!({"name": "Ana"})));

        let Json(response) = login(Path("a@x.com".to_string()), State(state.clone()), profile)
            .await
            .unwrap();
        assert!(response.result.is_upsert());

        let verified = state
            .tokens
            .verify(Some(&format!("Bearer {}", response.token)))
            .unwrap();
        assert_eq!(verified.email, "a@x.com");

        let user = state.users().find_by_email("a@x.com").unwrap().unwrap();
        assert_eq!(user.document.get("name"), Some(&json!("Ana")));
    }

    #[tokio::test]
    async fn repeat_login_merges_profile() {
        let state = AppState::for_tests();
        let email = || Path("a@x.com".to_string());

        login(email(), State(state.clone()), Json(doc(json!({"name": "Ana"}))))
            .await
            .unwrap();
        let Json(second) = login(email(), State(state.clone()), Json(doc(json!({"team": "U12"}))))
            .await
            .unwrap();
        assert_eq!(second.result, UpdateResult::matched(true));

        let user = state.users().find_by_email("a@x.com").unwrap().unwrap();
        assert_eq!(user.document.get("name"), Some(&json!("Ana")));
        assert_eq!(user.document.get("team"), Some(&json!("U12")));
        assert_eq!(state.users().list_all().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn login_cannot_self_promote() {
        let state = AppState::for_tests();
        let profile = Json(doc(json!({"name": "Eve", "role": "admin"})));

        login(Path("eve@x.com".to_string()), State(state.clone()), profile)
            .await
            .unwrap();
        assert!(!status(&state, "eve@x.com").await);
    }

    #[tokio::test]
    async fn first_login_keeps_profile_id() {
        let state = AppState::for_tests();
        let profile = Json(doc(json!({"_id": "ana-1", "name": "Ana"})));

        let Json(response) = login(Path("a@x.com".to_string()), State(state.clone()), profile)
            .await
            .unwrap();
        assert_eq!(response.result.upserted_id.as_deref(), Some("ana-1"));

        let user = state.users().find_by_email("a@x.com").unwrap().unwrap();
        assert_eq!(user.document.id(), Some("ana-1"));

        // Sending the stored document back is a plain re-login.
        let resend = Json(user.document.clone());
        let Json(again) = login(Path("a@x.com".to_string()), State(state.clone()), resend)
            .await
            .unwrap();
        assert_eq!(again.result, UpdateResult::matched(false));
    }

    #[tokio::test]
    async fn login_with_empty_email_is_bad_request() {
        let state = AppState::for_tests();
        let err = login(Path(String::new()), State(state.clone()), Json(Document::new()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code, Some("empty_email"));
        assert!(state.users().list_all().unwrap().is_empty());
    }

    #[tokio::test]
    async fn admin_status_for_unknown_user_is_false() {
        let state = AppState::for_tests();
        assert!(!status(&state, "ghost@x.com").await);
    }

    #[tokio::test]
    async fn grant_and_revoke_flow() {
        let state = AppState::for_tests();
        state.users().grant_admin("boss@x.com").unwrap();
        state
            .users()
            .upsert_by_email("a@x.com", Document::new())
            .unwrap();

        let Json(granted) = make_admin(
            AdminOnly(caller("boss@x.com")),
            Path("a@x.com".to_string()),
            State(state.clone()),
        )
        .await
        .unwrap();
        assert_eq!(granted, UpdateResult::matched(true));
        assert!(status(&state, "a@x.com").await);

        let Json(revoked) = remove_admin(
            Auth(caller("boss@x.com")),
            Path("a@x.com".to_string()),
            State(state.clone()),
        )
        .await
        .unwrap();
        assert_eq!(revoked, UpdateResult::matched(true));
        assert!(!status(&state, "a@x.com").await);
    }

    #[tokio::test]
    async fn remove_admin_for_unknown_user_creates_nothing() {
        let state = AppState::for_tests();
        let Json(result) = remove_admin(
            Auth(caller("a@x.com")),
            Path("ghost@x.com".to_string()),
            State(state.clone()),
        )
        .await
        .unwrap();

        assert_eq!(result, UpdateResult::unmatched());
        assert!(state.users().list_all().unwrap().is_empty());
    }
}
