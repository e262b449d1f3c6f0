// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Live role checks against the user collection.

use tracing::{error, warn};

use super::AuthError;
use crate::state::AppState;
use crate::storage::{StoreResult, UserRepository};

/// Whether `email` currently holds the admin role.
///
/// A missing user is not an admin.
pub fn is_admin(users: &UserRepository<'_>, email: &str) -> StoreResult<bool> {
    Ok(users
        .find_by_email(email)?
        .is_some_and(|user| user.is_admin()))
}

/// Admit the caller only if their stored record says `role: "admin"`.
pub async fn require_admin(state: &AppState, email: &str) -> Result<(), AuthError> {
    let lookup = email.to_string();
    match state.blocking(move |s| is_admin(&s.users(), &lookup)).await {
        Ok(true) => Ok(()),
        Ok(false) => {
            warn!(email = %email, "Admin check failed");
            Err(AuthError::InsufficientPermissions)
        }
        Err(e) => {
            error!(email = %email, error = %e, "Role lookup failed");
            Err(AuthError::InternalError(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Document;
    use crate::storage::contract::doc;
    use serde_json::json;

    #[tokio::test]
    async fn admin_passes() {
        let state = AppState::for_tests();
        state.users().grant_admin("boss@x.com").unwrap();

        assert!(require_admin(&state, "boss@x.com").await.is_ok());
        assert!(is_admin(&state.users(), "boss@x.com").unwrap());
    }

    #[tokio::test]
    async fn ordinary_user_is_rejected() {
        let state = AppState::for_tests();
        state.users().upsert_by_email("member@x.com", Document::new()).unwrap();

        assert!(matches!(
            require_admin(&state, "member@x.com").await,
            Err(AuthError::InsufficientPermissions)
        ));
    }

    #[tokio::test]
    async fn unknown_caller_is_rejected() {
        let state = AppState::for_tests();

        assert!(!is_admin(&state.users(), "ghost@x.com").unwrap());
        assert!(matches!(
            require_admin(&state, "ghost@x.com").await,
            Err(AuthError::InsufficientPermissions)
        ));
    }

    #[tokio::test]
    async fn role_match_is_exact() {
        let state = AppState::for_tests();
        let users = state.users();
        users
            .upsert_by_email("a@x.com", doc(json!({"role": "Admin"})))
            .unwrap();
        users
            .upsert_by_email("b@x.com", doc(json!({"role": "superadmin"})))
            .unwrap();

        assert!(require_admin(&state, "a@x.com").await.is_err());
        assert!(require_admin(&state, "b@x.com").await.is_err());
    }

    #[tokio::test]
    async fn revoked_admin_is_rejected_immediately() {
        let state = AppState::for_tests();
        state.users().grant_admin("boss@x.com").unwrap();
        state.users().revoke_admin("boss@x.com").unwrap();

        assert!(require_admin(&state, "boss@x.com").await.is_err());
    }
}
