// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors for authenticated callers.
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user.email is the verified email claim
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use super::{guard, middleware::authorization_header, AuthError, AuthenticatedUser};
use crate::state::AppState;

/// Extractor for a verified caller.
///
/// Uses the user placed by [`require_auth`](super::require_auth) when the
/// middleware ran, and verifies the header itself otherwise.
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>().cloned() {
            return Ok(Auth(user));
        }

        let header = authorization_header(&parts.headers)?;
        let user = state.tokens.verify(header)?;
        Ok(Auth(user))
    }
}

/// Extractor that requires the caller's stored role to be admin.
///
/// The role is read from the user collection on every request.
pub struct AdminOnly(pub AuthenticatedUser);

impl FromRequestParts<AppState> for AdminOnly {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Auth(user) = Auth::from_request_parts(parts, state).await?;
        guard::require_admin(state, &user.email).await?;
        Ok(AdminOnly(user))
    }
}
