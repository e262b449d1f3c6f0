// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

/// Banner returned by the root route.
pub const BANNER: &str = "CRB is running";

/// Liveness check.
///
/// Always returns 200 while the process is serving requests. Does not touch
/// the store.
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses((status = 200, description = "Service is alive", body = String))
)]
pub async fn root() -> &'static str {
    BANNER
}
