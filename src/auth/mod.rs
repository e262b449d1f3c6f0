// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! This module issues and verifies the club's access tokens and gates admin
//! role changes.
//!
//! ## Auth Flow
//!
//! 1. Client calls `PUT /user/{email}` after signing in upstream
//! 2. Server upserts the user and returns a signed token bound to that email
//! 3. Client sends `Authorization: Bearer <token>` on protected routes
//! 4. Server:
//!    - Verifies signature (HS256) and expiry
//!    - Exposes the email claim to the handler
//!    - For admin grants, looks up the caller's user record and requires
//!      `role: "admin"`
//!
//! ## Security
//!
//! - Tokens carry only the email; roles are read from the user collection on
//!   every privileged request, so revoking admin takes effect immediately
//! - Missing credentials are 401; bad credentials and denied roles are 403
//! - A caller with no user record is never an admin
//! - Clock skew tolerance is 60 seconds

pub mod claims;
pub mod error;
pub mod extractor;
pub mod guard;
pub mod middleware;
pub mod roles;
pub mod token;

pub use claims::{AuthenticatedUser, Claims};
pub use error::AuthError;
pub use extractor::{AdminOnly, Auth};
pub use guard::{is_admin, require_admin};
pub use middleware::require_auth;
pub use roles::Role;
pub use token::TokenKeys;
