// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! CRB Club Server - club management document service
//!
//! Authenticated CRUD over four document collections (players, users,
//! best-player records, match records), with email-bound access tokens and
//! live admin role checks against the user collection.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Token issuing/verification and the admin role guard
//! - `storage` - Document store trait, merge semantics and backends
//! - `config` - Environment configuration

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod storage;
