// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to the document store.
//!
//! [`CollectionRepository`] applies the mutation contract to any collection;
//! [`UserRepository`] keys the user collection by email and is the credential
//! store consulted by the admin role guard.

pub mod collections;
pub mod users;

pub use collections::CollectionRepository;
pub use users::{User, UserRepository};
