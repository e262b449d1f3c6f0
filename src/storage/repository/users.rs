// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User repository: the credential store.
//!
//! Users are keyed by email. Profile fields are opaque; the only attribute the
//! service interprets is `role`, and only the exact value `"admin"` grants
//! anything. Users are never deleted.

use serde_json::Value;

use super::CollectionRepository;
use crate::auth::Role;
use crate::models::{Collection, Document, UpdateResult};
use crate::storage::{DocumentStore, Filter, StoreResult};

/// Natural key of the user collection.
pub const EMAIL_FIELD: &str = "email";

/// A stored user, as seen by the role guard.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub email: String,
    /// `None` for ordinary users and for any role value other than "admin".
    pub role: Option<Role>,
    pub document: Document,
}

impl User {
    /// Interpret a stored document. `None` if it has no string email.
    pub fn from_document(document: Document) -> Option<Self> {
        let email = document.get(EMAIL_FIELD)?.as_str()?.to_string();
        let role = document
            .get(Role::FIELD)
            .and_then(Value::as_str)
            .and_then(Role::from_str);

        Some(Self {
            email,
            role,
            document,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }
}

/// Repository for the `user` collection.
pub struct UserRepository<'a> {
    users: CollectionRepository<'a>,
}

impl<'a> UserRepository<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self {
            users: CollectionRepository::new(store, Collection::Users),
        }
    }

    fn by_email(email: &str) -> Filter {
        Filter::by_field(EMAIL_FIELD, email)
    }

    pub fn list_all(&self) -> StoreResult<Vec<Document>> {
        self.users.list_all()
    }

    /// Look up a user. A miss is `Ok(None)`, never an error.
    pub fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self
            .users
            .find(&Self::by_email(email))?
            .and_then(User::from_document))
    }

    /// Create or merge a user's profile.
    pub fn upsert_by_email(&self, email: &str, patch: Document) -> StoreResult<UpdateResult> {
        self.users.upsert(&Self::by_email(email), patch)
    }

    /// Set `role: "admin"`, creating the user if needed.
    pub fn grant_admin(&self, email: &str) -> StoreResult<UpdateResult> {
        let mut patch = Document::new();
        patch.insert(Role::FIELD, Role::Admin.as_str());
        self.upsert_by_email(email, patch)
    }

    /// Remove the role attribute. A missing user stays missing.
    pub fn revoke_admin(&self, email: &str) -> StoreResult<UpdateResult> {
        self.users.unset(&Self::by_email(email), &[Role::FIELD])
    }
}
