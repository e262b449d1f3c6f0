// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Document Storage Module
//!
//! This module provides the document store used by every endpoint. The store
//! is a trait so the auth and CRUD logic can run against an in-memory backend
//! in tests and against an embedded redb database in production.
//!
//! ## Mutation Contract
//!
//! All backends share the merge semantics in [`merge`]:
//!
//! - **Set** merges a patch into the matched document; fields not in the
//!   patch are preserved
//! - **Unset** removes named fields; missing fields are ignored
//! - **Upsert** inserts `filter fields + patch` when nothing matches
//! - Deleting or reading a missing document is not an error
//!
//! ## Atomicity
//!
//! Each operation touches at most one document and is atomic on its own.
//! There is no cross-request coordination: concurrent writers to the same
//! document are last-write-wins.

pub mod error;
pub mod memory;
pub mod merge;
pub mod redb_store;
pub mod repository;

use serde_json::Value;

use crate::models::{
    Collection, DeleteResult, Document, DocumentId, InsertResult, UpdateResult, ID_FIELD,
};

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use redb_store::RedbStore;
pub use repository::{CollectionRepository, User, UserRepository};

/// Selects at most one document in a collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Match on `_id`.
    Id(DocumentId),
    /// Match on equality of a single top-level field.
    Field { name: String, value: Value },
}

impl Filter {
    /// Filter on a caller-supplied id. A malformed id is a store fault.
    pub fn by_id(raw: &str) -> StoreResult<Self> {
        DocumentId::parse(raw)
            .map(Filter::Id)
            .map_err(|_| StoreError::InvalidId(raw.to_string()))
    }

    pub fn by_field(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Field {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Filter::Id(id) => document.id() == Some(id.as_str()),
            Filter::Field { name, value } => document.get(name) == Some(value),
        }
    }

    /// Fields an upsert copies from the filter into the new document.
    pub fn seed(&self) -> Document {
        let mut document = Document::new();
        match self {
            Filter::Id(id) => {
                document.insert(ID_FIELD, id.as_str());
            }
            Filter::Field { name, value } => {
                document.insert(name.clone(), value.clone());
            }
        }
        document
    }
}

/// A single-document modification.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    /// Merge the patch's fields into the document.
    Set(Document),
    /// Remove the named fields.
    Unset(Vec<String>),
}

/// Persistence backend for the four collections.
///
/// Implementations must apply each call atomically to a single document and
/// must use [`merge`] for update semantics.
pub trait DocumentStore: Send + Sync {
    /// Every document in the collection, in the backend's natural order.
    fn find_all(&self, collection: Collection) -> StoreResult<Vec<Document>>;

    /// The first document matching the filter.
    fn find_one(&self, collection: Collection, filter: &Filter) -> StoreResult<Option<Document>>;

    /// Store a document under a fresh `_id`.
    fn insert_one(&self, collection: Collection, document: Document) -> StoreResult<InsertResult>;

    /// Apply an update to the first matching document, creating one when
    /// `upsert` is set and nothing matches.
    fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        update: &Update,
        upsert: bool,
    ) -> StoreResult<UpdateResult>;

    /// Remove the first matching document, if any.
    fn delete_one(&self, collection: Collection, filter: &Filter) -> StoreResult<DeleteResult>;
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn by_id_rejects_malformed_ids() {
        let err = Filter::by_id("xyz").unwrap_err();
        assert!(matches!(err, StoreError::InvalidId(ref raw) if raw == "xyz"));
    }

    #[test]
    fn field_filter_matches_exact_value() {
        let filter = Filter::by_field("email", "a@x.com");
        let doc = contract::doc(json!({"email": "a@x.com"}));
        let other = contract::doc(json!({"email": "A@x.com"}));
        assert!(filter.matches(&doc));
        assert!(!filter.matches(&other));
    }

    #[test]
    fn seed_copies_filter_fields() {
        let id = DocumentId::generate();
        assert_eq!(Filter::Id(id.clone()).seed().id(), Some(id.as_str()));
        assert_eq!(
            Filter::by_field("email", "a@x.com").seed(),
            contract::doc(json!({"email": "a@x.com"}))
        );
    }
}
