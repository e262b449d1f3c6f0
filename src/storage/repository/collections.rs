// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Generic repository for one collection.

use super::super::{DocumentStore, Filter, StoreResult, Update};
use crate::models::{Collection, DeleteResult, Document, InsertResult, UpdateResult};

/// Repository for CRUD operations on a single collection.
pub struct CollectionRepository<'a> {
    store: &'a dyn DocumentStore,
    collection: Collection,
}

impl<'a> CollectionRepository<'a> {
    pub fn new(store: &'a dyn DocumentStore, collection: Collection) -> Self {
        Self { store, collection }
    }

    /// Every document in the collection. No pagination or ordering.
    pub fn list_all(&self) -> StoreResult<Vec<Document>> {
        self.store.find_all(self.collection)
    }

    pub fn find(&self, filter: &Filter) -> StoreResult<Option<Document>> {
        self.store.find_one(self.collection, filter)
    }

    /// Get a document by id. `Ok(None)` when it does not exist.
    pub fn find_by_id(&self, id: &str) -> StoreResult<Option<Document>> {
        self.find(&Filter::by_id(id)?)
    }

    /// Create a new document under a fresh id.
    pub fn insert(&self, document: Document) -> StoreResult<InsertResult> {
        self.store.insert_one(self.collection, document)
    }

    /// Merge `patch` into the matching document, or insert `filter + patch`.
    pub fn upsert(&self, filter: &Filter, patch: Document) -> StoreResult<UpdateResult> {
        self.store
            .update_one(self.collection, filter, &Update::Set(patch), true)
    }

    /// Upsert keyed by id. An absent id creates a document with that id.
    pub fn upsert_by_id(&self, id: &str, patch: Document) -> StoreResult<UpdateResult> {
        self.upsert(&Filter::by_id(id)?, patch)
    }

    /// Remove the named fields from the matching document, if there is one.
    pub fn unset(&self, filter: &Filter, fields: &[&str]) -> StoreResult<UpdateResult> {
        let fields = fields.iter().map(|field| field.to_string()).collect();
        self.store
            .update_one(self.collection, filter, &Update::Unset(fields), false)
    }

    pub fn delete(&self, filter: &Filter) -> StoreResult<DeleteResult> {
        self.store.delete_one(self.collection, filter)
    }

    /// Delete by id. Deleting a missing document reports zero deletions.
    pub fn delete_by_id(&self, id: &str) -> StoreResult<DeleteResult> {
        self.delete(&Filter::by_id(id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentId;
    use crate::storage::contract::doc;
    use crate::storage::{MemoryStore, StoreError};
    use serde_json::json;

    #[test]
    fn insert_update_delete_round() {
        let store = MemoryStore::new();
        let repo = CollectionRepository::new(&store, Collection::Players);

        let inserted = repo.insert(doc(json!({"name": "Rafi", "position": "GK"}))).unwrap();
        let updated = repo
            .upsert_by_id(&inserted.inserted_id, doc(json!({"position": "ST"})))
            .unwrap();
        assert_eq!(updated, UpdateResult::matched(true));

        let player = repo.find_by_id(&inserted.inserted_id).unwrap().unwrap();
        assert_eq!(player.get("name"), Some(&json!("Rafi")));
        assert_eq!(player.get("position"), Some(&json!("ST")));

        assert_eq!(repo.delete_by_id(&inserted.inserted_id).unwrap().deleted_count, 1);
        assert!(repo.list_all().unwrap().is_empty());
    }

    #[test]
    fn missing_documents_are_not_errors() {
        let store = MemoryStore::new();
        let repo = CollectionRepository::new(&store, Collection::MatchRecords);
        let id = DocumentId::generate();

        assert!(repo.find_by_id(id.as_str()).unwrap().is_none());
        assert_eq!(repo.delete_by_id(id.as_str()).unwrap(), DeleteResult::new(0));
        assert!(repo.list_all().unwrap().is_empty());
    }

    #[test]
    fn malformed_ids_are_store_faults() {
        let store = MemoryStore::new();
        let repo = CollectionRepository::new(&store, Collection::BestPlayers);

        assert!(matches!(repo.find_by_id("123"), Err(StoreError::InvalidId(_))));
        assert!(matches!(repo.delete_by_id("123"), Err(StoreError::InvalidId(_))));
        assert!(matches!(
            repo.upsert_by_id("123", Document::new()),
            Err(StoreError::InvalidId(_))
        ));
    }

    #[test]
    fn unset_leaves_other_fields_identical() {
        let store = MemoryStore::new();
        let repo = CollectionRepository::new(&store, Collection::Players);
        let inserted = repo
            .insert(doc(json!({"name": "Kim", "injured": true, "stats": {"goals": 7}})))
            .unwrap();
        let filter = Filter::by_id(&inserted.inserted_id).unwrap();
        let before = repo.find(&filter).unwrap().unwrap();

        repo.unset(&filter, &["injured", "missing"]).unwrap();
        let after = repo.find(&filter).unwrap().unwrap();

        assert!(after.get("injured").is_none());
        for (field, value) in before.iter().filter(|(field, _)| *field != "injured") {
            assert_eq!(after.get(field), Some(value));
        }
        assert_eq!(after.iter().count(), before.iter().count() - 1);
    }
}
