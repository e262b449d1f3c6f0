// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory document store.
//!
//! Used when no data directory is configured and throughout the test suite.
//! Documents are kept per collection in insertion order. Every operation
//! holds the lock for its whole read-modify-write, which gives the same
//! single-document atomicity as the redb backend.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::merge::{plan_update, with_fresh_id};
use super::{DocumentStore, Filter, StoreError, StoreResult, Update};
use crate::models::{Collection, DeleteResult, Document, InsertResult, UpdateResult};

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn find_all(&self, collection: Collection) -> StoreResult<Vec<Document>> {
        let collections = self.collections.read();
        Ok(collections.get(&collection).cloned().unwrap_or_default())
    }

    fn find_one(&self, collection: Collection, filter: &Filter) -> StoreResult<Option<Document>> {
        let collections = self.collections.read();
        Ok(collections
            .get(&collection)
            .and_then(|documents| documents.iter().find(|doc| filter.matches(doc)))
            .cloned())
    }

    fn insert_one(&self, collection: Collection, document: Document) -> StoreResult<InsertResult> {
        let (id, document) = with_fresh_id(document);
        self.collections
            .write()
            .entry(collection)
            .or_default()
            .push(document);
        Ok(InsertResult::new(id))
    }

    fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        update: &Update,
        upsert: bool,
    ) -> StoreResult<UpdateResult> {
        let mut collections = self.collections.write();
        let documents = collections.entry(collection).or_default();

        let position = documents.iter().position(|doc| filter.matches(doc));
        let existing = position.map(|index| documents[index].clone());
        let outcome = plan_update(existing, filter, update, upsert)?;

        if let Some(document) = outcome.document_to_write() {
            match position {
                Some(index) => documents[index] = document.clone(),
                None => {
                    if documents.iter().any(|doc| doc.id() == document.id()) {
                        return Err(StoreError::DuplicateId(
                            document.id().unwrap_or_default().to_string(),
                        ));
                    }
                    documents.push(document.clone());
                }
            }
        }

        Ok(outcome.result())
    }

    fn delete_one(&self, collection: Collection, filter: &Filter) -> StoreResult<DeleteResult> {
        let mut collections = self.collections.write();
        let Some(documents) = collections.get_mut(&collection) else {
            return Ok(DeleteResult::new(0));
        };

        match documents.iter().position(|doc| filter.matches(doc)) {
            Some(index) => {
                documents.remove(index);
                Ok(DeleteResult::new(1))
            }
            None => Ok(DeleteResult::new(0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::contract::{self, doc};
    use serde_json::json;

    #[test]
    fn satisfies_store_contract() {
        contract::run_all(&MemoryStore::new());
    }

    #[test]
    fn find_all_preserves_insertion_order() {
        let store = MemoryStore::new();
        for name in ["a", "b", "c"] {
            store
                .insert_one(Collection::Players, doc(json!({"name": name})))
                .unwrap();
        }

        let names: Vec<_> = store
            .find_all(Collection::Players)
            .unwrap()
            .iter()
            .map(|doc| doc.get("name").cloned().unwrap())
            .collect();
        assert_eq!(names, vec![json!("a"), json!("b"), json!("c")]);
    }

    #[test]
    fn delete_on_untouched_collection_is_zero() {
        let store = MemoryStore::new();
        let filter = Filter::by_field("email", "x@x.com");
        assert_eq!(
            store.delete_one(Collection::Users, &filter).unwrap(),
            DeleteResult::new(0)
        );
    }
}
