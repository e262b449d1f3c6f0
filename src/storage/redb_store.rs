// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded document store backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! One table per collection, named after the collection:
//!
//! - `players`, `user`, `bestplayer`, `clubMatchHistory`: `_id` → document JSON bytes
//!
//! Every mutation runs in its own write transaction, so a read-modify-write
//! on one document is atomic. Lookups on fields other than `_id` scan the
//! table; collections here are club-sized.

use std::path::Path;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};

use super::merge::{plan_update, with_fresh_id};
use super::{DocumentStore, Filter, StoreError, StoreResult, Update};
use crate::models::{Collection, DeleteResult, Document, InsertResult, UpdateResult};

type DocumentTable = TableDefinition<'static, &'static str, &'static [u8]>;

fn table(collection: Collection) -> DocumentTable {
    TableDefinition::new(collection.name())
}

/// Find the first document matching `filter`, returning its key and content.
fn find_in<T>(table: &T, filter: &Filter) -> StoreResult<Option<(String, Document)>>
where
    T: ReadableTable<&'static str, &'static [u8]>,
{
    if let Filter::Id(id) = filter {
        return match table.get(id.as_str())? {
            Some(value) => {
                let document: Document = serde_json::from_slice(value.value())?;
                Ok(Some((id.as_str().to_string(), document)))
            }
            None => Ok(None),
        };
    }

    for entry in table.iter()? {
        let (key, value) = entry?;
        let document: Document = serde_json::from_slice(value.value())?;
        if filter.matches(&document) {
            return Ok(Some((key.value().to_string(), document)));
        }
    }
    Ok(None)
}

/// Document store persisted in a single redb file.
pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let db = Database::create(path)?;

        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        for collection in Collection::ALL {
            let _ = write_txn.open_table(table(collection))?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }
}

impl DocumentStore for RedbStore {
    fn find_all(&self, collection: Collection) -> StoreResult<Vec<Document>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(table(collection))?;

        let mut documents = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            documents.push(serde_json::from_slice(value.value())?);
        }
        Ok(documents)
    }

    fn find_one(&self, collection: Collection, filter: &Filter) -> StoreResult<Option<Document>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(table(collection))?;
        Ok(find_in(&table, filter)?.map(|(_, document)| document))
    }

    fn insert_one(&self, collection: Collection, document: Document) -> StoreResult<InsertResult> {
        let (id, document) = with_fresh_id(document);
        let json = serde_json::to_vec(&document)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(table(collection))?;
            table.insert(id.as_str(), json.as_slice())?;
        }
        write_txn.commit()?;
        Ok(InsertResult::new(id))
    }

    fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        update: &Update,
        upsert: bool,
    ) -> StoreResult<UpdateResult> {
        let write_txn = self.db.begin_write()?;
        let outcome = {
            let mut table = write_txn.open_table(table(collection))?;

            let existing = find_in(&table, filter)?;
            let key = existing.as_ref().map(|(key, _)| key.clone());
            let outcome = plan_update(existing.map(|(_, document)| document), filter, update, upsert)?;

            if let Some(document) = outcome.document_to_write() {
                let key = match key {
                    Some(key) => key,
                    None => {
                        let key = document.id().unwrap_or_default().to_string();
                        if table.get(key.as_str())?.is_some() {
                            return Err(StoreError::DuplicateId(key));
                        }
                        key
                    }
                };
                let json = serde_json::to_vec(document)?;
                table.insert(key.as_str(), json.as_slice())?;
            }
            outcome
        };
        write_txn.commit()?;
        Ok(outcome.result())
    }

    fn delete_one(&self, collection: Collection, filter: &Filter) -> StoreResult<DeleteResult> {
        let write_txn = self.db.begin_write()?;
        let deleted = {
            let mut table = write_txn.open_table(table(collection))?;
            match find_in(&table, filter)? {
                Some((key, _)) => {
                    table.remove(key.as_str())?;
                    1
                }
                None => 0,
            }
        };
        write_txn.commit()?;
        Ok(DeleteResult::new(deleted))
    }
}
