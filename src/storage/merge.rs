// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Field-level merge semantics shared by every store backend.
//!
//! Updates are never whole-document replaces. A `Set` patch overwrites the
//! fields it names and leaves every other field as stored, so a client that
//! sends a partial player profile cannot wipe the rest of it.

use serde_json::Value;

use super::{Filter, StoreError, StoreResult, Update};
use crate::models::{Document, DocumentId, UpdateResult, ID_FIELD};

/// What an update did, and which document (if any) must be written back.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// A stored document matched. `document` is its new content.
    Matched { document: Document, modified: bool },
    /// Nothing matched and a new document was built from filter and patch.
    Upserted(Document),
    /// Nothing matched and nothing was created.
    Unmatched,
}

impl UpdateOutcome {
    /// The document the backend has to persist, if any.
    pub fn document_to_write(&self) -> Option<&Document> {
        match self {
            UpdateOutcome::Matched {
                document,
                modified: true,
            } => Some(document),
            UpdateOutcome::Upserted(document) => Some(document),
            _ => None,
        }
    }

    pub fn result(&self) -> UpdateResult {
        match self {
            UpdateOutcome::Matched { modified, .. } => UpdateResult::matched(*modified),
            UpdateOutcome::Upserted(document) => {
                UpdateResult::upserted(document.id().unwrap_or_default())
            }
            UpdateOutcome::Unmatched => UpdateResult::unmatched(),
        }
    }
}

impl Update {
    /// Apply the update to a stored document. Returns whether it changed.
    pub fn apply(&self, document: &mut Document) -> StoreResult<bool> {
        match self {
            Update::Set(patch) => apply_set(document, patch),
            Update::Unset(fields) => Ok(apply_unset(document, fields)),
        }
    }
}

/// Merge `patch` into `document`.
///
/// The `_id` check runs before any field is written, so a rejected patch
/// leaves the document untouched.
pub fn apply_set(document: &mut Document, patch: &Document) -> StoreResult<bool> {
    if let (Some(stored), Some(requested)) = (document.get(ID_FIELD), patch.get(ID_FIELD)) {
        if stored != requested {
            return Err(StoreError::ImmutableId {
                stored: render(stored),
                requested: render(requested),
            });
        }
    }

    let mut modified = false;
    for (field, value) in patch.iter() {
        if document.get(field) != Some(value) {
            document.insert(field.clone(), value.clone());
            modified = true;
        }
    }
    Ok(modified)
}

/// Remove the named fields. `_id` is never removed.
pub fn apply_unset(document: &mut Document, fields: &[String]) -> bool {
    let mut modified = false;
    for field in fields.iter().filter(|field| field.as_str() != ID_FIELD) {
        modified |= document.remove(field).is_some();
    }
    modified
}

/// Decide the effect of an update given the currently matching document.
pub fn plan_update(
    existing: Option<Document>,
    filter: &Filter,
    update: &Update,
    upsert: bool,
) -> StoreResult<UpdateOutcome> {
    match (existing, update) {
        (Some(mut document), _) => {
            let modified = update.apply(&mut document)?;
            Ok(UpdateOutcome::Matched { document, modified })
        }
        (None, Update::Set(patch)) if upsert => {
            let mut document = filter.seed();
            if document.id().is_none() {
                // A string `_id` in the patch names the new document.
                let id = match patch.id() {
                    Some(id) => id.to_string(),
                    None => DocumentId::generate().to_string(),
                };
                document.insert(ID_FIELD, id);
            }
            apply_set(&mut document, patch)?;
            Ok(UpdateOutcome::Upserted(document))
        }
        // Unset never creates documents, even when asked to upsert.
        (None, _) => Ok(UpdateOutcome::Unmatched),
    }
}

/// Stamp a document with a fresh `_id`, replacing any caller-supplied one.
pub fn with_fresh_id(mut document: Document) -> (DocumentId, Document) {
    let id = DocumentId::generate();
    document.insert(ID_FIELD, id.as_str());
    (id, document)
}

fn render(value: &Value) -> String {
    value
        .as_str()
        .map(str::to_owned)
        .unwrap_or_else(|| value.to_string())
}
