// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response structures shared by the storage layer and the REST
//! API. Resource payloads are opaque JSON objects; the only field the service
//! interprets on players, best players and match records is `_id`.
//!
//! ## Model Categories
//!
//! - **Documents**: [`Document`], [`DocumentId`] and the [`Collection`] they live in
//! - **Write results**: [`UpdateResult`], [`InsertResult`], [`DeleteResult`]
//! - **Auth responses**: [`LoginResponse`], [`AdminStatus`]

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;

/// Name of the identity field carried by every stored document.
pub const ID_FIELD: &str = "_id";

// =============================================================================
// Collections
// =============================================================================

/// The four collections served by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Players,
    Users,
    BestPlayers,
    MatchRecords,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Players,
        Collection::Users,
        Collection::BestPlayers,
        Collection::MatchRecords,
    ];

    /// Storage name of the collection.
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Players => "players",
            Collection::Users => "user",
            Collection::BestPlayers => "bestplayer",
            Collection::MatchRecords => "clubMatchHistory",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Document Identity
// =============================================================================

/// Store-generated document identifier (hyphenated UUID v4).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct DocumentId(String);

impl DocumentId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        DocumentId(Uuid::new_v4().to_string())
    }

    /// Parse a caller-supplied identifier.
    pub fn parse(raw: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(raw).map(|uuid| DocumentId(uuid.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<DocumentId> for String {
    fn from(value: DocumentId) -> Self {
        value.0
    }
}

// =============================================================================
// Documents
// =============================================================================

/// A schemaless JSON document.
///
/// Serializes as a plain JSON object. Handlers never inspect resource fields;
/// the storage layer only reads `_id` and whatever field a filter names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct Document(Map<String, Value>);

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// The document's `_id`, if it has a string one.
    pub fn id(&self) -> Option<&str> {
        self.0.get(ID_FIELD).and_then(Value::as_str)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.into(), value.into())
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

// =============================================================================
// Write Results
// =============================================================================

/// Outcome of an update (merge-set or unset), optionally upserting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    /// Documents matched by the filter (0 or 1).
    pub matched_count: u64,
    /// Documents whose content actually changed (0 or 1).
    pub modified_count: u64,
    /// Identifier of the document created by an upsert.
    pub upserted_id: Option<String>,
    pub upserted_count: u64,
}

impl UpdateResult {
    pub fn matched(modified: bool) -> Self {
        Self {
            acknowledged: true,
            matched_count: 1,
            modified_count: u64::from(modified),
            upserted_id: None,
            upserted_count: 0,
        }
    }

    pub fn upserted(id: impl Into<String>) -> Self {
        Self {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_id: Some(id.into()),
            upserted_count: 1,
        }
    }

    pub fn unmatched() -> Self {
        Self {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_id: None,
            upserted_count: 0,
        }
    }

    /// Whether this update created a new document.
    pub fn is_upsert(&self) -> bool {
        self.upserted_count > 0
    }
}

/// Outcome of an insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    pub acknowledged: bool,
    pub inserted_id: String,
}

impl InsertResult {
    pub fn new(inserted_id: impl Into<String>) -> Self {
        Self {
            acknowledged: true,
            inserted_id: inserted_id.into(),
        }
    }
}

/// Outcome of a delete. Deleting a missing document is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteResult {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}

// =============================================================================
// Auth Responses
// =============================================================================

/// Response for `PUT /user/{email}`: the upsert outcome plus a fresh token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub result: UpdateResult,
    /// Bearer token bound to the email in the path.
    pub token: String,
}

/// Response for `GET /admin/{email}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AdminStatus {
    pub admin: bool,
}
