// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::TokenKeys;
use crate::models::Collection;
use crate::storage::{CollectionRepository, DocumentStore, StoreResult, UserRepository};

/// Shared handler state: the document store and the token keys.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub tokens: Arc<TokenKeys>,
}

impl AppState {
    pub fn new(store: impl DocumentStore + 'static, tokens: TokenKeys) -> Self {
        Self {
            store: Arc::new(store),
            tokens: Arc::new(tokens),
        }
    }

    /// Run a store operation on the blocking pool.
    ///
    /// Store backends do synchronous I/O. Handlers go through here so a slow
    /// read or write parks only the request that issued it.
    pub async fn blocking<T, F>(&self, op: F) -> StoreResult<T>
    where
        F: FnOnce(&AppState) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let state = self.clone();
        tokio::task::spawn_blocking(move || op(&state)).await?
    }

    pub fn players(&self) -> CollectionRepository<'_> {
        CollectionRepository::new(self.store.as_ref(), Collection::Players)
    }

    pub fn best_players(&self) -> CollectionRepository<'_> {
        CollectionRepository::new(self.store.as_ref(), Collection::BestPlayers)
    }

    pub fn match_records(&self) -> CollectionRepository<'_> {
        CollectionRepository::new(self.store.as_ref(), Collection::MatchRecords)
    }

    pub fn users(&self) -> UserRepository<'_> {
        UserRepository::new(self.store.as_ref())
    }
}

#[cfg(test)]
impl AppState {
    /// In-memory state signed with a fixed test secret.
    pub(crate) fn for_tests() -> Self {
        Self::new(
            crate::storage::MemoryStore::new(),
            TokenKeys::from_secret(b"test-secret"),
        )
    }
}
