#![allow(dead_code)] // Test utilities may not all be used in every test

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{broadcast, Semaphore};

use volleytrack::{
    GameDocument, GameRepository, InMemoryGameRepository, PersistenceError, RemoteSnapshot,
};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Storage that is never reachable
pub struct UnavailableGameRepository;

#[async_trait]
impl GameRepository for UnavailableGameRepository {
    async fn load(&self, _game_id: &str) -> Result<Option<GameDocument>, PersistenceError> {
        Err(PersistenceError::Unavailable("network down".to_string()))
    }

    async fn save(
        &self,
        _game_id: &str,
        _document: &GameDocument,
    ) -> Result<(), PersistenceError> {
        Err(PersistenceError::Unavailable("network down".to_string()))
    }
}

/// In-memory storage that counts saves
pub struct CountingGameRepository {
    inner: InMemoryGameRepository,
    saves: AtomicUsize,
}

impl CountingGameRepository {
    pub fn new() -> Self {
        Self {
            inner: InMemoryGameRepository::new(),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GameRepository for CountingGameRepository {
    async fn load(&self, game_id: &str) -> Result<Option<GameDocument>, PersistenceError> {
        self.inner.load(game_id).await
    }

    async fn save(&self, game_id: &str, document: &GameDocument) -> Result<(), PersistenceError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(game_id, document).await
    }

    fn subscribe(&self) -> Option<broadcast::Receiver<RemoteSnapshot>> {
        self.inner.subscribe()
    }
}

/// In-memory storage whose saves stall until released
pub struct GatedGameRepository {
    inner: InMemoryGameRepository,
    gate: Semaphore,
    saved: AtomicUsize,
}

impl GatedGameRepository {
    pub fn new() -> Self {
        Self {
            inner: InMemoryGameRepository::new(),
            gate: Semaphore::new(0),
            saved: AtomicUsize::new(0),
        }
    }

    /// Lets the next `saves` pending or future saves complete
    pub fn release(&self, saves: usize) {
        self.gate.add_permits(saves);
    }

    pub fn saved_count(&self) -> usize {
        self.saved.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GameRepository for GatedGameRepository {
    async fn load(&self, game_id: &str) -> Result<Option<GameDocument>, PersistenceError> {
        self.inner.load(game_id).await
    }

    async fn save(&self, game_id: &str, document: &GameDocument) -> Result<(), PersistenceError> {
        self.gate
            .acquire()
            .await
            .map_err(|err| PersistenceError::Unavailable(err.to_string()))?
            .forget();
        self.inner.save(game_id, document).await?;
        self.saved.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
