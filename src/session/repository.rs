use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, instrument, warn};

use super::errors::PersistenceError;
use super::models::{GameDocument, RemoteSnapshot};

/// Trait for game storage backends
#[async_trait]
pub trait GameRepository: Send + Sync {
    async fn load(&self, game_id: &str) -> Result<Option<GameDocument>, PersistenceError>;
    async fn save(&self, game_id: &str, document: &GameDocument) -> Result<(), PersistenceError>;

    /// Full-snapshot updates written by other instances, if the backend
    /// can push them.
    fn subscribe(&self) -> Option<broadcast::Receiver<RemoteSnapshot>> {
        None
    }
}

/// Shared in-memory store. Every save is pushed to all subscribers, so
/// several services over one instance behave like devices syncing through
/// a remote document store.
pub struct InMemoryGameRepository {
    games: RwLock<HashMap<String, GameDocument>>,
    updates: broadcast::Sender<RemoteSnapshot>,
}

impl Default for InMemoryGameRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryGameRepository {
    pub fn new() -> Self {
        let (updates, _) = broadcast::channel(100);
        Self {
            games: RwLock::new(HashMap::new()),
            updates,
        }
    }

    /// Creates a repository with pre-populated games
    pub fn with_games(games: Vec<(String, GameDocument)>) -> Self {
        let (updates, _) = broadcast::channel(100);
        Self {
            games: RwLock::new(games.into_iter().collect()),
            updates,
        }
    }

    pub async fn game_count(&self) -> usize {
        self.games.read().await.len()
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    #[instrument(skip(self))]
    async fn load(&self, game_id: &str) -> Result<Option<GameDocument>, PersistenceError> {
        let games = self.games.read().await;
        let document = games.get(game_id).cloned();
        debug!(game_id, found = document.is_some(), "Loaded game from memory");
        Ok(document)
    }

    #[instrument(skip(self, document))]
    async fn save(&self, game_id: &str, document: &GameDocument) -> Result<(), PersistenceError> {
        self.games
            .write()
            .await
            .insert(game_id.to_string(), document.clone());

        match self
            .updates
            .send(RemoteSnapshot::from_document(game_id, document.clone()))
        {
            Ok(receivers) => debug!(game_id, receivers, "Game saved and broadcast"),
            Err(_) => debug!(game_id, "Game saved with no subscribers"),
        }
        Ok(())
    }

    fn subscribe(&self) -> Option<broadcast::Receiver<RemoteSnapshot>> {
        Some(self.updates.subscribe())
    }
}

/// One `<game_id>.json` file per game inside a directory.
pub struct JsonFileGameRepository {
    dir: PathBuf,
}

impl JsonFileGameRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, game_id: &str) -> Result<PathBuf, PersistenceError> {
        let valid = !game_id.is_empty()
            && game_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(PersistenceError::InvalidGameId(game_id.to_string()));
        }
        Ok(self.dir.join(format!("{game_id}.json")))
    }
}

#[async_trait]
impl GameRepository for JsonFileGameRepository {
    #[instrument(skip(self))]
    async fn load(&self, game_id: &str) -> Result<Option<GameDocument>, PersistenceError> {
        let path = self.path_for(game_id)?;
        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No stored game file");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        let document = serde_json::from_slice(&raw).map_err(|err| {
            warn!(path = %path.display(), error = %err, "Stored game file is unreadable");
            PersistenceError::from(err)
        })?;
        Ok(Some(document))
    }

    #[instrument(skip(self, document))]
    async fn save(&self, game_id: &str, document: &GameDocument) -> Result<(), PersistenceError> {
        let path = self.path_for(game_id)?;
        let raw = serde_json::to_vec_pretty(document)?;

        tokio::fs::create_dir_all(&self.dir).await?;
        // Write then rename so a crash never leaves a half-written file.
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, raw).await?;
        tokio::fs::rename(&tmp, &path).await?;

        debug!(path = %path.display(), "Game saved to disk");
        Ok(())
    }
}
