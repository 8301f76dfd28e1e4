use std::sync::{Arc, Weak};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{mpsc, oneshot, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::commands::{CommandOutcome, TrackerCommand};
use super::game::GameSession;
use super::models::{GameDocument, RemoteSnapshot};
use super::repository::GameRepository;
use crate::tracker::TrackerError;

/// Work for the background writer, handled strictly in send order.
#[derive(Debug)]
enum PersistRequest {
    Save {
        game_id: String,
        document: GameDocument,
    },
    Flush(oneshot::Sender<()>),
}

/// Owns the live game session and keeps the repository in step with it.
///
/// Saves are queued to a writer task, so storage latency or failure never
/// holds the session lock. Failures are logged and the session keeps
/// working locally.
pub struct TrackerService {
    session: RwLock<GameSession>,
    repository: Arc<dyn GameRepository>,
    instance_id: String,
    persist_tx: mpsc::UnboundedSender<PersistRequest>,
}

impl TrackerService {
    /// Must be called inside a tokio runtime; spawns the writer task.
    pub fn new(session: GameSession, repository: Arc<dyn GameRepository>) -> Self {
        let (persist_tx, persist_rx) = mpsc::unbounded_channel();
        spawn_writer(Arc::clone(&repository), persist_rx);

        Self {
            session: RwLock::new(session),
            repository,
            instance_id: Uuid::new_v4().to_string(),
            persist_tx,
        }
    }

    /// Starts from the stored game, or an empty one named `fallback_name`
    /// when nothing is stored or storage is unreachable.
    #[instrument(skip(repository))]
    pub async fn load(
        repository: Arc<dyn GameRepository>,
        game_id: &str,
        fallback_name: &str,
    ) -> Self {
        let session = match repository.load(game_id).await {
            Ok(Some(document)) => {
                info!(game_id, "Loaded stored game");
                GameSession::from_document(game_id, document)
            }
            Ok(None) => {
                info!(game_id, "No stored game, starting empty");
                GameSession::new(game_id, fallback_name)
            }
            Err(err) => {
                warn!(game_id, error = %err, "Failed to load game, continuing locally");
                GameSession::new(game_id, fallback_name)
            }
        };
        Self::new(session, repository)
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    #[instrument(skip(self), fields(instance_id = %self.instance_id))]
    pub async fn execute(&self, command: TrackerCommand) -> Result<CommandOutcome, TrackerError> {
        let mut session = self.session.write().await;
        let outcome = session.execute(command)?;

        if outcome.changes_data() {
            // Queued while the lock is held so snapshots reach the writer in order.
            let request = PersistRequest::Save {
                game_id: session.game_id().to_string(),
                document: session.snapshot(Some(&self.instance_id)),
            };
            if self.persist_tx.send(request).is_err() {
                warn!(
                    game_id = %session.game_id(),
                    "Persistence writer stopped, change kept locally"
                );
            }
        }

        Ok(outcome)
    }

    /// Waits until every save queued before this call has been attempted.
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.persist_tx.send(PersistRequest::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.await;
        }
    }

    /// Runs a query against the current session.
    pub async fn read<R>(&self, f: impl FnOnce(&GameSession) -> R) -> R {
        let session = self.session.read().await;
        f(&session)
    }

    /// Applies a snapshot written elsewhere. Echoes of our own saves are skipped.
    pub async fn apply_remote_snapshot(&self, snapshot: RemoteSnapshot) -> bool {
        if snapshot.writer.as_deref() == Some(self.instance_id.as_str()) {
            debug!(game_id = %snapshot.game_id, "Skipping own snapshot");
            return false;
        }
        self.session.write().await.apply_remote_snapshot(snapshot)
    }

    /// Follows remote updates until the repository stops publishing or the
    /// service is dropped. `None` when the repository cannot push updates.
    pub fn spawn_remote_listener(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        let mut receiver = self.repository.subscribe()?;
        let service: Weak<Self> = Arc::downgrade(self);
        let instance_id = self.instance_id.clone();

        info!(instance_id = %instance_id, "Starting remote snapshot listener");

        Some(tokio::spawn(async move {
            loop {
                let snapshot = match receiver.recv().await {
                    Ok(snapshot) => snapshot,
                    Err(RecvError::Lagged(skipped)) => {
                        // Snapshots are full state, so the next one catches us up.
                        warn!(instance_id = %instance_id, skipped, "Remote listener lagged");
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };

                let Some(service) = service.upgrade() else {
                    break;
                };
                service.apply_remote_snapshot(snapshot).await;
            }

            warn!(instance_id = %instance_id, "Remote snapshot listener ended");
        }))
    }
}

/// Drains save requests one at a time until the service is dropped.
fn spawn_writer(
    repository: Arc<dyn GameRepository>,
    mut requests: mpsc::UnboundedReceiver<PersistRequest>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(request) = requests.recv().await {
            match request {
                PersistRequest::Save { game_id, document } => {
                    if let Err(err) = repository.save(&game_id, &document).await {
                        warn!(game_id = %game_id, error = %err, "Failed to persist game");
                    }
                }
                PersistRequest::Flush(ack) => {
                    let _ = ack.send(());
                }
            }
        }

        debug!("Persistence writer stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::errors::PersistenceError;
    use crate::session::models::GameDocument;
    use crate::session::repository::InMemoryGameRepository;
    use crate::tracker::{Player, Team};
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::sync::Semaphore;
    use tokio::time::timeout;

    struct UnavailableRepository;

    #[async_trait]
    impl GameRepository for UnavailableRepository {
        async fn load(&self, _game_id: &str) -> Result<Option<GameDocument>, PersistenceError> {
            Err(PersistenceError::Unavailable("offline".to_string()))
        }
        async fn save(
            &self,
            _game_id: &str,
            _document: &GameDocument,
        ) -> Result<(), PersistenceError> {
            Err(PersistenceError::Unavailable("offline".to_string()))
        }
    }

    /// Every save waits for a permit before reaching the inner store.
    struct GatedRepository {
        inner: InMemoryGameRepository,
        gate: Semaphore,
    }

    impl GatedRepository {
        fn new() -> Self {
            Self {
                inner: InMemoryGameRepository::new(),
                gate: Semaphore::new(0),
            }
        }

        fn release(&self, saves: usize) {
            self.gate.add_permits(saves);
        }
    }

    #[async_trait]
    impl GameRepository for GatedRepository {
        async fn load(&self, game_id: &str) -> Result<Option<GameDocument>, PersistenceError> {
            self.inner.load(game_id).await
        }

        async fn save(
            &self,
            game_id: &str,
            document: &GameDocument,
        ) -> Result<(), PersistenceError> {
            self.gate
                .acquire()
                .await
                .map_err(|err| PersistenceError::Unavailable(err.to_string()))?
                .forget();
            self.inner.save(game_id, document).await
        }
    }

    fn add_player(number: i32, name: &str) -> TrackerCommand {
        TrackerCommand::AddPlayer {
            team: Team::Home,
            number,
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_load_missing_game_starts_empty() {
        let repo = Arc::new(InMemoryGameRepository::new());
        let service = TrackerService::load(repo, "123456", "Fallback").await;

        let (name, shots) = service
            .read(|s| (s.game_name().to_string(), s.store().shot_count()))
            .await;
        assert_eq!(name, "Fallback");
        assert_eq!(shots, 0);
    }

    #[tokio::test]
    async fn test_execute_persists_data_changes() {
        let repo = Arc::new(InMemoryGameRepository::new());
        let service = TrackerService::load(repo.clone(), "123456", "Game").await;

        service.execute(add_player(7, "Seven")).await.unwrap();
        service.flush().await;

        let stored = repo.load("123456").await.unwrap().unwrap();
        assert_eq!(stored.home_players.len(), 1);
        assert_eq!(stored.writer.as_deref(), Some(service.instance_id()));
        assert!(stored.last_updated.is_some());
    }

    #[tokio::test]
    async fn test_filter_changes_are_not_persisted() {
        let repo = Arc::new(InMemoryGameRepository::new());
        let service = TrackerService::load(repo.clone(), "123456", "Game").await;

        service.execute(TrackerCommand::SwitchTeam).await.unwrap();
        service.flush().await;

        assert_eq!(repo.game_count().await, 0);
    }

    #[tokio::test]
    async fn test_failed_command_is_not_persisted() {
        let repo = Arc::new(InMemoryGameRepository::new());
        let service = TrackerService::load(repo.clone(), "123456", "Game").await;

        let result = service.execute(add_player(100, "Too Big")).await;
        assert!(matches!(result, Err(TrackerError::InvalidInput(_))));
        service.flush().await;
        assert_eq!(repo.game_count().await, 0);
    }

    #[tokio::test]
    async fn test_storage_failure_degrades_to_local() {
        let service =
            TrackerService::load(Arc::new(UnavailableRepository), "123456", "Offline").await;

        let outcome = service.execute(add_player(3, "Three")).await.unwrap();
        assert!(matches!(outcome, CommandOutcome::PlayerAdded(_)));
        service.flush().await;
        assert_eq!(service.read(|s| s.store().players(Team::Home).len()).await, 1);
    }

    #[tokio::test]
    async fn test_slow_save_does_not_block_reads_or_commands() {
        let repo = Arc::new(GatedRepository::new());
        let service = TrackerService::new(GameSession::new("123456", "Game"), repo.clone());
        let wait = Duration::from_millis(500);

        timeout(wait, service.execute(add_player(1, "One")))
            .await
            .expect("command should not wait for storage")
            .unwrap();
        // Let the writer pick up the first save and park on the gate.
        tokio::task::yield_now().await;

        let players = timeout(wait, service.read(|s| s.store().players(Team::Home).len()))
            .await
            .expect("read should not wait for storage");
        assert_eq!(players, 1);

        timeout(wait, service.execute(add_player(2, "Two")))
            .await
            .expect("second command should not wait for storage")
            .unwrap();
        assert_eq!(repo.inner.game_count().await, 0);

        repo.release(2);
        service.flush().await;

        let stored = repo.inner.load("123456").await.unwrap().unwrap();
        assert_eq!(stored.home_players.len(), 2, "the later snapshot must land last");
    }

    #[tokio::test]
    async fn test_flush_waits_for_queued_saves() {
        let repo = Arc::new(InMemoryGameRepository::new());
        let service = TrackerService::new(GameSession::new("123456", "Game"), repo.clone());

        for number in 1..=5 {
            service.execute(add_player(number, "Player")).await.unwrap();
        }
        service.flush().await;

        let stored = repo.load("123456").await.unwrap().unwrap();
        assert_eq!(stored.home_players.len(), 5);
    }

    #[tokio::test]
    async fn test_own_snapshot_is_ignored() {
        let repo = Arc::new(InMemoryGameRepository::new());
        let service = TrackerService::load(repo, "123456", "Game").await;

        let applied = service
            .apply_remote_snapshot(RemoteSnapshot {
                game_id: "123456".to_string(),
                writer: Some(service.instance_id().to_string()),
                home_roster: vec![Player::new(1, "Echo")],
                away_roster: vec![],
                game_name: "Echo".to_string(),
            })
            .await;

        assert!(!applied);
        assert_eq!(service.read(|s| s.game_name().to_string()).await, "Game");
    }

    #[tokio::test]
    async fn test_remote_listener_syncs_two_services() {
        let repo = Arc::new(InMemoryGameRepository::new());
        let first = Arc::new(TrackerService::load(repo.clone(), "123456", "Game").await);
        let second = Arc::new(TrackerService::load(repo.clone(), "123456", "Game").await);
        let _listener = second.spawn_remote_listener().unwrap();

        first.execute(add_player(9, "Nine")).await.unwrap();

        let mut synced = false;
        for _ in 0..50 {
            if second.read(|s| s.store().players(Team::Home).len()).await == 1 {
                synced = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(synced, "second service never saw the new player");
    }

    #[tokio::test]
    async fn test_no_listener_without_push_support() {
        let service = Arc::new(TrackerService::new(
            GameSession::new("123456", "Game"),
            Arc::new(UnavailableRepository),
        ));
        assert!(service.spawn_remote_listener().is_none());
    }
}
