#![allow(dead_code)] // Test utilities may not all be used in every test

use std::collections::HashMap;
use std::sync::Arc;

use volleytrack::{
    CommandOutcome, GameRepository, InMemoryGameRepository, Team, TrackerCommand, TrackerService,
};

pub const TEST_GAME_ID: &str = "123456";

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub repository: Arc<dyn GameRepository>,
    pub tracker: Arc<TrackerService>,
    /// Player ids keyed by "<team>-<number>", e.g. "home-4"
    pub players: HashMap<String, String>,
}

impl TestSetup {
    pub fn player(&self, team: Team, number: u8) -> &str {
        self.players
            .get(&format!("{team}-{number}"))
            .map(String::as_str)
            .unwrap_or_else(|| panic!("no player {number} on the {team} roster"))
    }
}

pub struct TestSetupBuilder {
    repository: Option<Arc<dyn GameRepository>>,
    players: Vec<(Team, i32, String)>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            repository: None,
            players: vec![],
        }
    }

    pub fn with_repository(mut self, repository: Arc<dyn GameRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn with_player(mut self, team: Team, number: i32, name: &str) -> Self {
        self.players.push((team, number, name.to_string()));
        self
    }

    /// Home #4 and #8, away #4
    pub fn with_two_rosters(self) -> Self {
        self.with_player(Team::Home, 4, "Ana")
            .with_player(Team::Home, 8, "Bea")
            .with_player(Team::Away, 4, "Cleo")
    }

    pub async fn build(self) -> TestSetup {
        let repository = self
            .repository
            .unwrap_or_else(|| Arc::new(InMemoryGameRepository::new()));
        let tracker =
            Arc::new(TrackerService::load(repository.clone(), TEST_GAME_ID, "Test Game").await);

        let mut players = HashMap::new();
        for (team, number, name) in self.players {
            let outcome = tracker
                .execute(TrackerCommand::AddPlayer { team, number, name })
                .await
                .expect("adding a test player should succeed");
            match outcome {
                CommandOutcome::PlayerAdded(player) => {
                    players.insert(format!("{team}-{number}"), player.id);
                }
                other => panic!("unexpected outcome {other:?}"),
            }
        }

        TestSetup {
            repository,
            tracker,
            players,
        }
    }
}
