use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tracker::Player;

/// Persisted form of a game, keyed by game id.
///
/// Field names follow the stored document layout (`homePlayers`,
/// `awayPlayers`, `gameName`, `lastUpdated`) so existing data loads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDocument {
    #[serde(default)]
    pub home_players: Vec<Player>,
    #[serde(default)]
    pub away_players: Vec<Player>,
    #[serde(default)]
    pub game_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    /// Instance that wrote this revision, so writers can ignore their own echoes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub writer: Option<String>,
}

/// Full-state update pushed by a remote store. Applied by replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteSnapshot {
    pub game_id: String,
    pub writer: Option<String>,
    pub home_roster: Vec<Player>,
    pub away_roster: Vec<Player>,
    pub game_name: String,
}

impl RemoteSnapshot {
    pub fn from_document(game_id: &str, document: GameDocument) -> Self {
        Self {
            game_id: game_id.to_string(),
            writer: document.writer,
            home_roster: document.home_players,
            away_roster: document.away_players,
            game_name: document.game_name,
        }
    }
}

/// Six-digit id used to share a game between devices
pub fn generate_game_id() -> String {
    rand::rng().random_range(100_000..1_000_000).to_string()
}
