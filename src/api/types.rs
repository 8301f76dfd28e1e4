use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::filter::{FilterState, VisibleShot};
use crate::session::GameSession;
use crate::stats::{self, DetailedSummary, Summary, TeamSummary, PLAYER_TOP_RESULTS};
use crate::taxonomy::{Category, Outcome, ShotType};
use crate::tracker::{Player, Position, Team};

/// Request payload for adding a player to a roster
#[derive(Debug, Deserialize)]
pub struct AddPlayerRequest {
    pub number: i32,
    pub name: String,
}

/// Request payload for recording a shot; `set` defaults to the active set
#[derive(Debug, Deserialize)]
pub struct RecordShotRequest {
    pub player_id: String,
    #[serde(rename = "type")]
    pub shot_type: String,
    #[serde(rename = "result")]
    pub outcome: String,
    pub x: f64,
    pub y: f64,
    #[serde(default, rename = "set")]
    pub set_number: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct RenameGameRequest {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClearSetResponse {
    pub team: Team,
    pub set_number: u32,
    pub removed: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OutcomeInfo {
    pub id: String,
    pub label: String,
    pub category: Category,
    pub color: String,
}

impl From<&Outcome> for OutcomeInfo {
    fn from(outcome: &Outcome) -> Self {
        Self {
            id: outcome.as_str().to_string(),
            label: outcome.label().to_string(),
            category: outcome.category(),
            color: outcome.color().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShotTypeInfo {
    pub id: ShotType,
    pub label: String,
    pub outcomes: Vec<OutcomeInfo>,
}

pub fn taxonomy_listing() -> Vec<ShotTypeInfo> {
    ShotType::iter()
        .map(|shot_type| ShotTypeInfo {
            id: shot_type,
            label: shot_type.label().to_string(),
            outcomes: shot_type
                .legal_outcomes()
                .iter()
                .map(OutcomeInfo::from)
                .collect(),
        })
        .collect()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GameResponse {
    pub game_id: String,
    pub game_name: String,
    pub home_players: Vec<Player>,
    pub away_players: Vec<Player>,
    pub filter: FilterState,
}

impl From<&GameSession> for GameResponse {
    fn from(session: &GameSession) -> Self {
        let (home, away) = session.store().rosters();
        Self {
            game_id: session.game_id().to_string(),
            game_name: session.game_name().to_string(),
            home_players: home.to_vec(),
            away_players: away.to_vec(),
            filter: session.filter().clone(),
        }
    }
}

/// Roster card: a player and their running totals
#[derive(Debug, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: String,
    pub name: String,
    pub number: u8,
    pub summary: Summary,
}

impl From<&Player> for RosterEntry {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id.clone(),
            name: player.name.clone(),
            number: player.number,
            summary: stats::quick_summary(player),
        }
    }
}

/// One marker drawn on the court
#[derive(Debug, Serialize, Deserialize)]
pub struct CourtMarker {
    pub shot_id: String,
    pub player_id: String,
    pub player_number: u8,
    pub shot_type: ShotType,
    pub outcome: Outcome,
    pub category: Category,
    pub color: String,
    pub position: Position,
}

impl From<&VisibleShot<'_>> for CourtMarker {
    fn from(visible: &VisibleShot<'_>) -> Self {
        Self {
            shot_id: visible.shot.id.clone(),
            player_id: visible.player.id.clone(),
            player_number: visible.player.number,
            shot_type: visible.shot.shot_type,
            outcome: visible.shot.outcome.clone(),
            category: visible.shot.outcome.category(),
            color: visible.shot.outcome.color().to_string(),
            position: visible.shot.position,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CourtResponse {
    pub filter: FilterState,
    pub markers: Vec<CourtMarker>,
    pub summary: Summary,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResultCount {
    pub outcome: Outcome,
    pub label: String,
    pub count: u32,
}

fn result_counts(results: Vec<(Outcome, u32)>) -> Vec<ResultCount> {
    results
        .into_iter()
        .map(|(outcome, count)| ResultCount {
            label: outcome.label().to_string(),
            outcome,
            count,
        })
        .collect()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerReport {
    pub id: String,
    pub name: String,
    pub number: u8,
    pub team: Team,
    pub stats: DetailedSummary,
    pub top_results: Vec<ResultCount>,
}

impl PlayerReport {
    pub fn new(team: Team, player: &Player, stats: DetailedSummary) -> Self {
        Self {
            id: player.id.clone(),
            name: player.name.clone(),
            number: player.number,
            team,
            top_results: result_counts(stats.top_results(PLAYER_TOP_RESULTS)),
            stats,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerRow {
    pub id: String,
    #[serde(flatten)]
    pub line: stats::PlayerLine,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TeamReport {
    pub team: Team,
    pub stats: DetailedSummary,
    pub players: Vec<PlayerRow>,
    pub top_results: Vec<ResultCount>,
}

impl TeamReport {
    pub fn new(team: Team, summary: TeamSummary) -> Self {
        let players = summary
            .players_by_number()
            .into_iter()
            .map(|(id, line)| PlayerRow {
                id: id.to_string(),
                line: line.clone(),
            })
            .collect();
        let top_results = result_counts(summary.top_results());
        Self {
            team,
            stats: summary.detail,
            players,
            top_results,
        }
    }
}
