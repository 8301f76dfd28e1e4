use chrono::Utc;
use tracing::{debug, info};

use super::commands::{CommandOutcome, TrackerCommand};
use super::models::{GameDocument, RemoteSnapshot};
use crate::filter::{FilterState, VisibleShot};
use crate::stats::{self, DetailedSummary, Summary, TeamSummary};
use crate::taxonomy::{Outcome, ShotType};
use crate::tracker::{
    validate_set_number, Player, Position, Shot, ShotRecordStore, Team, TrackerError,
};

/// One game being recorded: the store, the current view filters and the
/// game's identity. Every component reads and writes through this value.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    game_id: String,
    game_name: String,
    store: ShotRecordStore,
    filter: FilterState,
}

impl GameSession {
    pub fn new(game_id: impl Into<String>, game_name: impl Into<String>) -> Self {
        Self {
            game_id: game_id.into(),
            game_name: game_name.into(),
            store: ShotRecordStore::new(),
            filter: FilterState::default(),
        }
    }

    pub fn from_document(game_id: impl Into<String>, document: GameDocument) -> Self {
        Self {
            game_id: game_id.into(),
            game_name: document.game_name,
            store: ShotRecordStore::from_rosters(document.home_players, document.away_players),
            filter: FilterState::default(),
        }
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub fn game_name(&self) -> &str {
        &self.game_name
    }

    pub fn store(&self) -> &ShotRecordStore {
        &self.store
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn add_player(
        &mut self,
        team: Team,
        number: i32,
        name: &str,
    ) -> Result<Player, TrackerError> {
        self.store.add_player(team, number, name)
    }

    /// Records a shot from raw identifiers; `set_number` defaults to the
    /// active set.
    pub fn record_shot(
        &mut self,
        player_id: &str,
        shot_type: &str,
        outcome: &str,
        position: Position,
        set_number: Option<u32>,
    ) -> Result<Shot, TrackerError> {
        let shot_type = ShotType::try_from(shot_type)?;
        let outcome = Outcome::parse(outcome);
        let set_number = set_number.unwrap_or(self.filter.active_set);
        self.store
            .record_shot(player_id, shot_type, outcome, position, set_number)
    }

    pub fn delete_shot(&mut self, shot_id: &str) -> Result<Shot, TrackerError> {
        self.store.delete_shot(shot_id)
    }

    /// Defaults to the team and set currently in view.
    pub fn clear_set(
        &mut self,
        team: Option<Team>,
        set_number: Option<u32>,
    ) -> Result<(Team, u32, usize), TrackerError> {
        let team = team.unwrap_or(self.filter.team);
        let set_number = set_number.unwrap_or(self.filter.active_set);
        validate_set_number(set_number)?;
        let removed = self.store.clear_shots_for_set(team, set_number);
        Ok((team, set_number, removed))
    }

    /// Only players on the active roster can be singled out.
    pub fn select_player(&mut self, player_id: &str) -> Result<(), TrackerError> {
        let on_active_roster = self
            .store
            .players(self.filter.team)
            .iter()
            .any(|p| p.id == player_id);
        if !on_active_roster {
            return Err(TrackerError::UnknownPlayer(player_id.to_string()));
        }
        self.filter.select_player(Some(player_id.to_string()));
        Ok(())
    }

    pub fn rename(&mut self, name: &str) -> String {
        self.game_name = name.trim().to_string();
        self.game_name.clone()
    }

    pub fn execute(&mut self, command: TrackerCommand) -> Result<CommandOutcome, TrackerError> {
        debug!(game_id = %self.game_id, ?command, "Executing command");

        let outcome = match command {
            TrackerCommand::AddPlayer { team, number, name } => {
                CommandOutcome::PlayerAdded(self.add_player(team, number, &name)?)
            }
            TrackerCommand::RecordShot {
                player_id,
                shot_type,
                outcome,
                x,
                y,
                set_number,
            } => CommandOutcome::ShotRecorded(self.record_shot(
                &player_id,
                &shot_type,
                &outcome,
                Position::new(x, y),
                set_number,
            )?),
            TrackerCommand::DeleteShot { shot_id } => {
                CommandOutcome::ShotDeleted(self.delete_shot(&shot_id)?)
            }
            TrackerCommand::ClearSet { team, set_number } => {
                let (team, set_number, removed) = self.clear_set(team, set_number)?;
                CommandOutcome::SetCleared {
                    team,
                    set_number,
                    removed,
                }
            }
            TrackerCommand::SelectSet { set_number } => {
                self.filter.select_set(set_number)?;
                CommandOutcome::FilterChanged(self.filter.clone())
            }
            TrackerCommand::SelectPlayer { player_id } => {
                self.select_player(&player_id)?;
                CommandOutcome::FilterChanged(self.filter.clone())
            }
            TrackerCommand::ShowAllPlayers => {
                self.filter.select_player(None);
                CommandOutcome::FilterChanged(self.filter.clone())
            }
            TrackerCommand::SetCategoryFilter { category, included } => {
                self.filter.set_category(category, included);
                CommandOutcome::FilterChanged(self.filter.clone())
            }
            TrackerCommand::SelectTeam { team } => {
                self.filter.select_team(team);
                CommandOutcome::FilterChanged(self.filter.clone())
            }
            TrackerCommand::SwitchTeam => {
                self.filter.switch_team();
                CommandOutcome::FilterChanged(self.filter.clone())
            }
            TrackerCommand::RenameGame { name } => CommandOutcome::GameRenamed {
                name: self.rename(&name),
            },
        };

        Ok(outcome)
    }

    pub fn visible_shots(&self) -> Vec<VisibleShot<'_>> {
        self.filter.visible_shots(&self.store)
    }

    /// Summary of exactly what the court currently shows
    pub fn visible_summary(&self) -> Summary {
        stats::summarize(self.visible_shots().iter().map(|v| v.shot))
    }

    pub fn player_summary(
        &self,
        player_id: &str,
    ) -> Result<(Team, &Player, DetailedSummary), TrackerError> {
        let (team, player) = self
            .store
            .find_player(player_id)
            .ok_or_else(|| TrackerError::UnknownPlayer(player_id.to_string()))?;
        Ok((team, player, stats::detailed_summarize(&player.shots)))
    }

    pub fn team_summary(&self, team: Team) -> TeamSummary {
        stats::aggregate_team(self.store.players(team))
    }

    pub fn snapshot(&self, writer: Option<&str>) -> GameDocument {
        let (home, away) = self.store.rosters();
        GameDocument {
            home_players: home.to_vec(),
            away_players: away.to_vec(),
            game_name: self.game_name.clone(),
            last_updated: Some(Utc::now()),
            writer: writer.map(str::to_string),
        }
    }

    /// Replaces local rosters and name with a remote snapshot. Never merges.
    ///
    /// Returns `false` when the snapshot belongs to another game.
    pub fn apply_remote_snapshot(&mut self, snapshot: RemoteSnapshot) -> bool {
        if snapshot.game_id != self.game_id {
            debug!(
                game_id = %self.game_id,
                snapshot_game_id = %snapshot.game_id,
                "Ignoring snapshot for another game"
            );
            return false;
        }

        self.store.replace(snapshot.home_roster, snapshot.away_roster);
        self.game_name = snapshot.game_name;

        let filtered_player_gone = self.filter.player_filter.as_deref().is_some_and(|id| {
            !self
                .store
                .players(self.filter.team)
                .iter()
                .any(|p| p.id == id)
        });
        if filtered_player_gone {
            self.filter.select_player(None);
        }

        info!(
            game_id = %self.game_id,
            shots = self.store.shot_count(),
            "Applied remote snapshot"
        );
        true
    }
}
