use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::errors::TrackerError;
use super::models::{Player, Position, Shot, Team, MAX_PLAYER_NUMBER, MAX_SETS};
use crate::taxonomy::{Outcome, ShotType};

/// Canonical owner of both rosters and every recorded shot.
///
/// This is the only place players and shots are created or removed. It is
/// a plain value with no interior locking; callers that share it across
/// tasks wrap it themselves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShotRecordStore {
    home: Vec<Player>,
    away: Vec<Player>,
}

impl ShotRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rosters(home: Vec<Player>, away: Vec<Player>) -> Self {
        Self { home, away }
    }

    /// Players of a roster in the order they were added
    pub fn players(&self, team: Team) -> &[Player] {
        match team {
            Team::Home => &self.home,
            Team::Away => &self.away,
        }
    }

    /// Players of a roster sorted by jersey number
    pub fn players_by_number(&self, team: Team) -> Vec<&Player> {
        let mut players: Vec<&Player> = self.players(team).iter().collect();
        players.sort_by_key(|p| p.number);
        players
    }

    pub fn find_player(&self, player_id: &str) -> Option<(Team, &Player)> {
        self.home
            .iter()
            .map(|p| (Team::Home, p))
            .chain(self.away.iter().map(|p| (Team::Away, p)))
            .find(|(_, p)| p.id == player_id)
    }

    pub fn find_shot(&self, shot_id: &str) -> Option<(&Player, &Shot)> {
        self.home
            .iter()
            .chain(self.away.iter())
            .find_map(|p| p.shots.iter().find(|s| s.id == shot_id).map(|s| (p, s)))
    }

    pub fn shot_count(&self) -> usize {
        self.home
            .iter()
            .chain(self.away.iter())
            .map(|p| p.shots.len())
            .sum()
    }

    #[instrument(skip(self))]
    pub fn add_player(
        &mut self,
        team: Team,
        number: i32,
        name: &str,
    ) -> Result<Player, TrackerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TrackerError::InvalidInput(
                "Player name must not be empty".to_string(),
            ));
        }
        let number = u8::try_from(number)
            .ok()
            .filter(|n| i32::from(*n) <= MAX_PLAYER_NUMBER)
            .ok_or_else(|| {
                TrackerError::InvalidInput(format!(
                    "Player number must be between 0 and {MAX_PLAYER_NUMBER}, got {number}"
                ))
            })?;

        let roster = self.roster_mut(team);
        if roster.iter().any(|p| p.number == number) {
            warn!(%team, number, "Player number already taken");
            return Err(TrackerError::DuplicateNumber { team, number });
        }

        let player = Player::new(number, name);
        roster.push(player.clone());

        debug!(%team, player_id = %player.id, number, "Player added");
        Ok(player)
    }

    #[instrument(skip(self, position))]
    pub fn record_shot(
        &mut self,
        player_id: &str,
        shot_type: ShotType,
        outcome: Outcome,
        position: Position,
        set_number: u32,
    ) -> Result<Shot, TrackerError> {
        let player = self
            .player_mut(player_id)
            .ok_or_else(|| TrackerError::UnknownPlayer(player_id.to_string()))?;

        if !shot_type.allows(&outcome) {
            return Err(TrackerError::InvalidOutcome { shot_type, outcome });
        }
        validate_set_number(set_number)?;
        if !position.is_on_court() {
            return Err(TrackerError::InvalidInput(format!(
                "Position ({}, {}) is outside the court",
                position.x, position.y
            )));
        }

        let shot = Shot::new(shot_type, outcome, position, set_number);
        player.shots.push(shot.clone());

        debug!(shot_id = %shot.id, player_id, "Shot recorded");
        Ok(shot)
    }

    /// Removes the shot with the given id from whichever player owns it.
    ///
    /// A missing id leaves the store untouched and reports `NotFound`.
    #[instrument(skip(self))]
    pub fn delete_shot(&mut self, shot_id: &str) -> Result<Shot, TrackerError> {
        for player in self.home.iter_mut().chain(self.away.iter_mut()) {
            if let Some(index) = player.shots.iter().position(|s| s.id == shot_id) {
                let shot = player.shots.remove(index);
                debug!(shot_id, player_id = %player.id, "Shot deleted");
                return Ok(shot);
            }
        }

        debug!(shot_id, "Shot not found for deletion");
        Err(TrackerError::NotFound(shot_id.to_string()))
    }

    /// Drops every shot of `set_number` on one roster, returning how many went.
    #[instrument(skip(self))]
    pub fn clear_shots_for_set(&mut self, team: Team, set_number: u32) -> usize {
        let mut removed = 0;
        for player in self.roster_mut(team) {
            let before = player.shots.len();
            player.shots.retain(|s| s.set_number != set_number);
            removed += before - player.shots.len();
        }

        debug!(%team, set_number, removed, "Cleared shots for set");
        removed
    }

    /// Replaces both rosters wholesale. Nothing is merged.
    pub fn replace(&mut self, home: Vec<Player>, away: Vec<Player>) {
        self.home = home;
        self.away = away;
    }

    pub fn rosters(&self) -> (&[Player], &[Player]) {
        (&self.home, &self.away)
    }

    fn roster_mut(&mut self, team: Team) -> &mut Vec<Player> {
        match team {
            Team::Home => &mut self.home,
            Team::Away => &mut self.away,
        }
    }

    fn player_mut(&mut self, player_id: &str) -> Option<&mut Player> {
        self.home
            .iter_mut()
            .chain(self.away.iter_mut())
            .find(|p| p.id == player_id)
    }
}

pub fn validate_set_number(set_number: u32) -> Result<(), TrackerError> {
    if (1..=MAX_SETS).contains(&set_number) {
        Ok(())
    } else {
        Err(TrackerError::InvalidInput(format!(
            "Set number must be between 1 and {MAX_SETS}, got {set_number}"
        )))
    }
}
