//! View filters over the shot store.
//!
//! A [`FilterState`] never touches the store; the visible subset is
//! recomputed from scratch on every call.

use serde::{Deserialize, Serialize};

use crate::taxonomy::Category;
use crate::tracker::{validate_set_number, Player, Shot, ShotRecordStore, Team, TrackerError};

/// Which result categories are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFilters {
    pub success: bool,
    pub error: bool,
    pub blocked: bool,
    pub other: bool,
}

impl Default for CategoryFilters {
    fn default() -> Self {
        Self {
            success: true,
            error: true,
            blocked: true,
            other: true,
        }
    }
}

impl CategoryFilters {
    pub fn includes(&self, category: Category) -> bool {
        match category {
            Category::Success => self.success,
            Category::Error => self.error,
            Category::Blocked => self.blocked,
            Category::Other => self.other,
        }
    }

    pub fn set(&mut self, category: Category, included: bool) {
        let slot = match category {
            Category::Success => &mut self.success,
            Category::Error => &mut self.error,
            Category::Blocked => &mut self.blocked,
            Category::Other => &mut self.other,
        };
        *slot = included;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub team: Team,
    pub active_set: u32,
    /// `None` shows every player on the active roster.
    pub player_filter: Option<String>,
    pub category_filters: CategoryFilters,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            team: Team::Home,
            active_set: 1,
            player_filter: None,
            category_filters: CategoryFilters::default(),
        }
    }
}

/// A shot that passed the filters, with the player who made it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleShot<'a> {
    pub player: &'a Player,
    pub shot: &'a Shot,
}

impl FilterState {
    pub fn select_set(&mut self, set_number: u32) -> Result<(), TrackerError> {
        validate_set_number(set_number)?;
        self.active_set = set_number;
        Ok(())
    }

    pub fn select_player(&mut self, player_id: Option<String>) {
        self.player_filter = player_id;
    }

    pub fn set_category(&mut self, category: Category, included: bool) {
        self.category_filters.set(category, included);
    }

    /// Changing roster drops the player filter, which only made sense
    /// for the previous roster.
    pub fn select_team(&mut self, team: Team) {
        if self.team != team {
            self.team = team;
            self.player_filter = None;
        }
    }

    pub fn switch_team(&mut self) -> Team {
        self.select_team(self.team.other());
        self.team
    }

    pub fn shows_player(&self, player: &Player) -> bool {
        self.player_filter
            .as_deref()
            .map_or(true, |id| id == player.id)
    }

    pub fn shows_shot(&self, shot: &Shot) -> bool {
        shot.set_number == self.active_set
            && self.category_filters.includes(shot.outcome.category())
    }

    /// Shots to draw, in roster order then recording order.
    pub fn visible_shots<'a>(&self, store: &'a ShotRecordStore) -> Vec<VisibleShot<'a>> {
        store
            .players(self.team)
            .iter()
            .filter(|player| self.shows_player(player))
            .flat_map(|player| {
                player
                    .shots
                    .iter()
                    .filter(move |shot| self.shows_shot(shot))
                    .map(move |shot| VisibleShot { player, shot })
            })
            .collect()
    }
}

pub fn visible_shots<'a>(store: &'a ShotRecordStore, filter: &FilterState) -> Vec<VisibleShot<'a>> {
    filter.visible_shots(store)
}
