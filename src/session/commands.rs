use serde::{Deserialize, Serialize};

use crate::filter::FilterState;
use crate::taxonomy::Category;
use crate::tracker::{Player, Shot, Team};

/// Everything a presentation layer can ask a game session to do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackerCommand {
    AddPlayer {
        team: Team,
        number: i32,
        name: String,
    },
    RecordShot {
        player_id: String,
        shot_type: String,
        outcome: String,
        x: f64,
        y: f64,
        /// Defaults to the active set
        #[serde(default)]
        set_number: Option<u32>,
    },
    DeleteShot {
        shot_id: String,
    },
    /// Defaults to the active roster and set
    ClearSet {
        #[serde(default)]
        team: Option<Team>,
        #[serde(default)]
        set_number: Option<u32>,
    },
    SelectSet {
        set_number: u32,
    },
    SelectPlayer {
        player_id: String,
    },
    ShowAllPlayers,
    SetCategoryFilter {
        category: Category,
        included: bool,
    },
    SelectTeam {
        team: Team,
    },
    SwitchTeam,
    RenameGame {
        name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandOutcome {
    PlayerAdded(Player),
    ShotRecorded(Shot),
    ShotDeleted(Shot),
    SetCleared {
        team: Team,
        set_number: u32,
        removed: usize,
    },
    FilterChanged(FilterState),
    GameRenamed { name: String },
}

impl CommandOutcome {
    /// Whether stored game data changed and should be persisted.
    pub fn changes_data(&self) -> bool {
        match self {
            CommandOutcome::PlayerAdded(_)
            | CommandOutcome::ShotRecorded(_)
            | CommandOutcome::ShotDeleted(_)
            | CommandOutcome::GameRenamed { .. } => true,
            CommandOutcome::SetCleared { removed, .. } => *removed > 0,
            CommandOutcome::FilterChanged(_) => false,
        }
    }
}
