use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::EnumIter;
use uuid::Uuid;

use crate::taxonomy::{Outcome, ShotType};

pub const MAX_PLAYER_NUMBER: i32 = 99;
pub const MAX_SETS: u32 = 5;
pub const COURT_WIDTH: f64 = 200.0;
pub const COURT_HEIGHT: f64 = 300.0;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    #[default]
    Home,
    Away,
}

impl Team {
    pub fn other(self) -> Team {
        match self {
            Team::Home => Team::Away,
            Team::Away => Team::Home,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Team::Home => "home",
            Team::Away => "away",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Team {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "home" => Ok(Team::Home),
            "away" => Ok(Team::Away),
            _ => Err(s.to_string()),
        }
    }
}

/// Court coordinates, x in [0, 200] and y in [0, 300].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_on_court(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && (0.0..=COURT_WIDTH).contains(&self.x)
            && (0.0..=COURT_HEIGHT).contains(&self.y)
    }
}

/// A single recorded action. Never mutated once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub id: String,
    #[serde(rename = "type")]
    pub shot_type: ShotType,
    #[serde(rename = "result")]
    pub outcome: Outcome,
    pub position: Position,
    #[serde(rename = "set")]
    pub set_number: u32,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Shot {
    /// Creates a shot with a fresh id and the current time
    pub fn new(shot_type: ShotType, outcome: Outcome, position: Position, set_number: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            shot_type,
            outcome,
            position,
            set_number,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub number: u8,
    #[serde(default)]
    pub shots: Vec<Shot>,
}

impl Player {
    pub fn new(number: u8, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            number,
            shots: Vec::new(),
        }
    }

    pub fn has_shots(&self) -> bool {
        !self.shots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_toggle() {
        assert_eq!(Team::Home.other(), Team::Away);
        assert_eq!(Team::Away.other(), Team::Home);
        assert_eq!(Team::try_from("away"), Ok(Team::Away));
        assert!(Team::try_from("visitors").is_err());
    }

    #[test]
    fn test_position_bounds() {
        assert!(Position::new(0.0, 0.0).is_on_court());
        assert!(Position::new(200.0, 300.0).is_on_court());
        assert!(!Position::new(200.1, 10.0).is_on_court());
        assert!(!Position::new(10.0, -1.0).is_on_court());
        assert!(!Position::new(f64::NAN, 10.0).is_on_court());
    }

    #[test]
    fn test_shot_uses_original_document_field_names() {
        let shot = Shot::new(ShotType::Spike, Outcome::Kill, Position::new(10.0, 20.0), 2);
        let json = serde_json::to_value(&shot).unwrap();

        assert_eq!(json["type"], "spike");
        assert_eq!(json["result"], "kill");
        assert_eq!(json["set"], 2);
        assert_eq!(json["position"]["x"], 10.0);
        assert!(json.get("timestamp").is_some());
    }

    #[test]
    fn test_player_without_shots_field_deserializes() {
        let player: Player =
            serde_json::from_str(r#"{"id":"1700000000000","name":"Ana","number":4}"#).unwrap();
        assert_eq!(player.number, 4);
        assert!(player.shots.is_empty());
    }
}
