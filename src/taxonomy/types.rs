use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum_macros::EnumIter;

use super::TaxonomyError;

/// Marker color used for outcomes that carry no stronger signal.
pub const NEUTRAL_COLOR: &str = "#7F8C8D";

#[derive(
    Debug,
    Clone,
    Copy,
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
pub enum ShotType {
    Serve,
    Spike,
    Block,
    Dig,
    Set,
    Attack,
}

static SERVE_OUTCOMES: [Outcome; 4] = [
    Outcome::Ace,
    Outcome::ServiceError,
    Outcome::ServicePoint,
    Outcome::ServiceReturned,
];
static SPIKE_OUTCOMES: [Outcome; 4] = [
    Outcome::Kill,
    Outcome::SpikeError,
    Outcome::SpikeBlocked,
    Outcome::SpikeDug,
];
static BLOCK_OUTCOMES: [Outcome; 4] = [
    Outcome::BlockKill,
    Outcome::BlockError,
    Outcome::BlockTouch,
    Outcome::BlockMiss,
];
static DIG_OUTCOMES: [Outcome; 3] = [Outcome::DigSuccess, Outcome::DigError, Outcome::DigOut];
static SET_OUTCOMES: [Outcome; 3] = [Outcome::SetAssist, Outcome::SetError, Outcome::SetOver];
static ATTACK_OUTCOMES: [Outcome; 4] = [
    Outcome::AttackKill,
    Outcome::AttackError,
    Outcome::AttackBlocked,
    Outcome::AttackDug,
];

impl ShotType {
    /// Outcomes a shot of this type may be recorded with, in display order.
    pub fn legal_outcomes(self) -> &'static [Outcome] {
        match self {
            ShotType::Serve => &SERVE_OUTCOMES,
            ShotType::Spike => &SPIKE_OUTCOMES,
            ShotType::Block => &BLOCK_OUTCOMES,
            ShotType::Dig => &DIG_OUTCOMES,
            ShotType::Set => &SET_OUTCOMES,
            ShotType::Attack => &ATTACK_OUTCOMES,
        }
    }

    pub fn allows(self, outcome: &Outcome) -> bool {
        self.legal_outcomes().contains(outcome)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShotType::Serve => "serve",
            ShotType::Spike => "spike",
            ShotType::Block => "block",
            ShotType::Dig => "dig",
            ShotType::Set => "set",
            ShotType::Attack => "attack",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ShotType::Serve => "Serve",
            ShotType::Spike => "Spike",
            ShotType::Block => "Block",
            ShotType::Dig => "Dig",
            ShotType::Set => "Set",
            ShotType::Attack => "Attack",
        }
    }
}

impl fmt::Display for ShotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ShotType {
    type Error = TaxonomyError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "serve" => Ok(ShotType::Serve),
            "spike" => Ok(ShotType::Spike),
            "block" => Ok(ShotType::Block),
            "dig" => Ok(ShotType::Dig),
            "set" => Ok(ShotType::Set),
            "attack" => Ok(ShotType::Attack),
            _ => Err(TaxonomyError::InvalidShotType(s.to_string())),
        }
    }
}

impl FromStr for ShotType {
    type Err = TaxonomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShotType::try_from(s)
    }
}

/// Result category an outcome rolls up into for filtering and coloring.
#[derive(
    Debug,
    Clone,
    Copy,
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
pub enum Category {
    Success,
    Error,
    Blocked,
    Other,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Success => "success",
            Category::Error => "error",
            Category::Blocked => "blocked",
            Category::Other => "other",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Category::Success => "#52C41A",
            Category::Error => "#FF4D4F",
            Category::Blocked => "#FAAD14",
            Category::Other => "#4169E1",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The recorded result of a shot.
///
/// Identifiers that are not part of the taxonomy (legacy or hand-edited
/// data) are kept verbatim in `Unknown` so they still count in totals and
/// fall into [`Category::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Outcome {
    Ace,
    ServiceError,
    ServicePoint,
    ServiceReturned,
    Kill,
    SpikeError,
    SpikeBlocked,
    SpikeDug,
    BlockKill,
    BlockError,
    BlockTouch,
    BlockMiss,
    DigSuccess,
    DigError,
    DigOut,
    SetAssist,
    SetError,
    SetOver,
    AttackKill,
    AttackError,
    AttackBlocked,
    AttackDug,
    Unknown(String),
}

impl Outcome {
    /// Total parse: anything unrecognised becomes `Outcome::Unknown`.
    pub fn parse(s: &str) -> Outcome {
        match s {
            "ace" => Outcome::Ace,
            "service-error" => Outcome::ServiceError,
            "service-point" => Outcome::ServicePoint,
            "service-returned" => Outcome::ServiceReturned,
            "kill" => Outcome::Kill,
            "spike-error" => Outcome::SpikeError,
            "spike-blocked" => Outcome::SpikeBlocked,
            "spike-dug" => Outcome::SpikeDug,
            "block-kill" => Outcome::BlockKill,
            "block-error" => Outcome::BlockError,
            "block-touch" => Outcome::BlockTouch,
            "block-miss" => Outcome::BlockMiss,
            "dig-success" => Outcome::DigSuccess,
            "dig-error" => Outcome::DigError,
            "dig-out" => Outcome::DigOut,
            "set-assist" => Outcome::SetAssist,
            "set-error" => Outcome::SetError,
            "set-over" => Outcome::SetOver,
            "attack-kill" => Outcome::AttackKill,
            "attack-error" => Outcome::AttackError,
            "attack-blocked" => Outcome::AttackBlocked,
            "attack-dug" => Outcome::AttackDug,
            other => Outcome::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Outcome::Ace => "ace",
            Outcome::ServiceError => "service-error",
            Outcome::ServicePoint => "service-point",
            Outcome::ServiceReturned => "service-returned",
            Outcome::Kill => "kill",
            Outcome::SpikeError => "spike-error",
            Outcome::SpikeBlocked => "spike-blocked",
            Outcome::SpikeDug => "spike-dug",
            Outcome::BlockKill => "block-kill",
            Outcome::BlockError => "block-error",
            Outcome::BlockTouch => "block-touch",
            Outcome::BlockMiss => "block-miss",
            Outcome::DigSuccess => "dig-success",
            Outcome::DigError => "dig-error",
            Outcome::DigOut => "dig-out",
            Outcome::SetAssist => "set-assist",
            Outcome::SetError => "set-error",
            Outcome::SetOver => "set-over",
            Outcome::AttackKill => "attack-kill",
            Outcome::AttackError => "attack-error",
            Outcome::AttackBlocked => "attack-blocked",
            Outcome::AttackDug => "attack-dug",
            Outcome::Unknown(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Outcome::Ace => "Ace",
            Outcome::ServiceError => "Service Error",
            Outcome::ServicePoint => "Service Point",
            Outcome::ServiceReturned => "Service Returned",
            Outcome::Kill => "Kill",
            Outcome::SpikeError => "Spike Error",
            Outcome::SpikeBlocked => "Spike Blocked",
            Outcome::SpikeDug => "Spike Dug",
            Outcome::BlockKill => "Block Kill",
            Outcome::BlockError => "Block Error",
            Outcome::BlockTouch => "Block Touch",
            Outcome::BlockMiss => "Block Miss",
            Outcome::DigSuccess => "Dig Success",
            Outcome::DigError => "Dig Error",
            Outcome::DigOut => "Dig Out",
            Outcome::SetAssist => "Set Assist",
            Outcome::SetError => "Set Error",
            Outcome::SetOver => "Set Over",
            Outcome::AttackKill => "Attack Kill",
            Outcome::AttackError => "Attack Error",
            Outcome::AttackBlocked => "Attack Blocked",
            Outcome::AttackDug => "Attack Dug",
            Outcome::Unknown(raw) => raw,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Outcome::Ace
            | Outcome::Kill
            | Outcome::BlockKill
            | Outcome::AttackKill
            | Outcome::ServicePoint
            | Outcome::DigSuccess
            | Outcome::SetAssist => Category::Success,
            Outcome::ServiceError
            | Outcome::SpikeError
            | Outcome::BlockError
            | Outcome::DigError
            | Outcome::SetError
            | Outcome::AttackError
            | Outcome::BlockMiss => Category::Error,
            Outcome::SpikeBlocked | Outcome::AttackBlocked | Outcome::BlockTouch => {
                Category::Blocked
            }
            Outcome::SpikeDug
            | Outcome::AttackDug
            | Outcome::DigOut
            | Outcome::SetOver
            | Outcome::ServiceReturned
            | Outcome::Unknown(_) => Category::Other,
        }
    }

    pub fn is_kill(&self) -> bool {
        matches!(
            self,
            Outcome::Ace | Outcome::Kill | Outcome::BlockKill | Outcome::AttackKill
        )
    }

    /// Substring rule on the identifier: any `*error*` outcome counts, as
    /// does `block-miss`. This also applies to unknown identifiers.
    pub fn is_error(&self) -> bool {
        self.as_str().contains("error") || *self == Outcome::BlockMiss
    }

    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Outcome::Ace
                | Outcome::Kill
                | Outcome::BlockKill
                | Outcome::AttackKill
                | Outcome::ServicePoint
                | Outcome::DigSuccess
                | Outcome::SetAssist
        )
    }

    pub fn color(&self) -> &'static str {
        match self {
            Outcome::ServiceReturned | Outcome::Unknown(_) => NEUTRAL_COLOR,
            known => known.category().color(),
        }
    }

    /// The shot type this outcome belongs to, if it is part of the taxonomy.
    pub fn shot_type(&self) -> Option<ShotType> {
        use strum::IntoEnumIterator;

        ShotType::iter().find(|shot_type| shot_type.allows(self))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Outcome {
    fn from(s: String) -> Self {
        match Outcome::parse(&s) {
            Outcome::Unknown(_) => Outcome::Unknown(s),
            known => known,
        }
    }
}

impl From<&str> for Outcome {
    fn from(s: &str) -> Self {
        Outcome::parse(s)
    }
}

impl From<Outcome> for String {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}
