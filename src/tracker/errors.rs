use thiserror::Error;

use super::models::Team;
use crate::taxonomy::{Outcome, ShotType, TaxonomyError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Player number {number} already exists on the {team} roster")]
    DuplicateNumber { team: Team, number: u8 },

    #[error("Unknown player: {0}")]
    UnknownPlayer(String),

    #[error("Outcome {outcome} is not legal for shot type {shot_type}")]
    InvalidOutcome { shot_type: ShotType, outcome: Outcome },

    #[error("Invalid shot type: {0}")]
    InvalidShotType(String),

    #[error("Shot not found: {0}")]
    NotFound(String),
}

impl From<TaxonomyError> for TrackerError {
    fn from(err: TaxonomyError) -> Self {
        match err {
            TaxonomyError::InvalidShotType(raw) => TrackerError::InvalidShotType(raw),
        }
    }
}
