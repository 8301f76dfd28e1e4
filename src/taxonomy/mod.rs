//! Fixed classification tables for volleyball shots.
//!
//! Every lookup here is pure. The string-keyed functions are the entry
//! points for identifiers coming from outside the crate; typed callers use
//! the methods on [`ShotType`] and [`Outcome`] directly.

pub mod types;


pub use types::{Category, Outcome, ShotType, NEUTRAL_COLOR};

use strum::IntoEnumIterator;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxonomyError {
    #[error("Invalid shot type: {0}")]
    InvalidShotType(String),
}

pub fn legal_outcomes(shot_type: &str) -> Result<&'static [Outcome], TaxonomyError> {
    Ok(ShotType::try_from(shot_type)?.legal_outcomes())
}

/// Never fails: unrecognised identifiers classify as [`Category::Other`].
pub fn category_of(outcome: &str) -> Category {
    Outcome::parse(outcome).category()
}

pub fn is_kill(outcome: &str) -> bool {
    Outcome::parse(outcome).is_kill()
}

pub fn is_error(outcome: &str) -> bool {
    Outcome::parse(outcome).is_error()
}

pub fn is_success(outcome: &str) -> bool {
    Outcome::parse(outcome).is_success()
}

/// Every outcome in the taxonomy, grouped by shot type in display order.
pub fn all_outcomes() -> impl Iterator<Item = &'static Outcome> {
    ShotType::iter().flat_map(|shot_type| shot_type.legal_outcomes().iter())
}
