//! Shot aggregation.
//!
//! Everything here is a pure function over borrowed shots. Callers filter
//! first (see [`crate::filter`]) and summarize the result; nothing is
//! cached between calls.

mod aggregation;
pub mod models;

pub use aggregation::{aggregate_team, detailed_summarize, quick_summary, summarize};
pub use models::{
    success_rate, DetailedSummary, PlayerLine, Summary, TeamSummary, PLAYER_TOP_RESULTS,
    TEAM_TOP_RESULTS,
};
