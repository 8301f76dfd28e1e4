// Library crate for the volleyball shot tracker
// This file exposes the public API for integration tests

pub mod api;
pub mod config;
pub mod filter;
pub mod session;
pub mod shared;
pub mod stats;
pub mod taxonomy;
pub mod tracker;

// Re-export commonly used types for easier access in tests
pub use config::AppConfig;
pub use filter::{FilterState, VisibleShot};
pub use session::{
    CommandOutcome, GameDocument, GameRepository, GameSession, InMemoryGameRepository,
    JsonFileGameRepository, PersistenceError, RemoteSnapshot, TrackerCommand, TrackerService,
};
pub use shared::{AppError, AppState};
pub use stats::{DetailedSummary, Summary, TeamSummary};
pub use taxonomy::{Category, Outcome, ShotType};
pub use tracker::{Player, Position, Shot, ShotRecordStore, Team, TrackerError};
