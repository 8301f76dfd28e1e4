// Public API - what other modules can use
pub use commands::{CommandOutcome, TrackerCommand};
pub use errors::PersistenceError;
pub use game::GameSession;
pub use models::{generate_game_id, GameDocument, RemoteSnapshot};
pub use repository::{GameRepository, InMemoryGameRepository, JsonFileGameRepository};
pub use service::TrackerService;

// Internal modules
mod commands;
mod errors;
mod game;
pub mod models;
pub mod repository;
mod service;
