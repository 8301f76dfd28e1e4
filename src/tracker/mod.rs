// Public API
pub use errors::TrackerError;
pub use models::{
    Player, Position, Shot, Team, COURT_HEIGHT, COURT_WIDTH, MAX_PLAYER_NUMBER, MAX_SETS,
};
pub use store::{validate_set_number, ShotRecordStore};

// Internal modules
mod errors;
pub mod models;
mod store;
