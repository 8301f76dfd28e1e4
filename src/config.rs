use std::path::PathBuf;
use tracing::debug;

use crate::session::generate_game_id;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_GAME_NAME: &str = "New Game";

/// Server settings read from `VOLLEYTRACK_*` environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: String,
    /// Game files are kept here; in-memory storage when unset
    pub data_dir: Option<PathBuf>,
    pub game_id: String,
    pub game_name: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let game_id = non_empty("VOLLEYTRACK_GAME_ID").unwrap_or_else(|| {
            let id = generate_game_id();
            debug!(game_id = %id, "No game id configured, generated one");
            id
        });

        Self {
            bind_addr: non_empty("VOLLEYTRACK_BIND_ADDR")
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            data_dir: non_empty("VOLLEYTRACK_DATA_DIR").map(PathBuf::from),
            game_id,
            game_name: non_empty("VOLLEYTRACK_GAME_NAME")
                .unwrap_or_else(|| DEFAULT_GAME_NAME.to_string()),
        }
    }
}
