// Public API - what other modules can use
pub use handlers::{
    add_player, clear_set, delete_shot, get_court, get_filter, get_game, get_taxonomy,
    list_players, player_stats, record_shot, rename_game, team_stats, update_filter,
};
pub use types::{
    ClearSetResponse, CourtMarker, CourtResponse, GameResponse, OutcomeInfo, PlayerReport,
    PlayerRow, ResultCount, RosterEntry, ShotTypeInfo, TeamReport,
};

// Internal modules
mod handlers;
mod types;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::shared::AppState;

/// All JSON routes, bound to the given state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/taxonomy", get(get_taxonomy))
        .route("/game", get(get_game))
        .route("/game/name", put(rename_game))
        .route("/teams/:team/players", get(list_players).post(add_player))
        .route("/teams/:team/sets/:set/clear", post(clear_set))
        .route("/shots", post(record_shot))
        .route("/shots/:id", delete(delete_shot))
        .route("/filter", get(get_filter).put(update_filter))
        .route("/court", get(get_court))
        .route("/stats/team/:team", get(team_stats))
        .route("/stats/players/:id", get(player_stats))
        .with_state(state)
}
