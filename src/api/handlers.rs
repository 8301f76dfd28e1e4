use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument, warn};

use super::types::{
    taxonomy_listing, AddPlayerRequest, ClearSetResponse, CourtMarker, CourtResponse,
    GameResponse, PlayerReport, RecordShotRequest, RenameGameRequest, RosterEntry, ShotTypeInfo,
    TeamReport,
};
use crate::filter::FilterState;
use crate::session::{CommandOutcome, TrackerCommand};
use crate::shared::{AppError, AppState};
use crate::tracker::{Player, Shot, Team};

fn unexpected(outcome: CommandOutcome) -> AppError {
    warn!(?outcome, "Command produced an unexpected outcome");
    AppError::Internal
}

/// GET /taxonomy
#[instrument(name = "get_taxonomy")]
pub async fn get_taxonomy() -> Json<Vec<ShotTypeInfo>> {
    Json(taxonomy_listing())
}

/// GET /game
#[instrument(name = "get_game", skip(state))]
pub async fn get_game(State(state): State<AppState>) -> Json<GameResponse> {
    Json(state.tracker.read(|session| GameResponse::from(session)).await)
}

/// PUT /game/name
#[instrument(name = "rename_game", skip(state))]
pub async fn rename_game(
    State(state): State<AppState>,
    Json(request): Json<RenameGameRequest>,
) -> Result<Json<GameResponse>, AppError> {
    state
        .tracker
        .execute(TrackerCommand::RenameGame { name: request.name })
        .await?;

    let game = state.tracker.read(|session| GameResponse::from(session)).await;
    info!(game_name = %game.game_name, "Game renamed");
    Ok(Json(game))
}

/// GET /teams/:team/players
///
/// Roster sorted by jersey number, each with a quick summary
#[instrument(name = "list_players", skip(state))]
pub async fn list_players(
    State(state): State<AppState>,
    Path(team): Path<Team>,
) -> Json<Vec<RosterEntry>> {
    let roster = state
        .tracker
        .read(|session| {
            session
                .store()
                .players_by_number(team)
                .into_iter()
                .map(RosterEntry::from)
                .collect::<Vec<_>>()
        })
        .await;
    Json(roster)
}

/// POST /teams/:team/players
#[instrument(name = "add_player", skip(state))]
pub async fn add_player(
    State(state): State<AppState>,
    Path(team): Path<Team>,
    Json(request): Json<AddPlayerRequest>,
) -> Result<(StatusCode, Json<Player>), AppError> {
    let outcome = state
        .tracker
        .execute(TrackerCommand::AddPlayer {
            team,
            number: request.number,
            name: request.name,
        })
        .await?;

    match outcome {
        CommandOutcome::PlayerAdded(player) => {
            info!(%team, player_id = %player.id, number = player.number, "Player added");
            Ok((StatusCode::CREATED, Json(player)))
        }
        other => Err(unexpected(other)),
    }
}

/// POST /shots
#[instrument(name = "record_shot", skip(state))]
pub async fn record_shot(
    State(state): State<AppState>,
    Json(request): Json<RecordShotRequest>,
) -> Result<(StatusCode, Json<Shot>), AppError> {
    let outcome = state
        .tracker
        .execute(TrackerCommand::RecordShot {
            player_id: request.player_id,
            shot_type: request.shot_type,
            outcome: request.outcome,
            x: request.x,
            y: request.y,
            set_number: request.set_number,
        })
        .await?;

    match outcome {
        CommandOutcome::ShotRecorded(shot) => {
            info!(
                shot_id = %shot.id,
                outcome = %shot.outcome,
                set = shot.set_number,
                "Shot recorded"
            );
            Ok((StatusCode::CREATED, Json(shot)))
        }
        other => Err(unexpected(other)),
    }
}

/// DELETE /shots/:id
#[instrument(name = "delete_shot", skip(state))]
pub async fn delete_shot(
    State(state): State<AppState>,
    Path(shot_id): Path<String>,
) -> Result<Json<Shot>, AppError> {
    match state
        .tracker
        .execute(TrackerCommand::DeleteShot { shot_id })
        .await?
    {
        CommandOutcome::ShotDeleted(shot) => {
            info!(shot_id = %shot.id, "Shot deleted");
            Ok(Json(shot))
        }
        other => Err(unexpected(other)),
    }
}

/// POST /teams/:team/sets/:set/clear
#[instrument(name = "clear_set", skip(state))]
pub async fn clear_set(
    State(state): State<AppState>,
    Path((team, set_number)): Path<(Team, u32)>,
) -> Result<Json<ClearSetResponse>, AppError> {
    match state
        .tracker
        .execute(TrackerCommand::ClearSet {
            team: Some(team),
            set_number: Some(set_number),
        })
        .await?
    {
        CommandOutcome::SetCleared {
            team,
            set_number,
            removed,
        } => {
            info!(%team, set_number, removed, "Set cleared");
            Ok(Json(ClearSetResponse {
                team,
                set_number,
                removed,
            }))
        }
        other => Err(unexpected(other)),
    }
}

/// GET /filter
#[instrument(name = "get_filter", skip(state))]
pub async fn get_filter(State(state): State<AppState>) -> Json<FilterState> {
    Json(state.tracker.read(|session| session.filter().clone()).await)
}

/// PUT /filter
///
/// Accepts one filter command, e.g. `{"type": "SELECT_SET", "payload": {"set_number": 2}}`
#[instrument(name = "update_filter", skip(state))]
pub async fn update_filter(
    State(state): State<AppState>,
    Json(command): Json<TrackerCommand>,
) -> Result<Json<FilterState>, AppError> {
    let is_filter_command = matches!(
        command,
        TrackerCommand::SelectSet { .. }
            | TrackerCommand::SelectPlayer { .. }
            | TrackerCommand::ShowAllPlayers
            | TrackerCommand::SetCategoryFilter { .. }
            | TrackerCommand::SelectTeam { .. }
            | TrackerCommand::SwitchTeam
    );
    if !is_filter_command {
        return Err(AppError::BadRequest(
            "Only filter commands are accepted here".to_string(),
        ));
    }

    match state.tracker.execute(command).await? {
        CommandOutcome::FilterChanged(filter) => Ok(Json(filter)),
        other => Err(unexpected(other)),
    }
}

/// GET /court
///
/// Markers for the shots passing the current filters
#[instrument(name = "get_court", skip(state))]
pub async fn get_court(State(state): State<AppState>) -> Json<CourtResponse> {
    let court = state
        .tracker
        .read(|session| CourtResponse {
            filter: session.filter().clone(),
            markers: session.visible_shots().iter().map(CourtMarker::from).collect(),
            summary: session.visible_summary(),
        })
        .await;
    info!(markers = court.markers.len(), "Court rendered");
    Json(court)
}

/// GET /stats/team/:team
#[instrument(name = "team_stats", skip(state))]
pub async fn team_stats(
    State(state): State<AppState>,
    Path(team): Path<Team>,
) -> Json<TeamReport> {
    let summary = state.tracker.read(|session| session.team_summary(team)).await;
    Json(TeamReport::new(team, summary))
}

/// GET /stats/players/:id
#[instrument(name = "player_stats", skip(state))]
pub async fn player_stats(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<PlayerReport>, AppError> {
    let report = state
        .tracker
        .read(|session| {
            session
                .player_summary(&player_id)
                .map(|(team, player, stats)| PlayerReport::new(team, player, stats))
        })
        .await?;
    Ok(Json(report))
}
