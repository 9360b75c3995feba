use axum::{
    extract::{FromRequestParts, Query, State},
    http::request::Parts,
    response::Json,
};

use crate::error::ApiError;
use crate::models::{
    last_scoring_play, GameCoachesResponse, GameSummaryRow, GameTeamsResponse, LastScorerResponse, PlayRow,
    TeamDetails, TeamInfoRow,
};
use crate::provider::{ProviderError, StatsClient};
use crate::AppState;

/// The `game_id` query parameter shared by every game endpoint.
///
/// When the parameter is repeated the first occurrence wins; extra parameters
/// are ignored. Absent or empty rejects with [`ApiError::MissingParameter`].
pub struct GameId(pub String);

impl<S> FromRequestParts<S> for GameId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|_| ApiError::MissingParameter)?;

        pairs
            .into_iter()
            .find(|(key, _)| key == "game_id")
            .map(|(_, value)| value)
            .filter(|value| !value.is_empty())
            .map(GameId)
            .ok_or(ApiError::MissingParameter)
    }
}

/// Home and visitor team ids for a game, from its box-score summary.
async fn resolve_team_ids(stats: &StatsClient, game_id: &str) -> Result<GameSummaryRow, ProviderError> {
    let summary = stats.box_score_summary(game_id).await?;
    GameSummaryRow::from_result_set(&summary)
}

async fn team_details(stats: &StatsClient, team_id: i64) -> Result<TeamDetails, ProviderError> {
    let info = stats.team_info(team_id).await?;
    Ok(TeamInfoRow::from_result_set(&info)?.to_team_details(team_id))
}

async fn game_teams(stats: &StatsClient, game_id: &str) -> Result<GameTeamsResponse, ProviderError> {
    let teams = resolve_team_ids(stats, game_id).await?;
    let (home_team, visitor_team) = tokio::try_join!(
        team_details(stats, teams.home_team_id),
        team_details(stats, teams.visitor_team_id),
    )?;

    Ok(GameTeamsResponse { home_team, visitor_team })
}

async fn game_coaches(stats: &StatsClient, game_id: &str) -> Result<GameCoachesResponse, ProviderError> {
    let teams = resolve_team_ids(stats, game_id).await?;
    let (home_coaches, visitor_coaches) = tokio::try_join!(
        stats.team_coaches(teams.home_team_id),
        stats.team_coaches(teams.visitor_team_id),
    )?;

    Ok(GameCoachesResponse { home_coaches, visitor_coaches })
}

async fn last_scorer(stats: &StatsClient, game_id: &str) -> Result<LastScorerResponse, ProviderError> {
    let log = stats.play_by_play(game_id).await?;
    let plays = PlayRow::from_result_set(&log)?;

    let Some(play) = last_scoring_play(&plays) else {
        return Ok(LastScorerResponse::no_scoring_plays());
    };

    tracing::debug!("Last made basket in game {} is event {:?}", game_id, play.event_num);
    Ok(LastScorerResponse::Found {
        last_scorer_id: play.scorer_id()?,
    })
}

/// GET /getgameteams?game_id=0022300061 - Home and visitor team details
pub async fn get_game_teams(
    State(state): State<AppState>,
    GameId(game_id): GameId,
) -> Result<Json<GameTeamsResponse>, ApiError> {
    let teams = game_teams(&state.stats, &game_id).await.map_err(|e| {
        tracing::error!("Failed to get teams for game {}: {}", game_id, e);
        ApiError::from(e)
    })?;

    Ok(Json(teams))
}

/// GET /getgamecoaches?game_id=0022300061 - Coaching staff of both teams
pub async fn get_game_coaches(
    State(state): State<AppState>,
    GameId(game_id): GameId,
) -> Result<Json<GameCoachesResponse>, ApiError> {
    let coaches = game_coaches(&state.stats, &game_id).await.map_err(|e| {
        tracing::error!("Failed to get coaches for game {}: {}", game_id, e);
        ApiError::from(e)
    })?;

    Ok(Json(coaches))
}

/// GET /findlastscorer?game_id=0022300061 - Player id of the last made basket
pub async fn find_last_scorer(
    State(state): State<AppState>,
    GameId(game_id): GameId,
) -> Result<Json<LastScorerResponse>, ApiError> {
    let scorer = last_scorer(&state.stats, &game_id).await.map_err(|e| {
        tracing::error!("Failed to find last scorer for game {}: {}", game_id, e);
        ApiError::from(e)
    })?;

    Ok(Json(scorer))
}
