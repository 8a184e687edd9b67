// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use clap::Parser;
use fantasy::{DEFAULT_MAX_ROSTER_SIZE, LeagueRules};
use fantasy_api::{
    ApiError, AuthenticatedActor, CreateClubRequest, CreateClubResponse, CreateMatchDayRequest,
    CreateMatchDayResponse, CreatePlayerRequest, CreatePlayerResponse, CreateTeamRequest,
    DeleteResponse, ListClubsResponse, ListMatchDaysResponse, ListPlayersResponse,
    LockRosterRequest, MatchDayInfo, PlayerInfo, PlayerScoreHistoryResponse,
    PlayerSelectionRequest, PlayerStatsResponse, RecomputeScoreRequest, RecomputeScoreResponse,
    RecordRosterRequest, RecordRosterResponse, RecordStatsRequest, RecordStatsResponse,
    RosterResponse, ScoreBreakdownResponse, StandingsResponse, TeamAuditResponse, TeamInfo,
    TeamResponse, TeamScoreHistoryResponse, authenticate_stub,
};
use fantasy_audit::Cause;
use fantasy_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{error, info, warn};

/// Fantasy Server - HTTP server for the fantasy league scoring engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// How long a request may wait for storage, in milliseconds
    #[arg(long, default_value_t = 5000)]
    storage_timeout_ms: u64,

    /// Maximum number of players on a team's live roster
    #[arg(long, default_value_t = DEFAULT_MAX_ROSTER_SIZE)]
    max_roster_size: usize,

    /// Log filter, e.g. `debug` or `fantasy_persistence=trace`. Overrides `RUST_LOG`.
    #[arg(long)]
    log_level: Option<String>,
}

/// Runtime settings shared by every handler.
#[derive(Debug, Clone, Copy)]
struct ServerConfig {
    /// Upper bound on waiting for the storage lock.
    storage_timeout: Duration,
    /// League-wide roster rules.
    rules: LeagueRules,
}

impl ServerConfig {
    const fn from_args(args: &Args) -> Self {
        Self {
            storage_timeout: Duration::from_millis(args.storage_timeout_ms),
            rules: LeagueRules::new(args.max_roster_size),
        }
    }
}

/// Application state shared across handlers.
///
/// Storage is a single connection behind a mutex; every request holds the
/// lock for the duration of one handler call.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
    config: ServerConfig,
}

/// Identity and cause carried by every write request.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ActorFields {
    /// The actor ID performing this action.
    actor_id: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
}

impl ActorFields {
    fn authenticate(self) -> Result<(AuthenticatedActor, Cause), HttpError> {
        let actor: AuthenticatedActor =
            authenticate_stub(self.actor_id).map_err(ApiError::from)?;
        Ok((actor, Cause::new(self.cause_id, self.cause_description)))
    }
}

/// A write request: actor fields alongside the operation's own fields.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct WriteRequest<T> {
    #[serde(flatten)]
    actor: ActorFields,
    #[serde(flatten)]
    body: T,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
    /// Whether the same request may succeed if sent again.
    retryable: bool,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    status: StatusCode,
    message: String,
    retryable: bool,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
            retryable: self.retryable,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Timeout { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::IntegrityViolation { .. } | ApiError::Internal { .. } => {
                error!(error = %err, "Request failed with a server error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            retryable: err.is_retryable(),
            message: err.to_string(),
        }
    }
}

/// Waits for the storage lock, giving up after the configured timeout.
async fn lock_persistence(app_state: &AppState) -> Result<MutexGuard<'_, Persistence>, HttpError> {
    let timeout: Duration = app_state.config.storage_timeout;
    tokio::time::timeout(timeout, app_state.persistence.lock())
        .await
        .map_err(|_| {
            warn!(?timeout, "Timed out waiting for storage");
            HttpError::from(ApiError::Timeout {
                message: format!("storage was busy for more than {}ms", timeout.as_millis()),
            })
        })
}

// ============================================================================
// Clubs
// ============================================================================

async fn handle_create_club(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<WriteRequest<CreateClubRequest>>,
) -> Result<Json<CreateClubResponse>, HttpError> {
    info!(actor_id = %req.actor.actor_id, name = %req.body.name, "Handling create_club request");
    let (actor, cause): (AuthenticatedActor, Cause) = req.actor.authenticate()?;
    let mut persistence = lock_persistence(&app_state).await?;
    Ok(Json(fantasy_api::create_club(
        &mut persistence,
        &req.body,
        &actor,
        cause,
    )?))
}

async fn handle_list_clubs(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListClubsResponse>, HttpError> {
    let mut persistence = lock_persistence(&app_state).await?;
    Ok(Json(fantasy_api::list_clubs(&mut persistence)?))
}

async fn handle_delete_club(
    AxumState(app_state): AxumState<AppState>,
    Path(club_id): Path<i64>,
    Json(req): Json<ActorFields>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(actor_id = %req.actor_id, club_id, "Handling delete_club request");
    let (actor, cause): (AuthenticatedActor, Cause) = req.authenticate()?;
    let mut persistence = lock_persistence(&app_state).await?;
    Ok(Json(fantasy_api::delete_club(
        &mut persistence,
        club_id,
        &actor,
        cause,
    )?))
}

// ============================================================================
// Players
// ============================================================================

async fn handle_create_player(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<WriteRequest<CreatePlayerRequest>>,
) -> Result<Json<CreatePlayerResponse>, HttpError> {
    info!(
        actor_id = %req.actor.actor_id,
        name = %req.body.name,
        position = %req.body.position,
        "Handling create_player request"
    );
    let (actor, cause): (AuthenticatedActor, Cause) = req.actor.authenticate()?;
    let mut persistence = lock_persistence(&app_state).await?;
    Ok(Json(fantasy_api::create_player(
        &mut persistence,
        &req.body,
        &actor,
        cause,
    )?))
}

async fn handle_list_players(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListPlayersResponse>, HttpError> {
    let mut persistence = lock_persistence(&app_state).await?;
    Ok(Json(fantasy_api::list_players(&mut persistence)?))
}

async fn handle_get_player(
    AxumState(app_state): AxumState<AppState>,
    Path(player_id): Path<i64>,
) -> Result<Json<PlayerInfo>, HttpError> {
    let mut persistence = lock_persistence(&app_state).await?;
    Ok(Json(fantasy_api::get_player(&mut persistence, player_id)?))
}

async fn handle_get_player_stats(
    AxumState(app_state): AxumState<AppState>,
    Path(player_id): Path<i64>,
) -> Result<Json<PlayerStatsResponse>, HttpError> {
    let mut persistence = lock_persistence(&app_state).await?;
    Ok(Json(fantasy_api::get_player_stats(
        &mut persistence,
        player_id,
    )?))
}

// ============================================================================
// Teams
// ============================================================================

async fn handle_create_team(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<WriteRequest<CreateTeamRequest>>,
) -> Result<Json<TeamResponse>, HttpError> {
    info!(actor_id = %req.actor.actor_id, name = %req.body.name, "Handling create_team request");
    let (actor, cause): (AuthenticatedActor, Cause) = req.actor.authenticate()?;
    let mut persistence = lock_persistence(&app_state).await?;
    Ok(Json(fantasy_api::create_team(
        &mut persistence,
        &req.body,
        &actor,
        cause,
    )?))
}

async fn handle_get_team(
    AxumState(app_state): AxumState<AppState>,
    Path(team_id): Path<i64>,
) -> Result<Json<TeamInfo>, HttpError> {
    let mut persistence = lock_persistence(&app_state).await?;
    Ok(Json(fantasy_api::get_team(&mut persistence, team_id)?))
}

async fn handle_add_member(
    AxumState(app_state): AxumState<AppState>,
    Path(team_id): Path<i64>,
    Json(req): Json<WriteRequest<PlayerSelectionRequest>>,
) -> Result<Json<TeamResponse>, HttpError> {
    info!(
        actor_id = %req.actor.actor_id,
        team_id,
        player_id = req.body.player_id,
        "Handling add_member request"
    );
    let (actor, cause): (AuthenticatedActor, Cause) = req.actor.authenticate()?;
    let mut persistence = lock_persistence(&app_state).await?;
    Ok(Json(fantasy_api::add_member(
        &mut persistence,
        &app_state.config.rules,
        team_id,
        &req.body,
        &actor,
        cause,
    )?))
}

async fn handle_remove_member(
    AxumState(app_state): AxumState<AppState>,
    Path((team_id, player_id)): Path<(i64, i64)>,
    Json(req): Json<ActorFields>,
) -> Result<Json<TeamResponse>, HttpError> {
    info!(actor_id = %req.actor_id, team_id, player_id, "Handling remove_member request");
    let (actor, cause): (AuthenticatedActor, Cause) = req.authenticate()?;
    let mut persistence = lock_persistence(&app_state).await?;
    Ok(Json(fantasy_api::remove_member(
        &mut persistence,
        &app_state.config.rules,
        team_id,
        player_id,
        &actor,
        cause,
    )?))
}

async fn handle_set_captain(
    AxumState(app_state): AxumState<AppState>,
    Path(team_id): Path<i64>,
    Json(req): Json<WriteRequest<PlayerSelectionRequest>>,
) -> Result<Json<TeamResponse>, HttpError> {
    info!(
        actor_id = %req.actor.actor_id,
        team_id,
        player_id = req.body.player_id,
        "Handling set_captain request"
    );
    let (actor, cause): (AuthenticatedActor, Cause) = req.actor.authenticate()?;
    let mut persistence = lock_persistence(&app_state).await?;
    Ok(Json(fantasy_api::set_captain(
        &mut persistence,
        &app_state.config.rules,
        team_id,
        &req.body,
        &actor,
        cause,
    )?))
}

// ============================================================================
// Matchdays
// ============================================================================

async fn handle_create_matchday(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<WriteRequest<CreateMatchDayRequest>>,
) -> Result<Json<CreateMatchDayResponse>, HttpError> {
    info!(
        actor_id = %req.actor.actor_id,
        label = %req.body.label,
        multiplier = ?req.body.multiplier,
        "Handling create_matchday request"
    );
    let (actor, cause): (AuthenticatedActor, Cause) = req.actor.authenticate()?;
    let mut persistence = lock_persistence(&app_state).await?;
    Ok(Json(fantasy_api::create_matchday(
        &mut persistence,
        &req.body,
        &actor,
        cause,
    )?))
}

async fn handle_list_matchdays(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListMatchDaysResponse>, HttpError> {
    let mut persistence = lock_persistence(&app_state).await?;
    Ok(Json(fantasy_api::list_matchdays(&mut persistence)?))
}

async fn handle_get_matchday(
    AxumState(app_state): AxumState<AppState>,
    Path(matchday_id): Path<i64>,
) -> Result<Json<MatchDayInfo>, HttpError> {
    let mut persistence = lock_persistence(&app_state).await?;
    Ok(Json(fantasy_api::get_matchday(
        &mut persistence,
        matchday_id,
    )?))
}

async fn handle_delete_matchday(
    AxumState(app_state): AxumState<AppState>,
    Path(matchday_id): Path<i64>,
    Json(req): Json<ActorFields>,
) -> Result<Json<DeleteResponse>, HttpError> {
    info!(actor_id = %req.actor_id, matchday_id, "Handling delete_matchday request");
    let (actor, cause): (AuthenticatedActor, Cause) = req.authenticate()?;
    let mut persistence = lock_persistence(&app_state).await?;
    Ok(Json(fantasy_api::delete_matchday(
        &mut persistence,
        matchday_id,
        &actor,
        cause,
    )?))
}

// ============================================================================
// Stats and rosters
// ============================================================================

async fn handle_record_stats(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<WriteRequest<RecordStatsRequest>>,
) -> Result<Json<RecordStatsResponse>, HttpError> {
    info!(
        actor_id = %req.actor.actor_id,
        player_id = req.body.player_id,
        matchday_id = req.body.matchday_id,
        "Handling record_stats request"
    );
    let (actor, cause): (AuthenticatedActor, Cause) = req.actor.authenticate()?;
    let mut persistence = lock_persistence(&app_state).await?;
    Ok(Json(fantasy_api::record_stats(
        &mut persistence,
        &req.body,
        &actor,
        cause,
    )?))
}

async fn handle_record_roster(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<WriteRequest<RecordRosterRequest>>,
) -> Result<Json<RecordRosterResponse>, HttpError> {
    info!(
        actor_id = %req.actor.actor_id,
        team_id = req.body.team_id,
        matchday_id = req.body.matchday_id,
        slots = req.body.slots.len(),
        "Handling record_roster request"
    );
    let (actor, cause): (AuthenticatedActor, Cause) = req.actor.authenticate()?;
    let mut persistence = lock_persistence(&app_state).await?;
    Ok(Json(fantasy_api::record_roster(
        &mut persistence,
        &req.body,
        &actor,
        cause,
    )?))
}

async fn handle_lock_roster(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<WriteRequest<LockRosterRequest>>,
) -> Result<Json<RecordRosterResponse>, HttpError> {
    info!(
        actor_id = %req.actor.actor_id,
        team_id = req.body.team_id,
        matchday_id = req.body.matchday_id,
        "Handling lock_roster request"
    );
    let (actor, cause): (AuthenticatedActor, Cause) = req.actor.authenticate()?;
    let mut persistence = lock_persistence(&app_state).await?;
    Ok(Json(fantasy_api::lock_team_roster(
        &mut persistence,
        &req.body,
        &actor,
        cause,
    )?))
}

async fn handle_get_roster(
    AxumState(app_state): AxumState<AppState>,
    Path((team_id, matchday_id)): Path<(i64, i64)>,
) -> Result<Json<RosterResponse>, HttpError> {
    let mut persistence = lock_persistence(&app_state).await?;
    Ok(Json(fantasy_api::get_roster(
        &mut persistence,
        team_id,
        matchday_id,
    )?))
}

// ============================================================================
// Scores
// ============================================================================

async fn handle_recompute_score(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<WriteRequest<RecomputeScoreRequest>>,
) -> Result<Json<RecomputeScoreResponse>, HttpError> {
    info!(
        actor_id = %req.actor.actor_id,
        team_id = req.body.team_id,
        matchday_id = req.body.matchday_id,
        expected_version = ?req.body.expected_version,
        "Handling recompute_score request"
    );
    let (actor, cause): (AuthenticatedActor, Cause) = req.actor.authenticate()?;
    let mut persistence = lock_persistence(&app_state).await?;
    Ok(Json(fantasy_api::recompute_team_score(
        &mut persistence,
        &req.body,
        &actor,
        cause,
    )?))
}

async fn handle_get_player_scores(
    AxumState(app_state): AxumState<AppState>,
    Path(player_id): Path<i64>,
) -> Result<Json<PlayerScoreHistoryResponse>, HttpError> {
    let mut persistence = lock_persistence(&app_state).await?;
    Ok(Json(fantasy_api::get_player_scores(
        &mut persistence,
        player_id,
    )?))
}

async fn handle_get_team_scores(
    AxumState(app_state): AxumState<AppState>,
    Path(team_id): Path<i64>,
) -> Result<Json<TeamScoreHistoryResponse>, HttpError> {
    let mut persistence = lock_persistence(&app_state).await?;
    Ok(Json(fantasy_api::get_team_scores(&mut persistence, team_id)?))
}

async fn handle_get_score_breakdown(
    AxumState(app_state): AxumState<AppState>,
    Path((player_id, matchday_id)): Path<(i64, i64)>,
) -> Result<Json<ScoreBreakdownResponse>, HttpError> {
    let mut persistence = lock_persistence(&app_state).await?;
    Ok(Json(fantasy_api::get_score_breakdown(
        &mut persistence,
        player_id,
        matchday_id,
    )?))
}

async fn handle_get_standings(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<StandingsResponse>, HttpError> {
    let mut persistence = lock_persistence(&app_state).await?;
    Ok(Json(fantasy_api::get_standings(&mut persistence)?))
}

async fn handle_get_team_audit(
    AxumState(app_state): AxumState<AppState>,
    Path(team_id): Path<i64>,
) -> Result<Json<TeamAuditResponse>, HttpError> {
    let mut persistence = lock_persistence(&app_state).await?;
    Ok(Json(fantasy_api::get_team_audit_log(
        &mut persistence,
        team_id,
    )?))
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/clubs", post(handle_create_club).get(handle_list_clubs))
        .route("/clubs/{club_id}", delete(handle_delete_club))
        .route("/players", post(handle_create_player).get(handle_list_players))
        .route("/players/{player_id}", get(handle_get_player))
        .route("/players/{player_id}/stats", get(handle_get_player_stats))
        .route("/teams", post(handle_create_team))
        .route("/teams/{team_id}", get(handle_get_team))
        .route("/teams/{team_id}/members", post(handle_add_member))
        .route(
            "/teams/{team_id}/members/{player_id}",
            delete(handle_remove_member),
        )
        .route("/teams/{team_id}/captain", post(handle_set_captain))
        .route(
            "/matchdays",
            post(handle_create_matchday).get(handle_list_matchdays),
        )
        .route(
            "/matchdays/{matchday_id}",
            get(handle_get_matchday).delete(handle_delete_matchday),
        )
        .route("/stats", post(handle_record_stats))
        .route("/rosters", post(handle_record_roster))
        .route("/rosters/lock", post(handle_lock_roster))
        .route("/rosters/{team_id}/{matchday_id}", get(handle_get_roster))
        .route("/scores/recompute", post(handle_recompute_score))
        .route("/scores/players/{player_id}", get(handle_get_player_scores))
        .route("/scores/teams/{team_id}", get(handle_get_team_scores))
        .route(
            "/scores/breakdown/{player_id}/{matchday_id}",
            get(handle_get_score_breakdown),
        )
        .route("/standings", get(handle_get_standings))
        .route("/audit/teams/{team_id}", get(handle_get_team_audit))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    let filter: tracing_subscriber::EnvFilter = match &args.log_level {
        Some(level) => tracing_subscriber::EnvFilter::try_new(level)?,
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Initializing Fantasy Server");

    let config: ServerConfig = ServerConfig::from_args(&args);

    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };
    persistence.set_busy_timeout(config.storage_timeout)?;

    info!(
        max_roster_size = config.rules.max_roster_size,
        storage_timeout_ms = args.storage_timeout_ms,
        "League configured"
    );

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        config,
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
