// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode as HttpStatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Helper to create test app state with in-memory persistence.
fn create_test_app_state() -> AppState {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        config: ServerConfig {
            storage_timeout: Duration::from_millis(50),
            rules: LeagueRules::default(),
        },
    }
}

/// Merges actor fields into a request body.
fn as_actor(actor_id: &str, mut body: Value) -> Value {
    body["actor_id"] = json!(actor_id);
    body["cause_id"] = json!("test-cause");
    body["cause_description"] = json!("Test request");
    body
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (HttpStatusCode, Value) {
    let request: Request<Body> = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status: HttpStatusCode = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };
    (status, value)
}

/// Creates a team for `owner-1`, one matchday and two players.
/// Returns `(team_id, matchday_id, [player_ids])`.
async fn seed_league(app: &Router) -> (i64, i64, [i64; 2]) {
    let (status, team) = send(
        app,
        "POST",
        "/teams",
        Some(as_actor("owner-1", json!({ "name": "Sharks" }))),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);

    let (status, matchday) = send(
        app,
        "POST",
        "/matchdays",
        Some(as_actor("owner-1", json!({ "label": "Round 1" }))),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);

    let mut players: [i64; 2] = [0; 2];
    for (slot, name) in players.iter_mut().zip(["Ana", "Bea"]) {
        let (status, player) = send(
            app,
            "POST",
            "/players",
            Some(as_actor(
                "owner-1",
                json!({ "name": name, "position": "field" }),
            )),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        *slot = player["player"]["player_id"].as_i64().unwrap();
    }

    (
        team["team"]["team_id"].as_i64().unwrap(),
        matchday["matchday"]["matchday_id"].as_i64().unwrap(),
        players,
    )
}

#[tokio::test]
async fn test_captain_score_flow() {
    let app: Router = build_router(create_test_app_state());
    let (team_id, matchday_id, [captain, _]) = seed_league(&app).await;

    let (status, _) = send(
        &app,
        "POST",
        "/stats",
        Some(as_actor(
            "owner-1",
            json!({
                "player_id": captain,
                "matchday_id": matchday_id,
                "goals": 3,
                "assists": 1,
                "steals": 2,
                "wins": 1,
                "pf": 1,
                "balls_lost": 1
            }),
        )),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);

    let (status, _) = send(
        &app,
        "POST",
        "/rosters",
        Some(as_actor(
            "owner-1",
            json!({
                "team_id": team_id,
                "matchday_id": matchday_id,
                "slots": [{ "player_id": captain, "is_captain": true }]
            }),
        )),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);

    let (status, score) = send(
        &app,
        "POST",
        "/scores/recompute",
        Some(as_actor(
            "owner-1",
            json!({ "team_id": team_id, "matchday_id": matchday_id }),
        )),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(score["team_score"], json!(48));
    assert_eq!(score["version"], json!(1));

    let (status, breakdown) = send(
        &app,
        "GET",
        &format!("/scores/breakdown/{captain}/{matchday_id}"),
        None,
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(breakdown["score"], json!(24));

    let (status, standings) = send(&app, "GET", "/standings", None).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(standings["standings"][0]["total_score"], json!(48));
}

#[tokio::test]
async fn test_blank_actor_is_unauthenticated() {
    let app: Router = build_router(create_test_app_state());

    let (status, body) = send(
        &app,
        "POST",
        "/clubs",
        Some(as_actor("", json!({ "name": "Pro Recco" }))),
    )
    .await;

    assert_eq!(status, HttpStatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], json!(true));
}

#[tokio::test]
async fn test_stranger_cannot_set_captain() {
    let app: Router = build_router(create_test_app_state());
    let (team_id, _, [player_id, _]) = seed_league(&app).await;

    let (status, _) = send(
        &app,
        "POST",
        &format!("/teams/{team_id}/members"),
        Some(as_actor("owner-1", json!({ "player_id": player_id }))),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/teams/{team_id}/captain"),
        Some(as_actor("owner-2", json!({ "player_id": player_id }))),
    )
    .await;
    assert_eq!(status, HttpStatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_remove_member_route() {
    let app: Router = build_router(create_test_app_state());
    let (team_id, _, [player_id, _]) = seed_league(&app).await;

    send(
        &app,
        "POST",
        &format!("/teams/{team_id}/members"),
        Some(as_actor("owner-1", json!({ "player_id": player_id }))),
    )
    .await;
    let (status, team) = send(
        &app,
        "DELETE",
        &format!("/teams/{team_id}/members/{player_id}"),
        Some(as_actor("owner-1", json!({}))),
    )
    .await;

    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(team["team"]["members"], json!([]));
}

#[tokio::test]
async fn test_unknown_team_is_not_found() {
    let app: Router = build_router(create_test_app_state());

    let (status, _) = send(&app, "GET", "/teams/999", None).await;

    assert_eq!(status, HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_position_is_bad_request() {
    let app: Router = build_router(create_test_app_state());

    let (status, body) = send(
        &app,
        "POST",
        "/players",
        Some(as_actor(
            "owner-1",
            json!({ "name": "Eva", "position": "striker" }),
        )),
    )
    .await;

    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["retryable"], json!(false));
}

#[tokio::test]
async fn test_second_captain_is_unprocessable() {
    let app: Router = build_router(create_test_app_state());
    let (team_id, matchday_id, [first, second]) = seed_league(&app).await;

    let (status, _) = send(
        &app,
        "POST",
        "/rosters",
        Some(as_actor(
            "owner-1",
            json!({
                "team_id": team_id,
                "matchday_id": matchday_id,
                "slots": [
                    { "player_id": first, "is_captain": true },
                    { "player_id": second, "is_captain": true }
                ]
            }),
        )),
    )
    .await;
    assert_eq!(status, HttpStatusCode::UNPROCESSABLE_ENTITY);

    let (status, roster) = send(
        &app,
        "GET",
        &format!("/rosters/{team_id}/{matchday_id}"),
        None,
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(roster["entries"], json!([]));
}

#[tokio::test]
async fn test_racing_roster_commits_store_exactly_one() {
    let app: Router = build_router(create_test_app_state());
    let (team_id, matchday_id, [first, second]) = seed_league(&app).await;
    let roster_with = |player_id: i64| {
        as_actor(
            "owner-1",
            json!({
                "team_id": team_id,
                "matchday_id": matchday_id,
                "slots": [{ "player_id": player_id, "is_captain": true }]
            }),
        )
    };

    let ((status_a, _), (status_b, _)) = tokio::join!(
        send(&app, "POST", "/rosters", Some(roster_with(first))),
        send(&app, "POST", "/rosters", Some(roster_with(second))),
    );
    let mut statuses: Vec<HttpStatusCode> = vec![status_a, status_b];
    statuses.sort_by_key(HttpStatusCode::as_u16);
    assert_eq!(
        statuses,
        vec![HttpStatusCode::OK, HttpStatusCode::UNPROCESSABLE_ENTITY]
    );

    let (_, roster) = send(
        &app,
        "GET",
        &format!("/rosters/{team_id}/{matchday_id}"),
        None,
    )
    .await;
    let stored: &Vec<Value> = roster["entries"].as_array().unwrap();
    assert_eq!(stored.len(), 1);
    let winner: i64 = if status_a == HttpStatusCode::OK {
        first
    } else {
        second
    };
    assert_eq!(roster["captain"], json!(winner));
}

#[tokio::test]
async fn test_stale_recompute_is_conflict() {
    let app: Router = build_router(create_test_app_state());
    let (team_id, matchday_id, _) = seed_league(&app).await;
    let request: Value = as_actor(
        "owner-1",
        json!({ "team_id": team_id, "matchday_id": matchday_id, "expected_version": null }),
    );

    let (status, _) = send(&app, "POST", "/scores/recompute", Some(request.clone())).await;
    assert_eq!(status, HttpStatusCode::OK);

    let (status, body) = send(&app, "POST", "/scores/recompute", Some(request)).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["version"], json!(2));

    let stale: Value = as_actor(
        "owner-1",
        json!({ "team_id": team_id, "matchday_id": matchday_id, "expected_version": 1 }),
    );
    let (status, body) = send(&app, "POST", "/scores/recompute", Some(stale)).await;
    assert_eq!(status, HttpStatusCode::CONFLICT);
    assert_eq!(body["retryable"], json!(true));
}

#[tokio::test]
async fn test_busy_storage_times_out() {
    let app_state: AppState = create_test_app_state();
    let app: Router = build_router(app_state.clone());

    let guard = app_state.persistence.lock().await;
    let (status, body) = send(&app, "GET", "/clubs", None).await;
    drop(guard);

    assert_eq!(status, HttpStatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["retryable"], json!(true));

    let (status, _) = send(&app, "GET", "/clubs", None).await;
    assert_eq!(status, HttpStatusCode::OK);
}

#[tokio::test]
async fn test_delete_matchday_route() {
    let app: Router = build_router(create_test_app_state());
    let (_, matchday_id, _) = seed_league(&app).await;

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/matchdays/{matchday_id}"),
        Some(as_actor("owner-1", json!({}))),
    )
    .await;
    assert_eq!(status, HttpStatusCode::OK);

    let (status, _) = send(&app, "GET", &format!("/matchdays/{matchday_id}"), None).await;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_team_audit_route_lists_events() {
    let app: Router = build_router(create_test_app_state());
    let (team_id, _, _) = seed_league(&app).await;

    let (status, log) = send(&app, "GET", &format!("/audit/teams/{team_id}"), None).await;

    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(log["events"][0]["action_name"], json!("CreateTeam"));
    assert_eq!(log["events"][0]["actor_id"], json!("owner-1"));
}
