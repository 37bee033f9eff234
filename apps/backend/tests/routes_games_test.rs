mod common;

use actix_web::http::header::{ContentType, ETAG, IF_NONE_MATCH, VARY};
use actix_web::http::StatusCode;
use actix_web::test;
use common::{current, group_for, load, lobby, memory_state};
use contaminados_test_support::problem_details::{
    assert_problem_details_from_service_response, read_envelope,
};
use contaminados_test_support::unique_helpers::unique_name;
use serde_json::{json, Value};

#[actix_web::test]
async fn create_then_fetch_with_etag() {
    let app = test_app!(memory_state());
    let name = unique_name("night");

    let req = test::TestRequest::post()
        .uri("/api/games")
        .set_json(json!({ "name": name, "owner": "alice", "password": "secret" }))
        .to_request();
    let created: Value = read_envelope(test::call_service(&app, req).await, StatusCode::CREATED).await;
    assert_eq!(created["name"], name);
    assert_eq!(created["password"], true);
    assert_eq!(created["status"], "lobby");
    assert_eq!(created["players"], json!(["alice"]));
    assert!(created.get("passwordDigest").is_none());
    let id = created["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{id}"))
        .insert_header(("player", "alice"))
        .insert_header(("password", "secret"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let etag = resp.headers().get(ETAG).unwrap().to_str().unwrap().to_string();
    assert!(etag.contains(&id));

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{id}"))
        .insert_header(("player", "alice"))
        .insert_header(("password", "secret"))
        .insert_header((IF_NONE_MATCH, etag))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{id}"))
        .insert_header(("player", "alice"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED",
        StatusCode::UNAUTHORIZED,
        Some("Password required"),
    )
    .await;
}

#[actix_web::test]
async fn blank_password_creates_open_game() {
    let app = test_app!(memory_state());

    let req = test::TestRequest::post()
        .uri("/api/games")
        .set_json(json!({ "name": unique_name("open"), "owner": "alice", "password": "  " }))
        .to_request();
    let created: Value = read_envelope(test::call_service(&app, req).await, StatusCode::CREATED).await;
    assert_eq!(created["password"], false);
    let id = created["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/api/games/{id}"))
        .insert_header(("player", "bobby"))
        .to_request();
    let joined: Value = read_envelope(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(joined["players"], json!(["alice", "bobby"]));
}

#[actix_web::test]
async fn game_etag_differs_between_enemy_and_citizen_views() {
    let state = memory_state();
    let (game_id, players) = common::started(&state, 5).await;
    let game = load(&state, game_id).await;
    let enemy = game.enemies[0].clone();
    let citizen = players
        .iter()
        .find(|p| !game.enemies.contains(p))
        .unwrap()
        .clone();
    let app = test_app!(state);

    let fetch = |player: String| {
        test::TestRequest::get()
            .uri(&format!("/api/games/{game_id}"))
            .insert_header(("player", player))
            .to_request()
    };

    let resp = test::call_service(&app, fetch(enemy.clone())).await;
    assert_eq!(resp.headers().get(VARY).unwrap(), "player");
    let enemy_tag = resp.headers().get(ETAG).unwrap().to_str().unwrap().to_string();

    let resp = test::call_service(&app, fetch(citizen.clone())).await;
    let citizen_tag = resp.headers().get(ETAG).unwrap().to_str().unwrap().to_string();
    assert_ne!(enemy_tag, citizen_tag);

    // The enemy's tag must not let a citizen skip the body.
    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{game_id}"))
        .insert_header(("player", citizen))
        .insert_header((IF_NONE_MATCH, enemy_tag))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["enemies"], json!([]));
}

#[actix_web::test]
async fn duplicate_name_is_a_conflict() {
    let app = test_app!(memory_state());
    let body = json!({ "name": unique_name("night"), "owner": "alice" });

    let req = test::TestRequest::post().uri("/api/games").set_json(&body).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post().uri("/api/games").set_json(&body).to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(resp, "NAME_TAKEN", StatusCode::CONFLICT, None)
        .await;
}

#[actix_web::test]
async fn malformed_body_and_missing_header() {
    let app = test_app!(memory_state());

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header(ContentType::json())
        .set_payload("{\"name\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(resp, "BAD_REQUEST", StatusCode::BAD_REQUEST, None)
        .await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{}", uuid::Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_PLAYER",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/games/not-a-uuid")
        .insert_header(("player", "alice"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "INVALID_GAME_ID",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
}

#[actix_web::test]
async fn join_start_and_play_over_http() {
    let state = memory_state();
    let (game_id, players) = lobby(&state, 4).await;
    let app = test_app!(state.clone());

    // Join without a body: the caller seats themselves.
    let req = test::TestRequest::put()
        .uri(&format!("/api/games/{game_id}"))
        .insert_header(("player", "fifth"))
        .to_request();
    let joined: Value = read_envelope(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(joined["players"].as_array().unwrap().len(), 5);

    let req = test::TestRequest::default()
        .method(actix_web::http::Method::HEAD)
        .uri(&format!("/api/games/{game_id}/start"))
        .insert_header(("player", players[1].as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::default()
        .method(actix_web::http::Method::HEAD)
        .uri(&format!("/api/games/{game_id}/start"))
        .insert_header(("player", players[0].as_str()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let game = load(&state, game_id).await;
    let (round_id, leader) = current(&game);
    let group = group_for(&game);
    let round_uri = format!("/api/games/{game_id}/rounds/{round_id}");

    let req = test::TestRequest::patch()
        .uri(&round_uri)
        .insert_header(("player", leader.as_str()))
        .set_json(json!({ "group": group }))
        .to_request();
    let round: Value = read_envelope(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(round["status"], "voting");

    for player in &game.players {
        let req = test::TestRequest::post()
            .uri(&round_uri)
            .insert_header(("player", player.as_str()))
            .set_json(json!({ "vote": true }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    let req = test::TestRequest::post()
        .uri(&round_uri)
        .insert_header(("player", game.players[0].as_str()))
        .set_json(json!({ "vote": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "PHASE_MISMATCH",
        StatusCode::CONFLICT,
        None,
    )
    .await;

    let mut last: Value = Value::Null;
    for member in &group {
        let req = test::TestRequest::put()
            .uri(&round_uri)
            .insert_header(("player", member.as_str()))
            .set_json(json!({ "action": true }))
            .to_request();
        last = read_envelope(test::call_service(&app, req).await, StatusCode::OK).await;
    }
    assert_eq!(last["status"], "ended");
    assert_eq!(last["result"], "citizens");

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{game_id}/rounds"))
        .insert_header(("player", leader.as_str()))
        .to_request();
    let rounds: Vec<Value> = read_envelope(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(rounds.len(), 2);
    assert_eq!(rounds[0]["id"], round_id.to_string());
    assert_eq!(rounds[1]["status"], "waiting-on-leader");

    let req = test::TestRequest::get()
        .uri(&round_uri)
        .insert_header(("player", "outsider"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "NOT_A_MEMBER",
        StatusCode::FORBIDDEN,
        None,
    )
    .await;
}

#[actix_web::test]
async fn search_filters_and_pages() {
    let state = memory_state();
    for _ in 0..3 {
        lobby(&state, 1).await;
    }
    common::started(&state, 5).await;
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/api/games").to_request();
    let all: Vec<Value> = read_envelope(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(all.len(), 4);

    let req = test::TestRequest::get()
        .uri("/api/games?status=lobby&limit=2")
        .to_request();
    let page: Vec<Value> = read_envelope(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(page.len(), 2);
    assert!(page.iter().all(|g| g["status"] == "lobby"));

    let req = test::TestRequest::get()
        .uri("/api/games?status=rounds&limit=500")
        .to_request();
    let rounds: Vec<Value> = read_envelope(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(rounds.len(), 1);
    assert_eq!(rounds[0]["players"], 5);

    let req = test::TestRequest::get().uri("/api/games?name=zzzz").to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["msg"], "No games found");
    assert_eq!(body["data"], json!([]));

    let req = test::TestRequest::get().uri("/api/games?status=paused").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
        Some("paused"),
    )
    .await;
}

#[actix_web::test]
async fn health_reports_memory_store() {
    let app = test_app!(memory_state());
    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
    assert!(body.get("db").is_none());
}
