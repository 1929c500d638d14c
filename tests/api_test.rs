/// HTTP tests for the opening service: catalogue reads, random picks and
/// move checking with progress persistence.
///
/// Each test spins up its own server on an ephemeral port, backed by the
/// bundled openings.json and a throwaway progress file.

mod common;

use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn test_health() {
    let srv = common::spawn_server().await;
    let res = common::client().get(srv.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_list_openings() {
    let srv = common::spawn_server().await;
    let res = common::client()
        .get(srv.url("/api/openings"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: Vec<Value> = res.json().await.unwrap();
    assert_eq!(body.len(), 4);
    assert_eq!(body[0]["id"], 1);
    assert_eq!(body[0]["openingName"], "Ruy Lopez");
    assert_eq!(body[0]["ecoCode"], "C60");
    assert_eq!(
        body[0]["variations"],
        json!(["Morphy Defense", "Berlin Defense", "Exchange Variation"])
    );
}

#[tokio::test]
async fn test_opening_detail() {
    let srv = common::spawn_server().await;
    let res = common::client()
        .get(srv.url("/api/openings/4"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["openingName"], "Italian Game");
    assert_eq!(body["strategicIdeas"][0], "Quick development");
    // Textual years pass through untouched
    assert_eq!(body["famousGames"][0]["year"], "c. 1620");
    assert_eq!(body["variations"][0]["variationName"], "Giuoco Piano");
    assert_eq!(body["variations"][0]["moves"].as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn test_opening_detail_not_found() {
    let srv = common::spawn_server().await;
    let res = common::client()
        .get(srv.url("/api/openings/99"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"error": "Opening not found"}));
}

#[tokio::test]
async fn test_non_numeric_id_is_json_not_found() {
    let srv = common::spawn_server().await;
    let client = common::client();

    for path in ["/api/openings/ruy-lopez", "/api/openings/abc/Morphy%20Defense"] {
        let res = client.get(srv.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{path}");
        let body: Value = res.json().await.unwrap();
        assert_eq!(body, json!({"error": "Opening not found"}), "{path}");
    }
}

#[tokio::test]
async fn test_variation_moves_ignores_case() {
    let srv = common::spawn_server().await;
    let res = common::client()
        .get(srv.url("/api/openings/1/morphy%20DEFENSE"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let moves: Vec<String> = res.json().await.unwrap();
    assert_eq!(moves.len(), 10);
    assert_eq!(moves[0], "e4");
    assert_eq!(moves[8], "O-O");
}

#[tokio::test]
async fn test_variation_moves_with_apostrophe() {
    let srv = common::spawn_server().await;
    let res = common::client()
        .get(srv.url("/api/openings/3/Queen's%20Gambit%20Accepted"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let moves: Vec<String> = res.json().await.unwrap();
    assert_eq!(moves[3], "dxc4");
}

#[tokio::test]
async fn test_variation_moves_not_found() {
    let srv = common::spawn_server().await;
    let res = common::client()
        .get(srv.url("/api/openings/1/Steinitz%20Defense"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Variation not found");

    // Unknown opening reports the variation as missing too
    let res = common::client()
        .get(srv.url("/api/openings/42/Main"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_random_pick_matches_catalogue() {
    let srv = common::spawn_server().await;
    let client = common::client();

    for _ in 0..5 {
        let pick: Value = client
            .get(srv.url("/api/practice/random"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        let id = pick["openingId"].as_u64().unwrap();
        let name = pick["variationName"].as_str().unwrap();

        let moves: Value = client
            .get(srv.url(&format!("/api/openings/{id}/{name}")))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(pick["moves"], moves);
    }
}

#[tokio::test]
async fn test_check_move_correct() {
    let srv = common::spawn_server().await;
    let res = common::client()
        .post(srv.url("/api/practice/checkMove"))
        .json(&json!({
            "openingId": 1,
            "variationName": "Morphy Defense",
            "currentIndex": 0,
            "userMove": "e4"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"result": "correct", "nextIndex": 1}));
}

#[tokio::test]
async fn test_check_move_accepts_check_suffix() {
    let srv = common::spawn_server().await;
    let body: Value = common::client()
        .post(srv.url("/api/practice/checkMove"))
        .json(&json!({
            "openingId": 4,
            "variationName": "Giuoco Piano",
            "currentIndex": 11,
            "userMove": "Bb4"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["result"], "correct");
    assert_eq!(body["nextIndex"], 12);
}

#[tokio::test]
async fn test_check_move_incorrect_steps_back() {
    let srv = common::spawn_server().await;
    let body: Value = common::client()
        .post(srv.url("/api/practice/checkMove"))
        .json(&json!({
            "openingId": 1,
            "variationName": "Morphy Defense",
            "currentIndex": 2,
            "userMove": "Bc4"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        body,
        json!({"result": "incorrect", "correctMove": "Nf3", "nextIndex": 1})
    );

    // A miss on the first move cannot go below zero
    let body: Value = common::client()
        .post(srv.url("/api/practice/checkMove"))
        .json(&json!({
            "openingId": 1,
            "variationName": "Morphy Defense",
            "currentIndex": 0,
            "userMove": "d4"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["nextIndex"], 0);
}

#[tokio::test]
async fn test_check_move_rejects_bad_requests() {
    let srv = common::spawn_server().await;
    let client = common::client();

    let res = client
        .post(srv.url("/api/practice/checkMove"))
        .json(&json!({
            "openingId": 1,
            "variationName": "Morphy Defense",
            "currentIndex": 10,
            "userMove": "Re1"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Already at the end");

    let res = client
        .post(srv.url("/api/practice/checkMove"))
        .json(&json!({
            "openingId": 7,
            "variationName": "Nope",
            "userMove": "e4"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Invalid opening/variation");
}

#[tokio::test]
async fn test_check_move_persists_progress() {
    let srv = common::spawn_server().await;
    let client = common::client();

    for (index, user_move) in [(0, "e4"), (1, "e5"), (2, "Bc4"), (2, "Nf3")] {
        let res = client
            .post(srv.url("/api/practice/checkMove"))
            .json(&json!({
                "openingId": 1,
                "variationName": "Exchange Variation",
                "currentIndex": index,
                "userMove": user_move
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    let raw = std::fs::read_to_string(&srv.progress_file).unwrap();
    let saved: Value = serde_json::from_str(&raw).unwrap();
    let entry = &saved["Progress"]["1-Exchange Variation"];
    assert_eq!(entry["moveIndex"], 3);
    assert_eq!(entry["failures"], json!({"2": 1}));
    assert!(entry["lastPracticedAt"].is_string());
}
