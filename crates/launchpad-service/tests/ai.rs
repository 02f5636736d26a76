//! Assistant endpoint integration tests.

mod common;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use common::TestHarness;
use serde_json::Value;

async fn upload(harness: &TestHarness, game_id: &str, name: &str, size: usize) {
    harness
        .server
        .post("/games/upload")
        .add_query_param("game_id", game_id)
        .multipart(MultipartForm::new().add_part(
            "file",
            Part::bytes(vec![0u8; size]).file_name(name).mime_type("image/png"),
        ))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn generate_docs_writes_every_section() {
    let harness = TestHarness::new().await;
    let user_id = harness.register_user("alice", "a@x.com").await;
    let game_id = harness.create_game(user_id, "Dragons", "rpg").await;

    let response = harness
        .server
        .post("/ai/generate-docs")
        .add_query_param("game_id", &game_id)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let documents = body["documents"].as_array().unwrap();
    assert_eq!(documents.len(), 5);

    let dir = harness.docs_dir.join(&game_id);
    for name in documents {
        let file = dir.join(format!("{}.md", name.as_str().unwrap()));
        let content = std::fs::read_to_string(file).unwrap();
        assert!(!content.is_empty());
    }

    let game: Value = harness.server.get(&format!("/games/{game_id}")).await.json();
    assert_eq!(game["documentation_path"], body["path"]);
}

#[tokio::test]
async fn analyze_reports_readiness() {
    let harness = TestHarness::new().await;
    let user_id = harness.register_user("alice", "a@x.com").await;
    let game_id = harness.create_game(user_id, "Dragons", "rpg").await;
    upload(&harness, &game_id, "hero.png", 64).await;

    let response = harness
        .server
        .post("/ai/analyze")
        .add_query_param("game_id", &game_id)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["checks"]["dojo_contracts"], true);
    assert_eq!(body["checks"]["assets_optimized"], false);
    assert!(body["status"].is_string());
}

#[tokio::test]
async fn optimize_flags_assets() {
    let harness = TestHarness::new().await;
    let user_id = harness.register_user("alice", "a@x.com").await;
    let game_id = harness.create_game(user_id, "Dragons", "rpg").await;
    upload(&harness, &game_id, "hero.png", 1000).await;
    upload(&harness, &game_id, "map.png", 2000).await;

    let response = harness
        .server
        .post("/ai/optimize")
        .add_query_param("game_id", &game_id)
        .await;

    response.assert_status_ok();
    let report: Value = response.json();
    assert_eq!(report["assets_processed"], 2);

    let assets: Value = harness
        .server
        .get(&format!("/games/{game_id}/assets"))
        .await
        .json();
    assert!(assets["assets"]
        .as_array()
        .unwrap()
        .iter()
        .all(|a| a["optimized"] == true));

    let analysis: Value = harness
        .server
        .post("/ai/analyze")
        .add_query_param("game_id", &game_id)
        .await
        .json();
    assert_eq!(analysis["checks"]["assets_optimized"], true);
}

#[tokio::test]
async fn assistant_needs_a_known_game() {
    let harness = TestHarness::new().await;

    harness
        .server
        .post("/ai/optimize")
        .add_query_param("game_id", "game_000000000000")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
