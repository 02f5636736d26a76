//! Payment and publishing integration tests.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::TestHarness;
use serde_json::{json, Value};

async fn publish(
    harness: &TestHarness,
    game_id: &str,
    method: &str,
    amount: &str,
) -> axum_test::TestResponse {
    harness
        .server
        .post("/payments/publish")
        .json(&json!({
            "game_id": game_id,
            "payment_method": method,
            "payment_amount": amount,
        }))
        .await
}

#[tokio::test]
async fn methods_list_every_rail() {
    let harness = TestHarness::new().await;

    let response = harness.server.get("/payments/methods").await;

    response.assert_status_ok();
    let body: Value = response.json();
    let methods = body["methods"].as_array().unwrap();
    assert_eq!(methods.len(), 3);
    assert_eq!(methods[0]["id"], "chipi_pay");
    assert_eq!(methods[0]["currency"], "STRK");
}

#[tokio::test]
async fn publish_deploys_settles_and_records() {
    let harness = TestHarness::new().await;
    let user_id = harness.register_user("alice", "a@x.com").await;
    let game_id = harness.create_game(user_id, "Dragons", "rpg").await;

    let response = publish(&harness, &game_id, "chipi_pay", "10").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "live");
    assert_eq!(body["message"], "Game published successfully");
    assert_eq!(body["platforms"], json!(["iOS", "Android", "Web"]));
    for contract in ["world", "game_logic", "player_registry", "payment_handler"] {
        assert!(body["contracts"][contract].as_str().unwrap().starts_with("0x"));
    }
    assert!(!body["transaction_hash"].as_str().unwrap().is_empty());
    let transaction_id = body["transaction_id"].as_str().unwrap().to_string();

    let game: Value = harness.server.get(&format!("/games/{game_id}")).await.json();
    assert_eq!(game["status"], "published");
    assert!(game["published_at"].is_string());

    let history: Value = harness
        .server
        .get("/payments/history")
        .add_query_param("user_id", user_id)
        .await
        .json();
    let transactions = history["transactions"].as_array().unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0]["transaction_id"], transaction_id.as_str());
    assert_eq!(transactions[0]["currency"], "STRK");
    assert_eq!(transactions[0]["status"], "completed");
    assert_eq!(transactions[0]["amount"], "10");
    assert_eq!(transactions[0]["blockchain_tx_hash"], body["transaction_hash"]);

    let response = harness
        .server
        .get(&format!("/payments/{transaction_id}"))
        .await;
    response.assert_status_ok();
    let transaction: Value = response.json();
    assert_eq!(transaction["payment_method"], "chipi_pay");
}

#[tokio::test]
async fn second_publish_is_a_conflict() {
    let harness = TestHarness::new().await;
    let user_id = harness.register_user("alice", "a@x.com").await;
    let game_id = harness.create_game(user_id, "Dragons", "rpg").await;

    publish(&harness, &game_id, "chipi_pay", "10")
        .await
        .assert_status_ok();
    publish(&harness, &game_id, "chipi_pay", "10")
        .await
        .assert_status(StatusCode::CONFLICT);

    let history: Value = harness
        .server
        .get("/payments/history")
        .add_query_param("user_id", user_id)
        .await
        .json();
    assert_eq!(history["transactions"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn btc_rail_records_btc() {
    let harness = TestHarness::new().await;
    let user_id = harness.register_user("alice", "a@x.com").await;
    let game_id = harness.create_game(user_id, "Dragons", "rpg").await;

    let response = publish(&harness, &game_id, "xverse", "0.0005").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["transaction_hash"].as_str().unwrap().starts_with("xverse_"));

    let history: Value = harness
        .server
        .get("/payments/history")
        .add_query_param("user_id", user_id)
        .await
        .json();
    assert_eq!(history["transactions"][0]["currency"], "BTC");
    assert_eq!(history["transactions"][0]["amount"], "0.0005");
}

#[tokio::test]
async fn concurrent_publishes_of_different_games_both_succeed() {
    let harness = TestHarness::with_slow_payments(Duration::from_millis(100)).await;
    let alice = harness.register_user("alice", "a@x.com").await;
    let bob = harness.register_user("bob", "b@x.com").await;
    let dragons = harness.create_game(alice, "Dragons", "rpg").await;
    let rockets = harness.create_game(bob, "Rockets", "platformer").await;

    let (first, second) = tokio::join!(
        publish(&harness, &dragons, "chipi_pay", "10"),
        publish(&harness, &rockets, "xverse", "0.001"),
    );
    first.assert_status_ok();
    second.assert_status_ok();

    for (user_id, game_id) in [(alice, &dragons), (bob, &rockets)] {
        let game: Value = harness.server.get(&format!("/games/{game_id}")).await.json();
        assert_eq!(game["status"], "published");

        let history: Value = harness
            .server
            .get("/payments/history")
            .add_query_param("user_id", user_id)
            .await
            .json();
        assert_eq!(history["transactions"].as_array().unwrap().len(), 1);
    }
}

#[tokio::test]
async fn concurrent_publishes_of_one_game_settle_once() {
    let harness = TestHarness::with_slow_payments(Duration::from_millis(100)).await;
    let user_id = harness.register_user("alice", "a@x.com").await;
    let game_id = harness.create_game(user_id, "Dragons", "rpg").await;

    let (first, second) = tokio::join!(
        publish(&harness, &game_id, "chipi_pay", "10"),
        publish(&harness, &game_id, "chipi_pay", "10"),
    );
    let mut statuses = [first.status_code(), second.status_code()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::OK, StatusCode::CONFLICT]);

    let history: Value = harness
        .server
        .get("/payments/history")
        .add_query_param("user_id", user_id)
        .await
        .json();
    assert_eq!(history["transactions"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn failed_payment_leaves_game_in_draft() {
    let harness = TestHarness::with_failing_payments().await;
    let user_id = harness.register_user("alice", "a@x.com").await;
    let game_id = harness.create_game(user_id, "Dragons", "rpg").await;

    let response = publish(&harness, &game_id, "chipi_pay", "10").await;

    response.assert_status(StatusCode::PAYMENT_REQUIRED);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "payment_failed");

    let game: Value = harness.server.get(&format!("/games/{game_id}")).await.json();
    assert_eq!(game["status"], "draft");
    assert!(game["published_at"].is_null());

    let history: Value = harness
        .server
        .get("/payments/history")
        .add_query_param("user_id", user_id)
        .await
        .json();
    assert!(history["transactions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_publish_requests_are_rejected() {
    let harness = TestHarness::new().await;
    let user_id = harness.register_user("alice", "a@x.com").await;
    let game_id = harness.create_game(user_id, "Dragons", "rpg").await;

    publish(&harness, &game_id, "paypal", "10")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    publish(&harness, &game_id, "chipi_pay", "0")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    publish(&harness, &game_id, "chipi_pay", "-3")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    publish(&harness, "game_000000000000", "chipi_pay", "10")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_transaction_is_not_found() {
    let harness = TestHarness::new().await;

    harness
        .server
        .get("/payments/tx_01ARZ3NDEKTSV4RRFFQ69G5FAV")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    harness
        .server
        .get("/payments/nope")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
