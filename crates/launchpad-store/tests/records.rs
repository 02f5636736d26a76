//! Record store behavior against a real `SQLite` file.

use std::time::Duration;

use chrono::Utc;
use launchpad_core::{
    Game, GameHandle, GameStatus, NewAsset, NewChatMessage, NewGame, NewTransaction, NewUser,
    PaymentMethod, TemplateType, TransactionHandle, TransactionStatus, User, UserId, UserUpdate,
};
use launchpad_store::{assets, games, messages, transactions, users, SqliteStore, StoreError};
use tempfile::TempDir;

async fn open_store() -> (SqliteStore, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::open_path(dir.path().join("launchpad.db"))
        .await
        .unwrap();
    (store, dir)
}

fn new_user(name: &str) -> NewUser {
    NewUser {
        username: name.to_string(),
        email: format!("{name}@example.com"),
        wallet_address: Some(format!("0x{name}")),
    }
}

async fn seed_user(store: &SqliteStore, name: &str) -> User {
    let mut conn = store.acquire().await.unwrap();
    users::insert(&mut conn, &new_user(name)).await.unwrap()
}

async fn seed_game(store: &SqliteStore, developer: UserId) -> Game {
    let mut conn = store.acquire().await.unwrap();
    let game = NewGame {
        title: "Dungeon Crawl".into(),
        description: "A roguelike".into(),
        template_type: TemplateType::Rpg,
    };
    games::insert(&mut conn, developer, &GameHandle::generate(), &game, Some("0xabc"))
        .await
        .unwrap()
}

fn new_asset(game: &Game, name: &str) -> NewAsset {
    NewAsset {
        game: game.id,
        asset_type: "image/png".into(),
        file_name: name.into(),
        file_path: format!("uploads/{}/{name}", game.game_id),
        file_size: 1024,
    }
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let (store, _dir) = open_store().await;
    seed_user(&store, "alice").await;

    let mut conn = store.acquire().await.unwrap();
    let mut dup = new_user("alice2");
    dup.email = "alice@example.com".into();

    let err = users::insert(&mut conn, &dup).await.unwrap_err();
    match err {
        StoreError::Conflict(msg) => assert_eq!(msg, "email already taken"),
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn update_changes_only_present_fields() {
    let (store, _dir) = open_store().await;
    let user = seed_user(&store, "bob").await;

    let mut conn = store.acquire().await.unwrap();
    let update = UserUpdate {
        username: None,
        wallet_address: Some("0xnew".into()),
    };
    let updated = users::update(&mut conn, user.id, &update).await.unwrap();

    assert_eq!(updated.username, "bob");
    assert_eq!(updated.wallet_address.as_deref(), Some("0xnew"));

    let missing = users::update(&mut conn, UserId::new(999), &update).await;
    assert!(matches!(missing, Err(StoreError::NotFound { entity: "user", .. })));
}

#[tokio::test]
async fn deleting_a_missing_row_is_not_found() {
    let (store, _dir) = open_store().await;
    let user = seed_user(&store, "carol").await;
    let mut conn = store.acquire().await.unwrap();

    users::delete(&mut conn, user.id).await.unwrap();
    assert!(users::get(&mut conn, user.id).await.unwrap().is_none());

    let again = users::delete(&mut conn, user.id).await;
    assert!(matches!(again, Err(StoreError::NotFound { .. })));
}

#[tokio::test]
async fn deleting_a_missing_game_is_not_found() {
    let (store, _dir) = open_store().await;
    let user = seed_user(&store, "cody").await;
    let game = seed_game(&store, user.id).await;
    let mut conn = store.acquire().await.unwrap();

    games::delete(&mut conn, game.id).await.unwrap();
    assert!(games::get(&mut conn, game.id).await.unwrap().is_none());

    let again = games::delete(&mut conn, game.id).await;
    assert!(matches!(again, Err(StoreError::NotFound { entity: "game", .. })));
}

#[tokio::test]
async fn user_with_games_cannot_be_deleted() {
    let (store, _dir) = open_store().await;
    let user = seed_user(&store, "dave").await;
    seed_game(&store, user.id).await;

    let mut conn = store.acquire().await.unwrap();
    let err = users::delete(&mut conn, user.id).await.unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));
}

#[tokio::test]
async fn deleting_a_game_removes_its_assets() {
    let (store, _dir) = open_store().await;
    let user = seed_user(&store, "erin").await;
    let game = seed_game(&store, user.id).await;

    let mut conn = store.acquire().await.unwrap();
    let first = assets::insert(&mut conn, &new_asset(&game, "hero.png")).await.unwrap();
    assets::insert(&mut conn, &new_asset(&game, "map.png")).await.unwrap();
    assert_eq!(assets::count_by_game(&mut conn, game.id).await.unwrap(), 2);

    games::delete(&mut conn, game.id).await.unwrap();

    assert!(games::get(&mut conn, game.id).await.unwrap().is_none());
    assert!(assets::get(&mut conn, first.id).await.unwrap().is_none());
    assert_eq!(assets::count_by_game(&mut conn, game.id).await.unwrap(), 0);
}

#[tokio::test]
async fn asset_for_unknown_game_is_rejected() {
    let (store, _dir) = open_store().await;
    let user = seed_user(&store, "frank").await;
    let game = seed_game(&store, user.id).await;

    let mut conn = store.acquire().await.unwrap();
    games::delete(&mut conn, game.id).await.unwrap();

    let err = assets::insert(&mut conn, &new_asset(&game, "orphan.png"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));
}

#[tokio::test]
async fn mark_optimized_touches_each_asset_once() {
    let (store, _dir) = open_store().await;
    let user = seed_user(&store, "gina").await;
    let game = seed_game(&store, user.id).await;

    let mut conn = store.acquire().await.unwrap();
    assets::insert(&mut conn, &new_asset(&game, "a.png")).await.unwrap();
    assets::insert(&mut conn, &new_asset(&game, "b.png")).await.unwrap();

    assert_eq!(assets::mark_optimized(&mut conn, game.id).await.unwrap(), 2);
    assert_eq!(assets::mark_optimized(&mut conn, game.id).await.unwrap(), 0);

    let listed = assets::list_by_game(&mut conn, game.id).await.unwrap();
    assert!(listed.iter().all(|a| a.optimized));
}

#[tokio::test]
async fn second_publish_is_a_conflict() {
    let (store, _dir) = open_store().await;
    let user = seed_user(&store, "hank").await;
    let game = seed_game(&store, user.id).await;
    assert_eq!(game.status, GameStatus::Draft);
    assert!(game.published_at.is_none());

    let mut conn = store.acquire().await.unwrap();
    let published = games::mark_published(&mut conn, game.id, Utc::now(), "0xworld")
        .await
        .unwrap();
    assert_eq!(published.status, GameStatus::Published);
    assert!(published.published_at.is_some());

    let err = games::mark_published(&mut conn, game.id, Utc::now(), "0xworld")
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict(_)));
}

#[tokio::test]
async fn publish_fills_a_missing_world_address_only() {
    let (store, _dir) = open_store().await;
    let user = seed_user(&store, "hugo").await;
    let with_world = seed_game(&store, user.id).await;

    let mut conn = store.acquire().await.unwrap();
    let without_world = games::insert(
        &mut conn,
        user.id,
        &GameHandle::generate(),
        &NewGame {
            title: "Sky Race".into(),
            description: String::new(),
            template_type: TemplateType::Platformer,
        },
        None,
    )
    .await
    .unwrap();
    assert!(without_world.world_address.is_none());

    let published = games::mark_published(&mut conn, without_world.id, Utc::now(), "0xfresh")
        .await
        .unwrap();
    assert_eq!(published.world_address.as_deref(), Some("0xfresh"));

    let published = games::mark_published(&mut conn, with_world.id, Utc::now(), "0xfresh")
        .await
        .unwrap();
    assert_eq!(published.world_address.as_deref(), Some("0xabc"));
}

#[tokio::test]
async fn interleaved_publishes_of_different_games_both_commit() {
    let (store, _dir) = open_store().await;
    let user = seed_user(&store, "iris").await;
    let first = seed_game(&store, user.id).await;
    let second = seed_game(&store, user.id).await;

    let publish = |game: Game, pause: Duration| {
        let store = store.clone();
        async move {
            let mut tx = store.begin().await?;
            games::get_by_handle(&mut tx, &game.game_id).await?;
            tokio::time::sleep(pause).await;
            let published = games::mark_published(&mut tx, game.id, Utc::now(), "0xworld").await?;
            tx.commit().await?;
            Ok::<_, StoreError>(published)
        }
    };

    // The slow one reads, then pauses while the other publishes and commits.
    let (slow, fast) = tokio::join!(
        publish(first, Duration::from_millis(200)),
        publish(second, Duration::ZERO),
    );

    assert_eq!(slow.unwrap().status, GameStatus::Published);
    assert_eq!(fast.unwrap().status, GameStatus::Published);
}

#[tokio::test]
async fn dropped_transaction_rolls_back() {
    let (store, _dir) = open_store().await;
    let user = seed_user(&store, "ivy").await;
    let game = seed_game(&store, user.id).await;

    {
        let mut tx = store.begin().await.unwrap();
        games::mark_published(&mut tx, game.id, Utc::now(), "0xworld")
            .await
            .unwrap();
        transactions::insert(
            &mut tx,
            TransactionHandle::generate(),
            &NewTransaction {
                user_id: user.id,
                payment_method: PaymentMethod::ChipiPay,
                amount: "10".parse().unwrap(),
                status: TransactionStatus::Completed,
                blockchain_tx_hash: Some("0xfeed".into()),
            },
        )
        .await
        .unwrap();
    }

    let mut conn = store.acquire().await.unwrap();
    let game = games::get(&mut conn, game.id).await.unwrap().unwrap();
    assert_eq!(game.status, GameStatus::Draft);
    assert!(transactions::list_by_user(&mut conn, user.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn ledger_rows_are_append_only() {
    let (store, _dir) = open_store().await;
    let user = seed_user(&store, "jack").await;

    let mut conn = store.acquire().await.unwrap();
    let handle = TransactionHandle::generate();
    let recorded = transactions::insert(
        &mut conn,
        handle,
        &NewTransaction {
            user_id: user.id,
            payment_method: PaymentMethod::Xverse,
            amount: "0.0005".parse().unwrap(),
            status: TransactionStatus::Completed,
            blockchain_tx_hash: Some("xverse_0123456789abcdef".into()),
        },
    )
    .await
    .unwrap();
    assert_eq!(recorded.currency, PaymentMethod::Xverse.currency());
    assert_eq!(recorded.amount.as_str(), "0.0005");

    let rewrite = sqlx::query("UPDATE transactions SET amount = '1' WHERE id = ?")
        .bind(recorded.id.get())
        .execute(&mut *conn)
        .await;
    assert!(rewrite.is_err());

    let fetched = transactions::get_by_handle(&mut conn, &handle)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched, recorded);

    transactions::delete(&mut conn, recorded.id).await.unwrap();
    assert!(transactions::get_by_handle(&mut conn, &handle)
        .await
        .unwrap()
        .is_none());

    let again = transactions::delete(&mut conn, recorded.id).await;
    assert!(matches!(again, Err(StoreError::NotFound { entity: "transaction", .. })));
}

#[tokio::test]
async fn games_and_history_list_newest_first() {
    let (store, _dir) = open_store().await;
    let user = seed_user(&store, "kate").await;
    let older = seed_game(&store, user.id).await;
    let newer = seed_game(&store, user.id).await;

    let mut conn = store.acquire().await.unwrap();
    let listed = games::list_by_developer(&mut conn, user.id).await.unwrap();
    let ids: Vec<_> = listed.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);

    let found = games::get_by_handle(&mut conn, &older.game_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, older.id);
}

#[tokio::test]
async fn messages_round_trip_and_delete() {
    let (store, _dir) = open_store().await;
    let user = seed_user(&store, "liam").await;

    let mut conn = store.acquire().await.unwrap();
    let stored = messages::insert(
        &mut conn,
        &NewChatMessage {
            user_id: user.id,
            message: "hello".into(),
            response: "hi".into(),
            encrypted: false,
        },
    )
    .await
    .unwrap();

    let history = messages::list_by_user(&mut conn, user.id).await.unwrap();
    assert_eq!(history, vec![stored.clone()]);

    messages::delete(&mut conn, stored.id).await.unwrap();
    assert!(messages::get(&mut conn, stored.id).await.unwrap().is_none());
    assert!(matches!(
        messages::delete(&mut conn, stored.id).await,
        Err(StoreError::NotFound { entity: "message", .. })
    ));
}
