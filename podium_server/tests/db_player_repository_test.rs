//! Postgres-backed store tests. They need a disposable database:
//! `TEST_DATABASE_URL=postgres://... cargo test -- --ignored`

use std::sync::Arc;
use uuid::Uuid;

use podium_app::{
    app::AppBus,
    command_handlers::{CreatePlayerCommandHandler, UpdateScoreCommandHandler},
    config::Config,
    cqrs::{
        commands::{CreatePlayer, UpdateScore},
        queries::GetLeaderboard,
    },
    queries_handlers::GetLeaderboardHandler,
    uow::UnitOfWorkProvider,
};
use podium_db::{DbPool, establish_test_connection_pool, uow::PostgresUnitOfWorkProvider};
use podium_types::{
    Result,
    errors::{ApplicationError, DbError, ErrorKind},
};

async fn setup_pool() -> Result<DbPool> {
    let pool = establish_test_connection_pool().await?;
    sqlx::migrate!("../migrations")
        .run(&pool)
        .await
        .map_err(DbError::from)?;
    Ok(pool)
}

fn setup_bus(pool: DbPool) -> AppBus {
    AppBus::new(
        Arc::new(Config::default()),
        Arc::new(PostgresUnitOfWorkProvider::new(pool)),
    )
}

/// Names unique to a test run, so tests can share a database.
fn unique(name: &str) -> String {
    format!("{name}-{}", Uuid::new_v4().simple())
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_create_then_update_is_persisted() -> Result<()> {
    let bus = setup_bus(setup_pool().await?);
    let name = unique("alice");

    let player = bus
        .execute(CreatePlayer::new(name.clone()), CreatePlayerCommandHandler::new())
        .await?;
    assert_eq!(player.score, 0);
    assert_eq!(player.name, name);

    bus.execute(
        UpdateScore {
            player_id: player.id,
            score: i64::MAX,
        },
        UpdateScoreCommandHandler::new(),
    )
    .await?;

    let top = bus
        .query(GetLeaderboard::with_limit(1000), GetLeaderboardHandler::new())
        .await?;
    let stored = top
        .iter()
        .find(|p| p.id == player.id)
        .expect("top score should make the leaderboard");
    assert_eq!(stored.score, i64::MAX);
    assert!(top.windows(2).all(|pair| pair[0].score >= pair[1].score));
    Ok(())
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_update_unknown_player_is_not_found() -> Result<()> {
    let bus = setup_bus(setup_pool().await?);

    let err = bus
        .execute(
            UpdateScore {
                player_id: Uuid::new_v4(),
                score: 5,
            },
            UpdateScoreCommandHandler::new(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    Ok(())
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_rolled_back_writes_are_discarded() -> Result<()> {
    let pool = setup_pool().await?;
    let provider = PostgresUnitOfWorkProvider::new(pool.clone());
    let name = unique("ghost");

    let uow = provider.begin().await?;
    uow.players().create(&name).await?;
    uow.rollback().await?;

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM players WHERE name = $1")
        .bind(&name)
        .fetch_one(&pool)
        .await
        .map_err(DbError::from)?;
    assert_eq!(count, 0);
    Ok(())
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_negative_score_is_rejected_by_the_store() -> Result<()> {
    let bus = setup_bus(setup_pool().await?);
    let player = bus
        .execute(
            CreatePlayer::new(unique("bob")),
            CreatePlayerCommandHandler::new(),
        )
        .await?;

    let provider = PostgresUnitOfWorkProvider::new(setup_pool().await?);
    let uow = provider.begin().await?;
    let err = uow.players().set_score(player.id, -1).await.unwrap_err();
    uow.rollback().await?;

    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    Ok(())
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_get_by_id() -> Result<()> {
    let pool = setup_pool().await?;
    let provider = PostgresUnitOfWorkProvider::new(pool);
    let name = unique("carol");

    let uow = provider.begin().await?;
    let created = uow.players().create(&name).await?;
    uow.players().set_score(created.id, 17).await?;

    let found = uow.players().get_by_id(created.id).await?;
    assert_eq!(found.name, name);
    assert_eq!(found.score, 17);
    assert_eq!(found.created_at, created.created_at);

    let err = uow.players().get_by_id(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(
        err,
        ApplicationError::Db(DbError::PlayerNotFound(_))
    ));

    uow.rollback().await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL"]
async fn test_all_comes_back_in_leaderboard_order() -> Result<()> {
    let pool = setup_pool().await?;
    let provider = PostgresUnitOfWorkProvider::new(pool);

    let uow = provider.begin().await?;
    for score in [3, 9, 3, 1] {
        let player = uow.players().create(&unique("ordered")).await?;
        uow.players().set_score(player.id, score).await?;
    }

    let all = uow.players().all().await?;
    uow.rollback().await?;

    for pair in all.windows(2) {
        assert!(
            pair[0].score > pair[1].score
                || (pair[0].score == pair[1].score && pair[0].created_at <= pair[1].created_at)
        );
    }
    Ok(())
}
