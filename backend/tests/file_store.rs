//! File-backed store behaviour across restarts.
//!
//! Each test opens a fresh pool on the same database file to mimic a server
//! restart with the configured schema mode.

use rentals::domain::ports::{AccomodationRepository, UserRepository};
use rentals::outbound::persistence::{
    DbPool, DieselAccomodationRepository, DieselUserRepository, PoolConfig, SchemaMode,
    sync_schema,
};
use futures_util::future::join_all;
use rstest::{fixture, rstest};
use tempfile::TempDir;

mod support;

use support::{listing, profile};

#[fixture]
fn store_dir() -> TempDir {
    tempfile::tempdir().expect("temporary directory")
}

async fn open(dir: &TempDir, mode: SchemaMode) -> DbPool {
    open_sized(dir, mode, 2).await
}

async fn open_sized(dir: &TempDir, mode: SchemaMode, max_size: u32) -> DbPool {
    let path = dir.path().join("rentals.sqlite");
    let pool = DbPool::new(PoolConfig::new(path.to_string_lossy()).with_max_size(max_size))
        .await
        .expect("file pool");
    sync_schema(&pool, mode).await.expect("schema sync");
    pool
}

#[rstest]
#[case(SchemaMode::Preserve, 1)]
#[case(SchemaMode::Replace, 0)]
#[tokio::test]
async fn restart_honours_schema_mode(
    store_dir: TempDir,
    #[case] mode: SchemaMode,
    #[case] expected_users: usize,
) {
    let first = open(&store_dir, SchemaMode::Replace).await;
    DieselUserRepository::new(first.clone())
        .create(&profile("testuser", "test@test.com"))
        .await
        .expect("create user");
    drop(first);

    let second = open(&store_dir, mode).await;
    let users = DieselUserRepository::new(second)
        .list()
        .await
        .expect("list users");

    assert_eq!(users.len(), expected_users);
}

#[rstest]
#[tokio::test]
async fn cascade_holds_on_every_pooled_connection(store_dir: TempDir) {
    let pool = open(&store_dir, SchemaMode::Replace).await;
    let users = DieselUserRepository::new(pool.clone());
    let accomodations = DieselAccomodationRepository::new(pool);
    let owner = users
        .create(&profile("testuser", "test@test.com"))
        .await
        .expect("owner");
    let first = accomodations
        .create(&listing(owner.id()))
        .await
        .expect("first listing");
    let second = accomodations
        .create(&listing(owner.id()))
        .await
        .expect("second listing");

    assert_eq!(users.delete(owner.id()).await.expect("delete"), Some(2));
    for id in [first.id(), second.id()] {
        assert!(accomodations.find_by_id(id).await.expect("lookup").is_none());
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_user_creates_all_commit(store_dir: TempDir) {
    let pool = open_sized(&store_dir, SchemaMode::Replace, 8).await;
    let users = DieselUserRepository::new(pool);

    let outcomes = join_all((0..64).map(|n| {
        let users = users.clone();
        async move {
            users
                .create(&profile(&format!("user{n}"), &format!("user{n}@test.com")))
                .await
        }
    }))
    .await;

    let failures: Vec<_> = outcomes.iter().filter_map(|outcome| outcome.as_ref().err()).collect();
    assert!(failures.is_empty(), "concurrent creates failed: {failures:?}");
    assert_eq!(users.list().await.expect("list users").len(), 64);
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_listing_writes_all_commit(store_dir: TempDir) {
    let pool = open_sized(&store_dir, SchemaMode::Replace, 8).await;
    let users = DieselUserRepository::new(pool.clone());
    let accomodations = DieselAccomodationRepository::new(pool);
    let owner = users
        .create(&profile("testuser", "test@test.com"))
        .await
        .expect("owner");

    let outcomes = join_all((0..32).map(|_| {
        let accomodations = accomodations.clone();
        let owner_id = owner.id();
        async move { accomodations.create(&listing(owner_id)).await }
    }))
    .await;

    let failures: Vec<_> = outcomes.iter().filter_map(|outcome| outcome.as_ref().err()).collect();
    assert!(failures.is_empty(), "concurrent listing writes failed: {failures:?}");
    assert_eq!(users.delete(owner.id()).await.expect("delete"), Some(32));
}
