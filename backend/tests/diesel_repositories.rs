//! Integration tests for the Diesel repositories against a live PostgreSQL.
//!
//! Set `NOTES_TEST_DATABASE_URL` to a disposable database to run them; every
//! test is skipped otherwise. Migrations are applied on first use and each
//! test works with freshly generated usernames, so runs do not interfere.

use std::sync::Arc;
use std::time::Duration;

use rstest::rstest;
use uuid::Uuid;

use notes_api::domain::ports::{NoteRepository, UserPersistenceError, UserRepository};
use notes_api::domain::{NoteId, NoteText, PasswordHash, UserId, Username};
use notes_api::outbound::persistence::{
    DbPool, DieselNoteRepository, DieselUserRepository, PoolConfig, run_migrations,
};

const DATABASE_URL_ENV: &str = "NOTES_TEST_DATABASE_URL";

struct Repositories {
    users: DieselUserRepository,
    notes: DieselNoteRepository,
}

async fn repositories() -> Option<Repositories> {
    let Ok(url) = std::env::var(DATABASE_URL_ENV) else {
        eprintln!("SKIP-TEST-CLUSTER: {DATABASE_URL_ENV} is not set");
        return None;
    };
    run_migrations(&url).await.expect("migrations apply");
    let pool = DbPool::new(
        PoolConfig::new(url)
            .with_max_size(4)
            .with_connection_timeout(Duration::from_secs(5)),
    )
    .await
    .expect("pool builds");
    Some(Repositories {
        users: DieselUserRepository::new(pool.clone()),
        notes: DieselNoteRepository::new(pool),
    })
}

fn fresh_username() -> Username {
    let suffix = Uuid::new_v4().simple().to_string();
    Username::new(format!("user_{}", &suffix[..12])).expect("valid username")
}

async fn create_user(users: &DieselUserRepository) -> (Username, UserId) {
    let username = fresh_username();
    let id = users
        .create(&username, &PasswordHash::new("$argon2id$stub"))
        .await
        .expect("user created");
    (username, id)
}

#[rstest]
#[tokio::test]
async fn created_user_is_found_by_username() {
    let Some(repos) = repositories().await else {
        return;
    };
    let (username, id) = create_user(&repos.users).await;

    let found = repos
        .users
        .find_by_username(&username)
        .await
        .expect("lookup succeeds")
        .expect("user exists");
    assert_eq!(found.id(), id);
    assert_eq!(found.username(), &username);
    assert_eq!(found.password_hash().as_str(), "$argon2id$stub");
}

#[rstest]
#[tokio::test]
async fn unknown_username_is_absent() {
    let Some(repos) = repositories().await else {
        return;
    };
    let found = repos
        .users
        .find_by_username(&fresh_username())
        .await
        .expect("lookup succeeds");
    assert!(found.is_none());
}

#[rstest]
#[tokio::test]
async fn concurrent_duplicate_registration_admits_one_row() {
    let Some(repos) = repositories().await else {
        return;
    };
    let users = Arc::new(repos.users);
    let username = fresh_username();
    let hash = PasswordHash::new("$argon2id$stub");

    let attempts = (0..4).map(|_| {
        let users = users.clone();
        let username = username.clone();
        let hash = hash.clone();
        tokio::spawn(async move { users.create(&username, &hash).await })
    });
    let mut created = 0;
    let mut duplicates = 0;
    for attempt in attempts.collect::<Vec<_>>() {
        match attempt.await.expect("task completes") {
            Ok(_) => created += 1,
            Err(UserPersistenceError::DuplicateUsername { .. }) => duplicates += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(created, 1);
    assert_eq!(duplicates, 3);
}

#[rstest]
#[tokio::test]
async fn notes_are_listed_in_insertion_order_per_owner() {
    let Some(repos) = repositories().await else {
        return;
    };
    let (_, alice) = create_user(&repos.users).await;
    let (_, bob) = create_user(&repos.users).await;

    for text in ["first", "second"] {
        repos
            .notes
            .create(alice, &NoteText::new(text))
            .await
            .expect("note stored");
    }
    repos
        .notes
        .create(bob, &NoteText::new("bob only"))
        .await
        .expect("note stored");

    let listed = repos.notes.list_for_owner(alice).await.expect("list succeeds");
    let texts: Vec<&str> = listed.iter().map(|note| note.text().as_str()).collect();
    assert_eq!(texts, ["first", "second"]);
    assert!(listed.iter().all(|note| note.owner() == alice));
}

#[rstest]
#[tokio::test]
async fn delete_only_removes_the_owners_note() {
    let Some(repos) = repositories().await else {
        return;
    };
    let (_, alice) = create_user(&repos.users).await;
    let (_, bob) = create_user(&repos.users).await;
    let note = repos
        .notes
        .create(alice, &NoteText::new("keep me"))
        .await
        .expect("note stored");

    let removed = repos
        .notes
        .delete_owned(bob, note.id())
        .await
        .expect("delete runs");
    assert_eq!(removed, 0);
    assert_eq!(repos.notes.list_for_owner(alice).await.expect("list").len(), 1);

    let removed = repos
        .notes
        .delete_owned(alice, note.id())
        .await
        .expect("delete runs");
    assert_eq!(removed, 1);
    assert!(repos.notes.list_for_owner(alice).await.expect("list").is_empty());

    let removed = repos
        .notes
        .delete_owned(alice, NoteId::new(i32::MAX))
        .await
        .expect("delete runs");
    assert_eq!(removed, 0);
}
