//! In-memory port implementations for exercising services and handlers
//! without PostgreSQL or the network.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    HashingError, NotePersistenceError, NoteRepository, PasswordHasher, SpellingCorrectionError,
    SpellingCorrector, UserPersistenceError, UserRepository,
};
use crate::domain::{Note, NoteId, NoteText, PasswordHash, User, UserId, Username};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[derive(Debug, Default)]
struct UserTable {
    rows: Vec<User>,
    next_id: i32,
}

/// User repository backed by a vector, enforcing username uniqueness.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: Mutex<UserTable>,
}

impl InMemoryUserRepository {
    /// Empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    #[must_use]
    pub fn len(&self) -> usize {
        lock(&self.table).rows.len()
    }

    /// Whether no users are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stored user with `username`, if any.
    #[must_use]
    pub fn get(&self, username: &str) -> Option<User> {
        lock(&self.table)
            .rows
            .iter()
            .find(|user| user.username().as_ref() == username)
            .cloned()
    }

    /// Remove a user, leaving any notes that referenced it in place.
    pub fn remove(&self, username: &str) {
        lock(&self.table)
            .rows
            .retain(|user| user.username().as_ref() != username);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(
        &self,
        username: &Username,
        password_hash: &PasswordHash,
    ) -> Result<UserId, UserPersistenceError> {
        let mut table = lock(&self.table);
        if table.rows.iter().any(|user| user.username() == username) {
            return Err(UserPersistenceError::duplicate_username(username.to_string()));
        }
        table.next_id += 1;
        let id = UserId::new(table.next_id);
        table
            .rows
            .push(User::new(id, username.clone(), password_hash.clone()));
        Ok(id)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(lock(&self.table)
            .rows
            .iter()
            .find(|user| user.username() == username)
            .cloned())
    }
}

#[derive(Debug, Default)]
struct NoteTable {
    rows: Vec<Note>,
    next_id: i32,
    failure: Option<NotePersistenceError>,
}

/// Note repository backed by a vector, scoping every query by owner.
#[derive(Debug, Default)]
pub struct InMemoryNoteRepository {
    table: Mutex<NoteTable>,
}

impl InMemoryNoteRepository {
    /// Empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored note regardless of owner.
    #[must_use]
    pub fn all(&self) -> Vec<Note> {
        lock(&self.table).rows.clone()
    }

    /// Make every subsequent call fail with `failure` until cleared with `None`.
    pub fn fail_with(&self, failure: Option<NotePersistenceError>) {
        lock(&self.table).failure = failure;
    }
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Note>, NotePersistenceError> {
        let table = lock(&self.table);
        if let Some(failure) = &table.failure {
            return Err(failure.clone());
        }
        Ok(table
            .rows
            .iter()
            .filter(|note| note.owner() == owner)
            .cloned()
            .collect())
    }

    async fn create(&self, owner: UserId, text: &NoteText) -> Result<Note, NotePersistenceError> {
        let mut table = lock(&self.table);
        if let Some(failure) = &table.failure {
            return Err(failure.clone());
        }
        table.next_id += 1;
        let note = Note::new(NoteId::new(table.next_id), owner, text.clone());
        table.rows.push(note.clone());
        Ok(note)
    }

    async fn delete_owned(&self, owner: UserId, id: NoteId) -> Result<u64, NotePersistenceError> {
        let mut table = lock(&self.table);
        if let Some(failure) = &table.failure {
            return Err(failure.clone());
        }
        let before = table.rows.len();
        table
            .rows
            .retain(|note| !(note.id() == id && note.owner() == owner));
        Ok(u64::try_from(before - table.rows.len()).unwrap_or(u64::MAX))
    }
}

/// Hasher storing `plain:<password>`; fast and deterministic for tests only.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaintextPasswordHasher;

const PLAINTEXT_PREFIX: &str = "plain:";

#[async_trait]
impl PasswordHasher for PlaintextPasswordHasher {
    async fn hash(&self, plaintext: &str) -> Result<PasswordHash, HashingError> {
        Ok(PasswordHash::new(format!("{PLAINTEXT_PREFIX}{plaintext}")))
    }

    async fn verify(&self, plaintext: &str, hash: &PasswordHash) -> bool {
        hash.as_str()
            .strip_prefix(PLAINTEXT_PREFIX)
            .is_some_and(|stored| stored == plaintext)
    }
}

/// Corrector applying a fixed list of word replacements, first occurrence only.
#[derive(Debug, Default, Clone)]
pub struct FixedSpellingCorrector {
    replacements: Vec<(String, String)>,
}

impl FixedSpellingCorrector {
    /// Corrector replacing each `(word, suggestion)` pair in order.
    pub fn new<I, W, S>(replacements: I) -> Self
    where
        I: IntoIterator<Item = (W, S)>,
        W: Into<String>,
        S: Into<String>,
    {
        Self {
            replacements: replacements
                .into_iter()
                .map(|(word, suggestion)| (word.into(), suggestion.into()))
                .collect(),
        }
    }
}

#[async_trait]
impl SpellingCorrector for FixedSpellingCorrector {
    async fn correct(&self, text: &NoteText) -> Result<NoteText, SpellingCorrectionError> {
        let corrected = self
            .replacements
            .iter()
            .fold(text.as_str().to_owned(), |acc, (word, suggestion)| {
                acc.replacen(word.as_str(), suggestion, 1)
            });
        Ok(NoteText::new(corrected))
    }
}

/// Corrector that always fails with the configured error.
#[derive(Debug, Clone)]
pub struct FailingSpellingCorrector(pub SpellingCorrectionError);

#[async_trait]
impl SpellingCorrector for FailingSpellingCorrector {
    async fn correct(&self, _text: &NoteText) -> Result<NoteText, SpellingCorrectionError> {
        Err(self.0.clone())
    }
}
