//! Note data model.
//!
//! A note belongs to exactly one user and is never edited; it is only
//! created, listed by its owner, or deleted by its owner.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::user::UserId;

/// Storage identifier of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(i32);

impl NoteId {
    /// Wrap a raw storage identifier.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw storage identifier.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Free-form note body. Any string is accepted, including the empty one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteText(String);

impl NoteText {
    /// Wrap note text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Borrow the text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Take ownership of the text.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for NoteText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Persisted note with its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    id: NoteId,
    owner: UserId,
    text: NoteText,
}

impl Note {
    /// Assemble a note from persisted parts.
    #[must_use]
    pub const fn new(id: NoteId, owner: UserId, text: NoteText) -> Self {
        Self { id, owner, text }
    }

    /// Storage identifier.
    #[must_use]
    pub const fn id(&self) -> NoteId {
        self.id
    }

    /// Owning user.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Note body.
    #[must_use]
    pub const fn text(&self) -> &NoteText {
        &self.text
    }
}
