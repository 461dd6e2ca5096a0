//! Test utilities for the notes backend.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`, via
//! the `test-support` feature). Nothing here is wired into the production
//! binary.

mod clock;
mod doubles;

pub use clock::MutableClock;
pub use doubles::{
    FailingSpellingCorrector, FixedSpellingCorrector, InMemoryNoteRepository,
    InMemoryUserRepository, PlaintextPasswordHasher,
};
