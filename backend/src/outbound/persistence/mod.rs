//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the credential and note repository ports,
//! backed by PostgreSQL via `diesel-async` and `bb8` connection pooling.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. No business logic resides here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Bounded operations**: checkout plus query run under one storage
//!   deadline and report `Timeout` when it elapses.
//!
//! # Example
//!
//! ```ignore
//! use notes_api::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/notes")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod deadline;
mod diesel_basic_error_mapping;
mod diesel_note_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use deadline::DEFAULT_STORAGE_TIMEOUT;
pub use diesel_note_repository::DieselNoteRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
